use memegen_core::{Endpoint, MemeInfo};
use reqwest::Client;
use tracing::debug;

use crate::error::Result;
use crate::http::{send_image, send_json};
use crate::types::{RenderRequest, RenderedImage};

/// Client for the remote meme service rooted at a normalized [`Endpoint`].
#[derive(Debug, Clone)]
pub struct MemeClient {
    client: Client,
    endpoint: Endpoint,
}

impl MemeClient {
    pub fn new(client: Client, endpoint: Endpoint) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// `GET /memes/{key}/info`
    pub async fn info(&self, key: &str) -> Result<MemeInfo> {
        let url = self.endpoint.join(&format!("/memes/{key}/info"));
        debug!(%url, "fetching meme info");
        send_json(self.client.get(url)).await
    }

    /// `GET /memes/{key}/preview`
    pub async fn preview(&self, key: &str) -> Result<RenderedImage> {
        let url = self.endpoint.join(&format!("/memes/{key}/preview"));
        debug!(%url, "fetching meme preview");
        send_image(self.client.get(url)).await
    }

    /// `POST /memes/{key}` with `texts` and optional `args` form fields.
    pub async fn render(&self, key: &str, req: &RenderRequest) -> Result<RenderedImage> {
        let url = self.endpoint.join(&format!("/memes/{key}"));
        debug!(%url, texts = req.texts.len(), has_args = req.args.is_some(), "rendering meme");
        send_image(self.client.post(url).multipart(req.to_form())).await
    }
}
