use crate::error::{ClientError, Result};
use crate::types::RenderedImage;
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, Response};

/// Content type assumed when the service omits one.
pub const DEFAULT_IMAGE_TYPE: &str = "image/png";

/// Send a request and parse a JSON body.
///
/// Executed once; failures surface to the caller without retry.
pub async fn send_json<T: serde::de::DeserializeOwned>(req: RequestBuilder) -> Result<T> {
    let resp = checked(req).await?;
    resp.json()
        .await
        .map_err(|e| ClientError::Parse(e.to_string()))
}

/// Send a request expecting a binary image body.
pub async fn send_image(req: RequestBuilder) -> Result<RenderedImage> {
    let resp = checked(req).await?;
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_IMAGE_TYPE)
        .to_string();
    let bytes = resp.bytes().await?;
    Ok(RenderedImage {
        bytes,
        content_type,
    })
}

async fn checked(req: RequestBuilder) -> Result<Response> {
    let resp = req.send().await?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(resp)
}
