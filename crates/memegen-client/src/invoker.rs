use memegen_core::CommandSpec;
use std::sync::Arc;
use tracing::warn;

use crate::client::MemeClient;
use crate::error::ClientError;
use crate::host::{Reply, Session};
use crate::types::{OptionValues, RenderRequest, RenderedImage};

/// How a failed preview or render is treated in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The service reported `ParamsMismatch`: the user's input did not fit.
    UserInput,
    /// Transport failures and every other service error.
    Service,
}

impl FailureKind {
    pub fn classify(error: &ClientError) -> Self {
        if error.is_params_mismatch() {
            FailureKind::UserInput
        } else {
            FailureKind::Service
        }
    }
}

/// The single user-facing failure text, whatever went wrong.
pub fn failure_message(example: &str) -> String {
    format!("generation failed, please check input format; example:\n{example}")
}

/// A registered meme command: its frozen signature plus the client used to
/// serve invocations.
#[derive(Debug, Clone)]
pub struct MemeCommand {
    spec: Arc<CommandSpec>,
    client: MemeClient,
}

impl MemeCommand {
    pub fn new(spec: CommandSpec, client: MemeClient) -> Self {
        Self {
            spec: Arc::new(spec),
            client,
        }
    }

    pub fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Runs one invocation.
    ///
    /// With no positional arguments the preview image is sent to `session`
    /// and `help <name>` is executed afterwards; nothing is returned. With
    /// arguments, the rendered image is returned. Failures are reported to
    /// `session` as a text reply and yield `None`.
    pub async fn invoke(
        &self,
        session: &dyn Session,
        args: Vec<String>,
        options: &OptionValues,
    ) -> Option<RenderedImage> {
        if args.is_empty() {
            self.preview_then_help(session).await;
            return None;
        }

        // Image slots are passed through as text until image references can be resolved.
        let result = match RenderRequest::new(args, options) {
            Ok(req) => self.client.render(&self.spec.key, &req).await,
            Err(error) => Err(error),
        };
        match result {
            Ok(image) => Some(image),
            Err(error) => {
                self.report_failure(session, &error).await;
                None
            }
        }
    }

    async fn preview_then_help(&self, session: &dyn Session) {
        let image = match self.client.preview(&self.spec.key).await {
            Ok(image) => image,
            Err(error) => {
                self.report_failure(session, &error).await;
                return;
            }
        };
        if let Err(error) = session.send(Reply::Image(image)).await {
            warn!(command = %self.spec.name, %error, "failed to send preview");
        }
        let help = format!("help {}", self.spec.name);
        if let Err(error) = session.execute(&help).await {
            warn!(command = %self.spec.name, %error, "failed to show help");
        }
    }

    async fn report_failure(&self, session: &dyn Session, error: &ClientError) {
        if FailureKind::classify(error) == FailureKind::Service {
            warn!(command = %self.spec.name, %error, "meme generation failed");
        }
        let message = failure_message(&self.spec.example);
        if let Err(error) = session.send(Reply::Text(message)).await {
            warn!(command = %self.spec.name, %error, "failed to send failure message");
        }
    }
}
