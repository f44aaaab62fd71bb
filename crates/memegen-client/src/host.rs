//! Seams to the chat host that parses command lines and owns sessions.

use async_trait::async_trait;
use thiserror::Error;

use crate::invoker::MemeCommand;
use crate::types::RenderedImage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Image(RenderedImage),
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("send failed: {0}")]
    Send(String),
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("command already registered: {0}")]
    Duplicate(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The conversation a command was invoked from.
#[async_trait]
pub trait Session: Send + Sync {
    async fn send(&self, reply: Reply) -> Result<(), HostError>;

    /// Run another command line in this session, e.g. `help memegen-petpet`.
    async fn execute(&self, command_line: &str) -> Result<(), HostError>;
}

/// Anything commands can be registered with.
pub trait CommandHost {
    fn register(&mut self, command: MemeCommand) -> Result<(), HostError>;
}
