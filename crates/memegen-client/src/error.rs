use thiserror::Error;

/// Marker the meme service puts in error bodies caused by bad user input.
pub const PARAMS_MISMATCH: &str = "ParamsMismatch";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("http {status}: {}", first_lines(.body, 20))]
    Status { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("encode error: {0}")]
    Encode(String),
}

impl ClientError {
    /// True when the service rejected the request because the supplied
    /// texts/images/args did not fit the meme.
    pub fn is_params_mismatch(&self) -> bool {
        matches!(self, ClientError::Status { body, .. } if body.contains(PARAMS_MISMATCH))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn first_lines(text: &str, n: usize) -> String {
    text.lines().take(n).collect::<Vec<_>>().join("\n")
}

pub type Result<T> = std::result::Result<T, ClientError>;
