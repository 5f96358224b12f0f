use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Client configuration error: {0}")]
    Config(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Request failed with status {status}")]
    Status { status: u16, body: String },
}

impl ClientError {
    /// Status code carried by a `Status` failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}
