use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventsClientError {
    #[error("invalid events api url: {0}")]
    Url(#[from] url::ParseError),
    #[error("events api request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API {status}: {body}")]
    Http { status: u16, body: String },
    #[error("failed to decode events api response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl EventsClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}
