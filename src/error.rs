use thiserror::Error;
use validator::ValidationErrors;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
    #[error("Failed to download `{location}`: {source}")]
    Download {
        location: String,
        source: anyhow::Error,
    },
    #[error("GraphQL error: {0}")]
    Graphql(String),
    #[error("Schema error: {0}")]
    Schema(String),
    #[error("Share node rejected `{operation}`: {message}")]
    Rejected { operation: String, message: String },
    #[error("No vaccine record found for `{0}`")]
    RecordNotFound(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn invalid_event<T: Into<String>>(message: T) -> Self {
        Self::InvalidEvent(message.into())
    }

    pub fn download<T: Into<String>, E: Into<anyhow::Error>>(location: T, source: E) -> Self {
        Self::Download {
            location: location.into(),
            source: source.into(),
        }
    }
}
