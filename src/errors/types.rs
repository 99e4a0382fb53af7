use thiserror::Error;

#[derive(Debug, Error)]
pub enum CouncilError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimit(String),

    #[error("Quota exceeded: {0}")]
    Quota(String),

    #[error("Provider API error: {0}")]
    Api(String),

    #[error("No providers available: {0}")]
    NoProviders(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
