use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("General error: {0}")]
    General(String),
}
