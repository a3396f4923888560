use thiserror::Error;

#[derive(Debug, Error)]
pub enum IpfsError {
    #[error("Pinning failed: `{0}`")]
    PinFailed(String),
    #[error("Content not available: `{0}`")]
    NotFound(String),
    #[error("HTTP client error: `{0}`")]
    HttpClient(#[from] crate::http_client::Error),
    #[error("JSON error: `{0}`")]
    Json(#[from] serde_json::Error),
}
