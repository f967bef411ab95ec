use thiserror::Error;

/// Failure of a single page request. Every variant is retried the same way.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file not readable: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog file malformed: {0}")]
    Parse(#[from] serde_json::Error),
}
