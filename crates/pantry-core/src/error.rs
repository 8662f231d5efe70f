use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Search query is empty")]
    EmptyQuery,

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Failures talking to the remote recipe API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream returned HTTP {0}")]
    Status(u16),

    #[error("Recipe not found: {0}")]
    NotFound(String),

    #[error("Malformed response: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Encoding error: {0}")]
    Encoding(String),
}
