//! Error types for patricia_dot

use thiserror::Error;

/// Result type alias for patricia_dot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or rendering a trie
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corruption detected: {0}")]
    Corruption(String),
}
