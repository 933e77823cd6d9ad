//! Error types for decoding and encoding editor messages.

#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("Malformed message JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty message")]
    Empty,
}
