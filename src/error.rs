use thiserror::Error;

/// Persistence errors.
///
/// Validation failures are *not* errors — they are reportable
/// [`crate::model::Rejection`] values. Nothing here is fatal to the process:
/// callers fall back to a fresh world, logging as they go.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("save file I/O failed")]
    Io(#[from] std::io::Error),

    #[error("save snapshot could not be decoded")]
    Decode(#[from] serde_json::Error),
}
