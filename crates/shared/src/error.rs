use thiserror::Error;

/// Failure modes of the engine boundary.
///
/// `Rejected` is the engine refusing a request (invalid move, invalid
/// puzzle, engine-side I/O failure); the others are transport-level. None of
/// these is fatal to the client: every one degrades to a status-line
/// message.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine rejected request: {0}")]
    Rejected(String),
    #[error("engine connection closed")]
    Disconnected,
    #[error("malformed engine frame: {0}")]
    Protocol(String),
    #[error("engine i/o failure: {0}")]
    Io(#[from] std::io::Error),
}
