use thiserror::Error;

use crate::upstream::UpstreamError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// one record could not be used, the rest of the batch is fine
    #[error("malformed {kind} record: {reason}")]
    MalformedRecord { kind: &'static str, reason: String },

    #[error("upstream failure: {0}")]
    UpstreamFailure(#[from] UpstreamError),

    #[error("unknown time window '{0}', expected recent, medium or all")]
    InvalidTimeWindow(String),

    #[error("playlist {0} not found")]
    PlaylistNotFound(String),
}
