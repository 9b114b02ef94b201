use thiserror::Error;

/// Errors from address derivation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeriveError {
    #[error("invalid type tag {input:?}: {reason}")]
    InvalidTypeTag { input: String, reason: String },

    #[error("invalid quilt blob id: {0}")]
    InvalidQuiltBlobId(String),

    #[error("invalid quilt patch internal id: {0}")]
    InvalidInternalId(String),
}

pub type DeriveResult<T> = Result<T, DeriveError>;
