use thiserror::Error;

/// Errors from aggregator retrieval.
#[derive(Debug, Error)]
pub enum AggregatorError {
    /// Any non-success status other than 404.
    #[error("aggregator error: HTTP {status}")]
    Status { status: u16 },

    /// The served bytes do not hash to the on-chain value. The bytes are
    /// discarded.
    #[error("checksum mismatch: on-chain hash {expected}, aggregator response hash {computed}")]
    ChecksumMismatch { expected: String, computed: String },

    #[error("cannot derive quilt patch id: {0}")]
    QuiltPatch(#[from] wsp_crypto::DeriveError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type AggregatorResult<T> = Result<T, AggregatorError>;
