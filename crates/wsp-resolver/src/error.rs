use thiserror::Error;
use wsp_aggregator::AggregatorError;
use wsp_types::ObjectId;

/// Why a path could not be resolved to verified bytes.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// No resource at this path (after the fallback, if one applied).
    #[error("resource not found: {path}")]
    NotFound { path: String },

    #[error("redirect loop detected at {object_id}")]
    RedirectLoop { object_id: ObjectId },

    #[error("too many redirects (limit {limit})")]
    TooManyRedirects { limit: usize },

    #[error("invalid redirect target on {object_id}: {reason}")]
    InvalidRedirect { object_id: ObjectId, reason: String },

    /// The resource record behind a confirmed redirect could not be decoded.
    #[error("malformed resource record: {0}")]
    Decode(#[from] wsp_codec::DecodeError),

    #[error("aggregator error: {status}")]
    Aggregator { status: u16 },

    #[error("checksum mismatch (aggregator response hash {computed} != on-chain hash {expected})")]
    ChecksumMismatch { expected: String, computed: String },

    /// The record's quilt patch header cannot be turned into a patch id.
    #[error("invalid quilt patch reference: {0}")]
    InvalidQuiltPatch(wsp_crypto::DeriveError),

    /// The aggregator could not be reached or its response not read.
    #[error("aggregator transport error: {0}")]
    Transport(reqwest::Error),

    #[error("ledger error: {0}")]
    Ledger(#[from] wsp_ledger::LedgerError),

    #[error("invalid site configuration: {0}")]
    InvalidConfig(String),
}

impl ResolutionError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Failures caused by the ledger or the storage network rather than by
    /// the site itself.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Aggregator { .. } | Self::ChecksumMismatch { .. } | Self::Transport(_) | Self::Ledger(_)
        )
    }
}

impl From<AggregatorError> for ResolutionError {
    fn from(err: AggregatorError) -> Self {
        match err {
            AggregatorError::Status { status } => Self::Aggregator { status },
            AggregatorError::ChecksumMismatch { expected, computed } => {
                Self::ChecksumMismatch { expected, computed }
            }
            AggregatorError::QuiltPatch(err) => Self::InvalidQuiltPatch(err),
            AggregatorError::Transport(err) => Self::Transport(err),
        }
    }
}

pub type ResolutionResult<T> = Result<T, ResolutionError>;
