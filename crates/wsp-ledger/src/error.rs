use thiserror::Error;

/// Errors from ledger queries.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("RPC endpoint returned HTTP {0}")]
    HttpStatus(u16),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid RPC response: {0}")]
    InvalidResponse(String),

    #[error("expected {expected} objects in response, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

pub type LedgerResult<T> = Result<T, LedgerError>;
