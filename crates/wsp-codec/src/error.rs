use thiserror::Error;

/// Errors from decoding BCS-encoded ledger content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("invalid ULEB128 length prefix")]
    InvalidLength,

    #[error("invalid UTF-8 string: {0}")]
    InvalidUtf8(String),

    #[error("invalid option tag: {0}")]
    InvalidOptionTag(u8),

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
}

pub type DecodeResult<T> = Result<T, DecodeError>;
