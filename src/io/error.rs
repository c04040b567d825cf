use thiserror::Error;

/// Failures while parsing the text graph format.
///
/// Parsing stops at the first malformed token; the graph under
/// construction may be left partially populated and should be cleared or
/// re-read by the caller.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("expected {expected:?}, found {found:?}")]
    Unexpected { expected: String, found: String },
    #[error("malformed number {0:?}")]
    BadNumber(String),
    #[error("malformed blocked flag {0:?}")]
    BadBlockedFlag(String),
    #[error("link target index {0} out of range")]
    TargetOutOfRange(u64),
    #[error("input is not valid utf-8")]
    InvalidUtf8,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
