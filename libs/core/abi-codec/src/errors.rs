//! Error kinds for the ABI codec. `AbiEncodeError`/`AbiDecodeError`
//! are bug-class — the request processor logs and skips the id rather
//! than treating them as a per-id business failure, unless they occur
//! while decoding a response to a call the worker itself issued, in
//! which case the caller maps them onto `markAnalysisFailed`.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AbiEncodeError {
    #[error("unsupported argument type for signature '{signature}' at position {position}")]
    UnsupportedType { signature: String, position: usize },
    #[error("argument count mismatch for signature '{signature}': expected {expected}, got {actual}")]
    ArityMismatch {
        signature: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AbiDecodeError {
    #[error("input truncated: needed at least {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },
    #[error("dynamic-type offset {offset} overflows the input ({len} bytes)")]
    OffsetOverflow { offset: usize, len: usize },
    #[error("decoded string is not valid UTF-8: {0}")]
    NonUtf8(String),
    #[error("unknown function signature: {0}")]
    UnknownSignature(String),
}
