//! Codec errors with the function they occurred in

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Tokens did not match the function's input types
    #[error("ABI encoding failed for {function}: {reason}")]
    Encode { function: String, reason: String },

    /// Bytes did not decode as the function's inputs or outputs
    #[error("ABI decoding failed for {function}: {reason}")]
    Decode { function: String, reason: String },

    /// Calldata is for a different function
    #[error("Selector mismatch for {function}: expected 0x{expected}, got 0x{actual}")]
    SelectorMismatch {
        function: String,
        expected: String,
        actual: String,
    },

    /// Calldata shorter than a 4-byte selector
    #[error("Calldata too short: {len} bytes")]
    Truncated { len: usize },

    /// Decoded tokens are not shaped as expected
    #[error("Unexpected value in {function}: expected {expected}")]
    UnexpectedShape { function: String, expected: String },

    /// Integer does not fit the Rust type it maps to
    #[error("Value out of range in {function}: {detail}")]
    OutOfRange { function: String, detail: String },
}
