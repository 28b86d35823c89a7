//! Cipher error types.

use thiserror::Error;

/// Errors raised by key management and the buffer-level API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CipherError {
    /// Ciphertext length is not a whole number of blocks.
    #[error("invalid input: length {length} is not a multiple of 16 bytes")]
    InvalidInput {
        /// Length of the rejected input.
        length: usize,
    },

    /// Key size is not 16, 24 or 32 bytes.
    #[error("unsupported key length: {0} bytes (expected 16, 24 or 32)")]
    UnsupportedKeyLength(usize),

    /// Key bytes do not match the requested key length tag.
    #[error("key length mismatch: expected {expected} bytes, got {actual}")]
    KeyLengthMismatch {
        /// Byte length implied by the tag.
        expected: usize,
        /// Byte length actually supplied.
        actual: usize,
    },

    /// Output buffer cannot hold the result.
    #[error("output buffer too small: need {needed} bytes, got {actual}")]
    OutputTooSmall {
        /// Bytes the operation will write.
        needed: usize,
        /// Size of the supplied buffer.
        actual: usize,
    },
}

/// Result alias for cipher operations.
pub type Result<T> = std::result::Result<T, CipherError>;
