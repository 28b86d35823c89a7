//! AES (Rijndael) block cipher supporting 128, 192 and 256-bit keys.
//!
//! This crate follows FIPS-197 byte for byte and provides:
//! - Key schedule expansion for all three key sizes.
//! - Single-block encryption and decryption.
//! - [`BlockCipherEngine`], a buffer-level API that processes arbitrary-length
//!   input in independent 16-byte blocks, zero-filling a trailing partial block.
//!
//! Blocks are processed without chaining or authentication (ECB-style), so equal
//! plaintext blocks produce equal ciphertext blocks. Decryption does not strip
//! padding; callers must track the true plaintext length. The implementation is
//! table-driven and not constant-time; it should not be treated as side-channel
//! hardened or as a general-purpose secure encryption scheme.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod engine;
mod error;
mod field;
mod key;
mod round;
mod sbox;

pub use crate::block::{Block, State, BLOCK_SIZE};
pub use crate::cipher::{decrypt_block, encrypt_block, expand_key};
pub use crate::engine::BlockCipherEngine;
pub use crate::error::{CipherError, Result};
pub use crate::key::{Key, KeyLength, KeySchedule};
