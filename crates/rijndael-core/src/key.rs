//! Key types for AES-128, AES-192 and AES-256.

use core::fmt;

use crate::block::{Block, BLOCK_SIZE};
use crate::error::{CipherError, Result};

/// Supported key sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyLength {
    /// 128-bit key, 10 rounds.
    Aes128,
    /// 192-bit key, 12 rounds.
    Aes192,
    /// 256-bit key, 14 rounds.
    Aes256,
}

impl KeyLength {
    /// Key size in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }

    /// Key size in bits.
    pub const fn bits(self) -> usize {
        self.bytes() * 8
    }

    /// Number of cipher rounds.
    pub const fn rounds(self) -> usize {
        match self {
            Self::Aes128 => 10,
            Self::Aes192 => 12,
            Self::Aes256 => 14,
        }
    }

    /// Size of the expanded key schedule in bytes: `(rounds + 1) * 16`.
    pub const fn schedule_len(self) -> usize {
        (self.rounds() + 1) * BLOCK_SIZE
    }
}

impl TryFrom<usize> for KeyLength {
    type Error = CipherError;

    /// Maps a key size in bytes to its tag.
    fn try_from(bytes: usize) -> Result<Self> {
        match bytes {
            16 => Ok(Self::Aes128),
            24 => Ok(Self::Aes192),
            32 => Ok(Self::Aes256),
            other => Err(CipherError::UnsupportedKeyLength(other)),
        }
    }
}

impl fmt::Display for KeyLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AES-{}", self.bits())
    }
}

/// Raw cipher key whose size is one of the supported lengths.
#[derive(Clone, PartialEq, Eq)]
pub struct Key {
    length: KeyLength,
    bytes: Vec<u8>,
}

impl Key {
    /// Validates and copies `bytes`, inferring the key length from their size.
    pub fn new(bytes: &[u8]) -> Result<Self> {
        let length = KeyLength::try_from(bytes.len())?;
        Ok(Self {
            length,
            bytes: bytes.to_vec(),
        })
    }

    /// Validates `bytes` against an explicit length tag.
    pub fn with_length(bytes: &[u8], length: KeyLength) -> Result<Self> {
        let key = Self::new(bytes)?;
        if key.length != length {
            return Err(CipherError::KeyLengthMismatch {
                expected: length.bytes(),
                actual: bytes.len(),
            });
        }
        Ok(key)
    }

    /// The all-zero key of the given length.
    pub fn zeroed(length: KeyLength) -> Self {
        Self {
            length,
            bytes: vec![0u8; length.bytes()],
        }
    }

    /// Key length tag.
    #[inline]
    pub fn length(&self) -> KeyLength {
        self.length
    }

    /// Raw key bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

// Key material stays out of logs and panic messages.
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

/// Expanded round keys, `rounds + 1` blocks laid out contiguously.
#[derive(Clone, PartialEq, Eq)]
pub struct KeySchedule {
    length: KeyLength,
    round_keys: Vec<Block>,
}

impl KeySchedule {
    pub(crate) fn new(length: KeyLength, round_keys: Vec<Block>) -> Self {
        debug_assert_eq!(round_keys.len(), length.rounds() + 1);
        Self { length, round_keys }
    }

    /// Key length the schedule was expanded from.
    #[inline]
    pub fn key_length(&self) -> KeyLength {
        self.length
    }

    /// Number of cipher rounds.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.length.rounds()
    }

    /// Returns the round key at the requested index (0..=rounds).
    #[inline]
    pub fn round_key(&self, round: usize) -> &Block {
        &self.round_keys[round]
    }

    /// The whole schedule as `(rounds + 1) * 16` bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.round_keys.as_flattened()
    }
}

impl fmt::Debug for KeySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySchedule")
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}
