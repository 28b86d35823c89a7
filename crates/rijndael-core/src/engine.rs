//! Buffer-level cipher engine.

use tracing::{debug, trace};

use crate::block::{Block, BLOCK_SIZE};
use crate::cipher::{decrypt_block, encrypt_block, expand_key};
use crate::error::{CipherError, Result};
use crate::key::{Key, KeyLength, KeySchedule};

/// AES engine owning a key and its expanded schedule.
///
/// Buffers are processed as independent 16-byte blocks (ECB-style) with no
/// chaining or authentication. Per-block state lives on the stack of each call,
/// so one engine can be shared read-only between threads; re-keying needs
/// exclusive access.
#[derive(Clone, Debug)]
pub struct BlockCipherEngine {
    key: Key,
    schedule: KeySchedule,
}

impl BlockCipherEngine {
    /// Creates an engine for `key_length`.
    ///
    /// Without a key the engine runs under the all-zero key of that length.
    pub fn new(key_length: KeyLength, key: Option<&[u8]>) -> Result<Self> {
        let key = match key {
            Some(bytes) => Key::with_length(bytes, key_length)?,
            None => Key::zeroed(key_length),
        };
        Ok(Self::from_key(key))
    }

    /// Creates an engine, inferring the key length from `key.len()`.
    pub fn with_key(key: &[u8]) -> Result<Self> {
        Ok(Self::from_key(Key::new(key)?))
    }

    fn from_key(key: Key) -> Self {
        let schedule = expand_key(&key);
        Self { key, schedule }
    }

    /// Replaces the key and re-expands the schedule.
    ///
    /// The key is validated and expanded before anything is replaced, so on error
    /// the engine keeps serving its previous key.
    pub fn set_key(&mut self, key: &[u8], key_length: KeyLength) -> Result<()> {
        let key = Key::with_length(key, key_length)?;
        let schedule = expand_key(&key);
        if key.length() != self.key.length() {
            debug!(from = %self.key.length(), to = %key.length(), "key length changed");
        }
        self.key = key;
        self.schedule = schedule;
        Ok(())
    }

    /// Current key length.
    #[inline]
    pub fn key_length(&self) -> KeyLength {
        self.key.length()
    }

    /// Number of rounds for the current key.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.key.length().rounds()
    }

    /// Expanded schedule for the current key.
    #[inline]
    pub fn key_schedule(&self) -> &KeySchedule {
        &self.schedule
    }

    /// Encrypts one block.
    #[inline]
    pub fn encrypt_block(&self, block: &Block) -> Block {
        encrypt_block(block, &self.schedule)
    }

    /// Decrypts one block.
    #[inline]
    pub fn decrypt_block(&self, block: &Block) -> Block {
        decrypt_block(block, &self.schedule)
    }

    /// Length of the ciphertext for `length` bytes of plaintext: `length` rounded
    /// up to a whole number of blocks.
    pub const fn encrypted_length(length: usize) -> usize {
        length.div_ceil(BLOCK_SIZE) * BLOCK_SIZE
    }

    /// Encrypts `input` into `output` and returns the number of bytes written.
    ///
    /// A trailing partial block is zero-filled to 16 bytes before encryption.
    /// `output` must hold at least [`Self::encrypted_length`] bytes; bytes past
    /// that are left untouched.
    pub fn encrypt(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let needed = Self::encrypted_length(input.len());
        check_output(needed, output.len())?;

        let mut blocks = input.chunks_exact(BLOCK_SIZE);
        let mut out_blocks = output[..needed].chunks_exact_mut(BLOCK_SIZE);
        for (chunk, out) in (&mut blocks).zip(&mut out_blocks) {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            out.copy_from_slice(&self.encrypt_block(&block));
        }

        let tail = blocks.remainder();
        if let Some(out) = out_blocks.next() {
            let mut block = [0u8; BLOCK_SIZE];
            block[..tail.len()].copy_from_slice(tail);
            out.copy_from_slice(&self.encrypt_block(&block));
        }

        trace!(
            input_len = input.len(),
            blocks = needed / BLOCK_SIZE,
            padded = !tail.is_empty(),
            "encrypted buffer"
        );
        Ok(needed)
    }

    /// Decrypts `input` into `output` and returns the number of bytes written.
    ///
    /// `input` must be a whole number of blocks. Padding is not removed; the
    /// caller has to know the true plaintext length.
    pub fn decrypt(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        if input.len() % BLOCK_SIZE != 0 {
            return Err(CipherError::InvalidInput {
                length: input.len(),
            });
        }
        check_output(input.len(), output.len())?;

        for (chunk, out) in input
            .chunks_exact(BLOCK_SIZE)
            .zip(output.chunks_exact_mut(BLOCK_SIZE))
        {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            out.copy_from_slice(&self.decrypt_block(&block));
        }

        trace!(blocks = input.len() / BLOCK_SIZE, "decrypted buffer");
        Ok(input.len())
    }

    /// Encrypts `input` into a freshly allocated buffer.
    pub fn encrypt_to_vec(&self, input: &[u8]) -> Vec<u8> {
        let mut output = vec![0u8; Self::encrypted_length(input.len())];
        match self.encrypt(input, &mut output) {
            Ok(_) => output,
            Err(_) => unreachable!("output is sized by encrypted_length"),
        }
    }

    /// Decrypts `input` into a freshly allocated buffer.
    pub fn decrypt_to_vec(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = vec![0u8; input.len()];
        self.decrypt(input, &mut output)?;
        Ok(output)
    }
}

fn check_output(needed: usize, actual: usize) -> Result<()> {
    if actual < needed {
        return Err(CipherError::OutputTooSmall { needed, actual });
    }
    Ok(())
}
