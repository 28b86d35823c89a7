//! Key schedule and single-block encryption/decryption.

use tracing::debug;

use crate::block::{Block, State, BLOCK_SIZE};
use crate::field::dbl;
use crate::key::{Key, KeySchedule};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::sbox;

/// First value of the round-constant sequence.
const RCON_START: u8 = 0x01;

fn sub_word(word: &mut [u8; 4]) {
    for byte in word.iter_mut() {
        *byte = sbox(*byte);
    }
}

fn word_at(bytes: &[u8], offset: usize) -> [u8; 4] {
    [
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ]
}

/// Writes `word ^ bytes[offset - nk..]` at `offset`.
fn store_xor(bytes: &mut [u8], offset: usize, nk: usize, word: [u8; 4]) {
    for (k, byte) in word.into_iter().enumerate() {
        bytes[offset + k] = byte ^ bytes[offset + k - nk];
    }
}

/// Expands a 128, 192 or 256-bit key into `rounds + 1` round keys.
///
/// The schedule is filled one key-sized group at a time. The first word of each
/// group goes through RotWord, SubWord and the round constant; AES-256 also
/// substitutes the word halfway through each group.
pub fn expand_key(key: &Key) -> KeySchedule {
    let length = key.length();
    let nk = length.bytes();
    let mut round_keys = vec![[0u8; BLOCK_SIZE]; length.rounds() + 1];
    let w = round_keys.as_flattened_mut();
    let total = w.len();
    w[..nk].copy_from_slice(key.as_bytes());

    let mut rcon = RCON_START;
    let mut group = nk;
    while group < total {
        let mut word = word_at(w, group - 4);
        word.rotate_left(1);
        sub_word(&mut word);
        word[0] ^= rcon;
        rcon = dbl(rcon);
        store_xor(w, group, nk, word);

        let mut j = 4;
        while j < nk && group + j < total {
            let mut word = word_at(w, group + j - 4);
            if nk == 32 && j == 16 {
                sub_word(&mut word);
            }
            store_xor(w, group + j, nk, word);
            j += 4;
        }
        group += nk;
    }

    debug!(key_length = %length, rounds = length.rounds(), "expanded key schedule");
    KeySchedule::new(length, round_keys)
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &KeySchedule) -> Block {
    let rounds = round_keys.rounds();
    let mut state = State::from_block(block);

    add_round_key(&mut state, round_keys.round_key(0));

    for round in 1..rounds {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_keys.round_key(round));
    }

    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, round_keys.round_key(rounds));

    state.to_block()
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &KeySchedule) -> Block {
    let rounds = round_keys.rounds();
    let mut state = State::from_block(block);

    add_round_key(&mut state, round_keys.round_key(rounds));
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);

    for round in (1..rounds).rev() {
        add_round_key(&mut state, round_keys.round_key(round));
        inv_mix_columns(&mut state);
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
    }

    add_round_key(&mut state, round_keys.round_key(0));

    state.to_block()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyLength;
    use rand::RngCore;

    const NIST_KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];
    const NIST_PLAIN: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    const NIST_CIPHER: [u8; 16] = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
        0x5a,
    ];

    /// FIPS-197 Appendix C: key bytes 00 01 02 .. counting up, same plaintext.
    const APPENDIX_C: [(usize, &str); 3] = [
        (16, "69c4e0d86a7b0430d8cdb78070b4c55a"),
        (24, "dda97ca4864cdfe06eaf70a0ec0d7191"),
        (32, "8ea2b7ca516745bfeafc49904b496089"),
    ];

    fn counting_key(len: usize) -> Key {
        let bytes: Vec<u8> = (0..len as u8).collect();
        Key::new(&bytes).expect("supported key length")
    }

    fn block_from_hex(hex_str: &str) -> Block {
        hex::decode(hex_str)
            .expect("valid hex")
            .try_into()
            .expect("16 bytes")
    }

    #[test]
    fn encrypt_matches_nist_vector() {
        let key = Key::new(&NIST_KEY).expect("valid key");
        let round_keys = expand_key(&key);
        let ct = encrypt_block(&NIST_PLAIN, &round_keys);
        assert_eq!(ct, NIST_CIPHER);
    }

    #[test]
    fn decrypt_matches_nist_vector() {
        let key = Key::new(&NIST_KEY).expect("valid key");
        let round_keys = expand_key(&key);
        let pt = decrypt_block(&NIST_CIPHER, &round_keys);
        assert_eq!(pt, NIST_PLAIN);
    }

    #[test]
    fn appendix_c_vectors_for_all_key_sizes() {
        for (len, expected) in APPENDIX_C {
            let round_keys = expand_key(&counting_key(len));
            let ct = encrypt_block(&NIST_PLAIN, &round_keys);
            assert_eq!(hex::encode(ct), expected, "{len}-byte key");
            assert_eq!(decrypt_block(&ct, &round_keys), NIST_PLAIN);
        }
    }

    #[test]
    fn appendix_b_cipher_example() {
        let key = Key::new(&hex::decode("2b7e151628aed2a6abf7158809cf4f3c").expect("hex"))
            .expect("valid key");
        let round_keys = expand_key(&key);
        let ct = encrypt_block(&block_from_hex("3243f6a8885a308d313198a2e0370734"), &round_keys);
        assert_eq!(hex::encode(ct), "3925841d02dc09fbdc118597196a0b32");
    }

    #[test]
    fn all_zero_key_and_block() {
        let round_keys = expand_key(&Key::zeroed(KeyLength::Aes128));
        let ct = encrypt_block(&[0u8; 16], &round_keys);
        assert_eq!(hex::encode(ct), "66e94bd4ef8a2c3b884cfa59ca342b2e");
    }

    #[test]
    fn schedule_matches_appendix_a_final_round_keys() {
        // Last round key of each FIPS-197 Appendix A expansion.
        let cases = [
            (
                "2b7e151628aed2a6abf7158809cf4f3c",
                "d014f9a8c9ee2589e13f0cc8b6630ca6",
            ),
            (
                "8e73b0f7da0e6452c810f32b809079e562f8ead2522c6b7b",
                "e98ba06f448c773c8ecc720401002202",
            ),
            (
                "603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4",
                "fe4890d1e6188d0b046df344706c631e",
            ),
        ];
        for (key_hex, last_hex) in cases {
            let key = Key::new(&hex::decode(key_hex).expect("hex")).expect("valid key");
            let schedule = expand_key(&key);
            assert_eq!(schedule.as_bytes().len(), key.length().schedule_len());
            assert_eq!(&schedule.as_bytes()[..key.as_bytes().len()], key.as_bytes());
            assert_eq!(
                hex::encode(schedule.round_key(schedule.rounds())),
                last_hex
            );
        }
    }

    #[test]
    fn expansion_is_deterministic() {
        for len in [16, 24, 32] {
            let key = counting_key(len);
            assert_eq!(expand_key(&key), expand_key(&key));
        }
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = rand::thread_rng();
        for len in [16, 24, 32] {
            for _ in 0..50 {
                let mut key_bytes = vec![0u8; len];
                let mut block = [0u8; 16];
                rng.fill_bytes(&mut key_bytes);
                rng.fill_bytes(&mut block);
                let key = Key::new(&key_bytes).expect("valid key");
                let rks = expand_key(&key);
                let ct = encrypt_block(&block, &rks);
                let pt = decrypt_block(&ct, &rks);
                assert_eq!(pt, block);
            }
        }
    }

    #[test]
    fn single_bit_change_spreads_across_block() {
        let rks = expand_key(&counting_key(16));
        let mut flipped = NIST_PLAIN;
        flipped[0] ^= 0x01;
        let a = encrypt_block(&NIST_PLAIN, &rks);
        let b = encrypt_block(&flipped, &rks);
        let differing_bits: u32 = a
            .iter()
            .zip(b.iter())
            .map(|(x, y)| (x ^ y).count_ones())
            .sum();
        assert!(differing_bits > 32, "only {differing_bits} bits changed");
    }
}
