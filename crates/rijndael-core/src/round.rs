//! AES round transformations.

use crate::block::{Block, State, BLOCK_SIZE};
use crate::field::dbl;
use crate::sbox::{inv_sbox, sbox};

/// Row rotation offsets for ShiftRows.
const SHIFT_OFFSETS: [usize; 4] = [0, 1, 2, 3];
/// Row rotation offsets for InvShiftRows.
const INV_SHIFT_OFFSETS: [usize; 4] = [0, 3, 2, 1];

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut State) {
    for byte in state.as_bytes_mut().iter_mut() {
        *byte = sbox(*byte);
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut State) {
    for byte in state.as_bytes_mut().iter_mut() {
        *byte = inv_sbox(*byte);
    }
}

fn rotate_rows(state: &mut State, offsets: &[usize; 4]) {
    let mut scratch = [0u8; BLOCK_SIZE];
    state.transpose_into(&mut scratch);
    for (row, offset) in scratch.chunks_exact_mut(4).zip(offsets) {
        row.rotate_left(*offset);
    }
    state.load_transposed(&scratch);
}

/// Performs ShiftRows in place: row `r` rotates left by `r`.
#[inline]
pub fn shift_rows(state: &mut State) {
    rotate_rows(state, &SHIFT_OFFSETS);
}

/// Performs the inverse of ShiftRows in place.
#[inline]
pub fn inv_shift_rows(state: &mut State) {
    rotate_rows(state, &INV_SHIFT_OFFSETS);
}

fn mix_single_column(col: [u8; 4]) -> [u8; 4] {
    let [c0, c1, c2, c3] = col;
    [
        dbl(c0 ^ c1) ^ c1 ^ c2 ^ c3,
        dbl(c1 ^ c2) ^ c2 ^ c3 ^ c0,
        dbl(c2 ^ c3) ^ c3 ^ c0 ^ c1,
        dbl(c3 ^ c0) ^ c0 ^ c1 ^ c2,
    ]
}

// x, y and z fold the 0e/0b/0d/09 coefficients into doublings so the result
// reuses the forward mixing shape.
fn inv_mix_single_column(col: [u8; 4]) -> [u8; 4] {
    let [c0, c1, c2, c3] = col;
    let x = dbl(c0 ^ c1 ^ c2 ^ c3);
    let y = dbl(x ^ c0 ^ c2);
    let z = dbl(x ^ c1 ^ c3);
    [
        dbl(y ^ c0 ^ c1) ^ c1 ^ c2 ^ c3,
        dbl(z ^ c1 ^ c2) ^ c2 ^ c3 ^ c0,
        dbl(y ^ c2 ^ c3) ^ c3 ^ c0 ^ c1,
        dbl(z ^ c3 ^ c0) ^ c0 ^ c1 ^ c2,
    ]
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut State) {
    for col in 0..4 {
        let mixed = mix_single_column(state.column(col));
        state.set_column(col, mixed);
    }
}

/// Inverse MixColumns over all four columns.
#[inline]
pub fn inv_mix_columns(state: &mut State) {
    for col in 0..4 {
        let mixed = inv_mix_single_column(state.column(col));
        state.set_column(col, mixed);
    }
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut State, round_key: &Block) {
    state.xor_block(round_key);
}
