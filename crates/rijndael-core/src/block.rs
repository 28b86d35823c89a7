//! Block and state representation helpers.

/// Size of one cipher block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// AES block of 16 bytes.
pub type Block = [u8; BLOCK_SIZE];

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// The 4x4 byte matrix a block is transformed in.
///
/// Bytes are stored column-major, as FIPS-197 lays out the input: byte `4 * c + r`
/// sits in row `r` of column `c`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct State([u8; BLOCK_SIZE]);

impl State {
    /// Loads a block into a fresh state.
    #[inline]
    pub fn from_block(block: &Block) -> Self {
        Self(*block)
    }

    /// Returns the state as a block.
    #[inline]
    pub fn to_block(self) -> Block {
        self.0
    }

    /// Returns the flat column-major bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }

    /// Returns the flat column-major bytes mutably.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8; BLOCK_SIZE] {
        &mut self.0
    }

    /// Returns column `index` (0..4).
    #[inline]
    pub fn column(&self, index: usize) -> [u8; 4] {
        debug_assert!(index < 4, "column index out of range: {index}");
        let start = index * 4;
        [
            self.0[start],
            self.0[start + 1],
            self.0[start + 2],
            self.0[start + 3],
        ]
    }

    /// Overwrites column `index` (0..4).
    #[inline]
    pub fn set_column(&mut self, index: usize, column: [u8; 4]) {
        debug_assert!(index < 4, "column index out of range: {index}");
        let start = index * 4;
        self.0[start..start + 4].copy_from_slice(&column);
    }

    /// Returns row `index` (0..4).
    #[inline]
    pub fn row(&self, index: usize) -> [u8; 4] {
        debug_assert!(index < 4, "row index out of range: {index}");
        [
            self.0[index],
            self.0[4 + index],
            self.0[8 + index],
            self.0[12 + index],
        ]
    }

    /// Overwrites row `index` (0..4).
    #[inline]
    pub fn set_row(&mut self, index: usize, row: [u8; 4]) {
        debug_assert!(index < 4, "row index out of range: {index}");
        for (col, byte) in row.into_iter().enumerate() {
            self.0[col * 4 + index] = byte;
        }
    }

    /// Writes the transposed matrix (row-major order) into `scratch`.
    #[inline]
    pub fn transpose_into(&self, scratch: &mut [u8; BLOCK_SIZE]) {
        transpose(&self.0, scratch);
    }

    /// Loads the state back from a row-major `scratch` buffer.
    #[inline]
    pub fn load_transposed(&mut self, scratch: &[u8; BLOCK_SIZE]) {
        transpose(scratch, &mut self.0);
    }

    /// XORs a round key into the state.
    #[inline]
    pub fn xor_block(&mut self, rhs: &Block) {
        xor_in_place(&mut self.0, rhs);
    }
}

fn transpose(input: &[u8; BLOCK_SIZE], output: &mut [u8; BLOCK_SIZE]) {
    for i in 0..4 {
        for j in 0..4 {
            output[i * 4 + j] = input[j * 4 + i];
        }
    }
}
