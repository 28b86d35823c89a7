//! GF(2^8) arithmetic over the AES reduction polynomial `x^8 + x^4 + x^3 + x + 1`.

/// Multiplies `a` by `x` in GF(2^8).
///
/// The high bit is sign-extended into a mask so the reduction by `0x11b` is
/// branch-free. Only the low byte of the polynomial (`0x1b`) survives the
/// truncation to `u8`.
#[inline]
pub fn dbl(a: u8) -> u8 {
    (a << 1) ^ (0x1b & (a >> 7).wrapping_neg())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gmul(mut a: u8, mut b: u8) -> u8 {
        let mut product = 0u8;
        for _ in 0..8 {
            if b & 1 != 0 {
                product ^= a;
            }
            let hi_bit_set = a & 0x80;
            a <<= 1;
            if hi_bit_set != 0 {
                a ^= 0x1b;
            }
            b >>= 1;
        }
        product
    }

    #[test]
    fn doubling_matches_fips_examples() {
        // FIPS-197 4.2.1: {57} * {02} = {ae}, {ae} * {02} = {47}.
        assert_eq!(dbl(0x57), 0xae);
        assert_eq!(dbl(0xae), 0x47);
        assert_eq!(dbl(0x80), 0x1b);
        assert_eq!(dbl(0x00), 0x00);
    }

    #[test]
    fn doubling_is_multiplication_by_two() {
        for a in 0..=255u8 {
            assert_eq!(dbl(a), gmul(a, 0x02));
        }
    }
}
