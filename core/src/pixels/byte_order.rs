use ndarray::Array2;

/// Swaps the high and low byte of a 16-bit sample
///
/// The decoder writes samples in the opposite byte order to the scanner's,
/// so every sample must go through this once. Applying it twice is a no-op.
#[inline]
pub fn reverse_bytes(v: u16) -> u16 {
    let low = v >> 8;
    let high = v & 0xFF;
    (high << 8) | low
}

/// Applies [`reverse_bytes`] to every sample in place
pub fn reverse_bytes_in_place(samples: &mut Array2<u16>) {
    samples.mapv_inplace(reverse_bytes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_reverse_bytes() {
        assert_eq!(reverse_bytes(0x0000), 0x0000);
        assert_eq!(reverse_bytes(0x00FF), 0xFF00);
        assert_eq!(reverse_bytes(0x0F01), 0x010F);
        assert_eq!(reverse_bytes(0xABCD), 0xCDAB);
    }

    #[test]
    fn test_matches_swap_bytes() {
        for v in (0..=u16::MAX).step_by(7) {
            assert_eq!(reverse_bytes(v), v.swap_bytes());
        }
    }

    #[test]
    fn test_involution() {
        for v in 0..=u16::MAX {
            assert_eq!(reverse_bytes(reverse_bytes(v)), v);
        }
    }

    #[test]
    fn test_in_place() {
        let mut samples = array![[0x0100u16, 0x0F00], [0x00FF, 0x1234]];
        reverse_bytes_in_place(&mut samples);
        assert_eq!(samples, array![[0x0001u16, 0x000F], [0xFF00, 0x3412]]);
    }
}
