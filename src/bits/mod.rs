//! Bit-string identifiers and XOR arithmetic
//!
//! Node ids are root-to-node paths: `0` = left child, `1` = right child.
//! Distances are the bitwise XOR of two equal-length paths.

mod distance;
mod id;

pub use distance::{xor_distance, XorDistance, ZERO_DISTANCE};
pub use id::{IdError, NodeId, PathBits, BINARY_PREFIX, HEX_PREFIX};

use bitvec::prelude::*;

/// Render bits as `0x`-prefixed lowercase hex.
///
/// Width is the nibble count of `bits`, rounded up to an even digit count
/// with a minimum of two digits. Leading zero bits still occupy digits, so
/// values of the same bit length print at the same width.
pub(crate) fn format_hex(bits: &BitSlice<u8, Msb0>) -> String {
    let nibbles = (bits.len() + 3) / 4;
    let digits = pad_to_even(nibbles).max(2);
    let pad = digits * 4 - bits.len();

    let mut out = String::with_capacity(HEX_PREFIX.len() + digits);
    out.push_str(HEX_PREFIX);
    for digit in 0..digits {
        let mut nibble = 0u32;
        for offset in 0..4 {
            let pos = digit * 4 + offset;
            let bit = pos >= pad && bits[pos - pad];
            nibble = (nibble << 1) | bit as u32;
        }
        // nibble < 16 so from_digit never fails
        out.push(char::from_digit(nibble, 16).unwrap_or('0'));
    }
    out
}

/// Round a digit count up to the next even number.
#[inline]
pub(crate) fn pad_to_even(digits: usize) -> usize {
    digits + digits % 2
}

/// Fold bits (MSB first) into an integer, saturating at `u64::MAX`.
pub(crate) fn bits_to_u64(bits: &BitSlice<u8, Msb0>) -> u64 {
    let excess = bits.len().saturating_sub(64);
    if bits[..excess].any() {
        return u64::MAX;
    }
    bits[excess..]
        .iter()
        .by_vals()
        .fold(0u64, |acc, bit| (acc << 1) | bit as u64)
}
