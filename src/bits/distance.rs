//! XOR distance between node ids
//!
//! d(a, b) = a ⊕ b over equal-length paths. Symmetric, zero on the
//! diagonal, and injective in `b` for a fixed `a`.

use std::fmt;

use tracing::trace;

use super::id::{NodeId, PathBits, BINARY_PREFIX};
use super::{bits_to_u64, format_hex};

/// Distance reported for inputs that cannot be compared.
pub const ZERO_DISTANCE: &str = "0x00";

/// Minimum textual length of a comparable id (prefix plus one bit).
const MIN_ID_TEXT_LEN: usize = 3;

/// XOR of two equal-length node ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct XorDistance {
    bits: PathBits,
}

impl XorDistance {
    /// The zero distance with no width.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Distance between `a` and `b`, or `None` when their lengths differ.
    pub fn between(a: &NodeId, b: &NodeId) -> Option<Self> {
        if a.len() != b.len() {
            return None;
        }
        let bits = a
            .bits()
            .iter()
            .by_vals()
            .zip(b.bits().iter().by_vals())
            .map(|(x, y)| x ^ y)
            .collect();
        Some(Self { bits })
    }

    /// Integer value, saturating at `u64::MAX`.
    pub fn value(&self) -> u64 {
        bits_to_u64(&self.bits)
    }

    /// Width in bits (the length of the compared ids).
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// True when both ids were identical.
    pub fn is_zero(&self) -> bool {
        self.bits.not_any()
    }

    /// Index of the k-bucket this distance falls into: the position of the
    /// highest set bit counted from the least significant end, plus one.
    /// Zero distance has no bucket.
    pub fn bucket(&self) -> Option<usize> {
        self.bits
            .first_one()
            .map(|leading_zeros| self.bits.len() - leading_zeros)
    }

    /// Hex rendering (`0x..`), zero padded to the id width. Zero is
    /// always [`ZERO_DISTANCE`] whatever the width.
    pub fn to_hex(&self) -> String {
        if self.is_zero() {
            return ZERO_DISTANCE.to_string();
        }
        format_hex(&self.bits)
    }
}

impl fmt::Display for XorDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(feature = "visualize")]
impl serde::Serialize for XorDistance {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// XOR distance between two textual ids, as a hex string.
///
/// Never fails: inputs shorter than three characters, of different lengths,
/// without the `0b` prefix, or with non-binary payloads yield
/// [`ZERO_DISTANCE`].
pub fn xor_distance(a: &str, b: &str) -> String {
    if a.len() < MIN_ID_TEXT_LEN || b.len() < MIN_ID_TEXT_LEN {
        trace!(a, b, "id too short, returning zero distance");
        return ZERO_DISTANCE.to_string();
    }
    if a.len() != b.len() {
        trace!(a, b, "id lengths differ, returning zero distance");
        return ZERO_DISTANCE.to_string();
    }
    if !a.starts_with(BINARY_PREFIX) || !b.starts_with(BINARY_PREFIX) {
        trace!(a, b, "missing binary prefix, returning zero distance");
        return ZERO_DISTANCE.to_string();
    }

    match (a.parse::<NodeId>(), b.parse::<NodeId>()) {
        (Ok(a), Ok(b)) => XorDistance::between(&a, &b)
            .map(|d| d.to_hex())
            .unwrap_or_else(|| ZERO_DISTANCE.to_string()),
        _ => {
            trace!(a, b, "non-binary payload, returning zero distance");
            ZERO_DISTANCE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        s.parse().unwrap()
    }

    #[test]
    fn test_depth_three_scenario() {
        assert_eq!(xor_distance("0b00", "0b01"), "0x01");
        assert_eq!(xor_distance("0b00", "0b10"), "0x02");
        assert_eq!(xor_distance("0b00", "0b11"), "0x03");
        assert_eq!(xor_distance("0b10", "0b11"), "0x01");
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(xor_distance("0b01", "0b1"), ZERO_DISTANCE);
        assert_eq!(xor_distance("0b", "0b"), ZERO_DISTANCE);
        assert_eq!(xor_distance("", "0b1"), ZERO_DISTANCE);
        assert_eq!(xor_distance("0x01", "0x10"), ZERO_DISTANCE);
        assert_eq!(xor_distance("0b0a", "0b01"), ZERO_DISTANCE);
    }

    #[test]
    fn test_wide_ids_pad_except_zero() {
        assert_eq!(xor_distance("0b000000000", "0b000000001"), "0x0001");
        assert_eq!(xor_distance("0b101100111", "0b101100111"), ZERO_DISTANCE);
        assert_eq!(xor_distance("0b111111111", "0b000000000"), "0x01ff");
    }

    #[test]
    fn test_value_and_bucket() {
        let d = XorDistance::between(&id("0b0110"), &id("0b0011")).unwrap();
        assert_eq!(d.value(), 5);
        assert_eq!(d.bit_len(), 4);
        assert_eq!(d.bucket(), Some(3));
        assert!(!d.is_zero());

        let same = XorDistance::between(&id("0b0110"), &id("0b0110")).unwrap();
        assert!(same.is_zero());
        assert_eq!(same.bucket(), None);
        assert_eq!(same.to_string(), "0x00");
    }

    #[test]
    fn test_between_rejects_mixed_lengths() {
        assert_eq!(XorDistance::between(&id("0b01"), &id("0b011")), None);
    }
}
