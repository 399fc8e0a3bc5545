//! Node identifiers as root-to-node bit paths

use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;
use thiserror::Error;

use super::{bits_to_u64, format_hex};

/// Prefix of the binary textual form (`0b0110`).
pub const BINARY_PREFIX: &str = "0b";

/// Prefix of the hexadecimal textual form (`0x06`).
pub const HEX_PREFIX: &str = "0x";

/// Bit storage used for paths and distances (MSB = first step from root).
pub type PathBits = BitVec<u8, Msb0>;

/// Errors raised when parsing a node id from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// Text does not begin with `0b`.
    #[error("node id {0:?} must start with \"0b\"")]
    MissingPrefix(String),

    /// A path character other than `0` or `1`.
    #[error("invalid bit '{ch}' at offset {offset}")]
    InvalidBit {
        /// Offending character.
        ch: char,
        /// Offset within the path (after the prefix).
        offset: usize,
    },
}

/// Identifier of a tree node.
///
/// The root is the empty path (`0b`). A child appends one bit to its
/// parent's path, so the path length equals the node's depth.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeId {
    bits: PathBits,
}

impl NodeId {
    /// The root id (`0b`).
    pub fn root() -> Self {
        Self::default()
    }

    /// Id of the all-zeros node at `depth` (the leftmost node of that level).
    pub fn zeros(depth: usize) -> Self {
        Self {
            bits: bitvec![u8, Msb0; 0; depth],
        }
    }

    /// Build an id from raw path bits.
    pub fn from_bits(bits: PathBits) -> Self {
        Self { bits }
    }

    /// Build an id from the low `depth` bits of `value`.
    pub fn from_value(value: u64, depth: usize) -> Self {
        let bits = (0..depth)
            .rev()
            .map(|shift| shift < 64 && (value >> shift) & 1 == 1)
            .collect();
        Self { bits }
    }

    /// Path bits, first step first.
    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    /// Path length (depth below the root).
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True for the root id.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.bits.is_empty()
    }

    /// Last step taken (`true` = right child), or `None` for the root.
    #[inline]
    pub fn last_bit(&self) -> Option<bool> {
        self.bits.last().map(|bit| *bit)
    }

    /// Whether the path ends with `bit`. The root ends with neither.
    pub fn ends_with(&self, bit: bool) -> bool {
        self.last_bit() == Some(bit)
    }

    /// Id of the child reached by stepping `right` (or left).
    pub fn child(&self, right: bool) -> Self {
        let mut bits = self.bits.clone();
        bits.push(right);
        Self { bits }
    }

    /// Id of the parent, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let mut bits = self.bits.clone();
        bits.pop();
        Some(Self { bits })
    }

    /// Whether this id is an ancestor of (or equal to) `other`.
    pub fn is_prefix_of(&self, other: &NodeId) -> bool {
        other.bits.starts_with(self.bits.as_bitslice())
    }

    /// Integer value of the path, saturating at `u64::MAX`.
    pub fn value(&self) -> u64 {
        bits_to_u64(&self.bits)
    }

    /// Hexadecimal rendering of the path (`0b0110` → `0x06`).
    pub fn to_hex(&self) -> String {
        format_hex(&self.bits)
    }
}

impl FromStr for NodeId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let payload = s
            .strip_prefix(BINARY_PREFIX)
            .ok_or_else(|| IdError::MissingPrefix(s.to_string()))?;

        let mut bits = PathBits::with_capacity(payload.len());
        for (offset, ch) in payload.chars().enumerate() {
            match ch {
                '0' => bits.push(false),
                '1' => bits.push(true),
                _ => return Err(IdError::InvalidBit { ch, offset }),
            }
        }
        Ok(Self { bits })
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(BINARY_PREFIX)?;
        for bit in self.bits.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(feature = "visualize")]
impl serde::Serialize for NodeId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: NodeId = "0b0110".parse().unwrap();
        assert_eq!(id.len(), 4);
        assert_eq!(id.to_string(), "0b0110");
        assert_eq!(id.value(), 6);
        assert_eq!(id.to_hex(), "0x06");
    }

    #[test]
    fn test_root_round_trip() {
        let root: NodeId = "0b".parse().unwrap();
        assert!(root.is_root());
        assert_eq!(root, NodeId::root());
        assert_eq!(root.to_string(), "0b");
        assert_eq!(root.last_bit(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "0110".parse::<NodeId>(),
            Err(IdError::MissingPrefix("0110".to_string()))
        );
        assert_eq!(
            "0b0120".parse::<NodeId>(),
            Err(IdError::InvalidBit { ch: '2', offset: 2 })
        );
    }

    #[test]
    fn test_child_and_parent() {
        let id: NodeId = "0b01".parse().unwrap();
        let right = id.child(true);
        assert_eq!(right.to_string(), "0b011");
        assert!(right.ends_with(true));
        assert_eq!(right.parent(), Some(id.clone()));
        assert!(id.is_prefix_of(&right));
        assert!(!right.is_prefix_of(&id));
        assert_eq!(NodeId::root().parent(), None);
    }

    #[test]
    fn test_from_value_matches_parse() {
        assert_eq!(NodeId::from_value(5, 4), "0b0101".parse::<NodeId>().unwrap());
        assert_eq!(NodeId::zeros(3), "0b000".parse::<NodeId>().unwrap());
        assert_eq!(NodeId::from_value(0, 0), NodeId::root());
    }
}
