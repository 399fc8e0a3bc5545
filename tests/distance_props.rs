mod common;

use std::collections::HashSet;

use common::binary;
use proptest::prelude::*;
use test_case::test_case;
use xor_tree::{xor_distance, ZERO_DISTANCE};

fn hex_width(bits: usize) -> usize {
    let nibbles = (bits + 3) / 4;
    (nibbles + nibbles % 2).max(2)
}

fn ids(max_bits: usize) -> impl Strategy<Value = (usize, u64, u64)> {
    (1usize..=max_bits).prop_flat_map(|bits| {
        let limit = if bits >= 64 { u64::MAX } else { (1u64 << bits) - 1 };
        (Just(bits), 0..=limit, 0..=limit)
    })
}

proptest! {
    #[test]
    fn symmetric((bits, a, b) in ids(48)) {
        let (a, b) = (binary(a, bits), binary(b, bits));
        prop_assert_eq!(xor_distance(&a, &b), xor_distance(&b, &a));
    }

    #[test]
    fn identity_is_zero((bits, a, _b) in ids(48)) {
        let a = binary(a, bits);
        prop_assert_eq!(xor_distance(&a, &a), "0x00");
    }

    #[test]
    fn matches_integer_xor((bits, a, b) in ids(60)) {
        let hex = xor_distance(&binary(a, bits), &binary(b, bits));
        let digits = hex.strip_prefix("0x").expect("hex prefix");
        let width = if a == b { 2 } else { hex_width(bits) };
        prop_assert_eq!(digits.len(), width);
        prop_assert_eq!(u64::from_str_radix(digits, 16).unwrap(), a ^ b);
        prop_assert!(digits.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn injective_for_fixed_origin(bits in 1usize..=8, origin in any::<u64>()) {
        let origin = binary(origin & ((1u64 << bits) - 1), bits);
        let distances: HashSet<String> = (0..(1u64 << bits))
            .map(|b| xor_distance(&origin, &binary(b, bits)))
            .collect();
        prop_assert_eq!(distances.len(), 1usize << bits);
    }

    #[test]
    fn mismatched_lengths_are_sentinel(bits in 1usize..=30, extra in 1usize..=8, a in any::<u64>()) {
        let short = binary(a & ((1u64 << bits) - 1), bits);
        let long = format!("{short}{}", "0".repeat(extra));
        prop_assert_eq!(xor_distance(&short, &long), ZERO_DISTANCE);
    }
}

#[test_case("0b00", "0b01" => "0x01" ; "adjacent leaves")]
#[test_case("0b00", "0b10" => "0x02" ; "cousins")]
#[test_case("0b00", "0b11" => "0x03" ; "farthest depth three")]
#[test_case("0b0110", "0b1001" => "0x0f" ; "complement nibble")]
#[test_case("0b000000000", "0b000000001" => "0x0001" ; "nine bits pad to four digits")]
#[test_case("0b000000000000000", "0b000000000000000" => "0x00" ; "wide identity stays two digits")]
#[test_case("0b111111111", "0b000000000" => "0x01ff" ; "nine bit maximum")]
#[test_case("0b0", "0b1" => "0x01" ; "single bit")]
fn scenarios(a: &str, b: &str) -> String {
    xor_distance(a, b)
}

#[test_case("0b", "0b" ; "roots are too short")]
#[test_case("0b0", "0b01" ; "length mismatch")]
#[test_case("00", "0b0" ; "missing prefix")]
#[test_case("1b01", "0b01" ; "wrong prefix")]
#[test_case("0b2", "0b0" ; "non binary payload")]
#[test_case("", "0b1" ; "empty")]
fn sentinels(a: &str, b: &str) {
    assert_eq!(xor_distance(a, b), ZERO_DISTANCE);
    assert_eq!(xor_distance(b, a), ZERO_DISTANCE);
}
