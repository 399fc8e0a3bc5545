//! Placement of distance labels inside heat-map slices

use crate::geometry::AngleSpan;

/// Inputs for [`label_start_angle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelContext {
    /// Slice the label is drawn in.
    pub span: AngleSpan,
    /// Decimal digits of the distance being printed.
    pub digits: usize,
    /// Tree depth (levels, root included).
    pub depth: usize,
    /// Hovered or selected labels are drawn larger and start earlier.
    pub emphasized: bool,
    /// Whether the leaf is a right child.
    pub right_child: bool,
}

/// Per-digit backoff (in quarter slices) for emphasized labels at depths
/// 7..=13, where slices are too narrow for the enlarged text.
const EMPHASIS_BACKOFF: [f64; 7] = [4.0, 8.0, 16.0, 32.0, 64.0, 112.0, 196.0];

/// Angle at which a distance label starts along its slice.
///
/// Short labels are nudged towards the middle of wide slices. Emphasized
/// labels back off proportionally to their length so the larger glyphs stay
/// centered over the leaf. The two leaves of a depth-2 tree use fixed
/// offsets.
pub fn label_start_angle(ctx: &LabelContext) -> f64 {
    let start = ctx.span.start;
    let width = ctx.span.width();
    let fifth = width / 5.0;
    let quarter = width / 4.0;
    let third = width / 3.0;
    let digits = ctx.digits as f64;

    if ctx.depth == 2 {
        return if ctx.right_child {
            start + fifth * 2.0
        } else {
            start + quarter * 2.0
        };
    }

    let resting = if ctx.depth > 7 {
        start
    } else if ctx.digits < 2 {
        start + fifth * 2.0
    } else if ctx.digits < 3 {
        start + third
    } else {
        start
    };

    if !ctx.emphasized {
        return resting;
    }
    match ctx.depth {
        5 => start + quarter * 2.0 - third * digits,
        6 => start + third - quarter * 2.0 * digits,
        7..=13 => start - quarter * EMPHASIS_BACKOFF[ctx.depth - 7] * digits,
        _ => resting,
    }
}

/// Number of decimal digits used to print `value`.
pub fn decimal_digits(value: u64) -> usize {
    value.checked_ilog10().map_or(1, |log| log as usize + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(depth: usize, digits: usize, emphasized: bool) -> LabelContext {
        LabelContext {
            span: AngleSpan::new(0.0, 1.0),
            digits,
            depth,
            emphasized,
            right_child: false,
        }
    }

    #[test]
    fn test_resting_offsets() {
        assert!((label_start_angle(&ctx(4, 1, false)) - 0.4).abs() < 1e-12);
        assert!((label_start_angle(&ctx(4, 2, false)) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(label_start_angle(&ctx(4, 3, false)), 0.0);
        assert_eq!(label_start_angle(&ctx(9, 1, false)), 0.0);
    }

    #[test]
    fn test_emphasized_backoff() {
        assert!((label_start_angle(&ctx(7, 2, true)) - (-2.0)).abs() < 1e-12);
        assert!((label_start_angle(&ctx(13, 1, true)) - (-49.0)).abs() < 1e-12);
        assert!((label_start_angle(&ctx(15, 1, true))).abs() < 1e-12);
    }

    #[test]
    fn test_depth_two_sides() {
        let mut left = ctx(2, 1, false);
        assert!((label_start_angle(&left) - 0.5).abs() < 1e-12);
        left.right_child = true;
        assert!((label_start_angle(&left) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_decimal_digits() {
        assert_eq!(decimal_digits(0), 1);
        assert_eq!(decimal_digits(9), 1);
        assert_eq!(decimal_digits(10), 2);
        assert_eq!(decimal_digits(32767), 5);
    }
}
