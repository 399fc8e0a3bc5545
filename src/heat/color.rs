//! Sequential colour scale for distances
//!
//! Light (near) → dark red (far), interpolated through the nine ColorBrewer
//! "Reds" stops.

use std::fmt;

/// 24-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Colour from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise linear blend, `t = 0` → `self`, `t = 1` → `other`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| {
            let v = a as f64 + (b as f64 - a as f64) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// ColorBrewer "Reds", lightest first.
const REDS: [Rgb; 9] = [
    Rgb::new(0xff, 0xf5, 0xf0),
    Rgb::new(0xfe, 0xe0, 0xd2),
    Rgb::new(0xfc, 0xbb, 0xa1),
    Rgb::new(0xfc, 0x92, 0x72),
    Rgb::new(0xfb, 0x6a, 0x4a),
    Rgb::new(0xef, 0x3b, 0x2c),
    Rgb::new(0xcb, 0x18, 0x1d),
    Rgb::new(0xa5, 0x0f, 0x15),
    Rgb::new(0x67, 0x00, 0x0d),
];

/// Sample the red ramp at `t ∈ [0, 1]` (clamped).
pub fn interpolate_reds(t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (REDS.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(REDS.len() - 2);
    REDS[lower].lerp(REDS[lower + 1], scaled - lower as f64)
}

/// Maps distances in `[min, max]` onto the red ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct ColorScale {
    min: u64,
    max: u64,
}

impl ColorScale {
    /// Scale over `[min, max]`.
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Scale over every distance between leaves of a `depth`-level tree:
    /// `[0, 2^(depth − 1) − 1]`.
    pub fn for_depth(depth: usize) -> Self {
        Self::new(0, max_distance(depth))
    }

    /// Lower bound of the domain.
    pub fn min(&self) -> u64 {
        self.min
    }

    /// Upper bound of the domain.
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Normalized position of `value`; a zero-width domain maps to 0.5.
    pub fn normalize(&self, value: u64) -> f64 {
        if self.max == self.min {
            return 0.5;
        }
        (value as f64 - self.min as f64) / (self.max as f64 - self.min as f64)
    }

    /// Colour for `value` (clamped to the domain).
    pub fn color(&self, value: u64) -> Rgb {
        interpolate_reds(self.normalize(value))
    }
}

/// Largest XOR distance between leaves of a `depth`-level tree.
pub fn max_distance(depth: usize) -> u64 {
    let bits = depth.max(1) - 1;
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}
