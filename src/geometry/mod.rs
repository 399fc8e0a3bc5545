//! Angular conventions for radial diagrams
//!
//! Rendering angles are measured from "up", clockwise, in radians:
//! `θ = π/2 + atan2(dy, dx)` in screen coordinates (y grows down).
//! This matches the layout bearing, which is the same angle in degrees.

mod span;

pub use span::{covered_range, leaf_angles, leaf_spans, LeafAngleInfo};

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use kurbo::{Point, Vec2};

/// Below this radius a point is treated as sitting on the center.
pub const DEGENERATE_RADIUS: f64 = 1e-9;

/// Half-open angular interval `[start, end)` in rendering radians.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct AngleSpan {
    /// Start (counter-clockwise edge).
    pub start: f64,
    /// End (clockwise edge).
    pub end: f64,
}

impl AngleSpan {
    /// Span from `start` to `end`.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// The whole circle, centered on "up".
    pub fn full() -> Self {
        Self::new(-PI, PI)
    }

    /// Angular width.
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Bisector.
    pub fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Whether `angle` lies in `[start, end)` modulo a full turn.
    pub fn contains(&self, angle: f64) -> bool {
        let offset = (angle - self.start).rem_euclid(TAU);
        offset < self.width() || self.width() >= TAU
    }
}

/// Rendering angle of `point` seen from `center`, `None` when the point
/// sits on the center.
pub fn bearing(point: Point, center: Point) -> Option<f64> {
    let v: Vec2 = point - center;
    (v.hypot() > DEGENERATE_RADIUS).then(|| FRAC_PI_2 + v.atan2())
}

/// Wrap an angle into `(-π, π]`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Unwrap `angle` to the representative nearest `reference`.
pub fn unwrap_near(angle: f64, reference: f64) -> f64 {
    reference + wrap_angle(angle - reference)
}

/// Point at `radius` from `center` along rendering angle `angle`.
pub fn polar(center: Point, radius: f64, angle: f64) -> Point {
    center + Vec2::new(angle.sin(), -angle.cos()) * radius
}
