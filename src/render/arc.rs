//! Ring slices as Bézier paths
//!
//! Angles use the rendering convention (0 = up, clockwise). kurbo measures
//! from +x towards +y, which is the same rotation shifted by a quarter turn.

use std::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{Arc, BezPath, Point, Shape, Vec2};

use crate::geometry::polar;

/// Flattening tolerance for arc → cubic conversion, in pixels.
pub const ARC_TOLERANCE: f64 = 0.1;

fn arc(center: Point, radius: f64, start: f64, sweep: f64) -> Arc {
    Arc {
        center,
        radii: Vec2::new(radius, radius),
        start_angle: start - FRAC_PI_2,
        sweep_angle: sweep,
        x_rotation: 0.0,
    }
}

/// Closed path of the ring slice between radii `inner..outer` and rendering
/// angles `start..end`.
///
/// Sweeps wider than a full turn are capped at one turn. An inner radius of
/// zero (or less) yields a pie wedge, and a degenerate slice yields an empty
/// path.
pub fn annular_sector(center: Point, inner: f64, outer: f64, start: f64, end: f64) -> BezPath {
    let (inner, outer) = if inner <= outer { (inner, outer) } else { (outer, inner) };
    let sweep = (end - start).clamp(-TAU, TAU);

    let mut path = BezPath::new();
    if outer <= 0.0 || sweep == 0.0 {
        return path;
    }

    path.move_to(polar(center, outer, start));
    path.extend(arc(center, outer, start, sweep).append_iter(ARC_TOLERANCE));

    if inner > 0.0 {
        path.line_to(polar(center, inner, start + sweep));
        path.extend(arc(center, inner, start + sweep, -sweep).append_iter(ARC_TOLERANCE));
    } else {
        path.line_to(center);
    }
    path.close_path();
    path
}

/// Open arc at `radius` from `start` to `end`, used as a text path.
pub fn arc_path(center: Point, radius: f64, start: f64, end: f64) -> BezPath {
    let sweep = (end - start).clamp(-TAU, TAU);
    let mut path = BezPath::new();
    if radius <= 0.0 || sweep == 0.0 {
        return path;
    }
    path.move_to(polar(center, radius, start));
    path.extend(arc(center, radius, start, sweep).append_iter(ARC_TOLERANCE));
    path
}

/// Unsigned area enclosed by a sector path.
pub fn sector_area(path: &BezPath) -> f64 {
    path.area().abs()
}
