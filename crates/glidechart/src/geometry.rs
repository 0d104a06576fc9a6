//! Angle helpers and pointer hit tests.
//!
//! Angles are in radians, measured from the positive x axis and growing
//! clockwise on screen (y points down), matching how wedges are swept.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;

/// Reduce an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Angle of a vector, in `(-π, π]`.
pub fn vec_to_angle(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Unit vector pointing at `angle`.
pub fn angle_to_vec(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Vector of length `radius` pointing at `angle`.
pub fn angle_radius_to_vec(angle: f32, radius: f32) -> Vec2 {
    angle_to_vec(angle) * radius
}

/// Fraction of a full turn expressed in percent, as an angle.
pub fn percent_to_angle(percent: f32) -> f32 {
    percent * TAU / 100.0
}

/// Start and end angle of a pie segment spanning `[start_percent,
/// start_percent + percent)`, with 0% at twelve o'clock plus `rotation`.
pub fn segment_angles(start_percent: f32, percent: f32, rotation: f32) -> (f32, f32) {
    let start = percent_to_angle(start_percent) - FRAC_PI_2 + rotation;
    let end = percent_to_angle(start_percent + percent) - FRAC_PI_2 + rotation;
    (start, end)
}

/// Whether `pointer` lies inside the wedge of `radius` around `center`
/// starting at `start` and sweeping clockwise by `sweep`.
///
/// Works for any `start` (it is normalized first) and handles wedges that
/// wrap past 2π.
pub fn wedge_contains(pointer: Vec2, center: Vec2, radius: f32, start: f32, sweep: f32) -> bool {
    let offset = pointer - center;
    if offset.length_squared() > radius * radius {
        return false;
    }

    let relative = normalize_angle(vec_to_angle(offset) - normalize_angle(start));
    relative >= 0.0 && relative < sweep
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_range() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert!((normalize_angle(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-5);
        assert!((normalize_angle(5.0 * PI) - PI).abs() < 1e-5);
        assert!(normalize_angle(-1e-9) < TAU);
    }

    #[test]
    fn test_vec_angle_roundtrip() {
        let angle = 1.2;
        assert!((vec_to_angle(angle_to_vec(angle)) - angle).abs() < 1e-5);
    }

    #[test]
    fn test_percent_to_angle() {
        assert!((percent_to_angle(50.0) - PI).abs() < 1e-6);
        assert!((percent_to_angle(100.0) - TAU).abs() < 1e-6);
    }

    #[test]
    fn test_segment_starts_at_twelve_oclock() {
        let (start, end) = segment_angles(0.0, 25.0, 0.0);
        assert!((start + FRAC_PI_2).abs() < 1e-6);
        assert!(end.abs() < 1e-6);
    }

    #[test]
    fn test_wedge_contains_basic() {
        let center = Vec2::new(100.0, 100.0);
        // Quarter wedge from 3 o'clock to 6 o'clock (y down).
        assert!(wedge_contains(Vec2::new(120.0, 120.0), center, 50.0, 0.0, FRAC_PI_2));
        assert!(!wedge_contains(Vec2::new(80.0, 120.0), center, 50.0, 0.0, FRAC_PI_2));
        assert!(!wedge_contains(Vec2::new(80.0, 80.0), center, 50.0, 0.0, FRAC_PI_2));
    }

    #[test]
    fn test_wedge_rejects_outside_radius() {
        let center = Vec2::ZERO;
        assert!(!wedge_contains(Vec2::new(40.0, 40.0), center, 50.0, 0.0, FRAC_PI_2));
    }

    #[test]
    fn test_wedge_wraps_past_full_turn() {
        let center = Vec2::ZERO;
        // From 12 o'clock (-π/2) sweeping half a turn through 3 o'clock.
        let start = -FRAC_PI_2;
        assert!(wedge_contains(Vec2::new(10.0, -1.0), center, 50.0, start, PI));
        assert!(wedge_contains(Vec2::new(1.0, -10.0), center, 50.0, start, PI));
        assert!(!wedge_contains(Vec2::new(-10.0, 0.5), center, 50.0, start, PI));
    }
}
