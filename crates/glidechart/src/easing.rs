//! Blend-factor easing and frame-rate compensated approach.

/// Quintic smootherstep: `f³(6f² − 15f + 10)`.
///
/// Maps `[0, 1]` onto `[0, 1]` with zero first and second derivative at both
/// ends, so blends decelerate into their endpoints.
#[inline]
pub fn smooth_factor(f: f64) -> f64 {
    f * f * f * (f * (f * 6.0 - 15.0) + 10.0)
}

/// Step `from` toward `target`, covering `speed * delta_ms / 1000` of the
/// remaining distance (capped at all of it).
///
/// Feeding the result back in on the next frame gives asymptotic convergence;
/// a single large delta lands exactly on `target` rather than overshooting.
#[inline]
pub fn move_toward(from: f64, target: f64, speed: f64, delta_ms: f64) -> f64 {
    let change = (target - from) * (speed * delta_ms * 0.001).min(1.0);
    from + change
}
