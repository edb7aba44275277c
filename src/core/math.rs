// Math utilities and helper functions

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Check if two f32 values are approximately equal
#[allow(dead_code)]
pub fn approx_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Normalize an angle into the canonical `(-PI, PI]` range.
///
/// Uses `atan2(sin, cos)` so that angles accumulated over many turns
/// (e.g. 7*PI) map back to their canonical equivalent instead of
/// growing without bound.
pub fn normalize_angle(angle: f32) -> f32 {
    let normalized = angle.sin().atan2(angle.cos());
    // Half-turn inputs (PI, 3*PI, ...) can land just below -PI when their
    // sine rounds to a tiny negative; the range is open at -PI, so fold
    // that sliver onto +PI.
    if normalized < -std::f32::consts::PI + ANGLE_FOLD_EPSILON {
        std::f32::consts::PI
    } else {
        normalized
    }
}

const ANGLE_FOLD_EPSILON: f32 = 1e-6;
