//! Utility helpers for tests.
//! Route builders and wrap-aware assertions shared by the integration tests.

pub mod routes;

use steer::clean_degrees;

/// Smallest signed difference between two headings, in `(-180, 180]`.
pub fn heading_error(actual: f32, expected: f32) -> f32 {
    let delta = clean_degrees(actual - expected);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Assert that `actual` is within `tolerance` degrees of `expected`,
/// treating 359.9 and 0.1 as neighbours.
///
/// # Panics
/// Panics with both headings if they differ by more than `tolerance`.
pub fn assert_heading_near(actual: f32, expected: f32, tolerance: f32) {
    let error = heading_error(actual, expected);
    assert!(
        error.abs() <= tolerance,
        "heading {actual} differs from {expected} by {error} (tolerance {tolerance})"
    );
}

/// Assert that two planar points are within `tolerance` of each other.
///
/// # Panics
/// Panics with both points if they are further apart than `tolerance`.
pub fn assert_point_near(actual: glam::Vec2, expected: glam::Vec2, tolerance: f32) {
    let distance = actual.distance(expected);
    assert!(
        distance <= tolerance,
        "point {actual:?} is {distance} from {expected:?} (tolerance {tolerance})"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_error_wraps_through_zero() {
        assert!((heading_error(359.0, 1.0) + 2.0).abs() < 1e-4);
        assert!((heading_error(1.0, 359.0) - 2.0).abs() < 1e-4);
    }
}
