//! Planar angle and coordinate helpers.
//! Headings are degrees in `[0, 360)` measured from the plane's +X axis.
use glam::{Quat, Vec2, Vec3};

/// Degrees in a full revolution.
pub const FULL_TURN: f32 = 360.0;

/// Wraps `degrees` into `[0, 360)`.
///
/// Non-finite input has no meaningful heading and maps to `0.0`.
///
/// # Examples
/// ```
/// use steer::angle::clean_degrees;
/// assert_eq!(clean_degrees(-450.0), 270.0);
/// assert_eq!(clean_degrees(720.0), 0.0);
/// ```
#[must_use]
pub fn clean_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(FULL_TURN);
    // `rem_euclid` rounds tiny negative inputs up to exactly 360.0.
    if wrapped >= FULL_TURN {
        0.0
    } else {
        wrapped
    }
}

/// Returns the unit vector pointing along `heading`.
///
/// # Examples
/// ```
/// use steer::angle::direction;
/// let d = direction(90.0);
/// assert!(d.x.abs() < 1e-6);
/// assert!((d.y - 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn direction(heading: f32) -> Vec2 {
    Vec2::from_angle(heading.to_radians())
}

/// Returns the heading of `vector`, or `None` for a zero or non-finite vector.
#[must_use]
pub fn heading_of(vector: Vec2) -> Option<f32> {
    if !vector.is_finite() || vector == Vec2::ZERO {
        return None;
    }
    Some(clean_degrees(vector.y.atan2(vector.x).to_degrees()))
}

/// Projects a point onto the horizontal plane, discarding the vertical axis.
#[must_use]
pub const fn to_plane(point: Vec3) -> Vec2 {
    Vec2::new(point.x, point.z)
}

/// Lifts a planar point back into space at the given vertical coordinate.
#[must_use]
pub const fn from_plane(point: Vec2, vertical: f32) -> Vec3 {
    Vec3::new(point.x, vertical, point.y)
}

/// Converts a heading into a rotation about +Y.
///
/// The rotated local +Z axis points along [`direction`] of the heading once
/// projected with [`to_plane`].
#[must_use]
pub fn heading_to_rotation(heading: f32) -> Quat {
    Quat::from_rotation_y((90.0 - clean_degrees(heading)).to_radians())
}

/// Projects the local +Z axis of `rotation` onto the plane.
///
/// The result is not normalised; a rotation pointing straight up or down
/// yields a zero vector.
#[must_use]
pub fn facing(rotation: Quat) -> Vec2 {
    to_plane(rotation * Vec3::Z)
}

/// Reads a heading back from a host rotation.
///
/// Rotations without a horizontal facing component report `0.0`.
#[must_use]
pub fn rotation_to_heading(rotation: Quat) -> f32 {
    heading_of(facing(rotation)).unwrap_or(0.0)
}
