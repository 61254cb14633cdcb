//! Heading planner.
//!
//! Blends the straight line to the current waypoint with one avoidance vector
//! per threat and turns the blend into a heading.

use glam::Vec2;

use crate::angle::heading_of;

/// Vector perpendicular to `facing`, used to sidestep a threat moving along it.
///
/// The rotation sense is fixed: two threats approaching from mirrored angles
/// do not produce mirrored avoidance.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use steer::planner::avoidance_vector;
/// assert_eq!(avoidance_vector(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0));
/// ```
#[must_use]
pub const fn avoidance_vector(facing: Vec2) -> Vec2 {
    Vec2::new(-facing.y, facing.x)
}

/// Direction the agent would like to travel in.
///
/// Averages the unit vector towards `target` with the avoidance vector of each
/// entry in `threat_facings`. The result is generally not unit length and is
/// only meaningful as an angle. Returns `None` when the agent sits on the
/// target or the blend cancels out.
#[must_use]
pub fn desired_direction(position: Vec2, target: Vec2, threat_facings: &[Vec2]) -> Option<Vec2> {
    let to_target = (target - position).try_normalize()?;
    if threat_facings.is_empty() {
        return Some(to_target);
    }

    let blended = threat_facings
        .iter()
        .copied()
        .map(avoidance_vector)
        .fold(to_target, |sum, avoid| sum + avoid);
    #[expect(
        clippy::cast_precision_loss,
        reason = "Threat counts stay far below f32's exact integer range."
    )]
    let samples = (threat_facings.len() + 1) as f32;
    let averaged = blended / samples;

    (averaged.is_finite() && averaged.length_squared() > f32::EPSILON * f32::EPSILON)
        .then_some(averaged)
}

/// Heading in `[0, 360)` towards [`desired_direction`], if one exists.
#[must_use]
pub fn target_heading(position: Vec2, target: Vec2, threat_facings: &[Vec2]) -> Option<f32> {
    desired_direction(position, target, threat_facings).and_then(heading_of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[rstest]
    #[case::east(Vec2::new(10.0, 0.0), 0.0)]
    #[case::north(Vec2::new(0.0, 3.0), 90.0)]
    #[case::west(Vec2::new(-4.0, 0.0), 180.0)]
    #[case::south_east(Vec2::new(1.0, -1.0), 315.0)]
    fn unthreatened_heading_points_at_target(#[case] target: Vec2, #[case] expected: f32) {
        let heading = target_heading(Vec2::ZERO, target, &[]).unwrap_or(f32::NAN);
        assert_abs_diff_eq!(heading, expected, epsilon = 1e-4);
    }

    #[rstest]
    fn heading_ignores_offset_origin() {
        let heading = target_heading(Vec2::new(5.0, 5.0), Vec2::new(5.0, 10.0), &[])
            .unwrap_or(f32::NAN);
        assert_abs_diff_eq!(heading, 90.0, epsilon = 1e-4);
    }

    #[rstest]
    fn agent_on_target_has_no_direction() {
        let here = Vec2::new(2.0, 2.0);
        assert_eq!(desired_direction(here, here, &[]), None);
        assert_eq!(target_heading(here, here, &[Vec2::X]), None);
    }

    #[rstest]
    fn single_threat_averages_with_target() {
        // Target east, threat heading east: avoidance points north.
        let direction = desired_direction(Vec2::ZERO, Vec2::new(10.0, 0.0), &[Vec2::X])
            .unwrap_or(Vec2::NAN);
        assert_abs_diff_eq!(direction.x, 0.5);
        assert_abs_diff_eq!(direction.y, 0.5);
        let heading = target_heading(Vec2::ZERO, Vec2::new(10.0, 0.0), &[Vec2::X])
            .unwrap_or(f32::NAN);
        assert_abs_diff_eq!(heading, 45.0, epsilon = 1e-4);
    }

    #[rstest]
    fn threats_divide_by_count_plus_one() {
        let facings = [Vec2::X, Vec2::X, Vec2::X];
        let direction = desired_direction(Vec2::ZERO, Vec2::new(1.0, 0.0), &facings)
            .unwrap_or(Vec2::NAN);
        assert_abs_diff_eq!(direction.x, 0.25);
        assert_abs_diff_eq!(direction.y, 0.75);
    }

    #[rstest]
    fn mirrored_threats_do_not_mirror_avoidance() {
        let up = avoidance_vector(Vec2::new(0.0, 1.0));
        let down = avoidance_vector(Vec2::new(0.0, -1.0));
        assert_eq!(up, Vec2::new(-1.0, 0.0));
        assert_eq!(down, Vec2::new(1.0, 0.0));
    }

    #[rstest]
    fn cancelling_blend_has_no_direction() {
        // Target north; a threat facing west avoids towards the south.
        let blend = desired_direction(Vec2::ZERO, Vec2::new(0.0, 1.0), &[Vec2::new(-1.0, 0.0)]);
        assert_eq!(blend, None);
    }
}
