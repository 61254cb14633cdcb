//! Bounded-rate heading integration.

use crate::angle::{clean_degrees, FULL_TURN};

/// Signed turn from `from` to `to` along the shorter arc, in `(-180, 180]`.
///
/// # Examples
/// ```
/// use steer::turn::shortest_turn;
/// assert_eq!(shortest_turn(350.0, 10.0), 20.0);
/// assert_eq!(shortest_turn(10.0, 350.0), -20.0);
/// ```
#[must_use]
pub fn shortest_turn(from: f32, to: f32) -> f32 {
    let delta = clean_degrees(to - from);
    if delta > FULL_TURN / 2.0 {
        delta - FULL_TURN
    } else {
        delta
    }
}

/// Turns `heading` towards `target` by at most `max_turn` degrees.
///
/// Snaps to `target` once it is within reach.
#[must_use]
pub fn turn_towards(heading: f32, target: f32, max_turn: f32) -> f32 {
    let delta = shortest_turn(heading, target);
    if delta.abs() <= max_turn {
        clean_degrees(target)
    } else {
        clean_degrees(heading + delta.signum() * max_turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[rstest]
    #[case::half_turn(0.0, 180.0, 180.0)]
    #[case::just_past_half(0.0, 181.0, -179.0)]
    #[case::wrap_up(350.0, 10.0, 20.0)]
    #[case::wrap_down(10.0, 350.0, -20.0)]
    #[case::none(42.0, 42.0, 0.0)]
    fn shortest_turn_picks_short_arc(#[case] from: f32, #[case] to: f32, #[case] expected: f32) {
        assert_abs_diff_eq!(shortest_turn(from, to), expected, epsilon = 1e-4);
    }

    #[rstest]
    #[case::bounded_left(0.0, 170.0, 10.0, 10.0)]
    #[case::bounded_right(0.0, 190.0, 10.0, 350.0)]
    #[case::snaps_across_zero(350.0, 10.0, 20.0, 10.0)]
    #[case::snaps_when_close(80.0, 85.0, 10.0, 85.0)]
    #[case::bounded_across_zero(5.0, 300.0, 10.0, 355.0)]
    fn turn_towards_respects_budget(
        #[case] heading: f32,
        #[case] target: f32,
        #[case] max_turn: f32,
        #[case] expected: f32,
    ) {
        assert_abs_diff_eq!(turn_towards(heading, target, max_turn), expected, epsilon = 1e-4);
    }

    #[rstest]
    fn zero_budget_holds_heading() {
        assert_abs_diff_eq!(turn_towards(90.0, 270.0, 0.0), 90.0);
    }
}
