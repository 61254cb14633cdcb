//! Convenience constructors for routes used in tests.

use glam::Vec2;
use steer::{Route, WaypointGraph, WaypointId};

/// Build an open route through `points`, naming them `wp0`, `wp1`, ...
///
/// # Panics
/// Panics if `points` is empty.
///
/// # Examples
/// ```
/// use test_utils::routes::open_route;
/// let (route, head) = open_route(&[(0.0, 0.0), (5.0, 0.0)]);
/// assert_eq!(route.len(), 2);
/// # let _ = head;
/// ```
pub fn open_route(points: &[(f32, f32)]) -> (Route, WaypointId) {
    let mut route = Route::new();
    let head = route
        .chain(
            points
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| (format!("wp{i}"), Vec2::new(x, y))),
        )
        .expect("open_route needs at least one point");
    (route, head)
}

/// Build a route through `points` whose last waypoint links back to the first.
///
/// # Panics
/// Panics if `points` is empty.
pub fn patrol_loop(points: &[(f32, f32)]) -> (Route, WaypointId) {
    let (mut route, head) = open_route(points);
    route.close_loop(head).expect("close patrol loop");
    (route, head)
}

/// Name of the waypoint `id`, or `"<none>"`.
pub fn name_of(route: &Route, id: Option<WaypointId>) -> String {
    id.and_then(|id| route.get(id))
        .map_or_else(|| "<none>".to_owned(), |w| w.name.clone())
}

/// Waypoint reached by following `hops` successor links from `from`.
///
/// # Panics
/// Panics if a successor lookup fails.
pub fn nth_successor(route: &Route, from: WaypointId, hops: usize) -> Option<WaypointId> {
    let mut current = Some(from);
    for _ in 0..hops {
        current = current.and_then(|id| route.successor(id).expect("successor lookup"));
    }
    current
}
