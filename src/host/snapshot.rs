//! Frame-start copy of the waypoints and obstacles agents steer against.
//!
//! Agents are stepped while their transforms are borrowed mutably, and an
//! agent may itself be a waypoint or an obstacle for another agent. The
//! snapshot is filled before stepping so every lookup sees the same frame.

use bevy::prelude::*;
use hashbrown::HashMap;

use crate::angle::{facing, to_plane};
use crate::error::SteerError;
use crate::route::WaypointGraph;

use super::components::{NextWaypoint, Obstacle, Waypoint};

/// Waypoint entities, including ones that are also agents.
pub type WaypointQuery<'w, 's> = Query<
    'w,
    's,
    (Entity, &'static Transform, Option<&'static NextWaypoint>),
    With<Waypoint>,
>;

/// Obstacle entities, including ones that are also agents.
pub type ObstacleQuery<'w, 's> = Query<'w, 's, (Entity, &'static Transform), With<Obstacle>>;

#[derive(Clone, Copy, Debug)]
struct WaypointEntry {
    position: Vec2,
    next: Option<NextWaypoint>,
}

/// Planar view of the world as it stood at the start of the frame.
///
/// Entities missing from the snapshot have been despawned or have lost their
/// [`Waypoint`] or [`Obstacle`] marker.
#[derive(Resource, Debug, Default)]
pub struct SteeringSnapshot {
    waypoints: HashMap<Entity, WaypointEntry>,
    facings: HashMap<Entity, Vec2>,
}

impl SteeringSnapshot {
    /// Planar facing of a live obstacle.
    #[must_use]
    pub fn facing(&self, obstacle: Entity) -> Option<Vec2> {
        self.facings.get(&obstacle).copied()
    }

    /// Number of obstacles captured this frame.
    #[must_use]
    pub fn obstacle_count(&self) -> usize {
        self.facings.len()
    }

    /// Number of waypoints captured this frame.
    #[must_use]
    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    fn clear(&mut self) {
        self.waypoints.clear();
        self.facings.clear();
    }
}

impl WaypointGraph for SteeringSnapshot {
    type Id = Entity;

    fn position(&self, id: Entity) -> Option<Vec2> {
        self.waypoints.get(&id).map(|entry| entry.position)
    }

    fn successor(&self, id: Entity) -> Result<Option<Entity>, SteerError> {
        match self.waypoints.get(&id) {
            Some(WaypointEntry {
                next: Some(link), ..
            }) => Ok(link.0),
            Some(_) => Err(SteerError::missing_successor(&id)),
            None => Err(SteerError::unknown_waypoint(&id)),
        }
    }
}

/// Refreshes the [`SteeringSnapshot`] from the current transforms.
///
/// Runs ahead of [`steer_agents_system`](super::steer_agents_system) each
/// frame.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems receive queries by value."
)]
pub fn cache_steering_snapshot_system(
    mut snapshot: ResMut<SteeringSnapshot>,
    waypoints: WaypointQuery<'_, '_>,
    obstacles: ObstacleQuery<'_, '_>,
) {
    snapshot.clear();
    for (entity, transform, next) in &waypoints {
        snapshot.waypoints.insert(
            entity,
            WaypointEntry {
                position: to_plane(transform.translation),
                next: next.copied(),
            },
        );
    }
    for (entity, transform) in &obstacles {
        snapshot.facings.insert(entity, facing(transform.rotation));
    }
}
