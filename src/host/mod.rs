//! Bevy adapter for the steering core.
//!
//! Agents, waypoints and obstacles are ordinary entities positioned by their
//! `Transform`. Overlap detection stays with the host: it triggers
//! [`OverlapStarted`] and [`OverlapEnded`] and the observers installed by
//! [`SteeringPlugin`] keep each agent's threat set current. Each frame the
//! waypoints and obstacles are copied into a [`SteeringSnapshot`] before any
//! agent steps, so agents can be waypoints or obstacles for one another.

mod components;
mod events;
mod plugin;
mod snapshot;
mod systems;

pub use components::{NextWaypoint, Obstacle, Steering, Waypoint};
pub use events::{OverlapEnded, OverlapStarted, SteeringFailed};
pub use plugin::SteeringPlugin;
pub use snapshot::{
    cache_steering_snapshot_system, ObstacleQuery, SteeringSnapshot, WaypointQuery,
};
pub use systems::{steer_agents_system, AgentQuery};
