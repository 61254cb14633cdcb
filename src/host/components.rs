//! ECS components marking agents, waypoints and obstacles.

use bevy::prelude::*;

use crate::agent::Agent;
use crate::config::SteeringConfig;

/// Steering state attached to an agent entity.
///
/// Position and heading inside the wrapped [`Agent`] mirror the entity's
/// `Transform` and are refreshed from it at the start of every step.
#[derive(Component, Debug, Clone)]
pub struct Steering {
    agent: Agent<Entity, Entity>,
}

impl Steering {
    /// Creates steering state heading for `waypoint`, if given.
    #[must_use]
    pub fn new(config: SteeringConfig, waypoint: Option<Entity>) -> Self {
        Self {
            agent: Agent::new(config, Vec2::ZERO, 0.0, waypoint),
        }
    }

    /// The wrapped steering core.
    #[must_use]
    pub const fn agent(&self) -> &Agent<Entity, Entity> {
        &self.agent
    }

    /// Mutable access to the wrapped steering core.
    pub const fn agent_mut(&mut self) -> &mut Agent<Entity, Entity> {
        &mut self.agent
    }
}

/// Marks an entity as a route point; its `Transform` supplies the position.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Waypoint;

/// Successor link of a [`Waypoint`]. `None` ends the route.
///
/// A waypoint without this component cannot report a successor and stepping
/// an agent that reaches it fails.
#[derive(Component, Debug, Clone, Copy, Default, Deref, DerefMut)]
pub struct NextWaypoint(pub Option<Entity>);

/// Tags an entity as an obstacle; only these join an agent's threat set.
///
/// The obstacle's facing is its rotated local +Z axis.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Obstacle;
