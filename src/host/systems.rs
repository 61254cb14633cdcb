//! Per-frame steering system and the overlap observers feeding it.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::debug;

use crate::agent::StepOutcome;
use crate::angle::{from_plane, heading_to_rotation, rotation_to_heading, to_plane};

use super::components::{Obstacle, Steering};
use super::events::{OverlapEnded, OverlapStarted, SteeringFailed};
use super::snapshot::SteeringSnapshot;

/// Agents stepped each frame.
pub type AgentQuery<'w, 's> = Query<'w, 's, (Entity, &'static mut Transform, &'static mut Steering)>;

/// Steps every agent by the frame's delta time.
///
/// Reads each agent's `Transform` into its [`Steering`] state, steps it
/// against the frame's [`SteeringSnapshot`] and writes the new position and
/// rotation back. The vertical coordinate of the transform is left as the
/// host set it, and idle agents are not written to. An agent whose step
/// fails is halted and reported through [`SteeringFailed`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems receive resources by value."
)]
pub fn steer_agents_system(
    time: Res<Time>,
    snapshot: Res<SteeringSnapshot>,
    mut agents: AgentQuery<'_, '_>,
    mut commands: Commands,
) {
    let dt = time.delta_secs();
    for (entity, mut transform, mut steering) in &mut agents {
        let agent = steering.agent_mut();
        agent.sync_from_host(
            to_plane(transform.translation),
            rotation_to_heading(transform.rotation),
        );

        match agent.step(dt, &*snapshot, |threat| snapshot.facing(threat)) {
            Ok(StepOutcome::Idle) => continue,
            Ok(StepOutcome::Moved { .. }) => {}
            Err(error) => {
                agent.halt();
                commands.trigger(SteeringFailed::new(entity, &error));
                continue;
            }
        }

        transform.translation = from_plane(agent.position(), transform.translation.y);
        transform.rotation = heading_to_rotation(agent.heading());
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
pub(crate) fn register_threat(
    event: On<OverlapStarted>,
    tagged: Query<(), With<Obstacle>>,
    mut agents: Query<&mut Steering>,
) {
    let OverlapStarted { agent, other } = *event.event();
    debug!("{agent} overlapped {other}");
    if !tagged.contains(other) {
        return;
    }
    if let Ok(mut steering) = agents.get_mut(agent) {
        steering.agent_mut().add_threat(other);
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
pub(crate) fn clear_threat(event: On<OverlapEnded>, mut agents: Query<&mut Steering>) {
    let OverlapEnded { agent, other } = *event.event();
    if let Ok(mut steering) = agents.get_mut(agent) {
        steering.agent_mut().overlap_exited(other);
    }
}
