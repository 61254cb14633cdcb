//! Bevy plugin wiring steering into the schedule.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::error;

use super::events::SteeringFailed;
use super::snapshot::{cache_steering_snapshot_system, SteeringSnapshot};
use super::systems::{clear_threat, register_threat, steer_agents_system};

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_steering_failure(event: On<SteeringFailed>) {
    let SteeringFailed { agent, detail } = event.event();
    error!("steering halted for {agent}: {detail}");
}

/// Installs overlap observers and the per-frame snapshot and steering
/// systems.
#[derive(Default)]
pub struct SteeringPlugin;

impl Plugin for SteeringPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_steering_failure);
        app.add_observer(register_threat);
        app.add_observer(clear_threat);
        app.init_resource::<SteeringSnapshot>();
        app.add_systems(
            Update,
            (cache_steering_snapshot_system, steer_agents_system).chain(),
        );
    }
}
