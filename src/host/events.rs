//! Events exchanged between the host's overlap detection and steering.

use bevy::prelude::*;
use thiserror::Error;

use crate::error::SteerError;

/// An entity began overlapping `agent`'s detection volume.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapStarted {
    /// Agent whose detection volume was entered.
    pub agent: Entity,
    /// Entity that entered it.
    pub other: Entity,
}

/// An entity stopped overlapping `agent`'s detection volume.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapEnded {
    /// Agent whose detection volume was left.
    pub agent: Entity,
    /// Entity that left it.
    pub other: Entity,
}

/// Raised when stepping an agent fails. The agent has been halted.
#[derive(Event, Debug, Clone, Error)]
#[error("steering failed for {agent}: {detail}")]
pub struct SteeringFailed {
    /// Agent that was halted.
    pub agent: Entity,
    /// Rendered [`SteerError`].
    pub detail: String,
}

impl SteeringFailed {
    /// Captures `error` for `agent`.
    #[must_use]
    pub fn new(agent: Entity, error: &SteerError) -> Self {
        Self {
            agent,
            detail: error.to_string(),
        }
    }
}
