//! Errors surfaced by the steering core to its host.

use thiserror::Error;

/// Failures raised while stepping an agent along its route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SteerError {
    /// The current waypoint cannot report its successor.
    #[error("waypoint {waypoint} has no successor link")]
    MissingSuccessorCapability {
        /// Debug rendering of the waypoint handle.
        waypoint: String,
    },
    /// A waypoint handle does not resolve to a known waypoint.
    #[error("unknown waypoint {waypoint}")]
    UnknownWaypoint {
        /// Debug rendering of the waypoint handle.
        waypoint: String,
    },
}

impl SteerError {
    /// Builds [`SteerError::MissingSuccessorCapability`] for `waypoint`.
    #[must_use]
    pub fn missing_successor(waypoint: &dyn std::fmt::Debug) -> Self {
        Self::MissingSuccessorCapability {
            waypoint: format!("{waypoint:?}"),
        }
    }

    /// Builds [`SteerError::UnknownWaypoint`] for `waypoint`.
    #[must_use]
    pub fn unknown_waypoint(waypoint: &dyn std::fmt::Debug) -> Self {
        Self::UnknownWaypoint {
            waypoint: format!("{waypoint:?}"),
        }
    }
}
