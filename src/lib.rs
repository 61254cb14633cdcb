#![cfg_attr(docsrs, feature(doc_cfg))]
//! Waypoint-following steering with basic obstacle avoidance.
//!
//! The core ([`Agent`], [`planner`], [`turn`]) is renderer-agnostic and is
//! driven one `step(dt)` at a time by a host. [`host`] adapts it to Bevy and
//! [`scenario`] runs it headless from a JSON description.
pub mod agent;
pub mod angle;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod planner;
pub mod route;
pub mod scenario;
pub mod threat;
pub mod turn;

// Re-export commonly used items
pub use agent::{Agent, MotionState, StepOutcome};
pub use angle::{clean_degrees, direction, heading_of};
pub use config::{ConfigError, SteeringConfig};
pub use error::SteerError;
pub use host::{
    NextWaypoint, Obstacle, OverlapEnded, OverlapStarted, Steering, SteeringFailed,
    SteeringPlugin, SteeringSnapshot, Waypoint,
};
pub use logging::init as init_logging;
pub use route::{Route, WaypointGraph, WaypointId};
pub use scenario::{Sample, Scenario, ScenarioError};
pub use threat::{ThreatSet, OBSTACLE_TAG};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use steer::prelude::*;
    //! ```

    pub use crate::Agent;
    pub use crate::Route;
    pub use crate::SteeringConfig;
    pub use crate::SteeringPlugin;
    pub use crate::StepOutcome;
    pub use crate::WaypointGraph;
    pub use glam::Vec2;
}
