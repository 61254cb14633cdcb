//! The steered agent.
//!
//! An [`Agent`] owns its planar position and heading. Hosts copy their
//! transform in with [`Agent::sync_from_host`] before a step and read the
//! results back afterwards; nothing here knows about a renderer.
//!
//! A step runs the waypoint advancer, plans a heading against the current
//! threats, turns towards it and moves forward along the heading actually
//! reached.

use std::fmt::Debug;
use std::hash::Hash;

use glam::Vec2;
use log::{debug, info, warn};

use crate::angle::{clean_degrees, direction};
use crate::config::SteeringConfig;
use crate::error::SteerError;
use crate::planner;
use crate::route::WaypointGraph;
use crate::threat::ThreatSet;
use crate::turn;

/// Whether the agent is following a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionState<W> {
    /// No current waypoint; steps do nothing.
    Idle,
    /// Heading for the given waypoint.
    Moving(W),
}

/// What a call to [`Agent::step`] did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome<W> {
    /// The agent had no waypoint and stayed put.
    Idle,
    /// The agent moved.
    Moved {
        /// Waypoint reached at the start of this step, if any.
        arrived: Option<W>,
        /// Planar distance covered.
        displacement: Vec2,
    },
}

/// A waypoint-following agent.
///
/// `W` identifies waypoints in the host's [`WaypointGraph`]; `H` identifies
/// obstacle entities in the threat set.
#[derive(Clone, Debug)]
pub struct Agent<W, H> {
    position: Vec2,
    heading: f32,
    config: SteeringConfig,
    state: MotionState<W>,
    threats: ThreatSet<H>,
}

impl<W, H> Agent<W, H>
where
    W: Copy + Eq + Debug,
    H: Copy + Eq + Hash + Debug,
{
    /// Creates an agent, heading for `waypoint` when one is given.
    ///
    /// Out-of-range configuration values are logged, not rejected.
    pub fn new(config: SteeringConfig, position: Vec2, heading: f32, waypoint: Option<W>) -> Self {
        for warning in config.range_warnings() {
            warn!("steering config: {warning}");
        }
        Self {
            position,
            heading: clean_degrees(heading),
            config,
            state: waypoint.map_or(MotionState::Idle, MotionState::Moving),
            threats: ThreatSet::new(),
        }
    }

    /// Planar position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Heading in degrees, always within `[0, 360)`.
    #[must_use]
    pub const fn heading(&self) -> f32 {
        self.heading
    }

    /// Current tunables.
    #[must_use]
    pub const fn config(&self) -> &SteeringConfig {
        &self.config
    }

    /// Tunables, for adjusting between steps.
    pub const fn config_mut(&mut self) -> &mut SteeringConfig {
        &mut self.config
    }

    /// Whether the agent is following a route, and towards what.
    #[must_use]
    pub const fn state(&self) -> MotionState<W> {
        self.state
    }

    /// `true` once the route has ended or the agent was halted.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.state, MotionState::Idle)
    }

    /// Waypoint being approached, if any.
    #[must_use]
    pub const fn current_waypoint(&self) -> Option<W> {
        match self.state {
            MotionState::Idle => None,
            MotionState::Moving(waypoint) => Some(waypoint),
        }
    }

    /// Obstacles currently overlapping the agent.
    #[must_use]
    pub const fn threats(&self) -> &ThreatSet<H> {
        &self.threats
    }

    /// Moves the agent without stepping it.
    pub const fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Sets the heading, wrapping it into `[0, 360)`.
    pub fn set_heading(&mut self, heading: f32) {
        self.heading = clean_degrees(heading);
    }

    /// Copies the host's transform into the agent ahead of a step.
    pub fn sync_from_host(&mut self, position: Vec2, heading: f32) {
        self.set_position(position);
        self.set_heading(heading);
    }

    /// Re-arms the agent with a new route head, or idles it with `None`.
    pub fn set_waypoint(&mut self, waypoint: Option<W>) {
        self.state = waypoint.map_or(MotionState::Idle, MotionState::Moving);
    }

    /// Drops the current waypoint.
    pub fn halt(&mut self) {
        self.state = MotionState::Idle;
    }

    /// Forwards an overlap-enter notification to the threat set.
    pub fn overlap_entered(&mut self, handle: H, tag: &str) -> bool {
        self.threats.overlap_entered(handle, tag)
    }

    /// Adds an obstacle the host has already classified.
    pub fn add_threat(&mut self, handle: H) -> bool {
        self.threats.insert(handle)
    }

    /// Forwards an overlap-exit notification to the threat set.
    pub fn overlap_exited(&mut self, handle: H) -> bool {
        self.threats.overlap_exited(handle)
    }

    /// Swaps to the successor once the current waypoint is within tolerance.
    ///
    /// Advances at most one waypoint per call. A waypoint the route can no
    /// longer resolve idles the agent. Returns the waypoint just reached.
    ///
    /// # Errors
    /// Propagates [`SteerError`] from the successor lookup; the agent keeps
    /// its current waypoint in that case.
    pub fn advance_if_arrived<G>(&mut self, route: &G) -> Result<Option<W>, SteerError>
    where
        G: WaypointGraph<Id = W>,
    {
        let MotionState::Moving(waypoint) = self.state else {
            return Ok(None);
        };
        let Some(target) = route.position(waypoint) else {
            warn!("waypoint {waypoint:?} vanished; stopping");
            self.state = MotionState::Idle;
            return Ok(None);
        };
        if self.position.distance(target) > self.config.arrival_tolerance {
            return Ok(None);
        }

        info!("arrived at {waypoint:?}");
        let next = route.successor(waypoint)?;
        self.state = next.map_or_else(
            || {
                info!("route finished at {waypoint:?}");
                MotionState::Idle
            },
            MotionState::Moving,
        );
        Ok(Some(waypoint))
    }

    /// Heading that steers towards the current waypoint around live threats.
    ///
    /// Stale threats, for which `facing_of` returns `None`, are pruned.
    /// Returns `None` when idle or when there is no preferred direction.
    pub fn target_heading<G, F>(&mut self, route: &G, facing_of: F) -> Option<f32>
    where
        G: WaypointGraph<Id = W>,
        F: FnMut(H) -> Option<Vec2>,
    {
        let waypoint = self.current_waypoint()?;
        let target = route.position(waypoint)?;
        let facings = self.threats.live_facings(facing_of);
        planner::target_heading(self.position, target, &facings)
    }

    /// Turns towards `target` according to the configured turn mode.
    pub fn turn_towards(&mut self, target: f32, dt: f32) {
        self.heading = if self.config.smooth_turning {
            turn::turn_towards(self.heading, target, self.config.turn_rate * dt)
        } else {
            clean_degrees(target)
        };
    }

    /// Moves forward along the current heading; returns the displacement.
    pub fn translate(&mut self, dt: f32) -> Vec2 {
        let displacement = direction(self.heading) * self.config.speed * dt;
        self.position += displacement;
        displacement
    }

    /// Runs one simulation step of `dt` seconds.
    ///
    /// The agent still moves on the step that finishes its route; it idles
    /// from the following step on.
    ///
    /// # Errors
    /// Returns [`SteerError`] when the current waypoint cannot report its
    /// successor. Nothing moves on a failed step.
    pub fn step<G, F>(&mut self, dt: f32, route: &G, facing_of: F) -> Result<StepOutcome<W>, SteerError>
    where
        G: WaypointGraph<Id = W>,
        F: FnMut(H) -> Option<Vec2>,
    {
        if self.is_idle() {
            return Ok(StepOutcome::Idle);
        }

        let arrived = self.advance_if_arrived(route)?;
        if !self.is_idle() {
            if let Some(target) = self.target_heading(route, facing_of) {
                self.turn_towards(target, dt);
            } else {
                debug!("no preferred direction at {:?}; holding heading", self.position);
            }
        } else if arrived.is_none() {
            // The waypoint vanished rather than being reached.
            return Ok(StepOutcome::Idle);
        }

        let displacement = self.translate(dt);
        Ok(StepOutcome::Moved {
            arrived,
            displacement,
        })
    }
}
