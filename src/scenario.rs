//! Headless scenario runner.
//!
//! A [`Scenario`] describes one agent, a chain of named waypoints and a
//! timeline of obstacle overlaps. [`run`] steps the agent with a fixed `dt`
//! and records a [`Sample`] after every step, standing in for the host
//! engine: it delivers overlap notifications between steps and answers facing
//! lookups for live obstacles only.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glam::Vec2;
use hashbrown::HashMap;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::agent::Agent;
use crate::angle::direction;
use crate::config::SteeringConfig;
use crate::error::SteerError;
use crate::route::{Route, WaypointId};
use crate::threat::OBSTACLE_TAG;

fn obstacle_tag() -> String {
    OBSTACLE_TAG.to_owned()
}

const fn default_dt() -> f32 {
    1.0 / 60.0
}

const fn default_steps() -> u32 {
    600
}

/// A named route point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaypointSpec {
    /// Label reported in samples while the waypoint is being approached.
    pub name: String,
    /// Planar `[x, z]` position.
    pub position: [f32; 2],
}

/// An entity overlapping the agent for part of the run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    /// Handle the agent's threat set stores.
    pub id: u32,
    /// Tag reported with the overlap; only `"obstacle"` becomes a threat.
    #[serde(default = "obstacle_tag")]
    pub tag: String,
    /// Heading the obstacle faces, in degrees.
    pub facing: f32,
    /// Step before which the overlap begins.
    pub enter_step: u32,
    /// Step before which the overlap ends normally.
    #[serde(default)]
    pub exit_step: Option<u32>,
    /// Step from which the obstacle no longer exists, with no exit notice.
    #[serde(default)]
    pub destroyed_step: Option<u32>,
}

impl ObstacleSpec {
    fn alive_at(&self, step: u32) -> bool {
        !matches!(self.destroyed_step, Some(gone) if step >= gone)
    }
}

/// Everything needed for a headless run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Agent tunables; defaults apply to missing fields.
    #[serde(default)]
    pub config: SteeringConfig,
    /// Planar starting position.
    pub start: [f32; 2],
    /// Starting heading in degrees.
    #[serde(default)]
    pub heading: f32,
    /// Route, in visiting order.
    pub waypoints: Vec<WaypointSpec>,
    /// Link the last waypoint back to the first.
    #[serde(default)]
    pub looped: bool,
    /// Overlap timeline.
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
    /// Fixed step length in seconds.
    #[serde(default = "default_dt")]
    pub dt: f32,
    /// Number of steps to simulate.
    #[serde(default = "default_steps")]
    pub steps: u32,
}

/// Agent state recorded after a step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Zero-based step index.
    pub step: u32,
    /// Planar position after the step.
    pub position: [f32; 2],
    /// Heading in degrees after the step.
    pub heading: f32,
    /// Name of the waypoint being approached; `None` once idle.
    pub waypoint: Option<String>,
    /// Size of the threat set after the step.
    pub threats: usize,
}

/// Failure preparing or running a [`Scenario`].
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The scenario file could not be read.
    #[error("failed to read scenario {}: {source}", .path.display())]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying read failure.
        #[source]
        source: io::Error,
    },
    /// The scenario JSON was malformed or mistyped.
    #[error("invalid scenario: {source}")]
    Parse {
        /// Decoder error, with line and column.
        #[source]
        source: serde_json::Error,
    },
    /// The scenario lists no waypoints.
    #[error("scenario has no waypoints")]
    EmptyRoute,
    /// A step failed.
    #[error(transparent)]
    Steer(#[from] SteerError),
    /// A sample could not be handed on.
    #[error("failed to emit sample {step}: {source}")]
    Emit {
        /// Step whose sample was being emitted.
        step: u32,
        /// Underlying write failure.
        #[source]
        source: io::Error,
    },
}

impl Scenario {
    /// Parses a scenario from JSON.
    ///
    /// # Errors
    /// Returns [`ScenarioError::Parse`] for malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        serde_json::from_str(json).map_err(|source| ScenarioError::Parse { source })
    }

    /// Reads a scenario file.
    ///
    /// # Errors
    /// Returns [`ScenarioError::Io`] if the file cannot be read and
    /// [`ScenarioError::Parse`] if it is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let file = path.as_ref();
        let json = fs::read_to_string(file).map_err(|source| ScenarioError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Builds the route, returning it with its head.
    ///
    /// # Errors
    /// Returns [`ScenarioError::EmptyRoute`] when no waypoints are listed.
    pub fn build_route(&self) -> Result<(Route, WaypointId), ScenarioError> {
        let mut route = Route::new();
        let head = route
            .chain(
                self.waypoints
                    .iter()
                    .map(|w| (w.name.clone(), Vec2::from_array(w.position))),
            )
            .ok_or(ScenarioError::EmptyRoute)?;
        if self.looped {
            route.close_loop(head)?;
        }
        Ok((route, head))
    }
}

fn deliver_overlaps(agent: &mut Agent<WaypointId, u32>, obstacles: &[ObstacleSpec], step: u32) {
    for obstacle in obstacles {
        if obstacle.enter_step == step && obstacle.alive_at(step) {
            debug!("agent overlapped {} ({})", obstacle.id, obstacle.tag);
            agent.overlap_entered(obstacle.id, &obstacle.tag);
        }
        if obstacle.exit_step == Some(step) && obstacle.alive_at(step) {
            agent.overlap_exited(obstacle.id);
        }
    }
}

/// Runs `scenario`, handing each [`Sample`] to `emit` as soon as its step
/// finishes. Returns the number of steps run.
///
/// # Errors
/// Returns [`ScenarioError::EmptyRoute`] for a scenario without waypoints,
/// [`ScenarioError::Steer`] if a step fails and [`ScenarioError::Emit`] if
/// `emit` does.
pub fn stream<F>(scenario: &Scenario, mut emit: F) -> Result<u32, ScenarioError>
where
    F: FnMut(&Sample) -> io::Result<()>,
{
    let (route, head) = scenario.build_route()?;
    let mut agent = Agent::new(
        scenario.config,
        Vec2::from_array(scenario.start),
        scenario.heading,
        Some(head),
    );
    let facings: HashMap<u32, &ObstacleSpec> =
        scenario.obstacles.iter().map(|o| (o.id, o)).collect();

    for step in 0..scenario.steps {
        deliver_overlaps(&mut agent, &scenario.obstacles, step);
        agent.step(scenario.dt, &route, |id| {
            facings
                .get(&id)
                .filter(|o| o.alive_at(step))
                .map(|o| direction(o.facing))
        })?;
        let sample = Sample {
            step,
            position: agent.position().to_array(),
            heading: agent.heading(),
            waypoint: agent
                .current_waypoint()
                .and_then(|id| route.get(id))
                .map(|w| w.name.clone()),
            threats: agent.threats().len(),
        };
        emit(&sample).map_err(|source| ScenarioError::Emit { step, source })?;
    }
    Ok(scenario.steps)
}

/// Runs `scenario` for its configured number of steps and collects every
/// sample.
///
/// # Errors
/// Returns [`ScenarioError::EmptyRoute`] for a scenario without waypoints and
/// [`ScenarioError::Steer`] if a step fails.
pub fn run(scenario: &Scenario) -> Result<Vec<Sample>, ScenarioError> {
    let mut samples = Vec::new();
    stream(scenario, |sample| {
        samples.push(sample.clone());
        Ok(())
    })?;
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    fn base() -> Scenario {
        Scenario::from_json_str(
            r#"{
                "start": [0.0, 0.0],
                "waypoints": [{ "name": "east", "position": [10.0, 0.0] }],
                "dt": 1.0,
                "steps": 4
            }"#,
        )
        .expect("scenario parses")
    }

    #[rstest]
    fn defaults_fill_optional_fields() {
        let scenario = base();
        assert_eq!(scenario.config, SteeringConfig::default());
        assert!(!scenario.looped);
        assert!(scenario.obstacles.is_empty());
    }

    #[rstest]
    fn straight_route_finishes_and_idles() {
        let samples = run(&base()).expect("run");
        let xs: Vec<f32> = samples.iter().map(|s| s.position[0]).collect();
        assert_abs_diff_eq!(xs[0], 5.0, epsilon = 1e-5);
        assert_abs_diff_eq!(xs[1], 10.0, epsilon = 1e-5);
        // Arrival step still moves; afterwards the agent is idle.
        assert_abs_diff_eq!(xs[2], 15.0, epsilon = 1e-5);
        assert_abs_diff_eq!(xs[3], 15.0, epsilon = 1e-5);
        assert_eq!(samples[1].waypoint.as_deref(), Some("east"));
        assert_eq!(samples[2].waypoint, None);
    }

    #[rstest]
    fn empty_route_is_rejected() {
        let mut scenario = base();
        scenario.waypoints.clear();
        assert!(matches!(run(&scenario), Err(ScenarioError::EmptyRoute)));
    }

    #[rstest]
    fn untagged_overlaps_do_not_threaten() {
        let mut scenario = base();
        scenario.obstacles.push(ObstacleSpec {
            id: 1,
            tag: "scenery".to_owned(),
            facing: 0.0,
            enter_step: 0,
            exit_step: None,
            destroyed_step: None,
        });
        let samples = run(&scenario).expect("run");
        assert_eq!(samples[0].threats, 0);
        assert_abs_diff_eq!(samples[0].heading, 0.0);
    }

    #[rstest]
    fn destroyed_obstacle_is_dropped_without_exit() {
        let mut scenario = base();
        scenario.steps = 2;
        scenario.obstacles.push(ObstacleSpec {
            id: 1,
            tag: obstacle_tag(),
            facing: 0.0,
            enter_step: 0,
            exit_step: None,
            destroyed_step: Some(1),
        });
        let samples = run(&scenario).expect("run");
        assert_eq!(samples[0].threats, 1);
        assert_abs_diff_eq!(samples[0].heading, 45.0, epsilon = 1e-4);
        assert_eq!(samples[1].threats, 0);
    }

    #[rstest]
    fn looped_route_keeps_patrolling() {
        let scenario = Scenario::from_json_str(
            r#"{
                "start": [0.0, 0.0],
                "config": { "speed": 10.0, "arrival_tolerance": 0.5 },
                "waypoints": [
                    { "name": "a", "position": [0.0, 0.0] },
                    { "name": "b", "position": [10.0, 0.0] }
                ],
                "looped": true,
                "dt": 1.0,
                "steps": 6
            }"#,
        )
        .expect("scenario parses");
        let samples = run(&scenario).expect("run");
        assert!(samples.iter().all(|s| s.waypoint.is_some()));
    }

    #[rstest]
    #[case::truncated(r#"{ "start": [0.0, "#)]
    #[case::missing_start(r#"{ "waypoints": [] }"#)]
    fn malformed_scenario_is_a_scenario_parse_error(#[case] json: &str) {
        let error = Scenario::from_json_str(json).expect_err("must not parse");
        assert!(matches!(error, ScenarioError::Parse { .. }));
        assert!(error.to_string().starts_with("invalid scenario"));
    }

    #[rstest]
    fn stream_hands_samples_over_step_by_step() {
        let mut seen = Vec::new();
        let count = stream(&base(), |sample| {
            seen.push(sample.step);
            Ok(())
        })
        .expect("stream");
        assert_eq!(count, 4);
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[rstest]
    fn stream_stops_at_the_first_emit_failure() {
        let mut seen = 0;
        let result = stream(&base(), |sample| {
            seen += 1;
            if sample.step == 1 {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            } else {
                Ok(())
            }
        });
        assert!(matches!(result, Err(ScenarioError::Emit { step: 1, .. })));
        assert_eq!(seen, 2);
    }
}
