//! Waypoint linkage.
//!
//! Agents never own waypoints; they hold a handle to the current one and ask
//! a [`WaypointGraph`] for its position and successor. [`Route`] is an owned
//! arena implementation for hosts without their own scene graph. The Bevy
//! adapter implements the trait over a per-frame snapshot of its waypoint
//! entities.

use std::fmt::Debug;

use glam::Vec2;

use crate::error::SteerError;

/// Read access to waypoint positions and successor links.
pub trait WaypointGraph {
    /// Handle identifying a waypoint.
    type Id: Copy + Eq + Debug;

    /// Planar position of `id`, or `None` when the waypoint no longer exists.
    fn position(&self, id: Self::Id) -> Option<Vec2>;

    /// Successor of `id`; `Ok(None)` marks the end of the route.
    ///
    /// # Errors
    /// Returns [`SteerError::MissingSuccessorCapability`] when the waypoint
    /// carries no successor link at all.
    fn successor(&self, id: Self::Id) -> Result<Option<Self::Id>, SteerError>;
}

/// Index of a waypoint inside a [`Route`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WaypointId(usize);

/// A named point with an optional successor.
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    /// Human-readable label.
    pub name: String,
    /// Planar position.
    pub position: Vec2,
    /// Successor; `None` ends the route.
    pub next: Option<WaypointId>,
}

/// Arena of linked waypoints.
#[derive(Clone, Debug, Default)]
pub struct Route {
    waypoints: Vec<Waypoint>,
}

impl Route {
    /// Creates an empty route.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            waypoints: Vec::new(),
        }
    }

    /// Adds an unlinked waypoint and returns its handle.
    pub fn add(&mut self, name: impl Into<String>, position: Vec2) -> WaypointId {
        let id = WaypointId(self.waypoints.len());
        self.waypoints.push(Waypoint {
            name: name.into(),
            position,
            next: None,
        });
        id
    }

    /// Points `from` at `to`, replacing any previous successor.
    ///
    /// # Errors
    /// Returns [`SteerError::UnknownWaypoint`] if either handle is foreign to
    /// this route.
    pub fn link(&mut self, from: WaypointId, to: WaypointId) -> Result<(), SteerError> {
        if self.get(to).is_none() {
            return Err(SteerError::unknown_waypoint(&to));
        }
        let waypoint = self
            .waypoints
            .get_mut(from.0)
            .ok_or_else(|| SteerError::unknown_waypoint(&from))?;
        waypoint.next = Some(to);
        Ok(())
    }

    /// Clears the successor of `id`, making it the end of the route.
    ///
    /// # Errors
    /// Returns [`SteerError::UnknownWaypoint`] for a foreign handle.
    pub fn unlink(&mut self, id: WaypointId) -> Result<(), SteerError> {
        let waypoint = self
            .waypoints
            .get_mut(id.0)
            .ok_or_else(|| SteerError::unknown_waypoint(&id))?;
        waypoint.next = None;
        Ok(())
    }

    /// Appends `points` as a linked chain and returns the head, if any.
    pub fn chain<I, S>(&mut self, points: I) -> Option<WaypointId>
    where
        I: IntoIterator<Item = (S, Vec2)>,
        S: Into<String>,
    {
        let mut head = None;
        let mut previous: Option<WaypointId> = None;
        for (name, position) in points {
            let id = self.add(name, position);
            if let Some(prev) = previous.and_then(|p| self.waypoints.get_mut(p.0)) {
                prev.next = Some(id);
            }
            head = head.or(Some(id));
            previous = Some(id);
        }
        head
    }

    /// Links the last waypoint of the chain starting at `head` back to `head`.
    ///
    /// Walking stops at the first waypoint already visited, so closing an
    /// existing loop is a no-op.
    ///
    /// # Errors
    /// Returns [`SteerError::UnknownWaypoint`] for a foreign handle.
    pub fn close_loop(&mut self, head: WaypointId) -> Result<(), SteerError> {
        let mut tail = head;
        let mut visited = vec![head];
        loop {
            let link = self
                .get(tail)
                .ok_or_else(|| SteerError::unknown_waypoint(&tail))?
                .next;
            match link {
                Some(next) if visited.contains(&next) => return Ok(()),
                Some(next) => {
                    visited.push(next);
                    tail = next;
                }
                None => return self.link(tail, head),
            }
        }
    }

    /// Looks up a waypoint by handle.
    #[must_use]
    pub fn get(&self, id: WaypointId) -> Option<&Waypoint> {
        self.waypoints.get(id.0)
    }

    /// Number of waypoints in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether the arena holds no waypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

impl WaypointGraph for Route {
    type Id = WaypointId;

    fn position(&self, id: WaypointId) -> Option<Vec2> {
        self.get(id).map(|w| w.position)
    }

    fn successor(&self, id: WaypointId) -> Result<Option<WaypointId>, SteerError> {
        self.get(id)
            .map(|w| w.next)
            .ok_or_else(|| SteerError::unknown_waypoint(&id))
    }
}
