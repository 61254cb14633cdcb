//! Obstacles currently overlapping an agent's detection volume.

use std::hash::Hash;

use glam::Vec2;
use hashbrown::HashSet;
use log::debug;

/// Tag an overlapping entity must carry to count as a threat.
pub const OBSTACLE_TAG: &str = "obstacle";

/// Set of overlapping obstacle handles.
///
/// Handles are opaque; the set never dereferences them. Liveness is checked
/// when facings are gathered for a step, and entries whose entity has gone
/// away are dropped there. Iteration follows registration order so the
/// avoidance sum is the same from run to run.
#[derive(Clone, Debug)]
pub struct ThreatSet<H> {
    members: HashSet<H>,
    order: Vec<H>,
}

impl<H> Default for ThreatSet<H> {
    fn default() -> Self {
        Self {
            members: HashSet::new(),
            order: Vec::new(),
        }
    }
}

impl<H: Copy + Eq + Hash + std::fmt::Debug> ThreatSet<H> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles an overlap-enter notification.
    ///
    /// Returns `true` when `handle` was newly added; entities not tagged
    /// [`OBSTACLE_TAG`] are ignored.
    pub fn overlap_entered(&mut self, handle: H, tag: &str) -> bool {
        if tag != OBSTACLE_TAG {
            return false;
        }
        self.insert(handle)
    }

    /// Handles an overlap-exit notification. Untagged handles are removed too.
    pub fn overlap_exited(&mut self, handle: H) -> bool {
        let removed = self.members.remove(&handle);
        if removed {
            self.order.retain(|&member| member != handle);
            debug!("threat {handle:?} cleared");
        }
        removed
    }

    /// Adds an already-classified obstacle.
    pub fn insert(&mut self, handle: H) -> bool {
        let added = self.members.insert(handle);
        if added {
            self.order.push(handle);
            debug!("threat {handle:?} registered");
        }
        added
    }

    /// Whether `handle` is currently a threat.
    #[must_use]
    pub fn contains(&self, handle: H) -> bool {
        self.members.contains(&handle)
    }

    /// Number of registered threats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether no threat is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Forgets every threat.
    pub fn clear(&mut self) {
        self.members.clear();
        self.order.clear();
    }

    /// Registered handles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = H> + '_ {
        self.order.iter().copied()
    }

    /// Collects the facing of every live threat, pruning the rest.
    ///
    /// `facing_of` returns `None` for a handle whose entity no longer exists.
    pub fn live_facings<F>(&mut self, mut facing_of: F) -> Vec<Vec2>
    where
        F: FnMut(H) -> Option<Vec2>,
    {
        let mut facings = Vec::with_capacity(self.order.len());
        let members = &mut self.members;
        self.order.retain(|&handle| {
            if let Some(facing) = facing_of(handle) {
                facings.push(facing);
                true
            } else {
                debug!("pruning stale threat {handle:?}");
                members.remove(&handle);
                false
            }
        });
        facings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn entering_twice_keeps_one_entry() {
        let mut threats = ThreatSet::new();
        assert!(threats.overlap_entered(7_u32, OBSTACLE_TAG));
        assert!(!threats.overlap_entered(7_u32, OBSTACLE_TAG));
        assert_eq!(threats.len(), 1);
    }

    #[rstest]
    #[case::player("player")]
    #[case::waypoint("waypoint")]
    #[case::wrong_case("Obstacle")]
    fn untagged_entities_are_ignored(#[case] tag: &str) {
        let mut threats = ThreatSet::new();
        assert!(!threats.overlap_entered(1_u32, tag));
        assert!(threats.is_empty());
    }

    #[rstest]
    fn exit_removes_member() {
        let mut threats = ThreatSet::new();
        threats.overlap_entered(1_u32, OBSTACLE_TAG);
        threats.overlap_entered(2_u32, OBSTACLE_TAG);
        assert!(threats.overlap_exited(1));
        assert!(!threats.overlap_exited(1));
        assert!(!threats.contains(1));
        assert!(threats.contains(2));
    }

    #[rstest]
    fn live_facings_prunes_stale_handles() {
        let mut threats = ThreatSet::new();
        for handle in 1_u32..=3 {
            threats.insert(handle);
        }
        let facings = threats.live_facings(|h| (h != 2).then_some(Vec2::X));
        assert_eq!(facings, vec![Vec2::X, Vec2::X]);
        assert_eq!(threats.len(), 2);
        assert!(!threats.contains(2));
    }

    #[rstest]
    fn facings_follow_registration_order() {
        let mut threats = ThreatSet::new();
        for handle in [40_u32, 3, 17, 8, 25] {
            threats.insert(handle);
        }
        threats.overlap_exited(17);
        threats.insert(17);
        let facings = threats.live_facings(|h| Some(Vec2::new(h as f32, 0.0)));
        let xs: Vec<f32> = facings.iter().map(|f| f.x).collect();
        assert_eq!(xs, vec![40.0, 3.0, 8.0, 25.0, 17.0]);
        assert_eq!(threats.iter().collect::<Vec<_>>(), vec![40, 3, 8, 25, 17]);
    }
}
