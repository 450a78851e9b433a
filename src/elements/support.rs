//! Support reactions

use serde::{Deserialize, Serialize};

/// Kinematic constraint of a support
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoundaryCondition {
    /// Transverse displacement restrained
    pub disp_fixed: bool,
    /// Rotation restrained
    pub rot_fixed: bool,
}

impl BoundaryCondition {
    /// Get the restraint flags as `[displacement, rotation]`
    pub fn as_array(&self) -> [bool; 2] {
        [self.disp_fixed, self.rot_fixed]
    }
}

/// Kind of support
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReactionKind {
    /// No displacement and no rotation
    Fixed,
    /// No displacement, free rotation
    Pinned,
}

impl ReactionKind {
    pub fn boundary_condition(&self) -> BoundaryCondition {
        match self {
            ReactionKind::Fixed => BoundaryCondition {
                disp_fixed: true,
                rot_fixed: true,
            },
            ReactionKind::Pinned => BoundaryCondition {
                disp_fixed: true,
                rot_fixed: false,
            },
        }
    }
}

/// A support at a location along the beam.
///
/// `force` and `moment` are unknown until the owning beam is solved and are
/// cleared again whenever the beam changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reaction {
    kind: ReactionKind,
    location: f64,

    #[serde(skip)]
    pub(crate) force: Option<f64>,

    #[serde(skip)]
    pub(crate) moment: Option<f64>,
}

impl Reaction {
    /// Create a new reaction
    pub fn new(kind: ReactionKind, location: f64) -> Self {
        Self {
            kind,
            location,
            force: None,
            moment: None,
        }
    }

    /// Create a fixed (clamped) support
    pub fn fixed(location: f64) -> Self {
        Self::new(ReactionKind::Fixed, location)
    }

    /// Create a pinned support
    pub fn pinned(location: f64) -> Self {
        Self::new(ReactionKind::Pinned, location)
    }

    pub fn kind(&self) -> ReactionKind {
        self.kind
    }

    pub fn location(&self) -> f64 {
        self.location
    }

    pub fn boundary_condition(&self) -> BoundaryCondition {
        self.kind.boundary_condition()
    }

    /// Solved reaction force, if the beam has been solved
    pub fn force(&self) -> Option<f64> {
        self.force
    }

    /// Solved reaction moment. Always `None` for a support that leaves
    /// rotation free.
    pub fn moment(&self) -> Option<f64> {
        self.moment
    }

    /// Clear solved values
    pub fn invalidate(&mut self) {
        self.force = None;
        self.moment = None;
    }

    /// Store solved values, respecting the boundary condition
    pub(crate) fn set_solved(&mut self, force: f64, moment: f64) {
        let bc = self.boundary_condition();
        self.force = bc.disp_fixed.then_some(force);
        self.moment = bc.rot_fixed.then_some(moment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_support() {
        let bc = Reaction::fixed(0.0).boundary_condition();
        assert_eq!(bc.as_array(), [true, true]);
    }

    #[test]
    fn test_pinned_support() {
        let bc = Reaction::pinned(0.0).boundary_condition();
        assert_eq!(bc.as_array(), [true, false]);
    }

    #[test]
    fn test_pinned_moment_stays_unknown() {
        let mut reaction = Reaction::pinned(4.0);
        reaction.set_solved(12.0, 3.0);
        assert_eq!(reaction.force(), Some(12.0));
        assert_eq!(reaction.moment(), None);

        reaction.invalidate();
        assert_eq!(reaction.force(), None);
        assert_eq!(reaction.moment(), None);
    }
}
