//! Result types for beam analysis

use serde::{Deserialize, Serialize};

use crate::elements::{Reaction, ReactionKind};

/// Displacement results at a node
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NodeDisplacement {
    /// Node position along the beam
    pub x: f64,
    /// Transverse displacement (positive up)
    pub displacement: f64,
    /// Rotation (positive counter-clockwise)
    pub rotation: f64,
}

impl NodeDisplacement {
    /// Create from a position and `[displacement, rotation]`
    pub fn from_array(x: f64, arr: [f64; 2]) -> Self {
        Self {
            x,
            displacement: arr[0],
            rotation: arr[1],
        }
    }
}

/// Solved values of one support
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReactionResult {
    pub kind: ReactionKind,
    pub location: f64,
    /// Reaction force (positive up)
    pub force: f64,
    /// Reaction moment (positive counter-clockwise), `None` where rotation
    /// is free
    pub moment: Option<f64>,
}

impl ReactionResult {
    /// Snapshot a solved reaction. Returns `None` if it has no force yet.
    pub fn from_reaction(reaction: &Reaction) -> Option<Self> {
        Some(Self {
            kind: reaction.kind(),
            location: reaction.location(),
            force: reaction.force()?,
            moment: reaction.moment(),
        })
    }
}

/// Peak value of a response quantity and where it occurs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Extreme {
    /// Signed value with the largest magnitude
    pub value: f64,
    /// Position of the peak
    pub location: f64,
}

impl Default for Extreme {
    fn default() -> Self {
        Self {
            value: 0.0,
            location: 0.0,
        }
    }
}

/// Summary of analysis results
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalysisSummary {
    /// Peak deflection
    pub max_deflection: Extreme,
    /// Peak slope
    pub max_slope: Extreme,
    /// Peak bending moment
    pub max_moment: Extreme,
    /// Peak shear force
    pub max_shear: Extreme,
    /// Solved support values
    pub reactions: Vec<ReactionResult>,
    /// Total number of nodes
    pub num_nodes: usize,
    /// Total number of elements
    pub num_elements: usize,
    /// Total DOFs
    pub total_dofs: usize,
    /// Free DOFs (unknown)
    pub free_dofs: usize,
    /// Condition number of the scaled reduced stiffness matrix
    pub condition: f64,
    /// Largest relative mismatch between integrated and solved nodal values
    pub nodal_mismatch: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_result_requires_solve() {
        let mut reaction = Reaction::fixed(0.0);
        assert!(ReactionResult::from_reaction(&reaction).is_none());

        reaction.set_solved(2.0, 20.0);
        let result = ReactionResult::from_reaction(&reaction).unwrap();
        assert_eq!(result.force, 2.0);
        assert_eq!(result.moment, Some(20.0));
    }

    #[test]
    fn test_node_displacement_from_array() {
        let d = NodeDisplacement::from_array(3.0, [-0.5, 0.01]);
        assert_eq!(d.x, 3.0);
        assert_eq!(d.displacement, -0.5);
        assert_eq!(d.rotation, 0.01);
    }
}
