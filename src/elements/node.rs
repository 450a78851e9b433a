//! Node - a point along the beam axis

use serde::{Deserialize, Serialize};

/// DOFs per node (transverse displacement + rotation)
pub const DOF_PER_NODE: usize = 2;

/// A node of the beam mesh
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Node {
    /// Position along the beam
    pub x: f64,
    /// Index in the mesh, left to right
    pub index: usize,
}

impl Node {
    /// Create a new node
    pub fn new(x: f64, index: usize) -> Self {
        Self { x, index }
    }

    /// Global index of the transverse displacement DOF
    pub fn displacement_dof(&self) -> usize {
        self.index * DOF_PER_NODE
    }

    /// Global index of the rotation DOF
    pub fn rotation_dof(&self) -> usize {
        self.index * DOF_PER_NODE + 1
    }
}
