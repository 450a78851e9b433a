//! Beam element - the span between two adjacent nodes

use serde::{Deserialize, Serialize};

use crate::math::{self, Mat4};

/// A two-node Euler-Bernoulli beam element
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Element {
    /// Index of the left node
    pub i_node: usize,
    /// Index of the right node
    pub j_node: usize,
    /// Position of the left node
    pub x_start: f64,
    /// Element length
    pub length: f64,
    /// Modulus of elasticity
    pub e: f64,
    /// Area moment of inertia
    pub ixx: f64,
}

impl Element {
    /// Create a new element between node `i_node` and the node right after it
    pub fn new(i_node: usize, x_start: f64, length: f64, e: f64, ixx: f64) -> Self {
        Self {
            i_node,
            j_node: i_node + 1,
            x_start,
            length,
            e,
            ixx,
        }
    }

    /// Position of the right node
    pub fn x_end(&self) -> f64 {
        self.x_start + self.length
    }

    /// Flexural rigidity E*Ixx
    pub fn rigidity(&self) -> f64 {
        self.e * self.ixx
    }

    /// Local 4x4 stiffness matrix
    pub fn stiffness(&self) -> Mat4 {
        math::beam_local_stiffness(self.e, self.ixx, self.length)
    }

    /// Global DOF indices `[disp_i, rot_i, disp_j, rot_j]`
    pub fn dofs(&self) -> [usize; 4] {
        let i = self.i_node * 2;
        let j = self.j_node * 2;
        [i, i + 1, j, j + 1]
    }
}
