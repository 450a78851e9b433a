//! Analysis pipeline: options, global assembly and the reduced solve

pub mod assembly;
pub mod solver;

use serde::{Deserialize, Serialize};

pub use assembly::{build_global_stiffness, build_load_vector};
pub use solver::{solve_reduced, DofPartition, Solution};

/// Options for the beam analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverOptions {
    /// Largest accepted condition number of the (Jacobi scaled) reduced
    /// stiffness matrix
    pub max_condition: f64,
    /// Reciprocal condition number at or below which the reduced matrix is
    /// treated as singular
    pub singular_rcond: f64,
    /// Largest accepted relative mismatch between the integrated response
    /// and the solved nodal values
    pub consistency_tolerance: f64,
    /// Finite difference step as a fraction of the local element length
    pub derivative_step: f64,
    /// Locations closer than this fraction of the beam length share a node
    pub merge_tolerance: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_condition: 1e12,
            singular_rcond: 1e-14,
            consistency_tolerance: 1e-6,
            derivative_step: 1e-4,
            merge_tolerance: 1e-12,
        }
    }
}

impl SolverOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the condition number limit
    pub fn with_max_condition(mut self, max_condition: f64) -> Self {
        self.max_condition = max_condition;
        self
    }

    /// Set the singularity threshold
    pub fn with_singular_rcond(mut self, rcond: f64) -> Self {
        self.singular_rcond = rcond;
        self
    }

    /// Set the nodal consistency tolerance
    pub fn with_consistency_tolerance(mut self, tol: f64) -> Self {
        self.consistency_tolerance = tol;
        self
    }

    /// Set the relative finite difference step
    pub fn with_derivative_step(mut self, step: f64) -> Self {
        self.derivative_step = step;
        self
    }

    /// Set the node merge tolerance
    pub fn with_merge_tolerance(mut self, tol: f64) -> Self {
        self.merge_tolerance = tol;
        self
    }
}
