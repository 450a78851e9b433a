//! Boundary reduction and linear solve

use super::SolverOptions;
use crate::elements::Reaction;
use crate::error::SolverError;
use crate::math::{self, Mat, Vec as FEVec};
use crate::mesh::Mesh;

/// Free and constrained DOF indices of the global system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DofPartition {
    pub free: Vec<usize>,
    pub constrained: Vec<usize>,
}

impl DofPartition {
    /// Partition the mesh DOFs using the supports' boundary conditions.
    ///
    /// Two supports on the same node are rejected since the reaction could
    /// not be attributed between them.
    pub fn from_reactions(mesh: &Mesh, reactions: &[Reaction]) -> Result<Self, SolverError> {
        let n_dofs = mesh.dof();
        let mut restrained = vec![false; n_dofs];
        let mut supported = vec![false; mesh.nodes().len()];

        for reaction in reactions {
            // Locations are validated before meshing, so every support has a node
            let Some(node) = mesh.node_index(reaction.location()) else {
                continue;
            };
            if supported[node] {
                return Err(SolverError::RedundantSupport(reaction.location()));
            }
            supported[node] = true;

            let bc = reaction.boundary_condition().as_array();
            for (i, fixed) in bc.into_iter().enumerate() {
                restrained[node * 2 + i] = fixed;
            }
        }

        let (constrained, free): (Vec<usize>, Vec<usize>) =
            (0..n_dofs).partition(|&dof| restrained[dof]);

        Ok(Self { free, constrained })
    }
}

/// Result of the reduced solve
#[derive(Debug, Clone)]
pub struct Solution {
    /// Full nodal displacement vector (zeros on constrained DOFs)
    pub displacements: FEVec,
    /// `K u - P` for every DOF; non-zero only at constrained DOFs up to
    /// round-off
    pub residual: FEVec,
    /// Condition number of the scaled reduced matrix
    pub condition: f64,
}

/// Solve `K_ff u_f = P_f` and back-substitute the support reactions.
///
/// Constrained DOFs are held at zero, so `K_fc u_c` vanishes.
pub fn solve_reduced(
    k_global: &Mat,
    p_global: &FEVec,
    partition: &DofPartition,
    options: &SolverOptions,
) -> Result<Solution, SolverError> {
    let n_dofs = p_global.len();
    let free = &partition.free;
    let n_free = free.len();

    let mut d_full = FEVec::zeros(n_dofs);
    let mut condition = 1.0;

    if n_free > 0 {
        let mut k11 = Mat::zeros(n_free, n_free);
        let mut p1 = FEVec::zeros(n_free);

        for (i, &di) in free.iter().enumerate() {
            p1[i] = p_global[di];
            for (j, &dj) in free.iter().enumerate() {
                k11[(i, j)] = k_global[(di, dj)];
            }
        }

        condition = math::scaled_condition_number(&k11);
        log::debug!("reduced system: {n_free} free DOFs, condition {condition:e}");

        if !condition.is_finite() || condition.recip() <= options.singular_rcond {
            return Err(SolverError::Singular { free_dofs: n_free });
        }
        if condition > options.max_condition {
            return Err(SolverError::IllConditioned {
                condition,
                limit: options.max_condition,
            });
        }

        let d1 = math::solve_linear_system(&k11, &p1)
            .ok_or(SolverError::Singular { free_dofs: n_free })?;

        for (i, &di) in free.iter().enumerate() {
            d_full[di] = d1[i];
        }
    }

    let residual = k_global * &d_full - p_global;

    Ok(Solution {
        displacements: d_full,
        residual,
        condition,
    })
}
