//! Direct stiffness assembly of the global system

use crate::error::ValidationError;
use crate::loads::Load;
use crate::math::{Mat, Vec as FEVec};
use crate::mesh::Mesh;

/// Build the global stiffness matrix (`2N x 2N`)
pub fn build_global_stiffness(mesh: &Mesh) -> Mat {
    let n_dofs = mesh.dof();
    let mut k_global = Mat::zeros(n_dofs, n_dofs);

    for element in mesh.elements() {
        let k_local = element.stiffness();
        let dofs = element.dofs();

        for (a, &row) in dofs.iter().enumerate() {
            for (b, &col) in dofs.iter().enumerate() {
                k_global[(row, col)] += k_local[(a, b)];
            }
        }
    }

    log::debug!(
        "assembled {} elements into {}x{} global stiffness",
        mesh.num_elements(),
        n_dofs,
        n_dofs
    );

    k_global
}

/// Build the global load vector (`2N`).
///
/// Point loads go to the displacement row of their node and moment loads to
/// the rotation row. Loads sharing a node accumulate.
pub fn build_load_vector(mesh: &Mesh, loads: &[Load]) -> Result<FEVec, ValidationError> {
    let mut p = FEVec::zeros(mesh.dof());

    for load in loads {
        let node = mesh
            .node_index(load.location())
            .ok_or(ValidationError::LocationOutOfRange {
                location: load.location(),
                length: mesh.length(),
            })?;
        let [force, moment] = load.as_array();
        p[node * 2] += force;
        p[node * 2 + 1] += moment;
    }

    Ok(p)
}
