//! Mathematical utilities for beam FEA calculations

pub mod derivative;

use nalgebra::{DMatrix, DVector, Matrix4, Vector4};

pub use derivative::{derivative, DifferenceMethod};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;

/// 4x4 matrix for element stiffness
pub type Mat4 = Matrix4<f64>;
/// 4-element vector for element forces/displacements
pub type Vec4 = Vector4<f64>;

/// Compute the local stiffness matrix for a 2D Euler-Bernoulli beam element
///
/// # Arguments
/// * `e` - Modulus of elasticity
/// * `ixx` - Area moment of inertia
/// * `length` - Element length
///
/// # Returns
/// 4x4 stiffness matrix, DOF ordering `[disp_i, rot_i, disp_j, rot_j]`
pub fn beam_local_stiffness(e: f64, ixx: f64, length: f64) -> Mat4 {
    debug_assert!(length > 0.0, "element length must be positive, got {length}");

    let l = length;
    let l2 = l * l;
    let k = e * ixx / (l2 * l);

    #[rustfmt::skip]
    let coefficients = Mat4::from_row_slice(&[
         12.0,      6.0 * l, -12.0,      6.0 * l,
          6.0 * l,  4.0 * l2, -6.0 * l,  2.0 * l2,
        -12.0,     -6.0 * l,  12.0,     -6.0 * l,
          6.0 * l,  2.0 * l2, -6.0 * l,  4.0 * l2,
    ]);

    coefficients * k
}

/// Hermite cubic shape functions evaluated at local coordinate `x` of an
/// element of length `length`
pub fn hermite_shape_functions(x: f64, length: f64) -> Vec4 {
    let l = length;
    let l2 = l * l;
    let l3 = l2 * l;
    let x2 = x * x;
    let x3 = x2 * x;

    Vec4::new(
        (l3 - 3.0 * l * x2 + 2.0 * x3) / l3,
        (l2 * x - 2.0 * l * x2 + x3) / l2,
        (3.0 * l * x2 - 2.0 * x3) / l3,
        (x3 - l * x2) / l2,
    )
}

/// Solve a linear system using LU decomposition
pub fn solve_linear_system(a: &Mat, b: &Vec) -> Option<Vec> {
    a.clone()
        .lu()
        .solve(b)
        .filter(|x| x.iter().all(|v| v.is_finite()))
}

/// Symmetric Jacobi scaling factors `1 / sqrt(|a_ii|)`.
///
/// Returns `None` when a diagonal entry is zero, which means the DOF has no
/// stiffness at all.
pub fn jacobi_scaling(a: &Mat) -> Option<Vec> {
    let mut scale = Vec::zeros(a.nrows());
    for i in 0..a.nrows() {
        let diag = a[(i, i)].abs();
        if diag == 0.0 || !diag.is_finite() {
            return None;
        }
        scale[i] = 1.0 / diag.sqrt();
    }
    Some(scale)
}

/// 2-norm condition number from the singular values.
///
/// Returns `f64::INFINITY` for an exactly rank-deficient matrix.
pub fn condition_number(a: &Mat) -> f64 {
    if a.is_empty() {
        return 1.0;
    }
    let singular_values = a.clone().singular_values();
    let max = singular_values.max();
    let min = singular_values.min();
    if min <= 0.0 || !min.is_finite() {
        f64::INFINITY
    } else {
        max / min
    }
}

/// Condition number of `D a D` with `D` the Jacobi scaling of `a`.
///
/// Displacement and rotation DOFs carry different units, so the unscaled
/// condition number depends on the unit system; the scaled one does not.
pub fn scaled_condition_number(a: &Mat) -> f64 {
    match jacobi_scaling(a) {
        Some(scale) => {
            let scaled = Mat::from_fn(a.nrows(), a.ncols(), |i, j| {
                a[(i, j)] * scale[i] * scale[j]
            });
            condition_number(&scaled)
        }
        None => f64::INFINITY,
    }
}
