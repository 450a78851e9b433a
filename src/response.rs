//! Shear, moment, slope and deflection along a solved beam
//!
//! Forces and displacements are positive up, moments and rotations positive
//! counter-clockwise, and the internal bending moment is positive sagging.
//!
//! Shear and moment at `x` only include actions located strictly left of `x`,
//! so both are left-continuous and zero at `x = 0`. Slope and deflection are
//! integrated element by element from the solved nodal values and are
//! continuous.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::SolverOptions;
use crate::error::ValidationError;
use crate::loads::{Load, LoadKind};
use crate::math::{self, DifferenceMethod, Vec as FEVec, Vec4};
use crate::mesh::Mesh;
use crate::results::Extreme;

/// Response quantity along the beam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseKind {
    Shear,
    Moment,
    Slope,
    Deflection,
}

/// Closed-form response over one element.
///
/// With loads only at nodes the shear is constant and the moment linear
/// inside an element, so slope and deflection are quadratic and cubic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ElementResponse {
    pub x_start: f64,
    pub length: f64,
    /// Shear inside the element
    pub shear: f64,
    /// Moment just right of the left node
    pub moment_start: f64,
    /// Solved rotation of the left node
    pub slope_start: f64,
    /// Solved displacement of the left node
    pub deflection_start: f64,
    /// Flexural rigidity E*Ixx
    pub rigidity: f64,
}

impl ElementResponse {
    fn moment(&self, s: f64) -> f64 {
        self.moment_start + self.shear * s
    }

    fn slope(&self, s: f64) -> f64 {
        self.slope_start + (self.moment_start * s + self.shear * s * s / 2.0) / self.rigidity
    }

    fn deflection(&self, s: f64) -> f64 {
        let s2 = s * s;
        self.deflection_start
            + self.slope_start * s
            + (self.moment_start * s2 / 2.0 + self.shear * s2 * s / 6.0) / self.rigidity
    }

    /// Value at local coordinate `s`, taking the right-hand limit at `s = 0`
    fn value(&self, kind: ResponseKind, s: f64) -> f64 {
        match kind {
            ResponseKind::Shear => self.shear,
            ResponseKind::Moment => self.moment(s),
            ResponseKind::Slope => self.slope(s),
            ResponseKind::Deflection => self.deflection(s),
        }
    }
}

/// Raised when a numeric derivative is taken close to a beam end, where the
/// stencil is one-sided or the nearest element is short
#[derive(Error, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[error(
    "derivative at x = {position} is {edge_distance} from the beam end, within one element \
     length ({element_length}); the estimate may be imprecise"
)]
pub struct PrecisionWarning {
    pub position: f64,
    pub edge_distance: f64,
    pub element_length: f64,
}

/// Numeric derivative estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub value: f64,
    pub method: DifferenceMethod,
    pub warning: Option<PrecisionWarning>,
}

/// Piecewise polynomial response of a solved beam
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseField {
    mesh: Mesh,
    ixx: f64,
    /// `(node position, force)` sorted left to right
    forces: Vec<(f64, f64)>,
    /// `(node position, couple)` sorted left to right
    couples: Vec<(f64, f64)>,
    elements: Vec<ElementResponse>,
    /// `[displacement, rotation]` per node
    nodal: Vec<[f64; 2]>,
    mismatch: f64,
    derivative_step: f64,
}

impl ResponseField {
    /// Build the field from solved nodal displacements and every action on
    /// the beam: applied loads plus the support reactions expressed as loads.
    pub fn new(
        mesh: Mesh,
        ixx: f64,
        displacements: &FEVec,
        actions: &[Load],
        options: &SolverOptions,
    ) -> Result<Self, ValidationError> {
        let mut forces = Vec::new();
        let mut couples = Vec::new();

        for action in actions {
            let node = mesh
                .node_index(action.location())
                .ok_or(ValidationError::LocationOutOfRange {
                    location: action.location(),
                    length: mesh.length(),
                })?;
            let x = mesh.nodes()[node].x;
            match action.kind() {
                LoadKind::Point => forces.push((x, action.magnitude())),
                LoadKind::Moment => couples.push((x, action.magnitude())),
            }
        }
        forces.sort_by(|a, b| a.0.total_cmp(&b.0));
        couples.sort_by(|a, b| a.0.total_cmp(&b.0));

        let nodal: Vec<[f64; 2]> = mesh
            .nodes()
            .iter()
            .map(|n| [displacements[n.displacement_dof()], displacements[n.rotation_dof()]])
            .collect();

        let elements: Vec<ElementResponse> = mesh
            .elements()
            .iter()
            .map(|element| {
                let xs = element.x_start;
                let shear: f64 = forces
                    .iter()
                    .filter(|(x, _)| *x <= xs)
                    .map(|(_, f)| f)
                    .sum();
                let lever: f64 = forces
                    .iter()
                    .filter(|(x, _)| *x <= xs)
                    .map(|(x, f)| f * (xs - x))
                    .sum();
                let couple: f64 = couples
                    .iter()
                    .filter(|(x, _)| *x <= xs)
                    .map(|(_, c)| c)
                    .sum();
                let [deflection_start, slope_start] = nodal[element.i_node];

                ElementResponse {
                    x_start: xs,
                    length: element.length,
                    shear,
                    moment_start: lever - couple,
                    slope_start,
                    deflection_start,
                    rigidity: element.rigidity(),
                }
            })
            .collect();

        let mismatch = nodal_mismatch(&mesh, &elements, &nodal);
        if mismatch > options.consistency_tolerance {
            log::warn!(
                "integrated response departs from solved nodal values by {mismatch:e} \
                 (tolerance {:e})",
                options.consistency_tolerance
            );
        }

        Ok(Self {
            mesh,
            ixx,
            forces,
            couples,
            elements,
            nodal,
            mismatch,
            derivative_step: options.derivative_step,
        })
    }

    pub fn length(&self) -> f64 {
        self.mesh.length()
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn elements(&self) -> &[ElementResponse] {
        &self.elements
    }

    /// Largest relative mismatch between integrated and solved nodal values
    pub fn mismatch(&self) -> f64 {
        self.mismatch
    }

    fn check_position(&self, x: f64) -> Result<(), ValidationError> {
        let length = self.length();
        if x.is_finite() && (0.0..=length).contains(&x) {
            Ok(())
        } else {
            Err(ValidationError::PositionOutOfRange {
                position: x,
                length,
            })
        }
    }

    fn element_at(&self, x: f64) -> usize {
        self.mesh
            .element_index(x.clamp(0.0, self.length()))
            .unwrap_or(0)
    }

    fn shear_at(&self, x: f64) -> f64 {
        self.forces
            .iter()
            .take_while(|(xi, _)| *xi < x)
            .map(|(_, f)| f)
            .sum()
    }

    fn moment_at(&self, x: f64) -> f64 {
        let lever: f64 = self
            .forces
            .iter()
            .take_while(|(xi, _)| *xi < x)
            .map(|(xi, f)| f * (x - xi))
            .sum();
        let couple: f64 = self
            .couples
            .iter()
            .take_while(|(xi, _)| *xi < x)
            .map(|(_, c)| c)
            .sum();
        lever - couple
    }

    /// Unchecked evaluation
    fn evaluate(&self, kind: ResponseKind, x: f64) -> f64 {
        match kind {
            ResponseKind::Shear => self.shear_at(x),
            ResponseKind::Moment => self.moment_at(x),
            ResponseKind::Slope | ResponseKind::Deflection => {
                // Solved values at nodes
                if let Some(node) = self.mesh.node_index(x) {
                    let [deflection, slope] = self.nodal[node];
                    return match kind {
                        ResponseKind::Slope => slope,
                        _ => deflection,
                    };
                }
                let element = &self.elements[self.element_at(x)];
                element.value(kind, x - element.x_start)
            }
        }
    }

    /// Value of `kind` at `x`
    pub fn value(&self, kind: ResponseKind, x: f64) -> Result<f64, ValidationError> {
        self.check_position(x)?;
        Ok(self.evaluate(kind, x))
    }

    /// Values of `kind` at every position in `xs`
    pub fn values(&self, kind: ResponseKind, xs: &[f64]) -> Result<Vec<f64>, ValidationError> {
        xs.iter().map(|&x| self.value(kind, x)).collect()
    }

    pub fn shear(&self, x: f64) -> Result<f64, ValidationError> {
        self.value(ResponseKind::Shear, x)
    }

    pub fn moment(&self, x: f64) -> Result<f64, ValidationError> {
        self.value(ResponseKind::Moment, x)
    }

    pub fn slope(&self, x: f64) -> Result<f64, ValidationError> {
        self.value(ResponseKind::Slope, x)
    }

    pub fn deflection(&self, x: f64) -> Result<f64, ValidationError> {
        self.value(ResponseKind::Deflection, x)
    }

    pub fn shear_many(&self, xs: &[f64]) -> Result<Vec<f64>, ValidationError> {
        self.values(ResponseKind::Shear, xs)
    }

    pub fn moment_many(&self, xs: &[f64]) -> Result<Vec<f64>, ValidationError> {
        self.values(ResponseKind::Moment, xs)
    }

    pub fn slope_many(&self, xs: &[f64]) -> Result<Vec<f64>, ValidationError> {
        self.values(ResponseKind::Slope, xs)
    }

    pub fn deflection_many(&self, xs: &[f64]) -> Result<Vec<f64>, ValidationError> {
        self.values(ResponseKind::Deflection, xs)
    }

    /// Bending stress `M c / Ixx` at fibre distance `c` from the neutral axis
    /// (positive `c` above the axis gives compression under sagging)
    pub fn bending_stress(&self, x: f64, c: f64) -> Result<f64, ValidationError> {
        Ok(self.moment(x)? * c / self.ixx)
    }

    /// Deflection interpolated from the nodal values with Hermite shape
    /// functions
    pub fn hermite_deflection(&self, x: f64) -> Result<f64, ValidationError> {
        self.check_position(x)?;
        let idx = self.element_at(x);
        let element = &self.elements[idx];
        let [v_i, theta_i] = self.nodal[idx];
        let [v_j, theta_j] = self.nodal[idx + 1];
        let n = math::hermite_shape_functions(x - element.x_start, element.length);
        Ok(n.dot(&Vec4::new(v_i, theta_i, v_j, theta_j)))
    }

    /// Signed value of `kind` with the largest magnitude, sampled at
    /// `samples_per_element + 1` evenly spaced points on each element.
    ///
    /// Both one-sided limits are sampled at every node, so the peaks of the
    /// piecewise linear shear and moment are found exactly.
    pub fn extreme(&self, kind: ResponseKind, samples_per_element: usize) -> Extreme {
        let samples = samples_per_element.max(1);
        let mut best = Extreme::default();

        for element in &self.elements {
            for k in 0..=samples {
                let s = element.length * k as f64 / samples as f64;
                let value = element.value(kind, s);
                if value.abs() > best.value.abs() {
                    best = Extreme {
                        value,
                        location: element.x_start + s,
                    };
                }
            }
        }
        best
    }

    /// Numeric derivative of `kind` at `x`.
    ///
    /// The step is `derivative_step` times the length of the element holding
    /// `x`. A central stencil is used where it fits inside the beam, a
    /// one-sided one otherwise.
    pub fn derivative(
        &self,
        kind: ResponseKind,
        x: f64,
        order: u8,
    ) -> Result<Estimate, ValidationError> {
        self.check_position(x)?;

        let length = self.length();
        let element_length = self.elements[self.element_at(x)].length;
        let step = self.derivative_step * element_length;
        let method = DifferenceMethod::select(x, step, 0.0, length);
        let value = math::derivative(|t| self.evaluate(kind, t), x, order, method, step)?;

        let first = self.elements.first().map_or(length, |e| e.length);
        let last = self.elements.last().map_or(length, |e| e.length);
        let from_end = length - x;

        let warning = if x < first || from_end < last {
            let warning = if x <= from_end {
                PrecisionWarning {
                    position: x,
                    edge_distance: x,
                    element_length: first,
                }
            } else {
                PrecisionWarning {
                    position: x,
                    edge_distance: from_end,
                    element_length: last,
                }
            };
            log::warn!("{warning}");
            Some(warning)
        } else {
            None
        };

        Ok(Estimate {
            value,
            method,
            warning,
        })
    }
}

/// Largest relative mismatch between the response integrated to each
/// element's right node and that node's solved values.
fn nodal_mismatch(mesh: &Mesh, elements: &[ElementResponse], nodal: &[[f64; 2]]) -> f64 {
    let scale = |i: usize| nodal.iter().map(|n| n[i].abs()).fold(0.0, f64::max);
    let disp_scale = scale(0);
    let rot_scale = scale(1);
    let relative = |err: f64, scale: f64| if scale > 0.0 { err / scale } else { err };

    mesh.elements()
        .iter()
        .zip(elements)
        .map(|(element, response)| {
            let [v_j, theta_j] = nodal[element.j_node];
            let dv = (response.deflection(element.length) - v_j).abs();
            let dt = (response.slope(element.length) - theta_j).abs();
            relative(dv, disp_scale).max(relative(dt, rot_scale))
        })
        .fold(0.0, f64::max)
}
