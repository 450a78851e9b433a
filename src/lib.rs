//! Beam FEM - finite element analysis of a single straight beam
//!
//! A beam is described by its length, Young's modulus, area moment of
//! inertia, a set of concentrated loads and a set of supports. The solver
//! supports:
//! - Point forces and point moments
//! - Fixed and pinned supports
//! - Euler-Bernoulli beam elements meshed at every load and support
//! - Closed-form shear, moment, slope and deflection along the beam
//!
//! Forces and displacements are positive up, moments and rotations positive
//! counter-clockwise, internal bending moment positive sagging.
//!
//! ## Example
//! ```rust
//! use beam_fem::prelude::*;
//!
//! let mut beam = Beam::new(
//!     30.0,
//!     vec![Load::point(-100.0, 15.0)],
//!     vec![Reaction::pinned(0.0), Reaction::pinned(30.0)],
//! )
//! .unwrap();
//!
//! beam.solve().unwrap();
//!
//! assert!((beam.reaction_force(0).unwrap() - 50.0).abs() < 1e-9);
//! assert!((beam.moment(15.0).unwrap() - 750.0).abs() < 1e-9);
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod mesh;
pub mod model;
pub mod response;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::SolverOptions;
    pub use crate::elements::{BoundaryCondition, Reaction, ReactionKind};
    pub use crate::error::{BeamError, BeamResult, SolverError, ValidationError};
    pub use crate::loads::{Load, LoadKind};
    pub use crate::math::DifferenceMethod;
    pub use crate::mesh::Mesh;
    pub use crate::model::{Beam, BeamState};
    pub use crate::response::{Estimate, PrecisionWarning, ResponseField, ResponseKind};
    pub use crate::results::{AnalysisSummary, Extreme, NodeDisplacement, ReactionResult};
}
