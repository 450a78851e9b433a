//! Error types for the beam solver

use thiserror::Error;

/// Input rejected while building or editing a beam
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("beam length must be positive and finite (received {0})")]
    NonPositiveLength(f64),

    #[error("Young's modulus must be positive and finite (received {0})")]
    NonPositiveModulus(f64),

    #[error("area moment of inertia must be positive and finite (received {0})")]
    NonPositiveInertia(f64),

    #[error("load magnitude must be finite (received {0})")]
    NonFiniteMagnitude(f64),

    #[error("location {location} is outside of the beam [0, {length}]")]
    LocationOutOfRange { location: f64, length: f64 },

    #[error("position {position} is outside of the beam [0, {length}]")]
    PositionOutOfRange { position: f64, length: f64 },

    #[error("derivative order must be 1 or 2 (received {0})")]
    UnsupportedDerivativeOrder(u8),
}

/// Failure of the reduced linear system at solve time
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("stiffness matrix is singular - beam is unstable or has insufficient supports ({free_dofs} free DOFs)")]
    Singular { free_dofs: usize },

    #[error("stiffness matrix is ill-conditioned (condition number {condition:e} exceeds {limit:e})")]
    IllConditioned { condition: f64, limit: f64 },

    #[error("more than one support at location {0}")]
    RedundantSupport(f64),
}

/// Main error type for beam operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BeamError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Solve failed: {0}")]
    Solver(#[from] SolverError),

    #[error("Beam not solved - run solve() first")]
    NotSolved,

    #[error("Reaction index {index} out of range ({count} reactions)")]
    ReactionNotFound { index: usize, count: usize },
}

/// Result type for beam operations
pub type BeamResult<T> = Result<T, BeamError>;
