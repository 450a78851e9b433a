//! Finite difference derivatives of sampled functions

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Finite difference stencil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifferenceMethod {
    /// Symmetric stencil around `x0`
    Central,
    /// One-sided stencil using points at and right of `x0`
    Forward,
    /// One-sided stencil using points at and left of `x0`
    Backward,
}

impl DifferenceMethod {
    /// Pick the most accurate stencil that stays inside `[lower, upper]`
    pub fn select(x0: f64, step: f64, lower: f64, upper: f64) -> Self {
        if x0 - step >= lower && x0 + step <= upper {
            DifferenceMethod::Central
        } else if x0 - lower <= upper - x0 {
            DifferenceMethod::Forward
        } else {
            DifferenceMethod::Backward
        }
    }
}

/// First or second derivative of `func` at `x0` with step `step`.
///
/// Central stencils are second order accurate. The one-sided stencils are
/// second order as well but with larger error constants, and they sample up
/// to `3 * step` away from `x0`.
pub fn derivative<F>(
    func: F,
    x0: f64,
    order: u8,
    method: DifferenceMethod,
    step: f64,
) -> Result<f64, ValidationError>
where
    F: Fn(f64) -> f64,
{
    let h = step;
    let value = match (order, method) {
        (1, DifferenceMethod::Central) => (func(x0 + h) - func(x0 - h)) / (2.0 * h),
        (1, DifferenceMethod::Forward) => {
            (-3.0 * func(x0) + 4.0 * func(x0 + h) - func(x0 + 2.0 * h)) / (2.0 * h)
        }
        (1, DifferenceMethod::Backward) => {
            (3.0 * func(x0) - 4.0 * func(x0 - h) + func(x0 - 2.0 * h)) / (2.0 * h)
        }
        (2, DifferenceMethod::Central) => {
            (func(x0 + h) - 2.0 * func(x0) + func(x0 - h)) / (h * h)
        }
        (2, DifferenceMethod::Forward) => {
            (2.0 * func(x0) - 5.0 * func(x0 + h) + 4.0 * func(x0 + 2.0 * h)
                - func(x0 + 3.0 * h))
                / (h * h)
        }
        (2, DifferenceMethod::Backward) => {
            (2.0 * func(x0) - 5.0 * func(x0 - h) + 4.0 * func(x0 - 2.0 * h)
                - func(x0 - 3.0 * h))
                / (h * h)
        }
        (other, _) => return Err(ValidationError::UnsupportedDerivativeOrder(other)),
    };
    Ok(value)
}
