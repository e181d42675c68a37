use thiserror::Error;

/// Errors raised while building or calibrating a thermodynamic model.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ModelError {
    /// An input lies outside the domain where the model is defined.
    ///
    /// For example, a zero transition entropy or a composition outside `(0, 1)`.
    #[error("`{quantity}` = {value} is outside the model domain: {reason}")]
    Domain {
        quantity: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The calibration equations have no unique solution.
    ///
    /// Raised when the 2×2 system for `a0`, `a1` is numerically singular or
    /// its solution is not finite.
    #[error("calibration system is singular (determinant {determinant:e})")]
    NumericalSingularity { determinant: f64 },
}

impl ModelError {
    pub(crate) fn domain(quantity: &'static str, value: f64, reason: &'static str) -> Self {
        Self::Domain {
            quantity,
            value,
            reason,
        }
    }
}

/// Checks that `value` is finite.
pub(crate) fn finite(quantity: &'static str, value: f64) -> Result<f64, ModelError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::domain(quantity, value, "must be finite"))
    }
}

/// Checks that `value` is finite and strictly positive.
pub(crate) fn positive(quantity: &'static str, value: f64) -> Result<f64, ModelError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ModelError::domain(quantity, value, "must be finite and positive"))
    }
}

/// Checks that `value` is a mole fraction strictly inside `(0, 1)`.
pub(crate) fn mole_fraction(quantity: &'static str, value: f64) -> Result<f64, ModelError> {
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(ModelError::domain(quantity, value, "must lie strictly between 0 and 1"))
    }
}
