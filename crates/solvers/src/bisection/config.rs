use thiserror::Error;

/// Configuration for the bisection solver.
///
/// Convergence itself is decided by the caller's [`Criterion`](super::Criterion);
/// the config only bounds the work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    x_abs_tol: f64,
}

/// Errors that can occur when validating a bisection config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("x_abs_tol must be finite and non-negative")]
    XAbs,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 200,
            x_abs_tol: 1e-15,
        }
    }
}

impl Config {
    /// Creates a new config.
    ///
    /// # Errors
    ///
    /// Returns an error if `x_abs_tol` is negative or non-finite.
    pub fn new(max_iters: usize, x_abs_tol: f64) -> Result<Self, ConfigError> {
        if !x_abs_tol.is_finite() || x_abs_tol < 0.0 {
            return Err(ConfigError::XAbs);
        }

        Ok(Self {
            max_iters,
            x_abs_tol,
        })
    }

    /// Returns the maximum number of halvings.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the bracket width below which the search stops regardless of
    /// the criterion.
    #[must_use]
    pub fn x_abs_tol(&self) -> f64 {
        self.x_abs_tol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_tolerance() {
        assert_eq!(Config::new(10, -1.0), Err(ConfigError::XAbs));
        assert_eq!(Config::new(10, f64::NAN), Err(ConfigError::XAbs));
        assert!(Config::new(0, 0.0).is_ok());
    }
}
