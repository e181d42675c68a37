use thiserror::Error;
use tieline_solvers::bisection;

/// Tolerances for the phase diagram computation.
///
/// - `delta_t`: temperature uncertainty in K, propagated into the composition
///   resolution of the degenerate point
/// - `delta_g`: normalized energy resolution, which bounds slope residuals
///   and sets the exclusion zone around the degenerate point
/// - `epsilon`: composition margin kept from 0, 1 and the azeotrope, and the
///   step below which tie-line compositions count as settled
/// - `max_tangent_iters`: cap on slope refinements per temperature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    delta_t: f64,
    delta_g: f64,
    epsilon: f64,
    max_tangent_iters: usize,
    bisection: bisection::Config,
}

/// Errors that can occur when validating a diagram config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("delta_t must be finite and positive")]
    DeltaT,

    #[error("delta_g must be finite and positive")]
    DeltaG,

    #[error("epsilon must lie strictly between 0 and 0.5")]
    Epsilon,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delta_t: 0.005,
            delta_g: 5e-8,
            epsilon: 1e-8,
            max_tangent_iters: 200,
            bisection: bisection::Config::default(),
        }
    }
}

impl Config {
    /// Creates a new config with validated tolerances.
    ///
    /// # Errors
    ///
    /// Returns an error if `delta_t` or `delta_g` is not finite and positive,
    /// or if `epsilon` is outside `(0, 0.5)`.
    pub fn new(
        delta_t: f64,
        delta_g: f64,
        epsilon: f64,
        max_tangent_iters: usize,
        bisection: bisection::Config,
    ) -> Result<Self, ConfigError> {
        if !delta_t.is_finite() || delta_t <= 0.0 {
            return Err(ConfigError::DeltaT);
        }
        if !delta_g.is_finite() || delta_g <= 0.0 {
            return Err(ConfigError::DeltaG);
        }
        if !(epsilon > 0.0 && epsilon < 0.5) {
            return Err(ConfigError::Epsilon);
        }

        Ok(Self {
            delta_t,
            delta_g,
            epsilon,
            max_tangent_iters,
            bisection,
        })
    }

    #[must_use]
    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }

    #[must_use]
    pub fn delta_g(&self) -> f64 {
        self.delta_g
    }

    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    #[must_use]
    pub fn max_tangent_iters(&self) -> usize {
        self.max_tangent_iters
    }

    /// Returns the config shared by every inner bisection.
    #[must_use]
    pub fn bisection(&self) -> &bisection::Config {
        &self.bisection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_tolerances() {
        let config = Config::default();
        let rebuilt = Config::new(0.005, 5e-8, 1e-8, 200, bisection::Config::default())
            .expect("known-good values");

        assert_eq!(config, rebuilt);
    }

    #[test]
    fn rejects_bad_tolerances() {
        let bisection = bisection::Config::default();

        assert_eq!(
            Config::new(0.0, 5e-8, 1e-8, 200, bisection),
            Err(ConfigError::DeltaT)
        );
        assert_eq!(
            Config::new(0.005, f64::NAN, 1e-8, 200, bisection),
            Err(ConfigError::DeltaG)
        );
        assert_eq!(
            Config::new(0.005, 5e-8, 0.5, 200, bisection),
            Err(ConfigError::Epsilon)
        );
        assert_eq!(
            Config::new(0.005, 5e-8, -1e-8, 200, bisection),
            Err(ConfigError::Epsilon)
        );
    }
}
