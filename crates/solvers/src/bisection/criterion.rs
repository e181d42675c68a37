/// The state a [`Criterion`] sees after each midpoint evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Iteration counter (1-based).
    pub iter: usize,
    /// The midpoint just evaluated.
    pub x: f64,
    /// The previous midpoint, or the far bracket end on the first iteration.
    pub previous: f64,
    /// `f(x) - target`.
    pub residual: f64,
}

/// Decides when a bisection has resolved its root well enough.
///
/// Closures taking a [`Step`] implement this trait.
pub trait Criterion {
    /// Returns true if the search should stop at this step.
    fn is_converged(&self, step: &Step) -> bool;
}

impl<F> Criterion for F
where
    F: Fn(&Step) -> bool,
{
    fn is_converged(&self, step: &Step) -> bool {
        self(step)
    }
}

/// Stops once `|f(x) - target| ≤ |bound(x)|`.
///
/// With `bound(x) = ΔG / f''(x)` the search stops as soon as the residual is
/// smaller than the error a constant absolute uncertainty `ΔG` would cause.
#[derive(Debug, Clone, Copy)]
pub struct ResidualBound<F>(F);

impl<F: Fn(f64) -> f64> ResidualBound<F> {
    /// Creates a residual criterion from a position-dependent bound.
    pub fn new(bound: F) -> Self {
        Self(bound)
    }
}

impl<F: Fn(f64) -> f64> Criterion for ResidualBound<F> {
    fn is_converged(&self, step: &Step) -> bool {
        step.residual.abs() <= (self.0)(step.x).abs()
    }
}

/// Stops once `|x - previous| < |bound(x)|`.
///
/// Useful when the precision of `x` is limited by an upstream uncertainty
/// rather than by the residual.
#[derive(Debug, Clone, Copy)]
pub struct StepBound<F>(F);

impl<F: Fn(f64) -> f64> StepBound<F> {
    /// Creates a step criterion from a position-dependent bound.
    pub fn new(bound: F) -> Self {
        Self(bound)
    }
}

impl<F: Fn(f64) -> f64> Criterion for StepBound<F> {
    fn is_converged(&self, step: &Step) -> bool {
        (step.x - step.previous).abs() < (self.0)(step.x).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(x: f64, previous: f64, residual: f64) -> Step {
        Step {
            iter: 1,
            x,
            previous,
            residual,
        }
    }

    #[test]
    fn residual_bound_uses_magnitudes() {
        let criterion = ResidualBound::new(|x: f64| -0.1 * x);

        assert!(criterion.is_converged(&step(1.0, 0.0, -0.05)));
        assert!(criterion.is_converged(&step(1.0, 0.0, 0.1)));
        assert!(!criterion.is_converged(&step(1.0, 0.0, 0.2)));
    }

    #[test]
    fn step_bound_is_strict() {
        let criterion = StepBound::new(|_| 0.25);

        assert!(criterion.is_converged(&step(1.0, 1.2, 10.0)));
        assert!(!criterion.is_converged(&step(1.0, 1.25, 0.0)));
    }

    #[test]
    fn closures_are_criteria() {
        let criterion = |step: &Step| step.iter >= 3;

        assert!(!criterion.is_converged(&step(0.0, 0.0, 0.0)));
        assert!(criterion.is_converged(&Step {
            iter: 3,
            ..step(0.0, 0.0, 0.0)
        }));
    }
}
