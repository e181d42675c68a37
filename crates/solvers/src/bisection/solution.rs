/// Indicates whether the solver converged or hit the iteration limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The criterion accepted the estimate, or the bracket collapsed.
    Converged,
    /// Reached the iteration limit without converging.
    MaxIters,
    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a bisection solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Final solver status.
    pub status: Status,
    /// Estimate of the root.
    pub x: f64,
    /// `f(x) - target` at the estimate.
    pub residual: f64,
    /// Iteration count when the solver finished.
    pub iters: usize,
}

impl Solution {
    pub(super) fn new(status: Status, x: f64, residual: f64, iters: usize) -> Self {
        Self {
            status,
            x,
            residual,
            iters,
        }
    }

    /// Returns true if the solver converged.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}
