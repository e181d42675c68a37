//! Bisection for `f(x) = target` on a bracketed interval.
//!
//! # Algorithm
//!
//! The solver evaluates `f` at both bracket endpoints, checks that the
//! residuals `f(x) - target` change sign, then repeatedly evaluates the
//! midpoint and keeps the half whose endpoints still straddle the target.
//! The function only needs to be continuous and monotone on the bracket.
//!
//! # Stopping
//!
//! There is no fixed x tolerance. Each midpoint is handed to a [`Criterion`],
//! which decides whether the search has resolved the root as well as the
//! caller's inputs allow:
//!
//! - [`ResidualBound`] stops once `|f(mid) - target|` is within a bound that
//!   may depend on `mid` (for example `|ΔG / f''(mid)|`)
//! - [`StepBound`] stops once the distance between consecutive midpoints is
//!   below a bound that may depend on `mid`
//!
//! A bracket that has shrunk below [`Config::x_abs_tol`] also counts as
//! converged, and [`Config::max_iters`] caps the number of halvings. A solve
//! that hits the cap reports the evaluated point with the smallest residual.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per midpoint, before the bracket shrinks.
//! Observers can return [`Action::StopEarly`] to halt immediately.

mod action;
mod best;
mod bracket;
mod config;
mod criterion;
mod error;
mod event;
mod solution;


pub use action::Action;
pub use bracket::{Bracket, BracketError, Sign};
pub use config::{Config, ConfigError};
pub use criterion::{Criterion, ResidualBound, Step, StepBound};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use crate::Observer;

use best::Best;
use bracket::Bounds;

/// Finds `x` in `bracket` such that `function(x) = target`.
///
/// The second element of `bracket` seeds the "previous" position seen by
/// [`StepBound`] on the first iteration, so callers that care about step
/// size should pass the far end of the search last.
///
/// # Errors
///
/// Returns an error if the bracket is non-finite, has zero width, or does
/// not straddle the target, or if `function` returns a non-finite value.
pub fn solve<F, C, Obs>(
    function: F,
    target: f64,
    bracket: [f64; 2],
    criterion: &C,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    F: Fn(f64) -> f64,
    C: Criterion + ?Sized,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let far = bracket[1];
    let bounds = Bounds::new(bracket)?;
    let [left, right] = bounds.as_array();

    let left_residual = residual(&function, left, target)?;
    let right_residual = residual(&function, right, target)?;

    #[allow(clippy::float_cmp)]
    for (x, value) in [(left, left_residual), (right, right_residual)] {
        if value == 0.0 {
            return Ok(Solution::new(Status::Converged, x, value, 0));
        }
    }

    let mut bracket = Bracket::new(bounds, Sign::of(left_residual), Sign::of(right_residual))?;

    let mut best = Best::new(left, left_residual);
    best.update(right, right_residual);
    let mut previous = far;

    for iter in 1..=config.max_iters() {
        let x = bracket.midpoint();
        let value = residual(&function, x, target)?;
        best.update(x, value);

        let event = Event {
            iter,
            bracket: &bracket,
            x,
            residual: value,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution::new(Status::StoppedByObserver, x, value, iter));
        }

        let step = Step {
            iter,
            x,
            previous,
            residual: value,
        };
        if criterion.is_converged(&step) {
            return Ok(Solution::new(Status::Converged, x, value, iter));
        }

        bracket.shrink(x, Sign::of(value));
        if bracket.is_x_converged(config.x_abs_tol()) {
            return Ok(Solution::new(Status::Converged, x, value, iter));
        }

        previous = x;
    }

    Ok(best.finish(Status::MaxIters, config.max_iters()))
}

/// Runs bisection without observation.
///
/// # Errors
///
/// Returns an error if the bracket is non-finite, has zero width, or does
/// not straddle the target, or if `function` returns a non-finite value.
pub fn solve_unobserved<F, C>(
    function: F,
    target: f64,
    bracket: [f64; 2],
    criterion: &C,
    config: &Config,
) -> Result<Solution, Error>
where
    F: Fn(f64) -> f64,
    C: Criterion + ?Sized,
{
    solve(function, target, bracket, criterion, config, ())
}

/// Evaluates `function(x) - target`, rejecting non-finite values.
fn residual<F: Fn(f64) -> f64>(function: &F, x: f64, target: f64) -> Result<f64, Error> {
    let value = function(x) - target;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFiniteResidual { x, residual: value })
    }
}
