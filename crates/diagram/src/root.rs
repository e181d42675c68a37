use tieline_solvers::bisection::{self, Action, Criterion, Event, Status};
use tracing::trace;

use crate::{Config, PointError, Stage};

/// Solves `function(x) = target` on `bracket`, requiring convergence.
///
/// Every midpoint is traced at `trace` level under `stage`.
pub(crate) fn find_root<F, C>(
    stage: Stage,
    function: F,
    target: f64,
    bracket: [f64; 2],
    criterion: &C,
    config: &Config,
) -> Result<f64, PointError>
where
    F: Fn(f64) -> f64,
    C: Criterion + ?Sized,
{
    let observer = |event: &Event<'_>| -> Option<Action> {
        trace!(%stage, iter = event.iter, x = event.x, residual = event.residual);
        None
    };

    let solution = bisection::solve(
        function,
        target,
        bracket,
        criterion,
        config.bisection(),
        observer,
    )
    .map_err(|error| PointError::from_bisection(stage, error))?;

    match solution.status {
        Status::Converged => Ok(solution.x),
        Status::MaxIters | Status::StoppedByObserver => Err(PointError::Diverged {
            stage,
            iters: solution.iters,
        }),
    }
}
