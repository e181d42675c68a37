use super::{Solution, Status};

/// The evaluated point with the smallest residual magnitude so far.
///
/// Seeded with the better bracket endpoint, so a solution is always available.
#[derive(Debug, Clone, Copy)]
pub(super) struct Best {
    x: f64,
    residual: f64,
}

impl Best {
    pub(super) fn new(x: f64, residual: f64) -> Self {
        Self { x, residual }
    }

    /// Replaces the stored point if `residual` is strictly smaller in magnitude.
    pub(super) fn update(&mut self, x: f64, residual: f64) {
        if residual.abs() < self.residual.abs() {
            self.x = x;
            self.residual = residual;
        }
    }

    pub(super) fn finish(self, status: Status, iters: usize) -> Solution {
        Solution::new(status, self.x, self.residual, iters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn update_keeps_smallest_residual() {
        let mut best = Best::new(1.0, 2.0);
        best.update(2.0, -1.5);
        best.update(3.0, 1.75);

        let solution = best.finish(Status::MaxIters, 2);

        assert_relative_eq!(solution.x, 2.0);
        assert_relative_eq!(solution.residual, -1.5);
        assert_eq!(solution.iters, 2);
    }

    #[test]
    fn ties_keep_the_earlier_point() {
        let mut best = Best::new(1.0, -0.5);
        best.update(2.0, 0.5);

        let solution = best.finish(Status::MaxIters, 1);

        assert_relative_eq!(solution.x, 1.0);
    }
}
