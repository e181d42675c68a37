use super::Bracket;

/// Iteration event emitted by the bisection solver.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// Iteration counter (1-based).
    pub iter: usize,
    /// Bracket that produced this midpoint, before it shrinks.
    pub bracket: &'a Bracket,
    /// The midpoint just evaluated.
    pub x: f64,
    /// `f(x) - target` at the midpoint.
    pub residual: f64,
}
