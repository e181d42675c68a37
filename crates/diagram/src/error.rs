use std::fmt;

use thiserror::Error;
use tieline_solvers::bisection::{self, BracketError};
use tieline_thermo::ModelError;

/// The root search that failed while solving one diagram point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Finding the degenerate composition `zjL` where the driving force vanishes.
    DegeneratePoint,
    /// Bounding the liquid search segment away from the azeotrope.
    LiquidExtent,
    /// Bounding the solid search segment toward the pure component.
    SolidExtent,
    /// Finding the liquid composition with a trial slope.
    LiquidTangent,
    /// Finding the solid composition with a trial slope.
    SolidTangent,
    /// Refining the common slope.
    SlopeIteration,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::DegeneratePoint => "degenerate point",
            Stage::LiquidExtent => "liquid extent",
            Stage::SolidExtent => "solid extent",
            Stage::LiquidTangent => "liquid tangent",
            Stage::SolidTangent => "solid tangent",
            Stage::SlopeIteration => "slope iteration",
        };
        f.write_str(name)
    }
}

/// Errors that prevent solving a single temperature point.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PointError {
    /// The search interval does not straddle a root.
    #[error("{stage}: invalid bracket")]
    BracketInvalid {
        stage: Stage,
        #[source]
        source: BracketError,
    },

    /// A model function was not finite inside the search interval.
    #[error("{stage}: non-finite residual {residual} at x = {x}")]
    NonFinite { stage: Stage, x: f64, residual: f64 },

    /// The iteration cap was reached before convergence.
    #[error("{stage}: no convergence after {iters} iterations")]
    Diverged { stage: Stage, iters: usize },
}

impl PointError {
    pub(crate) fn from_bisection(stage: Stage, error: bisection::Error) -> Self {
        match error {
            bisection::Error::InvalidBracket(source) => Self::BracketInvalid { stage, source },
            bisection::Error::NonFiniteResidual { x, residual } => {
                Self::NonFinite { stage, x, residual }
            }
        }
    }

    /// Returns the search that failed.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::BracketInvalid { stage, .. }
            | Self::NonFinite { stage, .. }
            | Self::Diverged { stage, .. } => *stage,
        }
    }
}

/// Errors that can occur when computing a diagram or sampling curves.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The temperature step is not finite and positive, or is so fine that
    /// the grid would exceed its level limit.
    #[error("invalid temperature step {0}")]
    InvalidStep(f64),

    /// The composition sampling range is empty, outside `(0, 1)`, or holds
    /// more samples than the sampler allows.
    #[error("invalid sampling range: xmin = {xmin}, xmax = {xmax}, xstep = {xstep}")]
    InvalidRange { xmin: f64, xmax: f64, xstep: f64 },
}
