//! Binary solid/liquid phase diagrams by common-tangent construction.
//!
//! Given a calibrated [`MixingModel`](tieline_thermo::MixingModel), this crate
//! finds the liquidus and solidus compositions that share a common tangent at
//! each temperature between a pure component's melting point and the
//! azeotrope, and assembles both branches into a [`DiagramDataset`].
//!
//! Every root is found by bisection with an error-aware stopping rule, so the
//! results are resolved only as finely as the temperature and energy
//! tolerances in [`Config`] justify.
//!
//! # Example
//!
//! ```
//! use tieline_diagram::{Config, compute_diagram};
//! use tieline_thermo::{Azeotrope, BinarySystem, Component, ExperimentalPoint, SubregularCoefficients};
//!
//! let system = BinarySystem::new(
//!     Component::new("A", 1000.0, 10_000.0, 10.0, 0.0)?,
//!     Component::new("B", 1200.0, 12_000.0, 10.0, 0.0)?,
//!     Azeotrope { temperature: 900.0, coordinate: 0.5 },
//!     ExperimentalPoint { temperature: 950.0, liquidus: 0.228, solidus: 0.176 },
//! )?;
//! let coefficients = SubregularCoefficients::fit(&system)?;
//! let diagram = compute_diagram(&system, &coefficients, 10.0, &Config::default())?;
//!
//! assert_eq!(diagram.entries().first().map(|entry| entry.temperature), Some(1200.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod dataset;
mod degenerate;
mod error;
mod root;
mod sample;
mod sweep;
mod tangent;

pub use config::{Config, ConfigError};
pub use dataset::{BoundaryPoint, BranchFailure, DiagramDataset, DiagramEntry};
pub use degenerate::solve_degenerate_point;
pub use error::{Error, PointError, Stage};
pub use sample::{GxCurveSample, SampleRange, sample_mixing_energy};
pub use sweep::compute_diagram;
pub use tangent::{TieLine, solve_tie_line};
