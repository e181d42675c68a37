//! Thermodynamic models for binary solid/liquid systems.
//!
//! A [`BinarySystem`] pairs two pure [`Component`]s with the two measurements
//! that calibrate the mixing model: an [`Azeotrope`] and one
//! [`ExperimentalPoint`] tie line. [`SubregularCoefficients::fit`] turns those
//! into interaction coefficients, and [`MixingModel`] evaluates the normalized
//! mixing Gibbs energy of each [`Phase`] together with its composition
//! derivatives.
//!
//! All quantities are SI `f64` values (kelvin, J/mol, J/(mol·K)). The
//! [`units`] module converts from `uom` quantities at the API boundary.

mod coefficients;
mod component;
mod error;
mod mixing;
mod system;

pub mod units;

pub use coefficients::SubregularCoefficients;
pub use component::Component;
pub use error::ModelError;
pub use mixing::{MixingModel, Phase};
pub use system::{Azeotrope, BinarySystem, ExperimentalPoint, Side};

/// Molar gas constant in J/(mol·K).
pub const GAS_CONSTANT: f64 = 8.314_472;
