//! Error-aware bisection for the tieline phase diagram solver.
//!
//! This crate provides the one root finder the diagram solver is built on:
//!
//! - [`bisection`]: classical bracket halving with a pluggable stopping
//!   [`Criterion`](bisection::Criterion), so a search can stop once its
//!   residual (or its step) falls below what the inputs can resolve
//! - [`Observer`]: receives solver events and optionally returns control actions

mod observer;

pub mod bisection;

pub use observer::Observer;
