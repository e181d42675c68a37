//! Common-tangent construction at a single temperature.
//!
//! # Algorithm
//!
//! On each side of the azeotrope the liquid and solid curves cross the
//! degenerate composition `zjL`, where neither phase is favored. A tie line
//! has its liquidus on the azeotrope side of `zjL` and its solidus on the
//! pure-component side. The solver:
//!
//! 1. finds `zjL` and clears an exclusion zone `ΔZ` around it, sized by the
//!    curvatures so that slopes inside it are indistinguishable at `ΔG`
//! 2. bounds the liquid and solid search segments by the compositions whose
//!    slopes match the opposite phase's near-`zjL` slope
//! 3. bisects the common slope `K`: for a trial `K` it solves
//!    `dG_L(xL) = K` and `dG_S(xS) = K` on the segments, then keeps the half
//!    of the slope bracket indicated by the sign of the tangent mismatch
//!
//! The loop stops once both curves' slopes match the previous secant within
//! `ΔG` and neither composition moved by more than `epsilon`.

mod state;

use tieline_solvers::bisection::ResidualBound;
use tieline_thermo::{MixingModel, Phase, Side};
use tracing::trace;

use crate::{Config, PointError, Stage, root::find_root, solve_degenerate_point};

use state::{Branch, State};

/// A converged tie line at one temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TieLine {
    /// Composition of the liquid end.
    pub liquidus: f64,
    /// Composition of the solid end.
    pub solidus: f64,
    /// The degenerate composition `zjL` between them.
    pub degenerate: f64,
    /// The final common slope.
    pub slope: f64,
    /// Slope of the secant through the previous trial points.
    pub secant_slope: f64,
    /// How far the liquidus moved on the last refinement.
    pub liquidus_step: f64,
    /// How far the solidus moved on the last refinement.
    pub solidus_step: f64,
    /// Number of slope refinements.
    pub iters: usize,
}

/// Finds the tie line of `side` at `temperature`.
///
/// `temperature` must lie strictly between the azeotrope temperature and the
/// melting point of the component on `side`.
///
/// # Errors
///
/// Returns [`PointError`] naming the [`Stage`] that failed: an inner root
/// that is not bracketed, a non-finite model value, or a search that ran out
/// of iterations.
pub fn solve_tie_line(
    model: &MixingModel<'_>,
    temperature: f64,
    side: Side,
    config: &Config,
) -> Result<TieLine, PointError> {
    let branch = Branch::new(model.system(), side, config.epsilon());
    let curves = Curves {
        model,
        temperature,
        config,
    };
    let d = branch.direction;
    let delta_g = config.delta_g();
    let epsilon = config.epsilon();

    let degenerate =
        solve_degenerate_point(model, temperature, [branch.azeotrope, branch.outer], config)?;

    let liquid_curvature = curves.curvature(Phase::Liquid, degenerate);
    let solid_curvature = curves.curvature(Phase::Solid, degenerate);
    let exclusion = (delta_g / solid_curvature)
        .abs()
        .min((delta_g / liquid_curvature).abs());

    let liquid_near = degenerate - d * exclusion;
    let solid_near = degenerate + d * exclusion;
    let liquid_slope = curves.slope(Phase::Liquid, liquid_near);
    let solid_slope = curves.slope(Phase::Solid, solid_near);

    let liquid_extent = curves.root(
        Phase::Liquid,
        Stage::LiquidExtent,
        solid_slope + solid_curvature * exclusion,
        [branch.azeotrope + d * epsilon, liquid_near],
    )?;
    let solid_extent = curves.root(
        Phase::Solid,
        Stage::SolidExtent,
        liquid_slope - liquid_curvature * exclusion,
        [solid_near, branch.outer],
    )?;

    let segments = Segments {
        liquid: [
            liquid_extent + d * delta_g / curves.curvature(Phase::Liquid, liquid_extent),
            liquid_near,
        ],
        solid: [
            solid_near,
            solid_extent - d * delta_g / curves.curvature(Phase::Solid, solid_extent),
        ],
    };

    let slopes = branch.slope_bracket(liquid_slope, solid_slope);
    let slope = slopes.midpoint();
    let (liquidus, solidus) = curves.tangent_points(slope, &segments)?;
    let mut state = State {
        slopes,
        slope,
        liquidus,
        solidus,
    };

    for iter in 1..=config.max_tangent_iters() {
        let mismatch = curves.mismatch(side, &state);
        state.slopes.narrow(state.slope, mismatch);

        let slope = state.slopes.midpoint();
        let (liquidus, solidus) = curves.tangent_points(slope, &segments)?;

        let secant = (curves.energy(Phase::Liquid, state.liquidus)
            - curves.energy(Phase::Solid, state.solidus))
            / (state.liquidus - state.solidus);

        trace!(temperature, iter, slope, secant, liquidus, solidus);

        let liquidus_step = (liquidus - state.liquidus).abs();
        let solidus_step = (solidus - state.solidus).abs();
        let settled = (curves.slope(Phase::Liquid, liquidus) - secant).abs() < delta_g
            && (curves.slope(Phase::Solid, solidus) - secant).abs() < delta_g
            && liquidus_step < epsilon
            && solidus_step < epsilon;

        if settled {
            return Ok(TieLine {
                liquidus,
                solidus,
                degenerate,
                slope,
                secant_slope: secant,
                liquidus_step,
                solidus_step,
                iters: iter,
            });
        }

        state.slope = slope;
        state.liquidus = liquidus;
        state.solidus = solidus;
    }

    Err(PointError::Diverged {
        stage: Stage::SlopeIteration,
        iters: config.max_tangent_iters(),
    })
}

/// Composition intervals searched for each end of the tie line.
#[derive(Debug, Clone, Copy)]
struct Segments {
    liquid: [f64; 2],
    solid: [f64; 2],
}

/// Both phase curves at a fixed temperature.
struct Curves<'m, 'a> {
    model: &'m MixingModel<'a>,
    temperature: f64,
    config: &'m Config,
}

impl Curves<'_, '_> {
    fn energy(&self, phase: Phase, x: f64) -> f64 {
        self.model.energy(phase, self.temperature, x)
    }

    fn slope(&self, phase: Phase, x: f64) -> f64 {
        self.model.slope(phase, self.temperature, x)
    }

    fn curvature(&self, phase: Phase, x: f64) -> f64 {
        self.model.curvature(phase, self.temperature, x)
    }

    /// Solves `slope(phase, x) = target`, resolved to `ΔG / curvature`.
    fn root(
        &self,
        phase: Phase,
        stage: Stage,
        target: f64,
        bracket: [f64; 2],
    ) -> Result<f64, PointError> {
        let delta_g = self.config.delta_g();
        let criterion = ResidualBound::new(|x| delta_g / self.curvature(phase, x));

        find_root(
            stage,
            |x| self.slope(phase, x),
            target,
            bracket,
            &criterion,
            self.config,
        )
    }

    /// Returns the liquid and solid compositions where each curve has `slope`.
    fn tangent_points(&self, slope: f64, segments: &Segments) -> Result<(f64, f64), PointError> {
        let liquidus = self.root(Phase::Liquid, Stage::LiquidTangent, slope, segments.liquid)?;
        let solidus = self.root(Phase::Solid, Stage::SolidTangent, slope, segments.solid)?;
        Ok((liquidus, solidus))
    }

    /// Returns `G_high(x_high) - G_low(x_low) - slope·(x_high - x_low)`.
    fn mismatch(&self, side: Side, state: &State) -> f64 {
        let liquid = (self.energy(Phase::Liquid, state.liquidus), state.liquidus);
        let solid = (self.energy(Phase::Solid, state.solidus), state.solidus);
        let ((low_energy, low_x), (high_energy, high_x)) = match side {
            Side::Right => (liquid, solid),
            Side::Left => (solid, liquid),
        };

        high_energy - low_energy - state.slope * (high_x - low_x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use tieline_solvers::bisection::BracketError;
    use tieline_thermo::{
        Azeotrope, BinarySystem, Component, ExperimentalPoint, SubregularCoefficients,
    };

    fn system(liquidus: f64, solidus: f64) -> BinarySystem {
        BinarySystem::new(
            Component::new("A", 1000.0, 10_000.0, 10.0, 0.0).expect("valid"),
            Component::new("B", 1200.0, 12_000.0, 10.0, 0.0).expect("valid"),
            Azeotrope {
                temperature: 900.0,
                coordinate: 0.5,
            },
            ExperimentalPoint {
                temperature: 950.0,
                liquidus,
                solidus,
            },
        )
        .expect("valid system")
    }

    fn assert_common_tangent(model: &MixingModel<'_>, temperature: f64, tie: &TieLine) {
        let config = Config::default();
        let liquid = model.slope(Phase::Liquid, temperature, tie.liquidus);
        let solid = model.slope(Phase::Solid, temperature, tie.solidus);

        assert!((liquid - tie.secant_slope).abs() < config.delta_g());
        assert!((solid - tie.secant_slope).abs() < config.delta_g());
        assert!(tie.liquidus_step < config.epsilon());
        assert!(tie.solidus_step < config.epsilon());
    }

    #[test]
    fn solves_left_branch_near_melting_point() {
        let system = system(0.228, 0.176);
        let coefficients = SubregularCoefficients::fit(&system).expect("should fit");
        let model = MixingModel::new(&system, coefficients);

        let tie = solve_tie_line(&model, 999.0, Side::Left, &Config::default())
            .expect("should converge");

        assert_relative_eq!(tie.liquidus, 0.005_579_4, max_relative = 1e-4);
        assert_relative_eq!(tie.solidus, 0.004_373_4, max_relative = 1e-4);
        assert_relative_eq!(tie.degenerate, 0.004_959_1, max_relative = 1e-3);
        assert!(tie.solidus < tie.degenerate && tie.degenerate < tie.liquidus);
        assert_common_tangent(&model, 999.0, &tie);
    }

    #[test]
    fn solves_right_branch_with_liquid_below_solid() {
        let system = system(0.228, 0.176);
        let coefficients = SubregularCoefficients::fit(&system).expect("should fit");
        let model = MixingModel::new(&system, coefficients);

        for temperature in [1150.0, 1000.0, 920.0] {
            let tie = solve_tie_line(&model, temperature, Side::Right, &Config::default())
                .expect("should converge");

            assert!(0.5 < tie.liquidus && tie.liquidus < tie.degenerate);
            assert!(tie.degenerate < tie.solidus && tie.solidus < 1.0);
            assert_common_tangent(&model, temperature, &tie);
        }
    }

    #[test]
    fn symmetric_system_mirrors_branches() {
        let component = Component::new("A", 1000.0, 10_000.0, 10.0, 0.0).expect("valid");
        let system = BinarySystem::new(
            component.clone(),
            component,
            Azeotrope {
                temperature: 900.0,
                coordinate: 0.5,
            },
            ExperimentalPoint {
                temperature: 950.0,
                liquidus: 0.2,
                solidus: 0.15,
            },
        )
        .expect("valid system");
        let coefficients = SubregularCoefficients {
            c0: -4000.0,
            c1: 0.0,
            a0: 0.0,
            a1: 0.0,
        };
        let model = MixingModel::new(&system, coefficients);
        let config = Config::default();

        let left = solve_tie_line(&model, 950.0, Side::Left, &config).expect("left converges");
        let right = solve_tie_line(&model, 950.0, Side::Right, &config).expect("right converges");

        assert_relative_eq!(left.liquidus, 0.167_548, max_relative = 1e-4);
        assert_relative_eq!(left.solidus, 0.125_668, max_relative = 1e-4);
        assert_relative_eq!(left.liquidus, 1.0 - right.liquidus, epsilon = 1e-7);
        assert_relative_eq!(left.solidus, 1.0 - right.solidus, epsilon = 1e-7);
    }

    #[test]
    fn straddling_calibration_loses_the_liquid_extent() {
        let system = system(0.4, 0.6);
        let coefficients = SubregularCoefficients::fit(&system).expect("should fit");
        let model = MixingModel::new(&system, coefficients);

        let result = solve_tie_line(&model, 1178.0, Side::Right, &Config::default());

        assert_eq!(
            result,
            Err(PointError::BracketInvalid {
                stage: Stage::LiquidExtent,
                source: BracketError::NoSignChange,
            })
        );
    }

    #[test]
    fn zero_slope_iterations_diverge() {
        let system = system(0.228, 0.176);
        let coefficients = SubregularCoefficients::fit(&system).expect("should fit");
        let model = MixingModel::new(&system, coefficients);
        let config = Config::new(
            0.005,
            5e-8,
            1e-8,
            0,
            tieline_solvers::bisection::Config::default(),
        )
        .expect("valid config");

        let result = solve_tie_line(&model, 999.0, Side::Left, &config);

        assert_eq!(
            result,
            Err(PointError::Diverged {
                stage: Stage::SlopeIteration,
                iters: 0,
            })
        );
    }
}
