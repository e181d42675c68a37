use tieline_solvers::bisection::StepBound;
use tieline_thermo::MixingModel;

use crate::{Config, PointError, Stage, root::find_root};

/// Finds the degenerate composition `zjL` where the driving force vanishes.
///
/// The search runs on `bracket` and stops once consecutive midpoints are
/// closer than the composition uncertainty implied by `config.delta_t()`.
/// The second bracket entry seeds the first step, so pass the far end of the
/// search (usually the pure component's margin) last.
///
/// # Errors
///
/// Returns [`PointError::BracketInvalid`] if the driving force has the same
/// sign at both ends, or [`PointError::Diverged`] if the bisection cap is
/// reached first.
pub fn solve_degenerate_point(
    model: &MixingModel<'_>,
    temperature: f64,
    bracket: [f64; 2],
    config: &Config,
) -> Result<f64, PointError> {
    let delta_t = config.delta_t();
    let criterion = StepBound::new(|x| model.composition_error(temperature, x, delta_t));

    find_root(
        Stage::DegeneratePoint,
        |x| model.driving_force(temperature, x),
        0.0,
        bracket,
        &criterion,
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use tieline_solvers::bisection::BracketError;
    use tieline_thermo::{
        Azeotrope, BinarySystem, Component, ExperimentalPoint, SubregularCoefficients,
    };

    fn system() -> BinarySystem {
        BinarySystem::new(
            Component::new("A", 1000.0, 10_000.0, 10.0, 0.0).expect("valid"),
            Component::new("B", 1200.0, 12_000.0, 10.0, 0.0).expect("valid"),
            Azeotrope {
                temperature: 900.0,
                coordinate: 0.5,
            },
            ExperimentalPoint {
                temperature: 950.0,
                liquidus: 0.228,
                solidus: 0.176,
            },
        )
        .expect("valid system")
    }

    #[test]
    fn resolves_within_propagated_uncertainty() {
        let system = system();
        let coefficients = SubregularCoefficients::fit(&system).expect("should fit");
        let model = MixingModel::new(&system, coefficients);
        let config = Config::default();

        let zj = solve_degenerate_point(&model, 999.0, [0.5, 1e-8], &config)
            .expect("left branch point");

        assert_relative_eq!(zj, 0.004_959_1, max_relative = 1e-3);
        let tolerance = model.composition_error(999.0, zj, config.delta_t()).abs();
        assert!(model.driving_force(999.0, zj).abs() < 1e-3);
        assert!(tolerance > 0.0 && tolerance < 1e-4);
    }

    #[test]
    fn same_sign_bracket_is_rejected() {
        let system = system();
        let coefficients = SubregularCoefficients::fit(&system).expect("should fit");
        let model = MixingModel::new(&system, coefficients);

        // Above the left melting point the driving force is negative across the left side.
        let result = solve_degenerate_point(&model, 1100.0, [0.5, 1e-8], &Config::default());

        assert_eq!(
            result,
            Err(PointError::BracketInvalid {
                stage: Stage::DegeneratePoint,
                source: BracketError::NoSignChange,
            })
        );
    }
}
