use tieline_thermo::{BinarySystem, MixingModel, ModelError, Side, SubregularCoefficients};
use tracing::{debug, info, warn};

use crate::{
    BoundaryPoint, BranchFailure, Config, DiagramDataset, DiagramEntry, Error, solve_tie_line,
};

/// Fraction of the step within which two temperatures count as the same level.
const LEVEL_TOLERANCE: f64 = 1e-9;

/// Upper limit on `(T_upper - T_az) / step`.
const MAX_LEVELS: u32 = 1_000_000;

/// Computes both branches of the phase diagram.
///
/// The shared grid starts at the higher melting point and descends in steps
/// of `step` K, with the lower melting point inserted as a level of its own
/// and the azeotrope as the last level. The upper branch is solved first,
/// then the lower one. A level whose tie line cannot be found ends its own
/// branch only; see [`DiagramDataset::failure`].
///
/// # Errors
///
/// Returns [`Error::InvalidStep`] for a non-finite or non-positive step, or
/// one fine enough to exceed a million levels, and [`Error::Model`] if the
/// azeotrope is not below both melting points.
pub fn compute_diagram(
    system: &BinarySystem,
    coefficients: &SubregularCoefficients,
    step: f64,
    config: &Config,
) -> Result<DiagramDataset, Error> {
    if !step.is_finite() || step <= 0.0 {
        return Err(Error::InvalidStep(step));
    }

    let azeotrope = system.azeotrope().temperature;
    for side in [Side::Left, Side::Right] {
        let melting = system.component(side).transition_temperature();
        if azeotrope >= melting {
            return Err(ModelError::Domain {
                quantity: "azeotrope.temperature",
                value: azeotrope,
                reason: "must lie below both melting points",
            }
            .into());
        }
    }

    let upper = system.upper_side();
    let lower = upper.opposite();
    let upper_melting = system.component(upper).transition_temperature();
    if (upper_melting - azeotrope) / step > f64::from(MAX_LEVELS) {
        return Err(Error::InvalidStep(step));
    }

    let tolerance = step * LEVEL_TOLERANCE;
    let levels = temperature_levels(
        upper_melting,
        system.component(lower).transition_temperature(),
        azeotrope,
        step,
    );

    let model = MixingModel::new(system, *coefficients);
    let upper_sweep = sweep_branch(&model, upper, &levels, tolerance, config);
    let lower_sweep = sweep_branch(&model, lower, &levels, tolerance, config);
    let (left, right) = match upper {
        Side::Left => (upper_sweep, lower_sweep),
        Side::Right => (lower_sweep, upper_sweep),
    };

    let entries = levels
        .iter()
        .zip(left.points.into_iter().zip(right.points))
        .map(|(&temperature, (left, right))| DiagramEntry {
            temperature,
            left,
            right,
        })
        .collect();

    Ok(DiagramDataset::new(entries, left.failure, right.failure))
}

/// Builds the descending grid `upper - i·step` down to the azeotrope.
///
/// `lower` always appears as a level: a grid temperature within
/// `LEVEL_TOLERANCE·step` of it snaps to it, otherwise it is inserted in order.
fn temperature_levels(upper: f64, lower: f64, azeotrope: f64, step: f64) -> Vec<f64> {
    let tolerance = step * LEVEL_TOLERANCE;
    let mut levels = Vec::new();
    let mut has_lower = false;

    for i in 0..=MAX_LEVELS {
        let temperature = upper - f64::from(i) * step;
        if temperature <= azeotrope + tolerance {
            break;
        }

        if !has_lower && temperature < lower + tolerance {
            levels.push(lower);
            has_lower = true;
            if (temperature - lower).abs() <= tolerance {
                continue;
            }
        }
        levels.push(temperature);
    }

    if !has_lower && lower > azeotrope {
        levels.push(lower);
    }
    levels.push(azeotrope);
    levels
}

/// One branch over the shared grid.
struct BranchSweep {
    points: Vec<Option<BoundaryPoint>>,
    failure: Option<BranchFailure>,
}

/// Solves one branch over every level of the shared grid, stopping at the
/// first level whose tie line fails.
fn sweep_branch(
    model: &MixingModel<'_>,
    side: Side,
    levels: &[f64],
    tolerance: f64,
    config: &Config,
) -> BranchSweep {
    let system = model.system();
    let melting = system.component(side).transition_temperature();
    let azeotrope = system.azeotrope();

    let mut points = Vec::with_capacity(levels.len());
    let mut failure = None;
    for &temperature in levels {
        let point = if failure.is_some() || temperature > melting + tolerance {
            None
        } else if (temperature - melting).abs() <= tolerance {
            Some(BoundaryPoint::uniform(side.pure_composition()))
        } else if temperature <= azeotrope.temperature + tolerance {
            Some(BoundaryPoint::uniform(azeotrope.coordinate))
        } else {
            match solve_tie_line(model, temperature, side, config) {
                Ok(tie) => {
                    debug!(
                        ?side,
                        temperature,
                        liquidus = tie.liquidus,
                        solidus = tie.solidus,
                        iters = tie.iters,
                        "solved tie line"
                    );
                    Some(BoundaryPoint {
                        liquidus: tie.liquidus,
                        solidus: tie.solidus,
                        degenerate: tie.degenerate,
                    })
                }
                Err(error) => {
                    warn!(
                        ?side,
                        temperature,
                        stage = %error.stage(),
                        %error,
                        "tie line failed, ending branch"
                    );
                    failure = Some(BranchFailure { temperature, error });
                    None
                }
            }
        };
        points.push(point);
    }

    info!(
        ?side,
        points = points.iter().flatten().count(),
        complete = failure.is_none(),
        "branch finished"
    );
    BranchSweep { points, failure }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn grid_hits_both_melting_points() {
        let levels = temperature_levels(1200.0, 1000.0, 900.0, 1.0);

        assert_eq!(levels.len(), 301);
        assert_relative_eq!(levels[0], 1200.0);
        assert_relative_eq!(levels[200], 1000.0);
        assert_relative_eq!(levels[299], 901.0);
        assert_relative_eq!(levels[300], 900.0);
    }

    #[test]
    fn off_grid_lower_melting_point_is_inserted() {
        let levels = temperature_levels(1200.0, 1000.0, 900.0, 7.0);

        let position = levels
            .iter()
            .position(|&t| (t - 1000.0).abs() < 1e-12)
            .expect("lower melting point present");
        assert!(levels[position - 1] > 1000.0);
        assert!(levels[position + 1] < 1000.0);
        assert!(levels.windows(2).all(|pair| pair[0] > pair[1]));
        assert_relative_eq!(*levels.last().expect("non-empty"), 900.0);
        assert!(levels[levels.len() - 2] > 900.0);
    }

    #[test]
    fn equal_melting_points_share_the_first_level() {
        let levels = temperature_levels(1000.0, 1000.0, 900.0, 50.0);

        assert_eq!(levels, vec![1000.0, 950.0, 900.0]);
    }

    #[test]
    fn grid_is_computed_by_multiplication() {
        let levels = temperature_levels(1200.0, 1000.0, 900.0, 0.1);

        assert_eq!(levels.len(), 3001);
        #[allow(clippy::float_cmp)]
        for (i, &t) in levels[..2000].iter().enumerate() {
            assert_eq!(t, 1200.0 - i as f64 * 0.1);
        }
    }
}
