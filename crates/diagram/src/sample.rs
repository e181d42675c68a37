use tieline_thermo::{MixingModel, Phase};

use crate::Error;

/// Slack on the sample count so that ranges landing on `xmax` keep it.
const COUNT_SLACK: f64 = 1e-9;

/// Upper limit on the number of samples in a range.
const MAX_SAMPLES: u32 = 1_000_000;

/// Both phase curves and their slopes at one composition.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GxCurveSample {
    pub x: f64,
    pub liquid: f64,
    pub solid: f64,
    pub liquid_slope: f64,
    pub solid_slope: f64,
}

/// An evenly spaced composition grid inside `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRange {
    xmin: f64,
    xmax: f64,
    xstep: f64,
}

impl Default for SampleRange {
    fn default() -> Self {
        Self {
            xmin: 0.001,
            xmax: 0.999,
            xstep: 0.001,
        }
    }
}

impl SampleRange {
    /// Creates a validated range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] unless `0 < xmin ≤ xmax < 1`,
    /// `xstep` is finite and positive, and the range holds at most a million
    /// samples.
    pub fn new(xmin: f64, xmax: f64, xstep: f64) -> Result<Self, Error> {
        let valid = xmin > 0.0 && xmin <= xmax && xmax < 1.0 && xstep.is_finite() && xstep > 0.0;
        let range = Self { xmin, xmax, xstep };
        if !valid || range.last_index() >= f64::from(MAX_SAMPLES) {
            return Err(Error::InvalidRange { xmin, xmax, xstep });
        }

        Ok(range)
    }

    /// Returns the grid compositions `xmin + i·xstep`.
    pub fn compositions(&self) -> impl Iterator<Item = f64> + '_ {
        let last = self.last_index();
        (0..MAX_SAMPLES)
            .map(f64::from)
            .take_while(move |&i| i <= last)
            .map(move |i| self.xmin + i * self.xstep)
    }

    fn last_index(&self) -> f64 {
        ((self.xmax - self.xmin) / self.xstep + COUNT_SLACK).floor()
    }

    /// Evaluates both curves of `model` at `temperature` over the range.
    #[must_use]
    pub fn sample(&self, model: &MixingModel<'_>, temperature: f64) -> Vec<GxCurveSample> {
        self.compositions()
            .map(|x| GxCurveSample {
                x,
                liquid: model.energy(Phase::Liquid, temperature, x),
                solid: model.energy(Phase::Solid, temperature, x),
                liquid_slope: model.slope(Phase::Liquid, temperature, x),
                solid_slope: model.slope(Phase::Solid, temperature, x),
            })
            .collect()
    }
}

/// Samples the mixing energy of both phases at `temperature` for
/// `x = xmin + i·xstep`, `i = 0..=⌊(xmax - xmin)/xstep⌋`.
///
/// # Errors
///
/// Returns [`Error::InvalidRange`] if the range is empty, leaves `(0, 1)`, or
/// has a non-positive step.
pub fn sample_mixing_energy(
    model: &MixingModel<'_>,
    temperature: f64,
    xmin: f64,
    xmax: f64,
    xstep: f64,
) -> Result<Vec<GxCurveSample>, Error> {
    let range = SampleRange::new(xmin, xmax, xstep)?;
    Ok(range.sample(model, temperature))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
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
    fn default_range_covers_the_interior() {
        let compositions: Vec<f64> = SampleRange::default().compositions().collect();

        assert_eq!(compositions.len(), 999);
        assert_relative_eq!(compositions[0], 0.001);
        assert_relative_eq!(compositions[998], 0.999, epsilon = 1e-12);
    }

    #[test]
    fn samples_match_the_model() {
        let system = system();
        let coefficients = SubregularCoefficients::fit(&system).expect("should fit");
        let model = MixingModel::new(&system, coefficients);

        let samples = sample_mixing_energy(&model, 950.0, 0.1, 0.5, 0.1).expect("valid range");

        assert_eq!(samples.len(), 5);
        let third = samples[2];
        assert_relative_eq!(third.x, 0.3, epsilon = 1e-12);
        assert_relative_eq!(third.liquid, model.energy(Phase::Liquid, 950.0, third.x));
        assert_relative_eq!(third.solid_slope, model.slope(Phase::Solid, 950.0, third.x));
    }

    #[test]
    fn azeotrope_curves_touch() {
        let system = system();
        let coefficients = SubregularCoefficients::fit(&system).expect("should fit");
        let model = MixingModel::new(&system, coefficients);

        let samples = sample_mixing_energy(&model, 900.0, 0.5, 0.5, 0.01).expect("single point");

        assert_eq!(samples.len(), 1);
        assert_relative_eq!(samples[0].liquid, samples[0].solid, epsilon = 1e-12);
        assert_relative_eq!(samples[0].liquid_slope, samples[0].solid_slope, epsilon = 1e-12);
    }

    #[test]
    fn rejects_invalid_ranges() {
        let system = system();
        let coefficients = SubregularCoefficients::fit(&system).expect("should fit");
        let model = MixingModel::new(&system, coefficients);

        let ranges = [
            (0.0, 0.5, 0.1),
            (0.6, 0.5, 0.1),
            (0.1, 1.0, 0.1),
            (0.1, 0.5, 0.0),
            (0.001, 0.999, 1e-9),
        ];
        for (xmin, xmax, xstep) in ranges {
            assert_eq!(
                sample_mixing_energy(&model, 950.0, xmin, xmax, xstep),
                Err(Error::InvalidRange { xmin, xmax, xstep })
            );
        }
    }
}
