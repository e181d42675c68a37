use crate::{BinarySystem, GAS_CONSTANT, ModelError};

/// Relative size below which the calibration determinant counts as zero.
const SINGULARITY_TOLERANCE: f64 = 1e-12;

/// Interaction coefficients of the sub-regular solution model, in J/mol.
///
/// `c0` and `c1` describe the liquid relative to the solid and are fixed by
/// the azeotrope. `a0` and `a1` describe the solid and are fixed by the
/// experimental tie line.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubregularCoefficients {
    pub c0: f64,
    pub c1: f64,
    pub a0: f64,
    pub a1: f64,
}

impl SubregularCoefficients {
    /// Calibrates the coefficients of `system`.
    ///
    /// `c0` and `c1` follow in closed form from the azeotrope, where the
    /// liquid and solid curves must touch with equal slope. `a0` and `a1`
    /// solve the 2×2 linear system that makes the experimental liquidus and
    /// solidus share a common tangent.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NumericalSingularity`] if the linear system is
    /// singular relative to the size of its terms, or if the solution is not
    /// finite.
    pub fn fit(system: &BinarySystem) -> Result<Self, ModelError> {
        let left = system.left();
        let right = system.right();

        let azeotrope = system.azeotrope();
        let xa = azeotrope.coordinate;
        let gl = left.gibbs_energy(azeotrope.temperature);
        let gr = right.gibbs_energy(azeotrope.temperature);

        let c0 = -2.0 * gl / xa - gr * (1.0 - 2.0 * xa) / (1.0 - xa).powi(2);
        let c1 = gl / xa.powi(2) - gr / (1.0 - xa).powi(2);

        let point = system.experimental();
        let (xl, xs) = (point.liquidus, point.solidus);
        let rt = GAS_CONSTANT * point.temperature;
        let gl = left.gibbs_energy(point.temperature);
        let gr = right.gibbs_energy(point.temperature);

        let a11 = (xs.powi(2) - xl.powi(2)) / rt;
        let a12 = (2.0 * xs.powi(3) - xs.powi(2) - xl.powi(2) + 2.0 * xl.powi(3)) / rt;
        let a21 = (2.0 * xl - 2.0 * xs) / rt;
        let a22 = (2.0 * xs - 3.0 * xs.powi(2) - 2.0 * xl + 3.0 * xl.powi(2)) / rt;

        let b1 = ((1.0 - xl) / (1.0 - xs)).ln()
            + (gl - xl.powi(2) * (c0 - c1) + 2.0 * xl.powi(3) * c1) / rt;
        let b2 = (xl * (1.0 - xs) / (xs * (1.0 - xl))).ln()
            + (gr - gl + c0 + 2.0 * c1 * xl - 2.0 * c0 * xl - 3.0 * xl.powi(2) * c1) / rt;

        let determinant = a11 * a22 - a21 * a12;
        let scale = (a11 * a22).abs() + (a21 * a12).abs();
        if !determinant.is_finite() || determinant.abs() <= SINGULARITY_TOLERANCE * scale {
            return Err(ModelError::NumericalSingularity { determinant });
        }

        let a0 = (b1 * a22 - a12 * b2) / determinant;
        let a1 = (b2 * a11 - b1 * a21) / determinant;

        let coefficients = Self { c0, c1, a0, a1 };
        if coefficients.is_finite() {
            Ok(coefficients)
        } else {
            Err(ModelError::NumericalSingularity { determinant })
        }
    }

    fn is_finite(&self) -> bool {
        [self.c0, self.c1, self.a0, self.a1]
            .iter()
            .all(|value| value.is_finite())
    }
}
