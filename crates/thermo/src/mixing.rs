use crate::{BinarySystem, GAS_CONSTANT, SubregularCoefficients};

/// A phase of the binary mixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Liquid,
    Solid,
}

/// Normalized mixing Gibbs energy `G/RT` of both phases of a calibrated system.
///
/// The solid is the reference state, so its energy is the ideal mixing term
/// plus the `a0`, `a1` excess:
///
/// ```text
/// G_S(T, x) = x·ln x + (1-x)·ln(1-x) + x(1-x)(a0 + x·a1)/RT
/// ```
///
/// The liquid adds the pure-component transition energies and the `c0`, `c1`
/// interaction:
///
/// ```text
/// G_L(T, x) = ((1-x)·dG_A(T) + x·dG_B(T))/RT + x·ln x + (1-x)·ln(1-x)
///           + x(1-x)(c0 + a0 + x(c1 + a1))/RT
/// ```
///
/// Compositions must lie strictly inside `(0, 1)`; at the ends the logarithms
/// are not finite.
#[derive(Debug, Clone, Copy)]
pub struct MixingModel<'a> {
    system: &'a BinarySystem,
    coefficients: SubregularCoefficients,
}

impl<'a> MixingModel<'a> {
    #[must_use]
    pub fn new(system: &'a BinarySystem, coefficients: SubregularCoefficients) -> Self {
        Self {
            system,
            coefficients,
        }
    }

    #[must_use]
    pub fn system(&self) -> &'a BinarySystem {
        self.system
    }

    #[must_use]
    pub fn coefficients(&self) -> SubregularCoefficients {
        self.coefficients
    }

    /// Returns `G/RT` of `phase` at composition `x`.
    #[must_use]
    pub fn energy(&self, phase: Phase, temperature: f64, x: f64) -> f64 {
        let rt = GAS_CONSTANT * temperature;
        let (p0, p1) = self.excess(phase);
        let (offset, tilt) = self.reference(phase, temperature);

        offset
            + x * tilt
            + x * x.ln()
            + (1.0 - x) * (1.0 - x).ln()
            + x * (1.0 - x) * (p0 + x * p1) / rt
    }

    /// Returns `d(G/RT)/dx` of `phase`.
    #[must_use]
    pub fn slope(&self, phase: Phase, temperature: f64, x: f64) -> f64 {
        let rt = GAS_CONSTANT * temperature;
        let (p0, p1) = self.excess(phase);
        let (_, tilt) = self.reference(phase, temperature);

        tilt + x.ln() - (1.0 - x).ln()
            + (p0 + 2.0 * x * p1 - 2.0 * x * p0 - 3.0 * x * x * p1) / rt
    }

    /// Returns `d²(G/RT)/dx²` of `phase`.
    #[must_use]
    pub fn curvature(&self, phase: Phase, temperature: f64, x: f64) -> f64 {
        let rt = GAS_CONSTANT * temperature;
        let (p0, p1) = self.excess(phase);

        1.0 / ((1.0 - x) * x) + (2.0 * p1 - 2.0 * p0 - 6.0 * x * p1) / rt
    }

    /// Returns the liquid-minus-solid energy difference without its ideal
    /// and `a` terms, divided by `RT`.
    ///
    /// Its root on one side of the azeotrope is the degenerate composition
    /// `zjL` where the two curves' driving force vanishes. At the azeotrope
    /// itself the driving force and its slope are both zero.
    #[must_use]
    pub fn driving_force(&self, temperature: f64, x: f64) -> f64 {
        self.driving_force_numerator(temperature, x) / (GAS_CONSTANT * temperature)
    }

    /// Propagates a temperature uncertainty `delta_t` into a composition
    /// uncertainty on the curve `driving_force(T, x) = 0`.
    ///
    /// With `f(T, x) = RT·driving_force(T, x)` this is
    /// `-(∂f/∂T)/(∂f/∂x)·ΔT`. The result is signed and becomes infinite where
    /// `∂f/∂x` vanishes, which only happens at the azeotrope.
    #[must_use]
    pub fn composition_error(&self, temperature: f64, x: f64, delta_t: f64) -> f64 {
        let left = self.system.left();
        let right = self.system.right();
        let SubregularCoefficients { c0, c1, .. } = self.coefficients;

        let df_dt = (1.0 - x) * left.gibbs_energy_derivative(temperature)
            + x * right.gibbs_energy_derivative(temperature);
        let df_dx = -left.gibbs_energy(temperature)
            + right.gibbs_energy(temperature)
            + (1.0 - 2.0 * x) * c0
            + x * (2.0 - 3.0 * x) * c1;

        -df_dt / df_dx * delta_t
    }

    fn driving_force_numerator(&self, temperature: f64, x: f64) -> f64 {
        let SubregularCoefficients { c0, c1, .. } = self.coefficients;

        (1.0 - x) * self.system.left().gibbs_energy(temperature)
            + x * self.system.right().gibbs_energy(temperature)
            + x * (1.0 - x) * (c0 + x * c1)
    }

    /// Returns the `(x^0, x^1)` coefficients of the excess term.
    fn excess(&self, phase: Phase) -> (f64, f64) {
        let SubregularCoefficients { c0, c1, a0, a1 } = self.coefficients;
        match phase {
            Phase::Liquid => (c0 + a0, c1 + a1),
            Phase::Solid => (a0, a1),
        }
    }

    /// Returns the linear reference term `offset + x·tilt`.
    fn reference(&self, phase: Phase, temperature: f64) -> (f64, f64) {
        match phase {
            Phase::Liquid => {
                let rt = GAS_CONSTANT * temperature;
                let gl = self.system.left().gibbs_energy(temperature) / rt;
                let gr = self.system.right().gibbs_energy(temperature) / rt;
                (gl, gr - gl)
            }
            Phase::Solid => (0.0, 0.0),
        }
    }
}
