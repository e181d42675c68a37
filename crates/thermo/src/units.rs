//! `uom` quantities at the model boundary.
//!
//! The solver works in SI `f64` values internally. These helpers let callers
//! describe components with typed quantities and read results back as such.

use uom::si::{
    f64::{MolarEnergy, MolarHeatCapacity, ThermodynamicTemperature},
    molar_energy::joule_per_mole,
    molar_heat_capacity::joule_per_kelvin_mole,
    thermodynamic_temperature::kelvin,
};

use crate::{Component, ModelError};

/// Molar entropy, J/(mol·K) in SI.
///
/// Shares its dimension with [`MolarHeatCapacity`].
pub type MolarEntropy = MolarHeatCapacity;

impl Component {
    /// Creates a component from typed quantities.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Domain`] under the same conditions as
    /// [`Component::new`].
    pub fn from_quantities(
        id: impl Into<String>,
        transition_temperature: ThermodynamicTemperature,
        enthalpy: MolarEnergy,
        entropy: MolarEntropy,
        heat_capacity_change: MolarHeatCapacity,
    ) -> Result<Self, ModelError> {
        Self::new(
            id,
            transition_temperature.get::<kelvin>(),
            enthalpy.get::<joule_per_mole>(),
            entropy.get::<joule_per_kelvin_mole>(),
            heat_capacity_change.get::<joule_per_kelvin_mole>(),
        )
    }

    /// Returns the melting point as a typed temperature.
    #[must_use]
    pub fn melting_point(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(self.transition_temperature())
    }

    /// Returns the Gibbs energy of transition at a typed temperature.
    #[must_use]
    pub fn gibbs_energy_at(&self, temperature: ThermodynamicTemperature) -> MolarEnergy {
        MolarEnergy::new::<joule_per_mole>(self.gibbs_energy(temperature.get::<kelvin>()))
    }
}
