use crate::error::{ModelError, finite, positive};

/// A pure component with a single solid/liquid transition.
///
/// The Gibbs energy of transition follows a linear heat-capacity correction
/// around the transition temperature `Ta`:
///
/// ```text
/// dG(T) = (dH - T·dS)·(1 + dCp·(T/Ta - 1)/(2·dS))
/// ```
///
/// The domain is checked on construction, so evaluation never fails.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ComponentData", into = "ComponentData")
)]
pub struct Component {
    id: String,
    transition_temperature: f64,
    enthalpy: f64,
    entropy: f64,
    heat_capacity_change: f64,
}

impl Component {
    /// Creates a component from SI values.
    ///
    /// # Parameters
    ///
    /// - `transition_temperature`: melting point `Ta` in K
    /// - `enthalpy`: transition enthalpy `dH` in J/mol
    /// - `entropy`: transition entropy `dS` in J/(mol·K)
    /// - `heat_capacity_change`: `dCp` in J/(mol·K)
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Domain`] if any value is non-finite, if
    /// `transition_temperature` is not positive, or if `entropy` is zero.
    pub fn new(
        id: impl Into<String>,
        transition_temperature: f64,
        enthalpy: f64,
        entropy: f64,
        heat_capacity_change: f64,
    ) -> Result<Self, ModelError> {
        let transition_temperature = positive("transition_temperature", transition_temperature)?;
        let enthalpy = finite("enthalpy", enthalpy)?;
        let entropy = finite("entropy", entropy)?;
        let heat_capacity_change = finite("heat_capacity_change", heat_capacity_change)?;

        if entropy == 0.0 {
            return Err(ModelError::domain("entropy", entropy, "must be non-zero"));
        }

        Ok(Self {
            id: id.into(),
            transition_temperature,
            enthalpy,
            entropy,
            heat_capacity_change,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the melting point `Ta` in K.
    #[must_use]
    pub fn transition_temperature(&self) -> f64 {
        self.transition_temperature
    }

    #[must_use]
    pub fn enthalpy(&self) -> f64 {
        self.enthalpy
    }

    #[must_use]
    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    #[must_use]
    pub fn heat_capacity_change(&self) -> f64 {
        self.heat_capacity_change
    }

    /// Returns the Gibbs energy of transition `dG(T)` in J/mol.
    #[must_use]
    pub fn gibbs_energy(&self, temperature: f64) -> f64 {
        (self.enthalpy - temperature * self.entropy) * (1.0 + self.correction(temperature))
    }

    /// Returns `d(dG)/dT` in J/(mol·K).
    #[must_use]
    pub fn gibbs_energy_derivative(&self, temperature: f64) -> f64 {
        let scale = self.heat_capacity_change / (2.0 * self.entropy * self.transition_temperature);
        -self.entropy * (1.0 + self.correction(temperature))
            + (self.enthalpy - temperature * self.entropy) * scale
    }

    fn correction(&self, temperature: f64) -> f64 {
        self.heat_capacity_change * (temperature / self.transition_temperature - 1.0)
            / (2.0 * self.entropy)
    }
}

/// Unchecked serialized form of a [`Component`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct ComponentData {
    id: String,
    transition_temperature: f64,
    enthalpy: f64,
    entropy: f64,
    #[serde(default)]
    heat_capacity_change: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<ComponentData> for Component {
    type Error = ModelError;

    fn try_from(data: ComponentData) -> Result<Self, Self::Error> {
        Self::new(
            data.id,
            data.transition_temperature,
            data.enthalpy,
            data.entropy,
            data.heat_capacity_change,
        )
    }
}

#[cfg(feature = "serde")]
impl From<Component> for ComponentData {
    fn from(component: Component) -> Self {
        Self {
            id: component.id,
            transition_temperature: component.transition_temperature,
            enthalpy: component.enthalpy,
            entropy: component.entropy,
            heat_capacity_change: component.heat_capacity_change,
        }
    }
}
