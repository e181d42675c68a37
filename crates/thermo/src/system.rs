use std::ops::RangeInclusive;

use crate::{
    Component,
    error::{ModelError, mole_fraction, positive},
};

/// One end of the composition axis.
///
/// `Left` is pure in the left component (`x = 0`), `Right` is pure in the
/// right component (`x = 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Returns the composition of the pure component at this end.
    #[must_use]
    pub fn pure_composition(self) -> f64 {
        match self {
            Side::Left => 0.0,
            Side::Right => 1.0,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// The point where liquidus and solidus meet at one composition.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Azeotrope {
    /// Temperature in K.
    pub temperature: f64,
    /// Mole fraction of the right component.
    pub coordinate: f64,
}

/// A measured tie line used to calibrate the solid model.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentalPoint {
    /// Temperature in K.
    pub temperature: f64,
    /// Liquid composition on the tie line.
    pub liquidus: f64,
    /// Solid composition on the tie line.
    pub solidus: f64,
}

/// Two components plus the calibration data for their mixture.
///
/// Validated on construction and read-only afterward.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SystemData", into = "SystemData")
)]
pub struct BinarySystem {
    left: Component,
    right: Component,
    azeotrope: Azeotrope,
    experimental: ExperimentalPoint,
}

impl BinarySystem {
    /// Creates a system after checking the calibration data.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Domain`] if a temperature is not finite and
    /// positive, if a composition is outside `(0, 1)`, or if the experimental
    /// liquidus and solidus coincide.
    pub fn new(
        left: Component,
        right: Component,
        azeotrope: Azeotrope,
        experimental: ExperimentalPoint,
    ) -> Result<Self, ModelError> {
        positive("azeotrope.temperature", azeotrope.temperature)?;
        mole_fraction("azeotrope.coordinate", azeotrope.coordinate)?;
        positive("experimental.temperature", experimental.temperature)?;
        mole_fraction("experimental.liquidus", experimental.liquidus)?;
        mole_fraction("experimental.solidus", experimental.solidus)?;

        #[allow(clippy::float_cmp)]
        if experimental.liquidus == experimental.solidus {
            return Err(ModelError::domain(
                "experimental.solidus",
                experimental.solidus,
                "must differ from the liquidus composition",
            ));
        }

        Ok(Self {
            left,
            right,
            azeotrope,
            experimental,
        })
    }

    #[must_use]
    pub fn left(&self) -> &Component {
        &self.left
    }

    #[must_use]
    pub fn right(&self) -> &Component {
        &self.right
    }

    #[must_use]
    pub fn component(&self, side: Side) -> &Component {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    #[must_use]
    pub fn azeotrope(&self) -> Azeotrope {
        self.azeotrope
    }

    #[must_use]
    pub fn experimental(&self) -> ExperimentalPoint {
        self.experimental
    }

    /// Returns the side whose component melts at the higher temperature.
    ///
    /// Ties go to the left.
    #[must_use]
    pub fn upper_side(&self) -> Side {
        if self.right.transition_temperature() > self.left.transition_temperature() {
            Side::Right
        } else {
            Side::Left
        }
    }

    /// Returns the span covered by the azeotrope and both melting points.
    #[must_use]
    pub fn temperature_range(&self) -> RangeInclusive<f64> {
        let temperatures = [
            self.azeotrope.temperature,
            self.left.transition_temperature(),
            self.right.transition_temperature(),
        ];
        let low = temperatures.iter().copied().fold(f64::INFINITY, f64::min);
        let high = temperatures.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        low..=high
    }
}

/// Unchecked serialized form of a [`BinarySystem`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct SystemData {
    left: Component,
    right: Component,
    azeotrope: Azeotrope,
    experimental: ExperimentalPoint,
}

#[cfg(feature = "serde")]
impl TryFrom<SystemData> for BinarySystem {
    type Error = ModelError;

    fn try_from(data: SystemData) -> Result<Self, Self::Error> {
        Self::new(data.left, data.right, data.azeotrope, data.experimental)
    }
}

#[cfg(feature = "serde")]
impl From<BinarySystem> for SystemData {
    fn from(system: BinarySystem) -> Self {
        Self {
            left: system.left,
            right: system.right,
            azeotrope: system.azeotrope,
            experimental: system.experimental,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components() -> (Component, Component) {
        (
            Component::new("A", 1000.0, 10_000.0, 10.0, 0.0).expect("valid"),
            Component::new("B", 1200.0, 12_000.0, 10.0, 0.0).expect("valid"),
        )
    }

    fn system(
        azeotrope: Azeotrope,
        experimental: ExperimentalPoint,
    ) -> Result<BinarySystem, ModelError> {
        let (left, right) = components();
        BinarySystem::new(left, right, azeotrope, experimental)
    }

    const AZEOTROPE: Azeotrope = Azeotrope {
        temperature: 900.0,
        coordinate: 0.5,
    };

    const EXPERIMENTAL: ExperimentalPoint = ExperimentalPoint {
        temperature: 950.0,
        liquidus: 0.4,
        solidus: 0.6,
    };

    #[test]
    fn reports_upper_side_and_range() {
        let system = system(AZEOTROPE, EXPERIMENTAL).expect("valid system");

        assert_eq!(system.upper_side(), Side::Right);
        assert_eq!(system.temperature_range(), 900.0..=1200.0);
        assert_eq!(system.component(Side::Left).id(), "A");
    }

    #[test]
    fn equal_melting_points_lead_with_left() {
        let left = Component::new("A", 1000.0, 10_000.0, 10.0, 0.0).expect("valid");
        let right = Component::new("B", 1000.0, 10_000.0, 10.0, 0.0).expect("valid");
        let system = BinarySystem::new(left, right, AZEOTROPE, EXPERIMENTAL).expect("valid");

        assert_eq!(system.upper_side(), Side::Left);
    }

    #[test]
    fn rejects_invalid_calibration_data() {
        let edge = Azeotrope {
            coordinate: 1.0,
            ..AZEOTROPE
        };
        assert!(matches!(
            system(edge, EXPERIMENTAL),
            Err(ModelError::Domain {
                quantity: "azeotrope.coordinate",
                ..
            })
        ));

        let same = ExperimentalPoint {
            solidus: 0.4,
            ..EXPERIMENTAL
        };
        assert!(matches!(
            system(AZEOTROPE, same),
            Err(ModelError::Domain {
                quantity: "experimental.solidus",
                ..
            })
        ));

        let cold = ExperimentalPoint {
            temperature: 0.0,
            ..EXPERIMENTAL
        };
        assert!(system(AZEOTROPE, cold).is_err());
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn sides_know_their_pure_composition() {
        assert_eq!(Side::Left.pure_composition(), 0.0);
        assert_eq!(Side::Right.pure_composition(), 1.0);
        assert_eq!(Side::Left.opposite(), Side::Right);
    }
}
