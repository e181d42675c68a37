use tieline_thermo::{BinarySystem, Side};

/// Geometry of one side of the azeotrope.
///
/// `direction` is `+1` when compositions grow away from the azeotrope (the
/// right branch) and `-1` otherwise. On the right branch the liquid lies on
/// the low-x side of the solid; on the left it lies on the high-x side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Branch {
    pub(super) side: Side,
    pub(super) direction: f64,
    pub(super) azeotrope: f64,
    pub(super) outer: f64,
}

impl Branch {
    pub(super) fn new(system: &BinarySystem, side: Side, epsilon: f64) -> Self {
        let (direction, outer) = match side {
            Side::Left => (-1.0, epsilon),
            Side::Right => (1.0, 1.0 - epsilon),
        };

        Self {
            side,
            direction,
            azeotrope: system.azeotrope().coordinate,
            outer,
        }
    }

    /// Orders the near-azeotrope slopes of both phases by composition.
    pub(super) fn slope_bracket(&self, liquid: f64, solid: f64) -> SlopeBracket {
        match self.side {
            Side::Right => SlopeBracket {
                low_x: liquid,
                high_x: solid,
            },
            Side::Left => SlopeBracket {
                low_x: solid,
                high_x: liquid,
            },
        }
    }
}

/// Bounds on the common slope.
///
/// `low_x` starts at the slope of the phase on the low-x side of the tie line
/// and `high_x` at the slope of the phase on the high-x side. Each refinement
/// moves one of them to the current trial slope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SlopeBracket {
    low_x: f64,
    high_x: f64,
}

impl SlopeBracket {
    pub(super) fn midpoint(&self) -> f64 {
        0.5 * (self.low_x + self.high_x)
    }

    /// Moves a bound to `slope` based on the sign of the tangent mismatch.
    ///
    /// The mismatch is `G_high(x_high) - G_low(x_low) - slope·(x_high - x_low)`.
    /// A positive mismatch replaces the high-x bound, anything else the low-x one.
    pub(super) fn narrow(&mut self, slope: f64, mismatch: f64) {
        if mismatch > 0.0 {
            self.high_x = slope;
        } else {
            self.low_x = slope;
        }
    }
}

/// The current trial of the slope refinement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct State {
    pub(super) slopes: SlopeBracket,
    pub(super) slope: f64,
    pub(super) liquidus: f64,
    pub(super) solidus: f64,
}
