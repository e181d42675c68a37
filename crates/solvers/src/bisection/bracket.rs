use thiserror::Error;

/// Errors that can occur when creating a [`Bracket`] or validating bounds.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BracketError {
    /// One or both endpoints are non-finite.
    #[error("non-finite endpoint(s)")]
    NonFinite,
    /// Endpoints are equal, giving zero width.
    #[error("zero width")]
    ZeroWidth,
    /// The residuals at both endpoints have the same sign.
    #[error("target is not bracketed (no sign change)")]
    NoSignChange,
}

/// Current search interval and the residual sign at each end.
///
/// The residual signs always differ, so the interval always straddles the
/// target of a continuous function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    left: f64,
    right: f64,
    left_sign: Sign,
    right_sign: Sign,
}

impl Bracket {
    /// Creates a validated bracket with known residual signs.
    ///
    /// # Errors
    ///
    /// Returns `BracketError::NoSignChange` if the signs do not bracket a root.
    pub(super) fn new(
        bounds: Bounds,
        left_sign: Sign,
        right_sign: Sign,
    ) -> Result<Self, BracketError> {
        if left_sign == right_sign {
            return Err(BracketError::NoSignChange);
        }

        Ok(Self {
            left: bounds.left,
            right: bounds.right,
            left_sign,
            right_sign,
        })
    }

    /// Returns the bracket bounds as an array.
    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }

    /// Returns the midpoint of the bracket.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.left + self.right)
    }

    /// Returns the bracket width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Returns the residual signs at the left and right ends.
    #[must_use]
    pub fn signs(&self) -> [Sign; 2] {
        [self.left_sign, self.right_sign]
    }

    /// Returns true once the width is within `x_abs_tol` or the midpoint can
    /// no longer be represented strictly inside the bracket.
    #[must_use]
    pub fn is_x_converged(&self, x_abs_tol: f64) -> bool {
        let mid = self.midpoint();
        self.width() <= x_abs_tol || mid <= self.left || mid >= self.right
    }

    /// Shrinks the bracket using a new endpoint and its residual sign.
    pub(super) fn shrink(&mut self, x: f64, sign: Sign) {
        if self.left_sign == sign {
            self.left = x;
        } else {
            self.right = x;
        }
    }
}

/// The sign of a residual for bracket logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Residual is positive (or zero).
    Positive,
    /// Residual is negative.
    Negative,
}

impl Sign {
    /// Returns the sign of a residual value.
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

/// Ordered finite bounds for a bisection bracket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bounds {
    left: f64,
    right: f64,
}

impl Bounds {
    /// Validates and orders the bracket endpoints.
    ///
    /// # Errors
    ///
    /// Returns `BracketError` if endpoints are non-finite or zero width.
    pub(super) fn new(bracket: [f64; 2]) -> Result<Self, BracketError> {
        let [a, b] = bracket;

        if !a.is_finite() || !b.is_finite() {
            return Err(BracketError::NonFinite);
        }

        #[allow(clippy::float_cmp)]
        if a == b {
            return Err(BracketError::ZeroWidth);
        }

        Ok(Self {
            left: a.min(b),
            right: a.max(b),
        })
    }

    /// Returns the bounds as an array.
    pub(super) fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn bounds_orders_reversed_bracket() {
        let bounds = Bounds::new([0.9, 0.1]).expect("valid bracket");
        let [left, right] = bounds.as_array();
        assert_relative_eq!(left, 0.1);
        assert_relative_eq!(right, 0.9);
    }

    #[test]
    fn bounds_rejects_non_finite_and_zero_width() {
        assert_eq!(Bounds::new([f64::NAN, 1.0]), Err(BracketError::NonFinite));
        assert_eq!(
            Bounds::new([0.0, f64::NEG_INFINITY]),
            Err(BracketError::NonFinite)
        );
        assert_eq!(Bounds::new([0.5, 0.5]), Err(BracketError::ZeroWidth));
    }

    #[test]
    fn same_signs_are_not_a_bracket() {
        let bounds = Bounds::new([0.0, 1.0]).expect("valid bounds");
        let err = Bracket::new(bounds, Sign::Negative, Sign::Negative);
        assert_eq!(err, Err(BracketError::NoSignChange));
    }

    #[test]
    fn shrink_replaces_the_end_with_matching_sign() {
        let bounds = Bounds::new([0.0, 2.0]).expect("valid bounds");
        let mut bracket =
            Bracket::new(bounds, Sign::Positive, Sign::Negative).expect("valid bracket");

        bracket.shrink(1.0, Sign::Negative);
        assert_eq!(bracket.as_array(), [0.0, 1.0]);

        bracket.shrink(0.5, Sign::Positive);
        assert_eq!(bracket.as_array(), [0.5, 1.0]);
        assert_eq!(bracket.signs(), [Sign::Positive, Sign::Negative]);
        assert_relative_eq!(bracket.width(), 0.5);
    }

    #[test]
    fn collapsed_bracket_is_x_converged() {
        let left = 1.0_f64;
        let right = f64::from_bits(left.to_bits() + 1);
        let bounds = Bounds::new([left, right]).expect("valid bounds");
        let bracket = Bracket::new(bounds, Sign::Negative, Sign::Positive).expect("valid bracket");

        assert!(bracket.is_x_converged(0.0));
    }
}
