use tieline_thermo::Side;

use crate::PointError;

/// The two ends of a tie line and the degenerate composition between them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryPoint {
    pub liquidus: f64,
    pub solidus: f64,
    pub degenerate: f64,
}

impl BoundaryPoint {
    /// A point where all three compositions coincide, as at a pure melting
    /// point or at the azeotrope.
    #[must_use]
    pub fn uniform(x: f64) -> Self {
        Self {
            liquidus: x,
            solidus: x,
            degenerate: x,
        }
    }
}

/// One temperature level of the diagram.
///
/// A branch is `None` above its component's melting point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagramEntry {
    pub temperature: f64,
    pub left: Option<BoundaryPoint>,
    pub right: Option<BoundaryPoint>,
}

impl DiagramEntry {
    #[must_use]
    pub fn point(&self, side: Side) -> Option<BoundaryPoint> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// The temperature at which a branch stopped, and why.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchFailure {
    pub temperature: f64,
    pub error: PointError,
}

/// Both branches of a phase diagram on a shared, descending temperature grid.
///
/// The first entry is the higher melting point and the last is the azeotrope,
/// where both branches of a complete diagram carry the azeotrope composition.
///
/// A branch whose tie line cannot be found at some level ends there: it keeps
/// the levels solved above and is `None` from the failed level down, the
/// azeotrope included. [`failure`](Self::failure) reports where and why.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagramDataset {
    entries: Vec<DiagramEntry>,
    #[cfg_attr(feature = "serde", serde(skip))]
    left_failure: Option<BranchFailure>,
    #[cfg_attr(feature = "serde", serde(skip))]
    right_failure: Option<BranchFailure>,
}

impl DiagramDataset {
    pub(crate) fn new(
        entries: Vec<DiagramEntry>,
        left_failure: Option<BranchFailure>,
        right_failure: Option<BranchFailure>,
    ) -> Self {
        Self {
            entries,
            left_failure,
            right_failure,
        }
    }

    /// Returns where the branch on `side` stopped early, if it did.
    #[must_use]
    pub fn failure(&self, side: Side) -> Option<&BranchFailure> {
        match side {
            Side::Left => self.left_failure.as_ref(),
            Side::Right => self.right_failure.as_ref(),
        }
    }

    /// Returns true if both branches reached the azeotrope.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.left_failure.is_none() && self.right_failure.is_none()
    }

    #[must_use]
    pub fn entries(&self) -> &[DiagramEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the index of the first entry where `side` is defined.
    #[must_use]
    pub fn offset(&self, side: Side) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.point(side).is_some())
    }

    /// Returns the defined points of one branch as `(temperature, point)`,
    /// from its melting point down to the azeotrope or its failed level.
    pub fn branch(&self, side: Side) -> impl Iterator<Item = (f64, BoundaryPoint)> + '_ {
        self.entries
            .iter()
            .filter_map(move |entry| entry.point(side).map(|point| (entry.temperature, point)))
    }

    /// Returns the azeotrope entry.
    #[must_use]
    pub fn azeotrope(&self) -> Option<&DiagramEntry> {
        self.entries.last()
    }
}
