//! Selection and rating tier types
//!
//! A `Selection` is the active rating range. It is accepted either as a
//! two-element array (`[4, 5]`) or as an object (`{ start = 4, end = 5 }`)
//! and always written back out as the array form, which is what the store
//! records as the component's selected value.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Inclusive rating range
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "SelectionInput")]
pub struct Selection {
    /// Lower bound (inclusive)
    pub start: f64,
    /// Upper bound (inclusive)
    pub end: f64,
}

impl Selection {
    /// Create a new selection
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

impl From<(f64, f64)> for Selection {
    fn from((start, end): (f64, f64)) -> Self {
        Self::new(start, end)
    }
}

impl From<&RatingTier> for Selection {
    fn from(tier: &RatingTier) -> Self {
        Self::new(tier.start, tier.end)
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.start, self.end].serialize(serializer)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Accepted input shapes for a selection
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum SelectionInput {
    Pair([f64; 2]),
    Bounds { start: f64, end: f64 },
}

impl From<SelectionInput> for Selection {
    fn from(input: SelectionInput) -> Self {
        match input {
            SelectionInput::Pair([start, end]) | SelectionInput::Bounds { start, end } => {
                Self::new(start, end)
            }
        }
    }
}

/// One clickable entry in the ratings list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingTier {
    /// Lower bound, also the number of filled stars shown
    pub start: f64,
    /// Upper bound
    pub end: f64,
    /// Optional text shown after the stars
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl RatingTier {
    /// Create a tier without a label
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            label: None,
        }
    }

    /// Attach a label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Bounds of this tier as a selection
    #[must_use]
    pub fn selection(&self) -> Selection {
        Selection::from(self)
    }

    /// Whether this tier is the one the given selection points at
    ///
    /// Only the lower bound is compared, so a selection of `[4, 5]` marks the
    /// `4` tier active even if its upper bound differs.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_active(&self, current: Option<&Selection>) -> bool {
        current.is_some_and(|sel| sel.start == self.start)
    }
}

/// Default tiers: "4 stars & up" down to "1 star & up"
#[must_use]
pub fn default_tiers() -> Vec<RatingTier> {
    vec![
        RatingTier::new(4.0, 5.0).with_label("& up"),
        RatingTier::new(3.0, 5.0).with_label("& up"),
        RatingTier::new(2.0, 5.0).with_label("& up"),
        RatingTier::new(1.0, 5.0).with_label("& up"),
    ]
}
