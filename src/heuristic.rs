use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;

use crate::container::Bin;
use crate::error::{Error, Result};
use crate::item::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Volume,
    Weight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl TryFrom<i64> for SortDirection {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            1 => Ok(SortDirection::Ascending),
            -1 => Ok(SortDirection::Descending),
            _ => Err(Error::InvalidSortDirection(value.to_string())),
        }
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1" | "asc" | "ascending" => Ok(SortDirection::Ascending),
            "-1" | "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(Error::InvalidSortDirection(s.to_string())),
        }
    }
}

/// A sort key paired with a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    fn compare(&self, a: f64, b: f64) -> Ordering {
        match self.direction {
            SortDirection::Ascending => a.total_cmp(&b),
            SortDirection::Descending => b.total_cmp(&a),
        }
    }

    /// Stable sort, ties keep insertion order.
    pub fn sort_bins(&self, bins: &mut [Bin]) {
        let key = |b: &Bin| match self.key {
            SortKey::Volume => b.volume(),
            SortKey::Weight => b.max_weight(),
        };
        bins.sort_by(|a, b| self.compare(key(a), key(b)));
    }

    /// Stable sort, ties keep insertion order.
    pub fn sort_items(&self, items: &mut [Item]) {
        let key = |i: &Item| match self.key {
            SortKey::Volume => i.volume(),
            SortKey::Weight => i.weight(),
        };
        items.sort_by(|a, b| self.compare(key(a), key(b)));
    }
}

/// Which order bins and items are fed to the greedy placement loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Bins and items by volume, in the packager's configured direction.
    #[default]
    FirstFit,
    /// Bins and items by volume, largest first.
    FirstFitDecreasing,
    /// Bins by volume in the configured direction, items heaviest first.
    HeaviestFirst,
    Custom { bins: SortOrder, items: SortOrder },
}

impl Strategy {
    /// Resolves to `(bin order, item order)`.
    pub fn orders(&self, direction: SortDirection) -> (SortOrder, SortOrder) {
        use SortDirection::Descending;
        use SortKey::{Volume, Weight};

        match *self {
            Strategy::FirstFit => (
                SortOrder::new(Volume, direction),
                SortOrder::new(Volume, direction),
            ),
            Strategy::FirstFitDecreasing => (
                SortOrder::new(Volume, Descending),
                SortOrder::new(Volume, Descending),
            ),
            Strategy::HeaviestFirst => (
                SortOrder::new(Volume, direction),
                SortOrder::new(Weight, Descending),
            ),
            Strategy::Custom { bins, items } => (bins, items),
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "first-fit" => Ok(Strategy::FirstFit),
            "first-fit-decreasing" => Ok(Strategy::FirstFitDecreasing),
            "heaviest-first" => Ok(Strategy::HeaviestFirst),
            _ => Err(Error::UnknownStrategy(s.to_string())),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::FirstFit => f.write_str("first-fit"),
            Strategy::FirstFitDecreasing => f.write_str("first-fit-decreasing"),
            Strategy::HeaviestFirst => f.write_str("heaviest-first"),
            Strategy::Custom { bins, items } => write!(
                f,
                "custom (bins by {:?} {:?}, items by {:?} {:?})",
                bins.key, bins.direction, items.key, items.direction
            ),
        }
    }
}
