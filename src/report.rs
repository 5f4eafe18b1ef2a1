use serde::Serialize;

use crate::container::Bin;
use crate::error::{Error, Result};
use crate::item::Item;
use crate::packager::Packager;

const MAX_SIGNIFICANT_DIGITS: u32 = 17;

/// Number of digits after the decimal point kept in reported values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision(u32);

impl Precision {
    pub fn new(digits: i64) -> Result<Self> {
        u32::try_from(digits)
            .map(Precision)
            .map_err(|_| Error::NegativePrecision(digits))
    }

    pub fn digits(&self) -> u32 {
        self.0
    }

    /// Rounds half away from zero. An `f64` carries no more than 17
    /// significant digits, so larger precisions leave the value as is.
    pub fn round(&self, value: f64) -> f64 {
        if self.0 >= MAX_SIGNIFICANT_DIGITS {
            return value;
        }
        let factor = 10f64.powi(self.0 as i32);
        let scaled = value * factor;
        if !scaled.is_finite() {
            return value;
        }
        scaled.round() / factor
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub id: String,
    pub length: f64,
    pub height: f64,
    pub breadth: f64,
    pub volume: f64,
    pub weight: f64,
    pub rotation: u8,
    pub position: [f64; 3],
}

#[derive(Debug, Clone, Serialize)]
pub struct BinReport {
    pub id: String,
    pub length: f64,
    pub height: f64,
    pub breadth: f64,
    pub volume: f64,
    pub max_weight: f64,
    pub fitted_items: Vec<ItemReport>,
    pub total_fitted_volume: f64,
    pub total_fitted_weight: f64,
    /// Items this bin rejected when they were tried against it; some may have
    /// been fitted into a later bin.
    pub unfitted_items: Vec<ItemReport>,
    pub total_unfitted_volume: f64,
    pub total_unfitted_weight: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PackingReport {
    pub strategy: String,
    pub lower_bound: usize,
    pub bins: Vec<BinReport>,
    /// Items no bin accepted.
    pub unfitted_items: Vec<ItemReport>,
    pub total_bins_volume: f64,
    pub total_bins_weight: f64,
    pub total_items_volume: f64,
    pub total_items_weight: f64,
}

struct Rounder(Option<Precision>);

impl Rounder {
    fn r(&self, value: f64) -> f64 {
        match self.0 {
            Some(p) => p.round(value),
            None => value,
        }
    }

    fn item(&self, item: &Item) -> ItemReport {
        let dims = item.dimensions();
        let pos = item.position();
        ItemReport {
            id: item.id().to_string(),
            length: self.r(dims.length),
            height: self.r(dims.height),
            breadth: self.r(dims.breadth),
            volume: self.r(item.volume()),
            weight: self.r(item.weight()),
            rotation: item.rotation().into(),
            position: [self.r(pos.x), self.r(pos.y), self.r(pos.z)],
        }
    }

    fn bin(&self, bin: &Bin) -> BinReport {
        let dims = bin.dimensions();
        BinReport {
            id: bin.id().to_string(),
            length: self.r(dims.length),
            height: self.r(dims.height),
            breadth: self.r(dims.breadth),
            volume: self.r(bin.volume()),
            max_weight: self.r(bin.max_weight()),
            fitted_items: bin.fitted_items().iter().map(|i| self.item(i)).collect(),
            total_fitted_volume: self.r(bin.total_fitted_volume()),
            total_fitted_weight: self.r(bin.total_fitted_weight()),
            unfitted_items: bin.unfitted_items().iter().map(|i| self.item(i)).collect(),
            total_unfitted_volume: self.r(bin.total_unfitted_volume()),
            total_unfitted_weight: self.r(bin.total_unfitted_weight()),
        }
    }
}

impl PackingReport {
    pub fn from_packager(packager: &Packager, precision: Option<Precision>) -> Self {
        let rounder = Rounder(precision);
        Self {
            strategy: packager.strategy().to_string(),
            lower_bound: packager.lower_bound(),
            bins: packager.bins().iter().map(|b| rounder.bin(b)).collect(),
            unfitted_items: packager
                .unfitted_items()
                .iter()
                .map(|i| rounder.item(i))
                .collect(),
            total_bins_volume: rounder.r(packager.total_bins_volume()),
            total_bins_weight: rounder.r(packager.total_bins_weight()),
            total_items_volume: rounder.r(packager.total_items_volume()),
            total_items_weight: rounder.r(packager.total_items_weight()),
        }
    }

    pub fn bins_used(&self) -> usize {
        self.bins.iter().filter(|b| !b.fitted_items.is_empty()).count()
    }

    pub fn fitted_count(&self) -> usize {
        self.bins.iter().map(|b| b.fitted_items.len()).sum()
    }
}
