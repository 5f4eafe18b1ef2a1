use std::collections::HashSet;

use crate::container::Bin;
use crate::error::{Error, Result};
use crate::heuristic::{SortDirection, SortOrder, Strategy};
use crate::item::Item;

/// Drives a packing run: owns every bin and the worklist of items not yet
/// fitted anywhere.
#[derive(Debug, Clone, Default)]
pub struct Packager {
    bins: Vec<Bin>,
    pending: Vec<Item>,
    bin_ids: HashSet<String>,
    item_ids: HashSet<String>,
    direction: SortDirection,
    strategy: Strategy,
    total_bins_volume: f64,
    total_bins_weight: f64,
    total_items_volume: f64,
    total_items_weight: f64,
    // Index of the next bin to process; `None` until the ordering is applied
    // and again after any change to the bins, items or strategy.
    cursor: Option<usize>,
}

impl Packager {
    pub fn new(direction: SortDirection) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Bins in processing order once a run has started, insertion order before.
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn bin(&self, id: &str) -> Option<&Bin> {
        self.bins.iter().find(|b| b.id() == id)
    }

    /// Items not fitted into any bin yet. After [`Packager::pack`] these are
    /// the globally unfitted items.
    pub fn unfitted_items(&self) -> &[Item] {
        &self.pending
    }

    pub fn total_bins_volume(&self) -> f64 {
        self.total_bins_volume
    }

    pub fn total_bins_weight(&self) -> f64 {
        self.total_bins_weight
    }

    pub fn total_items_volume(&self) -> f64 {
        self.total_items_volume
    }

    pub fn total_items_weight(&self) -> f64 {
        self.total_items_weight
    }

    pub fn add_bin(&mut self, bin: Bin) -> Result<()> {
        self.add_bins([bin])
    }

    /// Adds every bin or none: a duplicate id anywhere in the batch rejects it.
    pub fn add_bins(&mut self, bins: impl IntoIterator<Item = Bin>) -> Result<()> {
        let bins: Vec<Bin> = bins.into_iter().collect();
        let mut batch = HashSet::new();
        for b in &bins {
            if self.bin_ids.contains(b.id()) || !batch.insert(b.id()) {
                return Err(Error::DuplicateBinId(b.id().to_string()));
            }
        }
        for b in bins {
            self.total_bins_volume += b.volume();
            self.total_bins_weight += b.max_weight();
            self.bin_ids.insert(b.id().to_string());
            self.bins.push(b);
        }
        self.cursor = None;
        Ok(())
    }

    pub fn add_item(&mut self, item: Item) -> Result<()> {
        self.add_items([item])
    }

    /// Adds every item or none: a duplicate id anywhere in the batch rejects it.
    pub fn add_items(&mut self, items: impl IntoIterator<Item = Item>) -> Result<()> {
        let items: Vec<Item> = items.into_iter().collect();
        let mut batch = HashSet::new();
        for i in &items {
            if self.item_ids.contains(i.id()) || !batch.insert(i.id()) {
                return Err(Error::DuplicateItemId(i.id().to_string()));
            }
        }
        for i in items {
            self.total_items_volume += i.volume();
            self.total_items_weight += i.weight();
            self.item_ids.insert(i.id().to_string());
            self.pending.push(i);
        }
        self.cursor = None;
        Ok(())
    }

    pub fn with_first_fit(&mut self) -> &mut Self {
        self.with_strategy(Strategy::FirstFit)
    }

    pub fn with_first_fit_decreasing(&mut self) -> &mut Self {
        self.with_strategy(Strategy::FirstFitDecreasing)
    }

    pub fn with_heaviest_first(&mut self) -> &mut Self {
        self.with_strategy(Strategy::HeaviestFirst)
    }

    pub fn with_strategy(&mut self, strategy: Strategy) -> &mut Self {
        if self.strategy != strategy {
            self.strategy = strategy;
            self.cursor = None;
        }
        self
    }

    pub fn with_ordering(&mut self, bins: SortOrder, items: SortOrder) -> &mut Self {
        self.with_strategy(Strategy::Custom { bins, items })
    }

    /// `ceil(total item volume / total bin volume)`, or 0 when either is zero.
    pub fn lower_bound(&self) -> usize {
        if self.total_items_volume <= 0.0 || self.total_bins_volume <= 0.0 {
            return 0;
        }
        (self.total_items_volume / self.total_bins_volume).ceil() as usize
    }

    /// Tries `item` against each candidate anchor of `bin` in turn. Returns
    /// `None` once it is fitted; otherwise records it as unfitted for this bin
    /// and hands it back.
    pub fn pack_item_to_bin(bin: &mut Bin, item: Item) -> Option<Item> {
        let mut item = item;
        for position in bin.candidate_positions() {
            match bin.put_item(item, position) {
                Ok(()) => return None,
                Err(rejected) => item = rejected,
            }
        }
        tracing::debug!(bin = %bin.id(), item = %item.id(), "no candidate position fits");
        bin.push_unfitted(item.clone());
        Some(item)
    }

    fn apply_ordering(&mut self) {
        let (bin_order, item_order) = self.strategy.orders(self.direction);
        bin_order.sort_bins(&mut self.bins);
        item_order.sort_items(&mut self.pending);
        self.cursor = Some(0);
    }

    /// Closes the next bin: every pending item is tried against it once, and
    /// whatever it accepted leaves the worklist. Returns `false` when there is
    /// nothing left to do.
    ///
    /// Adding bins or items, or changing the strategy, re-sorts on the next
    /// step and starts over from the first bin, so earlier bins with room
    /// left still see late items. Fitted items stay where they are.
    pub fn pack_next_bin(&mut self) -> bool {
        let idx = match self.cursor {
            Some(idx) => idx,
            None => {
                self.apply_ordering();
                0
            }
        };
        if idx >= self.bins.len() || self.pending.is_empty() {
            return false;
        }

        let bin = &mut self.bins[idx];
        let before = self.pending.len();
        self.pending = std::mem::take(&mut self.pending)
            .into_iter()
            .filter_map(|item| Self::pack_item_to_bin(bin, item))
            .collect();
        self.cursor = Some(idx + 1);

        tracing::debug!(
            bin = %bin.id(),
            fitted = before - self.pending.len(),
            remaining = self.pending.len(),
            "bin closed"
        );
        true
    }

    /// Runs the whole packing loop and returns how many items were fitted.
    pub fn pack(&mut self) -> usize {
        let before = self.pending.len();
        while self.pack_next_bin() {}
        let fitted = before - self.pending.len();

        tracing::info!(
            strategy = %self.strategy,
            bins_used = self.bins.iter().filter(|b| !b.fitted_items().is_empty()).count(),
            fitted,
            unfitted = self.pending.len(),
            "packing finished"
        );
        fitted
    }
}
