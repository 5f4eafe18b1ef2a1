use crate::intersection::Cuboid;
use crate::item::Item;
use crate::types::{Axis, Dimensions, Position, Rotation};

/// Outcome of testing an item at one candidate position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// First rotation (in [`Rotation::ALL`] order) that fits.
    Placed(Rotation),
    /// Geometrically fits but would exceed the bin's weight capacity.
    Overweight,
    /// No rotation fits inside the bin without colliding.
    NoRoom,
}

#[derive(Debug, Clone)]
pub struct Bin {
    id: String,
    dimensions: Dimensions,
    max_weight: f64,
    fitted: Vec<Item>,
    unfitted: Vec<Item>,
    fitted_volume: f64,
    fitted_weight: f64,
    unfitted_volume: f64,
    unfitted_weight: f64,
}

impl Bin {
    pub fn new(id: impl Into<String>, length: f64, height: f64, breadth: f64, max_weight: f64) -> Self {
        Self {
            id: id.into(),
            dimensions: Dimensions::new(length, height, breadth),
            max_weight,
            fitted: Vec::new(),
            unfitted: Vec::new(),
            fitted_volume: 0.0,
            fitted_weight: 0.0,
            unfitted_volume: 0.0,
            unfitted_weight: 0.0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn volume(&self) -> f64 {
        self.dimensions.volume()
    }

    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    /// Fitted items in the order they were placed.
    pub fn fitted_items(&self) -> &[Item] {
        &self.fitted
    }

    /// Items rejected by this bin at the time they were tried. An item listed
    /// here may still have been fitted into a bin processed later.
    pub fn unfitted_items(&self) -> &[Item] {
        &self.unfitted
    }

    pub fn total_fitted_volume(&self) -> f64 {
        self.fitted_volume
    }

    pub fn total_fitted_weight(&self) -> f64 {
        self.fitted_weight
    }

    pub fn total_unfitted_volume(&self) -> f64 {
        self.unfitted_volume
    }

    pub fn total_unfitted_weight(&self) -> f64 {
        self.unfitted_weight
    }

    fn within_bounds(&self, position: Position, dimension: Dimensions) -> bool {
        Axis::ALL
            .iter()
            .all(|&axis| position.get(axis) + dimension.get(axis) <= self.dimensions.get(axis))
    }

    fn collides(&self, candidate: &Cuboid) -> bool {
        self.fitted.iter().any(|f| f.cuboid().intersects(candidate))
    }

    /// Tests `item` at `position` without touching any state. Rotations are
    /// tried in order; the first one that fits geometrically decides the
    /// outcome, since weight does not depend on rotation.
    pub fn try_fit(&self, item: &Item, position: Position) -> Fit {
        for rotation in Rotation::ALL {
            let dimension = item.dimension_for(rotation);
            if !self.within_bounds(position, dimension) {
                continue;
            }
            if self.collides(&Cuboid::new(position, dimension)) {
                continue;
            }
            if self.fitted_weight + item.weight() > self.max_weight {
                return Fit::Overweight;
            }
            return Fit::Placed(rotation);
        }
        Fit::NoRoom
    }

    /// Places `item` at `position` if it fits, taking ownership of it.
    /// On failure the item is handed back unchanged.
    pub fn put_item(&mut self, mut item: Item, position: Position) -> Result<(), Item> {
        match self.try_fit(&item, position) {
            Fit::Placed(rotation) => {
                tracing::debug!(bin = %self.id, item = %item.id(), %position, %rotation, "item fitted");
                item.place(rotation, position);
                self.push_fitted(item);
                Ok(())
            }
            Fit::Overweight => {
                tracing::debug!(bin = %self.id, item = %item.id(), "weight capacity exceeded");
                Err(item)
            }
            Fit::NoRoom => Err(item),
        }
    }

    fn push_fitted(&mut self, item: Item) {
        self.fitted_volume += item.volume();
        self.fitted_weight += item.weight();
        self.fitted.push(item);
    }

    /// Records a rejection. An item retried after the packager was
    /// reconfigured is only recorded once.
    pub(crate) fn push_unfitted(&mut self, item: Item) {
        if self.unfitted.iter().any(|u| u.id() == item.id()) {
            return;
        }
        self.unfitted_volume += item.volume();
        self.unfitted_weight += item.weight();
        self.unfitted.push(item);
    }

    /// Anchor positions flush against each face of already fitted items:
    /// axes in [`Axis::ALL`] order outside, fitted items in placement order inside.
    /// An empty bin only offers the origin.
    pub fn candidate_positions(&self) -> Vec<Position> {
        if self.fitted.is_empty() {
            return vec![Position::ORIGIN];
        }
        Axis::ALL
            .iter()
            .flat_map(|&axis| {
                self.fitted
                    .iter()
                    .map(move |f| f.position().advanced(axis, f.dimension().get(axis)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bin() -> Bin {
        Bin::new("1", 3.275, 5.0, 10.5, 50.0)
    }

    #[test]
    fn test_volume() {
        assert_relative_eq!(bin().volume(), 3.275 * 5.0 * 10.5);
    }

    #[test]
    fn test_put_item_into_empty_bin() {
        let mut b = bin();
        let item = Item::new("1", 1.0, 4.225, 2.0, 5.06);
        assert!(b.put_item(item, Position::ORIGIN).is_ok());
        assert_eq!(b.fitted_items().len(), 1);
        assert_eq!(b.fitted_items()[0].id(), "1");
        assert_eq!(b.fitted_items()[0].rotation(), Rotation::Lhb);
        assert_relative_eq!(b.total_fitted_weight(), 5.06);
        assert_relative_eq!(b.total_fitted_volume(), 1.0 * 4.225 * 2.0);
    }

    #[test]
    fn test_put_item_too_large() {
        let mut b = bin();
        let item = Item::new("10", 30.0, 20.0, 20.0, 900.0);
        let rejected = b.put_item(item.clone(), Position::ORIGIN).unwrap_err();
        assert_eq!(rejected, item);
        assert!(b.fitted_items().is_empty());
    }

    #[test]
    fn test_put_item_same_position_collides() {
        let mut b = bin();
        b.put_item(Item::new("1", 1.0, 4.225, 2.0, 5.06), Position::ORIGIN)
            .unwrap();
        let second = Item::new("2", 2.25, 5.0, 2.0, 2.525);
        assert_eq!(b.try_fit(&second, Position::ORIGIN), Fit::NoRoom);
        assert!(b.put_item(second, Position::ORIGIN).is_err());
        assert_eq!(b.fitted_items().len(), 1);
    }

    #[test]
    fn test_put_item_overweight() {
        let mut b = Bin::new("1", 4.0, 4.0, 5.0, 50.0);
        let heavy = Item::new("heavy", 1.0, 1.0, 1.0, 60.0);
        assert_eq!(b.try_fit(&heavy, Position::ORIGIN), Fit::Overweight);
        assert!(b.put_item(heavy, Position::ORIGIN).is_err());
        assert!(b.fitted_items().is_empty());
        assert_eq!(b.total_fitted_weight(), 0.0);
    }

    #[test]
    fn test_weight_accumulates_to_capacity() {
        let mut b = Bin::new("1", 10.0, 10.0, 10.0, 10.0);
        b.put_item(Item::new("a", 1.0, 1.0, 1.0, 6.0), Position::ORIGIN)
            .unwrap();
        let exact = Item::new("b", 1.0, 1.0, 1.0, 4.0);
        assert!(b.put_item(exact, Position::new(1.0, 0.0, 0.0)).is_ok());
        let over = Item::new("c", 1.0, 1.0, 1.0, 0.5);
        assert_eq!(b.try_fit(&over, Position::new(2.0, 0.0, 0.0)), Fit::Overweight);
    }

    #[test]
    fn test_rotation_search_order() {
        // Only fits with height on x, breadth on y, length on z.
        let mut b = Bin::new("1", 2.0, 2.0, 10.0, 100.0);
        let long = Item::new("long", 10.0, 1.0, 1.0, 1.0);
        b.put_item(long, Position::ORIGIN).unwrap();
        let placed = &b.fitted_items()[0];
        assert_eq!(placed.rotation(), Rotation::Hbl);
        assert_eq!(placed.dimension(), Dimensions::new(1.0, 1.0, 10.0));
    }

    #[test]
    fn test_exact_boundary_fits() {
        let mut b = Bin::new("1", 4.0, 4.0, 4.0, 100.0);
        let cube = Item::new("cube", 2.0, 2.0, 2.0, 1.0);
        assert!(b.put_item(cube.clone(), Position::new(2.0, 2.0, 2.0)).is_ok());
        assert!(b.put_item(cube, Position::new(2.5, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_unfitted_totals() {
        let mut b = bin();
        b.push_unfitted(Item::new("1", 1.0, 4.225, 2.0, 5.06));
        b.push_unfitted(Item::new("2", 2.25, 5.0, 2.0, 2.525));
        assert_eq!(b.unfitted_items().len(), 2);
        assert_relative_eq!(b.total_unfitted_weight(), 5.06 + 2.525);
        assert_relative_eq!(
            b.total_unfitted_volume(),
            1.0 * 4.225 * 2.0 + 2.25 * 5.0 * 2.0
        );
    }

    #[test]
    fn test_candidate_positions_order() {
        let mut b = Bin::new("1", 10.0, 10.0, 10.0, 100.0);
        assert_eq!(b.candidate_positions(), vec![Position::ORIGIN]);

        b.put_item(Item::new("a", 2.0, 3.0, 4.0, 1.0), Position::ORIGIN)
            .unwrap();
        b.put_item(Item::new("b", 1.0, 1.0, 1.0, 1.0), Position::new(2.0, 0.0, 0.0))
            .unwrap();
        assert_eq!(
            b.candidate_positions(),
            vec![
                Position::new(2.0, 0.0, 0.0),
                Position::new(3.0, 0.0, 0.0),
                Position::new(0.0, 3.0, 0.0),
                Position::new(2.0, 1.0, 0.0),
                Position::new(0.0, 0.0, 4.0),
                Position::new(2.0, 0.0, 1.0),
            ]
        );
    }
}
