//! Offline three-dimensional bin packing.
//!
//! Items are assigned to bins greedily: bins and items are ordered once by a
//! [`Strategy`], then every pending item is tried against each bin in turn at
//! anchor positions flush against already fitted items, over the six
//! axis-aligned rotations. Items that fit nowhere are reported, not treated
//! as errors.

pub mod container;
pub mod error;
pub mod heuristic;
pub mod intersection;
pub mod item;
pub mod job;
pub mod packager;
pub mod render;
pub mod report;
pub mod types;

pub use container::{Bin, Fit};
pub use error::{Error, Result};
pub use heuristic::{SortDirection, SortKey, SortOrder, Strategy};
pub use intersection::Cuboid;
pub use item::Item;
pub use job::{CuboidSpec, PackJob};
pub use packager::Packager;
pub use report::{PackingReport, Precision};
pub use types::{Axis, Dimensions, Position, Rotation};
