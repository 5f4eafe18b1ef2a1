use crate::error::Result;
use crate::intersection::Cuboid;
use crate::types::{Dimensions, Position, Rotation};

/// A cuboid to be packed. Rotation and position are only meaningful once the
/// item has been fitted into a bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: String,
    dimensions: Dimensions,
    weight: f64,
    rotation: Rotation,
    position: Position,
}

impl Item {
    pub fn new(id: impl Into<String>, length: f64, height: f64, breadth: f64, weight: f64) -> Self {
        Self {
            id: id.into(),
            dimensions: Dimensions::new(length, height, breadth),
            weight,
            rotation: Rotation::default(),
            position: Position::ORIGIN,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Base dimensions, independent of rotation.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn volume(&self) -> f64 {
        self.dimensions.volume()
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Extents along x, y, z under the current rotation.
    pub fn dimension(&self) -> Dimensions {
        self.dimension_for(self.rotation)
    }

    pub fn dimension_for(&self, rotation: Rotation) -> Dimensions {
        rotation.apply(self.dimensions)
    }

    /// Region occupied under the current rotation and position.
    pub fn cuboid(&self) -> Cuboid {
        Cuboid::new(self.position, self.dimension())
    }

    pub fn set_rotation(&mut self, rotation: i64) -> Result<()> {
        self.rotation = Rotation::try_from(rotation)?;
        Ok(())
    }

    pub fn set_position(&mut self, coords: &[f64]) -> Result<()> {
        self.position = Position::try_from(coords)?;
        Ok(())
    }

    pub(crate) fn place(&mut self, rotation: Rotation, position: Position) {
        self.rotation = rotation;
        self.position = position;
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.id, self.dimensions)
    }
}
