use crate::error::{Error, Result};

/// The three spatial axes. Length runs along x, height along y, breadth along z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Length,
    Height,
    Breadth,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Length, Axis::Height, Axis::Breadth];
}

/// Minimum corner of a placed cuboid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const ORIGIN: Position = Position {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Length => self.x,
            Axis::Height => self.y,
            Axis::Breadth => self.z,
        }
    }

    /// Same position moved `by` along `axis`.
    pub fn advanced(&self, axis: Axis, by: f64) -> Self {
        let mut p = *self;
        match axis {
            Axis::Length => p.x += by,
            Axis::Height => p.y += by,
            Axis::Breadth => p.z += by,
        }
        p
    }
}

impl TryFrom<&[f64]> for Position {
    type Error = Error;

    fn try_from(coords: &[f64]) -> Result<Self> {
        match coords {
            [x, y, z] => Ok(Self::new(*x, *y, *z)),
            _ => Err(Error::MalformedPosition(coords.len())),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Extents of a cuboid. When produced by [`Rotation::apply`] the fields are
/// the extents along x, y and z respectively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub length: f64,
    pub height: f64,
    pub breadth: f64,
}

impl Dimensions {
    pub fn new(length: f64, height: f64, breadth: f64) -> Self {
        Self {
            length,
            height,
            breadth,
        }
    }

    pub fn volume(&self) -> f64 {
        self.length * self.height * self.breadth
    }

    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Length => self.length,
            Axis::Height => self.height,
            Axis::Breadth => self.breadth,
        }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.length, self.height, self.breadth]
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.length, self.height, self.breadth)
    }
}

/// Axis-aligned orientation of a cuboid. The name lists which base dimension
/// ends up on x, y and z: `Hbl` puts height on x, breadth on y, length on z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Lhb,
    Lbh,
    Hlb,
    Hbl,
    Blh,
    Bhl,
}

/// Index into `[length, height, breadth]` for each of x, y, z.
const PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

impl Rotation {
    /// Search order used by the placement algorithm.
    pub const ALL: [Rotation; 6] = [
        Rotation::Lhb,
        Rotation::Lbh,
        Rotation::Hlb,
        Rotation::Hbl,
        Rotation::Blh,
        Rotation::Bhl,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn apply(self, base: Dimensions) -> Dimensions {
        let src = base.to_array();
        let [x, y, z] = PERMUTATIONS[self.index()];
        Dimensions::new(src[x], src[y], src[z])
    }
}

impl TryFrom<i64> for Rotation {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(Error::InvalidRotation(value))
    }
}

impl From<Rotation> for u8 {
    fn from(r: Rotation) -> u8 {
        r as u8
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rotation::Lhb => "LHB",
            Rotation::Lbh => "LBH",
            Rotation::Hlb => "HLB",
            Rotation::Hbl => "HBL",
            Rotation::Blh => "BLH",
            Rotation::Bhl => "BHL",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotations_are_distinct_permutations() {
        let base = Dimensions::new(1.0, 2.0, 3.0);
        let mut seen: Vec<[f64; 3]> = Vec::new();
        for r in Rotation::ALL {
            let d = r.apply(base).to_array();
            let mut sorted = d;
            sorted.sort_by(f64::total_cmp);
            assert_eq!(sorted, [1.0, 2.0, 3.0], "{r} is not a permutation");
            assert!(!seen.contains(&d), "{r} repeats an earlier permutation");
            seen.push(d);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_blh_rotation() {
        let base = Dimensions::new(1.0, 4.225, 2.0);
        let d = Rotation::Blh.apply(base);
        assert_eq!(d.length, base.breadth);
        assert_eq!(d.height, base.length);
        assert_eq!(d.breadth, base.height);
    }

    #[test]
    fn test_rotation_is_pure() {
        let base = Dimensions::new(3.0, 5.0, 7.0);
        for r in Rotation::ALL {
            assert_eq!(r.apply(base), r.apply(base));
        }
    }

    #[test]
    fn test_rotation_out_of_range() {
        assert_eq!(Rotation::try_from(3), Ok(Rotation::Hbl));
        assert_eq!(Rotation::try_from(6), Err(Error::InvalidRotation(6)));
        assert_eq!(Rotation::try_from(-1), Err(Error::InvalidRotation(-1)));
    }

    #[test]
    fn test_position_from_slice() {
        let p = Position::try_from(&[1.0, 2.0, 3.0][..]).unwrap();
        assert_eq!(p, Position::new(1.0, 2.0, 3.0));
        assert_eq!(
            Position::try_from(&[1.0, 2.0][..]),
            Err(Error::MalformedPosition(2))
        );
    }

    #[test]
    fn test_advanced_moves_one_axis() {
        let p = Position::new(1.0, 2.0, 3.0).advanced(Axis::Height, 4.0);
        assert_eq!(p, Position::new(1.0, 6.0, 3.0));
    }
}
