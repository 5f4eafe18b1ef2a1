use crate::types::{Axis, Dimensions, Position};

/// An occupied region: minimum corner plus extents under the chosen rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    pub position: Position,
    pub dimension: Dimensions,
}

impl Cuboid {
    pub fn new(position: Position, dimension: Dimensions) -> Self {
        Self {
            position,
            dimension,
        }
    }

    fn center(&self, axis: Axis) -> f64 {
        self.position.get(axis) + self.dimension.get(axis) / 2.0
    }

    /// Whether the projections onto the `a`/`b` plane overlap.
    fn overlaps_on(&self, other: &Cuboid, a: Axis, b: Axis) -> bool {
        let da = (self.center(a) - other.center(a)).abs();
        let db = (self.center(b) - other.center(b)).abs();

        da < (self.dimension.get(a) + other.dimension.get(a)) / 2.0
            && db < (self.dimension.get(b) + other.dimension.get(b)) / 2.0
    }

    /// Strict overlap on all three axes. Cuboids sharing only a face, edge or
    /// corner do not intersect.
    pub fn intersects(&self, other: &Cuboid) -> bool {
        self.overlaps_on(other, Axis::Length, Axis::Breadth)
            && self.overlaps_on(other, Axis::Breadth, Axis::Height)
            && self.overlaps_on(other, Axis::Height, Axis::Length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cuboid(pos: [f64; 3], dim: [f64; 3]) -> Cuboid {
        Cuboid::new(
            Position::new(pos[0], pos[1], pos[2]),
            Dimensions::new(dim[0], dim[1], dim[2]),
        )
    }

    #[test]
    fn test_equal_position_intersects() {
        let a = cuboid([0.0, 0.0, 0.0], [1.0, 4.225, 2.0]);
        let b = cuboid([0.0, 0.0, 0.0], [2.25, 5.0, 2.0]);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_corner_inside_intersects() {
        let a = cuboid([0.0, 0.0, 0.0], [1.0, 4.225, 2.0]);
        let b = cuboid([0.99, 4.215, 1.99], [2.25, 5.0, 2.0]);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_diagonal_corner_contact_does_not_intersect() {
        let a = cuboid([0.0, 0.0, 0.0], [1.0, 4.225, 2.0]);
        let b = cuboid([1.0, 4.225, 2.0], [2.25, 5.0, 2.0]);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_face_contact_does_not_intersect() {
        let a = cuboid([0.0, 0.0, 0.0], [5.0, 5.0, 5.0]);
        for axis in Axis::ALL {
            let b = Cuboid::new(a.position.advanced(axis, 5.0), a.dimension);
            assert!(!a.intersects(&b), "face contact on {axis:?}");
        }
    }

    #[test]
    fn test_contained_intersects() {
        let outer = cuboid([0.0, 0.0, 0.0], [10.0, 10.0, 10.0]);
        let inner = cuboid([4.0, 4.0, 4.0], [1.0, 1.0, 1.0]);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_matches_direct_aabb_check() {
        fn aabb(a: &Cuboid, b: &Cuboid) -> bool {
            Axis::ALL.iter().all(|&axis| {
                let (a0, b0) = (a.position.get(axis), b.position.get(axis));
                a0 < b0 + b.dimension.get(axis) && b0 < a0 + a.dimension.get(axis)
            })
        }

        let a = cuboid([1.0, 1.0, 1.0], [2.0, 3.0, 1.0]);
        let offsets = [-3.0, -2.0, -0.5, 0.0, 0.5, 1.0, 2.0, 3.0];
        for &dx in &offsets {
            for &dy in &offsets {
                for &dz in &offsets {
                    let b = cuboid([1.0 + dx, 1.0 + dy, 1.0 + dz], [1.0, 2.0, 1.0]);
                    assert_eq!(
                        a.intersects(&b),
                        aabb(&a, &b),
                        "mismatch at offset ({dx}, {dy}, {dz})"
                    );
                }
            }
        }
    }
}
