//! Integer world-space bounds of a light volume.

use glam::{DVec3, IVec3};

/// Axis-aligned box on the block lattice.
///
/// Both corners are inclusive. Built by flooring the real minimum and
/// ceiling the real maximum, so it never shrinks the volume it encloses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightBox {
    /// Minimum corner (x, y, z).
    pub min: IVec3,
    /// Maximum corner (x, y, z).
    pub max: IVec3,
}

impl LightBox {
    /// Create a box ensuring min <= max per axis.
    pub fn new(min: IVec3, max: IVec3) -> Self {
        debug_assert!(min.cmple(max).all());
        Self { min, max }
    }

    /// Lattice box around a real-valued extent: floors `min`, ceils `max`.
    pub fn from_extent(min: DVec3, max: DVec3) -> Self {
        Self::new(min.floor().as_ivec3(), max.ceil().as_ivec3())
    }

    /// Whether a real-valued point lies inside (boundary included).
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min.as_dvec3()).all() && point.cmple(self.max.as_dvec3()).all()
    }

    /// Edge lengths along each axis.
    pub fn size(&self) -> IVec3 {
        self.max - self.min
    }

    /// Box covering both `self` and `other`.
    pub fn union(&self, other: &LightBox) -> LightBox {
        LightBox::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Iterate every block position inside the box, x fastest.
    pub fn blocks(&self) -> impl Iterator<Item = IVec3> + '_ {
        (self.min.y..=self.max.y).flat_map(move |y| {
            (self.min.z..=self.max.z)
                .flat_map(move |z| (self.min.x..=self.max.x).map(move |x| IVec3::new(x, y, z)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_rounds_outwards() {
        let bounds = LightBox::from_extent(DVec3::new(-0.5, -4.9, 3.0), DVec3::new(2.1, 1.2, 3.0));
        assert_eq!(bounds.min, IVec3::new(-1, -5, 3));
        assert_eq!(bounds.max, IVec3::new(3, 2, 3));
        assert!(bounds.contains(DVec3::new(-0.5, 1.2, 3.0)));
        assert!(bounds.contains(DVec3::new(2.1, -4.9, 3.0)));
    }

    #[test]
    fn contains_checks_every_axis() {
        let bounds = LightBox::new(IVec3::new(0, 0, 0), IVec3::new(4, 4, 4));
        assert!(bounds.contains(DVec3::new(4.0, 0.0, 2.0)));
        assert!(!bounds.contains(DVec3::new(4.01, 0.0, 2.0)));
        assert!(!bounds.contains(DVec3::new(1.0, -0.01, 2.0)));
    }

    #[test]
    fn blocks_visits_whole_lattice() {
        let bounds = LightBox::new(IVec3::new(-1, 0, 2), IVec3::new(1, 1, 2));
        let blocks: Vec<_> = bounds.blocks().collect();
        assert_eq!(blocks.len(), 3 * 2);
        assert_eq!(blocks[0], IVec3::new(-1, 0, 2));
        assert_eq!(blocks[5], IVec3::new(1, 1, 2));
        assert!(blocks.iter().all(|block| bounds.contains(block.as_dvec3())));
    }

    #[test]
    fn union_covers_both() {
        let a = LightBox::new(IVec3::new(0, 0, 0), IVec3::new(2, 2, 2));
        let b = LightBox::new(IVec3::new(-3, 1, 1), IVec3::new(1, 5, 1));
        let both = a.union(&b);
        assert_eq!(both.min, IVec3::new(-3, 0, 0));
        assert_eq!(both.max, IVec3::new(2, 5, 2));
        assert_eq!(both.size(), IVec3::new(5, 5, 2));
    }
}
