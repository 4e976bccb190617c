//! Axis-aligned boxes and sphere overlap tests
//!
//! Boxes are described the way the level data describes them: a center point
//! and the full size along each axis. The box spans `center ± size / 2`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box centered on `center` with full extents `size`
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Inclusive point containment
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Grow the box by `amount` on every side
    pub fn expanded(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(amount),
            max: self.max + Vec3::splat(amount),
        }
    }

    /// Sphere overlap: the sphere center lies inside the box grown by the radius
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.expanded(radius).contains_point(center)
    }
}

/// Sphere/sphere overlap (touching counts)
#[inline]
pub fn spheres_overlap(a: Vec3, radius_a: f32, b: Vec3, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) <= reach * reach
}
