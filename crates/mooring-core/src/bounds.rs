//! Axis-aligned boxes, rays, and the camera boundary clamp.

use glam::{Mat4, Vec3};

/// Half-line used for picking. `direction` is expected to be normalized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Distance along the ray to the first sphere surface hit in front of the
    /// origin. A ray starting inside the sphere reports the exit point.
    #[inline]
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.dot(oc) - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let t = -b - root;
        if t >= 0.0 {
            return Some(t);
        }
        let t = -b + root;
        (t >= 0.0).then_some(t)
    }

    /// Slab test. Returns the entry distance, or 0 when the origin is inside.
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<f32> {
        let inv = self.direction.recip();
        let t0 = (aabb.min - self.origin) * inv;
        let t1 = (aabb.max - self.origin) * inv;
        let t_near = t0.min(t1).max_element();
        let t_far = t0.max(t1).min_element();
        if t_near.is_nan() || t_far.is_nan() || t_far < t_near.max(0.0) {
            return None;
        }
        Some(t_near.max(0.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let (min, max) = it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn expanded(&self, margin: f32) -> Aabb {
        Aabb {
            min: self.min - Vec3::splat(margin),
            max: self.max + Vec3::splat(margin),
        }
    }

    /// Bounds of this box after an affine transform (all eight corners).
    pub fn transformed(&self, m: &Mat4) -> Aabb {
        let corners = (0..8).map(|i| {
            let c = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            m.transform_point3(c)
        });
        // Eight corners are always present.
        Aabb::from_points(corners).unwrap_or(*self)
    }

    /// Clamp each coordinate of `p` to this box on the same axis.
    #[inline]
    pub fn clamp_point(&self, p: Vec3) -> Vec3 {
        p.max(self.min).min(self.max)
    }
}

/// Keeps the free-fly camera inside a fixed reference volume.
///
/// Each axis is clamped independently against its own \[min, max\] range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryClamp {
    volume: Aabb,
}

impl BoundaryClamp {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self {
            volume: Aabb::from_center_size(center, size),
        }
    }

    pub fn volume(&self) -> &Aabb {
        &self.volume
    }

    #[inline]
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        self.volume.clamp_point(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slab_test_hits_box_in_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
        let b = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        let t = ray.intersect_aabb(&b).unwrap();
        assert!((t - 9.0).abs() < 1e-5);
    }

    #[test]
    fn slab_test_ignores_box_behind() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        let b = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        assert!(ray.intersect_aabb(&b).is_none());
    }

    #[test]
    fn sphere_hit_from_inside_reports_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = ray.intersect_sphere(Vec3::ZERO, 3.0).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
    }
}
