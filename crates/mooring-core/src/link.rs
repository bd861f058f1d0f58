//! Procedural chain-link template: a closed centripetal Catmull-Rom loop swept
//! into a tube.

use crate::constants::{LINK_PROFILE, LINK_RADIAL_SEGMENTS, LINK_RADIUS, LINK_TUBULAR_SEGMENTS};
use crate::mesh::{MeshData, MeshVertex};
use glam::{Quat, Vec3};

/// Chord samples used to build the arc-length table.
const ARC_LENGTH_DIVISIONS: usize = 200;

/// Closed centripetal Catmull-Rom curve through a ring of points.
#[derive(Clone, Debug)]
pub struct ClosedCatmullRom {
    points: Vec<Vec3>,
    /// Cumulative chord length at `i / ARC_LENGTH_DIVISIONS`.
    lengths: Vec<f32>,
}

impl ClosedCatmullRom {
    pub fn new(points: Vec<Vec3>) -> Self {
        let mut curve = Self {
            points,
            lengths: Vec::new(),
        };
        let mut total = 0.0;
        let mut prev = curve.point_at(0.0);
        curve.lengths.push(0.0);
        for i in 1..=ARC_LENGTH_DIVISIONS {
            let p = curve.point_at(i as f32 / ARC_LENGTH_DIVISIONS as f32);
            total += p.distance(prev);
            curve.lengths.push(total);
            prev = p;
        }
        curve
    }

    pub fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Curve parameter at fraction `u` of the total length.
    pub fn u_to_t(&self, u: f32) -> f32 {
        let total = self.length();
        if total <= 0.0 {
            return u;
        }
        let target = u.clamp(0.0, 1.0) * total;
        // First sample at or past the target.
        let hi = self.lengths.partition_point(|&l| l < target);
        if hi == 0 {
            return 0.0;
        }
        let hi = hi.min(self.lengths.len() - 1);
        let (before, after) = (self.lengths[hi - 1], self.lengths[hi]);
        let span = after - before;
        let frac = if span > 0.0 { (target - before) / span } else { 0.0 };
        (hi as f32 - 1.0 + frac) / (self.lengths.len() - 1) as f32
    }

    /// Point at fraction `u` of the arc length.
    pub fn point_at_length(&self, u: f32) -> Vec3 {
        self.point_at(self.u_to_t(u))
    }

    pub fn tangent_at_length(&self, u: f32) -> Vec3 {
        self.tangent_at(self.u_to_t(u))
    }

    /// Point at `t` in \[0, 1\]; `t = 0` and `t = 1` coincide.
    pub fn point_at(&self, t: f32) -> Vec3 {
        let l = self.points.len();
        match l {
            0 => return Vec3::ZERO,
            1 => return self.points[0],
            _ => {}
        }
        let p = l as f32 * t;
        let seg = p.floor();
        let weight = p - seg;
        let i = (seg as i64).rem_euclid(l as i64) as usize;
        let p0 = self.points[(i + l - 1) % l];
        let p1 = self.points[i];
        let p2 = self.points[(i + 1) % l];
        let p3 = self.points[(i + 2) % l];

        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }

        let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

        let c0 = p1;
        let c1 = t1;
        let c2 = -3.0 * p1 + 3.0 * p2 - 2.0 * t1 - t2;
        let c3 = 2.0 * p1 - 2.0 * p2 + t1 + t2;
        let w = weight;
        c0 + c1 * w + c2 * (w * w) + c3 * (w * w * w)
    }

    fn tangent_at(&self, t: f32) -> Vec3 {
        const H: f32 = 1e-3;
        (self.point_at(t + H) - self.point_at(t - H)).normalize_or_zero()
    }
}

/// Sweep a circle of `radius` along `path`, using parallel-transported frames
/// so the tube does not twist. Rings are spaced evenly by arc length.
pub fn tube_mesh(
    path: &ClosedCatmullRom,
    tubular_segments: usize,
    radius: f32,
    radial_segments: usize,
) -> MeshData {
    let tubular_segments = tubular_segments.max(1);
    let radial_segments = radial_segments.max(3);

    let tangents: Vec<Vec3> = (0..=tubular_segments)
        .map(|i| path.tangent_at_length(i as f32 / tubular_segments as f32))
        .collect();

    // Initial normal: perpendicular to the tangent, seeded from its smallest axis.
    let t0 = tangents[0];
    let a = t0.abs();
    let seed = if a.x <= a.y && a.x <= a.z {
        Vec3::X
    } else if a.y <= a.z {
        Vec3::Y
    } else {
        Vec3::Z
    };
    let mut normals = Vec::with_capacity(tangents.len());
    let mut binormals = Vec::with_capacity(tangents.len());
    let n0 = t0.cross(t0.cross(seed).normalize_or_zero());
    normals.push(n0);
    binormals.push(t0.cross(n0));
    for i in 1..tangents.len() {
        let mut n = normals[i - 1];
        let axis = tangents[i - 1].cross(tangents[i]);
        if axis.length() > f32::EPSILON {
            let theta = tangents[i - 1].dot(tangents[i]).clamp(-1.0, 1.0).acos();
            n = Quat::from_axis_angle(axis.normalize(), theta) * n;
        }
        normals.push(n);
        binormals.push(tangents[i].cross(n));
    }

    let mut mesh = MeshData::default();
    for i in 0..=tubular_segments {
        let center = path.point_at_length(i as f32 / tubular_segments as f32);
        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * std::f32::consts::TAU;
            let (sin, cos) = (v.sin(), -v.cos());
            let normal = (normals[i] * cos + binormals[i] * sin).normalize_or_zero();
            mesh.vertices
                .push(MeshVertex::new(center + normal * radius, normal));
        }
    }
    let ring = radial_segments as u32 + 1;
    for j in 1..=tubular_segments as u32 {
        for i in 1..=radial_segments as u32 {
            let a = ring * (j - 1) + (i - 1);
            let b = ring * j + (i - 1);
            let c = ring * j + i;
            let d = ring * (j - 1) + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

/// The chain link every instance draws.
pub fn chain_link_mesh() -> MeshData {
    let path = ClosedCatmullRom::new(LINK_PROFILE.to_vec());
    tube_mesh(&path, LINK_TUBULAR_SEGMENTS, LINK_RADIUS, LINK_RADIAL_SEGMENTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_curve_passes_through_control_points() {
        let path = ClosedCatmullRom::new(LINK_PROFILE.to_vec());
        for (i, p) in LINK_PROFILE.iter().enumerate() {
            let t = i as f32 / LINK_PROFILE.len() as f32;
            assert!(path.point_at(t).distance(*p) < 1e-4, "point {i}");
        }
        assert!(path.point_at(1.0).distance(path.point_at(0.0)) < 1e-4);
    }

    #[test]
    fn tube_rings_are_evenly_spaced_along_the_loop() {
        let path = ClosedCatmullRom::new(LINK_PROFILE.to_vec());
        let n = LINK_TUBULAR_SEGMENTS;
        let centers: Vec<Vec3> = (0..=n)
            .map(|i| path.point_at_length(i as f32 / n as f32))
            .collect();
        let step = path.length() / n as f32;
        for (i, w) in centers.windows(2).enumerate() {
            let d = w[0].distance(w[1]);
            assert!((d - step).abs() < step * 0.1, "segment {i}: {d} vs {step}");
        }
        assert!(centers[0].distance(centers[n]) < 1e-4);
    }

    #[test]
    fn arc_length_mapping_is_monotonic_with_fixed_ends() {
        let path = ClosedCatmullRom::new(LINK_PROFILE.to_vec());
        assert_eq!(path.u_to_t(0.0), 0.0);
        assert!((path.u_to_t(1.0) - 1.0).abs() < 1e-5);
        let ts: Vec<f32> = (0..=50).map(|i| path.u_to_t(i as f32 / 50.0)).collect();
        assert!(ts.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn link_mesh_has_expected_topology() {
        let m = chain_link_mesh();
        assert_eq!(
            m.vertices.len(),
            (LINK_TUBULAR_SEGMENTS + 1) * (LINK_RADIAL_SEGMENTS + 1)
        );
        assert_eq!(
            m.indices.len(),
            LINK_TUBULAR_SEGMENTS * LINK_RADIAL_SEGMENTS * 6
        );
        assert!(m.vertices.iter().all(|v| v.position.iter().all(|c| c.is_finite())));
    }
}
