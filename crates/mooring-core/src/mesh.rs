use crate::bounds::Aabb;
use glam::{Mat3, Mat4, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// Indexed triangle list.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().map(|v| Vec3::from(v.position)))
    }

    /// Append `other` with its vertices transformed by `transform`.
    pub fn append_transformed(&mut self, other: &MeshData, transform: Mat4) {
        let base = self.vertices.len() as u32;
        let normal_m = Mat3::from_mat4(transform).inverse().transpose();
        self.vertices.extend(other.vertices.iter().map(|v| {
            MeshVertex::new(
                transform.transform_point3(Vec3::from(v.position)),
                (normal_m * Vec3::from(v.normal)).normalize_or_zero(),
            )
        }));
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }
}

/// Axis-aligned box centred on the origin with outward normals.
pub fn box_mesh(size: Vec3) -> MeshData {
    let h = size * 0.5;
    // (normal, u axis, v axis) per face
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let mut mesh = MeshData::default();
    for (n, u, v) in faces {
        let base = mesh.vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = (n + u * su + v * sv) * h;
            mesh.vertices.push(MeshVertex::new(p, n));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Horizontal plane at y = 0 facing +Y.
pub fn plane_mesh(width: f32, depth: f32) -> MeshData {
    let hw = width * 0.5;
    let hd = depth * 0.5;
    let vertices = [
        Vec3::new(-hw, 0.0, hd),
        Vec3::new(hw, 0.0, hd),
        Vec3::new(hw, 0.0, -hd),
        Vec3::new(-hw, 0.0, -hd),
    ]
    .into_iter()
    .map(|p| MeshVertex::new(p, Vec3::Y))
    .collect();
    MeshData {
        vertices,
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_mesh_spans_requested_size() {
        let m = box_mesh(Vec3::new(2.0, 4.0, 6.0));
        let b = m.bounds().unwrap();
        assert_eq!(b.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(b.max, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.vertices.len(), 24);
        assert_eq!(m.indices.len(), 36);
    }

    #[test]
    fn append_offsets_indices() {
        let mut a = plane_mesh(1.0, 1.0);
        let b = plane_mesh(1.0, 1.0);
        a.append_transformed(&b, Mat4::from_translation(Vec3::Y));
        assert_eq!(a.vertices.len(), 8);
        assert_eq!(a.indices[6..], [4, 5, 6, 4, 6, 7]);
        assert_eq!(a.vertices[4].position[1], 1.0);
    }
}
