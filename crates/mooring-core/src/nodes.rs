//! Loaded model hierarchy.
//!
//! Models arrive as a tree of nodes of a closed set of kinds. Only mesh nodes
//! carry geometry and a material; the rest contribute transforms.

use crate::bounds::Aabb;
use crate::constants::{METAL_COLOR, METAL_METALNESS, METAL_ROUGHNESS};
use crate::mesh::MeshData;
use glam::{EulerRot, Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// 0xRRGGBB, sRGB.
    pub color: u32,
    pub metalness: f32,
    pub roughness: f32,
    /// Flat colour, no lighting.
    pub unlit: bool,
}

impl Material {
    /// The brushed metal shared by the chains and the models.
    pub const fn metal() -> Self {
        Self {
            color: METAL_COLOR,
            metalness: METAL_METALNESS,
            roughness: METAL_ROUGHNESS,
            unlit: false,
        }
    }

    pub const fn basic(color: u32) -> Self {
        Self {
            color,
            metalness: 0.0,
            roughness: 1.0,
            unlit: true,
        }
    }
}

#[derive(Clone, Debug)]
pub enum NodeKind {
    Mesh { mesh: MeshData, material: Material },
    Group,
    Light,
    Camera,
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub transform: Mat4,
    pub kind: NodeKind,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn group(name: impl Into<String>, transform: Mat4, children: Vec<SceneNode>) -> Self {
        Self {
            name: name.into(),
            transform,
            kind: NodeKind::Group,
            children,
        }
    }

    /// Visit every node depth-first with its world transform.
    pub fn traverse<F: FnMut(&SceneNode, Mat4)>(&self, parent: Mat4, f: &mut F) {
        let world = parent * self.transform;
        f(self, world);
        for child in &self.children {
            child.traverse(world, f);
        }
    }

    /// Give every mesh node `material`. Returns how many were replaced.
    pub fn replace_mesh_materials(&mut self, replacement: Material) -> usize {
        let mut replaced = 0;
        if let NodeKind::Mesh { material, .. } = &mut self.kind {
            *material = replacement;
            replaced += 1;
        }
        for child in &mut self.children {
            replaced += child.replace_mesh_materials(replacement);
        }
        replaced
    }

    /// Collapse the tree into one world-space mesh per distinct material.
    pub fn flatten(&self, root: Mat4) -> Vec<(MeshData, Material)> {
        let mut out: Vec<(MeshData, Material)> = Vec::new();
        self.traverse(root, &mut |node, world| match &node.kind {
            NodeKind::Mesh { mesh, material } => {
                match out.iter_mut().find(|(_, m)| m == material) {
                    Some((merged, _)) => merged.append_transformed(mesh, world),
                    None => {
                        let mut merged = MeshData::default();
                        merged.append_transformed(mesh, world);
                        out.push((merged, *material));
                    }
                }
            }
            NodeKind::Group | NodeKind::Light | NodeKind::Camera => {}
        });
        out
    }

    pub fn world_bounds(&self, root: Mat4) -> Option<Aabb> {
        let mut bounds: Option<Aabb> = None;
        self.traverse(root, &mut |node, world| {
            if let NodeKind::Mesh { mesh, .. } = &node.kind {
                if let Some(b) = mesh.bounds() {
                    let b = b.transformed(&world);
                    bounds = Some(bounds.map_or(b, |acc| acc.union(&b)));
                }
            }
        });
        bounds
    }

    pub fn mesh_count(&self) -> usize {
        let mut n = 0;
        self.traverse(Mat4::IDENTITY, &mut |node, _| {
            if matches!(node.kind, NodeKind::Mesh { .. }) {
                n += 1;
            }
        });
        n
    }
}

/// Where and how a model file is placed in the scene.
#[derive(Clone, Debug)]
pub struct ModelPlacement {
    pub name: String,
    pub path: String,
    pub position: Vec3,
    /// Euler XYZ, radians.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl ModelPlacement {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z),
            self.position,
        )
    }
}

/// The vessel and the turret it is moored around.
pub fn default_model_placements() -> Vec<ModelPlacement> {
    use crate::constants::*;
    vec![
        ModelPlacement {
            name: VESSEL_NAME.to_string(),
            path: VESSEL_PATH.to_string(),
            position: VESSEL_POSITION,
            rotation: VESSEL_ROTATION,
            scale: Vec3::ONE,
        },
        ModelPlacement {
            name: TURRET_NAME.to_string(),
            path: TURRET_PATH.to_string(),
            position: TURRET_POSITION,
            rotation: Vec3::ZERO,
            scale: Vec3::splat(TURRET_SCALE),
        },
    ]
}
