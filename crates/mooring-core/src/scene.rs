//! Scene contents that take part in picking and drawing: the instanced
//! chains, loaded models and their pick volumes.

use crate::bounds::{Aabb, Ray};
use crate::config::SceneConfig;
use crate::constants::*;
use crate::curve::{default_mooring_lines, MooringLine};
use crate::error::SceneError;
use crate::instancer::{instance_chain, ChainInstanceSet};
use crate::link::chain_link_mesh;
use crate::mesh::{box_mesh, MeshData};
use crate::nodes::{Material, ModelPlacement, SceneNode};
use crate::pick::{Hit, ObjectId, PickTarget};
use glam::Mat4;
use log::info;

/// Geometry the picker tests a ray against.
#[derive(Clone, Debug)]
pub enum PickShape {
    /// One sphere per chain link, with a box around all of them to reject
    /// misses early.
    Spheres {
        centers: Vec<glam::Vec3>,
        radius: f32,
        bounds: Aabb,
    },
    Box(Aabb),
}

impl PickShape {
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match self {
            PickShape::Spheres {
                centers,
                radius,
                bounds,
            } => {
                ray.intersect_aabb(bounds)?;
                centers
                    .iter()
                    .filter_map(|c| ray.intersect_sphere(*c, *radius))
                    .min_by(f32::total_cmp)
            }
            PickShape::Box(aabb) => ray.intersect_aabb(aabb),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PickObject {
    pub name: String,
    pub material: Material,
    pub shape: PickShape,
}

/// A placed model, flattened to world space, one mesh per material.
#[derive(Clone, Debug)]
pub struct ModelInstance {
    pub name: String,
    /// Pick box id; models without geometry are not pickable.
    pub object: Option<ObjectId>,
    pub meshes: Vec<(MeshData, Material)>,
}

/// Unit vector toward the sun from its elevation above the horizon and its
/// azimuth around +Y, measured from +Z.
pub fn sun_direction(elevation_degrees: f32, azimuth_degrees: f32) -> glam::Vec3 {
    let phi = (90.0 - elevation_degrees).to_radians();
    let theta = azimuth_degrees.to_radians();
    glam::Vec3::new(
        phi.sin() * theta.sin(),
        phi.cos(),
        phi.sin() * theta.cos(),
    )
}

/// Unlit ocean volume and sea floor.
pub fn environment_meshes() -> Vec<(MeshData, Material)> {
    vec![
        (
            transformed(
                box_mesh(OCEAN_VOLUME_SIZE),
                Mat4::from_translation(OCEAN_VOLUME_CENTER),
            ),
            Material::basic(OCEAN_VOLUME_COLOR),
        ),
        (
            transformed(
                box_mesh(SEA_FLOOR_SIZE),
                Mat4::from_translation(SEA_FLOOR_CENTER),
            ),
            Material::basic(SEA_FLOOR_COLOR),
        ),
    ]
}

fn transformed(mesh: MeshData, m: Mat4) -> MeshData {
    let mut out = MeshData::default();
    out.append_transformed(&mesh, m);
    out
}

#[derive(Clone, Debug)]
pub struct Scene {
    link_mesh: MeshData,
    chains: Vec<ChainInstanceSet>,
    objects: Vec<PickObject>,
    models: Vec<ModelInstance>,
}

impl Scene {
    /// Sample and instance every mooring line. Chain `i` gets object id `i`.
    pub fn new(config: &SceneConfig) -> Result<Self, SceneError> {
        Self::with_lines(config, &default_mooring_lines())
    }

    pub fn with_lines(config: &SceneConfig, lines: &[MooringLine]) -> Result<Self, SceneError> {
        let mut chains = Vec::with_capacity(lines.len());
        let mut objects = Vec::with_capacity(lines.len());
        for line in lines {
            let points = line.curve.sample_points(config.chain_samples);
            let set = instance_chain(line.name.clone(), &points, config.chain_pool_capacity)?;
            let centers: Vec<glam::Vec3> = set.positions().collect();
            let bounds = Aabb::from_points(centers.iter().copied())
                .unwrap_or(Aabb::new(line.curve.start, line.curve.start))
                .expanded(LINK_PICK_RADIUS);
            info!(
                "[scene] {}: {} of {} links",
                set.name(),
                set.len(),
                set.capacity()
            );
            objects.push(PickObject {
                name: line.name.clone(),
                material: Material::metal(),
                shape: PickShape::Spheres {
                    centers,
                    radius: LINK_PICK_RADIUS,
                    bounds,
                },
            });
            chains.push(set);
        }
        Ok(Self {
            link_mesh: chain_link_mesh(),
            chains,
            objects,
            models: Vec::new(),
        })
    }

    pub fn link_mesh(&self) -> &MeshData {
        &self.link_mesh
    }

    pub fn chains(&self) -> &[ChainInstanceSet] {
        &self.chains
    }

    pub fn objects(&self) -> &[PickObject] {
        &self.objects
    }

    pub fn models(&self) -> &[ModelInstance] {
        &self.models
    }

    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.objects.iter().position(|o| o.name == name)
    }

    /// Place a loaded model: every mesh gets the shared metal material and
    /// the model becomes pickable through its world-space bounds.
    pub fn add_model(&mut self, placement: &ModelPlacement, mut root: SceneNode) -> &ModelInstance {
        let replaced = root.replace_mesh_materials(Material::metal());
        let world = placement.matrix();
        let meshes = root.flatten(world);
        let object = root.world_bounds(world).map(|bounds| {
            self.objects.push(PickObject {
                name: placement.name.clone(),
                material: Material::metal(),
                shape: PickShape::Box(bounds),
            });
            self.objects.len() - 1
        });
        info!(
            "[scene] model {} placed: {} meshes, {} materials replaced",
            placement.name,
            meshes.len(),
            replaced
        );
        self.models.push(ModelInstance {
            name: placement.name.clone(),
            object,
            meshes,
        });
        &self.models[self.models.len() - 1]
    }

    /// Every object the ray meets, nearest first.
    pub fn raycast(&self, ray: &Ray) -> Vec<Hit> {
        let mut hits: Vec<Hit> = self
            .objects
            .iter()
            .enumerate()
            .filter_map(|(object, o)| {
                o.shape
                    .intersect(ray)
                    .map(|distance| Hit { object, distance })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

impl PickTarget for Scene {
    fn object_name(&self, object: ObjectId) -> Option<&str> {
        self.objects.get(object).map(|o| o.name.as_str())
    }

    fn color(&self, object: ObjectId) -> Option<u32> {
        self.objects.get(object).map(|o| o.material.color)
    }

    fn set_color(&mut self, object: ObjectId, color: u32) {
        if let Some(o) = self.objects.get_mut(object) {
            o.material.color = color;
        }
    }
}
