use crate::camera::basis_rotation;
use crate::error::SceneError;
use glam::{Mat4, Quat, Vec3};

/// Per-link transforms for one chain, drawn from a fixed-size instance pool.
///
/// Only the first `len()` pool slots hold links; the remainder stay unused.
#[derive(Clone, Debug)]
pub struct ChainInstanceSet {
    name: String,
    capacity: usize,
    transforms: Vec<Mat4>,
}

impl ChainInstanceSet {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn transforms(&self) -> &[Mat4] {
        &self.transforms
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn position(&self, index: usize) -> Option<Vec3> {
        self.transforms.get(index).map(|m| m.w_axis.truncate())
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.transforms.iter().map(|m| m.w_axis.truncate())
    }
}

/// Orientation of link `index` sitting at `here` and facing `next`.
///
/// Even links get an extra quarter turn about their forward axis so that
/// neighbouring links interlock.
#[inline]
pub fn link_rotation(index: usize, here: Vec3, next: Vec3) -> Quat {
    let facing = basis_rotation(next - here, Vec3::Y);
    if index % 2 == 0 {
        facing * Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)
    } else {
        facing
    }
}

/// Lay one link at every sample except the last, each looking at its
/// successor.
///
/// Fails when the pool cannot hold every link: a silently shortened chain
/// would stop short of its anchor.
pub fn instance_chain(
    name: impl Into<String>,
    points: &[Vec3],
    capacity: usize,
) -> Result<ChainInstanceSet, SceneError> {
    let name = name.into();
    let required = points.len().saturating_sub(1);
    if required > capacity {
        return Err(SceneError::PoolCapacity {
            name,
            capacity,
            required,
        });
    }
    let transforms = points
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            Mat4::from_rotation_translation(link_rotation(i, pair[0], pair[1]), pair[0])
        })
        .collect();
    Ok(ChainInstanceSet {
        name,
        capacity,
        transforms,
    })
}
