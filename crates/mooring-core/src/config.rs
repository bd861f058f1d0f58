use crate::constants::*;
use glam::Vec3;

/// Tunable scene parameters. `Default` yields the shipped scene.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// Curve segments per mooring line; each line gets this many links.
    pub chain_samples: usize,
    /// Instanced links allocated per line. Must be at least `chain_samples`.
    pub chain_pool_capacity: usize,
    pub boundary_center: Vec3,
    pub boundary_size: Vec3,
    pub highlight_color: u32,
    pub water_time_step: f32,
    pub fly_enabled: bool,
    pub fly_movement_speed: f32,
    pub fly_roll_speed: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            chain_samples: CHAIN_SAMPLES,
            chain_pool_capacity: CHAIN_POOL_CAPACITY,
            boundary_center: BOUNDARY_CENTER,
            boundary_size: Vec3::splat(BOUNDARY_SIZE),
            highlight_color: HIGHLIGHT_COLOR,
            water_time_step: WATER_TIME_STEP,
            fly_enabled: true,
            fly_movement_speed: FLY_MOVEMENT_SPEED,
            fly_roll_speed: FLY_ROLL_SPEED,
        }
    }
}
