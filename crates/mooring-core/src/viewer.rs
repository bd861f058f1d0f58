use crate::bounds::BoundaryClamp;
use crate::camera::CameraRig;
use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::fly::FlyControls;
use crate::nodes::{ModelPlacement, SceneNode};
use crate::pick::PickController;
use crate::presets::{CameraPreset, CameraPresetRegistry};
use crate::scene::{ModelInstance, Scene};
use glam::Vec2;
use log::info;

/// Everything the frame loop and the input handlers share.
#[derive(Clone, Debug)]
pub struct Viewer {
    pub config: SceneConfig,
    pub scene: Scene,
    pub rig: CameraRig,
    pub presets: CameraPresetRegistry,
    pub picker: PickController,
    pub fly: FlyControls,
    pub boundary: BoundaryClamp,
    pub water_time: f32,
    pub edit_mode: bool,
}

impl Viewer {
    pub fn new(config: SceneConfig) -> Result<Self, SceneError> {
        let scene = Scene::new(&config)?;
        let mut fly = FlyControls::new(config.fly_movement_speed, config.fly_roll_speed);
        fly.enabled = config.fly_enabled;
        Ok(Self {
            scene,
            rig: CameraRig::default(),
            presets: CameraPresetRegistry::default(),
            picker: PickController::new(config.highlight_color),
            fly,
            boundary: BoundaryClamp::new(config.boundary_center, config.boundary_size),
            water_time: 0.0,
            edit_mode: true,
            config,
        })
    }

    /// One frame of simulation: clamp, water, then fly controls and tweens.
    pub fn tick(&mut self, dt_sec: f32) {
        self.rig.pose.position = self.boundary.clamp(self.rig.pose.position);
        self.water_time += self.config.water_time_step;
        self.fly.update(dt_sec, &mut self.rig.pose);
        self.rig.advance(dt_sec);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.rig.set_viewport(width, height);
    }

    /// Hover highlight under the pointer. Returns true when colours changed.
    pub fn pointer_move(&mut self, ndc: Vec2) -> bool {
        self.fly.pointer_move(ndc);
        let ray = self.rig.ray_from_ndc(ndc);
        let hits = self.scene.raycast(&ray);
        self.picker.pointer_move(&hits, &mut self.scene)
    }

    /// Fly to the preset of the clicked chain. Returns its preset index.
    pub fn click(&mut self, ndc: Vec2) -> Option<usize> {
        let ray = self.rig.ray_from_ndc(ndc);
        let hits = self.scene.raycast(&ray);
        let chain = self.picker.click(&hits, &self.scene)?;
        let preset = self.presets.select(chain)?.clone();
        info!("[pick] chain{chain} -> {}", preset.name);
        self.start_transition(&preset);
        Some(chain)
    }

    pub fn go_home(&mut self) {
        if let Some(preset) = self.presets.reset_home().cloned() {
            self.start_transition(&preset);
        }
    }

    pub fn go_next(&mut self) {
        if let Some(preset) = self.presets.next().cloned() {
            self.start_transition(&preset);
        }
    }

    pub fn go_prev(&mut self) {
        if let Some(preset) = self.presets.prev().cloned() {
            self.start_transition(&preset);
        }
    }

    pub fn toggle_edit_mode(&mut self) -> bool {
        self.edit_mode = !self.edit_mode;
        info!("[ui] edit mode {}", if self.edit_mode { "on" } else { "off" });
        self.edit_mode
    }

    pub fn add_model(&mut self, placement: &ModelPlacement, root: SceneNode) -> &ModelInstance {
        self.scene.add_model(placement, root)
    }

    fn start_transition(&mut self, preset: &CameraPreset) {
        info!("[camera] transition to {}", preset.name);
        self.rig.transition_to(preset);
    }
}
