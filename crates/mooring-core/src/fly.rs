//! Keyboard and drag-to-look free-fly camera controller.
//!
//! Key state accumulates into a local-frame move vector and an angular
//! rotation vector; `update` integrates both with the frame delta.

use crate::camera::CameraPose;
use crate::constants::FLY_SLOW_MULTIPLIER;
use glam::{Quat, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlyKey {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
    PitchUp,
    PitchDown,
    YawLeft,
    YawRight,
    RollLeft,
    RollRight,
    Slow,
}

impl FlyKey {
    /// Map a `KeyboardEvent.code` to a control.
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "KeyW" => FlyKey::Forward,
            "KeyS" => FlyKey::Back,
            "KeyA" => FlyKey::Left,
            "KeyD" => FlyKey::Right,
            "KeyR" => FlyKey::Up,
            "KeyF" => FlyKey::Down,
            "ArrowUp" => FlyKey::PitchUp,
            "ArrowDown" => FlyKey::PitchDown,
            "ArrowLeft" => FlyKey::YawLeft,
            "ArrowRight" => FlyKey::YawRight,
            "KeyQ" => FlyKey::RollLeft,
            "KeyE" => FlyKey::RollRight,
            "ShiftLeft" | "ShiftRight" => FlyKey::Slow,
            _ => return None,
        })
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct MoveState {
    forward: f32,
    back: f32,
    left: f32,
    right: f32,
    up: f32,
    down: f32,
    pitch_up: f32,
    pitch_down: f32,
    yaw_left: f32,
    yaw_right: f32,
    roll_left: f32,
    roll_right: f32,
}

#[derive(Clone, Debug)]
pub struct FlyControls {
    pub enabled: bool,
    pub movement_speed: f32,
    pub roll_speed: f32,
    state: MoveState,
    slow: bool,
    drag_count: u32,
}

impl FlyControls {
    pub fn new(movement_speed: f32, roll_speed: f32) -> Self {
        Self {
            enabled: true,
            movement_speed,
            roll_speed,
            state: MoveState::default(),
            slow: false,
            drag_count: 0,
        }
    }

    pub fn key_down(&mut self, key: FlyKey) {
        self.set_key(key, true);
    }

    pub fn key_up(&mut self, key: FlyKey) {
        self.set_key(key, false);
    }

    fn set_key(&mut self, key: FlyKey, down: bool) {
        let v = if down { 1.0 } else { 0.0 };
        let s = &mut self.state;
        match key {
            FlyKey::Forward => s.forward = v,
            FlyKey::Back => s.back = v,
            FlyKey::Left => s.left = v,
            FlyKey::Right => s.right = v,
            FlyKey::Up => s.up = v,
            FlyKey::Down => s.down = v,
            FlyKey::PitchUp => s.pitch_up = v,
            FlyKey::PitchDown => s.pitch_down = v,
            FlyKey::YawLeft => s.yaw_left = v,
            FlyKey::YawRight => s.yaw_right = v,
            FlyKey::RollLeft => s.roll_left = v,
            FlyKey::RollRight => s.roll_right = v,
            FlyKey::Slow => self.slow = down,
        }
    }

    pub fn pointer_down(&mut self) {
        self.drag_count += 1;
    }

    pub fn pointer_up(&mut self) {
        self.drag_count = self.drag_count.saturating_sub(1);
        self.state.yaw_left = 0.0;
        self.state.pitch_down = 0.0;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_count > 0
    }

    /// While dragging, the pointer's offset from the viewport centre (in NDC)
    /// steers yaw and pitch.
    pub fn pointer_move(&mut self, ndc: Vec2) {
        if !self.is_dragging() {
            return;
        }
        self.state.yaw_left = -ndc.x;
        self.state.pitch_down = -ndc.y;
    }

    /// Local-frame translation direction (x right, y up, z back).
    pub fn move_vector(&self) -> Vec3 {
        let s = &self.state;
        Vec3::new(s.right - s.left, s.up - s.down, s.back - s.forward)
    }

    /// Angular rates about local x (pitch), y (yaw) and z (roll).
    pub fn rotation_vector(&self) -> Vec3 {
        let s = &self.state;
        Vec3::new(
            s.pitch_up - s.pitch_down,
            s.yaw_left - s.yaw_right,
            s.roll_left - s.roll_right,
        )
    }

    /// Integrate movement and rotation over `delta_sec`.
    pub fn update(&self, delta_sec: f32, pose: &mut CameraPose) {
        if !self.enabled || delta_sec <= 0.0 {
            return;
        }
        let speed = if self.slow {
            self.movement_speed * FLY_SLOW_MULTIPLIER
        } else {
            self.movement_speed
        };
        let mv = self.move_vector();
        let rot = self.rotation_vector();
        if mv == Vec3::ZERO && rot == Vec3::ZERO {
            return;
        }
        let orientation = pose.orientation();
        pose.position += orientation * (mv * (delta_sec * speed));
        let r = rot * (delta_sec * self.roll_speed);
        let step = Quat::from_xyzw(r.x, r.y, r.z, 1.0).normalize();
        pose.set_orientation(orientation * step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_controls_do_not_move() {
        let mut fly = FlyControls::new(50.0, 0.5);
        fly.key_down(FlyKey::Forward);
        fly.enabled = false;
        let mut pose = CameraPose {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        };
        fly.update(1.0, &mut pose);
        assert_eq!(pose.position, Vec3::ZERO);
    }
}
