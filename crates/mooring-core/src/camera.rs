//! Camera pose, projection and scripted transitions.
//!
//! These types avoid platform-specific APIs so that picking and the frame
//! update can be exercised on the host. The web frontend reads the matrices
//! from here when filling its uniform buffers.

use crate::bounds::Ray;
use crate::constants::*;
use crate::presets::CameraPreset;
use crate::tween::Vec3Tween;
use glam::{EulerRot, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

/// Rotation whose local +Z axis points along `z_axis`, with `up` as the
/// reference up direction.
///
/// A zero `z_axis` maps to +Z. When `z_axis` is parallel to `up` the axis is
/// nudged slightly so the basis stays finite.
pub fn basis_rotation(z_axis: Vec3, up: Vec3) -> Quat {
    let mut z = if z_axis.length_squared() == 0.0 {
        Vec3::Z
    } else {
        z_axis.normalize()
    };
    let mut x = up.cross(z);
    if x.length_squared() == 0.0 {
        if up.z.abs() == 1.0 {
            z.x += 1e-4;
        } else {
            z.z += 1e-4;
        }
        z = z.normalize();
        x = up.cross(z);
    }
    let x = x.normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}

/// Position plus Euler XYZ rotation (radians).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl CameraPose {
    /// Pose at `eye` looking toward `target` (camera looks down its local -Z).
    pub fn looking_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let q = basis_rotation(eye - target, up);
        let mut pose = Self {
            position: eye,
            rotation: Vec3::ZERO,
        };
        pose.set_orientation(q);
        pose
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn set_orientation(&mut self, q: Quat) {
        let (x, y, z) = q.normalize().to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x, y, z);
    }

    /// World to view transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position).inverse()
    }
}

/// Perspective projection description.
#[derive(Clone, Debug)]
pub struct Perspective {
    pub fovy_radians: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fovy_radians: CAMERA_FOV_Y_DEGREES.to_radians(),
            aspect: 1.0,
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Perspective {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
}

/// The viewer camera: pose, projection and any in-flight transition.
///
/// Position and rotation tweens are independent and may have different
/// durations. Starting a new transition replaces both, beginning from the
/// current pose.
#[derive(Clone, Debug)]
pub struct CameraRig {
    pub pose: CameraPose,
    pub projection: Perspective,
    position_tween: Option<Vec3Tween>,
    rotation_tween: Option<Vec3Tween>,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(CameraPose::looking_at(
            CAMERA_START_EYE,
            CAMERA_START_TARGET,
            Vec3::Y,
        ))
    }
}

impl CameraRig {
    pub fn new(pose: CameraPose) -> Self {
        Self {
            pose,
            projection: Perspective::default(),
            position_tween: None,
            rotation_tween: None,
        }
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.projection.aspect = width as f32 / height as f32;
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection.projection_matrix() * self.pose.view_matrix()
    }

    pub fn transition_to(&mut self, preset: &CameraPreset) {
        self.position_tween = Some(Vec3Tween::new(
            self.pose.position,
            preset.position,
            preset.position_duration,
        ));
        self.rotation_tween = Some(Vec3Tween::new(
            self.pose.rotation,
            preset.rotation,
            preset.rotation_duration,
        ));
    }

    pub fn pending_position_target(&self) -> Option<Vec3> {
        self.position_tween.as_ref().map(Vec3Tween::target)
    }

    pub fn pending_rotation_target(&self) -> Option<Vec3> {
        self.rotation_tween.as_ref().map(Vec3Tween::target)
    }

    pub fn is_transitioning(&self) -> bool {
        self.position_tween.is_some() || self.rotation_tween.is_some()
    }

    /// Advance in-flight tweens, writing their values into the pose.
    pub fn advance(&mut self, dt_sec: f32) {
        if let Some(tw) = &mut self.position_tween {
            self.pose.position = tw.advance(dt_sec);
            if tw.is_finished() {
                self.position_tween = None;
            }
        }
        if let Some(tw) = &mut self.rotation_tween {
            self.pose.rotation = tw.advance(dt_sec);
            if tw.is_finished() {
                self.rotation_tween = None;
            }
        }
    }

    /// World-space ray from the camera through a point in normalized device
    /// coordinates (x right, y up, both in \[-1, 1\]).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray::new(self.pose.position, p1 - self.pose.position)
    }
}
