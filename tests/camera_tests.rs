// Host-side tests for presets, transitions, free-fly controls and the
// boundary clamp.

use glam::{Vec2, Vec3};
use mooring_core::*;

fn approx(a: Vec3, b: Vec3, eps: f32) -> bool {
    (a - b).length() <= eps
}

#[test]
fn registry_ships_home_plus_four_chain_views() {
    let reg = CameraPresetRegistry::default();
    assert_eq!(reg.number_of_cameras(), 5);
    assert_eq!(reg.tour_len(), 4);
    assert_eq!(reg.cursor(), 1);
    assert_eq!(reg.camera_list()[0].name, "Home");
    assert_eq!(reg.get(1).unwrap().position, Vec3::new(380.0, -690.0, 460.0));
}

#[test]
fn cursor_wraps_both_ways() {
    let mut reg = CameraPresetRegistry::default();
    let forward: Vec<usize> = (0..5)
        .map(|_| {
            reg.next();
            reg.cursor()
        })
        .collect();
    assert_eq!(forward, [2, 3, 4, 1, 2]);

    let mut reg = CameraPresetRegistry::default();
    assert_eq!(reg.prev().map(|p| p.name.as_str()), Some("Chain4"));
    assert_eq!(reg.cursor(), 4);
    reg.prev();
    assert_eq!(reg.cursor(), 3);
}

#[test]
fn select_rejects_home_and_out_of_range() {
    let mut reg = CameraPresetRegistry::default();
    reg.select(3);
    assert!(reg.select(0).is_none());
    assert!(reg.select(5).is_none());
    assert_eq!(reg.cursor(), 3);
    assert_eq!(reg.reset_home().map(|p| p.name.as_str()), Some("Home"));
    assert_eq!(reg.cursor(), 1);
}

#[test]
fn empty_registry_navigation_is_a_no_op() {
    let mut reg = CameraPresetRegistry::new();
    assert!(reg.next().is_none());
    assert!(reg.prev().is_none());
    assert!(reg.reset_home().is_none());
}

#[test]
fn registry_generalises_to_any_tour_length() {
    let mut reg = CameraPresetRegistry::new();
    reg.new_camera("Home", Vec3::ZERO, 1.0, Vec3::ZERO, 1.0);
    for i in 1..=6 {
        reg.new_camera(format!("Stop{i}"), Vec3::splat(i as f32), 1.0, Vec3::ZERO, 1.0);
    }
    assert_eq!(reg.tour_len(), 6);
    reg.select(6);
    assert_eq!(reg.next().map(|p| p.name.as_str()), Some("Stop1"));
}

#[test]
fn tween_eases_out_and_lands_on_target() {
    let mut tw = Vec3Tween::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 2.0);
    assert!(approx(tw.advance(1.0), Vec3::new(7.5, 0.0, 0.0), 1e-5));
    assert!(!tw.is_finished());
    assert_eq!(tw.advance(5.0), Vec3::new(10.0, 0.0, 0.0));
    assert!(tw.is_finished());
    assert_eq!(ease_out_quad(0.0), 0.0);
    assert_eq!(ease_out_quad(1.0), 1.0);
}

#[test]
fn zero_duration_tween_snaps() {
    let tw = Vec3Tween::new(Vec3::ZERO, Vec3::ONE, 0.0);
    assert!(tw.is_finished());
    assert_eq!(tw.value(), Vec3::ONE);
}

#[test]
fn rig_transition_runs_position_and_rotation_independently() {
    let mut rig = CameraRig::default();
    let preset = CameraPreset {
        name: "Test".into(),
        position: Vec3::new(100.0, 0.0, 0.0),
        position_duration: 1.0,
        rotation: Vec3::new(0.0, 1.0, 0.0),
        rotation_duration: 3.0,
    };
    rig.transition_to(&preset);
    rig.advance(1.5);
    assert_eq!(rig.pose.position, preset.position);
    assert_eq!(rig.pending_position_target(), None);
    assert_eq!(rig.pending_rotation_target(), Some(preset.rotation));
    rig.advance(2.0);
    assert!(!rig.is_transitioning());
    assert_eq!(rig.pose.rotation, preset.rotation);
}

#[test]
fn new_transition_restarts_from_current_pose() {
    let mut rig = CameraRig::default();
    let reg = CameraPresetRegistry::default();
    rig.transition_to(reg.get(1).unwrap());
    rig.advance(0.5);
    let midway = rig.pose.position;
    rig.transition_to(reg.get(2).unwrap());
    assert_eq!(rig.pose.position, midway);
    assert_eq!(rig.pending_position_target(), Some(reg.get(2).unwrap().position));
}

#[test]
fn fly_forward_moves_along_view_direction() {
    let mut fly = FlyControls::new(50.0, 0.5);
    let mut pose = CameraPose {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
    };
    fly.key_down(FlyKey::Forward);
    fly.update(1.0, &mut pose);
    assert!(approx(pose.position, Vec3::new(0.0, 0.0, -50.0), 1e-4));

    fly.key_down(FlyKey::Slow);
    fly.update(1.0, &mut pose);
    assert!(approx(pose.position, Vec3::new(0.0, 0.0, -55.0), 1e-4));

    fly.key_up(FlyKey::Forward);
    fly.key_up(FlyKey::Slow);
    fly.update(1.0, &mut pose);
    assert!(approx(pose.position, Vec3::new(0.0, 0.0, -55.0), 1e-4));
}

#[test]
fn fly_keys_map_from_physical_codes() {
    assert_eq!(FlyKey::from_code("KeyW"), Some(FlyKey::Forward));
    assert_eq!(FlyKey::from_code("KeyR"), Some(FlyKey::Up));
    assert_eq!(FlyKey::from_code("ShiftLeft"), Some(FlyKey::Slow));
    assert_eq!(FlyKey::from_code("KeyZ"), None);
}

#[test]
fn dragging_steers_and_release_stops() {
    let mut fly = FlyControls::new(50.0, 0.5);
    fly.pointer_move(Vec2::new(0.5, 0.5));
    assert_eq!(fly.rotation_vector(), Vec3::ZERO);

    fly.pointer_down();
    fly.pointer_move(Vec2::new(0.5, -0.25));
    assert_eq!(fly.rotation_vector(), Vec3::new(-0.25, -0.5, 0.0));

    fly.pointer_up();
    assert!(!fly.is_dragging());
    assert_eq!(fly.rotation_vector(), Vec3::ZERO);
}

#[test]
fn boundary_clamps_each_axis_and_is_idempotent() {
    let clamp = BoundaryClamp::new(BOUNDARY_CENTER, Vec3::splat(BOUNDARY_SIZE));
    let p = clamp.clamp(Vec3::new(5000.0, -5000.0, 12.0));
    assert_eq!(p, Vec3::new(975.0, -965.0, 12.0));
    assert!(clamp.volume().contains(p));
    assert_eq!(clamp.clamp(p), p);
    let inside = Vec3::new(1.0, 2.0, 3.0);
    assert_eq!(clamp.clamp(inside), inside);

    // Far outside on every axis at once still lands inside.
    let corner = clamp.clamp(Vec3::splat(-1.0e6));
    assert!(clamp.volume().contains(corner));
    assert_eq!(corner, clamp.volume().min);
}

#[test]
fn viewer_tick_clamps_then_advances_water() {
    let mut v = Viewer::new(SceneConfig::default()).unwrap();
    v.fly.enabled = false;
    v.rig.pose.position = Vec3::new(0.0, 4000.0, 0.0);
    v.tick(1.0 / 60.0);
    assert_eq!(v.rig.pose.position.y, BOUNDARY_CENTER.y + BOUNDARY_SIZE * 0.5);
    v.tick(1.0 / 60.0);
    assert!((v.water_time - 2.0 * WATER_TIME_STEP).abs() < 1e-6);
}

#[test]
fn viewer_starts_in_edit_mode() {
    let v = Viewer::new(SceneConfig::default()).unwrap();
    assert!(v.edit_mode);
}

#[test]
fn navigation_buttons_start_transitions() {
    let mut v = Viewer::new(SceneConfig::default()).unwrap();
    v.go_next();
    assert_eq!(v.presets.cursor(), 2);
    assert_eq!(
        v.rig.pending_position_target(),
        Some(Vec3::new(-380.0, -690.0, 460.0))
    );
    v.go_home();
    assert_eq!(v.presets.cursor(), 1);
    assert_eq!(
        v.rig.pending_position_target(),
        Some(Vec3::new(40.0, 40.0, 80.0))
    );
    v.go_prev();
    assert_eq!(v.presets.cursor(), 4);
    assert!(!v.toggle_edit_mode());
    assert!(v.toggle_edit_mode());
}
