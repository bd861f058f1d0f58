// Host-side tests for hover highlighting, click-to-preset and model picking.

use glam::{Mat4, Vec2, Vec3};
use mooring_core::*;

fn viewer() -> Viewer {
    Viewer::new(SceneConfig::default()).unwrap()
}

/// A point halfway along `chain`.
fn mid_link(v: &Viewer, chain: usize) -> Vec3 {
    let set = &v.scene.chains()[chain];
    set.position(set.len() / 2).unwrap()
}

/// Aim the camera straight down at `target` from 50 units above.
fn look_down_at(v: &mut Viewer, target: Vec3) {
    v.rig.pose = CameraPose::looking_at(target + Vec3::new(0.0, 50.0, 0.0), target, Vec3::Z);
}

/// Aim the camera straight up from 50 units above `point`.
fn look_up_from(v: &mut Viewer, point: Vec3) {
    let eye = point + Vec3::new(0.0, 50.0, 0.0);
    v.rig.pose = CameraPose::looking_at(eye, eye + Vec3::new(0.0, 50.0, 0.0), Vec3::Z);
}

fn color_of(v: &Viewer, name: &str) -> u32 {
    let id = v.scene.find(name).unwrap();
    v.scene.objects()[id].material.color
}

#[test]
fn centre_ray_hits_the_chain_below() {
    let mut v = viewer();
    let target = mid_link(&v, 0);
    look_down_at(&mut v, target);
    let hits = v.scene.raycast(&v.rig.ray_from_ndc(Vec2::ZERO));
    let first = hits.first().expect("a hit");
    assert_eq!(v.scene.objects()[first.object].name, "chain1");
    assert!(first.distance > 45.0 && first.distance <= 50.0 - LINK_PICK_RADIUS + 1e-3);
}

#[test]
fn clicking_chain1_flies_to_its_preset() {
    let mut v = viewer();
    let target = mid_link(&v, 0);
    look_down_at(&mut v, target);

    assert_eq!(v.click(Vec2::ZERO), Some(1));
    assert_eq!(
        v.rig.pending_position_target(),
        Some(Vec3::new(380.0, -690.0, 460.0))
    );
    assert_eq!(
        v.rig.pending_rotation_target(),
        Some(Vec3::new(-0.55, -0.6, -0.37))
    );
    assert_eq!(v.presets.cursor(), 1);
}

#[test]
fn clicking_chain3_moves_the_tour_cursor() {
    let mut v = viewer();
    let target = mid_link(&v, 2);
    look_down_at(&mut v, target);
    assert_eq!(v.click(Vec2::ZERO), Some(3));
    assert_eq!(v.presets.cursor(), 3);
    v.go_next();
    assert_eq!(v.presets.cursor(), 4);
}

#[test]
fn clicking_empty_space_changes_nothing() {
    let mut v = viewer();
    let target = mid_link(&v, 0);
    look_up_from(&mut v, target);
    let before = v.rig.pose;
    assert_eq!(v.click(Vec2::ZERO), None);
    assert!(!v.rig.is_transitioning());
    assert_eq!(v.rig.pose, before);
    assert_eq!(v.presets.cursor(), 1);
}

#[test]
fn hover_highlights_and_restores_on_miss() {
    let mut v = viewer();
    let target = mid_link(&v, 0);
    look_down_at(&mut v, target);

    assert!(v.pointer_move(Vec2::ZERO));
    assert_eq!(color_of(&v, "chain1"), HIGHLIGHT_COLOR);
    assert_eq!(color_of(&v, "chain2"), METAL_COLOR);
    assert!(matches!(
        v.picker.state(),
        HoverState::Hovering { object: 0, original_color } if original_color == METAL_COLOR
    ));

    // Same chain again: nothing to do.
    assert!(!v.pointer_move(Vec2::ZERO));

    look_up_from(&mut v, target);
    assert!(v.pointer_move(Vec2::ZERO));
    assert_eq!(color_of(&v, "chain1"), METAL_COLOR);
    assert_eq!(v.picker.state(), HoverState::Idle);
}

#[test]
fn hover_moves_from_one_chain_to_another() {
    let mut v = viewer();
    let first = mid_link(&v, 0);
    let second = mid_link(&v, 1);

    look_down_at(&mut v, first);
    v.pointer_move(Vec2::ZERO);
    look_down_at(&mut v, second);
    assert!(v.pointer_move(Vec2::ZERO));

    assert_eq!(color_of(&v, "chain1"), METAL_COLOR);
    assert_eq!(color_of(&v, "chain2"), HIGHLIGHT_COLOR);
    assert!(matches!(
        v.picker.state(),
        HoverState::Hovering { object: 1, .. }
    ));
}

#[test]
fn nearest_chain_wins_over_nearer_non_chain() {
    struct Objects(Vec<(&'static str, u32)>);
    impl PickTarget for Objects {
        fn object_name(&self, object: ObjectId) -> Option<&str> {
            self.0.get(object).map(|(n, _)| *n)
        }
        fn color(&self, object: ObjectId) -> Option<u32> {
            self.0.get(object).map(|(_, c)| *c)
        }
        fn set_color(&mut self, object: ObjectId, color: u32) {
            if let Some(o) = self.0.get_mut(object) {
                o.1 = color;
            }
        }
    }
    let t = Objects(vec![("turret", 1), ("chain4", 2), ("chain2", 3)]);
    // Unsorted on purpose.
    let hits = [
        Hit { object: 2, distance: 9.0 },
        Hit { object: 0, distance: 1.0 },
        Hit { object: 1, distance: 4.0 },
    ];
    let picker = PickController::new(HIGHLIGHT_COLOR);
    assert_eq!(nearest_chain_hit(&hits, &t).map(|h| h.object), Some(1));
    assert_eq!(picker.click(&hits, &t), Some(4));
    assert_eq!(picker.click(&hits[1..2], &t), None);
}

fn cube_model() -> SceneNode {
    let child = SceneNode {
        name: "hull".into(),
        transform: Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0)),
        kind: NodeKind::Mesh {
            mesh: box_mesh(Vec3::splat(2.0)),
            material: Material::basic(0x123456),
        },
        children: vec![SceneNode {
            name: "sun".into(),
            transform: Mat4::IDENTITY,
            kind: NodeKind::Light,
            children: Vec::new(),
        }],
    };
    SceneNode::group("model", Mat4::IDENTITY, vec![child])
}

#[test]
fn placed_models_get_metal_and_a_pick_box() {
    let mut v = viewer();
    let placement = ModelPlacement {
        name: "turret".into(),
        path: "turret.glb".into(),
        position: Vec3::new(500.0, 100.0, 0.0),
        rotation: Vec3::ZERO,
        scale: Vec3::splat(2.0),
    };
    let model = v.add_model(&placement, cube_model());
    assert_eq!(model.meshes.len(), 1);
    assert_eq!(model.meshes[0].1, Material::metal());
    let id = model.object.expect("pickable");

    // Box spans y 100..104 after the 2x scale and the child offset.
    let eye = Vec3::new(500.0, 150.0, 0.0);
    v.rig.pose = CameraPose::looking_at(eye, Vec3::new(500.0, 0.0, 0.0), Vec3::Z);
    let hits = v.scene.raycast(&v.rig.ray_from_ndc(Vec2::ZERO));
    assert_eq!(hits.first().map(|h| h.object), Some(id));
    assert!((hits[0].distance - 46.0).abs() < 0.1);

    // Models are not chains: no highlight, no preset.
    assert!(!v.pointer_move(Vec2::ZERO));
    assert_eq!(v.click(Vec2::ZERO), None);
}

#[test]
fn empty_models_are_not_pickable() {
    let mut v = viewer();
    let before = v.scene.objects().len();
    let placement = ModelPlacement {
        name: "empty".into(),
        path: "empty.glb".into(),
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };
    let model = v.add_model(&placement, SceneNode::group("empty", Mat4::IDENTITY, Vec::new()));
    assert!(model.object.is_none());
    assert!(model.meshes.is_empty());
    assert_eq!(v.scene.objects().len(), before);
}

#[test]
fn material_replacement_counts_every_mesh() {
    let mut root = SceneNode::group(
        "root",
        Mat4::IDENTITY,
        vec![cube_model(), cube_model(), cube_model()],
    );
    assert_eq!(root.mesh_count(), 3);
    assert_eq!(root.replace_mesh_materials(Material::metal()), 3);
    let flat = root.flatten(Mat4::IDENTITY);
    // One shared material: one merged mesh.
    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].0.indices.len(), 3 * box_mesh(Vec3::ONE).indices.len());
}
