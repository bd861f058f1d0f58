// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use mooring_core::constants as scene;

#[test]
#[allow(clippy::assertions_on_constants)]
fn pools_hold_every_link() {
    assert!(scene::CHAIN_POOL_CAPACITY >= scene::CHAIN_SAMPLES);
    assert!(scene::CHAIN_SAMPLES > 0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_and_fog_ranges_are_ordered() {
    assert!(scene::CAMERA_NEAR > 0.0);
    assert!(scene::CAMERA_NEAR < scene::CAMERA_FAR);
    assert!(scene::FOG_NEAR < scene::FOG_FAR);
    assert!(scene::FLY_SLOW_MULTIPLIER > 0.0 && scene::FLY_SLOW_MULTIPLIER < 1.0);
}

#[test]
fn start_pose_lies_inside_the_boundary() {
    let clamp = mooring_core::BoundaryClamp::new(
        scene::BOUNDARY_CENTER,
        glam::Vec3::splat(scene::BOUNDARY_SIZE),
    );
    assert_eq!(clamp.clamp(scene::CAMERA_START_EYE), scene::CAMERA_START_EYE);
}

#[test]
fn highlight_differs_from_the_metal() {
    assert_ne!(scene::HIGHLIGHT_COLOR, scene::METAL_COLOR);
}

#[test]
fn srgb_conversion_hits_the_endpoints() {
    assert_eq!(scene::hex_to_linear_rgb(0x000000), [0.0, 0.0, 0.0]);
    let [r, g, b] = scene::hex_to_linear_rgb(0xff0000);
    assert!((r - 1.0).abs() < 1e-5);
    assert_eq!((g, b), (0.0, 0.0));
    // Mid grey is darker in linear space.
    let [grey, _, _] = scene::hex_to_linear_rgb(0x808080);
    assert!((grey - 0.2158).abs() < 1e-3);
}

#[test]
fn toggle_tables_use_class_selectors() {
    for table in [CONTROLS_PANEL_TOGGLES, TEXT_OVERLAY_TOGGLES, LOGIN_TOGGLES] {
        assert!(!table.is_empty());
        for (selector, class) in table {
            assert!(selector.starts_with('.'), "{selector}");
            assert!(!class.is_empty() && !class.starts_with('.'), "{class}");
        }
    }
    for trigger in CONTROLS_TRIGGERS
        .iter()
        .chain(TEXT_OVERLAY_TRIGGERS)
        .chain(LOGIN_TRIGGERS)
    {
        assert!(trigger.starts_with('.'), "{trigger}");
    }
}

#[test]
fn control_panel_flips_its_own_triggers() {
    for trigger in CONTROLS_TRIGGERS {
        assert!(
            CONTROLS_PANEL_TOGGLES.iter().any(|(s, _)| s == trigger),
            "{trigger}"
        );
    }
}
