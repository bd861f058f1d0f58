// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn canvas_corners_map_to_ndc_corners() {
    assert_eq!(ndc_from_px(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
    assert_eq!(ndc_from_px(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
    assert_eq!(ndc_from_px(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
}

#[test]
fn y_axis_points_up() {
    let top = ndc_from_px(100.0, 10.0, 200.0, 200.0);
    let bottom = ndc_from_px(100.0, 190.0, 200.0, 200.0);
    assert!(top.y > bottom.y);
}

#[test]
fn zero_sized_canvas_maps_to_centre() {
    assert_eq!(ndc_from_px(10.0, 10.0, 0.0, 600.0), Vec2::ZERO);
    assert_eq!(ndc_from_px(10.0, 10.0, 800.0, 0.0), Vec2::ZERO);
}

#[test]
fn points_outside_the_canvas_extrapolate() {
    let p = ndc_from_px(-400.0, 300.0, 800.0, 600.0);
    assert_eq!(p, Vec2::new(-2.0, 0.0));
}
