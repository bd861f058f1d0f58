use mooring_core::{FlyKey, Viewer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keys whose browser default (page scrolling) must be suppressed while
/// flying.
#[inline]
pub fn suppresses_default(code: &str) -> bool {
    matches!(code, "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight")
}

/// Typing into a form field must not steer the camera.
#[inline]
pub fn is_text_entry_tag(tag: &str) -> bool {
    matches!(tag.to_ascii_uppercase().as_str(), "INPUT" | "TEXTAREA" | "SELECT")
}

fn from_text_entry(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .is_some_and(|el| is_text_entry_tag(&el.tag_name()))
}

pub fn handle_fly_key(ev: &web::KeyboardEvent, viewer: &Rc<RefCell<Viewer>>, down: bool) {
    if ev.alt_key() || from_text_entry(ev) {
        return;
    }
    let code = ev.code();
    let Some(key) = FlyKey::from_code(&code) else {
        return;
    };
    {
        let mut v = viewer.borrow_mut();
        if down {
            v.fly.key_down(key);
        } else {
            v.fly.key_up(key);
        }
    }
    if suppresses_default(&code) {
        ev.prevent_default();
    }
}

pub fn wire_fly_keys(viewer: Rc<RefCell<Viewer>>) {
    let Some(window) = web::window() else {
        return;
    };
    for (event, down) in [("keydown", true), ("keyup", false)] {
        let viewer = viewer.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_fly_key(&ev, &viewer, down);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
