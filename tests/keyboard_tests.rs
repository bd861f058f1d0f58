// Host-side tests for pure keyboard functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod keyboard {
    include!("../src/events/keyboard.rs");
}

use keyboard::*;
use mooring_core::FlyKey;

#[test]
fn arrow_keys_do_not_scroll_the_page() {
    for code in ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight"] {
        assert!(suppresses_default(code), "{code}");
    }
    assert!(!suppresses_default("KeyW"));
    assert!(!suppresses_default("Space"));
}

#[test]
fn form_fields_swallow_keys() {
    assert!(is_text_entry_tag("INPUT"));
    assert!(is_text_entry_tag("textarea"));
    assert!(is_text_entry_tag("Select"));
    assert!(!is_text_entry_tag("CANVAS"));
    assert!(!is_text_entry_tag("DIV"));
}

#[test]
fn every_suppressed_key_is_a_fly_key() {
    for code in ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight"] {
        assert!(FlyKey::from_code(code).is_some(), "{code}");
    }
}
