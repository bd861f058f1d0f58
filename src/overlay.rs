use crate::constants::{CONTROLS_PANEL_TOGGLES, LOGIN_TOGGLES, TEXT_OVERLAY_TOGGLES};
use crate::dom;
use web_sys as web;

/// Flip every (selector, class) pair in `table`.
pub fn apply_toggles(document: &web::Document, table: &[(&str, &str)]) {
    for (selector, class) in table {
        dom::toggle_class(document, selector, class);
    }
}

#[inline]
pub fn toggle_controls_panel(document: &web::Document) {
    apply_toggles(document, CONTROLS_PANEL_TOGGLES);
}

#[inline]
pub fn toggle_text_overlay(document: &web::Document) {
    apply_toggles(document, TEXT_OVERLAY_TOGGLES);
}

#[inline]
pub fn toggle_login(document: &web::Document) {
    apply_toggles(document, LOGIN_TOGGLES);
}
