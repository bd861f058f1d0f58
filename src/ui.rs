use crate::constants::*;
use crate::dom;
use crate::overlay;
use mooring_core::Viewer;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Hook the page's navigation and overlay buttons up to the viewer.
pub fn wire_ui_buttons(document: &web::Document, viewer: &Rc<RefCell<Viewer>>) {
    let v = viewer.clone();
    dom::add_click_listener(document, HOME_BUTTON, move || v.borrow_mut().go_home());
    let v = viewer.clone();
    dom::add_click_listener(document, LEFT_BUTTON, move || v.borrow_mut().go_prev());
    let v = viewer.clone();
    dom::add_click_listener(document, RIGHT_BUTTON, move || v.borrow_mut().go_next());
    let v = viewer.clone();
    dom::add_click_listener(document, EDIT_BUTTON, move || {
        v.borrow_mut().toggle_edit_mode();
    });

    wire_toggle_group(document, CONTROLS_TRIGGERS, overlay::toggle_controls_panel);
    wire_toggle_group(document, TEXT_OVERLAY_TRIGGERS, overlay::toggle_text_overlay);
    wire_toggle_group(document, LOGIN_TRIGGERS, overlay::toggle_login);
}

fn wire_toggle_group(document: &web::Document, triggers: &[&str], toggle: fn(&web::Document)) {
    for selector in triggers {
        let doc = document.clone();
        dom::add_click_listener(document, selector, move || toggle(&doc));
    }
}
