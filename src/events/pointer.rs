use crate::input;
use mooring_core::Viewer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub viewer: Rc<RefCell<Viewer>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
    wire_click(&w);
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let ndc = input::pointer_ndc(&ev, &w.canvas);
        if !ndc.is_finite() {
            return;
        }
        w.viewer.borrow_mut().pointer_move(ndc);
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        {
            let mut v = w.viewer.borrow_mut();
            v.fly.pointer_down();
            v.fly.pointer_move(input::pointer_ndc(&ev, &w.canvas));
        }
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        w.viewer.borrow_mut().fly.pointer_up();
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        for event in ["pointerup", "pointercancel"] {
            _ = wnd.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }
    closure.forget();
}

fn wire_click(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let ndc = input::pointer_ndc(&ev, &w.canvas);
        if let Some(chain) = w.viewer.borrow_mut().click(ndc) {
            log::debug!("[pick] clicked chain{chain}");
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
