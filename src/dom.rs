use wasm_bindgen::JsCast;
use web_sys as web;

fn elements(document: &web::Document, selector: &str) -> Vec<web::Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

/// Attach `handler` to the click event of every element matching `selector`.
/// Returns how many elements were wired.
pub fn add_click_listener(
    document: &web::Document,
    selector: &str,
    handler: impl FnMut() + 'static,
) -> usize {
    let targets = elements(document, selector);
    if targets.is_empty() {
        log::debug!("[ui] no element matches {selector}");
        return 0;
    }
    let handler = std::rc::Rc::new(std::cell::RefCell::new(handler));
    for el in &targets {
        let h = handler.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(
            Box::new(move || (&mut *h.borrow_mut())()) as Box<dyn FnMut()>
        );
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    targets.len()
}

/// Flip `class` on every element matching `selector`.
pub fn toggle_class(document: &web::Document, selector: &str, class: &str) -> usize {
    let targets = elements(document, selector);
    if targets.is_empty() {
        log::debug!("[ui] no element matches {selector}");
    }
    for el in &targets {
        _ = el.class_list().toggle(class);
    }
    targets.len()
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}
