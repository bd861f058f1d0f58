#![cfg(target_arch = "wasm32")]
use instant::Instant;
use mooring_core::{default_model_placements, SceneConfig, Viewer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;
mod ui;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("mooring-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Keep the backing store at CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    // A pool too small for its chain is fatal
    let viewer = Viewer::new(SceneConfig::default())
        .map_err(|e| anyhow::anyhow!("scene setup failed: {e}"))?;
    let viewer = Rc::new(RefCell::new(viewer));

    ui::wire_ui_buttons(&document, &viewer);
    events::wire_fly_keys(viewer.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        viewer: viewer.clone(),
    });

    let gpu = frame::init_gpu(&canvas, &viewer).await;

    let loaded: frame::LoadedModels = Rc::new(RefCell::new(Vec::new()));
    assets::spawn_model_loads(default_model_placements(), loaded.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        viewer,
        canvas,
        gpu,
        loaded,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
