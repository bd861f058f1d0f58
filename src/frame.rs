use crate::render;
use instant::Instant;
use mooring_core::{ModelPlacement, SceneNode, Viewer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Models fetched and parsed but not yet placed in the scene.
pub type LoadedModels = Rc<RefCell<Vec<(ModelPlacement, SceneNode)>>>;

pub struct FrameContext<'a> {
    pub viewer: Rc<RefCell<Viewer>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub loaded: LoadedModels,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        self.place_loaded_models();

        let w = self.canvas.width();
        let h = self.canvas.height();
        let mut viewer = self.viewer.borrow_mut();
        viewer.resize(w, h);
        viewer.tick(dt_sec);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(w, h);
            match g.render(&viewer) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("[scene] surface lost, reconfiguring");
                    g.reconfigure();
                }
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }

    fn place_loaded_models(&mut self) {
        let pending: Vec<_> = self.loaded.borrow_mut().drain(..).collect();
        if pending.is_empty() {
            return;
        }
        let mut viewer = self.viewer.borrow_mut();
        for (placement, root) in pending {
            let model = viewer.add_model(&placement, root);
            if let Some(g) = &mut self.gpu {
                g.add_model(model);
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    viewer: &Rc<RefCell<Viewer>>,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    let snapshot = viewer.borrow().clone();
    match render::GpuState::new(leaked_canvas, &snapshot).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else { return };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
