use crate::constants::MAX_FRAME_DT_SEC;
use crate::render;
use instant::Instant;
use showroom_core::Viewer;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub viewer: Viewer,
    pub gpu: Option<render::GpuState>,
    pub canvas: web::HtmlCanvasElement,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(viewer: Viewer, gpu: Option<render::GpuState>, canvas: web::HtmlCanvasElement) -> Self {
        Self {
            viewer,
            gpu,
            canvas,
            last_instant: Instant::now(),
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.viewer.is_disposed()
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let dt_sec = dt.as_secs_f32().min(MAX_FRAME_DT_SEC);

        let w = self.canvas.width();
        let h = self.canvas.height();
        self.viewer.resize(w, h);
        if !self.viewer.frame(dt_sec) {
            return;
        }

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(w, h);
            match g.render(self.viewer.engine(), dt_sec) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
            }
        }
    }

    /// Drops the scene and every GPU resource. Idempotent.
    pub fn dispose(&mut self) {
        self.viewer.dispose();
        self.gpu = None;
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState> {
    match render::GpuState::new(canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("[gpu] WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Drives `frame()` from `requestAnimationFrame`. The callback only holds a
/// weak reference and stops rescheduling once the context is gone or disposed.
pub fn start_loop(frame_ctx: Weak<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let Some(ctx) = frame_ctx.upgrade() else {
            log::debug!("[engine] render loop stopped");
            return;
        };
        {
            let Ok(mut ctx) = ctx.try_borrow_mut() else {
                // Re-entrant call from a JS callback; try again next frame.
                request_frame(&tick_clone);
                return;
            };
            if ctx.is_disposed() {
                log::debug!("[engine] render loop stopped");
                return;
            }
            ctx.frame();
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
