use crate::core::{RenderInfo, StressState};
use crate::{dom, render, ui};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub state: Rc<RefCell<StressState>>,
    pub gpu: Option<render::GpuState>,
    pub canvas: web::HtmlCanvasElement,
    pub window: web::Window,
    pub document: web::Document,
    pub started: Instant,
    pub last_size: (u32, u32),
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        // Light orbit follows the wall clock, not time since start
        let wall_clock_secs = js_sys::Date::now() * 0.001;

        let w = self.canvas.width();
        let h = self.canvas.height();
        let mut state = self.state.borrow_mut();
        if (w, h) != self.last_size {
            self.last_size = (w, h);
            state.resize(w, h);
        }
        if let Some(fps) = state.advance(now_ms, wall_clock_secs) {
            log::debug!("[frame] fps={} objects={}", fps, state.object_count());
        }

        let mut info = RenderInfo::default();
        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(w, h);
            match g.render(&state) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("surface lost, reconfiguring");
                    g.reconfigure();
                }
                Err(e) => log::error!("render error: {:?}", e),
            }
            info = *g.info();
        }

        let memory_mb = dom::heap_used_mb(&self.window);
        let stats = state.record_frame_stats(&info, memory_mb);
        ui::publish_stats(&self.document, &stats);
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState> {
    match render::GpuState::new(canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(window: &web::Window, tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let Some(cb) = tick.borrow().as_ref() {
        _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            request_frame(&w, &tick_clone);
        }
    }) as Box<dyn FnMut()>));
    let window = frame_ctx.borrow().window.clone();
    request_frame(&window, &tick);
}
