#![cfg(target_arch = "wasm32")]
use crate::core::dispatch::{ids, initial_display};
use crate::core::StressState;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod config;
mod core;
mod dom;
mod events;
mod frame;
mod render;
mod ui;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("gpu-stress starting");

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

    let canvas = dom::ensure_canvas(&document, ids::CANVAS)?;
    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    events::wire_resize(&canvas);

    let (w, h) = (canvas.width().max(1), canvas.height().max(1));
    let seed = rand::random::<u64>();
    let state = Rc::new(RefCell::new(StressState::bootstrap(seed, w as f32 / h as f32)));
    log::info!(
        "[scene] seed={:#x} objects={} lights={}",
        seed,
        state.borrow().object_count(),
        state.borrow().lights.len()
    );

    ui::apply_updates(&document, initial_display(&state.borrow()).iter());
    events::wire_controls(&document, state.clone());
    events::wire_orbit_pointer(&canvas, state.clone());

    let gpu = frame::init_gpu(&canvas).await;

    let started = Instant::now();
    state.borrow_mut().start_clock(0.0);
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        state,
        gpu,
        canvas,
        window,
        document,
        started,
        last_size: (0, 0),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
