#![cfg(target_arch = "wasm32")]
use cassette_core::{Clock, Showcase, MODEL_REGISTRY};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod assets;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("cassette-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let container = dom::query(&document, constants::CONTAINER_SELECTOR)
        .ok_or_else(|| anyhow::anyhow!("missing {}", constants::CONTAINER_SELECTOR))?;
    let canvas = dom::create_canvas_in(&document, &container)?;
    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);

    let showcase: Rc<RefCell<Showcase>> = Rc::new(RefCell::new(Showcase::new(
        MODEL_REGISTRY,
        dom::viewport_rect(&container),
    )));

    // Loads start before the GPU is up; the frame loop picks models up as
    // they land in the scene.
    assets::spawn_model_loads(&showcase);
    assets::spawn_environment_load(&showcase);

    events::wire_input_handlers(events::InputWiring {
        showcase: showcase.clone(),
        canvas: canvas.clone(),
        container: container.clone(),
    });
    events::wire_modal_close(&document, &showcase);

    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        log::warn!("[frame] no renderer; interaction state still runs");
    }
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        showcase,
        canvas,
        panel: overlay::PanelView::new(&document),
        marquee: overlay::MarqueeView::new(&document),
        gpu,
        clock: Clock::new(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
