use crate::overlay::{MarqueeView, PanelView};
use crate::render;
use cassette_core::{Clock, Showcase};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Longest step fed to the animations; a backgrounded tab resumes smoothly
const MAX_FRAME_DT_SEC: f32 = 0.1;

pub struct FrameContext<'a> {
    pub showcase: Rc<RefCell<Showcase>>,
    pub canvas: web::HtmlCanvasElement,
    pub panel: PanelView,
    pub marquee: MarqueeView,
    pub gpu: Option<render::GpuState<'a>>,
    pub clock: Clock,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let dt_sec = self.clock.tick().min(MAX_FRAME_DT_SEC);
        let mut showcase = self.showcase.borrow_mut();
        showcase.tick(dt_sec);
        self.panel.sync(&showcase.panel);
        self.marquee.sync(&showcase.marquee);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            match g.render(&showcase) {
                Ok(()) => {}
                // reconfigured on the next resize check; skip this frame
                Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                    log::warn!("[frame] surface outdated, skipping frame");
                }
                Err(e) => log::error!("[frame] render error: {:?}", e),
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
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

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
