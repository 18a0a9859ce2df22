use crate::constants::MODAL_CLOSE_SELECTOR;
use crate::dom;
use crate::input;
use cassette_core::Showcase;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct InputWiring {
    pub showcase: Rc<RefCell<Showcase>>,
    pub canvas: web::HtmlCanvasElement,
    pub container: web::HtmlElement,
}

pub fn wire_input_handlers(w: InputWiring) {
    // pointermove
    {
        let showcase_m = w.showcase.clone();
        let canvas_m = w.canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let (px, py) = input::pointer_client_px(&ev);
            let hovered = showcase_m.borrow_mut().on_pointer_move(px, py);
            let cursor = if hovered.is_some() { "pointer" } else { "default" };
            let _ = canvas_m.style().set_property("cursor", cursor);
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // click
    {
        let showcase_c = w.showcase.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let (px, py) = input::pointer_client_px(&ev);
            showcase_c.borrow_mut().on_pointer_click(px, py);
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // resize / scroll: both move the container's client rect
    {
        let showcase_r = w.showcase.clone();
        let canvas_r = w.canvas.clone();
        let container_r = w.container.clone();
        let closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas_r);
            showcase_r
                .borrow_mut()
                .resize(dom::viewport_rect(&container_r));
        }) as Box<dyn FnMut()>);
        if let Some(wnd) = web::window() {
            let _ = wnd.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            let _ = wnd.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }
}

pub fn wire_modal_close(document: &web::Document, showcase: &Rc<RefCell<Showcase>>) {
    let showcase = showcase.clone();
    dom::add_click_listener(document, MODAL_CLOSE_SELECTOR, move || {
        showcase.borrow_mut().close_panel();
    });
}
