//! DOM sinks for the detail panel and the scrolling copy text.

use crate::constants::{
    MARQUEE_SELECTOR, MODAL_DESCRIPTION_SELECTOR, MODAL_SELECTOR, MODAL_TITLE_SELECTOR,
};
use crate::dom;
use cassette_core::{DetailPanelState, Marquee};
use web_sys as web;

pub struct PanelView {
    root: Option<web::HtmlElement>,
    title: Option<web::HtmlElement>,
    description: Option<web::HtmlElement>,
    revision: u64,
    shown: Option<bool>,
    opacity: f32,
}

impl PanelView {
    pub fn new(document: &web::Document) -> Self {
        let root = dom::query(document, MODAL_SELECTOR);
        if root.is_none() {
            log::warn!("[panel] {} not found; details will not be shown", MODAL_SELECTOR);
        }
        Self {
            root,
            title: dom::query(document, MODAL_TITLE_SELECTOR),
            description: dom::query(document, MODAL_DESCRIPTION_SELECTOR),
            revision: 0,
            shown: None,
            opacity: -1.0,
        }
    }

    /// Mirror `state` into the DOM, touching only what changed.
    pub fn sync(&mut self, state: &DetailPanelState) {
        let Some(root) = &self.root else {
            return;
        };
        if state.revision() != self.revision {
            self.revision = state.revision();
            if let Some(el) = &self.title {
                el.set_text_content(Some(state.title()));
            }
            if let Some(el) = &self.description {
                el.set_text_content(Some(state.description()));
            }
        }
        let opacity = state.opacity();
        if (opacity - self.opacity).abs() > 1e-3 {
            self.opacity = opacity;
            let _ = root.style().set_property("opacity", &format!("{:.3}", opacity));
        }
        // stays in the tree while fading out
        let shown = !state.is_settled_hidden();
        if self.shown != Some(shown) {
            self.shown = Some(shown);
            let style = root.style();
            if shown {
                let _ = style.set_property("display", "block");
                let _ = style.set_property("pointer-events", "auto");
                let _ = root.set_attribute("aria-hidden", "false");
            } else {
                let _ = style.set_property("display", "none");
                let _ = style.set_property("pointer-events", "none");
                let _ = root.set_attribute("aria-hidden", "true");
            }
        }
    }
}

pub struct MarqueeView {
    items: Vec<web::HtmlElement>,
}

impl MarqueeView {
    pub fn new(document: &web::Document) -> Self {
        Self {
            items: dom::query_all(document, MARQUEE_SELECTOR),
        }
    }

    pub fn sync(&self, marquee: &Marquee) {
        if self.items.is_empty() {
            return;
        }
        let transform = format!("translateY({:.3}%)", marquee.y_percent());
        for el in &self.items {
            let _ = el.style().set_property("transform", &transform);
        }
    }
}
