use crate::constants::PANEL_FADE_SEC;
use crate::interaction::DetailPanel;
use crate::tween::{Ease, OffsetTrack};

/// Host-independent model of the detail overlay.
///
/// The DOM sink mirrors this every frame: text when `revision` changes,
/// opacity always, and removes the panel from the interaction tree once it is
/// hidden.
#[derive(Clone, Debug, Default)]
pub struct DetailPanelState {
    title: String,
    description: String,
    visible: bool,
    opacity: OffsetTrack,
    revision: u64,
}

impl DetailPanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.value()
    }

    /// Bumped whenever the text content changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Fully faded out and closed.
    pub fn is_settled_hidden(&self) -> bool {
        !self.visible && !self.opacity.is_animating() && self.opacity.value() <= 0.0
    }

    pub fn advance(&mut self, dt: f32) {
        self.opacity.advance(dt);
    }
}

impl DetailPanel for DetailPanelState {
    fn show(&mut self, title: &str, description: &str) {
        if self.title != title || self.description != description {
            self.title = title.to_owned();
            self.description = description.to_owned();
            self.revision += 1;
        }
        if !self.visible {
            self.visible = true;
            self.opacity.retarget(1.0, PANEL_FADE_SEC, Ease::Power2Out);
        }
        log::info!("[panel] show {}", self.title);
    }

    fn hide(&mut self) {
        if self.visible {
            self.visible = false;
            self.opacity.retarget(0.0, PANEL_FADE_SEC, Ease::Power2Out);
            log::info!("[panel] hide");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_while_visible_replaces_content_without_refading() {
        let mut p = DetailPanelState::new();
        p.show("A", "first");
        p.advance(1.0);
        assert_eq!(p.opacity(), 1.0);
        p.show("B", "second");
        assert_eq!((p.title(), p.description()), ("B", "second"));
        assert_eq!(p.opacity(), 1.0);
        assert_eq!(p.revision(), 2);
    }

    #[test]
    fn hide_fades_out_and_settles() {
        let mut p = DetailPanelState::new();
        p.show("A", "first");
        p.advance(1.0);
        p.hide();
        assert!(!p.is_visible());
        assert!(!p.is_settled_hidden());
        p.advance(1.0);
        assert!(p.is_settled_hidden());
    }
}
