//! Pointer interaction engine: pointer -> ray -> hit -> owning model ->
//! hover/click flags -> offset tweens.

use crate::animation::{Animator, Channel, OffsetAnimator};
use crate::constants::{
    CLICK_DURATION_SEC, CLICK_OFFSET, FLOAT_AMPLITUDE, FLOAT_HALF_PERIOD_SEC,
    FLOAT_PHASE_STEP_SEC, HOVER_DURATION_SEC, HOVER_OFFSET,
};
use crate::models::{ModelCollection, ModelKey};
use crate::picking::{pointer_to_ndc, Hit, PickSource, Ray, ViewportRect};
use crate::scene::SceneGraph;
use crate::state::Camera;
use crate::tween::{Ease, Tween};
use glam::Vec3;

/// Per-model offsets and timings.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionConfig {
    pub hover_offset: f32,
    pub hover_duration: f32,
    pub click_offset: f32,
    pub click_duration: f32,
    pub float_amplitude: f32,
    pub float_half_period: f32,
    pub float_phase_step: f32,
    pub ease: Ease,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            hover_offset: HOVER_OFFSET,
            hover_duration: HOVER_DURATION_SEC,
            click_offset: CLICK_OFFSET,
            click_duration: CLICK_DURATION_SEC,
            float_amplitude: FLOAT_AMPLITUDE,
            float_half_period: FLOAT_HALF_PERIOD_SEC,
            float_phase_step: FLOAT_PHASE_STEP_SEC,
            ease: Ease::Power2InOut,
        }
    }
}

/// Receiver for "model selected" notifications.
pub trait DetailPanel {
    /// Show (or replace the content of) the panel.
    fn show(&mut self, title: &str, description: &str);
    fn hide(&mut self);
}

pub struct PointerInteractionEngine<A: Animator = OffsetAnimator> {
    config: InteractionConfig,
    animator: A,
    models: ModelCollection,
    viewport: ViewportRect,
    enabled: bool,
}

impl PointerInteractionEngine<OffsetAnimator> {
    pub fn new(config: InteractionConfig, viewport: ViewportRect) -> Self {
        Self::with_animator(config, OffsetAnimator::new(), viewport)
    }
}

impl<A: Animator> PointerInteractionEngine<A> {
    pub fn with_animator(config: InteractionConfig, animator: A, viewport: ViewportRect) -> Self {
        Self {
            config,
            animator,
            models: ModelCollection::new(),
            viewport,
            enabled: false,
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn models(&self) -> &ModelCollection {
        &self.models
    }

    pub fn models_mut(&mut self) -> &mut ModelCollection {
        &mut self.models
    }

    pub fn viewport(&self) -> ViewportRect {
        self.viewport
    }

    /// Replace the rectangle used for NDC conversion (call on every resize).
    pub fn set_viewport(&mut self, rect: ViewportRect) {
        self.viewport = rect;
    }

    /// Pointer handling stays a no-op until this is switched on.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn pointer_to_ray(&self, px: f32, py: f32, camera: &Camera) -> Option<Ray> {
        if self.viewport.is_degenerate() {
            return None;
        }
        let ndc = pointer_to_ndc(px, py, &self.viewport);
        Some(camera.ray_through_ndc(ndc))
    }

    /// Nearest hit against every loaded model's subtree.
    pub fn hit_test<P: PickSource + ?Sized>(&self, scene: &P, ray: &Ray) -> Option<Hit> {
        let roots = self.models.loaded_roots();
        if roots.is_empty() {
            return None;
        }
        scene.pick(ray, &roots)
    }

    pub fn resolve_model_from_node<P: PickSource + ?Sized>(
        &self,
        scene: &P,
        node: crate::scene::NodeId,
    ) -> Option<ModelKey> {
        self.models.resolve_model_from_node(scene, node)
    }

    fn pick_model<P: PickSource + ?Sized>(
        &self,
        scene: &P,
        camera: &Camera,
        px: f32,
        py: f32,
    ) -> Option<ModelKey> {
        let ray = self.pointer_to_ray(px, py, camera)?;
        let hit = self.hit_test(scene, &ray)?;
        self.resolve_model_from_node(scene, hit.node)
    }

    /// Update hover state for a pointer at `(px, py)`; returns the hovered model.
    ///
    /// Only transitions start tweens: moving over an already hovered model
    /// does nothing.
    pub fn on_pointer_move<P: PickSource + ?Sized>(
        &mut self,
        scene: &P,
        camera: &Camera,
        px: f32,
        py: f32,
    ) -> Option<ModelKey> {
        if !self.enabled {
            return None;
        }
        let hovered = self.pick_model(scene, camera, px, py);
        let cfg = &self.config;
        for m in self.models.iter_mut() {
            let want = m.is_loaded && hovered == Some(m.key);
            if want == m.is_hovered {
                continue;
            }
            // flag first, then animate
            m.is_hovered = want;
            let target = if want { cfg.hover_offset } else { 0.0 };
            self.animator
                .animate_to(m.key, Channel::Hover, target, cfg.hover_duration, cfg.ease);
        }
        hovered
    }

    /// Toggle the clicked state of the model under the pointer, if any.
    pub fn on_pointer_click<P: PickSource + ?Sized, D: DetailPanel + ?Sized>(
        &mut self,
        scene: &P,
        camera: &Camera,
        px: f32,
        py: f32,
        panel: &mut D,
    ) -> Option<ModelKey> {
        if !self.enabled {
            return None;
        }
        let key = self.pick_model(scene, camera, px, py)?;
        let cfg = &self.config;
        let m = self.models.get_mut(key)?;
        m.is_clicked = !m.is_clicked;
        let target = if m.is_clicked { cfg.click_offset } else { 0.0 };
        self.animator
            .animate_to(key, Channel::Click, target, cfg.click_duration, cfg.ease);
        if m.is_clicked {
            match m.descriptor() {
                Some(d) => {
                    log::info!("[pick] selected {}", d.id);
                    panel.show(d.title, d.description);
                }
                None => log::warn!("[pick] {} has no registry entry", m.id),
            }
        }
        Some(key)
    }

    /// Start the idle float on every loaded model not already floating.
    /// Returns how many were started.
    pub fn start_floating(&mut self) -> usize {
        let cfg = &self.config;
        let mut started = 0;
        for (i, m) in self.models.iter_mut().enumerate() {
            if m.is_floating || !m.is_loaded {
                continue;
            }
            let tween = Tween::new(0.0, cfg.float_amplitude, cfg.float_half_period, cfg.ease)
                .with_delay(i as f32 * cfg.float_phase_step)
                .forever(true);
            self.animator.start(m.key, Channel::Float, tween);
            m.is_floating = true;
            started += 1;
        }
        started
    }

    pub fn advance(&mut self, dt: f32) {
        self.animator.advance(dt);
    }

    /// Current height offset of `key` above its base position.
    pub fn offset(&self, key: ModelKey) -> f32 {
        self.animator.offset(key)
    }

    /// Write `base + offset` into each model root's translation.
    pub fn apply_offsets(&self, scene: &mut SceneGraph) {
        for m in self.models.iter() {
            let pos = m.base_position + Vec3::Y * self.animator.offset(m.key);
            scene.set_translation(m.root, pos);
        }
    }
}
