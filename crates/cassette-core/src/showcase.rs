//! Whole-viewer state: scene, camera, models, panel and load barrier.
//!
//! The web frontend owns one of these behind `Rc<RefCell<_>>` and forwards
//! load completions, pointer events, resizes and frame ticks into it.

use crate::animation::{Animator, OffsetAnimator};
use crate::constants::GROUP_YAW_DEG;
use crate::detail::DetailPanelState;
use crate::error::AssetError;
use crate::interaction::{DetailPanel, InteractionConfig, PointerInteractionEngine};
use crate::lighting::{EnvironmentLight, LightRig};
use crate::loader::{slot_position, LoadBarrier, SlotState};
use crate::marquee::Marquee;
use crate::models::ModelKey;
use crate::picking::ViewportRect;
use crate::registry::ModelDescriptor;
use crate::scene::{Aabb, NodeId, SceneGraph, SceneTemplate, Transform};
use crate::state::Camera;
use glam::{Quat, Vec3};

/// Result of reporting one asset's outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadProgress {
    pub model: Option<ModelKey>,
    /// True exactly once: on the report that settled the last pending asset.
    pub settled: bool,
}

pub struct Showcase<A: Animator = OffsetAnimator> {
    pub scene: SceneGraph,
    pub group: NodeId,
    pub camera: Camera,
    pub lights: LightRig,
    pub environment: Option<EnvironmentLight>,
    pub engine: PointerInteractionEngine<A>,
    pub panel: DetailPanelState,
    pub marquee: Marquee,
    registry: &'static [ModelDescriptor],
    barrier: LoadBarrier,
}

impl Showcase<OffsetAnimator> {
    pub fn new(registry: &'static [ModelDescriptor], viewport: ViewportRect) -> Self {
        Self::with_animator(registry, viewport, InteractionConfig::default(), OffsetAnimator::new())
    }
}

impl<A: Animator> Showcase<A> {
    pub fn with_animator(
        registry: &'static [ModelDescriptor],
        viewport: ViewportRect,
        config: InteractionConfig,
        animator: A,
    ) -> Self {
        let mut scene = SceneGraph::new();
        let group = scene.add_node(
            None,
            Some("models"),
            Transform::from_rotation(Quat::from_rotation_y(GROUP_YAW_DEG.to_radians())),
        );
        let mut showcase = Self {
            scene,
            group,
            camera: Camera::showcase(viewport.aspect()),
            lights: LightRig::default(),
            environment: None,
            engine: PointerInteractionEngine::with_animator(config, animator, viewport),
            panel: DetailPanelState::new(),
            marquee: Marquee::new(),
            registry,
            barrier: LoadBarrier::new(registry.len()),
        };
        // an empty registry has nothing to wait for
        if showcase.barrier.try_fire() {
            showcase.on_all_settled();
        }
        showcase
    }

    pub fn registry(&self) -> &'static [ModelDescriptor] {
        self.registry
    }

    pub fn is_ready(&self) -> bool {
        self.barrier.has_fired()
    }

    /// Install the asset for registry `slot` under the model group.
    pub fn on_model_loaded(&mut self, slot: usize, template: &SceneTemplate) -> LoadProgress {
        let Some(desc) = self.registry.get(slot) else {
            log::warn!("[loader] no registry slot {}", slot);
            return LoadProgress {
                model: None,
                settled: false,
            };
        };
        if self.barrier.state(slot) != Some(SlotState::Pending) {
            log::warn!("[loader] {} already settled, ignoring", desc.id);
            return LoadProgress {
                model: None,
                settled: false,
            };
        }
        let root = self.scene.instantiate(Some(self.group), Some(desc.id), template);
        let base = slot_position(slot);
        self.scene.set_translation(root, base);
        let key = self
            .engine
            .models_mut()
            .push(desc.id, slot, root, base, Quat::IDENTITY);
        log::info!("[loader] {} ready in slot {}", desc.id, slot);
        let settled = self.barrier.record(slot, true);
        if settled {
            self.on_all_settled();
        }
        LoadProgress {
            model: Some(key),
            settled,
        }
    }

    /// Record a failed asset; it never joins the collection.
    pub fn on_model_failed(&mut self, slot: usize, err: &AssetError) -> LoadProgress {
        let id = self.registry.get(slot).map(|d| d.id).unwrap_or("?");
        log::error!("[loader] {} failed: {}", id, err);
        let settled = self.barrier.record(slot, false);
        if settled {
            self.on_all_settled();
        }
        LoadProgress {
            model: None,
            settled,
        }
    }

    fn on_all_settled(&mut self) {
        log::info!(
            "[loader] all assets settled: {} loaded, {} failed",
            self.barrier.loaded(),
            self.barrier.failed()
        );
        let floating = self.engine.start_floating();
        log::info!("[loader] floating started for {} models", floating);
        if let Some(bounds) = self.models_bounds() {
            self.camera.frame_bounds(&bounds);
            log::info!(
                "[loader] camera framed at ({:.2},{:.2},{:.2})",
                self.camera.target.x,
                self.camera.target.y,
                self.camera.target.z
            );
        }
        self.engine.set_enabled(true);
    }

    /// World bounds of every loaded model at rest.
    pub fn models_bounds(&self) -> Option<Aabb> {
        self.engine
            .models()
            .iter()
            .filter_map(|m| self.scene.world_bounds(m.root))
            .reduce(Aabb::union)
    }

    pub fn set_environment(&mut self, env: EnvironmentLight) {
        self.environment = Some(env);
    }

    /// Viewport moved or resized: refresh NDC mapping and camera aspect.
    pub fn resize(&mut self, rect: ViewportRect) {
        self.engine.set_viewport(rect);
        self.camera.set_aspect(rect.width, rect.height);
    }

    pub fn on_pointer_move(&mut self, px: f32, py: f32) -> Option<ModelKey> {
        self.engine.on_pointer_move(&self.scene, &self.camera, px, py)
    }

    pub fn on_pointer_click(&mut self, px: f32, py: f32) -> Option<ModelKey> {
        self.engine
            .on_pointer_click(&self.scene, &self.camera, px, py, &mut self.panel)
    }

    pub fn close_panel(&mut self) {
        self.panel.hide();
    }

    /// Advance every animation by `dt` and write model positions.
    pub fn tick(&mut self, dt: f32) {
        self.engine.advance(dt);
        self.engine.apply_offsets(&mut self.scene);
        self.panel.advance(dt);
        self.marquee.advance(dt);
    }

    /// Current world position of a model root.
    pub fn model_position(&self, key: ModelKey) -> Option<Vec3> {
        let m = self.engine.models().get(key)?;
        Some(self.scene.transform(m.root).translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::{import_glb, tests::triangle_glb};
    use crate::registry::MODEL_REGISTRY;

    #[test]
    fn imported_glb_becomes_a_pickable_model() {
        let rect = ViewportRect::new(0.0, 0.0, 800.0, 600.0);
        let mut s = Showcase::new(&MODEL_REGISTRY[..1], rect);
        let template = import_glb(&triangle_glb(), "cassette01").expect("import");
        let progress = s.on_model_loaded(0, &template);
        assert!(progress.settled);
        let key = progress.model.expect("model");
        let root = s.engine.models().get(key).expect("loaded").root;
        let leaf = *s.scene.descendants(root).last().expect("leaf");
        assert_ne!(leaf, root);
        assert_eq!(s.engine.resolve_model_from_node(&s.scene, leaf), Some(key));
        assert!(s.is_ready());
        assert!(s.engine.is_enabled());
    }
}
