// Shared fixtures for host-side showcase tests.

#![allow(dead_code)]

use cassette_core::animation::{Animator, Channel, OffsetAnimator};
use cassette_core::scene::{MeshData, SceneTemplate, TemplateNode, Transform};
use cassette_core::tween::{Ease, Tween};
use cassette_core::{InteractionConfig, ModelKey, Showcase, ViewportRect, MODEL_REGISTRY};
use glam::Vec3;

pub const RECT: ViewportRect = ViewportRect {
    left: 100.0,
    top: 50.0,
    width: 800.0,
    height: 600.0,
};

/// A single small box, enough geometry to be picked.
pub fn box_template() -> SceneTemplate {
    SceneTemplate {
        nodes: vec![TemplateNode {
            name: Some("body".to_owned()),
            parent: None,
            transform: Transform::IDENTITY,
            mesh: Some(0),
        }],
        meshes: vec![MeshData::cuboid(Vec3::splat(0.08))],
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    AnimateTo(ModelKey, Channel, f32),
    Start(ModelKey, Channel),
}

/// Offset animator that also records every request it receives.
#[derive(Default)]
pub struct RecordingAnimator {
    pub inner: OffsetAnimator,
    pub calls: Vec<Call>,
}

impl RecordingAnimator {
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Animator for RecordingAnimator {
    fn animate_to(&mut self, model: ModelKey, channel: Channel, target: f32, duration: f32, ease: Ease) {
        self.calls.push(Call::AnimateTo(model, channel, target));
        self.inner.animate_to(model, channel, target, duration, ease);
    }

    fn start(&mut self, model: ModelKey, channel: Channel, tween: Tween) {
        self.calls.push(Call::Start(model, channel));
        self.inner.start(model, channel, tween);
    }

    fn offset(&self, model: ModelKey) -> f32 {
        self.inner.offset(model)
    }

    fn advance(&mut self, dt: f32) {
        self.inner.advance(dt);
    }
}

pub fn recording_showcase(slots: usize) -> Showcase<RecordingAnimator> {
    Showcase::with_animator(
        &MODEL_REGISTRY[..slots],
        RECT,
        InteractionConfig::default(),
        RecordingAnimator::default(),
    )
}

/// Load every registry slot with the box template.
pub fn ready_showcase(slots: usize) -> Showcase<RecordingAnimator> {
    let mut s = recording_showcase(slots);
    let template = box_template();
    for slot in 0..slots {
        s.on_model_loaded(slot, &template);
    }
    assert!(s.is_ready());
    s
}

/// Client-space pixel at the visual center of a model.
pub fn screen_point<A: Animator>(s: &Showcase<A>, key: ModelKey) -> (f32, f32) {
    let root = s.engine.models().get(key).expect("model").root;
    let center = s.scene.world_bounds(root).expect("bounds").center();
    let ndc = s.camera.project(center).expect("in front of camera");
    let rect = s.engine.viewport();
    (
        rect.left + (ndc.x + 1.0) * 0.5 * rect.width,
        rect.top + (1.0 - ndc.y) * 0.5 * rect.height,
    )
}
