// Load barrier behaviour as seen through the showcase.

mod common;

use cassette_core::animation::Channel;
use cassette_core::{AssetError, MODEL_REGISTRY};
use common::*;

#[test]
fn nothing_starts_until_every_asset_settles() {
    let mut s = recording_showcase(MODEL_REGISTRY.len());
    let eye = s.camera.eye;
    let template = box_template();
    for slot in 0..3 {
        let progress = s.on_model_loaded(slot, &template);
        assert!(progress.model.is_some());
        assert!(!progress.settled);
    }
    assert!(!s.is_ready());
    assert!(!s.engine.is_enabled());
    assert!(s.engine.models().iter().all(|m| !m.is_floating));
    assert!(s.engine.animator().calls.is_empty());
    assert_eq!(s.camera.eye, eye);

    let progress = s.on_model_loaded(3, &template);
    assert!(progress.settled);
    assert!(s.is_ready());
    assert!(s.engine.is_enabled());
    assert!(s.engine.models().iter().all(|m| m.is_floating));
    let floats = s
        .engine
        .animator()
        .count(|c| matches!(c, Call::Start(_, Channel::Float)));
    assert_eq!(floats, 4);
    assert_ne!(s.camera.eye, eye);
}

#[test]
fn barrier_fires_once_even_with_duplicate_reports() {
    let mut s = ready_showcase(2);
    let template = box_template();
    let again = s.on_model_loaded(1, &template);
    assert!(!again.settled);
    assert!(again.model.is_none());
    assert_eq!(s.engine.models().len(), 2);
    let floats = s
        .engine
        .animator()
        .count(|c| matches!(c, Call::Start(_, Channel::Float)));
    assert_eq!(floats, 2);
}

#[test]
fn completion_order_does_not_change_slots() {
    let mut s = recording_showcase(3);
    let template = box_template();
    s.on_model_loaded(2, &template);
    s.on_model_loaded(0, &template);
    s.on_model_loaded(1, &template);
    for m in s.engine.models().iter() {
        let expected = MODEL_REGISTRY[m.slot].id;
        assert_eq!(m.id, expected);
        assert!((m.base_position.z - m.slot as f32 * -0.5).abs() < 1e-6);
    }
}

#[test]
fn pointer_events_before_ready_are_ignored() {
    let mut s = recording_showcase(2);
    let key = s.on_model_loaded(0, &box_template()).model.expect("loaded");
    let (px, py) = screen_point(&s, key);
    assert_eq!(s.on_pointer_move(px, py), None);
    assert_eq!(s.on_pointer_click(px, py), None);
    let m = s.engine.models().get(key).expect("model");
    assert!(!m.is_hovered && !m.is_clicked);
    assert!(!s.panel.is_visible());
}

#[test]
fn failed_asset_is_excluded_but_still_settles() {
    let mut s = recording_showcase(2);
    s.on_model_loaded(0, &box_template());
    let progress = s.on_model_failed(1, &AssetError::fetch("./models/cassette02.glb", "404"));
    assert!(progress.settled);
    assert!(s.is_ready());
    assert_eq!(s.engine.models().len(), 1);
    assert!(s.engine.models().by_id("casset02").is_none());
    let floats = s
        .engine
        .animator()
        .count(|c| matches!(c, Call::Start(_, Channel::Float)));
    assert_eq!(floats, 1);
}

#[test]
fn floating_models_bob_with_staggered_phase() {
    let mut s = ready_showcase(2);
    s.tick(0.5);
    let a = s.engine.models().by_id("casset01").expect("a");
    let b = s.engine.models().by_id("casset02").expect("b");
    let (oa, ob) = (s.engine.offset(a), s.engine.offset(b));
    assert!(oa > 0.0 && oa < 0.1);
    assert!(ob < oa);
    let pos = s.model_position(a).expect("position");
    assert!((pos.y - oa).abs() < 1e-6);
}
