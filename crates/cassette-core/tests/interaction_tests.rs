// Pointer interaction against a fully loaded showcase.

mod common;

use cassette_core::animation::Channel;
use cassette_core::{pointer_to_ndc, ViewportRect, MODEL_REGISTRY};
use common::*;
use glam::Vec2;

#[test]
fn pointer_maps_to_ndc_inside_offset_rect() {
    let rect = ViewportRect::new(100.0, 50.0, 200.0, 100.0);
    assert_eq!(pointer_to_ndc(200.0, 100.0, &rect), Vec2::new(0.0, 0.0));
    assert_eq!(pointer_to_ndc(100.0, 50.0, &rect), Vec2::new(-1.0, 1.0));
    assert_eq!(pointer_to_ndc(300.0, 150.0, &rect), Vec2::new(1.0, -1.0));
}

#[test]
fn resize_updates_rect_used_for_rays() {
    let mut s = ready_showcase(1);
    let rect = ViewportRect::new(0.0, 0.0, 400.0, 400.0);
    s.resize(rect);
    assert_eq!(s.engine.viewport(), rect);
    assert!((s.camera.aspect - 1.0).abs() < 1e-6);

    // the center of the new rect is NDC (0,0)
    let ray = s.engine.pointer_to_ray(200.0, 200.0, &s.camera).expect("ray");
    let expected = s.camera.ray_through_ndc(Vec2::ZERO);
    assert!((ray.direction - expected.direction).length() < 1e-5);
}

#[test]
fn pointer_over_model_resolves_to_that_model() {
    let mut s = ready_showcase(1);
    let key = s.engine.models().by_id("casset01").expect("loaded");
    let (px, py) = screen_point(&s, key);
    assert_eq!(s.on_pointer_move(px, py), Some(key));
    assert!(s.engine.models().get(key).expect("model").is_hovered);
}

#[test]
fn each_model_is_pickable_on_its_own() {
    let mut s = ready_showcase(MODEL_REGISTRY.len());
    let keys: Vec<_> = s.engine.models().iter().map(|m| m.key).collect();
    for key in keys {
        let (px, py) = screen_point(&s, key);
        assert_eq!(s.on_pointer_move(px, py), Some(key));
    }
}

#[test]
fn miss_leaves_flags_untouched() {
    let mut s = ready_showcase(MODEL_REGISTRY.len());
    let before = s.engine.animator().calls.len();
    assert_eq!(s.on_pointer_move(RECT.left + 1.0, RECT.top + 1.0), None);
    assert_eq!(s.on_pointer_click(RECT.left + 1.0, RECT.top + 1.0), None);
    assert!(s.engine.models().iter().all(|m| !m.is_hovered && !m.is_clicked));
    assert_eq!(s.engine.animator().calls.len(), before);
    assert!(!s.panel.is_visible());
}

#[test]
fn repeated_moves_over_same_model_start_one_hover_tween() {
    let mut s = ready_showcase(1);
    let key = s.engine.models().by_id("casset01").expect("loaded");
    for _ in 0..5 {
        let (px, py) = screen_point(&s, key);
        s.on_pointer_move(px, py);
        s.tick(0.05);
    }
    let hovers = s
        .engine
        .animator()
        .count(|c| matches!(c, Call::AnimateTo(k, Channel::Hover, _) if *k == key));
    assert_eq!(hovers, 1);

    s.tick(1.0);
    let hover = s.engine.animator().inner.track(key, Channel::Hover).value();
    assert!((hover - s.engine.config().hover_offset).abs() < 1e-6);
}

#[test]
fn click_toggle_round_trip_returns_to_rest() {
    let mut s = ready_showcase(1);
    let key = s.engine.models().by_id("casset01").expect("loaded");
    let away = (RECT.left + 1.0, RECT.top + 1.0);

    let (px, py) = screen_point(&s, key);
    s.on_pointer_move(px, py);
    assert_eq!(s.on_pointer_click(px, py), Some(key));
    assert!(s.engine.models().get(key).expect("model").is_clicked);
    s.tick(0.1);
    s.on_pointer_move(away.0, away.1);
    s.tick(0.1);

    let (px, py) = screen_point(&s, key);
    s.on_pointer_move(px, py);
    s.tick(0.1);
    let (px, py) = screen_point(&s, key);
    assert_eq!(s.on_pointer_click(px, py), Some(key));
    s.on_pointer_move(away.0, away.1);
    s.tick(2.0);

    let m = s.engine.models().get(key).expect("model");
    assert!(!m.is_clicked && !m.is_hovered);
    let anim = &s.engine.animator().inner;
    assert_eq!(anim.track(key, Channel::Hover).value(), 0.0);
    assert_eq!(anim.track(key, Channel::Click).value(), 0.0);
    // only the idle float is left on top of the resting height
    let float = anim.track(key, Channel::Float).value();
    assert!((s.engine.offset(key) - float).abs() < 1e-6);
}

#[test]
fn clicked_model_holds_raised_height_while_hover_clears() {
    let mut s = ready_showcase(1);
    let key = s.engine.models().by_id("casset01").expect("loaded");
    let (px, py) = screen_point(&s, key);
    s.on_pointer_move(px, py);
    s.on_pointer_click(px, py);
    s.on_pointer_move(RECT.left + 1.0, RECT.top + 1.0);
    s.tick(2.0);
    let anim = &s.engine.animator().inner;
    assert_eq!(anim.track(key, Channel::Click).value(), s.engine.config().click_offset);
    assert_eq!(anim.track(key, Channel::Hover).value(), 0.0);
}

#[test]
fn click_shows_detail_text_for_that_model() {
    let mut s = ready_showcase(MODEL_REGISTRY.len());
    let key = s.engine.models().by_id("casset01").expect("loaded");
    let (px, py) = screen_point(&s, key);
    s.on_pointer_click(px, py);
    assert!(s.panel.is_visible());
    assert_eq!(s.panel.title(), "01版のカセットテープ");
    assert_eq!(s.panel.description(), MODEL_REGISTRY[0].description);

    // closing only hides the panel; the model stays selected
    s.close_panel();
    assert!(!s.panel.is_visible());
    assert!(s.engine.models().get(key).expect("model").is_clicked);
}

#[test]
fn unclicking_does_not_hide_the_panel() {
    let mut s = ready_showcase(1);
    let key = s.engine.models().by_id("casset01").expect("loaded");
    let (px, py) = screen_point(&s, key);
    s.on_pointer_click(px, py);
    s.on_pointer_click(px, py);
    assert!(!s.engine.models().get(key).expect("model").is_clicked);
    assert!(s.panel.is_visible());
}
