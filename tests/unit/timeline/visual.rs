use super::*;
use crate::config::profile::RenderProfile;
use crate::timeline::model::{ContentExtent, compute_timeline};

fn timeline() -> Timeline {
    compute_timeline(ContentExtent::Measured(400.0), &RenderProfile::default(), 1000.0).unwrap()
}

#[test]
fn title_hold_is_untransformed() {
    let t = timeline();
    let v = visual_state_at(3.0, &t);
    assert_eq!(v.phase, Phase::TitleHold);
    assert_eq!(v.title_opacity, 1.0);
    assert_eq!(v.title_offset_y, 0.0);
    assert_eq!(v.title_scale, 1.0);
    assert_eq!(v.body_offset_y, 1000.0);
    assert!(!v.body_scrolling());
}

#[test]
fn fade_midpoint_interpolates() {
    let t = timeline();
    let v = visual_state_at(7.5, &t);
    assert_eq!(v.phase, Phase::TitleFade);
    assert!((v.title_opacity - 0.5).abs() < 1e-12);
    assert!((v.title_offset_y + 25.0).abs() < 1e-12);
    assert!((v.title_scale - 0.95).abs() < 1e-12);
    assert_eq!(v.body_offset_y, 1000.0);
}

#[test]
fn title_hidden_after_fade_and_body_scrolls() {
    let t = timeline();
    let v = visual_state_at(11.0, &t);
    assert_eq!(v.phase, Phase::Scroll);
    assert!(!v.title_visible());
    assert_eq!(v.body_offset_y, 1000.0 - 2.0 * 50.0);
}

#[test]
fn state_is_continuous_at_phase_boundaries() {
    let t = timeline();
    for boundary in [t.title_phase_end, t.title_fade_end, t.scroll_end] {
        let before = visual_state_at(boundary - 1e-9, &t);
        let after = visual_state_at(boundary, &t);
        assert!((before.title_opacity - after.title_opacity).abs() < 1e-6);
        assert!((before.title_offset_y - after.title_offset_y).abs() < 1e-6);
        assert!((before.body_offset_y - after.body_offset_y).abs() < 1e-6);
    }
}

#[test]
fn times_outside_timeline_clamp() {
    let t = timeline();
    assert_eq!(visual_state_at(-4.0, &t), visual_state_at(0.0, &t));
    let end = visual_state_at(t.total_duration, &t);
    assert_eq!(visual_state_at(t.total_duration + 60.0, &t), end);
    assert_eq!(end.elapsed, t.total_duration);
}
