use super::*;

#[test]
fn faster_speed_scrolls_faster() {
    assert!(Speed::Slow.scroll_rate() < Speed::Medium.scroll_rate());
    assert!(Speed::Medium.scroll_rate() < Speed::Fast.scroll_rate());
}

#[test]
fn aspect_ratio_canvases_are_even() {
    for a in AspectRatio::ALL {
        let c = a.canvas();
        assert!(c.width % 2 == 0 && c.height % 2 == 0, "{a:?}");
    }
    assert_eq!(AspectRatio::Portrait.canvas().width, 720);
    assert_eq!(AspectRatio::Portrait.canvas().height, 1280);
}

#[test]
fn aspect_ratio_labels_round_trip() {
    for a in AspectRatio::ALL {
        assert_eq!(AspectRatio::from_label(a.label()), Some(a));
    }
    assert_eq!(AspectRatio::from_label("4:3"), None);
    assert_eq!(AspectRatio::Landscape.file_tag(), "16x9");
}

#[test]
fn profile_json_uses_display_names() {
    let p = RenderProfile::default()
        .with_speed(Speed::Fast)
        .with_aspect_ratio(AspectRatio::Square)
        .with_text_size(TextSize::Large);
    let json = serde_json::to_value(p).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "speed": "fast", "aspect_ratio": "1:1", "text_size": "large" })
    );

    let partial: RenderProfile = serde_json::from_str(r#"{ "speed": "slow" }"#).unwrap();
    assert_eq!(partial.speed, Speed::Slow);
    assert_eq!(partial.aspect_ratio, AspectRatio::Landscape);
}

#[test]
fn text_metrics_grow_with_size() {
    let s = TextSize::Small.metrics();
    let l = TextSize::Large.metrics();
    assert!(s.body_px < l.body_px);
    assert!(s.line_height_px < l.line_height_px);
    assert_eq!(TextSize::Medium.metrics().title_line_height_px(), 84.0);
}
