use super::*;
use crate::config::profile::{Speed, TextSize};
use crate::layout::measure::FixedAdvanceMeasure;

fn layout_for(n: usize) -> ContentLayout {
    let paras: Vec<String> = (0..n).map(|i| format!("Line {i}.")).collect();
    ContentLayout::build(
        &paras,
        1920.0,
        TextSize::Medium.metrics(),
        &mut FixedAdvanceMeasure::default(),
    )
}

#[test]
fn three_short_lines_at_slow_speed() {
    let layout = layout_for(3);
    let profile = RenderProfile::default().with_speed(Speed::Slow);
    let t = compute_timeline(ContentExtent::Layout(&layout), &profile, 1080.0).unwrap();

    let distance = layout.height() + 1080.0 + SCROLL_BUFFER_PX;
    let expected = 6.0 + 3.0 + 5.0 + distance / 30.0;
    assert!((t.total_duration - expected).abs() < 0.01);
    assert_eq!(t.title_phase_end, 6.0);
    assert_eq!(t.title_fade_end, 9.0);
    assert!((t.scroll_distance() - distance).abs() < 1e-9);
    assert_eq!(t.display_duration_secs(), expected.ceil() as u64);
}

#[test]
fn phase_boundaries_are_strictly_ordered() {
    for n in [0, 1, 5, 50] {
        let layout = layout_for(n);
        for speed in Speed::ALL {
            let profile = RenderProfile::default().with_speed(speed);
            let t = compute_timeline(ContentExtent::Layout(&layout), &profile, 720.0).unwrap();
            assert!(t.title_phase_end < t.title_fade_end);
            assert!(t.title_fade_end < t.total_duration);
            assert!(t.scroll_end < t.total_duration);
        }
    }
}

#[test]
fn more_lines_never_shorten_the_timeline() {
    let profile = RenderProfile::default();
    let mut prev = 0.0;
    for n in 1..30 {
        let layout = layout_for(n);
        let t = compute_timeline(ContentExtent::Layout(&layout), &profile, 1080.0).unwrap();
        assert!(t.total_duration > prev);
        prev = t.total_duration;
    }
}

#[test]
fn faster_speed_never_lengthens_the_timeline() {
    let layout = layout_for(12);
    let durations: Vec<f64> = Speed::ALL
        .iter()
        .map(|&s| {
            compute_timeline(
                ContentExtent::Layout(&layout),
                &RenderProfile::default().with_speed(s),
                1080.0,
            )
            .unwrap()
            .total_duration
        })
        .collect();
    assert!(durations[0] > durations[1]);
    assert!(durations[1] > durations[2]);
}

#[test]
fn measured_and_layout_extents_agree_for_equal_heights() {
    let layout = layout_for(4);
    let profile = RenderProfile::default();
    let a = compute_timeline(ContentExtent::Layout(&layout), &profile, 900.0).unwrap();
    let b = compute_timeline(ContentExtent::Measured(layout.height()), &profile, 900.0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_heights_are_rejected() {
    let profile = RenderProfile::default();
    assert!(compute_timeline(ContentExtent::Measured(-1.0), &profile, 1080.0).is_err());
    assert!(compute_timeline(ContentExtent::Measured(f64::NAN), &profile, 1080.0).is_err());
    assert!(compute_timeline(ContentExtent::Measured(10.0), &profile, 0.0).is_err());
}

#[test]
fn phase_at_walks_all_phases() {
    let t = compute_timeline(ContentExtent::Measured(100.0), &RenderProfile::default(), 400.0)
        .unwrap();
    assert_eq!(t.phase_at(-5.0), Phase::TitleHold);
    assert_eq!(t.phase_at(0.0), Phase::TitleHold);
    assert_eq!(t.phase_at(6.0), Phase::TitleFade);
    assert_eq!(t.phase_at(9.0), Phase::Scroll);
    assert_eq!(t.phase_at(t.scroll_end), Phase::Credits);
    assert_eq!(t.phase_at(t.total_duration + 100.0), Phase::Credits);
}

#[test]
fn frame_count_rounds_up() {
    // 100 + 400 + 500 = 1000px at 50px/s => 20s scroll, 34s total.
    let t = compute_timeline(ContentExtent::Measured(100.0), &RenderProfile::default(), 400.0)
        .unwrap();
    assert_eq!(t.total_duration, 34.0);
    assert_eq!(t.frame_count(Fps::new(30, 1).unwrap()), 1020);

    let t = compute_timeline(ContentExtent::Measured(101.0), &RenderProfile::default(), 400.0)
        .unwrap();
    assert_eq!(t.frame_count(Fps::new(30, 1).unwrap()), 1021);
}

#[test]
fn clock_formatting() {
    assert_eq!(format_clock(0.0), "0:00");
    assert_eq!(format_clock(9.99), "0:09");
    assert_eq!(format_clock(75.2), "1:15");
    assert_eq!(format_clock(-3.0), "0:00");
    assert_eq!(format_clock(f64::INFINITY), "0:00");
}

#[test]
fn progress_is_clamped() {
    let t = compute_timeline(ContentExtent::Measured(100.0), &RenderProfile::default(), 400.0)
        .unwrap();
    assert_eq!(t.progress(-1.0), 0.0);
    assert_eq!(t.progress(17.0), 0.5);
    assert_eq!(t.progress(1e9), 1.0);
}
