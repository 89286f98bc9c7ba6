use super::*;
use crate::render::recording::RecordingSurface;

fn script() -> StoryScript {
    StoryScript::from_text("The dragon woke.\nIt was hungry.\nIt flew away.").with_title("A Dragon's Tale")
}

fn composer(script: &StoryScript) -> FrameComposer {
    let profile = RenderProfile::default();
    let mut surface = RecordingSurface::new(profile.canvas());
    FrameComposer::new(script, &profile, &mut surface, [255, 255, 255, 255]).unwrap()
}

fn texts(list: &DisplayList) -> Vec<(String, f64, f32)> {
    list.texts()
        .map(|op| match op {
            DrawOp::Text {
                text,
                center,
                opacity,
                ..
            } => (text.clone(), center.y, *opacity),
            _ => unreachable!(),
        })
        .collect()
}

fn fps() -> Fps {
    Fps::default()
}

#[test]
fn untitled_script_is_not_ready() {
    let profile = RenderProfile::default();
    let mut surface = RecordingSurface::new(profile.canvas());
    let s = StoryScript::from_text("Body only.");
    let err = FrameComposer::new(&s, &profile, &mut surface, [0; 4]).unwrap_err();
    assert!(matches!(err, StoryError::NotReady(_)));
}

#[test]
fn timeline_uses_wrapped_content_height() {
    let c = composer(&script());
    // 3 * 60 + 100 + 48 = 328; (328 + 1080 + 500) / 50 = 38.16
    assert!((c.timeline().total_duration - (6.0 + 3.0 + 38.16 + 5.0)).abs() < 1e-9);
    assert_eq!(c.frame_count(fps()), (52.16f64 * 30.0).ceil() as u64);
}

#[test]
fn first_frame_is_background_then_centered_title() {
    let c = composer(&script());
    let list = c.compose(FrameIndex(0), fps());
    assert_eq!(list.ops[0], DrawOp::Clear);
    assert_eq!(
        list.ops[1],
        DrawOp::FillBackground {
            rgba: [255, 255, 255, 255]
        }
    );
    assert_eq!(texts(&list), [("A Dragon's Tale".to_owned(), 540.0, 1.0)]);
}

#[test]
fn fade_midpoint_halves_title_opacity() {
    let c = composer(&script());
    let list = c.compose(FrameIndex(225), fps());
    let t = texts(&list);
    assert_eq!(t.len(), 1);
    assert!((t[0].2 - 0.5).abs() < 1e-6);
    assert!((t[0].1 - (540.0 - 25.0)).abs() < 1e-9);
}

#[test]
fn scrolling_body_is_placed_from_offset() {
    let c = composer(&script());
    // t = 9 + (1080 - 500) / 50 = 20.6 s => offset 500.
    let list = c.compose(FrameIndex(618), fps());
    let t = texts(&list);
    let ys: Vec<f64> = t.iter().map(|(_, y, _)| *y).collect();
    assert_eq!(t[0].0, "The dragon woke.");
    for (got, want) in ys.iter().zip([521.0, 581.0, 641.0]) {
        assert!((got - want).abs() < 1e-6, "{got} != {want}");
    }
    assert!(!list.contains_text(CLOSING_TEXT));
}

#[test]
fn closing_mark_follows_last_line_past_midpoint() {
    let c = composer(&script());
    // offset 300: last line top at 420 < 540.
    let list = c.compose(FrameIndex(738), fps());
    assert!(list.contains_text(CLOSING_TEXT));
    let closing = texts(&list)
        .into_iter()
        .find(|(t, _, _)| t == CLOSING_TEXT)
        .unwrap();
    assert!((closing.1 - (300.0 + 280.0 + 24.0)).abs() < 1e-6);
}

#[test]
fn frames_past_the_end_repeat_terminal_state() {
    let c = composer(&script());
    let last = c.frame_count(fps()) - 1;
    let a = c.compose(FrameIndex(last), fps());
    let b = c.compose(FrameIndex(last + 1), fps());
    let z = c.compose(FrameIndex(u64::from(u32::MAX)), fps());
    assert_eq!(b, z);
    assert_eq!(texts(&a).len(), texts(&b).len());
}

#[test]
fn culling_keeps_positions_of_later_lines() {
    let body: Vec<String> = (0..200).map(|i| format!("Line {i}")).collect();
    let s = StoryScript::from_text(&body.join("\n")).with_title("Long");
    let c = composer(&s);
    // Far enough into the scroll that the first lines are gone.
    let state = visual_state_at(c.timeline().title_fade_end + 100.0, c.timeline());
    let list = c.compose_state(&state);
    let drawn = texts(&list);
    assert!(!drawn.is_empty());
    assert!(drawn.len() < 200);
    for (text, y, _) in drawn {
        let i: usize = text.trim_start_matches("Line ").parse().unwrap();
        let want = state.body_offset_y + i as f64 * 60.0 + 21.0;
        assert!((y - want).abs() < 1e-6);
        assert!(y > -60.0 && y < 1080.0 + 60.0);
    }
}

#[test]
fn render_frame_paints_the_composed_list() {
    let c = composer(&script());
    let mut surface = RecordingSurface::new(c.canvas());
    render_frame(&mut surface, &c, FrameIndex(0), fps()).unwrap();
    assert_eq!(surface.paints(), 1);
    assert_eq!(surface.last(), Some(&c.compose(FrameIndex(0), fps())));
}
