use super::*;

fn ink() -> TextBrushRgba8 {
    TextBrushRgba8 {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    }
}

#[test]
fn garbage_font_bytes_are_rejected() {
    let fonts = FontSet {
        regular: Arc::new(b"definitely not a font".to_vec()),
        bold: None,
    };
    assert!(matches!(
        TextLayoutEngine::new(&fonts, ink()),
        Err(StoryError::Layout(_))
    ));
}

#[test]
fn missing_font_file_is_a_layout_error() {
    let err = FontSet::from_paths(std::path::Path::new("does/not/exist.ttf"), None).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.ttf"));
}

#[test]
fn bold_face_is_used_for_title_roles_only() {
    let fonts = FontSet {
        regular: Arc::new(vec![1]),
        bold: Some(Arc::new(vec![2])),
    };
    assert_eq!(fonts.bytes_for(TextRole::Body).as_slice(), [1]);
    assert_eq!(fonts.bytes_for(TextRole::Title).as_slice(), [2]);
    assert_eq!(fonts.bytes_for(TextRole::Closing).as_slice(), [2]);
}

#[test]
fn system_font_measures_monotonically() {
    let Some(path) = crate::render::cpu::find_system_font() else {
        eprintln!("no system font found; skipping");
        return;
    };
    let fonts = FontSet::from_paths(&path, None).unwrap();
    let mut engine = TextLayoutEngine::new(&fonts, ink()).unwrap();
    let short = engine.advance_width("story", TextRole::Body, 32.0);
    let long = engine.advance_width("story time", TextRole::Body, 32.0);
    assert!(short > 0.0);
    assert!(long > short);
    assert_eq!(engine.advance_width("story", TextRole::Body, 32.0), short);
}

#[test]
fn only_painted_lines_are_cached() {
    let Some(path) = crate::render::cpu::find_system_font() else {
        eprintln!("no system font found; skipping");
        return;
    };
    let fonts = FontSet::from_paths(&path, None).unwrap();
    let mut engine = TextLayoutEngine::new(&fonts, ink()).unwrap();

    let prose = "ill fill mill till will ".repeat(40);
    let lines = crate::layout::wrap::wrap_words(&prose, 600.0, |s| {
        engine.advance_width(s, TextRole::Body, 32.0)
    });
    assert!(lines.len() > 1);
    assert_eq!(engine.cached_layouts(), 0);

    let first = engine.layout_line(&lines[0], TextRole::Body, 32.0).unwrap();
    let again = engine.layout_line(&lines[0], TextRole::Body, 32.0).unwrap();
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(engine.cached_layouts(), 1);
    assert_eq!(
        f64::from(first.width()),
        engine.advance_width(&lines[0], TextRole::Body, 32.0)
    );
}
