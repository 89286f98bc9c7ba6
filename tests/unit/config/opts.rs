use super::*;
use crate::config::profile::Speed;

#[test]
fn defaults_match_export_constants() {
    let o = ExportOpts::default();
    assert_eq!(o.fps, Fps::new(30, 1).unwrap());
    assert_eq!(o.batch_frames, 60);
    assert_eq!(o.background_rgba, [255, 255, 255, 255]);
    assert!(o.validate().is_ok());
}

#[test]
fn zero_batch_is_rejected() {
    let o = ExportOpts {
        batch_frames: 0,
        ..ExportOpts::default()
    };
    assert!(o.validate().is_err());
}

#[test]
fn document_parses_with_defaults() {
    let doc: StoryDocument = serde_json::from_str(
        r#"{ "title": "Night Train", "content": "First.\n\n  \nSecond.", "profile": { "speed": "fast" } }"#,
    )
    .unwrap();
    assert_eq!(doc.profile.speed, Speed::Fast);
    assert_eq!(doc.export, ExportOpts::default());

    let script = doc.script();
    assert_eq!(script.title(), Some("Night Train"));
    assert_eq!(script.lines().len(), 2);
    assert!(script.is_ready());
}

#[test]
fn document_without_title_is_not_ready() {
    let doc: StoryDocument = serde_json::from_str(r#"{ "content": "Only prose." }"#).unwrap();
    assert!(!doc.script().is_ready());
}
