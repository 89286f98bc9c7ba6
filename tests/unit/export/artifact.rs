use super::*;

#[test]
fn dragon_title_slug() {
    assert_eq!(
        export_file_name("A Dragon's Tale!", AspectRatio::Landscape, Container::MP4),
        "a_dragons_tale_story_16x9.mp4"
    );
}

#[test]
fn whitespace_runs_collapse_after_stripping() {
    assert_eq!(slugify_title("Hello  -  World"), "hello_world");
    assert_eq!(slugify_title("Tab\tand\nnewline"), "tab_and_newline");
    assert_eq!(slugify_title("Café au lait"), "caf_au_lait");
}

#[test]
fn aspect_tag_is_part_of_the_name() {
    assert_eq!(
        export_file_name("Night", AspectRatio::Portrait, Container::MP4),
        "night_story_9x16.mp4"
    );
    assert_eq!(
        export_file_name("Night", AspectRatio::Square, Container::MP4),
        "night_story_1x1.mp4"
    );
}

#[test]
fn empty_slug_falls_back() {
    assert_eq!(
        export_file_name("!!!", AspectRatio::Landscape, Container::MP4),
        "untitled_story_16x9.mp4"
    );
    assert_eq!(
        export_file_name("   ", AspectRatio::Landscape, Container::MP4),
        "untitled_story_16x9.mp4"
    );
}

fn artifact() -> ExportArtifact {
    ExportArtifact {
        file_name: "t_story_16x9.mp4".to_owned(),
        mime: "video/mp4",
        bytes: vec![1, 2, 3],
    }
}

#[test]
fn directory_delivery_writes_the_file() {
    let dir = std::env::temp_dir().join(format!("storyreel-artifact-{}", std::process::id()));
    let mut d = DirectoryDelivery::new(dir.clone());
    let path = d.deliver(&artifact()).unwrap().unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), [1, 2, 3]);

    let mut strict = DirectoryDelivery::new(dir.clone()).no_overwrite();
    assert!(matches!(
        strict.deliver(&artifact()),
        Err(StoryError::Validation(_))
    ));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn memory_delivery_keeps_artifacts() {
    let mut m = MemoryDelivery::default();
    assert_eq!(m.deliver(&artifact()).unwrap(), None);
    assert_eq!(m.delivered, [artifact()]);
}
