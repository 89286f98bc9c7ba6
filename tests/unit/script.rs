use super::*;

#[test]
fn blank_lines_are_discarded() {
    let s = StoryScript::from_text("One\n\n   \r\nTwo  \n\tThree\n");
    assert_eq!(s.lines(), ["One", "Two", "Three"]);
}

#[test]
fn readiness_needs_title_and_content() {
    let s = StoryScript::from_text("Once upon a time.");
    assert!(!s.is_ready());
    assert!(s.clone().with_title("Tale").is_ready());
    assert!(!s.with_title("   ").is_ready());
    assert!(!StoryScript::from_text("\n\n").with_title("Tale").is_ready());
}
