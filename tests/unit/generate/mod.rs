use super::*;
use std::cell::RefCell;

struct Canned {
    answer: Result<String, GenerationError>,
    seen: RefCell<Vec<GenerationRequest>>,
}

impl Canned {
    fn ok(s: &str) -> Self {
        Self {
            answer: Ok(s.to_owned()),
            seen: RefCell::new(Vec::new()),
        }
    }

    fn err(s: &str) -> Self {
        Self {
            answer: Err(GenerationError::new(s)),
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl TextGenerator for Canned {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.seen.borrow_mut().push(request.clone());
        self.answer.clone()
    }
}

#[test]
fn title_is_cleaned() {
    let g = Canned::ok("  \"**The Dragon's Hunger**\"\n");
    assert_eq!(generate_title(&g, "content"), "The Dragons Hunger");
}

#[test]
fn title_prompt_uses_a_bounded_excerpt() {
    let g = Canned::ok("T");
    let content = "x".repeat(1000);
    generate_title(&g, &content);
    let seen = g.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].prompt.ends_with(&format!("{}...", "x".repeat(400))));
    assert!(!seen[0].prompt.contains(&"x".repeat(401)));
    assert_eq!(seen[0].kind, ContentKind::Story);
}

#[test]
fn failure_or_empty_answer_falls_back() {
    assert_eq!(generate_title(&Canned::err("quota"), "c"), FALLBACK_TITLE);
    assert_eq!(generate_title(&Canned::ok("\"#*\"\n"), "c"), FALLBACK_TITLE);
}

#[test]
fn neutral_instruction_has_no_style_clauses() {
    let r = GenerationRequest::story("a lost cat");
    let s = r.build_instruction();
    assert!(s.contains("story based on: a lost cat."));
    assert!(s.contains("Write in English language"));
    assert!(!s.contains("tone."));
    assert!(!s.contains("perspective"));
}

#[test]
fn style_clauses_are_appended() {
    let r = GenerationRequest {
        prompt: "tides".to_owned(),
        kind: ContentKind::Blog,
        language: "French".to_owned(),
        style: StyleOptions {
            tone: "Humanized".to_owned(),
            profession: "a sailor".to_owned(),
            writer_style: "Poetic".to_owned(),
        },
    };
    let s = r.build_instruction();
    assert!(s.starts_with("You are a professional blog writer."));
    assert!(s.contains(" Use a humanized tone."));
    assert!(s.contains(" Write from the perspective of a sailor."));
    assert!(s.contains(" Use a poetic writing style."));
    assert!(s.ends_with("relatable elements."));
}

#[test]
fn heading_line_becomes_title() {
    assert_eq!(
        derive_title_from_prose("# The Long Night\nIt was dark.", "night"),
        "The Long Night"
    );
    assert_eq!(derive_title_from_prose("It was dark.", "night"), "night");
    assert_eq!(derive_title_from_prose("", "night"), "night");
}
