//! Text generation collaborator interface.
//!
//! The engine only consumes generated prose and titles. One call, no retries: a
//! [`GenerationError`] goes straight back to the caller.

#[cfg(feature = "gemini")]
pub mod gemini;

pub use crate::foundation::error::GenerationError;

/// Title used when generation fails or returns nothing usable.
pub const FALLBACK_TITLE: &str = "An Amazing Story";
/// Characters of content shown to the generator when asking for a title.
pub const TITLE_SOURCE_CHARS: usize = 400;

/// Kind of prose requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Structured article with a title and subheadings.
    Blog,
    /// Narrative with characters and an arc.
    #[default]
    Story,
}

/// Optional voice selectors. `"Neutral"` (the default) adds nothing to the instruction.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    pub tone: String,
    /// Perspective to write from; blank for none.
    pub profession: String,
    pub writer_style: String,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            tone: NEUTRAL.to_owned(),
            profession: String::new(),
            writer_style: NEUTRAL.to_owned(),
        }
    }
}

const NEUTRAL: &str = "Neutral";
const HUMANIZED: &str = "Humanized";

/// One generation call.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub kind: ContentKind,
    pub language: String,
    #[serde(default)]
    pub style: StyleOptions,
}

impl GenerationRequest {
    /// Story request in English with neutral style.
    pub fn story(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            kind: ContentKind::Story,
            language: "English".to_owned(),
            style: StyleOptions::default(),
        }
    }

    /// Full instruction text sent to the model.
    pub fn build_instruction(&self) -> String {
        let base = match self.kind {
            ContentKind::Blog => format!(
                "You are a professional blog writer. Create an engaging, well-structured blog \
                 post about: {}. Include a compelling title, introduction, main content with \
                 subheadings, and conclusion.",
                self.prompt
            ),
            ContentKind::Story => format!(
                "You are a creative story writer. Write an engaging, imaginative story based on: \
                 {}. Include compelling characters, vivid descriptions, dialogue, and a \
                 satisfying narrative arc. Be creative and entertaining.",
                self.prompt
            ),
        };
        let mut out = format!(
            "{base} Write in {} language and respond in plain text, avoiding any Markdown \
             formatting like ## or **.",
            self.language
        );

        let style = &self.style;
        if style.tone != NEUTRAL {
            out.push_str(&format!(" Use a {} tone.", style.tone.to_lowercase()));
        }
        if !style.profession.trim().is_empty() {
            out.push_str(&format!(
                " Write from the perspective of {}.",
                style.profession
            ));
        }
        if style.writer_style != NEUTRAL {
            out.push_str(&format!(
                " Use a {} writing style.",
                style.writer_style.to_lowercase()
            ));
        }
        if style.tone == HUMANIZED || style.writer_style == HUMANIZED {
            out.push_str(
                " Make the writing sound natural, conversational, and human-like. Avoid robotic \
                 or overly formal language. Include personal touches and relatable elements.",
            );
        }
        out
    }
}

/// Prose generator.
pub trait TextGenerator {
    /// Produce text for `request`. Called once per user action.
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

impl<G: TextGenerator + ?Sized> TextGenerator for &G {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        (**self).generate(request)
    }
}

/// Ask `generator` for a short title for `content`.
///
/// Quotes, `#`, `*` and newlines are stripped from the answer. Failures and empty answers yield
/// [`FALLBACK_TITLE`].
pub fn generate_title(generator: &dyn TextGenerator, content: &str) -> String {
    let excerpt: String = content.chars().take(TITLE_SOURCE_CHARS).collect();
    let request = GenerationRequest::story(format!(
        "Based on the following content, generate a short, catchy, and engaging title \
         (maximum 6 words). Only return the title, nothing else:\n\n{excerpt}..."
    ));
    match generator.generate(&request) {
        Ok(raw) => {
            let title = clean_title(&raw);
            if title.is_empty() {
                tracing::warn!("generator returned an empty title; using fallback");
                FALLBACK_TITLE.to_owned()
            } else {
                title
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "title generation failed; using fallback");
            FALLBACK_TITLE.to_owned()
        }
    }
}

/// Remove `'`, `"`, `#`, `*` and newlines, then trim.
pub fn clean_title(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '\'' | '"' | '#' | '*' | '\n'))
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Title for freshly generated prose: a first line starting with `#` wins, otherwise the
/// prompt itself.
pub fn derive_title_from_prose(prose: &str, prompt: &str) -> String {
    match prose.lines().next() {
        Some(first) if first.starts_with('#') => first.replacen('#', "", 1).trim().to_owned(),
        _ => prompt.to_owned(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/mod.rs"]
mod tests;
