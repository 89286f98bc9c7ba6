/// Immutable input to playback and export: title plus non-blank content lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoryScript {
    title: Option<String>,
    lines: Vec<String>,
}

impl StoryScript {
    /// Build a script from raw prose. Each non-blank line becomes one paragraph.
    pub fn from_text(content: &str) -> Self {
        let lines = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_owned)
            .collect();
        Self { title: None, lines }
    }

    /// Attach a title. Blank titles leave the script without one.
    pub fn with_title(mut self, title: &str) -> Self {
        let t = title.trim();
        self.title = (!t.is_empty()).then(|| t.to_owned());
        self
    }

    /// Title, once available.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Paragraph lines in order, blank lines already discarded.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Return `true` when there is at least one content line.
    pub fn has_content(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Return `true` when both title and content are available.
    pub fn is_ready(&self) -> bool {
        self.title.is_some() && self.has_content()
    }
}

#[cfg(test)]
#[path = "../tests/unit/script.rs"]
mod tests;
