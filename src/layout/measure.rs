/// Which text block a string belongs to. Surfaces may use a different face per role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextRole {
    /// Story title (bold).
    Title,
    /// Scrolling body paragraph.
    Body,
    /// Closing mark after the last paragraph (bold).
    Closing,
}

/// Horizontal advance of a single line of text, in pixels.
///
/// Preview and export must wrap with the same implementation to agree on line breaks, so every
/// component that wraps takes the measure as a parameter instead of owning one.
pub trait TextMeasure {
    /// Width of `text` laid out on one line at `size_px`.
    fn advance_width(&mut self, text: &str, role: TextRole, size_px: f64) -> f64;
}

impl<M: TextMeasure + ?Sized> TextMeasure for &mut M {
    fn advance_width(&mut self, text: &str, role: TextRole, size_px: f64) -> f64 {
        (**self).advance_width(text, role, size_px)
    }
}

impl<M: TextMeasure + ?Sized> TextMeasure for Box<M> {
    fn advance_width(&mut self, text: &str, role: TextRole, size_px: f64) -> f64 {
        (**self).advance_width(text, role, size_px)
    }
}

/// Font-free measure: every character advances by `size_px * em_ratio`.
///
/// Deterministic across hosts, which makes it the measure of choice for tests and for previews
/// that do not load a font.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceMeasure {
    /// Character advance as a fraction of the font size.
    pub em_ratio: f64,
}

impl Default for FixedAdvanceMeasure {
    fn default() -> Self {
        Self { em_ratio: 0.5 }
    }
}

impl TextMeasure for FixedAdvanceMeasure {
    fn advance_width(&mut self, text: &str, _role: TextRole, size_px: f64) -> f64 {
        text.chars().count() as f64 * size_px * self.em_ratio
    }
}
