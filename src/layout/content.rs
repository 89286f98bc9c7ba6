//! Vertical placement of the title block and the scrolling body.
//!
//! Heights here are the single source used by the timeline: preview and export both derive the
//! scroll distance from [`ContentLayout::height`], so they agree on when the last line leaves
//! the frame.

use crate::config::profile::TextMetrics;
use crate::layout::measure::{TextMeasure, TextRole};
use crate::layout::wrap::wrap_words;
use std::ops::Range;

/// Total horizontal margin (both sides) reserved around body lines.
pub const BODY_SIDE_MARGIN_PX: f64 = 80.0;
/// Total horizontal margin (both sides) reserved around title lines.
pub const TITLE_SIDE_MARGIN_PX: f64 = 100.0;
/// Gap between the last paragraph advance and the closing mark.
pub const CLOSING_GAP_PX: f64 = 100.0;
/// Text of the closing mark.
pub const CLOSING_TEXT: &str = "The End";

/// One wrapped body line placed relative to the top of the content block.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    /// Line text.
    pub text: String,
    /// Top of the line box, relative to the content top.
    pub top: f64,
    /// Index of the source paragraph.
    pub paragraph: usize,
}

/// Estimated content height from wrapped line counts and the spacing table.
///
/// `paragraph_line_counts[i]` is the number of wrapped lines of paragraph `i`. Each paragraph
/// advances `line_height` per wrapped line except the last, which advances `paragraph_spacing`;
/// the closing mark follows after [`CLOSING_GAP_PX`].
pub fn estimate_content_height(paragraph_line_counts: &[usize], metrics: &TextMetrics) -> f64 {
    let body: f64 = paragraph_line_counts
        .iter()
        .filter(|&&n| n > 0)
        .map(|&n| (n - 1) as f64 * metrics.line_height_px + metrics.paragraph_spacing_px)
        .sum();
    body + CLOSING_GAP_PX + metrics.closing_px
}

/// Body lines wrapped for one surface width, with their vertical offsets.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentLayout {
    lines: Vec<PlacedLine>,
    closing_top: f64,
    height: f64,
    metrics: TextMetrics,
}

impl ContentLayout {
    /// Wrap every paragraph to `surface_width - BODY_SIDE_MARGIN_PX` and stack the results.
    pub fn build(
        paragraphs: &[String],
        surface_width_px: f64,
        metrics: TextMetrics,
        measure: &mut dyn TextMeasure,
    ) -> Self {
        let max_width = (surface_width_px - BODY_SIDE_MARGIN_PX).max(1.0);
        let mut lines = Vec::new();
        let mut counts = Vec::with_capacity(paragraphs.len());
        let mut y = 0.0;

        for (paragraph, text) in paragraphs.iter().enumerate() {
            let wrapped = wrap_words(text, max_width, |s| {
                measure.advance_width(s, TextRole::Body, metrics.body_px)
            });
            counts.push(wrapped.len());
            let n = wrapped.len();
            for (k, text) in wrapped.into_iter().enumerate() {
                lines.push(PlacedLine {
                    text,
                    top: y,
                    paragraph,
                });
                y += if k + 1 < n {
                    metrics.line_height_px
                } else {
                    metrics.paragraph_spacing_px
                };
            }
        }

        let height = estimate_content_height(&counts, &metrics);
        Self {
            lines,
            closing_top: y + CLOSING_GAP_PX,
            height,
            metrics,
        }
    }

    /// Wrapped lines in top-to-bottom order.
    pub fn lines(&self) -> &[PlacedLine] {
        &self.lines
    }

    /// Top of the closing mark, relative to the content top.
    pub fn closing_top(&self) -> f64 {
        self.closing_top
    }

    /// Full height of the content block including the closing mark.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Spacing table the layout was built with.
    pub fn metrics(&self) -> &TextMetrics {
        &self.metrics
    }

    /// Lines intersecting `[0, viewport_height)` when the content top sits at `body_offset`.
    ///
    /// Positions are fixed at build time, so culling never shifts later lines.
    pub fn visible_lines(&self, body_offset: f64, viewport_height: f64) -> Range<usize> {
        let line_h = self.metrics.line_height_px;
        let start = self
            .lines
            .partition_point(|l| body_offset + l.top + line_h <= 0.0);
        let end = self
            .lines
            .partition_point(|l| body_offset + l.top < viewport_height);
        start..end.max(start)
    }

    /// Whether the closing mark is due: the last line has scrolled above the frame midpoint.
    pub fn closing_due(&self, body_offset: f64, viewport_height: f64) -> bool {
        match self.lines.last() {
            Some(last) => body_offset + last.top < viewport_height / 2.0,
            None => true,
        }
    }
}

/// Wrapped title lines, centered as a block on the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleBlock {
    lines: Vec<String>,
    line_height: f64,
}

impl TitleBlock {
    /// Wrap `title` to `surface_width - TITLE_SIDE_MARGIN_PX`.
    pub fn build(
        title: &str,
        surface_width_px: f64,
        metrics: &TextMetrics,
        measure: &mut dyn TextMeasure,
    ) -> Self {
        let max_width = (surface_width_px - TITLE_SIDE_MARGIN_PX).max(1.0);
        let lines = wrap_words(title, max_width, |s| {
            measure.advance_width(s, TextRole::Title, metrics.title_px)
        });
        Self {
            lines,
            line_height: metrics.title_line_height_px(),
        }
    }

    /// Title lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Advance between title lines.
    pub fn line_height(&self) -> f64 {
        self.line_height
    }

    /// Vertical center of line `i` when the block is centered in `viewport_height`.
    pub fn line_center_y(&self, i: usize, viewport_height: f64) -> f64 {
        let block = self.lines.len() as f64 * self.line_height;
        viewport_height / 2.0 - block / 2.0 + (i as f64 + 0.5) * self.line_height
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/content.rs"]
mod tests;
