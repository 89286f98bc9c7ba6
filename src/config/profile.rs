//! Lookup tables for the three user-facing selectors.
//!
//! Each selector is an enum whose associated values are fixed design constants. Changing any of
//! them on a [`RenderProfile`] produces a new profile; cached timelines keyed on the old one are
//! simply recomputed.

use crate::foundation::core::Canvas;

/// Scroll speed selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    /// 30 px/s.
    Slow,
    /// 50 px/s.
    #[default]
    Medium,
    /// 80 px/s.
    Fast,
}

impl Speed {
    /// All selectable values, slowest first.
    pub const ALL: [Speed; 3] = [Speed::Slow, Speed::Medium, Speed::Fast];

    /// Scroll rate in distance units (pixels) per second.
    pub fn scroll_rate(self) -> f64 {
        match self {
            Self::Slow => 30.0,
            Self::Medium => 50.0,
            Self::Fast => 80.0,
        }
    }
}

/// Output aspect ratio selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AspectRatio {
    /// Landscape, 1920x1080.
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    /// Portrait, 720x1280.
    #[serde(rename = "9:16")]
    Portrait,
    /// Square, 1080x1080.
    #[serde(rename = "1:1")]
    Square,
}

impl AspectRatio {
    /// All selectable values.
    pub const ALL: [AspectRatio; 3] = [
        AspectRatio::Landscape,
        AspectRatio::Portrait,
        AspectRatio::Square,
    ];

    /// Output pixel dimensions of the export surface.
    pub fn canvas(self) -> Canvas {
        let (width, height) = match self {
            Self::Landscape => (1920, 1080),
            Self::Portrait => (720, 1280),
            Self::Square => (1080, 1080),
        };
        Canvas { width, height }
    }

    /// Display label, e.g. `16:9`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
            Self::Square => "1:1",
        }
    }

    /// Filename-safe tag, e.g. `16x9`.
    pub fn file_tag(self) -> &'static str {
        match self {
            Self::Landscape => "16x9",
            Self::Portrait => "9x16",
            Self::Square => "1x1",
        }
    }

    /// Parse a display label such as `9:16`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.label() == label.trim())
    }
}

/// Font size set selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    /// Compact type.
    Small,
    /// Default type.
    #[default]
    Medium,
    /// Large type.
    Large,
}

/// Font sizes and vertical rhythm for one [`TextSize`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// Title font size in px.
    pub title_px: f64,
    /// Body font size in px.
    pub body_px: f64,
    /// Closing mark font size in px.
    pub closing_px: f64,
    /// Advance between wrapped lines of one paragraph.
    pub line_height_px: f64,
    /// Advance after the last wrapped line of a paragraph.
    pub paragraph_spacing_px: f64,
}

/// Extra leading added to the title font size to get the title line advance.
pub const TITLE_LINE_GAP_PX: f64 = 20.0;

impl TextMetrics {
    /// Advance between wrapped title lines.
    pub fn title_line_height_px(&self) -> f64 {
        self.title_px + TITLE_LINE_GAP_PX
    }
}

impl TextSize {
    /// All selectable values.
    pub const ALL: [TextSize; 3] = [TextSize::Small, TextSize::Medium, TextSize::Large];

    /// Font sizes and spacing for this setting.
    pub fn metrics(self) -> TextMetrics {
        match self {
            Self::Small => TextMetrics {
                title_px: 48.0,
                body_px: 24.0,
                closing_px: 36.0,
                line_height_px: 32.0,
                paragraph_spacing_px: 50.0,
            },
            Self::Medium => TextMetrics {
                title_px: 64.0,
                body_px: 32.0,
                closing_px: 48.0,
                line_height_px: 42.0,
                paragraph_spacing_px: 60.0,
            },
            Self::Large => TextMetrics {
                title_px: 80.0,
                body_px: 40.0,
                closing_px: 60.0,
                line_height_px: 52.0,
                paragraph_spacing_px: 70.0,
            },
        }
    }
}

/// Render configuration for one playback or export pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderProfile {
    /// Scroll speed.
    pub speed: Speed,
    /// Export aspect ratio.
    pub aspect_ratio: AspectRatio,
    /// Text size set.
    pub text_size: TextSize,
}

impl RenderProfile {
    /// Return a copy with a different speed.
    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    /// Return a copy with a different aspect ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Return a copy with a different text size.
    pub fn with_text_size(mut self, text_size: TextSize) -> Self {
        self.text_size = text_size;
        self
    }

    /// Scroll rate for the configured speed.
    pub fn scroll_rate(&self) -> f64 {
        self.speed.scroll_rate()
    }

    /// Export canvas for the configured aspect ratio.
    pub fn canvas(&self) -> Canvas {
        self.aspect_ratio.canvas()
    }

    /// Font sizes for the configured text size.
    pub fn text_metrics(&self) -> TextMetrics {
        self.text_size.metrics()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/profile.rs"]
mod tests;
