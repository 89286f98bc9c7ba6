use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::error::{StoryError, StoryResult};
use crate::layout::measure::{TextMeasure, TextRole};

/// RGBA8 brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Font faces used by the engine, as raw TTF/OTF bytes.
#[derive(Clone, Debug)]
pub struct FontSet {
    /// Face used for body text.
    pub regular: Arc<Vec<u8>>,
    /// Face used for title and closing mark; falls back to `regular`.
    pub bold: Option<Arc<Vec<u8>>>,
}

impl FontSet {
    /// Load font files from disk.
    pub fn from_paths(
        regular: &std::path::Path,
        bold: Option<&std::path::Path>,
    ) -> StoryResult<Self> {
        let read = |p: &std::path::Path| {
            std::fs::read(p).map(Arc::new).map_err(|e| {
                StoryError::layout(format!("failed to read font '{}': {e}", p.display()))
            })
        };
        Ok(Self {
            regular: read(regular)?,
            bold: bold.map(read).transpose()?,
        })
    }

    /// Raw bytes of the face used for `role`.
    pub fn bytes_for(&self, role: TextRole) -> &Arc<Vec<u8>> {
        match (role, self.bold.as_ref()) {
            (TextRole::Title | TextRole::Closing, Some(bold)) => bold,
            _ => &self.regular,
        }
    }
}

/// Stateful helper building single-line Parley layouts from registered font bytes.
///
/// Layouts are cached by `(role, size, text)`: the export sweep paints the same lines on many
/// consecutive frames.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    regular_family: String,
    bold_family: Option<String>,
    brush: TextBrushRgba8,
    cache: HashMap<LayoutKey, Arc<parley::Layout<TextBrushRgba8>>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct LayoutKey {
    role: TextRole,
    size_bits: u32,
    text: String,
}

impl TextLayoutEngine {
    /// Register the font set and prepare fresh Parley contexts.
    pub fn new(fonts: &FontSet, brush: TextBrushRgba8) -> StoryResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let regular_family = register_family(&mut font_ctx, &fonts.regular)?;
        let bold_family = match fonts.bold.as_ref() {
            Some(bytes) => Some(register_family(&mut font_ctx, bytes)?),
            None => None,
        };
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            regular_family,
            bold_family,
            brush,
            cache: HashMap::new(),
        })
    }

    /// Family name resolved for `role`.
    pub fn family_for(&self, role: TextRole) -> &str {
        match (role, self.bold_family.as_deref()) {
            (TextRole::Title | TextRole::Closing, Some(bold)) => bold,
            _ => &self.regular_family,
        }
    }

    /// Shape `text` on a single unbroken line, reusing the layout painted last time.
    pub fn layout_line(
        &mut self,
        text: &str,
        role: TextRole,
        size_px: f32,
    ) -> StoryResult<Arc<parley::Layout<TextBrushRgba8>>> {
        let key = LayoutKey {
            role,
            size_bits: size_px.to_bits(),
            text: text.to_owned(),
        };
        if let Some(layout) = self.cache.get(&key) {
            return Ok(layout.clone());
        }
        let layout = Arc::new(self.shape_line(text, role, size_px)?);
        self.cache.insert(key, layout.clone());
        Ok(layout)
    }

    /// Number of layouts kept for painting.
    pub fn cached_layouts(&self) -> usize {
        self.cache.len()
    }

    fn shape_line(
        &mut self,
        text: &str,
        role: TextRole,
        size_px: f32,
    ) -> StoryResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(StoryError::layout("text size_px must be finite and > 0"));
        }
        let family = self.family_for(role).to_owned();
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(self.brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(
            None,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }
}

impl TextMeasure for TextLayoutEngine {
    fn advance_width(&mut self, text: &str, role: TextRole, size_px: f64) -> f64 {
        // Wrap candidates are measured once and dropped; only painted lines are cached.
        match self.shape_line(text, role, size_px as f32) {
            Ok(layout) => f64::from(layout.width()),
            Err(e) => {
                tracing::warn!(error = %e, "text measurement failed; treating as zero width");
                0.0
            }
        }
    }
}

fn register_family(font_ctx: &mut parley::FontContext, bytes: &[u8]) -> StoryResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| StoryError::layout("no font families registered from font bytes"))?;
    let name = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| StoryError::layout("registered font family has no name"))?
        .to_string();
    Ok(name)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text_engine.rs"]
mod tests;
