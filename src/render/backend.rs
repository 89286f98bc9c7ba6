use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::StoryResult;
use crate::layout::measure::{TextMeasure, TextRole};

/// One rendered frame as RGBA8 bytes, row-major, `width * height * 4` long.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes.
    pub data: Vec<u8>,
    /// Whether color channels are premultiplied by alpha.
    pub premultiplied: bool,
}

/// Paint operation, in frame pixel space.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Reset every pixel to transparent.
    Clear,
    /// Fill the whole surface with a straight RGBA8 color.
    FillBackground {
        /// Fill color.
        rgba: [u8; 4],
    },
    /// One line of text centered on `center`.
    Text {
        /// Line content.
        text: String,
        /// Face selector.
        role: TextRole,
        /// Font size in px.
        size_px: f64,
        /// Center of the line box.
        center: Point,
        /// Opacity in `[0, 1]`.
        opacity: f32,
        /// Uniform scale about `center`.
        scale: f64,
    },
}

/// Ordered paint operations for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    /// Operations in paint order.
    pub ops: Vec<DrawOp>,
}

impl DisplayList {
    /// Text operations only, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { .. }))
    }

    /// Whether any text op carries exactly `text`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.ops
            .iter()
            .any(|op| matches!(op, DrawOp::Text { text, .. } if text == needle))
    }
}

/// Off-screen raster surface the export renders into.
///
/// Surfaces measure text with the same faces they paint with, so line wrapping for export comes
/// from the surface itself.
pub trait RasterSurface: TextMeasure {
    /// Surface dimensions.
    fn canvas(&self) -> Canvas;

    /// Replace the surface contents by painting `list`.
    fn paint(&mut self, list: &DisplayList) -> StoryResult<()>;

    /// Snapshot the current contents.
    fn read_frame(&mut self) -> StoryResult<FrameRGBA>;
}

impl<S: RasterSurface + ?Sized> RasterSurface for Box<S> {
    fn canvas(&self) -> Canvas {
        (**self).canvas()
    }

    fn paint(&mut self, list: &DisplayList) -> StoryResult<()> {
        (**self).paint(list)
    }

    fn read_frame(&mut self) -> StoryResult<FrameRGBA> {
        (**self).read_frame()
    }
}
