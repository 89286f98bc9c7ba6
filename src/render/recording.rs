use crate::foundation::core::Canvas;
use crate::foundation::error::{StoryError, StoryResult};
use crate::foundation::math::Fnv1a64;
use crate::layout::measure::{FixedAdvanceMeasure, TextMeasure, TextRole};
use crate::render::backend::{DisplayList, DrawOp, FrameRGBA, RasterSurface};

/// Font-free surface that records display lists instead of rasterizing them.
///
/// Frames read back from it are 2x1 pixels holding a digest of the last painted list, so two
/// frames compare equal exactly when they were painted from equal lists.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    measure: FixedAdvanceMeasure,
    paints: usize,
    last: Option<DisplayList>,
    history: Option<Vec<DisplayList>>,
    fail_at_paint: Option<usize>,
}

impl RecordingSurface {
    /// Surface of the given size measuring with [`FixedAdvanceMeasure::default`].
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            measure: FixedAdvanceMeasure::default(),
            paints: 0,
            last: None,
            history: None,
            fail_at_paint: None,
        }
    }

    /// Keep every painted list, not only the last one.
    pub fn with_history(mut self) -> Self {
        self.history = Some(Vec::new());
        self
    }

    /// Make the `n`-th paint call (0-based) fail with a render error.
    pub fn failing_at(mut self, n: usize) -> Self {
        self.fail_at_paint = Some(n);
        self
    }

    /// Number of successful paints.
    pub fn paints(&self) -> usize {
        self.paints
    }

    /// Most recently painted list.
    pub fn last(&self) -> Option<&DisplayList> {
        self.last.as_ref()
    }

    /// All painted lists, when history is enabled.
    pub fn history(&self) -> &[DisplayList] {
        self.history.as_deref().unwrap_or(&[])
    }
}

impl TextMeasure for RecordingSurface {
    fn advance_width(&mut self, text: &str, role: TextRole, size_px: f64) -> f64 {
        self.measure.advance_width(text, role, size_px)
    }
}

impl RasterSurface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn paint(&mut self, list: &DisplayList) -> StoryResult<()> {
        if self.fail_at_paint == Some(self.paints) {
            return Err(StoryError::render(format!(
                "injected paint failure at call {}",
                self.paints
            )));
        }
        self.paints += 1;
        if let Some(history) = self.history.as_mut() {
            history.push(list.clone());
        }
        self.last = Some(list.clone());
        Ok(())
    }

    fn read_frame(&mut self) -> StoryResult<FrameRGBA> {
        let list = self
            .last
            .as_ref()
            .ok_or_else(|| StoryError::render("read_frame called before paint"))?;
        Ok(FrameRGBA {
            width: 2,
            height: 1,
            data: display_list_digest(list).to_le_bytes().to_vec(),
            premultiplied: false,
        })
    }
}

/// Stable hash of a display list.
pub fn display_list_digest(list: &DisplayList) -> u64 {
    let mut h = Fnv1a64::new_default();
    for op in &list.ops {
        match op {
            DrawOp::Clear => h.write_u64(0),
            DrawOp::FillBackground { rgba } => {
                h.write_u64(1);
                h.write_bytes(rgba);
            }
            DrawOp::Text {
                text,
                role,
                size_px,
                center,
                opacity,
                scale,
            } => {
                h.write_u64(2);
                h.write_bytes(text.as_bytes());
                h.write_u64(*role as u64);
                h.write_u64(size_px.to_bits());
                h.write_u64(center.x.to_bits());
                h.write_u64(center.y.to_bits());
                h.write_u64(u64::from(opacity.to_bits()));
                h.write_u64(scale.to_bits());
            }
        }
    }
    h.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
