//! Offline frame composition.
//!
//! A [`FrameComposer`] wraps the title and body once for a surface, then turns any frame index
//! into a [`DisplayList`] through [`visual_state_at`], the same mapping live playback uses.

use std::ops::Range;

use crate::config::profile::{RenderProfile, TextMetrics};
use crate::foundation::core::{Canvas, Fps, FrameIndex, Point};
use crate::foundation::error::{StoryError, StoryResult};
use crate::layout::content::{CLOSING_TEXT, ContentLayout, TitleBlock};
use crate::layout::measure::{TextMeasure, TextRole};
use crate::render::backend::{DisplayList, DrawOp, RasterSurface};
use crate::script::StoryScript;
use crate::timeline::model::{ContentExtent, Timeline, compute_timeline};
use crate::timeline::visual::{VisualState, visual_state_at};

/// Per-export layout plus the timeline derived from it.
#[derive(Clone, Debug)]
pub struct FrameComposer {
    canvas: Canvas,
    metrics: TextMetrics,
    title: TitleBlock,
    content: ContentLayout,
    timeline: Timeline,
    background_rgba: [u8; 4],
}

impl FrameComposer {
    /// Wrap `script` for `profile`'s canvas using `measure`.
    ///
    /// Fails with [`StoryError::NotReady`] when the title or content is missing.
    #[tracing::instrument(level = "debug", skip_all, fields(aspect = profile.aspect_ratio.label()))]
    pub fn new(
        script: &StoryScript,
        profile: &RenderProfile,
        measure: &mut dyn TextMeasure,
        background_rgba: [u8; 4],
    ) -> StoryResult<Self> {
        let title = script
            .title()
            .ok_or_else(|| StoryError::not_ready("story has no title yet"))?;
        if !script.has_content() {
            return Err(StoryError::not_ready("story has no content"));
        }

        let canvas = profile.canvas();
        let metrics = profile.text_metrics();
        let title = TitleBlock::build(title, canvas.width_f64(), &metrics, measure);
        let content = ContentLayout::build(script.lines(), canvas.width_f64(), metrics, measure);
        let timeline = compute_timeline(
            ContentExtent::Layout(&content),
            profile,
            canvas.height_f64(),
        )?;
        tracing::debug!(
            lines = content.lines().len(),
            height = content.height(),
            total = timeline.total_duration,
            "frame composer ready"
        );

        Ok(Self {
            canvas,
            metrics,
            title,
            content,
            timeline,
            background_rgba,
        })
    }

    /// Output dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Timeline shared with live playback.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Wrapped body.
    pub fn content(&self) -> &ContentLayout {
        &self.content
    }

    /// Wrapped title.
    pub fn title(&self) -> &TitleBlock {
        &self.title
    }

    /// Frames an export at `fps` renders.
    pub fn frame_count(&self, fps: Fps) -> u64 {
        self.timeline.frame_count(fps)
    }

    /// Visual state sampled at `frame`. Indices past the end yield the terminal state.
    pub fn state_at_frame(&self, frame: FrameIndex, fps: Fps) -> VisualState {
        visual_state_at(fps.frame_to_secs(frame), &self.timeline)
    }

    /// Body lines painted for `state`.
    pub fn visible_lines(&self, state: &VisualState) -> Range<usize> {
        if !state.body_scrolling() {
            return 0..0;
        }
        self.content
            .visible_lines(state.body_offset_y, self.canvas.height_f64())
    }

    /// Display list for `frame`.
    pub fn compose(&self, frame: FrameIndex, fps: Fps) -> DisplayList {
        self.compose_state(&self.state_at_frame(frame, fps))
    }

    /// Display list for an explicit visual state.
    ///
    /// Order: clear, background, title while it is visible, then body lines and the closing
    /// mark once the body scrolls.
    pub fn compose_state(&self, state: &VisualState) -> DisplayList {
        let w = self.canvas.width_f64();
        let h = self.canvas.height_f64();
        let mut list = DisplayList::default();
        list.ops.push(DrawOp::Clear);
        list.ops.push(DrawOp::FillBackground {
            rgba: self.background_rgba,
        });

        if state.title_visible() {
            for (i, line) in self.title.lines().iter().enumerate() {
                let y = self.title.line_center_y(i, h) + state.title_offset_y;
                list.ops.push(DrawOp::Text {
                    text: line.clone(),
                    role: TextRole::Title,
                    size_px: self.metrics.title_px,
                    center: Point::new(w / 2.0, y),
                    opacity: state.title_opacity as f32,
                    scale: state.title_scale,
                });
            }
        }

        if state.body_scrolling() {
            let offset = state.body_offset_y;
            let half_line = self.metrics.line_height_px / 2.0;
            for line in &self.content.lines()[self.visible_lines(state)] {
                list.ops.push(DrawOp::Text {
                    text: line.text.clone(),
                    role: TextRole::Body,
                    size_px: self.metrics.body_px,
                    center: Point::new(w / 2.0, offset + line.top + half_line),
                    opacity: 1.0,
                    scale: 1.0,
                });
            }

            if self.content.closing_due(offset, h) {
                let y = offset + self.content.closing_top() + self.metrics.closing_px / 2.0;
                if y + self.metrics.closing_px >= 0.0 && y - self.metrics.closing_px < h {
                    list.ops.push(DrawOp::Text {
                        text: CLOSING_TEXT.to_owned(),
                        role: TextRole::Closing,
                        size_px: self.metrics.closing_px,
                        center: Point::new(w / 2.0, y),
                        opacity: 1.0,
                        scale: 1.0,
                    });
                }
            }
        }

        list
    }
}

/// Paint `frame` onto `surface`.
pub fn render_frame(
    surface: &mut dyn RasterSurface,
    composer: &FrameComposer,
    frame: FrameIndex,
    fps: Fps,
) -> StoryResult<()> {
    let list = composer.compose(frame, fps);
    surface.paint(&list)
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
