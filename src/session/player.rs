//! Player session: the state behind the user-facing controls.
//!
//! Holds the script and render selectors, keeps the preview layout and timeline cached until one
//! of their inputs changes, and routes play/pause/reset/close to the [`LiveDriver`].

use std::ops::Range;

use crate::config::profile::{AspectRatio, RenderProfile, Speed, TextSize};
use crate::encode::sink::CaptureStream;
use crate::export::artifact::ExportArtifact;
use crate::export::pipeline::{ExportPipeline, Yielder};
use crate::foundation::core::Canvas;
use crate::foundation::error::{StoryError, StoryResult};
use crate::layout::content::ContentLayout;
use crate::layout::measure::TextMeasure;
use crate::playback::clock::Clock;
use crate::playback::driver::{LiveDriver, PlaybackState, Stage};
use crate::playback::scheduler::{TickId, TickScheduler};
use crate::render::backend::RasterSurface;
use crate::script::StoryScript;
use crate::timeline::model::{ContentExtent, Timeline, compute_timeline};
use crate::timeline::visual::VisualState;

/// Preview layout and the timeline derived from it.
#[derive(Clone, Debug)]
struct PreviewCache {
    content: ContentLayout,
    timeline: Timeline,
}

pub struct StorySession<C: Clock, S: TickScheduler> {
    script: StoryScript,
    profile: RenderProfile,
    viewport: Option<Canvas>,
    measure: Box<dyn TextMeasure>,
    cache: Option<PreviewCache>,
    driver: LiveDriver<C, S>,
}

impl<C: Clock, S: TickScheduler> StorySession<C, S> {
    /// Session previewing `script` with `profile`, measuring text with `measure`.
    pub fn new(
        script: StoryScript,
        profile: RenderProfile,
        measure: Box<dyn TextMeasure>,
        clock: C,
        scheduler: S,
    ) -> StoryResult<Self> {
        let mut session = Self {
            script,
            profile,
            viewport: None,
            measure,
            cache: None,
            driver: LiveDriver::new(clock, scheduler),
        };
        session.rebuild()?;
        Ok(session)
    }

    pub fn script(&self) -> &StoryScript {
        &self.script
    }

    pub fn profile(&self) -> &RenderProfile {
        &self.profile
    }

    /// Size of the preview frame. Defaults to the export canvas of the profile.
    pub fn viewport(&self) -> Canvas {
        self.viewport.unwrap_or_else(|| self.profile.canvas())
    }

    /// Timeline for the current inputs, once the script is ready.
    pub fn timeline(&self) -> Option<&Timeline> {
        self.cache.as_ref().map(|c| &c.timeline)
    }

    /// Preview layout, once the script is ready.
    pub fn content(&self) -> Option<&ContentLayout> {
        self.cache.as_ref().map(|c| &c.content)
    }

    /// Whether play is enabled.
    pub fn can_play(&self) -> bool {
        self.driver.can_play()
    }

    /// Whether export is enabled.
    pub fn can_export(&self) -> bool {
        self.script.is_ready()
    }

    /// Replace the script, e.g. once a generated title arrives.
    pub fn set_script(&mut self, script: StoryScript) -> StoryResult<()> {
        self.script = script;
        self.rebuild()
    }

    pub fn set_speed(&mut self, speed: Speed) -> StoryResult<()> {
        self.set_profile(self.profile.with_speed(speed))
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio) -> StoryResult<()> {
        self.set_profile(self.profile.with_aspect_ratio(aspect_ratio))
    }

    pub fn set_text_size(&mut self, text_size: TextSize) -> StoryResult<()> {
        self.set_profile(self.profile.with_text_size(text_size))
    }

    /// Replace all selectors at once. A no-op when nothing changed.
    pub fn set_profile(&mut self, profile: RenderProfile) -> StoryResult<()> {
        if profile == self.profile {
            return Ok(());
        }
        self.profile = profile;
        self.rebuild()
    }

    /// Resize the preview frame.
    pub fn set_viewport(&mut self, viewport: Canvas) -> StoryResult<()> {
        if viewport.width == 0 || viewport.height == 0 {
            return Err(StoryError::validation("viewport width/height must be non-zero"));
        }
        if self.viewport == Some(viewport) {
            return Ok(());
        }
        self.viewport = Some(viewport);
        self.rebuild()
    }

    fn rebuild(&mut self) -> StoryResult<()> {
        if !self.script.is_ready() {
            self.cache = None;
            self.driver.set_timeline(None);
            return Ok(());
        }
        let viewport = self.viewport();
        let content = ContentLayout::build(
            self.script.lines(),
            viewport.width_f64(),
            self.profile.text_metrics(),
            self.measure.as_mut(),
        );
        let timeline = compute_timeline(
            ContentExtent::Layout(&content),
            &self.profile,
            viewport.height_f64(),
        )?;
        tracing::debug!(
            total = timeline.total_duration,
            speed = ?self.profile.speed,
            "preview timeline rebuilt"
        );
        self.driver.set_timeline(Some(timeline));
        self.cache = Some(PreviewCache { content, timeline });
        Ok(())
    }

    /// Start or resume. `false` when the script is not ready.
    pub fn play(&mut self) -> bool {
        self.driver.play()
    }

    pub fn pause(&mut self) {
        self.driver.pause();
    }

    /// Play/pause button.
    pub fn toggle(&mut self) -> bool {
        self.driver.toggle()
    }

    /// Reset button.
    pub fn reset(&mut self, stage: &mut dyn Stage) {
        self.driver.reset(stage);
    }

    /// Deliver a due tick from the host loop.
    pub fn tick(&mut self, id: TickId, stage: &mut dyn Stage) -> Option<VisualState> {
        self.driver.tick(id, stage)
    }

    /// Close button: stops playback and cancels the pending tick.
    pub fn close(&mut self) {
        self.driver.close();
    }

    pub fn pending_tick(&self) -> Option<TickId> {
        self.driver.pending_tick()
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.driver.scheduler_mut()
    }

    pub fn playback(&self) -> PlaybackState {
        self.driver.state()
    }

    pub fn visual_state(&self) -> Option<VisualState> {
        self.driver.visual_state()
    }

    pub fn progress(&self) -> f64 {
        self.driver.progress()
    }

    /// `m:ss / m:ss` label.
    pub fn clock_label(&self) -> String {
        self.driver.clock_label()
    }

    /// Body lines on screen at the current playback position.
    pub fn visible_lines(&self) -> Range<usize> {
        match (self.cache.as_ref(), self.driver.visual_state()) {
            (Some(cache), Some(state)) if state.body_scrolling() => cache
                .content
                .visible_lines(state.body_offset_y, self.viewport().height_f64()),
            _ => 0..0,
        }
    }

    /// Export with the current script and profile. Playback is paused first.
    ///
    /// Lines are wrapped with the session's own measure, so with the viewport at the profile
    /// canvas the export follows the previewed timeline frame for frame.
    pub fn export<R: RasterSurface, K: CaptureStream>(
        &mut self,
        pipeline: &mut ExportPipeline<R, K>,
        yielder: &mut dyn Yielder,
    ) -> StoryResult<ExportArtifact> {
        if !self.script.is_ready() {
            return Err(StoryError::not_ready("export needs a title and content"));
        }
        self.driver.pause();
        let artifact =
            pipeline.run_with_measure(&self.script, &self.profile, self.measure.as_mut(), yielder)?;
        if self.viewport() == self.profile.canvas() && pipeline.timeline() != self.timeline() {
            tracing::warn!(
                preview = ?self.timeline().map(|t| t.total_duration),
                export = ?pipeline.timeline().map(|t| t.total_duration),
                "export timeline differs from preview"
            );
        }
        Ok(artifact)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/player.rs"]
mod tests;
