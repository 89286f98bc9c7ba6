//! The export sweep.
//!
//! `start` checks readiness, lays the story out on the export surface and opens the capture
//! stream. Each `step` renders one batch of frames in index order and collects the encoded
//! chunks that became available; the step after the last frame stops the stream and
//! concatenates the chunks into an [`ExportArtifact`]. Between steps the caller may yield to its
//! host or abort through an [`AbortHandle`]. Any error moves the job to
//! [`ExportState::Failed`] and releases its chunks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::opts::ExportOpts;
use crate::config::profile::RenderProfile;
use crate::encode::sink::{CaptureConfig, CaptureStream};
use crate::export::artifact::{ExportArtifact, export_file_name};
use crate::export::job::{ExportJob, ExportProgress, ExportState};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{StoryError, StoryResult};
use crate::layout::measure::TextMeasure;
use crate::render::backend::RasterSurface;
use crate::render::frame::{FrameComposer, render_frame};
use crate::script::StoryScript;
use crate::timeline::model::Timeline;

/// Called between batches so the host stays responsive.
pub trait Yielder {
    /// Give control back to the host for a moment.
    fn yield_now(&mut self, progress: ExportProgress);
}

/// Sleeps for a fixed pause at every yield point.
#[derive(Clone, Copy, Debug)]
pub struct SleepYielder {
    pause: Duration,
}

impl SleepYielder {
    pub fn new(pause: Duration) -> Self {
        Self { pause }
    }
}

impl Yielder for SleepYielder {
    fn yield_now(&mut self, progress: ExportProgress) {
        tracing::trace!(done = progress.frames_done, total = progress.frames_total, "yield");
        if !self.pause.is_zero() {
            std::thread::sleep(self.pause);
        }
    }
}

/// Shared flag that stops an in-flight export at its next yield point.
///
/// Each `start` clears the flag, so a request made while no export is recording has no effect.
#[derive(Clone, Debug, Default)]
pub struct AbortHandle(Arc<AtomicBool>);

impl AbortHandle {
    /// Request the export to stop.
    pub fn abort(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether an abort was requested.
    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Result of one [`ExportPipeline::step`].
#[derive(Debug)]
pub enum StepOutcome {
    /// A batch was rendered; more frames remain.
    Continue(ExportProgress),
    /// The sweep finished and the artifact is ready.
    Finished(ExportArtifact),
}

/// Drives the frame renderer over every frame of the timeline into a capture stream.
pub struct ExportPipeline<S: RasterSurface, C: CaptureStream> {
    surface: S,
    capture: C,
    opts: ExportOpts,
    job: Option<ExportJob>,
    composer: Option<FrameComposer>,
    timeline: Option<Timeline>,
    next_frame: u64,
    abort: AbortHandle,
}

impl<S: RasterSurface, C: CaptureStream> ExportPipeline<S, C> {
    /// Pipeline rendering onto `surface` and encoding through `capture`.
    pub fn new(surface: S, capture: C, opts: ExportOpts) -> Self {
        Self {
            surface,
            capture,
            opts,
            job: None,
            composer: None,
            timeline: None,
            next_frame: 0,
            abort: AbortHandle::default(),
        }
    }

    /// Handle that aborts the export currently recording.
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ExportState {
        self.job.as_ref().map_or(ExportState::Idle, ExportJob::state)
    }

    /// Current job, if an export was ever started.
    pub fn job(&self) -> Option<&ExportJob> {
        self.job.as_ref()
    }

    /// Timeline of the most recently started export.
    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }

    /// Begin an export of `script` with `profile`, wrapping lines with the surface's own
    /// text measurement.
    ///
    /// Rejected without creating a job when the script is not ready
    /// ([`StoryError::NotReady`]) or another export is recording
    /// ([`StoryError::ExportInProgress`]).
    pub fn start(
        &mut self,
        script: &StoryScript,
        profile: &RenderProfile,
    ) -> StoryResult<ExportProgress> {
        self.begin(script, profile, None)
    }

    /// Like [`start`](Self::start), but wraps lines with `measure` so the export breaks lines
    /// exactly where a preview using the same measure does.
    pub fn start_with_measure(
        &mut self,
        script: &StoryScript,
        profile: &RenderProfile,
        measure: &mut dyn TextMeasure,
    ) -> StoryResult<ExportProgress> {
        self.begin(script, profile, Some(measure))
    }

    #[tracing::instrument(level = "info", skip_all, fields(aspect = profile.aspect_ratio.label()))]
    fn begin(
        &mut self,
        script: &StoryScript,
        profile: &RenderProfile,
        measure: Option<&mut dyn TextMeasure>,
    ) -> StoryResult<ExportProgress> {
        if self.state().is_busy() {
            return Err(StoryError::ExportInProgress);
        }
        let Some(title) = script.title() else {
            return Err(StoryError::not_ready("export needs a title"));
        };
        if !script.has_content() {
            return Err(StoryError::not_ready("export needs content"));
        }
        self.opts.validate()?;
        if self.surface.canvas() != profile.canvas() {
            return Err(StoryError::validation(format!(
                "export surface is {}x{}, profile needs {}x{}",
                self.surface.canvas().width,
                self.surface.canvas().height,
                profile.canvas().width,
                profile.canvas().height
            )));
        }

        self.abort.reset();
        self.next_frame = 0;
        self.timeline = None;
        let file_name = export_file_name(title, profile.aspect_ratio, self.capture.container());
        let bg = self.opts.background_rgba;
        let composed = match measure {
            Some(m) => FrameComposer::new(script, profile, m, bg),
            None => FrameComposer::new(script, profile, &mut self.surface, bg),
        };
        let composer = match composed {
            Ok(c) => c,
            Err(e) => {
                let mut job = ExportJob::new(0, file_name, self.capture.container());
                job.fail(e.to_string());
                self.job = Some(job);
                return Err(e);
            }
        };
        let frames_total = composer.frame_count(self.opts.fps);
        let canvas = composer.canvas();
        self.timeline = Some(*composer.timeline());
        self.job = Some(ExportJob::new(
            frames_total,
            file_name,
            self.capture.container(),
        ));
        self.composer = Some(composer);

        let cfg = CaptureConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.opts.fps,
        };
        if let Err(e) = self.capture.begin(cfg) {
            return Err(self.fail(e));
        }

        tracing::info!(frames_total, "export started");
        Ok(self.progress())
    }

    fn progress(&self) -> ExportProgress {
        self.job.as_ref().map_or(
            ExportProgress {
                frames_done: 0,
                frames_total: 0,
            },
            ExportJob::progress,
        )
    }

    /// Render the next batch. Checks the abort flag first.
    pub fn step(&mut self) -> StoryResult<StepOutcome> {
        if self.state() != ExportState::Recording {
            return Err(StoryError::validation("no export is recording"));
        }
        if self.abort.is_aborted() {
            tracing::warn!(frames_done = self.next_frame, "export aborted");
            return Err(self.fail(StoryError::Cancelled));
        }
        match self.render_batch() {
            Ok(true) => self.finish().map(StepOutcome::Finished),
            Ok(false) => Ok(StepOutcome::Continue(self.progress())),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Returns `true` once every frame was pushed.
    fn render_batch(&mut self) -> StoryResult<bool> {
        let composer = self
            .composer
            .as_ref()
            .ok_or_else(|| StoryError::validation("export has no layout"))?;
        let job = self
            .job
            .as_mut()
            .ok_or_else(|| StoryError::validation("export has no job"))?;
        let total = job.progress().frames_total;
        let batch_end = (self.next_frame + u64::from(self.opts.batch_frames)).min(total);

        while self.next_frame < batch_end {
            let idx = FrameIndex(self.next_frame);
            render_frame(&mut self.surface, composer, idx, self.opts.fps)?;
            let frame = self.surface.read_frame()?;
            self.capture.push_frame(idx, &frame)?;
            job.record_frame();
            self.next_frame += 1;
        }
        job.push_chunks(self.capture.take_chunks()?);
        Ok(self.next_frame >= total)
    }

    fn finish(&mut self) -> StoryResult<ExportArtifact> {
        match self.finalize_job() {
            Ok(artifact) => {
                self.composer = None;
                tracing::info!(
                    file = %artifact.file_name,
                    bytes = artifact.bytes.len(),
                    "export complete"
                );
                Ok(artifact)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn finalize_job(&mut self) -> StoryResult<ExportArtifact> {
        let job = self
            .job
            .as_mut()
            .ok_or_else(|| StoryError::validation("export has no job"))?;
        job.begin_finalize()?;
        job.push_chunks(self.capture.stop()?);
        let bytes = job.complete()?;
        if bytes.is_empty() {
            return Err(StoryError::capture("capture stream produced no data"));
        }
        Ok(ExportArtifact {
            file_name: job.file_name().to_owned(),
            mime: job.container().mime,
            bytes,
        })
    }

    fn fail(&mut self, err: StoryError) -> StoryError {
        self.capture.abort();
        if let Some(job) = self.job.as_mut() {
            job.fail(err.to_string());
        }
        self.composer = None;
        if !matches!(err, StoryError::Cancelled) {
            tracing::error!(error = %err, "export failed");
        }
        err
    }

    /// Run a whole export, yielding between batches.
    pub fn run(
        &mut self,
        script: &StoryScript,
        profile: &RenderProfile,
        yielder: &mut dyn Yielder,
    ) -> StoryResult<ExportArtifact> {
        self.start(script, profile)?;
        self.drive(yielder)
    }

    /// [`run`](Self::run) with lines wrapped by `measure`.
    pub fn run_with_measure(
        &mut self,
        script: &StoryScript,
        profile: &RenderProfile,
        measure: &mut dyn TextMeasure,
        yielder: &mut dyn Yielder,
    ) -> StoryResult<ExportArtifact> {
        self.start_with_measure(script, profile, measure)?;
        self.drive(yielder)
    }

    fn drive(&mut self, yielder: &mut dyn Yielder) -> StoryResult<ExportArtifact> {
        loop {
            match self.step()? {
                StepOutcome::Continue(progress) => yielder.yield_now(progress),
                StepOutcome::Finished(artifact) => return Ok(artifact),
            }
        }
    }

    /// Default yielder for these options: sleep `yield_pause_ms` between batches.
    pub fn default_yielder(&self) -> SleepYielder {
        SleepYielder::new(Duration::from_millis(self.opts.yield_pause_ms))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/pipeline.rs"]
mod tests;
