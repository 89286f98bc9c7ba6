use crate::encode::sink::Container;
use crate::foundation::error::{StoryError, StoryResult};

/// Lifecycle of one export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportState {
    /// No export has started.
    Idle,
    /// Frames are being rendered and captured.
    Recording,
    /// The sweep is done; the capture stream is being stopped.
    Finalizing,
    /// The artifact was produced.
    Complete,
    /// The export failed or was aborted. Nothing was produced.
    Failed,
}

impl ExportState {
    /// Whether a new export may not start.
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Recording | Self::Finalizing)
    }
}

/// Sweep progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportProgress {
    /// Frames pushed to the capture stream.
    pub frames_done: u64,
    /// Frames the sweep renders in total.
    pub frames_total: u64,
}

impl ExportProgress {
    /// Completed fraction in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.frames_total == 0 {
            return 0.0;
        }
        (self.frames_done as f64 / self.frames_total as f64).min(1.0)
    }
}

/// Mutable state of one export: accumulated chunks and progress.
#[derive(Debug)]
pub struct ExportJob {
    state: ExportState,
    chunks: Vec<Vec<u8>>,
    frames_done: u64,
    frames_total: u64,
    file_name: String,
    container: Container,
    error: Option<String>,
}

impl ExportJob {
    /// New job in [`ExportState::Recording`].
    pub fn new(frames_total: u64, file_name: String, container: Container) -> Self {
        Self {
            state: ExportState::Recording,
            chunks: Vec::new(),
            frames_done: 0,
            frames_total,
            file_name,
            container,
            error: None,
        }
    }

    pub fn state(&self) -> ExportState {
        self.state
    }

    pub fn progress(&self) -> ExportProgress {
        ExportProgress {
            frames_done: self.frames_done,
            frames_total: self.frames_total,
        }
    }

    /// File name the artifact is delivered under.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn container(&self) -> Container {
        self.container
    }

    /// Message of the failure, for failed jobs.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Chunks held so far.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total bytes held so far.
    pub fn chunk_bytes(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }

    pub(crate) fn record_frame(&mut self) {
        self.frames_done += 1;
    }

    pub(crate) fn push_chunks(&mut self, chunks: Vec<Vec<u8>>) {
        self.chunks.extend(chunks.into_iter().filter(|c| !c.is_empty()));
    }

    pub(crate) fn begin_finalize(&mut self) -> StoryResult<()> {
        if self.state != ExportState::Recording {
            return Err(StoryError::validation(format!(
                "cannot finalize an export in state {:?}",
                self.state
            )));
        }
        self.state = ExportState::Finalizing;
        Ok(())
    }

    /// Concatenate the chunks into the final file bytes and release them.
    pub(crate) fn complete(&mut self) -> StoryResult<Vec<u8>> {
        if self.state != ExportState::Finalizing {
            return Err(StoryError::validation(format!(
                "cannot complete an export in state {:?}",
                self.state
            )));
        }
        self.state = ExportState::Complete;
        Ok(std::mem::take(&mut self.chunks).concat())
    }

    /// Mark failed and release accumulated chunks.
    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.state = ExportState::Failed;
        self.chunks = Vec::new();
        self.error = Some(message.into());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/job.rs"]
mod tests;
