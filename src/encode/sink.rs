use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{StoryError, StoryResult};
use crate::foundation::math::Fnv1a64;
use crate::render::backend::FrameRGBA;

/// Configuration given to a [`CaptureStream`] when recording starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Capture frame rate.
    pub fps: Fps,
}

/// Container of the encoded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    /// File extension without the dot.
    pub extension: &'static str,
    /// MIME type.
    pub mime: &'static str,
}

impl Container {
    /// Fragmented MP4 with H.264 video.
    pub const MP4: Container = Container {
        extension: "mp4",
        mime: "video/mp4",
    };
}

/// Live feed of encoded video data sourced from rendered frames.
///
/// Lifecycle: `begin`, any number of `push_frame` calls with strictly increasing indices
/// interleaved with `take_chunks`, then exactly one of `stop` or `abort`.
pub trait CaptureStream: Send {
    /// Output container produced by this stream.
    fn container(&self) -> Container;
    /// Start recording. Fails when the encoder cannot be created.
    fn begin(&mut self, cfg: CaptureConfig) -> StoryResult<()>;
    /// Feed one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StoryResult<()>;
    /// Encoded chunks that became available since the last call.
    fn take_chunks(&mut self) -> StoryResult<Vec<Vec<u8>>>;
    /// Finish encoding and return the remaining chunks.
    fn stop(&mut self) -> StoryResult<Vec<Vec<u8>>>;
    /// Tear down without finishing. Data produced so far is dropped.
    fn abort(&mut self);
}

/// Stream that keeps frame indices and emits one 16-byte chunk per frame
/// (little-endian index followed by a digest of the frame bytes).
#[derive(Debug, Default)]
pub struct InMemoryCapture {
    cfg: Option<CaptureConfig>,
    indices: Vec<FrameIndex>,
    pending: Vec<Vec<u8>>,
    stopped: bool,
    aborted: bool,
    fail_begin: bool,
}

impl InMemoryCapture {
    /// Create an idle stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stream whose `begin` always fails, as an unavailable encoder would.
    pub fn unavailable() -> Self {
        Self {
            fail_begin: true,
            ..Self::default()
        }
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<CaptureConfig> {
        self.cfg
    }

    /// Indices of every frame pushed, in push order.
    pub fn indices(&self) -> &[FrameIndex] {
        &self.indices
    }

    /// Whether `stop` completed.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Whether `abort` was called.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }
}

impl CaptureStream for InMemoryCapture {
    fn container(&self) -> Container {
        Container::MP4
    }

    fn begin(&mut self, cfg: CaptureConfig) -> StoryResult<()> {
        if self.fail_begin {
            return Err(StoryError::capture("in-memory capture marked unavailable"));
        }
        self.cfg = Some(cfg);
        self.indices.clear();
        self.pending.clear();
        self.stopped = false;
        self.aborted = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StoryResult<()> {
        if self.cfg.is_none() || self.stopped || self.aborted {
            return Err(StoryError::capture("capture stream is not recording"));
        }
        if let Some(last) = self.indices.last()
            && idx.0 <= last.0
        {
            return Err(StoryError::capture(
                "capture stream received out-of-order frame index",
            ));
        }
        let mut h = Fnv1a64::new_default();
        h.write_bytes(&frame.data);
        let mut chunk = idx.0.to_le_bytes().to_vec();
        chunk.extend_from_slice(&h.finish().to_le_bytes());
        self.pending.push(chunk);
        self.indices.push(idx);
        Ok(())
    }

    fn take_chunks(&mut self) -> StoryResult<Vec<Vec<u8>>> {
        Ok(std::mem::take(&mut self.pending))
    }

    fn stop(&mut self) -> StoryResult<Vec<Vec<u8>>> {
        if self.cfg.is_none() || self.aborted {
            return Err(StoryError::capture("capture stream is not recording"));
        }
        self.stopped = true;
        Ok(std::mem::take(&mut self.pending))
    }

    fn abort(&mut self) {
        self.aborted = true;
        self.pending.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
