//! Storyreel plays a story as a scrolling title-and-credits video and exports the same
//! animation, frame by frame, to an MP4 file.
//!
//! - Build a [`StoryScript`] and choose a [`RenderProfile`]
//! - Preview it in real time with a [`StorySession`] (or a bare [`LiveDriver`])
//! - Export it with an [`ExportPipeline`] over a [`RasterSurface`] and a [`CaptureStream`]
//!
//! Preview and export share one timeline and one visual mapping ([`visual_state_at`]), so the
//! exported frames match what was previewed.
#![forbid(unsafe_code)]

mod foundation;

/// Speed, aspect ratio and text size tables; export options.
pub mod config;
/// Capture streams (in-memory, ffmpeg).
pub mod encode;
/// The export sweep.
pub mod export;
/// Text generation collaborator.
pub mod generate;
/// Line wrapping and content placement.
pub mod layout;
/// Real-time playback.
pub mod playback;
/// Offline frame rendering.
pub mod render;
pub mod script;
/// Control-surface facade.
pub mod session;
/// Phase math and the visual mapping.
pub mod timeline;

pub use crate::foundation::core::{Affine, Canvas, Fps, FrameIndex, FrameRange, Point, Vec2};
pub use crate::foundation::error::{GenerationError, StoryError, StoryResult};

pub use crate::config::opts::{ExportOpts, StoryDocument};
pub use crate::config::profile::{AspectRatio, RenderProfile, Speed, TextMetrics, TextSize};
pub use crate::encode::ffmpeg::{FfmpegCapture, FfmpegCaptureOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{CaptureConfig, CaptureStream, Container, InMemoryCapture};
pub use crate::export::artifact::{
    ArtifactSink, DirectoryDelivery, ExportArtifact, MemoryDelivery, export_file_name,
};
pub use crate::export::job::{ExportJob, ExportProgress, ExportState};
pub use crate::export::pipeline::{AbortHandle, ExportPipeline, SleepYielder, StepOutcome, Yielder};
pub use crate::generate::{GenerationRequest, TextGenerator, generate_title};
pub use crate::layout::measure::{FixedAdvanceMeasure, TextMeasure, TextRole};
pub use crate::layout::text_engine::{FontSet, TextLayoutEngine};
pub use crate::playback::clock::{Clock, ManualClock, SystemClock};
pub use crate::playback::driver::{LiveDriver, PlaybackState, Stage};
pub use crate::playback::scheduler::{ManualScheduler, SleepScheduler, TickId, TickScheduler};
pub use crate::render::backend::{DisplayList, DrawOp, FrameRGBA, RasterSurface};
pub use crate::render::cpu::{CpuSurface, find_system_font};
pub use crate::render::frame::{FrameComposer, render_frame};
pub use crate::render::recording::RecordingSurface;
pub use crate::script::StoryScript;
pub use crate::session::player::StorySession;
pub use crate::timeline::model::{Phase, Timeline, compute_timeline, format_clock};
pub use crate::timeline::visual::{VisualState, visual_state_at};
