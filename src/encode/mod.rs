//! Capture streams: consumers of rendered frames that emit encoded chunks.

/// `ffmpeg`-based fragmented MP4 capture.
pub mod ffmpeg;
/// Capture stream trait and the in-memory stream.
pub mod sink;
