/// Paragraph and title placement shared by preview and export.
pub mod content;
/// Injectable text width measurement.
pub mod measure;
/// Parley-backed shaping and measurement.
pub mod text_engine;
/// Greedy word wrapping.
pub mod wrap;
