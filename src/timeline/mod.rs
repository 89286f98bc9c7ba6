/// Easing curves.
pub mod ease;
/// Phase boundaries and total duration.
pub mod model;
/// Elapsed time to visual state, shared by live playback and export.
pub mod visual;
