/// Export and document options.
pub mod opts;
/// Immutable speed, aspect ratio and text-size tables.
pub mod profile;
