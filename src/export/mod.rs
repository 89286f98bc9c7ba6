//! Offline export: the frame sweep, its job state and the finished artifact.

pub mod artifact;
pub mod job;
pub mod pipeline;
