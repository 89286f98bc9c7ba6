/// Time sources.
pub mod clock;
/// Real-time playback state machine.
pub mod driver;
/// Frame-presentation scheduling port.
pub mod scheduler;
