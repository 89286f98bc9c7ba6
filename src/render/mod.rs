pub mod backend;
pub mod cpu;
pub mod frame;
pub mod recording;
