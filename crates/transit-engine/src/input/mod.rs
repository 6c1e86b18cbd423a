pub mod queue;
pub mod scroll;
pub mod tilt;
