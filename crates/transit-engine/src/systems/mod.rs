pub mod ambient;
pub mod light_curve;
pub mod render;
