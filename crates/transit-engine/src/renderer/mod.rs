pub mod traits;

pub use traits::SceneBackend;
