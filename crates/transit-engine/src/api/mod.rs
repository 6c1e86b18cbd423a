pub mod types;
pub mod show;
pub mod script;
