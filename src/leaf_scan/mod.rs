pub mod core;
pub mod main;
pub mod paint;
pub mod preview_cache;
pub mod render;
pub mod run_effect;
