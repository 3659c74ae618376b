// src/services/mod.rs
pub mod animation;
pub mod renderer;
pub mod scene_script;

pub use animation::AnimationService;
pub use renderer::{ManimCli, SceneRenderer};
