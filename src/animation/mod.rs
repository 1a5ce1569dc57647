// src/animation/mod.rs
pub mod controller;
pub mod history;
pub mod resources;
pub mod state;
pub mod systems;

pub use controller::{AnimationController, Lifecycle};
pub use history::{StepHistory, StepSnapshot};
pub use state::AnimationState;
