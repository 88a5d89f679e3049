// Library exports for testing
pub use entities::{Character, Facing, Platform, Projectile};
pub use world::{AiState, FrameInput, Outcome, World};

pub mod app;
pub mod audio;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod world;
