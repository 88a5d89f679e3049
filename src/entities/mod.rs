mod character;
mod platform;
mod projectile;

// Re-export all public types
pub use character::{Character, Facing};
pub use platform::Platform;
pub use projectile::Projectile;
