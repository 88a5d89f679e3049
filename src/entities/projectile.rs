use super::character::{Character, Facing};

/// A shot in flight. Direction is fixed at creation and never changes.
///
/// There is no owner field: player and enemy shots live in separate
/// collections and are only ever tested against the opposing character,
/// so a shot cannot hit its own shooter by construction.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal movement per frame, applied along `facing`.
    pub speed: f32,
    pub facing: Facing,
}

impl Projectile {
    /// A shot fired by the player: 20x20 at speed 7.
    pub fn player_shot(shooter: &Character) -> Self {
        Self::from_muzzle(shooter, 20.0, 20.0, 7.0)
    }

    /// A shot fired by the enemy: 15x8 at speed 5.
    pub fn enemy_shot(shooter: &Character) -> Self {
        Self::from_muzzle(shooter, 15.0, 8.0, 5.0)
    }

    /// Spawn at the shooter's leading edge, vertically centered on it.
    fn from_muzzle(shooter: &Character, width: f32, height: f32, speed: f32) -> Self {
        let x = match shooter.facing {
            Facing::Right => shooter.right(),
            Facing::Left => shooter.x - width,
        };
        Self {
            x,
            y: shooter.center_y() - height / 2.0,
            width,
            height,
            speed,
            facing: shooter.facing,
        }
    }

    pub fn advance(&mut self) {
        self.x += self.speed * self.facing.sign();
    }

    /// True once the shot has left the horizontal play space.
    pub fn is_out_of_bounds(&self, max_x: f32) -> bool {
        self.x < 0.0 || self.x > max_x
    }

    /// Axis-aligned bounding-box overlap with a character.
    pub fn hits(&self, target: &Character) -> bool {
        self.x < target.x + target.width
            && self.x + self.width > target.x
            && self.y < target.y + target.height
            && self.y + self.height > target.y
    }
}
