use rand::Rng;
use std::ops::RangeInclusive;

use crate::entities::{Character, Facing, Platform, Projectile};

/// Play space in world units. Y grows downward.
pub const ARENA_WIDTH: f32 = 1000.0;
pub const ARENA_HEIGHT: f32 = 600.0;

/// Downward acceleration applied each frame to airborne characters.
pub const GRAVITY: f32 = 0.6;
/// Vertical velocity applied when a grounded character jumps.
pub const JUMP_IMPULSE: f32 = -16.0;
/// Horizontal distance at or below which the enemy stands and shoots.
pub const ENGAGE_RANGE: f32 = 200.0;
/// Frames between enemy shots, re-rolled after every shot.
pub const ENEMY_COOLDOWN_FRAMES: RangeInclusive<u32> = 120..=180;

pub const PLAYER_SHOT_DAMAGE: i32 = 10;
pub const ENEMY_SHOT_DAMAGE: i32 = 5;

/// Input snapshot the world reads once at the top of a frame.
///
/// `move_left`/`move_right` reflect held keys. `jump` and `fire` are
/// edge-triggered: the input adapter reports each at most once per
/// physical key press.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub fire: bool,
}

/// How the session ended, from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

/// The enemy's two behaviors, selected purely by horizontal distance to
/// the player and re-evaluated every frame with no hysteresis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiState {
    Chase,
    Engage,
}

/// One complete play session: both characters, everything in flight, the
/// platform layout, and the terminal outcome once a health bar empties.
///
/// Constructed fresh per session and mutated only by [`World::frame`].
/// Once `outcome` is set the session is frozen; further frames are no-ops.
#[derive(Debug)]
pub struct World {
    pub player: Character,
    pub enemy: Character,
    pub player_shots: Vec<Projectile>,
    pub enemy_shots: Vec<Projectile>,
    pub platforms: Vec<Platform>,
    /// Frames until the enemy may shoot again. Only ticks while engaged.
    pub enemy_cooldown: u32,
    pub outcome: Option<Outcome>,
}

impl World {
    pub fn new() -> Self {
        Self {
            player: Character::new(
                "Mushmush",
                100.0,
                ARENA_HEIGHT - 160.0,
                140.0,
                110.0,
                5.0,
                Facing::Right,
            ),
            enemy: Character::new(
                "Groooooom",
                ARENA_WIDTH - 150.0,
                ARENA_HEIGHT - 125.0,
                100.0,
                75.0,
                1.0,
                Facing::Left,
            ),
            player_shots: Vec::new(),
            enemy_shots: Vec::new(),
            platforms: vec![
                // Ground
                Platform::new(0.0, ARENA_HEIGHT - 50.0, ARENA_WIDTH, 50.0),
                // Middle ledge
                Platform::new(
                    ARENA_WIDTH / 2.0 - 150.0,
                    ARENA_HEIGHT - 250.0,
                    300.0,
                    40.0,
                ),
            ],
            enemy_cooldown: 120,
            outcome: None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Advance the session by one frame.
    ///
    /// Runs in fixed order: player input, player physics, enemy physics,
    /// enemy AI, player shots vs enemy, enemy shots vs player, end check.
    /// Returns the outcome exactly once, on the frame the session ends;
    /// `None` on every other call, including every call after the end.
    pub fn frame(&mut self, input: &FrameInput) -> Option<Outcome> {
        if self.is_over() {
            return None;
        }

        self.apply_player_input(input);
        Self::apply_gravity_and_platforms(&mut self.player, &self.platforms);
        Self::apply_gravity_and_platforms(&mut self.enemy, &self.platforms);
        self.enemy_ai();
        Self::advance_projectiles(&mut self.player_shots, &mut self.enemy, PLAYER_SHOT_DAMAGE);
        Self::advance_projectiles(&mut self.enemy_shots, &mut self.player, ENEMY_SHOT_DAMAGE);
        self.check_end_condition()
    }

    fn apply_player_input(&mut self, input: &FrameInput) {
        if input.move_left {
            self.player.x -= self.player.speed;
            self.player.facing = Facing::Left;
        }
        if input.move_right {
            self.player.x += self.player.speed;
            self.player.facing = Facing::Right;
        }
        if input.jump && !self.player.is_jumping {
            self.player.velocity_y = JUMP_IMPULSE;
            self.player.is_jumping = true;
            self.player.on_platform = false;
        }
        if input.fire {
            self.player_shots.push(Projectile::player_shot(&self.player));
        }
    }

    /// Integrate gravity and resolve platform contact for one character.
    ///
    /// The resting test sweeps the window the character fell through this
    /// frame, so a normal fall cannot step over a surface it crossed.
    /// When several platforms match, the last one in list order wins.
    fn apply_gravity_and_platforms(character: &mut Character, platforms: &[Platform]) {
        if !character.on_platform {
            character.velocity_y += GRAVITY;
        }
        character.y += character.velocity_y;

        // Contact is re-derived from scratch; walking off a ledge ends it.
        character.on_platform = false;
        for platform in platforms {
            let bottom = character.bottom();
            if platform.spans(character.x, character.width)
                && bottom >= platform.top()
                && bottom < platform.top() + character.velocity_y + 1.0
            {
                character.velocity_y = 0.0;
                character.is_jumping = false;
                character.y = platform.top() - character.height;
                character.on_platform = true;
            }
        }
    }

    /// Which behavior a given horizontal distance selects. Exactly
    /// `ENGAGE_RANGE` counts as engaged.
    pub fn ai_state(distance: f32) -> AiState {
        if distance > ENGAGE_RANGE {
            AiState::Chase
        } else {
            AiState::Engage
        }
    }

    /// Distance-threshold state machine: close the gap until within range,
    /// then stand still and shoot on a randomized cooldown.
    fn enemy_ai(&mut self) {
        let distance = (self.player.x - self.enemy.x).abs();
        match Self::ai_state(distance) {
            AiState::Chase => {
                if self.enemy.x > self.player.x {
                    self.enemy.x -= self.enemy.speed;
                    self.enemy.facing = Facing::Left;
                } else {
                    self.enemy.x += self.enemy.speed;
                    self.enemy.facing = Facing::Right;
                }
            }
            AiState::Engage => {
                self.enemy.face_toward(self.player.x);
                if self.enemy_cooldown == 0 {
                    self.enemy_shots.push(Projectile::enemy_shot(&self.enemy));
                    self.enemy_cooldown = rand::rng().random_range(ENEMY_COOLDOWN_FRAMES);
                } else {
                    self.enemy_cooldown -= 1;
                }
            }
        }
    }

    /// Advance every shot, dropping the ones that left the arena and the
    /// ones that connected. A shot that leaves the arena despawns with no
    /// effect; a shot that overlaps the target damages it exactly once.
    /// `retain_mut` keeps removal index-safe: neighbors are never skipped
    /// or processed twice while the collection shrinks.
    fn advance_projectiles(shots: &mut Vec<Projectile>, target: &mut Character, damage: i32) {
        shots.retain_mut(|shot| {
            shot.advance();
            if shot.is_out_of_bounds(ARENA_WIDTH) {
                return false;
            }
            if shot.hits(target) {
                target.take_damage(damage);
                return false;
            }
            true
        });
    }

    /// First health bar to empty decides it; the result is terminal.
    fn check_end_condition(&mut self) -> Option<Outcome> {
        if !self.enemy.is_alive() {
            self.outcome = Some(Outcome::Win);
        } else if !self.player.is_alive() {
            self.outcome = Some(Outcome::Loss);
        }
        self.outcome
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
