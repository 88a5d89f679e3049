/// Integration tests for game logic
///
/// These tests drive whole frames through the public API and verify the
/// interactions between physics, enemy AI, projectiles, and the session
/// outcome.
use mushmush::{Facing, FrameInput, Outcome, Projectile, World};

/// A world after one settling frame, with both characters resting on the
/// ground.
fn settled_world() -> World {
    let mut world = World::new();
    world.frame(&FrameInput::default());
    assert!(world.player.on_platform);
    assert!(world.enemy.on_platform);
    world
}

/// An enemy shot placed somewhere specific, heading somewhere specific.
fn enemy_shot_at(x: f32, y: f32, facing: Facing) -> Projectile {
    Projectile {
        x,
        y,
        width: 15.0,
        height: 8.0,
        speed: 5.0,
        facing,
    }
}

#[test]
fn test_distant_enemy_chases_player() {
    let mut world = settled_world();
    world.player.x = 100.0;
    world.enemy.x = 900.0;

    let mut previous = world.enemy.x;
    for _ in 0..30 {
        world.frame(&FrameInput::default());
        assert!(world.enemy.x < previous, "enemy stopped closing the gap");
        previous = world.enemy.x;
    }
    assert_eq!(world.enemy.facing, Facing::Left);
    assert!(world.enemy_shots.is_empty());
}

#[test]
fn test_enemy_at_threshold_stands_still() {
    let mut world = settled_world();
    world.player.x = 100.0;
    world.enemy.x = 300.0;
    world.enemy_cooldown = 60;

    let x_before = world.enemy.x;
    world.frame(&FrameInput::default());

    // Distance of exactly 200 counts as engaged: no movement, cooldown
    // ticking.
    assert_eq!(world.enemy.x, x_before);
    assert_eq!(world.enemy_cooldown, 59);
}

#[test]
fn test_engaged_enemy_fires_toward_player() {
    let mut world = settled_world();
    world.player.x = 100.0;
    world.enemy.x = 280.0;
    world.enemy_cooldown = 0;

    world.frame(&FrameInput::default());

    assert_eq!(world.enemy_shots.len(), 1);
    let shot = &world.enemy_shots[0];
    assert_eq!(shot.facing, Facing::Left);
    assert_eq!(shot.speed, 5.0);
    assert_eq!(shot.width, 15.0);
    assert_eq!(shot.height, 8.0);
    // Spawned at the left (leading) edge, already advanced one frame.
    assert_eq!(shot.x, 280.0 - 15.0 - 5.0);
    assert!((120..=180).contains(&world.enemy_cooldown));
}

#[test]
fn test_point_blank_engage_shot_connects_immediately() {
    let mut world = settled_world();
    world.player.x = 100.0;
    world.enemy.x = 150.0;
    world.enemy_cooldown = 0;

    world.frame(&FrameInput::default());

    // At distance 50 the muzzle sits inside the player's box: the shot
    // spawns at the leading edge and connects on the same frame.
    assert_eq!(world.player.health, 95);
    assert!(world.enemy_shots.is_empty());
    assert_eq!(world.enemy.facing, Facing::Left);
    assert!((120..=180).contains(&world.enemy_cooldown));
}

#[test]
fn test_two_hits_take_player_from_ten_to_loss() {
    let mut world = settled_world();
    world.player.health = 10;
    // Park the enemy far away so it does not interfere.
    world.enemy.x = 900.0;

    world
        .enemy_shots
        .push(enemy_shot_at(300.0, world.player.center_y(), Facing::Left));
    let outcome = world.frame(&FrameInput::default());
    // Still in flight, no contact yet.
    assert_eq!(outcome, None);

    let mut outcome = None;
    for _ in 0..40 {
        outcome = world.frame(&FrameInput::default());
        if outcome.is_some() || world.player.health < 10 {
            break;
        }
    }
    assert_eq!(world.player.health, 5);
    assert_eq!(outcome, None);
    assert!(world.enemy_shots.is_empty());

    world
        .enemy_shots
        .push(enemy_shot_at(world.player.x + 60.0, world.player.center_y(), Facing::Left));
    let outcome = world.frame(&FrameInput::default());
    assert_eq!(world.player.health, 0);
    assert_eq!(outcome, Some(Outcome::Loss));
}

#[test]
fn test_player_shot_volley_wins() {
    let mut world = settled_world();
    world.enemy.health = 20;
    world.enemy.x = 600.0;

    // Two presses, two shots; each deals 10.
    let fire = FrameInput {
        fire: true,
        ..FrameInput::default()
    };
    world.frame(&fire);
    world.frame(&fire);
    assert_eq!(world.player_shots.len(), 2);

    let mut outcome = None;
    for _ in 0..120 {
        outcome = world.frame(&FrameInput::default());
        if outcome.is_some() {
            break;
        }
    }
    assert_eq!(outcome, Some(Outcome::Win));
    assert!(world.enemy.health <= 0);
}

#[test]
fn test_offscreen_shot_is_gone_before_it_could_hit() {
    let mut world = settled_world();
    // The enemy hangs over the right arena edge; a shot spawned past the
    // boundary despawns instead of connecting.
    world.enemy.x = 960.0;
    world.player_shots.push(Projectile {
        x: 1001.0,
        y: world.enemy.center_y(),
        width: 20.0,
        height: 20.0,
        speed: 7.0,
        facing: Facing::Right,
    });

    world.frame(&FrameInput::default());

    assert!(world.player_shots.is_empty());
    assert_eq!(world.enemy.health, 100);
}

#[test]
fn test_finished_session_never_thaws() {
    let mut world = settled_world();
    world.player.health = 0;
    assert_eq!(world.frame(&FrameInput::default()), Some(Outcome::Loss));

    let player_x = world.player.x;
    let enemy_x = world.enemy.x;
    let busy_input = FrameInput {
        move_right: true,
        jump: true,
        fire: true,
        ..FrameInput::default()
    };
    for _ in 0..10 {
        assert_eq!(world.frame(&busy_input), None);
    }
    assert_eq!(world.player.x, player_x);
    assert_eq!(world.enemy.x, enemy_x);
    assert!(world.player_shots.is_empty());
    assert_eq!(world.outcome, Some(Outcome::Loss));
}

#[test]
fn test_jump_arc_lands_back_on_ground() {
    let mut world = settled_world();
    let rest_y = world.player.y;

    world.frame(&FrameInput {
        jump: true,
        ..FrameInput::default()
    });
    assert!(world.player.is_jumping);
    assert!(world.player.y < rest_y);

    let mut frames = 0;
    while !world.player.on_platform {
        world.frame(&FrameInput::default());
        frames += 1;
        assert!(frames < 120, "jump never came down");
    }
    assert_eq!(world.player.y, rest_y);
    assert_eq!(world.player.velocity_y, 0.0);
    assert!(!world.player.is_jumping);
}

#[test]
fn test_falling_onto_the_ledge_rests_there() {
    let mut world = settled_world();
    // Drop the player from above the middle ledge.
    world.player.x = 430.0;
    world.player.y = 100.0;
    world.player.velocity_y = 0.0;
    world.player.on_platform = false;

    let mut frames = 0;
    while !world.player.on_platform {
        world.frame(&FrameInput::default());
        frames += 1;
        assert!(frames < 120, "never landed on the ledge");
    }
    // Ledge top is at 350; the player's feet snap onto it.
    assert_eq!(world.player.y, 350.0 - world.player.height);
    assert_eq!(world.player.velocity_y, 0.0);
}

#[test]
fn test_walk_left_and_right_update_position_and_facing() {
    let mut world = settled_world();
    let start_x = world.player.x;

    for _ in 0..5 {
        world.frame(&FrameInput {
            move_right: true,
            ..FrameInput::default()
        });
    }
    assert_eq!(world.player.facing, Facing::Right);
    assert!((world.player.x - (start_x + 25.0)).abs() < 1e-3);

    for _ in 0..5 {
        world.frame(&FrameInput {
            move_left: true,
            ..FrameInput::default()
        });
    }
    assert_eq!(world.player.facing, Facing::Left);
    assert!((world.player.x - start_x).abs() < 1e-3);
}
