use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::Duration;

use crate::audio::AudioManager;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::world::{FrameInput, World};

/// The main application: one play session plus the terminal-facing
/// collaborators, driven one frame per loop iteration.
pub struct App {
    /// Is the application running?
    running: bool,
    /// Current session; replaced wholesale on restart
    world: World,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new() -> Self {
        Self {
            running: true,
            world: World::new(),
            input_manager: InputManager::new(),
            renderer: GameRenderer::new(),
            audio_manager: AudioManager::default(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            let world = &self.world;
            let renderer = &mut self.renderer;
            terminal.draw(|frame| {
                let view = RenderView {
                    player: &world.player,
                    enemy: &world.enemy,
                    player_shots: &world.player_shots,
                    enemy_shots: &world.enemy_shots,
                    platforms: &world.platforms,
                    outcome: world.outcome,
                    area: frame.area(),
                };
                renderer.render(frame, &view);
            })?;

            self.input_manager.poll_events(self.world.is_over())?;
            let actions = self.input_manager.get_actions();
            let input = self.process_actions(&actions);

            self.world.frame(&input);

            // ~60 FPS pacing. Physics constants are tuned per frame, so
            // this sleep doubles as the game speed knob.
            std::thread::sleep(Duration::from_millis(16));
        }
        Ok(())
    }

    /// Fold this frame's actions into an input snapshot for the world and
    /// apply the app-level ones directly.
    fn process_actions(&mut self, actions: &[InputAction]) -> FrameInput {
        let mut input = FrameInput::default();
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::Restart => {
                    if self.world.is_over() {
                        self.world = World::new();
                    }
                }
                InputAction::MoveLeft => input.move_left = true,
                InputAction::MoveRight => input.move_right = true,
                InputAction::Jump => {
                    input.jump = true;
                    if !self.world.player.is_jumping {
                        self.audio_manager.play_jump();
                    }
                }
                InputAction::Fire => {
                    input.fire = true;
                    self.audio_manager.play_fire();
                }
            }
        }
        input
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
