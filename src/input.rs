use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Jump,
    Fire,
    Restart,
    Quit,
}

/// Tracks which keys are logically held down.
///
/// `jump` and `fire` are tracked so their press events can be debounced:
/// terminal auto-repeat delivers extra press events for a held key, and
/// those must not turn into extra jumps or shots.
#[derive(Debug, Default)]
struct KeyState {
    left: bool,
    right: bool,
    jump: bool,
    fire: bool,
}

/// Manages input polling and translates raw key events into game actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
        }
    }

    /// Polls all pending input events without blocking and stores one-shot
    /// actions. Call once per frame before [`InputManager::get_actions`].
    pub fn poll_events(&mut self, session_over: bool) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key_event) => {
                    self.handle_key_event(key_event, session_over);
                }
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {
                    // The renderer rescales from the frame area every draw
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent, session_over: bool) {
        match key_event.kind {
            KeyEventKind::Press => {
                self.handle_key_press(key_event, session_over);
            }
            KeyEventKind::Release => {
                self.handle_key_release(key_event.code);
            }
            _ => {}
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, session_over: bool) {
        // Quit works in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        // Restart only once the session has ended
        if session_over {
            if matches!(key_event.code, KeyCode::Char('r') | KeyCode::Char('R')) {
                self.oneshot_actions.push(InputAction::Restart);
            }
            return;
        }

        match key_event.code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = true;
                self.key_state.right = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = true;
                self.key_state.left = false;
            }
            // Edge-triggered: one impulse per physical press, auto-repeat
            // presses are swallowed until the key is released.
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                if !self.key_state.jump {
                    self.key_state.jump = true;
                    self.oneshot_actions.push(InputAction::Jump);
                }
            }
            // One shot per discrete press, same debounce as jump
            KeyCode::Char(' ') => {
                if !self.key_state.fire {
                    self.key_state.fire = true;
                    self.oneshot_actions.push(InputAction::Fire);
                }
            }
            _ => {}
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = false;
            }
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                self.key_state.jump = false;
            }
            KeyCode::Char(' ') => {
                self.key_state.fire = false;
            }
            _ => {}
        }
    }

    /// Returns all actions for this frame: one-shot actions first, then
    /// the continuous ones derived from held keys. Must be called after
    /// [`InputManager::poll_events`].
    pub fn get_actions(&self) -> Vec<InputAction> {
        let mut actions = Vec::new();
        actions.extend_from_slice(&self.oneshot_actions);

        if self.key_state.left {
            actions.push(InputAction::MoveLeft);
        }
        if self.key_state.right {
            actions.push(InputAction::MoveRight);
        }

        actions
    }
}
