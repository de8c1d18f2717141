//! Key mapping from terminal events to game actions.

use crossterm::event::KeyCode;

use crate::types::{InputEvent, UserAction};

/// Map a raw key to a game action. `None` (poll timeout) and unmapped keys
/// are idle ticks: they advance the simulation without user intent.
pub fn map_key(key: Option<KeyCode>) -> UserAction {
    match key {
        Some(KeyCode::Up) => UserAction::Up,
        Some(KeyCode::Down) => UserAction::Down,
        Some(KeyCode::Left) => UserAction::Left,
        Some(KeyCode::Right) => UserAction::Right,
        Some(KeyCode::Enter) => UserAction::Start,
        Some(KeyCode::Char(' ')) => UserAction::Action,
        Some(KeyCode::Char('p')) | Some(KeyCode::Char('P')) => UserAction::Pause,
        Some(KeyCode::Char('q')) | Some(KeyCode::Char('Q')) | Some(KeyCode::Esc) => {
            UserAction::Terminate
        }
        _ => UserAction::Idle,
    }
}

/// Turns a raw key stream into `(action, hold)` pairs. A key equal to the
/// previous tick's key counts as held; timeouts never do.
#[derive(Debug, Default)]
pub struct InputMapper {
    last: Option<KeyCode>,
}

impl InputMapper {
    pub fn new() -> Self {
        Self { last: None }
    }

    pub fn read(&mut self, key: Option<KeyCode>) -> InputEvent {
        let hold = key.is_some() && key == self.last;
        self.last = key;
        InputEvent {
            action: map_key(key),
            hold,
        }
    }
}
