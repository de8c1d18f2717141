//! Controller: feeds mapped input into a game model and exposes the render
//! status code. It owns the model behind the `Model` trait, so the same loop
//! runs either game.

use crossterm::event::KeyCode;

use crate::core::model::Model;
use crate::core::snapshot::GameInfo;
use crate::input::InputMapper;
use crate::types::{State, UserAction};

pub struct Controller {
    model: Box<dyn Model>,
    mapper: InputMapper,
}

impl Controller {
    pub fn new(model: Box<dyn Model>) -> Self {
        Self {
            model,
            mapper: InputMapper::new(),
        }
    }

    /// Map one raw key (or idle timeout) and run the engine tick.
    /// Returns the mapped action so the caller can react to `Terminate`.
    pub fn apply_key(&mut self, key: Option<KeyCode>) -> UserAction {
        let event = self.mapper.read(key);
        let action = event.action;
        self.model.user_input(event);
        action
    }

    pub fn snapshot_into(&self, out: &mut GameInfo) {
        self.model.snapshot_into(out);
    }

    /// Render status code: 0 normal, 1 launch banner, 2 launch + game-over
    /// banner, 3 win banner.
    pub fn status_code(&self) -> u8 {
        match self.model.state() {
            State::Launch => 1,
            State::GameOver => 2,
            State::Win => 3,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::snake::SnakeEngine;
    use crate::core::tetris::TetrisEngine;

    fn records(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("brickgame_ctrl_{tag}_{}", std::process::id()))
    }

    #[test]
    fn status_codes_follow_the_model_state() {
        let mut ctrl = Controller::new(Box::new(TetrisEngine::new(1, records("tetris"))));
        assert_eq!(ctrl.status_code(), 1);

        let action = ctrl.apply_key(Some(KeyCode::Enter));
        assert_eq!(action, UserAction::Start);
        assert_eq!(ctrl.status_code(), 0);
    }

    #[test]
    fn either_engine_fits_behind_the_trait() {
        let mut ctrl = Controller::new(Box::new(SnakeEngine::new(1, records("snake"))));
        ctrl.apply_key(Some(KeyCode::Enter));

        let mut info = GameInfo::default();
        ctrl.snapshot_into(&mut info);
        assert_eq!(info.rows(), 21);
        assert_eq!(info.cols(), 12);
        assert!(info.next.is_none());
    }
}
