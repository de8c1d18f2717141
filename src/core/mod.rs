//! Core simulation - game rules and state machines with no terminal
//! dependencies. The only I/O the engines perform is high-score persistence
//! through the `storage` collaborator.

pub mod field;
pub mod figures;
pub mod leveling;
pub mod model;
pub mod rng;
pub mod snake;
pub mod snapshot;
pub mod tetris;

// Re-export commonly used types
pub use field::FieldGrid;
pub use model::Model;
pub use rng::SimpleRng;
pub use snake::SnakeEngine;
pub use snapshot::{GameInfo, NextPreview};
pub use tetris::TetrisEngine;
