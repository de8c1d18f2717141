//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Field dimensions per game, borders included (rows x cols)
pub const TETRIS_FIELD_ROWS: usize = 23;
pub const TETRIS_FIELD_COLS: usize = 12;
pub const SNAKE_FIELD_ROWS: usize = 21;
pub const SNAKE_FIELD_COLS: usize = 12;

/// Snake body limits; reaching `SNAKE_WIN_LEN` segments wins the game
pub const SNAKE_START_LEN: usize = 4;
pub const SNAKE_WIN_LEN: usize = 200;

/// Highest reachable level in both games
pub const LEVEL_MAX: i32 = 10;

/// A single field cell code.
///
/// The grid keeps the classic integer encoding: `0` is an immutable wall,
/// `b' '` is empty, and anything at or above [`Cell::BLOCK`] is an occupied
/// cell whose offset from `BLOCK` selects a color index (0-7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell(pub u8);

impl Cell {
    pub const WALL: Cell = Cell(0);
    pub const EMPTY: Cell = Cell(b' ');

    /// Base code for occupied cells.
    pub const BLOCK: u8 = b'*';

    /// An occupied cell carrying the given color index.
    pub const fn block(color: u8) -> Cell {
        Cell(Cell::BLOCK + color)
    }

    pub fn is_wall(self) -> bool {
        self.0 == 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == b' '
    }

    /// Occupancy by threshold comparison.
    pub fn is_occupied(self) -> bool {
        self.0 >= Cell::BLOCK
    }

    /// Color index of an occupied cell.
    pub fn color(self) -> Option<u8> {
        if self.is_occupied() {
            Some(self.0 - Cell::BLOCK)
        } else {
            None
        }
    }
}

/// Engine state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Launch,
    Spawn,
    Moving,
    Shifting,
    Attaching,
    GameOver,
    Win,
}

/// User actions consumed by the engines.
///
/// `Start` is the confirm action (Enter); `Action` rotates the puzzle piece.
/// `Idle` is produced by an input poll timeout and drives gravity/movement
/// without user intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Start,
    Pause,
    Terminate,
    Left,
    Right,
    Up,
    Down,
    Action,
    Idle,
}

impl UserAction {
    /// Whether the action steers the snake.
    pub fn is_direction(self) -> bool {
        matches!(
            self,
            UserAction::Left | UserAction::Right | UserAction::Up | UserAction::Down
        )
    }
}

/// One processed input: an action plus the key-repeat flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub action: UserAction,
    pub hold: bool,
}

impl InputEvent {
    /// A fresh (non-repeated) press.
    pub fn press(action: UserAction) -> Self {
        Self {
            action,
            hold: false,
        }
    }

    /// A continued key repeat.
    pub fn held(action: UserAction) -> Self {
        Self { action, hold: true }
    }
}

/// Snake movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Per-step (row, col) delta.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}
