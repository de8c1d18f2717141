//! Falling-block engine.
//!
//! One tick per input event. The state machine is
//! `Launch -> Spawn -> Moving -> Shifting -> Attaching -> {Spawn | GameOver}`;
//! game over resets the session in place and waits for the confirm action.
//! Gravity is gated by a click counter so the piece descends once per five
//! accepted inputs, deferred one cycle whenever the input itself moved the
//! piece.

use std::path::PathBuf;

use crate::core::field::FieldGrid;
use crate::core::figures::{self, FIGURE_COUNT, SQUARE_FIGURE};
use crate::core::leveling;
use crate::core::model::Model;
use crate::core::rng::SimpleRng;
use crate::core::snapshot::{self, GameInfo, NextPreview};
use crate::storage;
use crate::types::{Cell, InputEvent, State, UserAction, TETRIS_FIELD_COLS, TETRIS_FIELD_ROWS};

/// Active piece: 4 absolute (row, col) cells plus shape id and color index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Figure {
    cells: [(i32, i32); 4],
    shape: u8,
    color: u8,
}

/// Queued piece descriptor, generated one draw ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NextFigure {
    shape: u8,
    color: u8,
}

pub struct TetrisEngine {
    state: State,
    field: FieldGrid,
    piece: Option<Figure>,
    next: NextFigure,
    score: i32,
    high_score: i32,
    level: i32,
    speed: i32,
    pause: bool,
    /// Accepted-input counter, cycling 1..=5; gravity fires on the wrap.
    clicks: i32,
    /// Suppresses the gravity step on the tick that confirmed a session.
    blocking: bool,
    /// Whether the current input moved the piece (defers gravity one cycle).
    moved: bool,
    rng: SimpleRng,
    records: PathBuf,
}

impl TetrisEngine {
    pub fn new(seed: u32, records: impl Into<PathBuf>) -> Self {
        let records = records.into();
        let mut rng = SimpleRng::new(seed);
        let next = NextFigure {
            shape: rng.next_range(FIGURE_COUNT) as u8,
            color: rng.next_range(FIGURE_COUNT) as u8,
        };
        Self {
            state: State::Launch,
            field: FieldGrid::new(TETRIS_FIELD_ROWS, TETRIS_FIELD_COLS),
            piece: None,
            next,
            score: 0,
            high_score: storage::load_high_score(&records),
            level: 1,
            speed: leveling::tetris_speed_ms(1),
            pause: false,
            clicks: 0,
            blocking: false,
            moved: false,
            rng,
            records,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn high_score(&self) -> i32 {
        self.high_score
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn paused(&self) -> bool {
        self.pause
    }

    /// Cells of the active piece, if one is on the field.
    pub fn piece_cells(&self) -> Option<[(i32, i32); 4]> {
        self.piece.map(|p| p.cells)
    }

    pub fn field(&self) -> &FieldGrid {
        &self.field
    }

    /// Direct grid access for scripted setups and tests.
    pub fn field_mut(&mut self) -> &mut FieldGrid {
        &mut self.field
    }

    /// Advance the state machine by one tick for the given input.
    pub fn user_input(&mut self, event: InputEvent) {
        if self.status_processing(event.action) {
            return;
        }

        if self.state == State::Moving || event.action == UserAction::Terminate {
            self.action_processing(event);

            if matches!(event.action, UserAction::Up | UserAction::Terminate) {
                return;
            }
            if event.action != UserAction::Pause {
                self.shifting_processing();
            }
        }

        if self.state == State::Spawn {
            self.drop_figure();
            self.state = State::Moving;
        }
    }

    /// Session gating ahead of the action itself. Returns true when the tick
    /// is swallowed (paused).
    fn status_processing(&mut self, action: UserAction) -> bool {
        if action == UserAction::Start {
            if matches!(self.state, State::Launch | State::GameOver) {
                self.state = State::Spawn;
            }
            self.blocking = true;
        }

        if self.pause && !matches!(action, UserAction::Pause | UserAction::Terminate) {
            return true;
        }

        self.clicks = if self.clicks == 5 { 1 } else { self.clicks + 1 };
        false
    }

    fn action_processing(&mut self, event: InputEvent) {
        match event.action {
            UserAction::Action => {
                self.rotate();
                self.moved = true;
            }
            UserAction::Right => {
                self.move_horizontal(1);
                self.moved = true;
            }
            UserAction::Left => {
                self.move_horizontal(-1);
                self.moved = true;
            }
            UserAction::Down => {
                // Held Down borrows the next level's pace; released below.
                if event.hold {
                    self.speed = leveling::tetris_speed_ms(self.level + 1);
                }
            }
            UserAction::Pause => {
                self.pause = !self.pause;
            }
            UserAction::Terminate => {
                let _ = storage::save_high_score(&self.records, self.high_score);
                return;
            }
            UserAction::Start | UserAction::Up | UserAction::Idle => {}
        }

        if event.action == UserAction::Down && !event.hold {
            self.speed = leveling::tetris_speed_ms(self.level);
        }
    }

    fn shifting_processing(&mut self) {
        let click = self.clicks % 5;
        self.state = State::Shifting;

        if (!self.moved || click == 0) && !self.blocking {
            self.figure_down();
        }

        self.blocking = false;
        self.moved = false;

        if self.state == State::Attaching {
            self.attaching_stage();
        } else {
            self.state = State::Moving;
        }
    }

    /// One-row gravity step: lift, test, restore on contact.
    fn figure_down(&mut self) {
        if self.state != State::Shifting {
            return;
        }
        let Some(mut piece) = self.piece else {
            return;
        };

        self.erase(&piece);
        translate(&mut piece.cells, 1, 0);

        if !self.cells_free(&piece.cells) {
            translate(&mut piece.cells, -1, 0);
            self.state = State::Attaching;
        }

        self.paint(&piece);
        self.piece = Some(piece);
    }

    fn move_horizontal(&mut self, step: i32) {
        let Some(mut piece) = self.piece else {
            return;
        };

        self.erase(&piece);
        translate(&mut piece.cells, 0, step);

        if !self.cells_free(&piece.cells) {
            translate(&mut piece.cells, 0, -step);
        }

        self.paint(&piece);
        self.piece = Some(piece);
    }

    /// Rotate 90 degrees about the pivot cell; the square never rotates.
    /// The piece is lifted first, so turning through its own cells is legal.
    fn rotate(&mut self) {
        let Some(mut piece) = self.piece else {
            return;
        };
        if piece.shape == SQUARE_FIGURE {
            return;
        }

        self.erase(&piece);
        let turned = figures::rotated(&piece.cells);
        if self.cells_free(&turned) {
            piece.cells = turned;
        }

        self.paint(&piece);
        self.piece = Some(piece);
    }

    fn attaching_stage(&mut self) {
        self.game_over_check();

        if self.state == State::GameOver {
            self.reset_session();
            return;
        }

        self.remove_filled_lines();
        self.state = State::Spawn;
    }

    /// Any occupied cell in the top two play rows ends the game.
    fn game_over_check(&mut self) {
        for r in 0..2 {
            for c in self.field.interior_cols() {
                if self.field.is_occupied(r, c) {
                    self.state = State::GameOver;
                    return;
                }
            }
        }
    }

    /// Bottom-to-top scan; a compacted row is rechecked before moving up.
    fn remove_filled_lines(&mut self) {
        let mut removed = 0;
        let mut r = self.field.rows() as i32 - 2;
        while r > 1 {
            let full = self.field.interior_cols().all(|c| self.field.is_occupied(r, c));
            if full {
                self.compact_down(r);
                removed += 1;
            } else {
                r -= 1;
            }
        }
        self.process_removed_lines(removed);
    }

    fn compact_down(&mut self, row: i32) {
        for r in (1..=row).rev() {
            for c in self.field.interior_cols() {
                let above = self.field.get(r - 1, c);
                self.field.set(r, c, above);
            }
        }
        for c in self.field.interior_cols() {
            self.field.set(0, c, Cell::EMPTY);
        }
    }

    fn process_removed_lines(&mut self, removed: usize) {
        self.score += leveling::tetris_line_score(removed);
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        self.level = leveling::tetris_level_for_score(self.score);
        self.speed = leveling::tetris_speed_ms(self.level);
    }

    /// Session reset after game over; the high score survives.
    fn reset_session(&mut self) {
        let last_play_row = self.field.rows() as i32 - 2;
        let last_play_col = self.field.cols() as i32 - 2;
        self.field.clear(0..=last_play_row, 1..=last_play_col);
        self.piece = None;
        self.score = 0;
        self.level = 1;
        self.speed = leveling::tetris_speed_ms(self.level);
        self.pause = false;
    }

    /// Transfer the queued piece onto the field and draw a new next piece.
    fn drop_figure(&mut self) {
        let piece = Figure {
            cells: figures::spawn_cells(self.next.shape),
            shape: self.next.shape,
            color: self.next.color,
        };
        self.next = NextFigure {
            shape: self.rng.next_range(FIGURE_COUNT) as u8,
            color: self.rng.next_range(FIGURE_COUNT) as u8,
        };
        self.paint(&piece);
        self.piece = Some(piece);
    }

    fn cells_free(&self, cells: &[(i32, i32); 4]) -> bool {
        cells.iter().all(|&(r, c)| self.field.is_free(r, c))
    }

    fn erase(&mut self, piece: &Figure) {
        for &(r, c) in &piece.cells {
            self.field.set(r, c, Cell::EMPTY);
        }
    }

    fn paint(&mut self, piece: &Figure) {
        for &(r, c) in &piece.cells {
            self.field.set(r, c, Cell::block(piece.color));
        }
    }
}

impl Model for TetrisEngine {
    fn user_input(&mut self, event: InputEvent) {
        TetrisEngine::user_input(self, event);
    }

    fn snapshot_into(&self, out: &mut GameInfo) {
        self.field.write_into(&mut out.field);
        snapshot::stamp_dimensions(&mut out.field);
        out.next = Some(NextPreview {
            shape: self.next.shape,
            color: self.next.color,
            rows: figures::preview_rows(self.next.shape),
        });
        out.score = self.score;
        out.high_score = self.high_score;
        out.level = self.level;
        out.speed = self.speed;
        out.pause = self.pause;
    }

    fn state(&self) -> State {
        TetrisEngine::state(self)
    }
}

fn translate(cells: &mut [(i32, i32); 4], dr: i32, dc: i32) {
    for cell in cells.iter_mut() {
        cell.0 += dr;
        cell.1 += dc;
    }
}
