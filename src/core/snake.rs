//! Snake engine.
//!
//! One tick per input event, driven through a bounded dispatcher that may
//! carry a single event across adjacent states (confirm runs
//! `Launch -> Spawn` in one call, a collision runs `Moving -> Attaching`).
//! Held directional input is throttled to a playable cadence; a 180-degree
//! turn is rejected outright, so the snake can never reverse into itself.

use std::path::PathBuf;

use arrayvec::ArrayVec;

use crate::core::field::FieldGrid;
use crate::core::leveling::{self, SNAKE_POINTS_PER_LEVEL};
use crate::core::model::Model;
use crate::core::rng::SimpleRng;
use crate::core::snapshot::{self, GameInfo};
use crate::storage;
use crate::types::{
    Cell, Direction, InputEvent, State, UserAction, LEVEL_MAX, SNAKE_FIELD_COLS, SNAKE_FIELD_ROWS,
    SNAKE_START_LEN, SNAKE_WIN_LEN,
};

const BODY_COLOR: u8 = 3;
const HEAD_COLOR: u8 = 6;
const APPLE_COLOR: u8 = 1;

/// Interior cell count; upper bound for apple placement candidates.
const INTERIOR_CELLS: usize = (SNAKE_FIELD_ROWS - 1) * (SNAKE_FIELD_COLS - 2);

/// Segment list with the head at index 0.
#[derive(Debug, Clone)]
struct Snake {
    body: ArrayVec<(i32, i32), SNAKE_WIN_LEN>,
    direction: Direction,
}

impl Snake {
    fn new() -> Self {
        let mut body = ArrayVec::new();
        for i in 0..SNAKE_START_LEN as i32 {
            body.push((7, 5 - i));
        }
        Self {
            body,
            direction: Direction::Right,
        }
    }

    fn reset(&mut self) {
        *self = Snake::new();
    }

    /// Reversing 180 degrees in one tick is rejected.
    fn set_direction(&mut self, direction: Direction) {
        if self.direction != direction.opposite() {
            self.direction = direction;
        }
    }

    /// Shift every segment toward the head, then advance the head.
    fn advance(&mut self) {
        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }
        let (dr, dc) = self.direction.delta();
        self.body[0].0 += dr;
        self.body[0].1 += dc;
    }

    /// Append a tail segment (duplicates the second-to-last segment; the
    /// next advance spreads the body out again).
    fn grow(&mut self) {
        let tail = self.body[self.body.len() - 2];
        self.body.push(tail);
    }

    fn head(&self) -> (i32, i32) {
        self.body[0]
    }

    fn len(&self) -> usize {
        self.body.len()
    }
}

pub struct SnakeEngine {
    state: State,
    field: FieldGrid,
    snake: Snake,
    apple: (i32, i32),
    score: i32,
    high_score: i32,
    level: i32,
    speed: i32,
    pause: bool,
    /// Sticky game-over flag; reported until the next session starts.
    game_over: bool,
    /// Held-input counter driving the movement throttle.
    hold_counter: i32,
    rng: SimpleRng,
    records: PathBuf,
}

impl SnakeEngine {
    pub fn new(seed: u32, records: impl Into<PathBuf>) -> Self {
        let records = records.into();
        Self {
            state: State::Launch,
            field: FieldGrid::new(SNAKE_FIELD_ROWS, SNAKE_FIELD_COLS),
            snake: Snake::new(),
            apple: (4, 7),
            score: 0,
            high_score: storage::load_high_score(&records),
            level: 1,
            speed: leveling::snake_speed_ms(1),
            pause: false,
            game_over: false,
            hold_counter: 0,
            rng: SimpleRng::new(seed),
            records,
        }
    }

    /// Externally visible state; GameOver is sticky until the next confirm.
    pub fn state(&self) -> State {
        if self.game_over {
            State::GameOver
        } else {
            self.state
        }
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

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    pub fn head(&self) -> (i32, i32) {
        self.snake.head()
    }

    pub fn apple(&self) -> (i32, i32) {
        self.apple
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn field(&self) -> &FieldGrid {
        &self.field
    }

    /// Move the apple to a chosen cell (scripted setups and tests).
    pub fn set_apple(&mut self, pos: (i32, i32)) {
        self.remove_apple();
        self.apple = pos;
        self.put_apple();
    }

    /// Advance the state machine by one tick for the given input.
    pub fn user_input(&mut self, event: InputEvent) {
        let mut iterations = 1;
        let mut i = 0;
        while i < iterations {
            match self.state {
                State::Launch => {
                    if event.action == UserAction::Terminate {
                        let _ = storage::save_high_score(&self.records, self.high_score);
                        return;
                    }
                    if event.action == UserAction::Start {
                        self.start_session();
                        self.state = State::Spawn;
                        iterations += 1;
                    }
                }
                State::Spawn => {
                    self.remove_snake();
                    self.put_snake();
                    self.spawn_apple();
                    self.put_apple();
                    self.state = State::Moving;
                }
                State::Moving => {
                    self.action_processing(event);
                    if self.state == State::Attaching {
                        iterations += 1;
                    }
                }
                State::Attaching => {
                    if self.head_on_apple() {
                        self.eat_apple();
                        iterations += 1;
                        if self.snake.len() >= SNAKE_WIN_LEN {
                            let _ = storage::save_high_score(&self.records, self.score);
                            self.state = State::Win;
                        } else {
                            self.state = State::Spawn;
                        }
                    } else {
                        // Wall or self collision.
                        self.state = State::GameOver;
                        iterations += 1;
                    }
                }
                State::GameOver => {
                    self.reset_session();
                    self.state = State::Launch;
                }
                State::Win => {
                    self.remove_snake();
                    self.put_snake();
                }
                State::Shifting => {}
            }
            i += 1;
        }
    }

    fn action_processing(&mut self, event: InputEvent) {
        if self.pause && !matches!(event.action, UserAction::Pause | UserAction::Terminate) {
            return;
        }

        match event.action {
            UserAction::Up => self.snake.set_direction(Direction::Up),
            UserAction::Left => self.snake.set_direction(Direction::Left),
            UserAction::Right => self.snake.set_direction(Direction::Right),
            UserAction::Down => self.snake.set_direction(Direction::Down),
            UserAction::Pause => {
                self.pause = !self.pause;
                return;
            }
            UserAction::Terminate => {
                let _ = storage::save_high_score(&self.records, self.high_score);
                return;
            }
            UserAction::Action | UserAction::Start | UserAction::Idle => {}
        }

        if event.hold && !matches!(event.action, UserAction::Action | UserAction::Idle) {
            self.hold_counter += 1;
        } else {
            self.hold_counter = 0;
        }
        // A turn on a fresh key restarts the throttle window.
        if event.action.is_direction() && !event.hold {
            self.hold_counter = 0;
        }
        if self.hold_counter > 2 && self.hold_counter % 6 != 0 {
            return;
        }

        self.remove_snake();
        self.snake.advance();

        if !self.any_collision() {
            self.put_snake();
        } else {
            self.state = State::Attaching;
        }
    }

    fn head_on_apple(&self) -> bool {
        self.snake.head() == self.apple
    }

    fn wall_collision(&self) -> bool {
        let (r, c) = self.snake.head();
        let rows = self.field.rows() as i32;
        let cols = self.field.cols() as i32;
        c < 1 || c > cols - 2 || r < 0 || r > rows - 2
    }

    fn inner_collision(&self) -> bool {
        let head = self.snake.head();
        self.snake.body[1..].contains(&head)
    }

    /// Apple, wall and self collisions all route to `Attaching`, where the
    /// apple case is told apart from the fatal two.
    fn any_collision(&self) -> bool {
        self.head_on_apple() || self.wall_collision() || self.inner_collision()
    }

    fn eat_apple(&mut self) {
        self.remove_apple();
        self.snake.grow();
        self.score += 1;

        if self.score > self.high_score {
            self.high_score = self.score;
        }
        if self.score % SNAKE_POINTS_PER_LEVEL == 0 {
            if self.level < LEVEL_MAX {
                self.level += 1;
            }
            self.speed = leveling::snake_speed_ms(self.level);
        }
    }

    /// Uniform draw over the currently empty interior cells. Running out of
    /// candidates cannot happen before the win condition fires.
    fn spawn_apple(&mut self) {
        let mut free: ArrayVec<(i32, i32), INTERIOR_CELLS> = ArrayVec::new();
        for r in 0..self.field.rows() as i32 - 1 {
            for c in self.field.interior_cols() {
                if self.field.get(r, c).is_empty() {
                    free.push((r, c));
                }
            }
        }

        if free.is_empty() {
            debug_assert!(false, "no free cell left for the apple");
            return;
        }
        self.apple = free[self.rng.next_range(free.len() as u32) as usize];
    }

    fn put_snake(&mut self) {
        for &(r, c) in &self.snake.body[1..] {
            self.field.set(r, c, Cell::block(BODY_COLOR));
        }
        let (r, c) = self.snake.head();
        self.field.set(r, c, Cell::block(HEAD_COLOR));
    }

    fn remove_snake(&mut self) {
        for &(r, c) in &self.snake.body {
            self.field.set(r, c, Cell::EMPTY);
        }
    }

    fn put_apple(&mut self) {
        let (r, c) = self.apple;
        self.field.set(r, c, Cell::block(APPLE_COLOR));
    }

    fn remove_apple(&mut self) {
        let (r, c) = self.apple;
        self.field.set(r, c, Cell::EMPTY);
    }

    fn start_session(&mut self) {
        self.game_over = false;
    }

    fn reset_session(&mut self) {
        self.game_over = true;
        self.score = 0;
        self.level = 1;
        self.speed = leveling::snake_speed_ms(self.level);
        self.clear_interior();
        self.snake.reset();
        self.apple = (4, 7);
    }

    fn clear_interior(&mut self) {
        let last_play_row = self.field.rows() as i32 - 2;
        let last_play_col = self.field.cols() as i32 - 2;
        self.field.clear(0..=last_play_row, 1..=last_play_col);
    }
}

impl Model for SnakeEngine {
    fn user_input(&mut self, event: InputEvent) {
        SnakeEngine::user_input(self, event);
    }

    fn snapshot_into(&self, out: &mut GameInfo) {
        self.field.write_into(&mut out.field);
        snapshot::stamp_dimensions(&mut out.field);
        out.next = None;
        out.score = self.score;
        out.high_score = self.high_score;
        out.level = self.level;
        out.speed = self.speed;
        out.pause = self.pause;
    }

    fn state(&self) -> State {
        SnakeEngine::state(self)
    }
}
