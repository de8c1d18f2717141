//! Score and level/speed policy.
//!
//! Both games share the structure (score feeds a 1-10 level, the level feeds
//! a millisecond speed value) but the curves are game-specific constants and
//! are kept separate on purpose; the snake curve is irregular and must not be
//! smoothed.

use crate::types::LEVEL_MAX;

/// Points per number of lines cleared in one attach (max 4).
pub fn tetris_line_score(removed: usize) -> i32 {
    match removed {
        1 => 100,
        2 => 300,
        3 => 700,
        4 => 1500,
        _ => 0,
    }
}

/// Puzzle level from total score, wrapping back to 1 above the cap.
pub fn tetris_level_for_score(score: i32) -> i32 {
    let level = score / 600 + 1;
    if level > LEVEL_MAX {
        1
    } else {
        level
    }
}

/// Puzzle tick interval in milliseconds.
pub fn tetris_speed_ms(level: i32) -> i32 {
    600 - level * 25
}

/// Snake eats per level step.
pub const SNAKE_POINTS_PER_LEVEL: i32 = 5;

/// Snake tick interval in milliseconds. The multiplier changes with the
/// level band (24 up to level 5, 23 up to 9, 25 at 10).
pub fn snake_speed_ms(level: i32) -> i32 {
    let n = if level <= 5 {
        24
    } else if level <= 9 {
        23
    } else {
        25
    };
    600 - level * n
}
