//! Puzzle engine tests - public state machine behavior.

use std::path::PathBuf;

use brickgame::core::tetris::TetrisEngine;
use brickgame::types::{Cell, InputEvent, State, UserAction};

fn records(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("brickgame_it_tetris_{tag}_{}", std::process::id()))
}

fn confirm(eng: &mut TetrisEngine) {
    eng.user_input(InputEvent::press(UserAction::Start));
}

fn idle(eng: &mut TetrisEngine) {
    eng.user_input(InputEvent::press(UserAction::Idle));
}

#[test]
fn confirm_spawns_exactly_four_occupied_cells() {
    let mut eng = TetrisEngine::new(7, records("spawn"));
    assert_eq!(eng.state(), State::Launch);

    confirm(&mut eng);
    assert_eq!(eng.state(), State::Moving);

    let mut occupied = 0;
    for r in 0..eng.field().rows() as i32 {
        for c in eng.field().interior_cols() {
            if eng.field().is_occupied(r, c) {
                occupied += 1;
            }
        }
    }
    assert_eq!(occupied, 4);

    let cells = eng.piece_cells().expect("active piece in Moving");
    for (i, a) in cells.iter().enumerate() {
        for b in &cells[i + 1..] {
            assert_ne!(a, b, "piece cells must be distinct");
        }
    }
}

#[test]
fn four_line_clear_scores_exactly_1500() {
    let mut eng = TetrisEngine::new(3, records("quad"));
    confirm(&mut eng);

    // Four complete rows just above the floor; the piece lands on top of
    // them and the attach sweeps all four at once.
    for r in 18..=21 {
        for c in 1..=10 {
            eng.field_mut().set(r, c, Cell::block(2));
        }
    }

    for _ in 0..40 {
        idle(&mut eng);
        if eng.score() > 0 {
            break;
        }
    }

    assert_eq!(eng.score(), 1500, "a quad pays 1500, not 4x100");
    assert_eq!(eng.level(), 3);
    assert_eq!(eng.state(), State::Moving);
}

#[test]
fn single_line_clear_scores_100() {
    let mut eng = TetrisEngine::new(3, records("single"));
    confirm(&mut eng);

    for c in 1..=10 {
        eng.field_mut().set(21, c, Cell::block(2));
    }

    for _ in 0..40 {
        idle(&mut eng);
        if eng.score() > 0 {
            break;
        }
    }

    assert_eq!(eng.score(), 100);
    assert_eq!(eng.level(), 1);
}

#[test]
fn piece_keeps_four_cells_through_mixed_input() {
    let mut eng = TetrisEngine::new(11, records("mixed"));
    confirm(&mut eng);

    let inputs = [
        UserAction::Left,
        UserAction::Action,
        UserAction::Right,
        UserAction::Idle,
        UserAction::Action,
        UserAction::Left,
        UserAction::Idle,
    ];
    for action in inputs.iter().cycle().take(60) {
        eng.user_input(InputEvent::press(*action));
        if matches!(eng.state(), State::Moving | State::Shifting) {
            let cells = eng.piece_cells().expect("piece present while moving");
            for (i, a) in cells.iter().enumerate() {
                for b in &cells[i + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
    }
}

#[test]
fn high_score_survives_session_reset() {
    let path = records("survive");
    let _ = std::fs::remove_file(&path);

    let mut eng = TetrisEngine::new(3, &path);
    confirm(&mut eng);
    for c in 1..=10 {
        eng.field_mut().set(21, c, Cell::block(2));
    }
    for _ in 0..40 {
        idle(&mut eng);
        if eng.score() > 0 {
            break;
        }
    }
    assert_eq!(eng.high_score(), 100);

    // Top out: fill the upper play rows and let the next attach end the game.
    for r in 2..=20 {
        for c in 1..=10 {
            if eng.field().get(r, c).is_empty() {
                eng.field_mut().set(r, c, Cell::block(1));
            }
        }
    }
    for _ in 0..20 {
        idle(&mut eng);
        if eng.state() == State::GameOver {
            break;
        }
    }
    assert_eq!(eng.state(), State::GameOver);
    assert_eq!(eng.score(), 0);
    assert_eq!(eng.high_score(), 100, "record outlives the session");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn terminate_persists_the_high_score() {
    let path = records("terminate");
    let _ = std::fs::remove_file(&path);

    let mut eng = TetrisEngine::new(3, &path);
    confirm(&mut eng);
    for c in 1..=10 {
        eng.field_mut().set(21, c, Cell::block(2));
    }
    for _ in 0..40 {
        idle(&mut eng);
        if eng.score() > 0 {
            break;
        }
    }

    eng.user_input(InputEvent::press(UserAction::Terminate));
    assert_eq!(brickgame::storage::load_high_score(&path), 100);

    let _ = std::fs::remove_file(&path);
}
