//! Brick-game arcade runner.
//!
//! Prompts for a game on plain stdout, then drives the chosen engine with a
//! crossterm event loop. The loop paces itself by polling input with a
//! timeout equal to the engine's current speed value, so a timeout is one
//! gravity/movement tick.

use std::io::{self, Write};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use brickgame::controller::Controller;
use brickgame::core::model::Model;
use brickgame::core::snake::SnakeEngine;
use brickgame::core::snapshot::GameInfo;
use brickgame::core::tetris::TetrisEngine;
use brickgame::storage::RECORDS_PATH;
use brickgame::term::{GameView, TerminalRenderer, Viewport};
use brickgame::types::UserAction;

fn main() -> Result<()> {
    let Some(model) = choose_game()? else {
        return Ok(());
    };

    let mut controller = Controller::new(model);
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut controller, &mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn choose_game() -> Result<Option<Box<dyn Model>>> {
    println!();
    println!("======================");
    println!("|| G A M E  M E N U ||");
    println!("======================");
    println!("     Choose game");
    println!("      1. Tetris");
    println!("      2. Snake");
    print!("> ");
    io::stdout().flush()?;

    let mut choice = String::new();
    io::stdin().read_line(&mut choice)?;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(1);

    let model: Box<dyn Model> = match choice.trim() {
        "1" => Box::new(TetrisEngine::new(seed, RECORDS_PATH)),
        "2" => Box::new(SnakeEngine::new(seed, RECORDS_PATH)),
        _ => return Ok(None),
    };
    Ok(Some(model))
}

fn run(controller: &mut Controller, term: &mut TerminalRenderer) -> Result<()> {
    let view = GameView::default();
    let mut info = GameInfo::default();

    loop {
        controller.snapshot_into(&mut info);
        let code = controller.status_code();

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&info, code, Viewport::new(w, h));
        term.draw(&fb)?;

        if code == 3 {
            // Hold the win banner, then leave the loop.
            std::thread::sleep(Duration::from_millis(1500));
            return Ok(());
        }

        let timeout = Duration::from_millis(info.speed.max(1) as u64);
        let key = if event::poll(timeout)? {
            match event::read()? {
                Event::Key(k) if matches!(k.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                    Some(k.code)
                }
                _ => None,
            }
        } else {
            None
        };

        if controller.apply_key(key) == UserAction::Terminate {
            return Ok(());
        }
    }
}
