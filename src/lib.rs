//! Terminal brick-game arcade.
//!
//! Two classic games, a falling-block puzzle and a grid snake, implemented
//! as independent state machines behind one `Model` contract. The console
//! renderer, key mapping and high-score file are thin adapters around the
//! `core` simulation.

pub mod controller;
pub mod core;
pub mod input;
pub mod storage;
pub mod term;
pub mod types;
