//! Shared model contract for both engines.
//!
//! The controller and view depend only on this trait; which game is running
//! is decided once, at menu time.

use crate::core::snapshot::GameInfo;
use crate::types::{InputEvent, State};

/// One game engine behind the model/view/controller boundary.
pub trait Model {
    /// Advance the state machine by one tick for the given input.
    fn user_input(&mut self, event: InputEvent);

    /// Write the current frame into a reusable snapshot.
    fn snapshot_into(&self, out: &mut GameInfo);

    /// Externally visible state (drives the render status code).
    fn state(&self) -> State;

    /// Convenience allocation-per-call snapshot.
    fn snapshot(&self) -> GameInfo {
        let mut out = GameInfo::default();
        self.snapshot_into(&mut out);
        out
    }
}
