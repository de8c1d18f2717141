//! Terminal view: framebuffer, diff renderer, and the game view that maps
//! engine snapshots onto styled cells.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{FrameBuffer, Glyph};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
