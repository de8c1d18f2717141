//! Input adapter: raw terminal keys to engine actions.

mod map;

pub use map::{map_key, InputMapper};
