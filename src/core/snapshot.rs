//! Read-only snapshot handed to the render layer.
//!
//! The field copy keeps the classic convention of stamping the grid height
//! and width into `[0][0]` and `[1][0]`; those two cells are wall cells in
//! the live grid, so nothing is lost. Renderers read the stamps through
//! [`GameInfo::rows`]/[`GameInfo::cols`] and draw column 0 as border anyway.

use crate::types::Cell;

/// Queued-piece preview for the puzzle game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextPreview {
    pub shape: u8,
    pub color: u8,
    pub rows: [[bool; 4]; 2],
}

/// Everything the view needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInfo {
    pub field: Vec<Vec<Cell>>,
    pub next: Option<NextPreview>,
    pub score: i32,
    pub high_score: i32,
    pub level: i32,
    pub speed: i32,
    pub pause: bool,
}

impl GameInfo {
    /// Grid height read from the dimension stamp.
    pub fn rows(&self) -> usize {
        self.field.first().and_then(|row| row.first()).map_or(0, |cell| cell.0 as usize)
    }

    /// Grid width read from the dimension stamp.
    pub fn cols(&self) -> usize {
        self.field.get(1).and_then(|row| row.first()).map_or(0, |cell| cell.0 as usize)
    }
}

impl Default for GameInfo {
    fn default() -> Self {
        Self {
            field: Vec::new(),
            next: None,
            score: 0,
            high_score: 0,
            level: 1,
            speed: 0,
            pause: false,
        }
    }
}

/// Stamp the grid dimensions into the serialized field buffer.
pub fn stamp_dimensions(field: &mut [Vec<Cell>]) {
    let rows = field.len();
    if rows < 2 || field[0].is_empty() {
        return;
    }
    let cols = field[0].len();
    field[0][0] = Cell(rows as u8);
    field[1][0] = Cell(cols as u8);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldGrid;

    #[test]
    fn stamps_expose_dimensions() {
        let grid = FieldGrid::new(23, 12);
        let mut info = GameInfo::default();
        grid.write_into(&mut info.field);
        stamp_dimensions(&mut info.field);
        assert_eq!(info.rows(), 23);
        assert_eq!(info.cols(), 12);
    }

    #[test]
    fn empty_snapshot_has_zero_dimensions() {
        let info = GameInfo::default();
        assert_eq!(info.rows(), 0);
        assert_eq!(info.cols(), 0);
    }
}
