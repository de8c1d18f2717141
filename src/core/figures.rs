//! Tetromino storage - the 7 figures in their classic 2-row encoding.
//!
//! Each figure is a 2x4 occupancy bitmap. Spawn places the set bits as
//! absolute field cells on rows 0-1 starting at `SPAWN_COL`, scanned
//! row-major, so cell index 2 is always the rotation pivot.

pub const FIGURE_COUNT: u32 = 7;

/// The square never rotates.
pub const SQUARE_FIGURE: u8 = 4;

/// Leftmost spawn column of the 4-column encoding window.
pub const SPAWN_COL: i32 = 4;

const FIGURES: [[[u8; 4]; 2]; 7] = [
    [[1, 1, 1, 1], [0, 0, 0, 0]], // ####
    [[0, 1, 0, 0], [1, 1, 1, 0]], //  .#.
    [[1, 0, 0, 0], [1, 1, 1, 0]], //  #..
    [[0, 0, 1, 0], [1, 1, 1, 0]], //  ..#
    [[1, 1, 0, 0], [1, 1, 0, 0]], //  ##
    [[1, 1, 0, 0], [0, 1, 1, 0]], //  ##.
    [[0, 1, 1, 0], [1, 1, 0, 0]], //  .##
];

/// Absolute spawn cells for a figure, in row-major encoding order.
pub fn spawn_cells(shape: u8) -> [(i32, i32); 4] {
    let mut out = [(0, 0); 4];
    let mut k = 0;
    for (r, row) in FIGURES[shape as usize].iter().enumerate() {
        for (c, &bit) in row.iter().enumerate() {
            if bit != 0 {
                out[k] = (r as i32, SPAWN_COL + c as i32);
                k += 1;
            }
        }
    }
    debug_assert_eq!(k, 4, "figure {shape} must encode exactly 4 cells");
    out
}

/// Rotate 4 absolute cells 90 degrees about the pivot (cell index 2).
pub fn rotated(cells: &[(i32, i32); 4]) -> [(i32, i32); 4] {
    let (pr, pc) = cells[2];
    let mut out = [(0, 0); 4];
    for (i, &(r, c)) in cells.iter().enumerate() {
        out[i] = (pr + pc - c, r + pc - pr);
    }
    out
}

/// Occupancy rows for the next-piece preview.
pub fn preview_rows(shape: u8) -> [[bool; 4]; 2] {
    let bitmap = &FIGURES[shape as usize];
    let mut out = [[false; 4]; 2];
    for r in 0..2 {
        for c in 0..4 {
            out[r][c] = bitmap[r][c] != 0;
        }
    }
    out
}
