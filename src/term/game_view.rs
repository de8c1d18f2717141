//! GameView: maps a `GameInfo` snapshot plus render status code into a
//! framebuffer. Pure (no I/O), so it can be unit-tested.

use crossterm::style::Color;

use crate::core::snapshot::GameInfo;
use crate::term::fb::{FrameBuffer, Glyph};

const BLOCK_CH: char = '█';

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Draws the playfield, side panel and status banners.
pub struct GameView {
    /// Field cell width in terminal columns (2 compensates glyph aspect).
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self { cell_w }
    }

    pub fn render(&self, info: &GameInfo, code: u8, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let rows = info.rows();
        let cols = info.cols();
        if rows < 2 || cols < 2 {
            return fb;
        }

        // Playable area: bottom wall row and side wall columns are drawn as
        // the border frame instead.
        let play_rows = (rows - 1) as u16;
        let play_cols = (cols - 2) as u16;
        let frame_w = play_cols * self.cell_w + 2;
        let frame_h = play_rows + 2;

        let start_x = viewport.width.saturating_sub(frame_w + 14) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h);

        for r in 0..play_rows {
            for c in 0..play_cols {
                let cell = info.field[r as usize][(c + 1) as usize];
                let glyph = match cell.color() {
                    Some(color) => Glyph::bold(BLOCK_CH, color_for(color)),
                    None => Glyph::plain(' '),
                };
                for dx in 0..self.cell_w {
                    fb.put(start_x + 1 + c * self.cell_w + dx, start_y + 1 + r, glyph);
                }
            }
        }

        self.draw_side_panel(&mut fb, info, start_x + frame_w + 2, start_y);
        self.draw_banners(&mut fb, code, info.pause, start_x, start_y, frame_w, frame_h);

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = Color::Grey;
        fb.put(x, y, Glyph::colored('┌', style));
        fb.put(x + w - 1, y, Glyph::colored('┐', style));
        fb.put(x, y + h - 1, Glyph::colored('└', style));
        fb.put(x + w - 1, y + h - 1, Glyph::colored('┘', style));
        for dx in 1..w - 1 {
            fb.put(x + dx, y, Glyph::colored('─', style));
            fb.put(x + dx, y + h - 1, Glyph::colored('─', style));
        }
        for dy in 1..h - 1 {
            fb.put(x, y + dy, Glyph::colored('│', style));
            fb.put(x + w - 1, y + dy, Glyph::colored('│', style));
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, info: &GameInfo, x: u16, y: u16) {
        let label = Color::White;
        let value = Color::Grey;

        let mut row = y;
        for (name, val) in [
            ("HIGH", info.high_score),
            ("SCORE", info.score),
            ("LEVEL", info.level),
            ("SPEED", info.speed),
        ] {
            fb.put_str(x, row, name, label, true);
            fb.put_str(x, row + 1, &val.to_string(), value, false);
            row += 3;
        }

        if let Some(next) = &info.next {
            fb.put_str(x, row, "NEXT", label, true);
            let color = color_for(next.color);
            for (r, bits) in next.rows.iter().enumerate() {
                for (c, &set) in bits.iter().enumerate() {
                    if set {
                        let px = x + (c as u16) * self.cell_w;
                        for dx in 0..self.cell_w {
                            fb.put(px + dx, row + 1 + r as u16, Glyph::bold(BLOCK_CH, color));
                        }
                    }
                }
            }
            row += 4;
        }

        if info.pause {
            fb.put_str(x, row, "PAUSED", Color::Yellow, true);
        }
    }

    fn draw_banners(
        &self,
        fb: &mut FrameBuffer,
        code: u8,
        pause: bool,
        x: u16,
        y: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        let mid_y = y + frame_h / 2;
        let center = |fb: &mut FrameBuffer, text: &str, row: u16, fg: Color| {
            let tx = x + frame_w.saturating_sub(text.chars().count() as u16) / 2;
            fb.put_str(tx, row, text, fg, true);
        };

        match code {
            1 => center(fb, "PRESS ENTER", mid_y, Color::White),
            2 => {
                center(fb, "GAME OVER", mid_y.saturating_sub(1), Color::Red);
                center(fb, "PRESS ENTER", mid_y + 1, Color::White);
            }
            3 => center(fb, "YOU WIN", mid_y, Color::Green),
            _ => {
                if pause {
                    center(fb, "PAUSED", mid_y, Color::Yellow);
                }
            }
        }
    }
}

fn color_for(index: u8) -> Color {
    match index {
        0 => Color::Red,
        1 => Color::Yellow,
        2 => Color::Green,
        3 => Color::Blue,
        4 => Color::Magenta,
        5 => Color::Cyan,
        6 => Color::White,
        _ => Color::Grey,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldGrid;
    use crate::core::snapshot::stamp_dimensions;
    use crate::types::Cell;

    fn snapshot() -> GameInfo {
        let mut field = FieldGrid::new(21, 12);
        field.set(7, 5, Cell::block(6));
        let mut info = GameInfo::default();
        field.write_into(&mut info.field);
        stamp_dimensions(&mut info.field);
        info.speed = 576;
        info
    }

    fn row_text(fb: &FrameBuffer, y: u16) -> String {
        (0..fb.width())
            .map(|x| fb.get(x, y).unwrap().ch)
            .collect()
    }

    fn screen_text(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| row_text(fb, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn occupied_cells_render_as_blocks() {
        let fb = GameView::default().render(&snapshot(), 0, Viewport::new(80, 30));
        assert!(screen_text(&fb).contains(BLOCK_CH));
    }

    #[test]
    fn launch_banner_is_drawn_for_code_one() {
        let fb = GameView::default().render(&snapshot(), 1, Viewport::new(80, 30));
        assert!(screen_text(&fb).contains("PRESS ENTER"));
    }

    #[test]
    fn game_over_banner_includes_restart_hint() {
        let fb = GameView::default().render(&snapshot(), 2, Viewport::new(80, 30));
        let text = screen_text(&fb);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("PRESS ENTER"));
    }

    #[test]
    fn win_banner_for_code_three() {
        let fb = GameView::default().render(&snapshot(), 3, Viewport::new(80, 30));
        assert!(screen_text(&fb).contains("YOU WIN"));
    }

    #[test]
    fn side_panel_shows_session_values() {
        let mut info = snapshot();
        info.score = 42;
        info.high_score = 196;
        let fb = GameView::default().render(&info, 0, Viewport::new(80, 30));
        let text = screen_text(&fb);
        assert!(text.contains("SCORE"));
        assert!(text.contains("42"));
        assert!(text.contains("196"));
        assert!(text.contains("576"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let fb = GameView::default().render(&snapshot(), 0, Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
