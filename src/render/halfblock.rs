use crate::render::{Frame, Renderer, draw_text_panel};
use std::io::Write;

const HALF_BLOCK: char = '\u{2580}';

/// Two pixels per cell: the upper one as foreground, the lower one as background. The
/// frame is sampled nearest-neighbour to fill the space above the HUD.
pub struct HalfBlockRenderer {
    last_fg: Option<(u8, u8, u8)>,
    last_bg: Option<(u8, u8, u8)>,
}

impl HalfBlockRenderer {
    pub fn new() -> Self {
        Self {
            last_fg: None,
            last_bg: None,
        }
    }
}

impl Default for HalfBlockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for HalfBlockRenderer {
    fn name(&self) -> &'static str {
        "halfblock"
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let cols = frame.term_cols as usize;
        let visual_rows = frame.term_rows.saturating_sub(frame.hud_rows) as usize;
        let w = frame.pixel_width;
        let h = frame.pixel_height;
        if cols == 0 || visual_rows == 0 || w == 0 || h == 0 || frame.pixels.len() < w * h {
            return Ok(());
        }

        // Synchronized update, home, reset, autowrap off.
        out.write_all(b"\x1b[?2026h\x1b[H\x1b[0m\x1b[?7l")?;
        self.last_fg = None;
        self.last_bg = None;

        let sub_rows = visual_rows * 2;
        let sample = |col: usize, sub_row: usize| {
            let x = col * w / cols;
            let y = sub_row * h / sub_rows;
            let p = frame.pixels[y * w + x];
            (p[0], p[1], p[2])
        };

        for row in 0..visual_rows {
            for col in 0..cols {
                let top = sample(col, row * 2);
                let bottom = sample(col, row * 2 + 1);
                if self.last_fg != Some(top) {
                    write!(out, "\x1b[38;2;{};{};{}m", top.0, top.1, top.2)?;
                    self.last_fg = Some(top);
                }
                if self.last_bg != Some(bottom) {
                    write!(out, "\x1b[48;2;{};{};{}m", bottom.0, bottom.1, bottom.2)?;
                    self.last_bg = Some(bottom);
                }
                write!(out, "{HALF_BLOCK}")?;
            }
            out.write_all(b"\r\n")?;
        }

        let mut hud_lines = frame.hud.lines();
        for i in 0..frame.hud_rows as usize {
            write!(out, "\x1b[{};1H\x1b[0m\x1b[2K", visual_rows + i + 1)?;
            if let Some(line) = hud_lines.next() {
                let clipped: String = line.chars().take(cols).collect();
                write!(out, "{clipped}")?;
            }
        }

        if let Some(text) = frame.panel {
            draw_text_panel(out, frame.term_cols, frame.term_rows, text)?;
        }

        out.write_all(b"\x1b[?7h\x1b[?2026l")?;
        out.flush()?;
        Ok(())
    }
}
