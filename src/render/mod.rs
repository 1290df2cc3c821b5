mod halfblock;

pub use halfblock::HalfBlockRenderer;

use crate::filter_buffers::Pixel;
use std::io::Write;

pub struct Frame<'a> {
    pub term_cols: u16,
    pub term_rows: u16,
    pub pixel_width: usize,
    pub pixel_height: usize,
    pub pixels: &'a [Pixel],
    pub hud: &'a str,
    pub hud_rows: u16,
    /// Text shown in a box over the picture, e.g. the filter diagnostics.
    pub panel: Option<&'a str>,
}

pub trait Renderer {
    fn name(&self) -> &'static str;
    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()>;
}

/// Draws `text` left-aligned in a framed box at the top-left corner, clipped to the terminal.
pub fn draw_text_panel(
    out: &mut dyn Write,
    term_cols: u16,
    term_rows: u16,
    text: &str,
) -> anyhow::Result<()> {
    let cols = term_cols as usize;
    let rows = term_rows as usize;
    if cols < 8 || rows < 3 || text.trim().is_empty() {
        return Ok(());
    }

    let inner_w = cols - 4;
    let max_lines = rows - 2;
    let lines: Vec<&str> = text.lines().take(max_lines).collect();
    let width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .min(inner_w);
    let border = "-".repeat(width + 2);

    out.write_all(b"\x1b[0m\x1b[38;2;236;242;255m\x1b[48;2;10;14;24m")?;
    write!(out, "\x1b[1;1H+{border}+")?;
    for (i, line) in lines.iter().enumerate() {
        let clipped: String = line.chars().take(width).collect();
        write!(out, "\x1b[{};1H| {clipped:<width$} |", i + 2)?;
    }
    write!(out, "\x1b[{};1H+{border}+", lines.len() + 2)?;
    out.write_all(b"\x1b[0m")?;
    Ok(())
}
