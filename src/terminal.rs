//! The preview's terminal session: alternate screen, hidden cursor and raw input.

use anyhow::Context;
use crossterm::{
    cursor, queue,
    style::{Print, ResetColor},
    terminal::{self, ClearType},
};
use std::io::{self, BufWriter, Stdout, Write};

/// Autowrap back on, synchronized output off. The renderer may leave either toggled.
const RESTORE_MODES: &str = "\x1b[?7h\x1b[?2026l";

/// Owns the preview's output stream. Leaves the alternate screen and restores the cursor
/// on drop; raw mode is only touched when the session was opened on the real terminal.
pub struct PreviewTerminal<W: Write> {
    out: W,
    raw_mode: bool,
}

impl PreviewTerminal<BufWriter<Stdout>> {
    pub fn open() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        let mut session = Self {
            out: BufWriter::new(io::stdout()),
            raw_mode: true,
        };
        session.enter().context("enter alternate screen")?;
        Ok(session)
    }
}

impl<W: Write> PreviewTerminal<W> {
    /// A session over any writer, without raw mode.
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            raw_mode: false,
        }
    }

    pub fn enter(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;
        self.out.flush()
    }

    /// Columns and rows of the controlling terminal.
    pub fn size(&self) -> anyhow::Result<(u16, u16)> {
        terminal::size().context("get terminal size")
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    fn restore(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            Print(RESTORE_MODES),
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        self.out.flush()
    }
}

impl<W: Write> Drop for PreviewTerminal<W> {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            log::warn!("restore terminal: {err}");
        }
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &str) -> Option<usize> {
        haystack
            .windows(needle.len())
            .position(|window| window == needle.as_bytes())
    }

    #[test]
    fn session_is_undone_in_reverse() {
        let mut bytes = Vec::new();
        {
            let mut session = PreviewTerminal::with_writer(&mut bytes);
            session.enter().unwrap();
            session.writer().write_all(b"frame").unwrap();
        }
        let enter = contains(&bytes, "\x1b[?1049h").unwrap();
        let hide = contains(&bytes, "\x1b[?25l").unwrap();
        let frame = contains(&bytes, "frame").unwrap();
        let modes = contains(&bytes, RESTORE_MODES).unwrap();
        let show = contains(&bytes, "\x1b[?25h").unwrap();
        let leave = contains(&bytes, "\x1b[?1049l").unwrap();
        assert!(enter < hide && hide < frame);
        assert!(frame < modes && modes < show && show < leave);
        assert!(bytes.ends_with(b"\x1b[?1049l"));
    }
}
