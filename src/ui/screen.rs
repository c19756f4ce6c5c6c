//! Screen writers
//!
//! Every pane draws through the [`Screen`] trait: "move to (column, row) and
//! write this text". Erasing works by rewriting the same cells with blanks,
//! which only holds if nothing else writes to the screen, so all output goes
//! through here.
//!
//! - [`TerminalScreen`]: queues crossterm commands to a live terminal
//! - [`BufferScreen`]: writes into a ratatui cell [`Buffer`]; used headless
//!   and in tests to read the screen back as text

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType},
};
use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use std::io::{self, Write};

/// Positioned text output, 1-based coordinates
pub trait Screen {
    /// Write `text` verbatim starting at `(column, row)`. No wrapping.
    fn write_at(&mut self, column: usize, row: usize, text: &str) -> io::Result<()>;

    /// Reset attributes and blank the whole screen
    fn clear(&mut self) -> io::Result<()>;

    /// Leave the cursor at a neutral spot after a redraw
    fn park(&mut self, column: usize, row: usize) -> io::Result<()> {
        self.write_at(column, row, "")
    }

    /// Push queued output to the device
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Convert a 1-based coordinate to crossterm's 0-based u16
fn zero_based(n: usize) -> u16 {
    u16::try_from(n.saturating_sub(1)).unwrap_or(u16::MAX)
}

/// A live terminal reached through crossterm escape sequences
pub struct TerminalScreen<W: Write> {
    out: W,
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(out: W) -> Self {
        TerminalScreen { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Screen for TerminalScreen<W> {
    fn write_at(&mut self, column: usize, row: usize, text: &str) -> io::Result<()> {
        queue!(self.out, MoveTo(zero_based(column), zero_based(row)), Print(text))
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            SetAttribute(Attribute::Reset),
            Clear(ClearType::All),
            MoveTo(0, 0)
        )
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// An in-memory screen backed by a ratatui cell buffer.
///
/// Text past the right edge is dropped, like a terminal that does not wrap.
#[derive(Debug, Clone)]
pub struct BufferScreen {
    buffer: Buffer,
    cursor: (usize, usize),
}

impl BufferScreen {
    pub fn new(width: u16, height: u16) -> Self {
        BufferScreen {
            buffer: Buffer::empty(Rect::new(0, 0, width, height)),
            cursor: (1, 1),
        }
    }

    pub fn width(&self) -> u16 {
        self.buffer.area.width
    }

    pub fn height(&self) -> u16 {
        self.buffer.area.height
    }

    /// Position of the cursor after the last write (1-based)
    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// Full text of a row, trailing blanks included (1-based)
    pub fn row(&self, row: usize) -> String {
        if row == 0 || row > usize::from(self.height()) {
            return String::new();
        }
        let y = zero_based(row);
        (0..self.width())
            .map(|x| self.buffer.content()[self.buffer.index_of(x, y)].symbol())
            .collect()
    }

    /// Row text with trailing blanks removed
    pub fn row_text(&self, row: usize) -> String {
        self.row(row).trim_end().to_string()
    }

    /// All rows, trailing blanks removed
    pub fn lines(&self) -> Vec<String> {
        (1..=usize::from(self.height()))
            .map(|row| self.row_text(row))
            .collect()
    }

    /// Text of `len` cells starting at `(column, row)`
    pub fn text_at(&self, column: usize, row: usize, len: usize) -> String {
        self.row(row)
            .chars()
            .skip(column.saturating_sub(1))
            .take(len)
            .collect()
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }
}

impl Screen for BufferScreen {
    fn write_at(&mut self, column: usize, row: usize, text: &str) -> io::Result<()> {
        let visible = column >= 1
            && row >= 1
            && column <= usize::from(self.width())
            && row <= usize::from(self.height());
        if visible {
            self.buffer
                .set_string(zero_based(column), zero_based(row), text, Style::default());
        }
        self.cursor = (column + text.chars().count(), row);
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.buffer.reset();
        self.cursor = (1, 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_write_and_read_back() {
        let mut screen = BufferScreen::new(10, 3);
        screen.write_at(3, 2, "abc").unwrap();
        assert_eq!(screen.row_text(2), "  abc");
        assert_eq!(screen.text_at(3, 2, 3), "abc");
        assert_eq!(screen.row(1), " ".repeat(10));
    }

    #[test]
    fn test_buffer_drops_text_past_edges() {
        let mut screen = BufferScreen::new(5, 2);
        screen.write_at(4, 1, "xyz").unwrap();
        screen.write_at(1, 3, "hidden").unwrap();
        screen.write_at(9, 1, "far").unwrap();
        assert_eq!(screen.lines(), vec!["   xy", ""]);
    }

    #[test]
    fn test_box_glyphs_take_one_cell() {
        let mut screen = BufferScreen::new(8, 1);
        screen.write_at(1, 1, "&a┌─┬─┐").unwrap();
        assert_eq!(screen.text_at(3, 1, 1), "┌");
        assert_eq!(screen.text_at(7, 1, 1), "┐");
    }

    #[test]
    fn test_park_moves_cursor() {
        let mut screen = BufferScreen::new(10, 5);
        screen.write_at(2, 2, "hello").unwrap();
        screen.park(1, 5).unwrap();
        assert_eq!(screen.cursor(), (1, 5));
        assert_eq!(screen.row_text(5), "");
    }

    #[test]
    fn test_clear() {
        let mut screen = BufferScreen::new(4, 2);
        screen.write_at(1, 1, "abcd").unwrap();
        screen.clear().unwrap();
        assert_eq!(screen.lines(), vec!["", ""]);
    }

    #[test]
    fn test_terminal_screen_emits_cursor_moves() {
        let mut screen = TerminalScreen::new(Vec::new());
        screen.write_at(3, 2, "hi").unwrap();
        screen.flush().unwrap();
        let bytes = String::from_utf8(screen.into_inner()).unwrap();
        assert_eq!(bytes, "\x1b[2;3Hhi");
    }
}
