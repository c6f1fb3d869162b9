//! `OutputBuffer`: frames for the board display and the status line.
//!
//! A frame is assembled in memory and written with a single `write_all`, so a
//! status line never lands in the middle of a board redraw.

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use std::io::Write;

/// Columns between the board and the move history.
const GUTTER: &str = "  ";

/// Pre-allocated buffer for one terminal frame.
#[derive(Debug)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Sized for a board frame.
    pub fn new() -> Self {
        Self::with_capacity(2048)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Return to column 0 and erase the current line.
    pub fn clear_line(&mut self) {
        // Queueing into a Vec cannot fail.
        let _ = queue!(self.data, MoveToColumn(0), Clear(ClearType::CurrentLine));
    }

    /// Board lines and history lines side by side, one row per line.
    ///
    /// # Panics
    ///
    /// Panics if the two columns differ in length.
    pub fn board_frame(&mut self, board: &[String], history: &[String]) {
        assert_eq!(
            board.len(),
            history.len(),
            "board and move history must have the same number of lines"
        );
        for (row, moves) in board.iter().zip(history) {
            self.clear_line();
            self.write_str(row);
            self.write_str(GUTTER);
            self.write_str(moves);
            self.write_str("\r\n");
        }
    }

    /// A line that the next status line or board frame overwrites in place.
    pub fn status_line(&mut self, line: &str) {
        self.clear_line();
        self.write_str(line);
        self.write_str("\r");
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(bytes: &[u8]) -> vt100::Parser {
        let mut parser = vt100::Parser::new(24, 80, 0);
        parser.process(bytes);
        parser
    }

    #[test]
    fn test_board_frame_rows() {
        let mut buf = OutputBuffer::new();
        let board = vec!["left 1".to_string(), "left 2".to_string()];
        let history = vec![String::new(), "  1. P e2-e4".to_string()];
        buf.board_frame(&board, &history);

        let parser = screen(buf.as_bytes());
        let rows: Vec<String> = parser.screen().rows(0, 80).take(3).collect();
        // The gutter is written even when the history cell is empty.
        assert_eq!(rows[0], "left 1  ");
        assert_eq!(rows[1], "left 2    1. P e2-e4");
        assert_eq!(rows[2], "");
    }

    #[test]
    #[should_panic(expected = "same number of lines")]
    fn test_board_frame_length_mismatch() {
        let mut buf = OutputBuffer::new();
        buf.board_frame(&["x".to_string()], &[]);
    }

    #[test]
    fn test_status_line_overwrites() {
        let mut buf = OutputBuffer::new();
        buf.status_line("[Eval: 0.35 Depth: 12]");
        buf.status_line("[Depth: 3]");

        let bytes = buf.as_bytes();
        assert_eq!(bytes.last(), Some(&b'\r'));
        assert!(!bytes.contains(&b'\n'));

        let parser = screen(bytes);
        assert_eq!(parser.screen().rows(0, 80).next().unwrap(), "[Depth: 3]");
        assert_eq!(parser.screen().cursor_position(), (0, 0));
    }

    #[test]
    fn test_flush_and_reuse() {
        let mut buf = OutputBuffer::new();
        buf.write_str("abc");
        let mut out = Vec::new();
        buf.flush_to(&mut out).unwrap();
        assert_eq!(out, b"abc");

        buf.clear();
        assert!(buf.is_empty());
    }
}
