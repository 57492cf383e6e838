//! In-memory character LCD
//!
//! Models a 2x16 character display closely enough to stand in for the
//! real device: text wraps nowhere, the cursor advances on every printed
//! character and stops at the right edge.

use heapless::String;
use kiosk_protocol::{LCD_COLS, LCD_ROWS};

use crate::backend::{CharacterDisplay, DisplayError};

const ROWS: usize = LCD_ROWS as usize;
const COLS: usize = LCD_COLS as usize;

/// Byte capacity for a rendered row
pub const ROW_CAPACITY: usize = COLS * 4;

/// Character display model
#[derive(Clone)]
pub struct Screen {
    /// Current display content
    cells: [[char; COLS]; ROWS],
    /// Cursor position (row, col); col may equal `COLS` after the last cell
    cursor: (u8, u8),
    cursor_visible: bool,
    backlight: bool,
    /// Whether the content changed since the last `mark_clean`
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new blank screen
    pub const fn new() -> Self {
        Self {
            cells: [[' '; COLS]; ROWS],
            cursor: (0, 0),
            cursor_visible: false,
            backlight: false,
            dirty: true,
        }
    }

    /// Get the content of a row, trailing blanks included
    pub fn line(&self, row: u8) -> String<ROW_CAPACITY> {
        let mut out = String::new();
        if let Some(cells) = self.cells.get(row as usize) {
            for &ch in cells {
                let _ = out.push(ch);
            }
        }
        out
    }

    /// Get the content of a row without trailing blanks
    pub fn trimmed_line(&self, row: u8) -> String<ROW_CAPACITY> {
        let mut out = String::new();
        let _ = out.push_str(self.line(row).trim_end());
        out
    }

    /// Cursor position as (row, col)
    pub fn cursor(&self) -> (u8, u8) {
        self.cursor
    }

    /// Whether the cursor is shown
    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Whether the backlight is on
    pub fn is_backlight_on(&self) -> bool {
        self.backlight
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn put(&mut self, ch: char) {
        let (row, col) = self.cursor;
        if (col as usize) < COLS {
            self.cells[row as usize][col as usize] = ch;
            self.cursor.1 = col + 1;
        }
        self.dirty = true;
    }
}

impl CharacterDisplay for Screen {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.cells = [[' '; COLS]; ROWS];
        self.cursor = (0, 0);
        self.dirty = true;
        Ok(())
    }

    fn print_at(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.set_cursor(row, col)?;
        for ch in text.chars() {
            self.put(ch);
        }
        Ok(())
    }

    fn print_byte(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.put(byte as char);
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        if row >= LCD_ROWS || col > LCD_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.cursor = (row, col);
        self.dirty = true;
        Ok(())
    }

    fn move_cursor_left(&mut self, n: u8) -> Result<(), DisplayError> {
        self.cursor.1 = self.cursor.1.saturating_sub(n);
        self.dirty = true;
        Ok(())
    }

    fn cursor_visible(&mut self, visible: bool) -> Result<(), DisplayError> {
        self.cursor_visible = visible;
        self.dirty = true;
        Ok(())
    }

    fn backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.backlight = on;
        self.dirty = true;
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (LCD_COLS, LCD_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_at_moves_cursor() {
        let mut screen = Screen::new();
        screen.print_at(1, 12, "0,00").unwrap();
        assert_eq!(screen.trimmed_line(1).as_str(), "            0,00");
        assert_eq!(screen.cursor(), (1, 16));
    }

    #[test]
    fn test_text_stops_at_right_edge() {
        let mut screen = Screen::new();
        screen.print_at(0, 14, "abcdef").unwrap();
        assert_eq!(screen.line(0).as_str(), "              ab");
        assert_eq!(screen.cursor(), (0, 16));
    }

    #[test]
    fn test_overwrite_and_move_left() {
        let mut screen = Screen::new();
        screen.print_at(1, 12, "0,00").unwrap();
        screen.print_at(1, 12, "1").unwrap();
        screen.move_cursor_left(1).unwrap();
        assert_eq!(screen.trimmed_line(1).as_str(), "            1,00");
        assert_eq!(screen.cursor(), (1, 12));
    }

    #[test]
    fn test_clear_homes_cursor() {
        let mut screen = Screen::new();
        screen.print_at(1, 3, "x").unwrap();
        screen.clear().unwrap();
        assert_eq!(screen.cursor(), (0, 0));
        assert_eq!(screen.trimmed_line(1).as_str(), "");
    }

    #[test]
    fn test_invalid_row() {
        let mut screen = Screen::new();
        assert_eq!(
            screen.print_at(2, 0, "x"),
            Err(DisplayError::InvalidCoordinates)
        );
    }

    #[test]
    fn test_print_byte_and_dirty() {
        let mut screen = Screen::new();
        screen.mark_clean();
        assert!(!screen.is_dirty());
        screen.print_byte(b'7').unwrap();
        assert!(screen.is_dirty());
        assert_eq!(screen.trimmed_line(0).as_str(), "7");
    }
}
