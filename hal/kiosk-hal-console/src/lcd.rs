//! Terminal LCD
//!
//! Wraps the in-memory [`Screen`] and writes a framed copy of it to an
//! output stream whenever the content changed.

use std::fmt::Write as _;
use std::io::{self, Write};

use kiosk_display::{CharacterDisplay, DisplayError, Screen};
use kiosk_protocol::LCD_ROWS;
use tracing::trace;

/// Character LCD drawn on a text stream
pub struct ConsoleLcd<W> {
    screen: Screen,
    out: W,
    frames: u32,
}

impl<W: Write> ConsoleLcd<W> {
    pub fn new(out: W) -> Self {
        Self {
            screen: Screen::new(),
            out,
            frames: 0,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Write the screen if it changed since the last call
    pub fn present(&mut self) -> io::Result<bool> {
        if !self.screen.is_dirty() {
            return Ok(false);
        }
        self.out.write_all(frame(&self.screen).as_bytes())?;
        self.out.flush()?;
        self.screen.mark_clean();
        self.frames += 1;
        trace!(frame = self.frames, "lcd frame written");
        Ok(true)
    }
}

/// Render the screen with a border; the cursor cell is marked below it
pub fn frame(screen: &Screen) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "+----------------+");
    for row in 0..LCD_ROWS {
        let _ = writeln!(out, "|{}|", screen.line(row));
    }
    let _ = writeln!(out, "+----------------+");
    if screen.is_cursor_visible() {
        let (row, col) = screen.cursor();
        let _ = writeln!(out, " {:>width$} row {}", "^", row, width = col as usize + 1);
    }
    out
}

impl<W> CharacterDisplay for ConsoleLcd<W> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.screen.clear()
    }

    fn print_at(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.screen.print_at(row, col, text)
    }

    fn print_byte(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.screen.print_byte(byte)
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        self.screen.set_cursor(row, col)
    }

    fn move_cursor_left(&mut self, n: u8) -> Result<(), DisplayError> {
        self.screen.move_cursor_left(n)
    }

    fn cursor_visible(&mut self, visible: bool) -> Result<(), DisplayError> {
        self.screen.cursor_visible(visible)
    }

    fn backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.screen.backlight(on)
    }

    fn dimensions(&self) -> (u8, u8) {
        self.screen.dimensions()
    }
}
