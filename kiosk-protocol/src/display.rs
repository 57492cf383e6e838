//! Commands for the character display task
//!
//! The controller never touches the LCD. It queues [`DisplayCommand`]s and
//! the display task applies them one at a time, in order.

use heapless::String;

/// Display dimensions
pub const LCD_ROWS: u8 = 2;
pub const LCD_COLS: u8 = 16;

/// Byte capacity of one line of text
///
/// Wider than the visible columns so that multi-byte characters can be
/// carried; [`line`] limits the text to [`LCD_COLS`] characters.
pub const LINE_CAPACITY: usize = 64;

/// One line of display text
pub type LineText = String<LINE_CAPACITY>;

/// Commands consumed by the display task
///
/// Marked non-exhaustive: display backends ignore commands they do not
/// know instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum DisplayCommand {
    /// Print a single character at the cursor
    PrintByte(u8),
    /// Clear the screen and home the cursor
    Clear,
    /// Print text starting at a position
    PrintAt { row: u8, col: u8, text: LineText },
    /// Move the cursor
    MoveTo { row: u8, col: u8 },
    /// Move the cursor left by `n` columns
    MoveLeft(u8),
    /// Show the cursor
    ShowCursor,
    /// Hide the cursor
    HideCursor,
}

impl DisplayCommand {
    /// Build a `PrintAt`, truncating the text to the display width
    pub fn print_at(row: u8, col: u8, text: &str) -> Self {
        let width = LCD_COLS.saturating_sub(col) as usize;
        DisplayCommand::PrintAt {
            row,
            col,
            text: line_with_width(text, width),
        }
    }
}

/// Copy `text` into a [`LineText`], keeping at most [`LCD_COLS`] characters
pub fn line(text: &str) -> LineText {
    line_with_width(text, LCD_COLS as usize)
}

fn line_with_width(text: &str, width: usize) -> LineText {
    let mut out = LineText::new();
    for ch in text.chars().take(width) {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}
