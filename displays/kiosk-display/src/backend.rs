//! Display backend trait
//!
//! Defines the operations of an HD44780-style character LCD.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Character display trait
///
/// Provides a hardware-agnostic interface to a character LCD.
/// Implementations handle the bus protocol (4-bit parallel, I2C backpack,
/// terminal emulation).
pub trait CharacterDisplay {
    /// Clear the display and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Print text starting at the given row and column
    ///
    /// The cursor is left after the last printed character.
    fn print_at(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Print a single character at the cursor and advance it
    fn print_byte(&mut self, byte: u8) -> Result<(), DisplayError>;

    /// Move the cursor to the given row and column
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError>;

    /// Move the cursor left by `n` columns
    fn move_cursor_left(&mut self, n: u8) -> Result<(), DisplayError>;

    /// Show or hide the cursor
    fn cursor_visible(&mut self, visible: bool) -> Result<(), DisplayError>;

    /// Switch the backlight
    fn backlight(&mut self, on: bool) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);
}
