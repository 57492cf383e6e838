//! Display command interpreter
//!
//! The sink owns the display exclusively and translates each queued
//! [`DisplayCommand`] into one backend call.

use kiosk_protocol::DisplayCommand;

use crate::backend::{CharacterDisplay, DisplayError};

/// What the sink did with a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Command was forwarded to the display
    Done,
    /// Command kind is unknown to this sink and was skipped
    Ignored,
}

/// Applies display commands in arrival order
pub struct DisplaySink<D> {
    display: D,
    applied: u32,
}

impl<D: CharacterDisplay> DisplaySink<D> {
    /// Take ownership of the display and bring it to a known state
    ///
    /// A display that fails here is unusable; the caller treats this as a
    /// startup failure.
    pub fn new(mut display: D) -> Result<Self, DisplayError> {
        display.clear()?;
        display.cursor_visible(false)?;
        display.backlight(true)?;
        Ok(Self {
            display,
            applied: 0,
        })
    }

    /// Apply one command
    pub fn apply(&mut self, cmd: &DisplayCommand) -> Result<Applied, DisplayError> {
        match cmd {
            DisplayCommand::PrintByte(byte) => self.display.print_byte(*byte)?,
            DisplayCommand::Clear => self.display.clear()?,
            DisplayCommand::PrintAt { row, col, text } => {
                self.display.print_at(*row, *col, text)?
            }
            DisplayCommand::MoveTo { row, col } => self.display.set_cursor(*row, *col)?,
            DisplayCommand::MoveLeft(n) => self.display.move_cursor_left(*n)?,
            DisplayCommand::ShowCursor => self.display.cursor_visible(true)?,
            DisplayCommand::HideCursor => self.display.cursor_visible(false)?,
            _ => return Ok(Applied::Ignored),
        }
        self.applied = self.applied.wrapping_add(1);
        Ok(Applied::Done)
    }

    /// Number of commands forwarded so far
    pub fn applied(&self) -> u32 {
        self.applied
    }

    /// Borrow the display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Borrow the display mutably
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}
