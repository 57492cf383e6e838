//! Console board
//!
//! Emulates the kiosk hardware on a terminal so the firmware can run on any
//! Linux host:
//!
//! - [`lines`]: keypad encoder data lines and latched edge inputs
//! - [`stdin`]: a reader thread that turns typed characters into line
//!   activity, exactly as the encoder and function buttons would
//! - [`lcd`]: a 2x16 character LCD drawn to a text stream

pub mod lcd;
pub mod lines;
pub mod stdin;

pub use lcd::ConsoleLcd;
pub use lines::{BoardError, ConsoleEdge, ConsoleLine, EdgeLine, LineBank};
pub use stdin::{key_for_char, spawn_stdin_reader, ConsoleKey};
