//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod controller;
pub mod display;
pub mod keypad;

pub use controller::controller_task;
pub use display::{display_task, ConsoleSink};
pub use keypad::{keypad_task, ConsoleKeypad};
