//! Keyboard input
//!
//! Characters typed on stdin become keypad activity:
//!
//! | Char    | Line activity                          |
//! |---------|----------------------------------------|
//! | `0`-`9` | matrix code 0-9                        |
//! | `#`     | matrix code 10 (Confirm)               |
//! | `*`     | matrix code 11 (Clear)                 |
//! | `i`     | identification button                  |
//! | `s`     | settings button                        |
//! | `x`     | matrix code 14 (unassigned)            |

use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use kiosk_protocol::keys::{CODE_CLEAR, CODE_CONFIRM};
use tracing::{debug, info, warn};

use crate::lines::{BoardError, EdgeLine, LineBank};

/// Pause between keys typed on one line so that each press clears the
/// keypad debounce window
pub const KEY_GAP: Duration = Duration::from_millis(20);

/// Line activity for one typed character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleKey {
    Matrix(u8),
    Line(EdgeLine),
}

pub fn key_for_char(c: char) -> Option<ConsoleKey> {
    let key = match c {
        '0'..='9' => ConsoleKey::Matrix(c as u8 - b'0'),
        '#' => ConsoleKey::Matrix(CODE_CONFIRM),
        '*' => ConsoleKey::Matrix(CODE_CLEAR),
        'i' | 'I' => ConsoleKey::Line(EdgeLine::Identification),
        's' | 'S' => ConsoleKey::Line(EdgeLine::Settings),
        'x' | 'X' => ConsoleKey::Matrix(14),
        _ => return None,
    };
    Some(key)
}

fn apply(bank: &LineBank, key: ConsoleKey) {
    match key {
        ConsoleKey::Matrix(code) => bank.press_matrix(code),
        ConsoleKey::Line(line) => bank.press_line(line),
    }
}

/// Start the stdin reader thread
pub fn spawn_stdin_reader(bank: LineBank) -> Result<JoinHandle<()>, BoardError> {
    let handle = thread::Builder::new()
        .name("stdin-keypad".into())
        .spawn(move || {
            info!("keys: 0-9 digits, # confirm, * clear, i identification, s settings");
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!(error = %e, "stdin read failed");
                        break;
                    }
                };
                for c in line.chars().filter(|c| !c.is_whitespace()) {
                    match key_for_char(c) {
                        Some(key) => {
                            debug!(?key, "console key");
                            apply(&bank, key);
                            thread::sleep(KEY_GAP);
                        }
                        None => warn!(char = %c, "no key mapped"),
                    }
                }
            }
            info!("stdin closed, keypad input stopped");
        })?;
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_for_char('7'), Some(ConsoleKey::Matrix(7)));
        assert_eq!(key_for_char('#'), Some(ConsoleKey::Matrix(10)));
        assert_eq!(key_for_char('*'), Some(ConsoleKey::Matrix(11)));
        assert_eq!(
            key_for_char('i'),
            Some(ConsoleKey::Line(EdgeLine::Identification))
        );
        assert_eq!(key_for_char('S'), Some(ConsoleKey::Line(EdgeLine::Settings)));
        assert_eq!(key_for_char('q'), None);
    }
}
