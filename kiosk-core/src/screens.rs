//! Screen layouts
//!
//! Each function queues the display commands for one screen. Layouts
//! assume a 2x16 character LCD.

use core::fmt::Write;

use heapless::String;
use kiosk_protocol::DisplayCommand;

use crate::amount::{AmountEntry, AMOUNT_CURSOR_COL, AMOUNT_ROW};
use crate::error::ErrorInfo;
use crate::traits::DisplayQueue;

pub const AMOUNT_TITLE: &str = "Amount (# send)";
pub const WAIT_TEXT: &str = "    Wait...";
pub const RESTART_TEXT: &str = "Please restart!";
pub const IDENT_PROMPT: (&str, &str) = ("Ask user to scan", "ID QR code");

/// Transient two-line message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub top: &'static str,
    pub bottom: &'static str,
    pub duration_ms: u32,
}

impl Notice {
    pub const BUSY: Notice = Notice {
        top: "Display is busy",
        bottom: "please wait...",
        duration_ms: 2000,
    };

    pub const SCAN: Notice = Notice {
        top: "Ask customer to",
        bottom: "scan the QR code",
        duration_ms: 4000,
    };

    pub const IDENT_TIMEOUT: Notice = Notice::message("Identification", "failed. Timeout?");

    pub const IDENT_ABORTED: Notice = Notice::message("Identification", "failed. Aborted?");

    pub const IDENT_CANCELLED: Notice = Notice::message("Identification", "cancelled");

    pub const CONNECT_FAILED: Notice = Notice::message("Failed connect", "to ID service");

    pub const NOT_IMPLEMENTED: Notice = Notice::message("Function not", "implemented yet");

    const fn message(top: &'static str, bottom: &'static str) -> Self {
        Self {
            top,
            bottom,
            duration_ms: 4000,
        }
    }
}

/// Amount entry screen with the cursor on the last integer digit
pub fn amount_screen<Q: DisplayQueue>(q: &mut Q, entry: &AmountEntry) {
    q.enqueue(DisplayCommand::Clear);
    q.enqueue(DisplayCommand::print_at(0, 0, AMOUNT_TITLE));

    let mut text: String<16> = String::new();
    let _ = write!(text, "{},00", entry.amount());
    q.enqueue(DisplayCommand::print_at(AMOUNT_ROW, entry.start_col(), &text));

    q.enqueue(DisplayCommand::MoveTo {
        row: AMOUNT_ROW,
        col: AMOUNT_CURSOR_COL,
    });
    q.enqueue(DisplayCommand::ShowCursor);
}

/// Redraw the integer part after a digit was accepted
///
/// Only the digits are printed; the ",00" suffix stays in place.
pub fn amount_digits<Q: DisplayQueue>(q: &mut Q, col: u8, entry: &AmountEntry) {
    let mut text: String<16> = String::new();
    let _ = write!(text, "{}", entry.amount());
    q.enqueue(DisplayCommand::print_at(AMOUNT_ROW, col, &text));
    q.enqueue(DisplayCommand::MoveLeft(1));
}

pub fn wait_screen<Q: DisplayQueue>(q: &mut Q) {
    q.enqueue(DisplayCommand::HideCursor);
    q.enqueue(DisplayCommand::Clear);
    q.enqueue(DisplayCommand::print_at(0, 0, WAIT_TEXT));
}

/// Replace the screen with two lines of text
pub fn two_lines<Q: DisplayQueue>(q: &mut Q, top: &str, bottom: &str) {
    q.enqueue(DisplayCommand::HideCursor);
    q.enqueue(DisplayCommand::Clear);
    q.enqueue(DisplayCommand::print_at(0, 0, top));
    q.enqueue(DisplayCommand::print_at(1, 0, bottom));
}

pub fn notice<Q: DisplayQueue>(q: &mut Q, notice: &Notice) {
    two_lines(q, notice.top, notice.bottom);
}

pub fn error_screen<Q: DisplayQueue>(q: &mut Q, info: &ErrorInfo) {
    two_lines(q, &info.display_message, RESTART_TEXT);
}

/// Split the verified identity text into the two display lines
///
/// Missing segments are blank; anything after the second is dropped.
pub fn identity_lines(detail: &str) -> (&str, &str) {
    let mut parts = detail.split('\n');
    let top = parts.next().unwrap_or("");
    let bottom = parts.next().unwrap_or("");
    (top, bottom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use kiosk_protocol::line;
    use std::vec::Vec;

    #[derive(Default)]
    struct Queue(Vec<DisplayCommand>);

    impl DisplayQueue for Queue {
        fn enqueue(&mut self, cmd: DisplayCommand) {
            self.0.push(cmd);
        }
    }

    #[test]
    fn test_empty_amount_screen() {
        let mut q = Queue::default();
        amount_screen(&mut q, &AmountEntry::new());
        assert_eq!(
            q.0,
            [
                DisplayCommand::Clear,
                DisplayCommand::PrintAt {
                    row: 0,
                    col: 0,
                    text: line("Amount (# send)")
                },
                DisplayCommand::PrintAt {
                    row: 1,
                    col: 12,
                    text: line("0,00")
                },
                DisplayCommand::MoveTo { row: 1, col: 12 },
                DisplayCommand::ShowCursor,
            ]
        );
    }

    #[test]
    fn test_amount_screen_keeps_digits_left_of_cursor() {
        let mut entry = AmountEntry::new();
        for d in [1, 2, 0] {
            entry.push_digit(d);
        }
        let mut q = Queue::default();
        amount_screen(&mut q, &entry);
        assert_eq!(
            q.0[2],
            DisplayCommand::PrintAt {
                row: 1,
                col: 10,
                text: line("120,00")
            }
        );
    }

    #[test]
    fn test_digit_redraw() {
        let mut entry = AmountEntry::new();
        entry.push_digit(4);
        let col = match entry.push_digit(2) {
            crate::amount::DigitOutcome::Accepted { col } => col,
            other => panic!("unexpected {:?}", other),
        };
        let mut q = Queue::default();
        amount_digits(&mut q, col, &entry);
        assert_eq!(
            q.0,
            [
                DisplayCommand::PrintAt {
                    row: 1,
                    col: 11,
                    text: line("42")
                },
                DisplayCommand::MoveLeft(1),
            ]
        );
    }

    #[test]
    fn test_error_screen() {
        let info = ErrorInfo::new(ErrorCode::UnknownKey, format_args!("key 14"));
        let mut q = Queue::default();
        error_screen(&mut q, &info);
        assert_eq!(q.0[2], DisplayCommand::print_at(0, 0, "Error 4"));
        assert_eq!(q.0[3], DisplayCommand::print_at(1, 0, "Please restart!"));
    }

    #[test]
    fn test_identity_lines() {
        assert_eq!(identity_lines("Jane Doe\nCustomer"), ("Jane Doe", "Customer"));
        assert_eq!(identity_lines("Jane Doe"), ("Jane Doe", ""));
        assert_eq!(identity_lines("a\nb\nc"), ("a", "b"));
        assert_eq!(identity_lines(""), ("", ""));
    }
}
