//! Keypad decoder
//!
//! The keypad is wired through a 16-key encoder: four data lines carry the
//! key number and a select line pulses low once the data lines are valid.
//! Two extra buttons (identification and settings) have lines of their own
//! and map to fixed codes without going through the encoder.
//!
//! ```text
//!   data[0] ── bit 3 (MSB)
//!   data[1] ── bit 2
//!   data[2] ── bit 1
//!   data[3] ── bit 0 (LSB)
//!   select  ── edge: data lines valid
//!   ident   ── edge: code 12
//!   settings── edge: code 13
//! ```

use kiosk_core::config::KeypadConfig;
use kiosk_hal::{EdgeInput, InputPin};
use kiosk_protocol::keys::{CODE_IDENTIFICATION, CODE_SETTINGS};
use kiosk_protocol::KeyCode;

/// Number of encoder data lines
pub const DATA_LINES: usize = 4;

/// Assemble a key code from the data lines, first line most significant
pub fn decode<P: InputPin>(data: &[P; DATA_LINES]) -> KeyCode {
    let code = data
        .iter()
        .enumerate()
        .fold(0u8, |acc, (p, line)| acc | line.bit() << (DATA_LINES - 1 - p));
    KeyCode(code)
}

/// Keypad encoder and function buttons
pub struct Keypad<P, E> {
    data: [P; DATA_LINES],
    select: E,
    identification: E,
    settings: E,
    debounce_ms: u64,
    /// Matrix edges before this time are bounce
    holdoff_until: Option<u64>,
    /// Matrix edges dropped as bounce
    bounces: u32,
}

impl<P: InputPin, E: EdgeInput> Keypad<P, E> {
    pub fn new(
        data: [P; DATA_LINES],
        select: E,
        identification: E,
        settings: E,
        config: &KeypadConfig,
    ) -> Self {
        Self {
            data,
            select,
            identification,
            settings,
            debounce_ms: config.debounce_ms as u64,
            holdoff_until: None,
            bounces: 0,
        }
    }

    /// Sample the lines once
    ///
    /// At most one key is returned per call. Other latched edges stay
    /// latched and are picked up by the following calls.
    pub fn poll(&mut self, now_ms: u64) -> Option<KeyCode> {
        if self.select.edge_detected() {
            match self.holdoff_until {
                Some(until) if now_ms < until => self.bounces += 1,
                _ => {
                    self.holdoff_until = Some(now_ms + self.debounce_ms);
                    return Some(decode(&self.data));
                }
            }
        }

        if self.identification.edge_detected() {
            return Some(KeyCode(CODE_IDENTIFICATION));
        }
        if self.settings.edge_detected() {
            return Some(KeyCode(CODE_SETTINGS));
        }
        None
    }

    /// Matrix edges ignored as bounce so far
    pub fn bounces(&self) -> u32 {
        self.bounces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use proptest::prelude::*;
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Clone, Default)]
    struct MockPin(Rc<Cell<bool>>);

    impl InputPin for MockPin {
        fn is_high(&self) -> bool {
            self.0.get()
        }
    }

    #[derive(Clone, Default)]
    struct MockEdge(Rc<Cell<bool>>);

    impl MockEdge {
        fn fire(&self) {
            self.0.set(true);
        }
    }

    impl EdgeInput for MockEdge {
        fn edge_detected(&mut self) -> bool {
            self.0.replace(false)
        }
    }

    struct Board {
        data: [MockPin; 4],
        select: MockEdge,
        ident: MockEdge,
        settings: MockEdge,
    }

    impl Board {
        fn new() -> (Self, Keypad<MockPin, MockEdge>) {
            let board = Board {
                data: Default::default(),
                select: MockEdge::default(),
                ident: MockEdge::default(),
                settings: MockEdge::default(),
            };
            let keypad = Keypad::new(
                board.data.clone(),
                board.select.clone(),
                board.ident.clone(),
                board.settings.clone(),
                &KeypadConfig::default(),
            );
            (board, keypad)
        }

        fn press(&self, code: u8) {
            for (p, line) in self.data.iter().enumerate() {
                line.0.set(code >> (3 - p) & 1 == 1);
            }
            self.select.fire();
        }
    }

    #[test]
    fn test_decode_msb_first() {
        let (board, mut keypad) = Board::new();
        board.press(0b1010);
        assert_eq!(keypad.poll(0), Some(KeyCode(10)));
        assert_eq!(keypad.poll(1), None);
    }

    #[test]
    fn test_function_lines_bypass_matrix() {
        let (board, mut keypad) = Board::new();
        board.data[0].0.set(true);
        board.ident.fire();
        assert_eq!(keypad.poll(0), Some(KeyCode(12)));
        board.settings.fire();
        assert_eq!(keypad.poll(0), Some(KeyCode(13)));
    }

    #[test]
    fn test_bounce_ignored() {
        let (board, mut keypad) = Board::new();
        board.press(5);
        assert_eq!(keypad.poll(100), Some(KeyCode(5)));

        board.press(5);
        assert_eq!(keypad.poll(101), None);
        assert_eq!(keypad.bounces(), 1);

        board.press(7);
        assert_eq!(keypad.poll(102), Some(KeyCode(7)));
    }

    #[test]
    fn test_function_keys_not_debounced_by_matrix() {
        let (board, mut keypad) = Board::new();
        board.press(3);
        assert_eq!(keypad.poll(10), Some(KeyCode(3)));
        board.ident.fire();
        assert_eq!(keypad.poll(10), Some(KeyCode(12)));
    }

    #[test]
    fn test_latched_edges_drain_in_order() {
        let (board, mut keypad) = Board::new();
        board.press(9);
        board.ident.fire();
        board.settings.fire();
        let keys: Vec<KeyCode> = core::iter::from_fn(|| keypad.poll(0)).collect();
        assert_eq!(keys, [KeyCode(9), KeyCode(12), KeyCode(13)]);
    }

    proptest! {
        #[test]
        fn prop_every_nibble_decodes(code in 0u8..16) {
            let (board, mut keypad) = Board::new();
            board.press(code);
            prop_assert_eq!(keypad.poll(0), Some(KeyCode(code)));
        }
    }
}
