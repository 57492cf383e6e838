//! Emulated input lines
//!
//! All lines live in one shared [`LineBank`]. Each line can be claimed
//! once; a second claim fails like a pin already taken by another driver.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use kiosk_hal::{EdgeInput, InputPin};
use thiserror::Error;
use tracing::debug;

/// Encoder data lines
pub const DATA_LINE_COUNT: usize = 4;

/// Lines with a latched edge detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeLine {
    /// Encoder strobe
    Select,
    /// Identification button
    Identification,
    /// Settings button
    Settings,
}

impl EdgeLine {
    fn index(self) -> usize {
        match self {
            EdgeLine::Select => 0,
            EdgeLine::Identification => 1,
            EdgeLine::Settings => 2,
        }
    }

    /// Bit in the claim mask; data lines use bits 0-3
    fn claim_bit(self) -> u8 {
        DATA_LINE_COUNT as u8 + self.index() as u8
    }
}

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("input line {0} is already claimed")]
    LineInUse(u8),
    #[error("no data line {0}")]
    NoSuchLine(usize),
    #[error("failed to start stdin reader: {0}")]
    Stdin(#[from] std::io::Error),
}

#[derive(Debug, Default)]
struct BankState {
    levels: [bool; DATA_LINE_COUNT],
    latched: [bool; 3],
    claimed: u8,
}

/// Shared line state
#[derive(Debug, Clone, Default)]
pub struct LineBank {
    state: Arc<Mutex<BankState>>,
}

impl LineBank {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BankState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn claim(&self, bit: u8) -> Result<(), BoardError> {
        let mut state = self.lock();
        let mask = 1 << bit;
        if state.claimed & mask != 0 {
            return Err(BoardError::LineInUse(bit));
        }
        state.claimed |= mask;
        debug!(line = bit, "input line claimed");
        Ok(())
    }

    /// Claim a data line
    pub fn data_line(&self, index: usize) -> Result<ConsoleLine, BoardError> {
        if index >= DATA_LINE_COUNT {
            return Err(BoardError::NoSuchLine(index));
        }
        self.claim(index as u8)?;
        Ok(ConsoleLine {
            bank: self.clone(),
            index,
        })
    }

    /// Claim all data lines in order
    pub fn data_lines(&self) -> Result<[ConsoleLine; DATA_LINE_COUNT], BoardError> {
        Ok([
            self.data_line(0)?,
            self.data_line(1)?,
            self.data_line(2)?,
            self.data_line(3)?,
        ])
    }

    /// Claim an edge line
    pub fn edge_line(&self, line: EdgeLine) -> Result<ConsoleEdge, BoardError> {
        self.claim(line.claim_bit())?;
        Ok(ConsoleEdge {
            bank: self.clone(),
            line,
        })
    }

    /// Put a 4-bit code on the data lines and strobe select
    pub fn press_matrix(&self, code: u8) {
        let mut state = self.lock();
        for (p, level) in state.levels.iter_mut().enumerate() {
            *level = (code >> (DATA_LINE_COUNT - 1 - p)) & 1 == 1;
        }
        state.latched[EdgeLine::Select.index()] = true;
    }

    /// Pulse a dedicated button line
    pub fn press_line(&self, line: EdgeLine) {
        self.lock().latched[line.index()] = true;
    }
}

/// One encoder data line
#[derive(Debug)]
pub struct ConsoleLine {
    bank: LineBank,
    index: usize,
}

impl InputPin for ConsoleLine {
    fn is_high(&self) -> bool {
        self.bank.lock().levels[self.index]
    }
}

/// One edge-latched line
#[derive(Debug)]
pub struct ConsoleEdge {
    bank: LineBank,
    line: EdgeLine,
}

impl EdgeInput for ConsoleEdge {
    fn edge_detected(&mut self) -> bool {
        let mut state = self.bank.lock();
        std::mem::take(&mut state.latched[self.line.index()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_press_sets_levels_msb_first() {
        let bank = LineBank::new();
        let lines = bank.data_lines().unwrap();
        let mut select = bank.edge_line(EdgeLine::Select).unwrap();

        bank.press_matrix(0b1001);
        let levels: Vec<bool> = lines.iter().map(|l| l.is_high()).collect();
        assert_eq!(levels, [true, false, false, true]);
        assert!(select.edge_detected());
        assert!(!select.edge_detected());
    }

    #[test]
    fn test_double_claim_fails() {
        let bank = LineBank::new();
        let _first = bank.edge_line(EdgeLine::Settings).unwrap();
        assert!(matches!(
            bank.edge_line(EdgeLine::Settings),
            Err(BoardError::LineInUse(6))
        ));
        assert!(matches!(bank.data_line(4), Err(BoardError::NoSuchLine(4))));
    }

    #[test]
    fn test_button_lines_independent() {
        let bank = LineBank::new();
        let mut ident = bank.edge_line(EdgeLine::Identification).unwrap();
        let mut settings = bank.edge_line(EdgeLine::Settings).unwrap();
        bank.press_line(EdgeLine::Identification);
        assert!(!settings.edge_detected());
        assert!(ident.edge_detected());
    }
}
