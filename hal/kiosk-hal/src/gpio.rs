//! GPIO input abstractions
//!
//! Provides traits for the digital inputs the keypad is wired to.

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific board.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Read the pin as a bit (1 = high)
    fn bit(&self) -> u8 {
        self.is_high() as u8
    }
}

/// Input with a latched falling-edge detector
///
/// The keypad encoder and the function buttons pull their lines low to
/// signal a press. The latch is set by the hardware (or its emulation) and
/// cleared when read, so an edge is reported exactly once.
pub trait EdgeInput {
    /// Returns true, and clears the latch, if a falling edge occurred since
    /// the last call
    fn edge_detected(&mut self) -> bool;
}
