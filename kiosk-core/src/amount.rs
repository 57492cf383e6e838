//! Amount entry rules
//!
//! The amount is typed digit by digit from the left. The value is capped at
//! [`MAX_AMOUNT`] and a zero as the first digit is rejected, so the number
//! of digits entered always equals the number of decimal digits in the
//! amount.

/// Largest amount that can be entered
pub const MAX_AMOUNT: u16 = 999;

/// LCD row holding the amount
pub const AMOUNT_ROW: u8 = 1;

/// Column of the last integer digit; the ",00" suffix follows it
pub const AMOUNT_CURSOR_COL: u8 = 12;

/// Result of pressing a digit key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitOutcome {
    /// Digit appended; redraw the amount starting at `col`
    Accepted { col: u8 },
    /// Zero pressed with nothing entered
    LeadingZero,
    /// Appending would exceed [`MAX_AMOUNT`]
    Overflow,
}

/// Amount entry state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AmountEntry {
    amount: u16,
    digits: u8,
}

impl AmountEntry {
    pub const fn new() -> Self {
        Self {
            amount: 0,
            digits: 0,
        }
    }

    /// Current amount
    pub fn amount(&self) -> u16 {
        self.amount
    }

    /// Whether anything has been typed
    pub fn has_input(&self) -> bool {
        self.digits > 0 || self.amount > 0
    }

    /// Append a digit (0-9)
    pub fn push_digit(&mut self, digit: u8) -> DigitOutcome {
        debug_assert!(digit <= 9);

        if digit == 0 && self.digits == 0 {
            return DigitOutcome::LeadingZero;
        }

        let next = self.amount as u32 * 10 + digit as u32;
        if next > MAX_AMOUNT as u32 {
            return DigitOutcome::Overflow;
        }

        let col = AMOUNT_CURSOR_COL - self.digits;
        self.amount = next as u16;
        self.digits += 1;
        DigitOutcome::Accepted { col }
    }

    /// Back to zero
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Column where the full amount text starts
    pub fn start_col(&self) -> u8 {
        AMOUNT_CURSOR_COL - self.digits.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_digits_accumulate() {
        let mut entry = AmountEntry::new();
        assert_eq!(entry.push_digit(1), DigitOutcome::Accepted { col: 12 });
        assert_eq!(entry.push_digit(2), DigitOutcome::Accepted { col: 11 });
        assert_eq!(entry.push_digit(0), DigitOutcome::Accepted { col: 10 });
        assert_eq!(entry.amount(), 120);
        assert_eq!(entry.start_col(), 10);
    }

    #[test]
    fn test_leading_zero_rejected() {
        let mut entry = AmountEntry::new();
        assert_eq!(entry.push_digit(0), DigitOutcome::LeadingZero);
        assert_eq!(entry.amount(), 0);
        assert!(!entry.has_input());
        assert_eq!(entry.start_col(), AMOUNT_CURSOR_COL);
    }

    #[test]
    fn test_fourth_digit_rejected() {
        let mut entry = AmountEntry::new();
        for d in [9, 9, 9] {
            entry.push_digit(d);
        }
        assert_eq!(entry.push_digit(1), DigitOutcome::Overflow);
        assert_eq!(entry.amount(), 999);
        assert_eq!(entry.digits, 3);
    }

    #[test]
    fn test_reset() {
        let mut entry = AmountEntry::new();
        entry.push_digit(5);
        entry.reset();
        assert_eq!(entry, AmountEntry::new());
    }

    proptest! {
        #[test]
        fn prop_amount_never_exceeds_max(digits in proptest::collection::vec(0u8..=9, 0..12)) {
            let mut entry = AmountEntry::new();
            for d in digits {
                entry.push_digit(d);
                prop_assert!(entry.amount() <= MAX_AMOUNT);
            }
        }

        #[test]
        fn prop_digit_count_matches_amount(digits in proptest::collection::vec(0u8..=9, 0..12)) {
            let mut entry = AmountEntry::new();
            for d in digits {
                entry.push_digit(d);
            }
            let expected = match entry.amount() {
                0 => 0,
                1..=9 => 1,
                10..=99 => 2,
                _ => 3,
            };
            prop_assert_eq!(entry.digits, expected);
        }

        #[test]
        fn prop_leading_zeros_ignored(zeros in 1usize..5, d in 1u8..=9) {
            let mut entry = AmountEntry::new();
            for _ in 0..zeros {
                prop_assert_eq!(entry.push_digit(0), DigitOutcome::LeadingZero);
            }
            entry.push_digit(d);
            prop_assert_eq!(entry.amount(), d as u16);
        }
    }
}
