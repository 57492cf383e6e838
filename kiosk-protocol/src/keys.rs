//! Key codes produced by the keypad

/// Raw 4-bit key code as read from the keypad lines
///
/// Codes 0-13 are assigned; 14 and 15 can be produced by the matrix but
/// have no meaning and are rejected by [`KeyEvent::from_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u8);

/// Wire values
pub const CODE_CONFIRM: u8 = 10;
pub const CODE_CLEAR: u8 = 11;
pub const CODE_IDENTIFICATION: u8 = 12;
pub const CODE_SETTINGS: u8 = 13;

/// Highest code the 4-bit matrix can produce
pub const CODE_MAX: u8 = 0x0F;

/// Logical keypress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Digit key 0-9
    Digit(u8),
    /// '#' key, send the entered amount
    Confirm,
    /// '*' key, reset the entered amount
    Clear,
    /// Dedicated identification button
    Identification,
    /// Dedicated settings button
    Settings,
}

impl KeyEvent {
    /// Decode a raw code, `None` for unassigned codes
    pub fn from_code(code: KeyCode) -> Option<Self> {
        match code.0 {
            d @ 0..=9 => Some(KeyEvent::Digit(d)),
            CODE_CONFIRM => Some(KeyEvent::Confirm),
            CODE_CLEAR => Some(KeyEvent::Clear),
            CODE_IDENTIFICATION => Some(KeyEvent::Identification),
            CODE_SETTINGS => Some(KeyEvent::Settings),
            _ => None,
        }
    }

    /// Convert back to the raw code
    pub fn code(self) -> KeyCode {
        KeyCode(match self {
            KeyEvent::Digit(d) => d,
            KeyEvent::Confirm => CODE_CONFIRM,
            KeyEvent::Clear => CODE_CLEAR,
            KeyEvent::Identification => CODE_IDENTIFICATION,
            KeyEvent::Settings => CODE_SETTINGS,
        })
    }
}

impl From<KeyEvent> for KeyCode {
    fn from(event: KeyEvent) -> Self {
        event.code()
    }
}
