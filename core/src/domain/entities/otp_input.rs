//! Six-slot OTP input with a single focus cursor.

use ep_shared::validation::{is_otp_digit, OTP_LENGTH};

/// Number of slots in a verification code
pub const CODE_LENGTH: usize = OTP_LENGTH;

/// OTP input assembler
///
/// Owns one optional digit per slot and the index of the slot that currently
/// has keyboard focus. Rendering layers read `digits()` and
/// `focused_index()`; they never hold references into the slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpInput {
    slots: [Option<char>; CODE_LENGTH],
    focused: usize,
}

impl OtpInput {
    /// Create an empty input focused on the first slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a digit (or clear a slot with an empty value)
    ///
    /// A non-empty value moves focus to the next slot unless `index` is the
    /// last one. Out-of-range indexes and values that are not a single ASCII
    /// digit are ignored.
    ///
    /// # Returns
    ///
    /// `true` if the slot was written
    pub fn set_digit(&mut self, index: usize, value: &str) -> bool {
        if index >= CODE_LENGTH {
            return false;
        }

        let digit = if value.is_empty() {
            None
        } else if is_otp_digit(value) {
            value.chars().next()
        } else {
            return false;
        };

        self.slots[index] = digit;
        if digit.is_some() && index < CODE_LENGTH - 1 {
            self.focused = index + 1;
        }
        true
    }

    /// React to a backspace key press in slot `index`
    ///
    /// When the slot is already empty focus retreats one slot so the user can
    /// keep deleting backwards. Digit values are not touched here; the
    /// platform text field has already removed the character it held.
    ///
    /// # Returns
    ///
    /// `true` if focus moved
    pub fn handle_backspace(&mut self, index: usize) -> bool {
        if index == 0 || index >= CODE_LENGTH || self.slots[index].is_some() {
            return false;
        }
        self.focused = index - 1;
        true
    }

    /// Concatenate the slots in order
    pub fn assembled_code(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    /// Whether every slot holds a digit
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Number of slots holding a digit
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Index of the slot that has focus
    pub fn focused_index(&self) -> usize {
        self.focused
    }

    /// Copy of the slots for rendering
    pub fn digits(&self) -> [Option<char>; CODE_LENGTH] {
        self.slots
    }
}
