//! Display rendering
//!
//! Draws the decoded time in the active mode. The screen is rewritten only
//! when the second digit has changed since the previous decode, so a poll
//! cycle that lands inside the same second is a no-op.

use crate::registers::ClockFields;
use crate::state::machine::ClockMode;
use crate::traits::display::CharDisplay;

/// First character of line one
pub const LINE_ONE: u8 = 0;

/// First character of line two
pub const LINE_TWO: u8 = 40;

/// ASCII digit for a BCD field value
pub(crate) fn digit_char(value: u8) -> char {
    (b'0' + value) as char
}

/// Write a nibble as four bit characters, bit 3 first
///
/// A set bit renders as `*`, a clear bit as `o`; 0b0101 comes out `o*o*`.
pub fn print_binary<D: CharDisplay>(display: &mut D, value: u8) {
    let mut mask = 0x08u8;
    while mask != 0 {
        display.write_char(if value & mask != 0 { '*' } else { 'o' });
        mask >>= 1;
    }
}

/// Mode-aware renderer with second-change detection
pub struct Renderer {
    last_second_digit: Option<u8>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a renderer that has drawn nothing yet
    pub fn new() -> Self {
        Self {
            last_second_digit: None,
        }
    }

    /// Redraw the display if the second digit moved since the last call
    ///
    /// Returns whether a redraw happened.
    pub fn update<D: CharDisplay>(
        &mut self,
        fields: &ClockFields,
        mode: ClockMode,
        display: &mut D,
    ) -> bool {
        if self.last_second_digit == Some(fields.second_digit) {
            return false;
        }
        self.last_second_digit = Some(fields.second_digit);

        match mode {
            ClockMode::Normal => draw_normal(fields, display),
            ClockMode::Binary => draw_binary(fields, display),
        }
        true
    }
}

fn draw_normal<D: CharDisplay>(fields: &ClockFields, display: &mut D) {
    display.clear();
    display.move_cursor(LINE_ONE);
    display.write_char(digit_char(fields.hour_tens));
    display.write_char(digit_char(fields.hour_digit));
    display.write_char(':');
    display.write_char(digit_char(fields.minute_tens));
    display.write_char(digit_char(fields.minute_digit));
    display.write_char(':');
    display.write_char(digit_char(fields.second_tens));
    display.write_char(digit_char(fields.second_digit));
}

fn draw_binary<D: CharDisplay>(fields: &ClockFields, display: &mut D) {
    display.clear();

    // Minutes on line one: both nibbles as bits, then as digits.
    display.move_cursor(LINE_ONE);
    print_binary(display, fields.minute_tens);
    display.write_char('|');
    print_binary(display, fields.minute_digit);
    display.write_char(' ');
    display.write_char(digit_char(fields.minute_tens));
    display.write_char(digit_char(fields.minute_digit));

    // Seconds on line two, same layout.
    display.move_cursor(LINE_TWO);
    print_binary(display, fields.second_tens);
    display.write_char('|');
    print_binary(display, fields.second_digit);
    display.write_char(' ');
    display.write_char(digit_char(fields.second_tens));
    display.write_char(digit_char(fields.second_digit));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{DisplayOp, MockDisplay};

    #[test]
    fn test_print_binary_bit_order() {
        let mut display = MockDisplay::new();
        print_binary(&mut display, 0b0101);
        assert_eq!(display.text(), "o*o*");
    }

    #[test]
    fn test_normal_render_of_midday() {
        let fields = ClockFields::from_hms(12, 0, 0);
        let mut display = MockDisplay::new();
        let mut renderer = Renderer::new();

        assert!(renderer.update(&fields, ClockMode::Normal, &mut display));
        assert_eq!(display.ops[0], DisplayOp::Clear);
        assert_eq!(display.ops[1], DisplayOp::MoveTo(LINE_ONE));
        assert_eq!(display.text(), "12:00:00");
    }

    #[test]
    fn test_redraw_only_on_second_change() {
        let mut display = MockDisplay::new();
        let mut renderer = Renderer::new();

        let fields = ClockFields::from_hms(8, 30, 7);
        assert!(renderer.update(&fields, ClockMode::Normal, &mut display));
        // Same second: nothing happens, even if other fields moved.
        let same_second = ClockFields::from_hms(9, 41, 17);
        assert!(!renderer.update(&same_second, ClockMode::Normal, &mut display));

        let next_second = ClockFields::from_hms(8, 30, 8);
        assert!(renderer.update(&next_second, ClockMode::Normal, &mut display));
    }

    #[test]
    fn test_binary_render_layout() {
        let fields = ClockFields::from_hms(0, 38, 52);
        let mut display = MockDisplay::new();
        let mut renderer = Renderer::new();

        renderer.update(&fields, ClockMode::Binary, &mut display);

        // minute_tens 3, minute_digit 8, second_tens 5, second_digit 2
        assert_eq!(display.text(), "oo**|*ooo 38o*o*|oo*o 52");
        assert!(display.ops.contains(&DisplayOp::MoveTo(LINE_TWO)));
    }
}
