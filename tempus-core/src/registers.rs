//! RTC register block and BCD time fields
//!
//! The chip exposes its timekeeping state as five consecutive registers,
//! read and written as one contiguous block. Seconds, minutes, and hours
//! pack two binary-coded-decimal nibbles per byte; control and milliseconds
//! pass through this model untouched.

use tempus_bus::link::BLOCK_LEN;

/// The five-register block as held by the clock chip
///
/// This is the single shared time representation: the controller owns one
/// instance, refreshed from the device each running cycle and pushed back
/// whenever the user commits an edit or resumes from a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterBlock {
    /// Control register; bit 7 stops the oscillator
    pub control: u8,
    /// Milliseconds counter, initialized to zero and otherwise ignored
    pub milliseconds: u8,
    /// Seconds, packed BCD
    pub seconds: u8,
    /// Minutes, packed BCD
    pub minutes: u8,
    /// Hours, packed BCD
    pub hours: u8,
}

impl RegisterBlock {
    /// All-zero block
    pub const fn zeroed() -> Self {
        Self {
            control: 0,
            milliseconds: 0,
            seconds: 0,
            minutes: 0,
            hours: 0,
        }
    }

    /// Wire layout, in register order
    pub fn to_bytes(&self) -> [u8; BLOCK_LEN] {
        [
            self.control,
            self.milliseconds,
            self.seconds,
            self.minutes,
            self.hours,
        ]
    }

    /// Rebuild from the wire layout
    pub fn from_bytes(bytes: [u8; BLOCK_LEN]) -> Self {
        Self {
            control: bytes[0],
            milliseconds: bytes[1],
            seconds: bytes[2],
            minutes: bytes[3],
            hours: bytes[4],
        }
    }
}

/// The six decoded BCD digits of the displayed time
///
/// Time reads TD:TD:TD in HH:MM:SS order, tens nibble first. Each field
/// holds one decimal digit; `tens * 10 + digit` is the field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockFields {
    pub hour_tens: u8,
    pub hour_digit: u8,
    pub minute_tens: u8,
    pub minute_digit: u8,
    pub second_tens: u8,
    pub second_digit: u8,
}

impl ClockFields {
    /// Build fields from a wall-clock time
    pub const fn from_hms(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self {
            hour_tens: hours / 10,
            hour_digit: hours % 10,
            minute_tens: minutes / 10,
            minute_digit: minutes % 10,
            second_tens: seconds / 10,
            second_digit: seconds % 10,
        }
    }

    /// Split the BCD bytes of a register block into digit pairs
    pub fn decode(block: &RegisterBlock) -> Self {
        Self {
            hour_tens: (block.hours & 0xF0) >> 4,
            hour_digit: block.hours & 0x0F,
            minute_tens: (block.minutes & 0xF0) >> 4,
            minute_digit: block.minutes & 0x0F,
            second_tens: (block.seconds & 0xF0) >> 4,
            second_digit: block.seconds & 0x0F,
        }
    }

    /// Pack the digits back into a register block
    ///
    /// Control and milliseconds are left exactly as the block holds them.
    pub fn encode_into(&self, block: &mut RegisterBlock) {
        block.seconds = (self.second_tens << 4) | self.second_digit;
        block.minutes = (self.minute_tens << 4) | self.minute_digit;
        block.hours = (self.hour_tens << 4) | self.hour_digit;
    }
}
