//! Clock configuration
//!
//! Compile-time tunables for the firmware build. Tick counts are in units
//! of one main-loop iteration; the loop pacing itself belongs to the
//! firmware binary.

use crate::registers::ClockFields;

/// Controller configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// Time written to the chip at power-on
    pub initial: ClockFields,
    /// Poll ticks a suspected press must survive before it is trusted
    pub settle_ticks: u8,
    /// Poll ticks the binary-mode refusal notice stays on screen
    pub notice_ticks: u16,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            initial: ClockFields::from_hms(12, 0, 0),
            settle_ticks: 1,
            notice_ticks: 20,
        }
    }
}
