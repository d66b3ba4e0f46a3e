//! ST7032 character LCD driver (4-bit parallel mode)
//!
//! Drives the controller through four data lines plus register-select and
//! enable. Commands and data travel as two strobed nibbles, high nibble
//! first. The extended instruction table carries the contrast, power, and
//! follower setup; the 3.3 V panel variant needs its own oscillator,
//! booster, and follower values.

use tempus_core::traits::display::CharDisplay;
use tempus_hal::{Delay, OutputPin};

/// ST7032 commands
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const ENTRY_MODE: u8 = 0x06;
    pub const DISPLAY_ON_CURSOR: u8 = 0x0E;
    pub const DISPLAY_ON_CURSOR_BLINK: u8 = 0x0F;
    pub const OSC_FREQ: u8 = 0x1D;
    pub const OSC_FREQ_3V3: u8 = 0x1F;
    pub const FUNCTION_SET: u8 = 0x28;
    pub const FUNCTION_SET_EXT: u8 = 0x29;
    pub const POWER_ICON: u8 = 0x50;
    pub const POWER_ICON_3V3: u8 = 0x54;
    pub const FOLLOWER: u8 = 0x6C;
    pub const FOLLOWER_3V3: u8 = 0x6E;
    pub const CONTRAST: u8 = 0x79;
    pub const SET_DDRAM: u8 = 0x80;
}

/// Panel supply voltage, selecting the matching init sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SupplyVoltage {
    /// 5 V panel
    V5,
    /// 3.3 V panel; needs the internal booster configured
    V3_3,
}

/// ST7032 driver over six output pins
///
/// `data` holds D4..D7 in ascending order. All pin writes are push-pull;
/// the controller's busy flag is never read - fixed delays pace every
/// transfer instead.
pub struct St7032<P, D> {
    rs: P,
    en: P,
    data: [P; 4],
    delay: D,
}

impl<P, D> St7032<P, D>
where
    P: OutputPin,
    D: Delay,
{
    /// Create a driver over the given pins
    pub fn new(rs: P, en: P, data: [P; 4], delay: D) -> Self {
        Self {
            rs,
            en,
            data,
            delay,
        }
    }

    /// Power-on initialization
    ///
    /// Forces the controller into 8-bit mode three times, drops to 4-bit
    /// mode, then programs the extended instruction table for the selected
    /// panel voltage.
    pub fn init(&mut self, supply: SupplyVoltage) {
        self.rs.set_low();
        self.delay.delay_ms(60);

        // Function-set by nibble while the interface width is unknown.
        self.set_data(0x03);
        self.strobe();
        self.delay.delay_ms(10);
        self.strobe();
        self.delay.delay_us(50);
        self.strobe();
        self.delay.delay_us(50);

        // Switch to 4-bit transfers; full bytes from here on.
        self.set_data(0x02);
        self.strobe();
        self.delay.delay_us(50);

        self.command(cmd::FUNCTION_SET_EXT);
        match supply {
            SupplyVoltage::V5 => {
                self.command(cmd::OSC_FREQ);
                self.command(cmd::CONTRAST);
                self.command(cmd::POWER_ICON);
                self.command(cmd::FOLLOWER);
            }
            SupplyVoltage::V3_3 => {
                self.command(cmd::OSC_FREQ_3V3);
                self.command(cmd::CONTRAST);
                self.command(cmd::POWER_ICON_3V3);
                self.command(cmd::FOLLOWER_3V3);
            }
        }
        self.command(cmd::FUNCTION_SET);
        self.command(match supply {
            SupplyVoltage::V5 => cmd::DISPLAY_ON_CURSOR,
            SupplyVoltage::V3_3 => cmd::DISPLAY_ON_CURSOR_BLINK,
        });
        self.command(cmd::CLEAR);
        self.delay.delay_ms(2);
        self.command(cmd::ENTRY_MODE);
    }

    fn set_data(&mut self, nibble: u8) {
        for (i, pin) in self.data.iter_mut().enumerate() {
            pin.set_state(nibble & (1 << i) != 0);
        }
    }

    fn strobe(&mut self) {
        self.delay.delay_us(2);
        self.en.set_high();
        self.delay.delay_us(2);
        self.en.set_low();
        self.delay.delay_us(2);
    }

    fn write_raw(&mut self, byte: u8, rs: bool) {
        self.rs.set_state(rs);
        self.set_data(byte >> 4);
        self.strobe();
        self.delay.delay_us(2);
        self.set_data(byte & 0x0F);
        self.strobe();
        self.delay.delay_us(50);
    }

    fn command(&mut self, byte: u8) {
        self.write_raw(byte, false);
    }

    fn data(&mut self, byte: u8) {
        self.write_raw(byte, true);
    }
}

impl<P, D> CharDisplay for St7032<P, D>
where
    P: OutputPin,
    D: Delay,
{
    fn clear(&mut self) {
        self.command(cmd::CLEAR);
        self.delay.delay_ms(2);
    }

    fn move_cursor(&mut self, pos: u8) {
        self.command(cmd::SET_DDRAM | pos);
    }

    fn write_char(&mut self, c: char) {
        // The character generator is ASCII-compatible; anything beyond it
        // renders as a placeholder.
        let byte = if c.is_ascii() { c as u8 } else { b'?' };
        self.data(byte);
    }
}
