//! Bit-level bus master
//!
//! Generates start/stop conditions and clocks bits on two software-driven
//! lines. All operations are blocking busy-waits; the inter-edge pacing comes
//! from an injected [`Delay`] and a fixed [`BusTiming`] quantum.

use tempus_hal::{BusPin, Delay, OutputPin};

/// Inter-edge pacing for the software bus
///
/// One quantum separates consecutive line edges. There is no calibration
/// loop: the quantum is fixed at construction.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusTiming {
    /// Delay between line edges in microseconds
    pub quantum_us: u32,
}

impl Default for BusTiming {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl BusTiming {
    /// Roughly standard-mode pacing (~100 kHz clock)
    pub const STANDARD: Self = Self { quantum_us: 5 };

    /// Conservative pacing for long or noisy wiring
    pub const RELAXED: Self = Self { quantum_us: 50 };
}

/// Acknowledgment level on the ninth clock of a byte
///
/// When writing, this is the level the device answered with. When reading,
/// it is the level the master drives: `Ack` asks for more bytes, `Nack`
/// marks the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ack {
    /// Line pulled low - acknowledged / more bytes follow
    Ack,
    /// Line left high - not acknowledged / last byte
    Nack,
}

impl Ack {
    /// Check if this observation is an acknowledgment
    pub fn is_acked(self) -> bool {
        matches!(self, Ack::Ack)
    }
}

/// Transfer phase of the bus engine
///
/// The engine keeps explicit track of where a transfer stands so tests and
/// diagnostics can observe progress. The first byte after a start condition
/// carries the address key, every later byte is data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No transfer in flight
    Idle,
    /// Start condition issued, no byte clocked yet
    Start,
    /// Clocking the address key
    Address {
        /// Bit index within the byte, 0 = MSB
        bit: u8,
    },
    /// Clocking a data byte
    Data {
        /// Data byte index within the transfer (address byte excluded)
        byte: u8,
        /// Bit index within the byte, 0 = MSB
        bit: u8,
    },
    /// Ninth clock of a byte
    AckPulse {
        /// Byte index within the transfer, address byte included
        byte: u8,
    },
    /// Stop condition in progress
    Stop,
}

/// Software bus master over two GPIO lines
///
/// `Scl` is the clock line (always master-driven), `Sda` the data line,
/// which the master must release for reads and acknowledgment pulses.
///
/// There is no bus-error detection: a non-responding or glitching device
/// yields silently wrong data with no retry or timeout.
pub struct BitBangBus<Scl, Sda, D> {
    scl: Scl,
    sda: Sda,
    delay: D,
    timing: BusTiming,
    phase: Phase,
    byte_index: u8,
}

impl<Scl, Sda, D> BitBangBus<Scl, Sda, D>
where
    Scl: OutputPin,
    Sda: BusPin,
    D: Delay,
{
    /// Create a new master over the given lines
    pub fn new(scl: Scl, sda: Sda, delay: D, timing: BusTiming) -> Self {
        Self {
            scl,
            sda,
            delay,
            timing,
            phase: Phase::Idle,
            byte_index: 0,
        }
    }

    /// Current transfer phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn pace(&mut self) {
        self.delay.delay_us(self.timing.quantum_us);
    }

    /// Generate a start condition
    ///
    /// Both lines go high, then the data line falls while the clock line is
    /// held high.
    pub fn start(&mut self) {
        self.scl.set_high();
        self.pace();
        self.sda.set_high();
        self.pace();
        self.sda.set_low();
        self.pace();
        self.scl.set_low();
        self.phase = Phase::Start;
        self.byte_index = 0;
    }

    /// Generate a stop condition
    ///
    /// The data line goes low, then rises while the clock line is held high.
    pub fn stop(&mut self) {
        self.phase = Phase::Stop;
        self.sda.set_low();
        self.pace();
        self.scl.set_low();
        self.pace();
        self.scl.set_high();
        self.pace();
        self.sda.set_high();
        self.phase = Phase::Idle;
        self.byte_index = 0;
    }

    /// Clock one bit out
    ///
    /// The data line is set before the rising clock edge.
    pub fn write_bit(&mut self, bit: bool) {
        self.sda.set_state(bit);
        self.pace();
        self.scl.set_high();
        self.pace();
        self.scl.set_low();
    }

    /// Clock one bit in
    ///
    /// The line is sampled after the rising clock edge. The caller must have
    /// released the data line first.
    pub fn read_bit(&mut self) -> bool {
        self.scl.set_high();
        self.pace();
        let bit = self.sda.is_high();
        self.scl.set_low();
        self.pace();
        bit
    }

    /// Write one byte, most-significant-bit first
    ///
    /// After the eight data bits the master releases the data line and runs
    /// one acknowledgment clock, sampling the device's answer while the
    /// clock is high. The observation is returned for diagnostics only;
    /// protocol callers discard it and carry on regardless.
    pub fn write_byte(&mut self, byte: u8) -> Ack {
        for bit in 0..8 {
            self.set_bit_phase(bit);
            self.write_bit(byte & (0x80 >> bit) != 0);
        }

        // Ninth clock: the device answers on the released line.
        self.phase = Phase::AckPulse {
            byte: self.byte_index,
        };
        self.sda.release();
        self.scl.set_high();
        self.pace();
        let ack = if self.sda.is_high() { Ack::Nack } else { Ack::Ack };
        self.scl.set_low();
        self.pace();
        self.sda.set_low();
        self.byte_index += 1;
        ack
    }

    /// Read one byte, most-significant-bit first
    ///
    /// The ninth clock carries the master's answer: [`Ack::Ack`] asks the
    /// device for another byte, [`Ack::Nack`] ends the read.
    pub fn read_byte(&mut self, ack: Ack) -> u8 {
        self.sda.release();
        self.pace();

        let mut byte = 0u8;
        for bit in 0..8 {
            self.set_bit_phase(bit);
            byte = (byte << 1) | u8::from(self.read_bit());
        }

        // Ninth clock: drive the response level, then pulse the clock.
        self.phase = Phase::AckPulse {
            byte: self.byte_index,
        };
        match ack {
            Ack::Ack => self.sda.set_low(),
            Ack::Nack => self.sda.set_high(),
        }
        self.pace();
        self.scl.set_high();
        self.pace();
        self.scl.set_low();
        self.byte_index += 1;
        byte
    }

    fn set_bit_phase(&mut self, bit: u8) {
        self.phase = if self.byte_index == 0 {
            Phase::Address { bit }
        } else {
            Phase::Data {
                byte: self.byte_index - 1,
                bit,
            }
        };
    }
}
