//! Simulated bus wire and slave device for host tests
//!
//! [`Wire`] models the two shared lines plus a register-file slave hanging
//! off them. The mock pin handles feed every master edge into the model, so
//! the slave decodes start/stop conditions and byte transfers exactly the
//! way the real chip would: bit-by-bit, at clock edges.
//!
//! The data line resolves like an open-drain net: released by everyone it
//! floats high, driven low by anyone it reads low.

use core::cell::RefCell;

use heapless::Vec;
use tempus_hal::{BusPin, InputPin, OutputPin};

/// Registers in the simulated device
pub const REG_COUNT: usize = 8;

/// Decoded wire activity, in occurrence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// Start condition (data fell while clock high)
    Start,
    /// Stop condition (data rose while clock high)
    Stop,
    /// Byte captured from the master
    ByteIn(u8),
    /// Byte served to the master
    ByteOut(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlavePhase {
    /// Not addressed, waiting for a start condition
    Idle,
    /// Shifting a byte in from the master
    ReceiveBits,
    /// Byte complete, acknowledgment drive begins on the next falling edge
    AckPending,
    /// Driving the line low through the acknowledgment clock
    AckDriven,
    /// Shifting a register byte out to the master
    ServeBits,
    /// Waiting for the master's acknowledgment level on the ninth clock
    AckSample,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlaveMode {
    /// Next byte is the address key
    AwaitAddress,
    /// Addressed for write, next byte selects the register
    AwaitOffset,
    /// Writing into consecutive registers
    WriteData,
    /// Serving consecutive registers
    Read,
    /// Addressed with an unknown key; swallow bytes
    Ignore,
}

/// Shared two-line bus with an attached register-file slave
pub struct Wire {
    scl: bool,
    sda_master: Option<bool>,
    sda_slave: Option<bool>,
    phase: SlavePhase,
    mode: SlaveMode,
    regs: [u8; REG_COUNT],
    pointer: usize,
    recv_shift: u8,
    recv_count: u8,
    serve_shift: u8,
    serve_count: u8,
    ack_low: bool,
    /// Everything the slave decoded, in order
    pub trace: Vec<TraceEvent, 64>,
}

impl Wire {
    pub fn new() -> Self {
        Self {
            scl: false,
            sda_master: None,
            sda_slave: None,
            phase: SlavePhase::Idle,
            mode: SlaveMode::AwaitAddress,
            regs: [0; REG_COUNT],
            pointer: 0,
            recv_shift: 0,
            recv_count: 0,
            serve_shift: 0,
            serve_count: 0,
            ack_low: false,
            trace: Vec::new(),
        }
    }

    /// Register file of the simulated device
    pub fn slave_regs_mut(&mut self) -> &mut [u8; REG_COUNT] {
        &mut self.regs
    }

    /// Resolved data line level (open-drain AND of both drivers)
    pub fn line_level(&self) -> bool {
        self.sda_master.unwrap_or(true) && self.sda_slave.unwrap_or(true)
    }

    fn record(&mut self, event: TraceEvent) {
        let _ = self.trace.push(event);
    }

    fn set_scl(&mut self, level: bool) {
        if level == self.scl {
            return;
        }
        self.scl = level;
        if level {
            self.clock_rise();
        } else {
            self.clock_fall();
        }
    }

    fn set_sda_master(&mut self, drive: Option<bool>) {
        let before = self.line_level();
        self.sda_master = drive;
        let after = self.line_level();
        if self.scl && before != after {
            if after {
                self.record(TraceEvent::Stop);
                self.on_stop();
            } else {
                self.record(TraceEvent::Start);
                self.on_start();
            }
        }
    }

    fn on_start(&mut self) {
        self.phase = SlavePhase::ReceiveBits;
        self.mode = SlaveMode::AwaitAddress;
        self.recv_shift = 0;
        self.recv_count = 0;
        self.sda_slave = None;
    }

    fn on_stop(&mut self) {
        self.phase = SlavePhase::Idle;
        self.sda_slave = None;
    }

    fn clock_rise(&mut self) {
        match self.phase {
            SlavePhase::ReceiveBits => {
                self.recv_shift = (self.recv_shift << 1) | u8::from(self.line_level());
                self.recv_count += 1;
                if self.recv_count == 8 {
                    let byte = self.recv_shift;
                    self.record(TraceEvent::ByteIn(byte));
                    self.consume(byte);
                    self.phase = SlavePhase::AckPending;
                }
            }
            SlavePhase::AckSample => {
                self.ack_low = !self.line_level();
            }
            _ => {}
        }
    }

    fn clock_fall(&mut self) {
        match self.phase {
            SlavePhase::AckPending => {
                self.sda_slave = Some(false);
                self.phase = SlavePhase::AckDriven;
            }
            SlavePhase::AckDriven => {
                self.sda_slave = None;
                if self.mode == SlaveMode::Read {
                    self.load_serve_byte();
                } else {
                    self.recv_shift = 0;
                    self.recv_count = 0;
                    self.phase = SlavePhase::ReceiveBits;
                }
            }
            SlavePhase::ServeBits => {
                self.serve_count += 1;
                if self.serve_count == 8 {
                    self.record(TraceEvent::ByteOut(self.serve_shift));
                    self.sda_slave = None;
                    self.phase = SlavePhase::AckSample;
                } else {
                    self.drive_serve_bit();
                }
            }
            SlavePhase::AckSample => {
                if self.ack_low {
                    self.load_serve_byte();
                } else {
                    self.phase = SlavePhase::Idle;
                }
            }
            _ => {}
        }
    }

    fn consume(&mut self, byte: u8) {
        self.mode = match self.mode {
            SlaveMode::AwaitAddress => match byte {
                0xA0 => SlaveMode::AwaitOffset,
                0xA1 => SlaveMode::Read,
                _ => SlaveMode::Ignore,
            },
            SlaveMode::AwaitOffset => {
                self.pointer = byte as usize % REG_COUNT;
                SlaveMode::WriteData
            }
            SlaveMode::WriteData => {
                self.regs[self.pointer] = byte;
                self.pointer = (self.pointer + 1) % REG_COUNT;
                SlaveMode::WriteData
            }
            SlaveMode::Read | SlaveMode::Ignore => self.mode,
        };
    }

    fn load_serve_byte(&mut self) {
        self.serve_shift = self.regs[self.pointer];
        self.pointer = (self.pointer + 1) % REG_COUNT;
        self.serve_count = 0;
        self.phase = SlavePhase::ServeBits;
        self.drive_serve_bit();
    }

    fn drive_serve_bit(&mut self) {
        let bit = self.serve_shift & (0x80 >> self.serve_count) != 0;
        self.sda_slave = Some(bit);
    }
}

/// Clock line handle for the master under test
pub struct SclHandle<'a>(pub &'a RefCell<Wire>);

impl OutputPin for SclHandle<'_> {
    fn set_high(&mut self) {
        self.0.borrow_mut().set_scl(true);
    }

    fn set_low(&mut self) {
        self.0.borrow_mut().set_scl(false);
    }
}

/// Data line handle for the master under test
pub struct SdaHandle<'a>(pub &'a RefCell<Wire>);

impl OutputPin for SdaHandle<'_> {
    fn set_high(&mut self) {
        self.0.borrow_mut().set_sda_master(Some(true));
    }

    fn set_low(&mut self) {
        self.0.borrow_mut().set_sda_master(Some(false));
    }
}

impl InputPin for SdaHandle<'_> {
    fn is_high(&self) -> bool {
        self.0.borrow().line_level()
    }
}

impl BusPin for SdaHandle<'_> {
    fn release(&mut self) {
        self.0.borrow_mut().set_sda_master(None);
    }
}

/// Zero-cost delay for host tests
pub struct NoDelay;

impl embedded_hal::delay::DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
