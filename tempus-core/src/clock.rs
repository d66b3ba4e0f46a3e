//! Top-level clock controller
//!
//! Owns the register block and drives one read-decode-render-poll-dispatch
//! cycle per tick. The firmware loop stays thin: it reads the device when
//! asked, feeds raw button levels in, and performs whatever bus write the
//! tick decides on.

use crate::config::ClockConfig;
use crate::input::debounce::{Debouncer, LineLevels};
use crate::input::edit::{EditSession, EditStep};
use crate::registers::{ClockFields, RegisterBlock};
use crate::render::{digit_char, Renderer, LINE_ONE, LINE_TWO};
use crate::state::events::{ButtonEvent, Event};
use crate::state::machine::{ClockMode, State};
use crate::traits::display::CharDisplay;
use tempus_bus::link::CTRL_OSC_STOP;

/// Bus work a tick asks the firmware to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusRequest {
    /// Nothing to transfer
    None,
    /// Push this block to the device
    Write(RegisterBlock),
}

/// The clock controller
///
/// Single owner of the register block. An edit session borrows the decoded
/// fields exclusively for its duration; the block itself changes only on
/// commit and on stop-resume.
pub struct Clock {
    registers: RegisterBlock,
    mode: ClockMode,
    state: State,
    session: Option<EditSession>,
    debouncer: Debouncer,
    renderer: Renderer,
    notice_ticks: u16,
    notice_ticks_left: u16,
}

impl Clock {
    /// Create a controller holding the configured initial time
    pub fn new(config: ClockConfig) -> Self {
        let mut registers = RegisterBlock::zeroed();
        registers.control = CTRL_OSC_STOP;
        config.initial.encode_into(&mut registers);

        Self {
            registers,
            mode: ClockMode::Normal,
            state: State::Run,
            session: None,
            debouncer: Debouncer::new(config.settle_ticks),
            renderer: Renderer::new(),
            notice_ticks: config.notice_ticks,
            notice_ticks_left: 0,
        }
    }

    /// Current machine state
    pub fn state(&self) -> State {
        self.state
    }

    /// Current display mode
    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    /// The held register block
    pub fn registers(&self) -> &RegisterBlock {
        &self.registers
    }

    /// Whether the firmware should fetch the register block this cycle
    pub fn wants_time(&self) -> bool {
        self.state.reads_time()
    }

    /// The two power-on writes that start the chip
    ///
    /// The first block carries the initial time with the oscillator stop
    /// flag set; the second clears the flag so the chip starts counting.
    pub fn startup_sequence(&mut self) -> [RegisterBlock; 2] {
        let frozen = self.registers;
        self.registers.control = 0;
        [frozen, self.registers]
    }

    /// Run one main-loop cycle
    ///
    /// `fresh` is the block read this cycle, if [`Clock::wants_time`] asked
    /// for one. Returns the bus work to perform before the next tick.
    pub fn tick<D: CharDisplay>(
        &mut self,
        fresh: Option<RegisterBlock>,
        levels: LineLevels,
        display: &mut D,
    ) -> BusRequest {
        if self.state.reads_time() {
            if let Some(block) = fresh {
                self.registers = block;
            }
        }

        let event = self.debouncer.sample(levels);

        match self.state {
            State::Run => {
                let fields = ClockFields::decode(&self.registers);
                self.renderer.update(&fields, self.mode, display);
                self.dispatch_run(event, fields, display)
            }
            State::Stopped => {
                // Frozen until Btn1 again; the resume write rewinds the
                // chip to the held block.
                if event == ButtonEvent::Btn1 {
                    self.state = self.state.transition(Event::Resume);
                    BusRequest::Write(self.registers)
                } else {
                    BusRequest::None
                }
            }
            State::Editing => self.drive_session(event, display),
            State::Notice => {
                if self.notice_ticks_left > 0 {
                    self.notice_ticks_left -= 1;
                } else {
                    self.state = self.state.transition(Event::NoticeExpired);
                }
                BusRequest::None
            }
        }
    }

    fn dispatch_run<D: CharDisplay>(
        &mut self,
        event: ButtonEvent,
        fields: ClockFields,
        display: &mut D,
    ) -> BusRequest {
        match event {
            ButtonEvent::Btn1 => {
                self.state = self.state.transition(Event::Stop);
            }
            ButtonEvent::Btn2 => match self.mode {
                ClockMode::Normal => {
                    self.state = self.state.transition(Event::StartEdit);
                    let session = EditSession::new(fields);
                    display.move_cursor(session.cursor().column());
                    self.session = Some(session);
                }
                ClockMode::Binary => {
                    self.state = self.state.transition(Event::RefuseEdit);
                    self.notice_ticks_left = self.notice_ticks;
                    show_notice(display);
                }
            },
            ButtonEvent::Btn3 => {
                self.mode = self.mode.toggled();
            }
            ButtonEvent::None => {}
        }
        BusRequest::None
    }

    fn drive_session<D: CharDisplay>(
        &mut self,
        event: ButtonEvent,
        display: &mut D,
    ) -> BusRequest {
        let Some(session) = self.session.as_mut() else {
            self.state = State::Run;
            return BusRequest::None;
        };

        match session.handle(event) {
            EditStep::Pending => BusRequest::None,
            EditStep::Updated { column, value } => {
                display.move_cursor(column);
                display.write_char(digit_char(value));
                BusRequest::None
            }
            EditStep::Moved { column } => {
                display.move_cursor(column);
                BusRequest::None
            }
            EditStep::Committed(fields) => {
                fields.encode_into(&mut self.registers);
                self.session = None;
                self.state = self.state.transition(Event::CommitEdit);
                BusRequest::Write(self.registers)
            }
        }
    }
}

fn show_notice<D: CharDisplay>(display: &mut D) {
    display.clear();
    display.move_cursor(LINE_ONE);
    display.write_str("Cannot set time");
    display.move_cursor(LINE_TWO);
    display.write_str("in binary mode");
}
