//! State machine definition

use super::events::Event;

/// Display rendering mode
///
/// Affects rendering only; no register interaction is involved in a mode
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockMode {
    /// HH:MM:SS digits
    #[default]
    Normal,
    /// Minutes and seconds as nibble bit patterns
    Binary,
}

impl ClockMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            ClockMode::Normal => ClockMode::Binary,
            ClockMode::Binary => ClockMode::Normal,
        }
    }
}

/// Machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Reading, decoding, and rendering time every cycle
    Run,
    /// Display frozen; the RTC oscillator keeps counting underneath
    Stopped,
    /// Edit session in progress; the cursor walks the six digits
    Editing,
    /// "Cannot set time in binary mode" on screen for a fixed interval
    Notice,
}

impl State {
    /// Check if this state reads the device each cycle
    pub fn reads_time(&self) -> bool {
        matches!(self, State::Run)
    }

    /// Process an event and return the next state
    ///
    /// This is the core state transition logic. No state is terminal; the
    /// main loop is unbounded.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Run transitions
            (Run, Stop) => Stopped,
            (Run, StartEdit) => Editing,
            (Run, RefuseEdit) => Notice,

            // Stopped transitions
            (Stopped, Resume) => Run,

            // Editing transitions
            (Editing, CommitEdit) => Run,

            // Notice transitions
            (Notice, NoticeExpired) => Run,

            // Default: stay in current state
            _ => self,
        }
    }
}
