//! Button debounce state machine
//!
//! The three buttons are mechanical, active-low, and have no debounce
//! hardware. A press is trusted only after it survives a settle interval:
//! `Released -> Suspect -> Confirmed`, driven by discrete poll ticks so the
//! logic is deterministic under test without real delays.
//!
//! A held button re-arms through `Suspect` after every report, so repeats
//! are paced by the settle interval rather than the raw poll rate.

use crate::state::events::ButtonEvent;

/// Raw line levels of the three button inputs at one poll tick
///
/// `true` is the pulled-up idle level; a pressed button reads low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineLevels {
    pub btn1: bool,
    pub btn2: bool,
    pub btn3: bool,
}

impl LineLevels {
    /// All lines at the idle level
    pub const fn released() -> Self {
        Self {
            btn1: true,
            btn2: true,
            btn3: true,
        }
    }

    /// Highest-priority pressed button, Btn1 > Btn2 > Btn3
    fn first_pressed(&self) -> ButtonEvent {
        if !self.btn1 {
            ButtonEvent::Btn1
        } else if !self.btn2 {
            ButtonEvent::Btn2
        } else if !self.btn3 {
            ButtonEvent::Btn3
        } else {
            ButtonEvent::None
        }
    }

    fn is_pressed(&self, event: ButtonEvent) -> bool {
        match event {
            ButtonEvent::Btn1 => !self.btn1,
            ButtonEvent::Btn2 => !self.btn2,
            ButtonEvent::Btn3 => !self.btn3,
            ButtonEvent::None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebouncePhase {
    /// No press in sight
    Released,
    /// A line went low; waiting out the settle interval before trusting it
    Suspect {
        candidate: ButtonEvent,
        ticks_left: u8,
    },
    /// Press reported; waiting for release or the next repeat cycle
    Confirmed(ButtonEvent),
}

/// Tick-driven debouncer over the three button lines
pub struct Debouncer {
    phase: DebouncePhase,
    settle_ticks: u8,
}

impl Debouncer {
    /// Create a debouncer that re-samples after `settle_ticks` poll ticks
    pub fn new(settle_ticks: u8) -> Self {
        Self {
            phase: DebouncePhase::Released,
            settle_ticks,
        }
    }

    /// Feed one poll tick of raw line levels
    ///
    /// Returns the debounced event for this tick; [`ButtonEvent::None`]
    /// while idle, settling, or when a suspected press turns out to be
    /// bounce.
    pub fn sample(&mut self, levels: LineLevels) -> ButtonEvent {
        match self.phase {
            DebouncePhase::Released => {
                let candidate = levels.first_pressed();
                if candidate != ButtonEvent::None {
                    self.phase = DebouncePhase::Suspect {
                        candidate,
                        ticks_left: self.settle_ticks,
                    };
                }
                ButtonEvent::None
            }
            DebouncePhase::Suspect {
                candidate,
                ticks_left,
            } => {
                if ticks_left > 0 {
                    self.phase = DebouncePhase::Suspect {
                        candidate,
                        ticks_left: ticks_left - 1,
                    };
                    return ButtonEvent::None;
                }
                // Settle interval over: trust the line only if it still
                // reads pressed.
                if levels.is_pressed(candidate) {
                    self.phase = DebouncePhase::Confirmed(candidate);
                    candidate
                } else {
                    self.phase = DebouncePhase::Released;
                    ButtonEvent::None
                }
            }
            DebouncePhase::Confirmed(button) => {
                if levels.is_pressed(button) {
                    self.phase = DebouncePhase::Suspect {
                        candidate: button,
                        ticks_left: self.settle_ticks,
                    };
                } else {
                    self.phase = DebouncePhase::Released;
                }
                ButtonEvent::None
            }
        }
    }
}
