//! Clock state machine
//!
//! The top-level behavior of the clock is a function of the current state
//! and an event: running display, cosmetic stop, digit editing, and the
//! binary-mode refusal notice.

pub mod events;
pub mod machine;

pub use events::{ButtonEvent, Event};
pub use machine::{ClockMode, State};
