//! Tempus Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs (RP2040, etc.). This enables the bus engine, the
//! drivers, and the clock logic to run unchanged on different hardware -
//! including mock lines in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (tempus-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tempus-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ tempus-hal-   │       │ mock lines    │
//! │    rp2040     │       │ (host tests)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`gpio::BusPin`] - Releasable data line for the software bus
//! - [`delay::Delay`] - Blocking busy-wait pacing

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use delay::Delay;
pub use gpio::{BusPin, InputPin, OutputPin};
