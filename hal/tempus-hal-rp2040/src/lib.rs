//! RP2040-specific HAL for the Tempus clock firmware
//!
//! This crate provides RP2040 implementations of the shared `tempus-hal`
//! traits over embassy-rp GPIO:
//!
//! - [`gpio::BusLine`] - releasable bus line on a `Flex` pin
//! - [`gpio::PushPull`] - plain output for display control lines
//! - [`gpio::ButtonLine`] - pulled-up button input

#![no_std]

pub mod gpio;

pub use gpio::{BusLine, ButtonLine, PushPull};
