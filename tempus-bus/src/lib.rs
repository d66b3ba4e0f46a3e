//! Software two-wire bus master and RTC link
//!
//! This crate implements the wire protocol between the clock and its RTC
//! chip. No hardware bus peripheral is assumed: the master generates start
//! and stop conditions and clocks every bit by driving two GPIO lines
//! directly, paced by an injected delay.
//!
//! # Protocol Overview
//!
//! Each transfer is one contiguous exchange framed by start/stop conditions:
//!
//! ```text
//! START ─ address key ─ [register offset] ─ data bytes ... ─ STOP
//!           (0xA0 write / 0xA1 read)
//! ```
//!
//! Every byte moves most-significant-bit first and is followed by one
//! acknowledgment clock. The master observes the device's acknowledgment but
//! never acts on it: a silent or misbehaving device yields wrong data, not an
//! error. That is the contract of the original hardware design and it is
//! preserved here.
//!
//! The [`master`] module holds the bit-level engine, the [`link`] module the
//! device addressing and block transfers layered on it.

#![no_std]
#![deny(unsafe_code)]

pub mod link;
pub mod master;

#[cfg(test)]
mod sim;

pub use link::{Direction, RtcLink};
pub use master::{Ack, BitBangBus, BusTiming, Phase};
