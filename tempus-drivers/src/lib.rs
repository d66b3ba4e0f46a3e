//! Hardware driver implementations
//!
//! Concrete drivers for the clock's peripherals, generic over the traits
//! defined in tempus-hal and implementing the capabilities tempus-core
//! draws through:
//!
//! - ST7032 character LCD in 4-bit parallel mode

#![no_std]
#![deny(unsafe_code)]

pub mod st7032;
