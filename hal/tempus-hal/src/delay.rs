//! Blocking delay abstraction
//!
//! Every bus edge and display strobe in this firmware is paced by a fixed
//! busy-wait. The wait is injected through this trait so the protocol engine
//! and the drivers stay testable without real timing dependencies.

/// Blocking busy-wait delay
pub trait Delay {
    /// Block for at least `us` microseconds
    fn delay_us(&mut self, us: u32);

    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1_000);
        }
    }
}

// Any embedded-hal delay provider works as a Tempus delay. This covers
// embassy-time's Delay on the target and no-op delays in host tests.
impl<T: embedded_hal::delay::DelayNs> Delay for T {
    fn delay_us(&mut self, us: u32) {
        embedded_hal::delay::DelayNs::delay_us(self, us);
    }

    fn delay_ms(&mut self, ms: u32) {
        embedded_hal::delay::DelayNs::delay_ms(self, ms);
    }
}
