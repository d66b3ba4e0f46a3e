//! tempus-hal trait implementations over embassy-rp GPIO

use embassy_rp::gpio::{Flex, Input, Output, Pull};

use tempus_hal::{BusPin, InputPin, OutputPin};

/// Software bus line on a `Flex` pin
///
/// Driven push-pull while the master owns the line; released by switching
/// the pad to input, where the pull-up floats it high unless the device
/// holds it low. The pad is readable in both directions.
pub struct BusLine<'d> {
    pin: Flex<'d>,
}

impl<'d> BusLine<'d> {
    /// Take over a pin as a bus line, initially driven high
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_pull(Pull::Up);
        pin.set_high();
        pin.set_as_output();
        Self { pin }
    }
}

impl OutputPin for BusLine<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
        self.pin.set_as_output();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
        self.pin.set_as_output();
    }
}

impl InputPin for BusLine<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

impl BusPin for BusLine<'_> {
    fn release(&mut self) {
        self.pin.set_as_input();
    }
}

/// Push-pull output for display control and data lines
pub struct PushPull<'d> {
    pin: Output<'d>,
}

impl<'d> PushPull<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl OutputPin for PushPull<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }
}

/// Pulled-up button input; the line reads low while pressed
pub struct ButtonLine<'d> {
    pin: Input<'d>,
}

impl<'d> ButtonLine<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }
}

impl InputPin for ButtonLine<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
