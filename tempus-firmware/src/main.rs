//! Tempus - Digital Clock Firmware
//!
//! Main firmware binary for RP2040 boards. One cooperative loop per the
//! clock's design: fetch the register block, decode and render, poll the
//! buttons, dispatch. Every bus edge is a software-paced busy-wait; no
//! interrupt participates in timing or I/O.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Flex, Input, Level, Output, Pull};
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use tempus_bus::{BitBangBus, BusTiming, RtcLink};
use tempus_core::clock::{BusRequest, Clock};
use tempus_core::config::ClockConfig;
use tempus_core::input::debounce::LineLevels;
use tempus_core::registers::RegisterBlock;
use tempus_drivers::st7032::{St7032, SupplyVoltage};
use tempus_hal::InputPin;
use tempus_hal_rp2040::{BusLine, ButtonLine, PushPull};

/// Main loop pacing. The settle and notice tick counts in [`ClockConfig`]
/// are in units of this interval.
const POLL_INTERVAL_MS: u64 = 100;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("tempus firmware starting");

    let p = embassy_rp::init(Default::default());

    // Software bus to the RTC chip.
    let scl = BusLine::new(Flex::new(p.PIN_14));
    let sda = BusLine::new(Flex::new(p.PIN_15));
    let bus = BitBangBus::new(scl, sda, Delay, BusTiming::STANDARD);
    let mut link = RtcLink::new(bus);

    // Character LCD, 4-bit parallel.
    let lcd_rs = PushPull::new(Output::new(p.PIN_8, Level::Low));
    let lcd_en = PushPull::new(Output::new(p.PIN_9, Level::Low));
    let lcd_data = [
        PushPull::new(Output::new(p.PIN_4, Level::Low)),
        PushPull::new(Output::new(p.PIN_5, Level::Low)),
        PushPull::new(Output::new(p.PIN_6, Level::Low)),
        PushPull::new(Output::new(p.PIN_7, Level::Low)),
    ];
    let mut lcd = St7032::new(lcd_rs, lcd_en, lcd_data, Delay);
    lcd.init(SupplyVoltage::V5);
    info!("display initialized");

    // Buttons, active low.
    let btn1 = ButtonLine::new(Input::new(p.PIN_10, Pull::Up));
    let btn2 = ButtonLine::new(Input::new(p.PIN_11, Pull::Up));
    let btn3 = ButtonLine::new(Input::new(p.PIN_12, Pull::Up));

    let mut clock = Clock::new(ClockConfig::default());

    // Write the initial time with the oscillator held, then release it.
    for block in clock.startup_sequence() {
        link.write_registers(&block.to_bytes());
    }
    match link.last_ack() {
        Some(ack) if ack.is_acked() => info!("rtc acknowledged, clock running"),
        _ => warn!("rtc did not acknowledge its address"),
    }

    loop {
        let fresh = if clock.wants_time() {
            Some(RegisterBlock::from_bytes(link.read_registers()))
        } else {
            None
        };

        let levels = LineLevels {
            btn1: btn1.is_high(),
            btn2: btn2.is_high(),
            btn3: btn3.is_high(),
        };

        match clock.tick(fresh, levels, &mut lcd) {
            BusRequest::Write(block) => {
                link.write_registers(&block.to_bytes());
                if matches!(link.last_ack(), Some(ack) if !ack.is_acked()) {
                    debug!("register write went unacknowledged");
                }
            }
            BusRequest::None => {}
        }

        Timer::after_millis(POLL_INTERVAL_MS).await;
    }
}
