//! Simple blinky demo
//!
//! Drives the user LED of a NUCLEO-F091RC on PA5. The LED is wired
//! active-high; flip the polarity in `LED` for boards that sink the LED
//! current instead, the rest of the code is unchanged.
#![no_main]
#![no_std]

use cortex_m_rt::entry;
use panic_halt as _;
use stm32_pins::{
    gpio::{ActiveHigh, Pin, Speed, PA5},
    pac,
};

const LED: Pin<PA5, ActiveHigh> = Pin::new();

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().unwrap();
    dp.RCC.ahbenr.modify(|_, w| w.iopaen().set_bit());

    LED.deactivate();
    LED.push_pull_output();
    LED.configure(Speed::Low);

    for _ in 0..10 {
        LED.activate();
        cortex_m::asm::delay(1_000_000);
        LED.deactivate();
        cortex_m::asm::delay(1_000_000);
    }
    loop {
        LED.toggle();
        cortex_m::asm::delay(4_000_000);
    }
}
