//! Mirrors the user button onto the user LED
//!
//! On a NUCLEO-F091RC the button on PC13 pulls the line low when pressed and
//! the LED on PA5 lights when driven high. Both polarities live in the pin
//! declarations, so the loop only talks about "active".
#![no_main]
#![no_std]

use cortex_m_rt::entry;
use panic_halt as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32_pins::{
    gpio::{ActiveHigh, ActiveLow, DynPin, Pin, PA5, PC13},
    pac,
};

const LED: Pin<PA5, ActiveHigh> = Pin::new();
const BUTTON: Pin<PC13, ActiveLow> = Pin::new();

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("-- stm32-pins button demo --");
    let dp = pac::Peripherals::take().unwrap();
    dp.RCC
        .ahbenr
        .modify(|_, w| w.iopaen().set_bit().iopcen().set_bit());

    LED.push_pull_output();
    BUTTON.pull_up_input();

    let pins: [DynPin; 2] = [LED.into(), BUTTON.into()];
    for pin in pins.iter() {
        rprintln!("using {}{}", pin.port(), pin.bit());
    }

    let mut pressed = false;
    loop {
        let now = BUTTON.is_active();
        if now != pressed {
            rprintln!("button {}", if now { "pressed" } else { "released" });
            pressed = now;
        }
        LED.set_active(now);
        if LED.is_set_active() != now {
            rprintln!("LED latch does not follow the button");
        }
    }
}
