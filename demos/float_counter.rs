//! Non-blocking float counter.
//!
//! Increments a counter by 0.01 every 100 ms and displays it; the render
//! task keeps the display lit in the background, so the main loop stays
//! free for buttons, sensors, or other work.
#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use panic_probe as _;
use sevseg4::{Hardware, SevenSeg, SevenSegStatic};

const UPDATE_INTERVAL: Duration = Duration::from_millis(100);
const INCREMENT: f32 = 0.01;
const MAX_COUNTER: f32 = 99.99;

#[embassy_executor::main]
pub async fn main(spawner: Spawner) -> ! {
    let hardware = Hardware::default();

    static DISPLAY_STATIC: SevenSegStatic = SevenSeg::new_static();
    let display = defmt::unwrap!(SevenSeg::new(
        &DISPLAY_STATIC,
        hardware.cells,
        hardware.segments,
        spawner,
    ));

    // Suppress leading zeros for a cleaner display ("  1.2" over "001.2").
    display.set_leading_zeros(true);

    let mut value: f32 = 0.0;
    defmt::unwrap!(display.set_float(value));
    info!("counter running");

    loop {
        Timer::after(UPDATE_INTERVAL).await;
        value += INCREMENT;
        if value > MAX_COUNTER {
            value = 0.0;
            info!("counter reset");
        }
        defmt::unwrap!(display.set_float(value));
    }
}
