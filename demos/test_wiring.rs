//! Blocking wiring diagnostic for the 4-digit display.
//!
//! Lights all four digits simultaneously and sweeps each segment (a-g,
//! then dp) on for one second. Use this to verify segment and digit pin
//! assignments before running the other demos: a dark segment points at
//! its GPIO pin, a dark digit at its drive line.
#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use panic_probe as _;
use sevseg4::{Hardware, SevenSeg, SevenSegStatic};

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

    info!("wiring diagnostic: each segment lights for one second");
    defmt::unwrap!(display.test_wiring(Duration::from_secs(1)).await);
    info!("wiring test complete");

    defmt::unwrap!(display.set_text("done"));
    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}
