//! Tour of the display features.
//!
//! Cycles through numbers, floats, text, decimal point placement,
//! blinking, and the integer hundredths API, two seconds per step.
#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use panic_probe as _;
use sevseg4::{Hardware, SevenSeg, SevenSegStatic};

const STEP: Duration = Duration::from_secs(2);

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

    loop {
        info!("number 1234");
        display.set_number(1234, -1);
        Timer::after(STEP).await;

        info!("float 56.78");
        defmt::unwrap!(display.set_float(56.78));
        Timer::after(STEP).await;

        info!("text HELP");
        defmt::unwrap!(display.set_text("HELP"));
        Timer::after(STEP).await;

        info!("text GOOD");
        defmt::unwrap!(display.set_text("GOOD"));
        Timer::after(STEP).await;

        info!("number with decimal point at position 0");
        display.set_number(5678, 0);
        Timer::after(STEP).await;

        info!("blinking");
        display.start_blink(Duration::from_millis(300));
        Timer::after(STEP).await;

        info!("blinking stopped");
        display.stop_blink();
        defmt::unwrap!(display.set_text("End"));
        Timer::after(STEP).await;

        // Integer hundredths ramp: no float math involved.
        info!("hundredths ramp");
        for hundredths in (0_u16..=300).step_by(10) {
            display.set_hundredths(hundredths, 2);
            Timer::after(Duration::from_millis(50)).await;
        }
    }
}
