use embassy_rp::gpio::{self, Level};

use crate::bit_matrix::{CELL_COUNT, SEGMENT_COUNT};
use crate::output_array::OutputArray;

/// Canonical wiring used by the demo programs.
///
/// Cells (digit selects) on `PIN_1..=PIN_4`, segments `a`-`g` and the
/// decimal point on `PIN_5..=PIN_12`. Cells idle high (digit off), segments
/// idle low (segment dark).
pub struct Hardware {
    pub cells: OutputArray<'static, CELL_COUNT>,
    pub segments: OutputArray<'static, SEGMENT_COUNT>,
}

impl Default for Hardware {
    fn default() -> Self {
        let peripherals: embassy_rp::Peripherals =
            embassy_rp::init(embassy_rp::config::Config::default());

        let cells = OutputArray::new([
            gpio::Output::new(peripherals.PIN_1, Level::High),
            gpio::Output::new(peripherals.PIN_2, Level::High),
            gpio::Output::new(peripherals.PIN_3, Level::High),
            gpio::Output::new(peripherals.PIN_4, Level::High),
        ]);

        let segments = OutputArray::new([
            gpio::Output::new(peripherals.PIN_5, Level::Low),
            gpio::Output::new(peripherals.PIN_6, Level::Low),
            gpio::Output::new(peripherals.PIN_7, Level::Low),
            gpio::Output::new(peripherals.PIN_8, Level::Low),
            gpio::Output::new(peripherals.PIN_9, Level::Low),
            gpio::Output::new(peripherals.PIN_10, Level::Low),
            gpio::Output::new(peripherals.PIN_11, Level::Low),
            gpio::Output::new(peripherals.PIN_12, Level::Low),
        ]);

        Self { cells, segments }
    }
}
