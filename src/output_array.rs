use embassy_rp::gpio::{self, Level};
use embedded_hal::digital::OutputPin;

use crate::Result;
use crate::error::Error::InvalidPin;

/// Array of GPIO output pins for one axis of the display matrix.
///
/// See the [`SevenSeg`](crate::SevenSeg) documentation for usage examples.
pub struct OutputArray<'a, const N: usize>([gpio::Output<'a>; N]);

impl<'a, const N: usize> OutputArray<'a, N> {
    #[must_use]
    pub const fn new(outputs: [gpio::Output<'a>; N]) -> Self {
        Self(outputs)
    }

    #[inline]
    pub(crate) fn set_level_at_index(&mut self, index: usize, level: Level) -> Result<()> {
        self.0.get_mut(index).ok_or(InvalidPin)?.set_level(level);
        Ok(())
    }

    #[inline]
    pub(crate) fn set_all(&mut self, level: Level) {
        for output in &mut self.0 {
            output.set_level(level);
        }
    }
}

impl OutputArray<'_, { u8::BITS as usize }> {
    /// Drives the eight outputs from a segment mask, lowest bit first.
    #[inline]
    pub(crate) fn set_from_bits(&mut self, mut bits: u8) -> Result<()> {
        for output in &mut self.0 {
            let lit = (bits & 1) == 1;
            output.set_state(lit.into())?;
            bits >>= 1;
        }
        Ok(())
    }
}
