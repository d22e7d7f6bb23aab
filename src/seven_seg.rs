//! A device abstraction for a multiplexed 4-digit, 7-segment LED display.
//!
//! This module holds the driver facade ([`SevenSeg`]), the shared display
//! state, and the two background tasks: the render task that multiplexes
//! one digit per tick, and the blink task that advances the visibility
//! gate on its own low-frequency schedule.

use core::cell::RefCell;
use core::convert::Infallible;

#[cfg(feature = "display-trace")]
use defmt::info;
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_rp::gpio::Level;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Timer};

use crate::bit_matrix::{BitMatrix, CELL_COUNT, SEGMENT_COUNT};
use crate::blink_gate::BlinkGate;
use crate::error::{Error, Result};
use crate::output_array::OutputArray;

/// Sleep per digit between multiplexing updates. Four digits at 3 ms each
/// give a full refresh cycle of roughly 80 Hz.
const MULTIPLEX_SLEEP: Duration = Duration::from_millis(3);

/// Token shown when a float cannot be formatted (NaN or infinite input).
const ERROR_TOKEN: [char; CELL_COUNT] = ['E', 'r', 'r', ' '];

/// Static channel and state resources for the [`SevenSeg`] device.
pub struct SevenSegStatic {
    state: Mutex<CriticalSectionRawMutex, RefCell<DisplayState>>,
    render_wake: Signal<CriticalSectionRawMutex, ()>,
    blink_wake: Signal<CriticalSectionRawMutex, ()>,
    wiring_done: Signal<CriticalSectionRawMutex, ()>,
}

impl SevenSegStatic {
    const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(DisplayState::new())),
            render_wake: Signal::new(),
            blink_wake: Signal::new(),
            wiring_done: Signal::new(),
        }
    }

    /// Runs `func` on the shared state inside a critical section.
    ///
    /// Every multi-step mutation of the display buffer goes through here,
    /// so the render task can never observe a half-written frame. Keep the
    /// closures small and constant-time: they stall the multiplex tick.
    fn with_state<R>(&self, func: impl FnOnce(&mut DisplayState) -> R) -> R {
        self.state.lock(|cell| func(&mut cell.borrow_mut()))
    }
}

/// Display state shared between the facade and the background tasks.
struct DisplayState {
    frame: BitMatrix,
    blink: BlinkGate,
    leading_zero_suppression: bool,
    active: bool,
    refresh_interval_ms: u8,
    wiring_test: Option<Duration>,
    last_error: Option<Error>,
}

impl DisplayState {
    const fn new() -> Self {
        Self {
            frame: BitMatrix::blank(),
            blink: BlinkGate::new(),
            leading_zero_suppression: true,
            active: false,
            refresh_interval_ms: 3,
            wiring_test: None,
            last_error: None,
        }
    }
}

/// A device abstraction for a multiplexed 4-digit, 7-segment LED display.
///
/// # Hardware requirements
///
/// Designed for common-cathode displays where:
/// - Cell pins select which digit is active (low = on, high = off)
/// - Segment pins source the segments (high = on, low = off)
///
/// # Example
///
/// ```no_run
/// #![no_std]
/// #![no_main]
///
/// use embassy_rp::gpio::{Level, Output};
/// use sevseg4::{OutputArray, SevenSeg, SevenSegStatic};
/// # use embassy_executor::Spawner;
/// # use core::panic::PanicInfo;
/// # #[panic_handler]
/// # fn panic(_: &PanicInfo) -> ! { loop {} }
///
/// async fn example(p: embassy_rp::Peripherals, spawner: Spawner) -> sevseg4::Result<()> {
///     // Cell pins select which digit is active.
///     let cells = OutputArray::new([
///         Output::new(p.PIN_1, Level::High),
///         Output::new(p.PIN_2, Level::High),
///         Output::new(p.PIN_3, Level::High),
///         Output::new(p.PIN_4, Level::High),
///     ]);
///
///     // Segment pins a-g plus the decimal point.
///     let segments = OutputArray::new([
///         Output::new(p.PIN_5, Level::Low),
///         Output::new(p.PIN_6, Level::Low),
///         Output::new(p.PIN_7, Level::Low),
///         Output::new(p.PIN_8, Level::Low),
///         Output::new(p.PIN_9, Level::Low),
///         Output::new(p.PIN_10, Level::Low),
///         Output::new(p.PIN_11, Level::Low),
///         Output::new(p.PIN_12, Level::Low),
///     ]);
///
///     static DISPLAY_STATIC: SevenSegStatic = SevenSeg::new_static();
///     let display = SevenSeg::new(&DISPLAY_STATIC, cells, segments, spawner)?;
///
///     display.set_number(1234, -1);
///     display.set_float(56.78)?;
///     display.set_text("GOOD")?;
///     Ok(())
/// }
/// ```
pub struct SevenSeg<'a>(&'a SevenSegStatic);

impl SevenSeg<'_> {
    /// Creates static channel resources for the display.
    #[must_use]
    pub const fn new_static() -> SevenSegStatic {
        SevenSegStatic::new()
    }

    /// Starts the display: spawns the render and blink tasks and activates
    /// multiplexing.
    ///
    /// On failure no pin is driven and the driver stays inactive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimerInitFailed`] if the executor refuses one of
    /// the background tasks.
    #[must_use = "Must be used to manage the spawned tasks"]
    pub fn new(
        statics: &'static SevenSegStatic,
        cell_pins: OutputArray<'static, CELL_COUNT>,
        segment_pins: OutputArray<'static, SEGMENT_COUNT>,
        spawner: Spawner,
    ) -> Result<Self> {
        if let Err(err) = Self::spawn_tasks(statics, cell_pins, segment_pins, spawner) {
            statics.with_state(|state| state.last_error = Some(err));
            return Err(err);
        }
        statics.with_state(|state| {
            state.active = true;
            state.last_error = None;
        });
        statics.render_wake.signal(());
        Ok(Self(statics))
    }

    fn spawn_tasks(
        statics: &'static SevenSegStatic,
        cell_pins: OutputArray<'static, CELL_COUNT>,
        segment_pins: OutputArray<'static, SEGMENT_COUNT>,
        spawner: Spawner,
    ) -> Result<()> {
        spawner.spawn(render_loop(cell_pins, segment_pins, statics))?;
        spawner.spawn(blink_loop(statics))?;
        Ok(())
    }

    /// Re-activates multiplexing after [`end`](Self::end).
    pub fn begin(&self) {
        self.0.with_state(|state| {
            state.active = true;
            state.last_error = None;
        });
        self.0.render_wake.signal(());
    }

    /// Halts multiplexing and blanks the display. Idempotent.
    ///
    /// The blink setting is left as-is; [`stop_blink`](Self::stop_blink) is
    /// the only transition that disables blinking.
    pub fn end(&self) {
        self.0.with_state(|state| {
            state.active = false;
            state.frame = BitMatrix::blank();
        });
    }

    /// Blanks the display without touching the lifecycle or blink state.
    pub fn clear(&self) {
        self.0.with_state(|state| state.frame = BitMatrix::blank());
    }

    /// Displays a number in `0..=9999` (larger values clamp), with an
    /// optional decimal point after digit `dp_position` (`-1` for none;
    /// out-of-range positions normalize to `-1`).
    pub fn set_number(&self, value: u16, dp_position: i8) {
        #[cfg(feature = "display-trace")]
        info!("set_number: {} dp {}", value, dp_position);
        let suppress = self.0.with_state(|state| state.leading_zero_suppression);
        self.show(BitMatrix::from_number(value, dp_position, suppress));
    }

    /// Displays a float with automatic decimal point placement by
    /// magnitude; see [`BitMatrix::from_float`] for the exact rules.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for NaN or infinite input; the
    /// display then shows the `Err` token instead of the previous frame.
    pub fn set_float(&self, value: f32) -> Result<()> {
        #[cfg(feature = "display-trace")]
        info!("set_float: {}", value);
        let suppress = self.0.with_state(|state| state.leading_zero_suppression);
        match BitMatrix::from_float(value, suppress) {
            Ok(frame) => {
                self.0.with_state(|state| {
                    state.frame = frame;
                    state.last_error = None;
                });
                self.0.render_wake.signal(());
                Ok(())
            }
            Err(error) => {
                self.0.with_state(|state| {
                    state.frame = BitMatrix::from_chars(&ERROR_TOKEN);
                    state.last_error = Some(error);
                });
                self.0.render_wake.signal(());
                Err(error)
            }
        }
    }

    /// Displays up to four characters, right-padded with blanks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for text longer than four
    /// characters; the previous frame is left unchanged.
    pub fn set_text(&self, text: &str) -> Result<()> {
        #[cfg(feature = "display-trace")]
        info!("set_text: {}", text);
        match BitMatrix::from_text(text) {
            Ok(frame) => {
                self.0.with_state(|state| {
                    state.frame = frame;
                    state.last_error = None;
                });
                self.0.render_wake.signal(());
                Ok(())
            }
            Err(error) => {
                self.0.with_state(|state| state.last_error = Some(error));
                Err(error)
            }
        }
    }

    /// Raw escape hatch: caller-supplied segment masks written verbatim.
    pub fn set_segments(&self, patterns: [u8; CELL_COUNT]) {
        self.show(BitMatrix::new(patterns));
    }

    /// Integer analog of [`set_float`](Self::set_float) working in
    /// hundredths, avoiding float math: `0..=9999` reads `0.00..=99.99`.
    /// Out-of-range `dp_position` defaults to `2` here rather than `-1`.
    pub fn set_hundredths(&self, value: u16, dp_position: i8) {
        let dp_position = if (-1..=3).contains(&dp_position) {
            dp_position
        } else {
            2
        };
        self.set_number(value, dp_position);
    }

    /// Enables (`true`, the default) or disables leading-zero suppression
    /// for subsequently formatted numbers: `true` renders 7 as `"   7"`,
    /// `false` as `"0007"`.
    pub fn set_leading_zeros(&self, enabled: bool) {
        self.0
            .with_state(|state| state.leading_zero_suppression = enabled);
    }

    /// Stores a refresh-interval hint in `1..=255` milliseconds.
    ///
    /// Informational only: the effective multiplexing rate stays fixed at
    /// the 3 ms per-digit period programmed at start.
    pub fn set_refresh_interval(&self, ms: u8) {
        let ms = ms.max(1);
        self.0.with_state(|state| state.refresh_interval_ms = ms);
    }

    /// The currently stored refresh-interval hint in milliseconds.
    #[must_use]
    pub fn refresh_interval(&self) -> u8 {
        self.0.with_state(|state| state.refresh_interval_ms)
    }

    /// Starts blinking the whole display with the given period, beginning
    /// in the visible phase.
    pub fn start_blink(&self, interval: Duration) {
        let now_ms = Instant::now().as_millis();
        self.0
            .with_state(|state| state.blink.start(interval.as_millis(), now_ms));
        self.0.blink_wake.signal(());
    }

    /// Stops blinking; the display is left visible regardless of phase.
    pub fn stop_blink(&self) {
        self.0.with_state(|state| state.blink.stop());
        self.0.blink_wake.signal(());
    }

    #[must_use]
    pub fn is_blinking(&self) -> bool {
        self.0.with_state(|state| state.blink.is_enabled())
    }

    /// True after a successful start and before [`end`](Self::end).
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.0.with_state(|state| state.active)
    }

    /// Error recorded by the most recent fallible operation (start,
    /// [`set_float`](Self::set_float), [`set_text`](Self::set_text));
    /// `None` when it succeeded.
    #[must_use]
    pub fn last_error(&self) -> Option<Error> {
        self.0.with_state(|state| state.last_error)
    }

    /// Blocking wiring diagnostic: lights all four digits and sweeps each
    /// segment line on for `duration_per_segment`.
    ///
    /// Normal multiplexing is suspended for the duration. Intended for
    /// setup-time use only, never during steady-state operation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] if the display is not active.
    pub async fn test_wiring(&self, duration_per_segment: Duration) -> Result<()> {
        self.0.wiring_done.reset();
        let accepted = self.0.with_state(|state| {
            if state.active {
                state.wiring_test = Some(duration_per_segment);
            }
            state.active
        });
        if !accepted {
            return Err(Error::NotInitialized);
        }
        self.0.render_wake.signal(());
        self.0.wiring_done.wait().await;
        Ok(())
    }

    fn show(&self, frame: BitMatrix) {
        self.0.with_state(|state| state.frame = frame);
        self.0.render_wake.signal(());
    }
}

/// One multiplex tick's view of the shared state.
enum RenderStep {
    /// Nothing to drive; blank the lines and park until woken.
    Idle,
    /// Run the blocking wiring sweep.
    Sweep(Duration),
    /// Drive one digit; `lit` is false while the blink gate hides the
    /// display.
    Drive { bits: u8, lit: bool },
}

#[embassy_executor::task]
async fn render_loop(
    cell_pins: OutputArray<'static, CELL_COUNT>,
    segment_pins: OutputArray<'static, SEGMENT_COUNT>,
    statics: &'static SevenSegStatic,
) -> ! {
    let err = inner_render_loop(cell_pins, segment_pins, statics)
        .await
        .unwrap_err();
    panic!("{err}");
}

/// The multiplexer: advances the digit cursor and drives exactly one digit
/// per tick. Bounded and allocation-free; the only await points are the
/// tick timer and the idle park.
async fn inner_render_loop(
    mut cell_pins: OutputArray<'static, CELL_COUNT>,
    mut segment_pins: OutputArray<'static, SEGMENT_COUNT>,
    statics: &'static SevenSegStatic,
) -> Result<Infallible> {
    let mut cursor: usize = 0;
    loop {
        let step = statics.with_state(|state| {
            if let Some(duration) = state.wiring_test.take() {
                RenderStep::Sweep(duration)
            } else if !state.active || state.frame.is_blank() {
                RenderStep::Idle
            } else {
                RenderStep::Drive {
                    bits: state.frame[cursor],
                    lit: state.blink.is_visible(),
                }
            }
        });
        match step {
            RenderStep::Idle => {
                segment_pins.set_from_bits(0)?;
                cell_pins.set_all(Level::High);
                cursor = 0;
                statics.render_wake.wait().await;
            }
            RenderStep::Sweep(duration) => {
                sweep_segments(&mut cell_pins, &mut segment_pins, duration).await?;
                statics.wiring_done.signal(());
            }
            RenderStep::Drive { bits, lit } => {
                // A hidden blink phase leaves every line deactivated for the
                // whole tick: full-display blanking, not per-digit desync.
                if lit {
                    segment_pins.set_from_bits(bits)?;
                    cell_pins.set_level_at_index(cursor, Level::Low)?;
                }
                Timer::after(MULTIPLEX_SLEEP).await;
                if lit {
                    cell_pins.set_level_at_index(cursor, Level::High)?;
                }
                cursor = (cursor + 1) % CELL_COUNT;
            }
        }
    }
}

/// Lights all digits simultaneously and sweeps the eight segment lines on,
/// one at a time.
async fn sweep_segments(
    cell_pins: &mut OutputArray<'static, CELL_COUNT>,
    segment_pins: &mut OutputArray<'static, SEGMENT_COUNT>,
    duration_per_segment: Duration,
) -> Result<()> {
    segment_pins.set_from_bits(0)?;
    cell_pins.set_all(Level::Low);
    for index in 0..SEGMENT_COUNT {
        segment_pins.set_level_at_index(index, Level::High)?;
        Timer::after(duration_per_segment).await;
        segment_pins.set_level_at_index(index, Level::Low)?;
    }
    cell_pins.set_all(Level::High);
    Ok(())
}

/// Advances the blink gate on its own schedule, decoupled from the
/// multiplexing tick.
#[embassy_executor::task]
async fn blink_loop(statics: &'static SevenSegStatic) -> ! {
    loop {
        let deadline = statics.with_state(|state| state.blink.next_toggle_ms());
        match deadline {
            None => statics.blink_wake.wait().await,
            Some(deadline_ms) => {
                let toggle_at = Timer::at(Instant::from_millis(deadline_ms));
                if let Either::First(()) = select(toggle_at, statics.blink_wake.wait()).await {
                    let now_ms = Instant::now().as_millis();
                    statics.with_state(|state| state.blink.tick(now_ms));
                }
            }
        }
    }
}
