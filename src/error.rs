use core::convert::Infallible;

use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Unified error type for this crate.
///
/// Every fallible operation reports through this enum rather than
/// panicking; the caller decides whether to retry, substitute, or halt.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Display, Error, Clone, Copy)]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that
    // `embassy_executor::SpawnError` does not implement Rust's
    // `core::error::Error` trait.
    /// The executor refused the periodic render or blink task.
    #[cfg(feature = "pico1")]
    #[display("periodic render task could not be started: {_0:?}")]
    TimerInitFailed(#[error(not(source))] embassy_executor::SpawnError),

    /// A value outside its documented domain (NaN float, oversized text).
    #[display("value outside the documented domain")]
    InvalidArgument,

    /// An operation that needs an active display was called before a
    /// successful start, or after `end`.
    #[display("display has not been started")]
    NotInitialized,

    /// A pin index outside the fixed display geometry.
    #[display("pin index outside the display geometry")]
    InvalidPin,

    /// Error setting output state.
    #[display("error setting output state")]
    CannotSetOutputState,
}

impl From<Infallible> for Error {
    fn from(_: Infallible) -> Self {
        Self::CannotSetOutputState
    }
}

#[cfg(feature = "pico1")]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TimerInitFailed(err)
    }
}
