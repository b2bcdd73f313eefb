//! Errors returned by foreground transmitter operations.
//!
//! Nothing on the tick path can fail; every variant here is raised by code
//! running outside the timer interrupt, before anything is armed.

use crate::consts::MSG_LEN;

/// Errors reported by [`Transmitter`](crate::driver::Transmitter) and the global helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum TxError {
    /// A transmission is still running; check `is_ready()` before sending.
    #[error("a transmission is already in progress")]
    Busy,
    /// A raw message did not contain exactly one frame worth of bytes.
    #[error("raw message must be {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required length, always [`MSG_LEN`].
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
    /// Tick counts that would never reach the trailing threshold or would underflow.
    #[error("invalid timing profile")]
    InvalidTiming,
    /// The global transmitter slot was already filled.
    #[error("transmitter already initialized")]
    AlreadyInitialized,
    /// The global transmitter slot is still empty.
    #[error("transmitter not initialized")]
    Uninitialized,
}

impl TxError {
    pub(crate) const fn invalid_length(actual: usize) -> Self {
        TxError::InvalidLength {
            expected: MSG_LEN,
            actual,
        }
    }
}
