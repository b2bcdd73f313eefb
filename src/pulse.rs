//! Pulse output driver for the transmit pin.
//!
//! Wraps a single [`OutputPin`] and exposes it as two logical levels, carrier
//! [`Level::On`] and carrier [`Level::Off`]. The electrical level each one maps to
//! is fixed when the driver is built, so inverted wiring costs nothing per tick.

use embedded_hal::digital::{OutputPin, PinState};

/// Logical carrier level on the transmit pin.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Level {
    /// Carrier keyed on.
    On,
    /// Carrier keyed off.
    Off,
}

/// Wiring of the transmit pin relative to the radio's data input.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Polarity {
    /// `HIGH` keys the carrier on.
    #[default]
    Normal,
    /// `LOW` keys the carrier on.
    Inverted,
}

impl Polarity {
    /// Builds a polarity from the host's 0/1 invert flag.
    pub const fn from_invert_flag(invert: u8) -> Self {
        if invert != 0 {
            Polarity::Inverted
        } else {
            Polarity::Normal
        }
    }

    /// Resolves the electrical state for `On` and `Off`, in that order.
    pub const fn states(self) -> (PinState, PinState) {
        match self {
            Polarity::Normal => (PinState::High, PinState::Low),
            Polarity::Inverted => (PinState::Low, PinState::High),
        }
    }
}

/// The transmit pin together with its resolved level mapping.
#[derive(Debug)]
pub struct PulseOutput<P: OutputPin> {
    /// TX pin
    pub pin: P,
    on: PinState,
    off: PinState,
}

impl<P: OutputPin> PulseOutput<P> {
    /// Wraps `pin` and drives it to [`Level::Off`].
    pub fn new(pin: P, polarity: Polarity) -> Self {
        let (on, off) = polarity.states();
        let mut output = Self { pin, on, off };
        output.set(Level::Off);
        output
    }

    /// Writes the electrical state for `level`.
    ///
    /// Pin errors are dropped; a failed write only shows up as a distorted waveform.
    #[inline]
    pub fn set(&mut self, level: Level) {
        let state = match level {
            Level::On => self.on,
            Level::Off => self.off,
        };
        let _ = self.pin.set_state(state);
    }

    /// Returns the polarity this output was built with.
    pub fn polarity(&self) -> Polarity {
        if self.on == PinState::High {
            Polarity::Normal
        } else {
            Polarity::Inverted
        }
    }
}
