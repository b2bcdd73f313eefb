//! Transmit state machine advanced once per timer tick.
//!
//! The machine is pure: [`TxCursor::tick`] takes the frame, the timing profile and
//! the pending flag and returns what the pin should do on this tick. The
//! [`Transmitter`](crate::driver::Transmitter) applies the result to the real pin and
//! timer, and tests can drive it with nothing but a loop.
//!
//! ## Timing model
//!
//! A toggle counter is decremented every tick. When it hits the trailing
//! threshold the pin is keyed off; when it hits zero the current state's
//! transition runs and the counter is reloaded, by default with the high width.
//!
//! ```text
//!  idle -> msg_start -> byte_start -> send_byte x8 -+-> msg_end -> gap_start -+-> gap_end
//!              ^            ^                       |                ^  |     |     |
//!              |            +------- next byte -----+                +--+     |     |
//!              +----------------------------- next repeat --------------------------+
//! ```

use crate::consts::{
    DEFAULT_GAP_COUNT, DEFAULT_GAP_MULTIPLIER, DEFAULT_HIGH_COUNT, DEFAULT_LOW_COUNT,
    DEFAULT_TRAIL_COUNT, MSG_LEN,
};
use crate::error::TxError;
use crate::pulse::Level;

/// Framing state of the transmitter.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum TxState {
    /// Nothing to send; waits for the pending flag.
    #[default]
    Idle,
    /// Leading carrier pulse of a frame.
    MsgStart,
    /// Start pulse in front of every symbol byte.
    ByteStart,
    /// Sending the bits of the current symbol, MSB first.
    SendByte,
    /// Closing carrier pulse of a frame.
    MsgEnd,
    /// Silent interval, repeated `gap_multiplier + 1` times.
    GapStart,
    /// Counts the finished repeat and either restarts or stops.
    GapEnd,
}

/// Tick counts for every pulse the transmitter produces.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct TimingProfile {
    low: u8,
    high: u8,
    trail: u8,
    gap: u8,
    gap_multiplier: u8,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TimingProfile {
    /// Standard LightwaveRF timing.
    pub const DEFAULT: Self = Self {
        low: DEFAULT_LOW_COUNT,
        high: DEFAULT_HIGH_COUNT,
        trail: DEFAULT_TRAIL_COUNT,
        gap: DEFAULT_GAP_COUNT,
        gap_multiplier: DEFAULT_GAP_MULTIPLIER,
    };

    /// Builds a profile from raw tick counts.
    ///
    /// The trailing threshold must be at least one tick and shorter than every
    /// period, otherwise the off pulse would never be emitted or the counter
    /// would wrap.
    ///
    /// # Errors
    /// [`TxError::InvalidTiming`] if `trail` is zero or not below `low`, `high` and `gap`.
    pub const fn new(low: u8, high: u8, trail: u8, gap: u8) -> Result<Self, TxError> {
        if trail == 0 || trail >= low || trail >= high || trail >= gap {
            return Err(TxError::InvalidTiming);
        }
        Ok(Self {
            low,
            high,
            trail,
            gap,
            gap_multiplier: DEFAULT_GAP_MULTIPLIER,
        })
    }

    /// Returns a copy with a different gap multiplier.
    pub const fn with_gap_multiplier(mut self, gap_multiplier: u8) -> Self {
        self.gap_multiplier = gap_multiplier;
        self
    }

    /// Ticks in a `0` bit period.
    pub const fn low(&self) -> u8 {
        self.low
    }

    /// Ticks in a `1` bit period and in every framing period.
    pub const fn high(&self) -> u8 {
        self.high
    }

    /// Tick count at which the pin is keyed off.
    pub const fn trail(&self) -> u8 {
        self.trail
    }

    /// Ticks in one gap interval.
    pub const fn gap(&self) -> u8 {
        self.gap
    }

    /// Extra gap intervals after each frame.
    pub const fn gap_multiplier(&self) -> u8 {
        self.gap_multiplier
    }

    /// Number of ticks one repetition of `frame` takes, from the event that
    /// starts it to the `gap_end` event that closes it.
    pub fn frame_ticks(&self, frame: &[u8; MSG_LEN]) -> u32 {
        let high = self.high as u32;
        let ones: u32 = frame.iter().map(|b| b.count_ones()).sum();
        let zeros = (MSG_LEN as u32 * 8) - ones;
        // lead-in + msg_start + one byte_start per symbol + msg_end
        let framing = high * (3 + MSG_LEN as u32);
        let gaps = (self.gap_multiplier as u32 + 1) * self.gap as u32;
        framing + ones * high + zeros * self.low as u32 + gaps
    }

    /// Number of ticks from arming until the transmitter reports ready again.
    pub fn total_ticks(&self, frame: &[u8; MSG_LEN], repeats: u8) -> u32 {
        TxCursor::ARM_TICKS as u32 + repeats as u32 * self.frame_ticks(frame)
    }
}

/// What a single tick asks of the outside world.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct TickOutput {
    /// Level to write to the pin, if any.
    pub level: Option<Level>,
    /// The last repeat has finished; stop the timer and clear the active flag.
    pub finished: bool,
}

/// Per-transmission progress of the state machine.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct TxCursor {
    state: TxState,
    repeat: u8,
    byte_index: u8,
    bit_mask: u8,
    toggle_count: u8,
    gap_repeat: u8,
}

impl Default for TxCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl TxCursor {
    /// Ticks between arming and the first transition out of `Idle`.
    pub const ARM_TICKS: u8 = 1;

    /// Creates an idle cursor.
    pub const fn new() -> Self {
        Self {
            state: TxState::Idle,
            repeat: 0,
            byte_index: 0,
            bit_mask: 0x80,
            toggle_count: Self::ARM_TICKS,
            gap_repeat: 0,
        }
    }

    /// Resets the cursor for a new transmission.
    ///
    /// The first tick after arming leaves `Idle`.
    pub fn arm(&mut self) {
        *self = Self::new();
    }

    /// Current framing state.
    pub fn state(&self) -> TxState {
        self.state
    }

    /// Repeats completed in the running transmission.
    pub fn repeat(&self) -> u8 {
        self.repeat
    }

    /// Index of the symbol currently being sent.
    pub fn byte_index(&self) -> u8 {
        self.byte_index
    }

    /// Remaining ticks in the current period.
    pub fn toggle_count(&self) -> u8 {
        self.toggle_count
    }

    /// Advances the machine by one tick.
    ///
    /// Runs in constant time and never fails; `frame` is indexed only while
    /// `byte_index < MSG_LEN`.
    ///
    /// # Arguments
    /// - `frame`: the encoded message being sent
    /// - `timing`: tick counts in effect
    /// - `repeats`: number of repeats to send before finishing
    /// - `pending`: whether a transmission is armed
    pub fn tick(
        &mut self,
        frame: &[u8; MSG_LEN],
        timing: &TimingProfile,
        repeats: u8,
        pending: bool,
    ) -> TickOutput {
        let mut out = TickOutput::default();
        self.toggle_count = self.toggle_count.wrapping_sub(1);
        if self.toggle_count == timing.trail {
            out.level = Some(Level::Off);
        } else if self.toggle_count == 0 {
            self.toggle_count = timing.high;
            match self.state {
                TxState::Idle => {
                    if pending {
                        self.repeat = 0;
                        self.state = TxState::MsgStart;
                    }
                }
                TxState::MsgStart => {
                    out.level = Some(Level::On);
                    self.byte_index = 0;
                    self.state = TxState::ByteStart;
                }
                TxState::ByteStart => {
                    out.level = Some(Level::On);
                    self.bit_mask = 0x80;
                    self.state = TxState::SendByte;
                }
                TxState::SendByte => {
                    if frame[self.byte_index as usize] & self.bit_mask != 0 {
                        out.level = Some(Level::On);
                    } else {
                        self.toggle_count = timing.low;
                    }
                    self.bit_mask >>= 1;
                    if self.bit_mask == 0 {
                        self.byte_index += 1;
                        self.state = if self.byte_index as usize >= MSG_LEN {
                            TxState::MsgEnd
                        } else {
                            TxState::ByteStart
                        };
                    }
                }
                TxState::MsgEnd => {
                    out.level = Some(Level::On);
                    self.gap_repeat = timing.gap_multiplier;
                    self.state = TxState::GapStart;
                }
                TxState::GapStart => {
                    self.toggle_count = timing.gap;
                    if self.gap_repeat == 0 {
                        self.state = TxState::GapEnd;
                    } else {
                        self.gap_repeat -= 1;
                    }
                }
                TxState::GapEnd => {
                    self.repeat = self.repeat.saturating_add(1);
                    if self.repeat >= repeats {
                        out.finished = true;
                        self.state = TxState::Idle;
                    } else {
                        self.state = TxState::MsgStart;
                    }
                }
            }
        }
        out
    }
}
