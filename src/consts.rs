//! Constants used across the LightwaveRF transmit implementation.
//!
//! This module defines the frame layout, the default timing profile and the
//! bounds used when validating configuration.
//!
//! ## Frame layout
//!
//! ```text
//!  index:   0        1        2       3        4 .. 8      9
//!         +--------+--------+-------+--------+-----------+------+
//!         | param  | param  | device| command| address   | room |
//!         | high   | low    |       |        | (5 bytes) |      |
//!         +--------+--------+-------+--------+-----------+------+
//! ```
//!
//! Every position holds one line symbol (see [`crate::encoding`]), so a frame is
//! always [`MSG_LEN`] bytes on the wire, 80 data bits per repeat.
//!
//! ## Timing
//!
//! All widths are counted in ticks of the periodic timer, one tick per
//! [`DEFAULT_PERIOD_US`] unit. A `1` bit is a period of [`DEFAULT_HIGH_COUNT`]
//! ticks that starts with the carrier on, a `0` bit is a silent period of
//! [`DEFAULT_LOW_COUNT`] ticks, and the last [`DEFAULT_TRAIL_COUNT`] ticks of
//! every period are driven off so the receiver can see symbol boundaries.
//!
//! With the default 330 µs tick this gives the LightwaveRF waveform:
//!
//! | Element      | Ticks | Duration  |
//! |--------------|-------|-----------|
//! | carrier on   | 1     | 330 µs    |
//! | `1` bit      | 2     | 660 µs    |
//! | `0` bit      | 3     | 990 µs    |
//! | frame gap    | 33    | 10.89 ms  |

/// Number of line symbols in one LightwaveRF frame.
pub const MSG_LEN: usize = 10;

/// Number of address symbols in a frame.
pub const ADDR_LEN: usize = 5;

/// Index of the first address symbol within the frame.
pub const ADDR_OFFSET: usize = 4;

/// Index of the parameter high nibble.
pub const PARAM_HIGH_INDEX: usize = 0;

/// Index of the parameter low nibble.
pub const PARAM_LOW_INDEX: usize = 1;

/// Index of the device nibble.
pub const DEVICE_INDEX: usize = 2;

/// Index of the command nibble.
pub const COMMAND_INDEX: usize = 3;

/// Index of the room nibble.
pub const ROOM_INDEX: usize = 9;

/// Frame loaded at power-up, before any address has been configured or restored.
///
/// Encodes parameter `0x00`, device `0`, command `1`, address `F 3 7 2 A` and room `D`.
pub const DEFAULT_FRAME: [u8; MSG_LEN] =
    [0xF6, 0xF6, 0xF6, 0xEE, 0x6F, 0xEB, 0xBE, 0xED, 0xB7, 0x7B];

/// Default number of times each frame is sent.
pub const DEFAULT_REPEATS: u8 = 12;

/// Smallest accepted repeat count.
pub const MIN_REPEATS: u8 = 1;

/// Largest accepted repeat count.
pub const MAX_REPEATS: u8 = 39;

/// Ticks in the period of a `0` bit, 990 µs at the default tick.
pub const DEFAULT_LOW_COUNT: u8 = 3;

/// Ticks in the period of a `1` bit and of every framing symbol, 660 µs at the
/// default tick.
pub const DEFAULT_HIGH_COUNT: u8 = 2;

/// Ticks before the end of a period at which the pin is driven off.
///
/// The carrier is on for `DEFAULT_HIGH_COUNT - DEFAULT_TRAIL_COUNT` ticks, one
/// 330 µs pulse.
pub const DEFAULT_TRAIL_COUNT: u8 = 1;

/// Ticks in one inter-message gap interval, about 10.9 ms at the default tick.
pub const DEFAULT_GAP_COUNT: u8 = 33;

/// Extra gap intervals appended after each frame.
pub const DEFAULT_GAP_MULTIPLIER: u8 = 0;

/// Default period unit in microseconds.
pub const DEFAULT_PERIOD_US: u16 = 330;

/// Smallest accepted period unit in microseconds.
pub const MIN_PERIOD_US: u16 = 33;

/// Largest accepted period unit in microseconds.
pub const MAX_PERIOD_US: u16 = 999;

/// Timer counts per period unit (80 MHz core clock divided by 16).
pub const TIMER_COUNTS_PER_UNIT: u32 = 5;

/// Default non-volatile storage offset of the persisted address.
pub const DEFAULT_STORE_OFFSET: usize = 0;
