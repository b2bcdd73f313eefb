//! # lwrf433
//!
//! A portable, no_std Rust transmitter for the LightwaveRF 434 MHz on-off-keyed
//! protocol, for use with cheap OOK modules like the FS1000A.
//!
//! The transmitter is a tick-driven state machine:
//! - `embedded-hal` traits for the output pin
//! - a periodic timer interrupt (or a blocking delay loop) calling `tick()`
//! - interrupt-safe shared state with `critical-section`
//! - fixed 10-symbol frames, no allocation anywhere
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` support |
//! | `delay-loop`          | Uses `embedded_hal::delay::DelayNs` to drive ticks |
//! | `timer-isr` (default) | Global `critical_section` instance and ISR macros |
//! | `defmt-0-3`           | Uses `defmt` logging |
//! | `log`                 | Uses `log` logging |
//!
//! ## Protocol
//!
//! - Every nibble is sent as an 8-bit line symbol ([`encoding`])
//! - A frame is parameter (2 nibbles), device, command, 5 address nibbles and room
//! - Each frame is repeated 1–39 times with a silent gap in between
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lwrf433::driver::{Command, Transmitter, TxConfig};
//! use lwrf433::storage::NoStore;
//!
//! let mut tx = Transmitter::new(tx_pin, timer1, NoStore, TxConfig::setup(10, 0, 330));
//! tx.set_address(&[0xF, 0x3, 0x7, 0x2, 0xA])?;
//! if tx.is_ready() {
//!     tx.send_command(Command::new(0x1, 0x00, 0x1, 0x1))?; // room 1, device 1, on
//! }
//! ```
//!
//! From the timer interrupt:
//!
//! ```rust,ignore
//! #[interrupt]
//! fn TIMER1() {
//!     lwrf433::tick_lw_timer!();
//! }
//! ```
//!
//! ## Integration Notes
//!
//! - Pulse widths are multiples of the tick; the default 330 µs unit matches
//!   stock LightwaveRF remotes
//! - A late or dropped tick distorts the waveform; keep the timer interrupt at high priority
//! - Only one transmitter instance should be driven from the interrupt
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

pub use critical_section;

mod fmt;

pub mod consts;
pub mod driver;
pub mod encoding;
pub mod error;
pub mod machine;
pub mod message;
pub mod pulse;
pub mod storage;
pub mod timer;
