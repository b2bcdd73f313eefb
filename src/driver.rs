//! LightwaveRF transmitter driver for 434 MHz OOK radio modules.
//!
//! This module provides the [`Transmitter`] struct, which ties the frame buffer,
//! the transmit state machine, the pulse output and the tick timer together. The
//! foreground builds a frame and arms the timer; the timer interrupt calls
//! [`tick()`](Transmitter::tick) until every repeat has been sent, then stops the
//! timer and reports ready again.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! use lwrf433::driver::{Command, Transmitter, TxConfig};
//! use lwrf433::storage::NoStore;
//! use lwrf433::timer::ManualTicks;
//!
//! # let pin = Pin::new(&[PinTransaction::set(PinState::Low)]);
//! let mut tx = Transmitter::new(pin, ManualTicks::new(), NoStore, TxConfig::default());
//! assert!(tx.is_ready());
//! tx.set_address(&[0x1, 0x2, 0x3, 0x4, 0x5]).unwrap();
//! assert_eq!(tx.message()[4], 0xEE);
//! # tx.output.pin.done();
//! ```
//!
//! ## Design Notes
//!
//! The tick path does no allocation, no logging and no blocking, and every branch
//! runs in constant time. All validation happens in the foreground before the
//! timer is armed, so nothing the interrupt sees can be malformed.
//!
//! For the transition table, see [`crate::machine`].
//!
//! For timer and tick scheduling helpers, see [`crate::timer`].

use core::convert::Infallible;
use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::OutputPin;

use crate::consts::{
    ADDR_LEN, DEFAULT_PERIOD_US, DEFAULT_REPEATS, DEFAULT_STORE_OFFSET, MAX_REPEATS, MIN_REPEATS,
};
use crate::error::TxError;
use crate::machine::{TimingProfile, TxCursor, TxState};
use crate::message::MessageBuilder;
pub use crate::message::{Command, EncodedMessage};
use crate::pulse::{Polarity, PulseOutput};
use crate::storage::AddressStore;
use crate::timer::{TickTimer, TickTimerDriver, timer_reload, validate_period};

/// Setup parameters for a [`Transmitter`].
///
/// Out-of-range repeat counts and periods are ignored rather than rejected, so a
/// config built from untrusted host values is always usable.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct TxConfig {
    /// Times each frame is sent, 1–39.
    pub repeats: u8,
    /// Wiring of the TX pin.
    pub polarity: Polarity,
    /// Tick period unit in microseconds.
    pub period_us: u16,
    /// Pulse widths and gap multiplier.
    pub timing: TimingProfile,
    /// Whether raw messages are nibble-translated.
    pub translate: bool,
    /// Storage offset of the persisted address.
    pub store_offset: usize,
}

impl Default for TxConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TxConfig {
    /// Default configuration: 12 repeats, normal polarity, 330 µs unit.
    pub const fn new() -> Self {
        Self {
            repeats: DEFAULT_REPEATS,
            polarity: Polarity::Normal,
            period_us: DEFAULT_PERIOD_US,
            timing: TimingProfile::DEFAULT,
            translate: true,
            store_offset: DEFAULT_STORE_OFFSET,
        }
    }

    /// Configuration from the host's `setup(repeats, invert, period)` values.
    pub const fn setup(repeats: u8, invert: u8, period_us: u16) -> Self {
        Self::new()
            .with_repeats(repeats)
            .with_polarity(Polarity::from_invert_flag(invert))
            .with_period(period_us)
    }

    /// Sets the repeat count; values outside 1–39 keep the current count.
    pub const fn with_repeats(mut self, repeats: u8) -> Self {
        if valid_repeats(repeats) {
            self.repeats = repeats;
        }
        self
    }

    /// Sets the pin polarity.
    pub const fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Sets the period unit; values outside 33–999 µs fall back to 330 µs.
    pub const fn with_period(mut self, period_us: u16) -> Self {
        self.period_us = validate_period(period_us);
        self
    }

    /// Sets the pulse widths.
    pub const fn with_timing(mut self, timing: TimingProfile) -> Self {
        self.timing = timing;
        self
    }

    /// Sets the gap multiplier, keeping the pulse widths.
    pub const fn with_gap_multiplier(mut self, gap_multiplier: u8) -> Self {
        self.timing = self.timing.with_gap_multiplier(gap_multiplier);
        self
    }

    /// Enables or disables nibble translation of raw messages.
    pub const fn with_translate(mut self, translate: bool) -> Self {
        self.translate = translate;
        self
    }

    /// Sets the storage offset of the persisted address.
    pub const fn with_store_offset(mut self, store_offset: usize) -> Self {
        self.store_offset = store_offset;
        self
    }
}

const fn valid_repeats(repeats: u8) -> bool {
    repeats >= MIN_REPEATS && repeats <= MAX_REPEATS
}

/// An interrupt-driven LightwaveRF transmitter.
///
/// ## Type Parameters
///
/// - `P`: A type implementing [`embedded_hal::digital::OutputPin`] wired to the radio's data input
/// - `T`: The periodic timer, see [`TickTimer`]
/// - `S`: Optional address storage, see [`AddressStore`]
///
/// ## Notes
///
/// - Only one transmission runs at a time. `send_*` and `set_address` return
///   [`TxError::Busy`] while one is active and leave the frame untouched.
/// - `is_ready()` flips back to `true` from inside `tick()`, so it is the only
///   completion signal the foreground gets.
#[derive(Debug)]
pub struct Transmitter<P, T, S>
where
    P: OutputPin,
    T: TickTimer,
    S: AddressStore,
{
    /// TX pin with its level mapping
    pub output: PulseOutput<P>,
    /// Tick timer
    pub timer: TickTimerDriver<T>,
    /// Address storage
    pub store: S,
    builder: MessageBuilder,
    cursor: TxCursor,
    timing: TimingProfile,
    repeats: u8,
    store_offset: usize,
    ticks_left: u32,
    active: AtomicBool,
}

impl<P, T, S> Transmitter<P, T, S>
where
    P: OutputPin,
    T: TickTimer,
    S: AddressStore,
{
    /// Sets up a transmitter.
    ///
    /// Drives the pin off, computes the timer reload from the period unit, and
    /// restores a previously persisted address if `store` holds a valid one.
    ///
    /// # Arguments
    /// - `pin`: The output pin keying the 434 MHz transmitter.
    /// - `timer`: The periodic timer delivering ticks; left stopped.
    /// - `store`: Address storage, or [`NoStore`](crate::storage::NoStore).
    /// - `config`: Repeats, polarity, period and timing.
    pub fn new(pin: P, timer: T, mut store: S, config: TxConfig) -> Self {
        let mut builder = MessageBuilder::new();
        builder.set_translate(config.translate);
        match store.read_address(config.store_offset) {
            Ok(encoded) => {
                if builder.restore_address(&encoded) {
                    debug!("restored address {:?}", encoded);
                } else {
                    debug!("stored address is not valid, keeping default");
                }
            }
            Err(_) => debug!("no stored address, keeping default"),
        }
        let reload = timer_reload(config.period_us);
        info!(
            "lightwaverf tx setup: repeats {}, period {} us, reload {}",
            config.repeats,
            config.period_us,
            reload
        );
        Self {
            output: PulseOutput::new(pin, config.polarity),
            timer: TickTimerDriver::new(timer, reload),
            store,
            builder,
            cursor: TxCursor::new(),
            timing: config.timing,
            repeats: if valid_repeats(config.repeats) {
                config.repeats
            } else {
                DEFAULT_REPEATS
            },
            store_offset: config.store_offset,
            ticks_left: 0,
            active: AtomicBool::new(false),
        }
    }

    /// Whether a new message can be sent.
    pub fn is_ready(&self) -> bool {
        !self.active.load(Ordering::Acquire)
    }

    /// Non-blocking readiness check, for use with `nb::block!`.
    ///
    /// Only spin on this when ticks are delivered by an interrupt.
    pub fn poll_ready(&self) -> nb::Result<(), Infallible> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    fn ensure_ready(&self) -> Result<(), TxError> {
        if self.is_ready() {
            Ok(())
        } else {
            warn!("transmitter busy");
            Err(TxError::Busy)
        }
    }

    /// Sets the repeat count.
    ///
    /// During a transmission the new count applies to the running frame and
    /// [`remaining_ticks`](Self::remaining_ticks) is updated to match. A count at or
    /// below the repeats already completed ends the transmission after the
    /// repeat in progress.
    ///
    /// # Returns
    /// `false` if `repeats` is outside 1–39, in which case the count is unchanged.
    pub fn set_repeats(&mut self, repeats: u8) -> bool {
        if !valid_repeats(repeats) {
            warn!("ignoring repeat count {}", repeats);
            return false;
        }
        if !self.is_ready() {
            let frame_ticks = self.timing.frame_ticks(self.builder.message());
            let in_progress = self.cursor.repeat().saturating_add(1);
            let old_end = self.repeats.max(in_progress) as u32;
            let new_end = repeats.max(in_progress) as u32;
            self.ticks_left =
                (self.ticks_left + new_end * frame_ticks).saturating_sub(old_end * frame_ticks);
        }
        self.repeats = repeats;
        true
    }

    /// Replaces the pulse widths, keeping the gap multiplier.
    ///
    /// # Errors
    /// - [`TxError::Busy`] while transmitting
    /// - [`TxError::InvalidTiming`] if the counts are inconsistent
    pub fn configure_timing(&mut self, low: u8, high: u8, trail: u8, gap: u8) -> Result<(), TxError> {
        self.ensure_ready()?;
        let timing = TimingProfile::new(low, high, trail, gap)?;
        self.timing = timing.with_gap_multiplier(self.timing.gap_multiplier());
        debug!("timing low {} high {} trail {} gap {}", low, high, trail, gap);
        Ok(())
    }

    /// Sets how many extra gap intervals follow each frame.
    ///
    /// # Errors
    /// [`TxError::Busy`] while transmitting.
    pub fn configure_gap_multiplier(&mut self, gap_multiplier: u8) -> Result<(), TxError> {
        self.ensure_ready()?;
        self.timing = self.timing.with_gap_multiplier(gap_multiplier);
        Ok(())
    }

    /// Enables or disables nibble translation of raw messages.
    pub fn set_translate(&mut self, translate: bool) {
        self.builder.set_translate(translate);
    }

    /// Sets the storage offset used by later [`set_address`](Self::set_address) calls.
    pub fn set_store_offset(&mut self, offset: usize) {
        self.store_offset = offset;
    }

    /// Sends a raw 10-nibble message.
    ///
    /// # Errors
    /// - [`TxError::Busy`] while transmitting
    /// - [`TxError::InvalidLength`] unless `raw` is exactly 10 bytes
    pub fn send_raw(&mut self, raw: &[u8]) -> Result<(), TxError> {
        self.ensure_ready()?;
        let frame = self.builder.build_from_raw(raw)?;
        debug!("send raw {:?}", frame);
        self.arm();
        Ok(())
    }

    /// Sends a command to the currently configured address.
    ///
    /// # Errors
    /// [`TxError::Busy`] while transmitting.
    pub fn send_command(&mut self, cmd: Command) -> Result<(), TxError> {
        self.ensure_ready()?;
        let frame = self.builder.build_from_fields(&cmd);
        debug!("send command {:?}", frame);
        self.arm();
        Ok(())
    }

    /// Sets the 5-nibble address used by later commands and persists it.
    ///
    /// A storage write failure is logged and otherwise ignored; the address still
    /// applies until the next power cycle.
    ///
    /// # Errors
    /// [`TxError::Busy`] while transmitting.
    pub fn set_address(&mut self, address: &[u8; ADDR_LEN]) -> Result<(), TxError> {
        self.ensure_ready()?;
        let encoded = self.builder.set_address(address);
        if self.store.write_address(self.store_offset, &encoded).is_err() {
            warn!("failed to persist address at offset {}", self.store_offset);
        }
        debug!("address set to {:?}", encoded);
        Ok(())
    }

    fn arm(&mut self) {
        self.cursor.arm();
        self.ticks_left = self
            .timing
            .total_ticks(self.builder.message(), self.repeats);
        self.active.store(true, Ordering::Release);
        self.timer.start();
        trace!("armed for {} ticks", self.ticks_left);
    }

    /// Advances the transmitter by one tick.
    ///
    /// Call this from the timer interrupt at the configured period.
    pub fn tick(&mut self) {
        let out = self.cursor.tick(
            self.builder.message(),
            &self.timing,
            self.repeats,
            self.active.load(Ordering::Acquire),
        );
        if let Some(level) = out.level {
            self.output.set(level);
        }
        self.ticks_left = self.ticks_left.saturating_sub(1);
        if out.finished {
            self.timer.stop();
            self.ticks_left = 0;
            self.active.store(false, Ordering::Release);
        }
    }

    /// Ticks still needed before the running transmission completes.
    pub fn remaining_ticks(&self) -> u32 {
        self.ticks_left
    }

    /// The frame currently loaded.
    pub fn message(&self) -> &EncodedMessage {
        self.builder.message()
    }

    /// Framing state of the state machine.
    pub fn state(&self) -> TxState {
        self.cursor.state()
    }

    /// Timing in effect.
    pub fn timing(&self) -> &TimingProfile {
        &self.timing
    }

    /// Repeat count in effect.
    pub fn repeats(&self) -> u8 {
        self.repeats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ADDR_OFFSET, DEFAULT_FRAME, DEFAULT_GAP_COUNT, MSG_LEN};
    use crate::encoding::encode_frame;
    use crate::storage::NoStore;
    use crate::timer::ManualTicks;
    use embedded_hal::digital::ErrorType;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    #[derive(Debug, Default)]
    struct RecordingPin {
        writes: Vec<bool>,
    }

    impl ErrorType for RecordingPin {
        type Error = Infallible;
    }

    impl OutputPin for RecordingPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.writes.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.writes.push(true);
            Ok(())
        }
    }

    #[derive(Debug)]
    struct MemStore {
        bytes: [u8; 16],
        fail_writes: bool,
    }

    impl MemStore {
        fn erased() -> Self {
            Self {
                bytes: [0xFF; 16],
                fail_writes: false,
            }
        }
    }

    impl AddressStore for MemStore {
        type Error = ();

        fn read_address(&mut self, offset: usize) -> Result<[u8; ADDR_LEN], Self::Error> {
            let mut out = [0u8; ADDR_LEN];
            out.copy_from_slice(self.bytes.get(offset..offset + ADDR_LEN).ok_or(())?);
            Ok(out)
        }

        fn write_address(
            &mut self,
            offset: usize,
            address: &[u8; ADDR_LEN],
        ) -> Result<(), Self::Error> {
            if self.fail_writes {
                return Err(());
            }
            self.bytes
                .get_mut(offset..offset + ADDR_LEN)
                .ok_or(())?
                .copy_from_slice(address);
            Ok(())
        }
    }

    fn recording(config: TxConfig) -> Transmitter<RecordingPin, ManualTicks, NoStore> {
        Transmitter::new(RecordingPin::default(), ManualTicks::new(), NoStore, config)
    }

    /// Ticks until ready, returning `(tick, level)` for every pin write.
    fn run(tx: &mut Transmitter<RecordingPin, ManualTicks, NoStore>) -> (u32, Vec<(u32, bool)>) {
        let mut edges = Vec::new();
        let mut seen = tx.output.pin.writes.len();
        let mut ticks = 0;
        while !tx.is_ready() {
            tx.tick();
            ticks += 1;
            let writes = &tx.output.pin.writes;
            if writes.len() != seen {
                seen = writes.len();
                edges.push((ticks, writes[seen - 1]));
            }
            assert!(ticks < 100_000, "transmission never finished");
        }
        (ticks, edges)
    }

    #[test]
    fn test_setup_drives_pin_off() {
        let pin = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let mut tx = Transmitter::new(pin, ManualTicks::new(), NoStore, TxConfig::default());
        assert!(tx.is_ready());
        assert_eq!(tx.state(), TxState::Idle);
        assert_eq!(tx.repeats(), DEFAULT_REPEATS);
        assert_eq!(tx.message(), &DEFAULT_FRAME);
        assert_eq!(tx.timer.reload(), 1650);
        assert!(!tx.timer.is_running());
        tx.output.pin.done();
    }

    #[test]
    fn test_setup_inverted_drives_pin_high() {
        let pin = PinMock::new(&[PinTransaction::set(PinState::High)]);
        let mut tx = Transmitter::new(pin, ManualTicks::new(), NoStore, TxConfig::setup(5, 1, 330));
        assert_eq!(tx.output.polarity(), Polarity::Inverted);
        assert_eq!(tx.repeats(), 5);
        tx.output.pin.done();
    }

    #[test]
    fn test_repeat_bounds() {
        assert_eq!(TxConfig::setup(0, 0, 330).repeats, DEFAULT_REPEATS);
        assert_eq!(TxConfig::setup(40, 0, 330).repeats, DEFAULT_REPEATS);
        assert_eq!(TxConfig::setup(39, 0, 330).repeats, 39);
        assert_eq!(TxConfig::setup(1, 0, 330).repeats, 1);

        let mut tx = recording(TxConfig::default());
        assert!(!tx.set_repeats(0));
        assert!(!tx.set_repeats(40));
        assert_eq!(tx.repeats(), DEFAULT_REPEATS);
        assert!(tx.set_repeats(39));
        assert_eq!(tx.repeats(), 39);
    }

    #[test]
    fn test_invalid_repeats_in_config_fall_back() {
        let config = TxConfig {
            repeats: 0,
            ..TxConfig::default()
        };
        assert_eq!(recording(config).repeats(), DEFAULT_REPEATS);
    }

    #[test]
    fn test_period_fallback() {
        assert_eq!(TxConfig::setup(1, 0, 10).period_us, DEFAULT_PERIOD_US);
        let tx = recording(TxConfig::setup(1, 0, 140));
        assert_eq!(tx.timer.reload(), 700);
    }

    #[test]
    fn test_is_ready_is_idempotent() {
        let tx = recording(TxConfig::default());
        for _ in 0..10 {
            assert!(tx.is_ready());
            assert_eq!(tx.poll_ready(), Ok(()));
        }
        assert_eq!(tx.timer.timer.starts(), 0);
        assert_eq!(tx.output.pin.writes, vec![false]);
    }

    #[test]
    fn test_end_to_end_single_repeat() {
        let mut tx = recording(TxConfig::setup(1, 0, 330));
        tx.set_address(&[0x1, 0x2, 0x3, 0x4, 0x5]).unwrap();
        tx.send_command(Command::new(0x3, 0x1F, 0x2, 0x4)).unwrap();
        assert_eq!(
            tx.message(),
            &encode_frame(&[0x1, 0xF, 0x4, 0x3, 0x1, 0x2, 0x3, 0x4, 0x5, 0x2])
        );
        assert!(!tx.is_ready());
        assert_eq!(tx.poll_ready(), Err(nb::Error::WouldBlock));
        assert!(tx.timer.is_running());

        let expected = tx.timing().total_ticks(tx.message(), 1);
        assert_eq!(tx.remaining_ticks(), expected);
        for _ in 0..expected - 1 {
            tx.tick();
            assert!(!tx.is_ready());
        }
        tx.tick();
        assert!(tx.is_ready());
        assert_eq!(tx.remaining_ticks(), 0);
        assert!(!tx.timer.is_running());
        assert!(!tx.timer.timer.is_running());
        assert_eq!(tx.state(), TxState::Idle);
    }

    #[test]
    fn test_waveform_start_of_frame() {
        let mut tx = recording(TxConfig::setup(1, 0, 330));
        tx.send_raw(&[0x0; MSG_LEN]).unwrap();
        let (_, edges) = run(&mut tx);
        // lead-in trail off, msg_start on, trail off, byte_start on, trail off, first bit of 0xF6 on
        assert_eq!(
            &edges[..6],
            &[(2, false), (3, true), (4, false), (5, true), (6, false), (7, true)]
        );
        // msg_end pulse, its trail, then the trail of the gap interval
        let last_on = edges.iter().rposition(|(_, level)| *level).unwrap();
        let msg_end = edges[last_on].0;
        assert_eq!(&edges[last_on + 1..], &[(msg_end + 1, false), (msg_end + 34, false)]);
    }

    #[test]
    fn test_inverted_waveform() {
        let mut tx = recording(TxConfig::setup(1, 1, 330));
        tx.send_raw(&[0x0; MSG_LEN]).unwrap();
        let (_, edges) = run(&mut tx);
        assert_eq!(tx.output.pin.writes[0], true);
        assert_eq!(&edges[..3], &[(2, true), (3, false), (4, true)]);
    }

    #[test]
    fn test_repeats_and_gap_multiplier_extend_transmission() {
        let mut tx = recording(TxConfig::setup(3, 0, 330).with_gap_multiplier(2));
        tx.send_command(Command::new(0x1, 0x00, 0x1, 0x1)).unwrap();
        let frame = *tx.message();
        let (ticks, _) = run(&mut tx);
        let single = TimingProfile::DEFAULT.frame_ticks(&frame);
        assert_eq!(ticks, 1 + 3 * (single + 2 * DEFAULT_GAP_COUNT as u32));
        assert_eq!(tx.timer.timer.starts(), 1);
    }

    #[test]
    fn test_set_repeats_while_sending_updates_remaining_ticks() {
        // (armed repeats, new repeats, repeats completed before the change)
        for (armed, changed, completed) in [(3, 5, 0), (3, 1, 0), (3, 1, 1), (2, 2, 1)] {
            let mut tx = recording(TxConfig::setup(armed, 0, 330));
            tx.send_command(Command::new(0x1, 0x00, 0x1, 0x1)).unwrap();
            let frame_ticks = tx.timing().frame_ticks(tx.message());
            for _ in 0..1 + completed * frame_ticks + 10 {
                tx.tick();
            }
            assert!(!tx.is_ready());
            assert!(tx.set_repeats(changed));
            let remaining = tx.remaining_ticks();
            let (ticks, _) = run(&mut tx);
            assert_eq!(ticks, remaining);
            let expected_end = 1 + u32::from(changed.max(completed as u8 + 1)) * frame_ticks;
            assert_eq!(remaining, expected_end - (1 + completed * frame_ticks + 10));
        }
    }

    #[test]
    fn test_busy_guards() {
        let mut tx = recording(TxConfig::default());
        tx.send_command(Command::new(0x1, 0x00, 0x1, 0x1)).unwrap();
        let frame = *tx.message();
        assert_eq!(tx.send_raw(&[0; MSG_LEN]), Err(TxError::Busy));
        assert_eq!(tx.send_command(Command::new(0x0, 0xFF, 0xF, 0xF)), Err(TxError::Busy));
        assert_eq!(tx.set_address(&[9; ADDR_LEN]), Err(TxError::Busy));
        assert_eq!(tx.configure_timing(3, 7, 2, 72), Err(TxError::Busy));
        assert_eq!(tx.configure_gap_multiplier(1), Err(TxError::Busy));
        assert_eq!(tx.message(), &frame);
        let _ = run(&mut tx);
        assert!(tx.send_raw(&[0; MSG_LEN]).is_ok());
    }

    #[test]
    fn test_invalid_raw_is_not_armed() {
        let mut tx = recording(TxConfig::default());
        assert_eq!(
            tx.send_raw(&[1, 2, 3]),
            Err(TxError::InvalidLength {
                expected: MSG_LEN,
                actual: 3
            })
        );
        assert!(tx.is_ready());
        assert!(!tx.timer.is_running());
        assert_eq!(tx.message(), &DEFAULT_FRAME);
    }

    #[test]
    fn test_configure_timing() {
        let mut tx = recording(TxConfig::default().with_gap_multiplier(1));
        assert_eq!(tx.configure_timing(3, 7, 3, 72), Err(TxError::InvalidTiming));
        assert_eq!(tx.timing(), &TimingProfile::DEFAULT.with_gap_multiplier(1));
        tx.configure_timing(4, 8, 2, 100).unwrap();
        assert_eq!(tx.timing().low(), 4);
        assert_eq!(tx.timing().high(), 8);
        assert_eq!(tx.timing().gap(), 100);
        assert_eq!(tx.timing().gap_multiplier(), 1);
        tx.configure_gap_multiplier(0).unwrap();
        assert_eq!(tx.timing().gap_multiplier(), 0);
    }

    #[test]
    fn test_translate_off_passes_raw_through() {
        let mut tx = recording(TxConfig::default().with_translate(false).with_repeats(1));
        let raw = [0xF6, 0xEE, 0xED, 0xEB, 0xDE, 0xDD, 0xDB, 0xBE, 0xBD, 0x12];
        tx.send_raw(&raw).unwrap();
        assert_eq!(tx.message(), &raw);
        tx.set_translate(true);
        let _ = run(&mut tx);
        tx.send_raw(&[0x2; MSG_LEN]).unwrap();
        assert_eq!(tx.message(), &[0xED; MSG_LEN]);
    }

    #[test]
    fn test_address_is_persisted_and_restored() {
        let mut store = MemStore::erased();
        {
            let mut tx = Transmitter::new(
                RecordingPin::default(),
                ManualTicks::new(),
                &mut store,
                TxConfig::default().with_store_offset(3),
            );
            assert_eq!(tx.message(), &DEFAULT_FRAME);
            tx.set_address(&[0x1, 0x2, 0x3, 0x4, 0x5]).unwrap();
        }
        assert_eq!(&store.bytes[3..8], &[0xEE, 0xED, 0xEB, 0xDE, 0xDD]);

        let tx = Transmitter::new(
            RecordingPin::default(),
            ManualTicks::new(),
            &mut store,
            TxConfig::default().with_store_offset(3),
        );
        assert_eq!(
            &tx.message()[ADDR_OFFSET..ADDR_OFFSET + ADDR_LEN],
            &[0xEE, 0xED, 0xEB, 0xDE, 0xDD]
        );
    }

    #[test]
    fn test_store_offset_change_and_write_failure() {
        let mut store = MemStore::erased();
        let mut tx = Transmitter::new(
            RecordingPin::default(),
            ManualTicks::new(),
            &mut store,
            TxConfig::default(),
        );
        tx.set_store_offset(10);
        tx.set_address(&[0xA; ADDR_LEN]).unwrap();
        tx.store.fail_writes = true;
        assert!(tx.set_address(&[0xB; ADDR_LEN]).is_ok());
        assert_eq!(
            &tx.message()[ADDR_OFFSET..ADDR_OFFSET + ADDR_LEN],
            &[0x7E; ADDR_LEN]
        );
        drop(tx);
        assert_eq!(&store.bytes[10..15], &[0xB7; ADDR_LEN]);
        assert_eq!(&store.bytes[..10], &[0xFF; 10]);
    }

    #[test]
    fn test_block_on_ready() {
        let mut tx = recording(TxConfig::setup(1, 0, 330));
        tx.send_command(Command::new(0x1, 0x00, 0x1, 0x1)).unwrap();
        let _ = run(&mut tx);
        assert_eq!(nb::block!(tx.poll_ready()), Ok(()));
    }
}
