use crate::driver::{Transmitter, TxConfig};
use crate::error::TxError;
use crate::storage::AddressStore;
use crate::timer::TickTimer;
use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal::digital::OutputPin;

/// Shared slot holding the transmitter used by the timer interrupt.
pub type GlobalTransmitter<P, T, S> = Mutex<RefCell<Option<Transmitter<P, T, S>>>>;

/// Used to initialize the global static `Transmitter` for use with
/// `critical_section`.
///
/// # Returns
/// * An empty mutable ref-cell
///
/// # Example
/// ```rust,ignore
/// use lwrf433::storage::NoStore;
/// use lwrf433::timer::{global_transmitter_init, GlobalTransmitter};
/// use some_hal::{Gpio4, Timer1};
///
/// static LW_TRANSMITTER: GlobalTransmitter<Gpio4, Timer1, NoStore> =
///     global_transmitter_init();
/// ```
pub const fn global_transmitter_init<P: OutputPin, T: TickTimer, S: AddressStore>()
-> GlobalTransmitter<P, T, S> {
    Mutex::new(RefCell::new(None))
}

/// Builds the transmitter and stores it in the global slot.
///
/// The slot is filled exactly once; the interrupt handler only ever sees a fully
/// constructed transmitter.
///
/// # Errors
/// [`TxError::AlreadyInitialized`] if the slot is already filled. The new pin,
/// timer and storage are dropped in that case.
///
/// # Example
/// ```rust,ignore
/// fn main() {
///     global_transmitter_setup(&LW_TRANSMITTER, pin, timer, NoStore, TxConfig::default())
///         .unwrap();
/// }
/// ```
pub fn global_transmitter_setup<P: OutputPin, T: TickTimer, S: AddressStore>(
    global: &'static GlobalTransmitter<P, T, S>,
    pin: P,
    timer: T,
    store: S,
    config: TxConfig,
) -> Result<(), TxError> {
    critical_section::with(|cs| {
        let mut slot = global.borrow(cs).borrow_mut();
        if slot.is_some() {
            return Err(TxError::AlreadyInitialized);
        }
        *slot = Some(Transmitter::new(pin, timer, store, config));
        Ok(())
    })
}

/// Runs the tick at each interrupt
///
/// Does nothing until the global slot has been filled.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIMER1() {
///     global_transmitter_tick(&LW_TRANSMITTER);
/// }
/// ```
pub fn global_transmitter_tick<P: OutputPin, T: TickTimer, S: AddressStore>(
    global: &'static GlobalTransmitter<P, T, S>,
) {
    critical_section::with(|cs| {
        if let Some(tx) = global.borrow(cs).borrow_mut().as_mut() {
            tx.tick();
        }
    });
}

/// Runs `f` on the global transmitter from foreground code.
///
/// # Errors
/// [`TxError::Uninitialized`] if the slot is empty.
///
/// # Example
/// ```rust,ignore
/// global_transmitter_with(&LW_TRANSMITTER, |tx| tx.send_command(cmd))??;
/// ```
pub fn global_transmitter_with<P, T, S, R>(
    global: &'static GlobalTransmitter<P, T, S>,
    f: impl FnOnce(&mut Transmitter<P, T, S>) -> R,
) -> Result<R, TxError>
where
    P: OutputPin,
    T: TickTimer,
    S: AddressStore,
{
    critical_section::with(|cs| {
        global
            .borrow(cs)
            .borrow_mut()
            .as_mut()
            .map(f)
            .ok_or(TxError::Uninitialized)
    })
}

/// Whether the global transmitter can accept a new message.
///
/// An empty slot reports `false`.
pub fn global_transmitter_ready<P: OutputPin, T: TickTimer, S: AddressStore>(
    global: &'static GlobalTransmitter<P, T, S>,
) -> bool {
    critical_section::with(|cs| {
        global
            .borrow(cs)
            .borrow()
            .as_ref()
            .is_some_and(Transmitter::is_ready)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Command;
    use crate::storage::NoStore;
    use crate::timer::ManualTicks;

    struct NullPin;

    impl embedded_hal::digital::ErrorType for NullPin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for NullPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    static LW_TRANSMITTER: GlobalTransmitter<NullPin, ManualTicks, NoStore> =
        global_transmitter_init();

    static EMPTY: GlobalTransmitter<NullPin, ManualTicks, NoStore> = global_transmitter_init();

    #[test]
    fn test_global_lifecycle() {
        assert!(!global_transmitter_ready(&LW_TRANSMITTER));
        global_transmitter_setup(
            &LW_TRANSMITTER,
            NullPin,
            ManualTicks::new(),
            NoStore,
            TxConfig::default().with_repeats(1),
        )
        .unwrap();
        assert_eq!(
            global_transmitter_setup(
                &LW_TRANSMITTER,
                NullPin,
                ManualTicks::new(),
                NoStore,
                TxConfig::default(),
            ),
            Err(TxError::AlreadyInitialized)
        );
        assert!(global_transmitter_ready(&LW_TRANSMITTER));

        let sent = global_transmitter_with(&LW_TRANSMITTER, |tx| {
            tx.send_command(Command::new(0x3, 0x1F, 0x2, 0x4))
        });
        assert_eq!(sent, Ok(Ok(())));
        assert!(!global_transmitter_ready(&LW_TRANSMITTER));

        let total = global_transmitter_with(&LW_TRANSMITTER, |tx| tx.remaining_ticks()).unwrap();
        for _ in 0..total {
            global_transmitter_tick(&LW_TRANSMITTER);
        }
        assert!(global_transmitter_ready(&LW_TRANSMITTER));
        let running =
            global_transmitter_with(&LW_TRANSMITTER, |tx| tx.timer.timer.is_running()).unwrap();
        assert!(!running);
    }

    #[test]
    fn test_empty_slot() {
        global_transmitter_tick(&EMPTY);
        assert!(!global_transmitter_ready(&EMPTY));
        assert_eq!(
            global_transmitter_with(&EMPTY, |tx| tx.is_ready()),
            Err(TxError::Uninitialized)
        );
    }
}
