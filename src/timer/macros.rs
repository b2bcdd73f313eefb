/// Declares a static global `LW_TRANSMITTER` instance protected by a `critical_section` mutex.
///
/// This macro creates a `static` singleton `LW_TRANSMITTER` suitable for use in
/// interrupt-based environments, where both the main thread and the timer ISR
/// need to reach the shared transmitter state.
///
/// # Arguments
/// - `$pin`: The concrete type of the TX pin (must implement `OutputPin`)
/// - `$timer`: The concrete timer type (must implement `TickTimer`)
/// - `$store`: The address storage type (must implement `AddressStore`)
///
/// # Example
/// ```rust,ignore
/// init_lw_transmitter!(MyTxPinType, MyTimerType, lwrf433::storage::NoStore);
/// ```
#[macro_export]
macro_rules! init_lw_transmitter {
    ( $pin:ty, $timer:ty, $store:ty ) => {
        pub static LW_TRANSMITTER: $crate::timer::GlobalTransmitter<$pin, $timer, $store> =
            $crate::timer::global_transmitter_init();
    };
}

/// Initializes the global `LW_TRANSMITTER` singleton with a new transmitter.
///
/// # Arguments
/// - `$pin`: The TX pin
/// - `$timer`: The tick timer
/// - `$store`: The address storage
/// - `$config`: Optional [`TxConfig`](crate::driver::TxConfig), defaults to `TxConfig::default()`
///
/// Evaluates to `Result<(), TxError>`.
///
/// # Example
/// ```rust,ignore
/// fn main() {
///     setup_lw_transmitter!(tx, timer, NoStore).unwrap();
/// }
/// ```
///
/// # Notes
/// - Requires `init_lw_transmitter!` to have been used earlier.
#[macro_export]
macro_rules! setup_lw_transmitter {
    ( $pin:expr, $timer:expr, $store:expr ) => {
        $crate::timer::global_transmitter_setup(
            &LW_TRANSMITTER,
            $pin,
            $timer,
            $store,
            $crate::driver::TxConfig::default(),
        )
    };
    ( $pin:expr, $timer:expr, $store:expr, $config:expr ) => {
        $crate::timer::global_transmitter_setup(&LW_TRANSMITTER, $pin, $timer, $store, $config)
    };
}

/// Calls `tick()` on the global `LW_TRANSMITTER` if it has been initialized.
///
/// Intended to be the whole body of the timer ISR.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIMER1() {
///     tick_lw_timer!();
/// }
/// ```
///
/// # Notes
/// - Safe to call before setup; it will silently do nothing.
#[macro_export]
macro_rules! tick_lw_timer {
    () => {
        $crate::timer::global_transmitter_tick(&LW_TRANSMITTER)
    };
}
