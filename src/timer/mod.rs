//! Tick timer driver and tick-loop utilities.
//!
//! The transmitter needs a periodic interrupt to call
//! [`Transmitter::tick`](crate::driver::Transmitter::tick). The hardware side is
//! abstracted by [`TickTimer`]; [`TickTimerDriver`] wraps it and makes arming and
//! disarming atomic with respect to the interrupt using `critical_section::with`.
//!
//! Two ways of delivering ticks are supported: an interrupt service routine
//! (`timer-isr` feature, see the global helpers and macros) or a blocking loop over
//! `embedded_hal::delay::DelayNs` (`delay-loop` feature). [`ManualTicks`] is the
//! timer to plug in when ticks come from a loop rather than hardware.
//!
//! Contains helpers for computing the timer reload value:
//! - `timer_reload`: reload for the default 80 MHz / 16 timer clock
//! - `compute_timer_reload`: runtime reload calculator for other clocks
//!
//! | Period unit | Reload (counts) | Tick interval |
//! |-------------|-----------------|---------------|
//! |      330 µs |            1650 |        330 µs |
//! |      250 µs |            1250 |        250 µs |
//! |      140 µs |             700 |        140 µs |

use libm::round;

use crate::consts::{DEFAULT_PERIOD_US, MAX_PERIOD_US, MIN_PERIOD_US, TIMER_COUNTS_PER_UNIT};

#[cfg(feature = "delay-loop")]
mod delay;
#[cfg_attr(feature = "delay-loop", allow(unused_imports))]
#[cfg(feature = "delay-loop")]
pub use delay::*;

#[cfg(feature = "timer-isr")]
mod isr;
#[cfg_attr(feature = "timer-isr", allow(unused_imports))]
#[cfg(feature = "timer-isr")]
pub use isr::*;

#[cfg(feature = "timer-isr")]
mod macros;

/// The periodic hardware timer that delivers ticks.
///
/// Implementations map these calls onto the platform timer peripheral. The
/// driver only ever calls them inside a critical section, in the order
/// `attach, enable` to start and `disable, detach` to stop.
pub trait TickTimer {
    /// Routes the timer interrupt to the tick handler.
    fn attach(&mut self);
    /// Starts the timer in periodic mode with the given reload value.
    fn enable(&mut self, reload: u32);
    /// Stops the timer.
    fn disable(&mut self);
    /// Unroutes the timer interrupt.
    fn detach(&mut self);
}

impl<T: TickTimer> TickTimer for &mut T {
    fn attach(&mut self) {
        (**self).attach();
    }

    fn enable(&mut self, reload: u32) {
        (**self).enable(reload);
    }

    fn disable(&mut self) {
        (**self).disable();
    }

    fn detach(&mut self) {
        (**self).detach();
    }
}

/// Owns a [`TickTimer`] and its reload value.
#[derive(Debug)]
pub struct TickTimerDriver<T: TickTimer> {
    /// The hardware timer
    pub timer: T,
    reload: u32,
    running: bool,
}

impl<T: TickTimer> TickTimerDriver<T> {
    /// Wraps `timer`; it is not started.
    pub fn new(timer: T, reload: u32) -> Self {
        Self {
            timer,
            reload,
            running: false,
        }
    }

    /// Attaches the tick handler and enables the timer.
    pub fn start(&mut self) {
        critical_section::with(|_| {
            self.timer.attach();
            self.timer.enable(self.reload);
            self.running = true;
        });
    }

    /// Disables the timer and detaches the tick handler.
    pub fn stop(&mut self) {
        critical_section::with(|_| {
            self.timer.disable();
            self.timer.detach();
            self.running = false;
        });
    }

    /// Whether the timer is currently enabled.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Reload value written on every start.
    pub fn reload(&self) -> u32 {
        self.reload
    }
}

/// A [`TickTimer`] with no hardware behind it.
///
/// Ticks are delivered by calling `tick()` directly, from a delay loop or a test.
/// It only remembers whether it is enabled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ManualTicks {
    enabled: bool,
    attached: bool,
    reload: u32,
    starts: u16,
}

impl ManualTicks {
    /// Creates a stopped timer.
    pub const fn new() -> Self {
        Self {
            enabled: false,
            attached: false,
            reload: 0,
            starts: 0,
        }
    }

    /// Whether the timer is enabled and attached.
    pub fn is_running(&self) -> bool {
        self.enabled && self.attached
    }

    /// Last reload value passed to `enable`.
    pub fn reload(&self) -> u32 {
        self.reload
    }

    /// Number of times the timer has been enabled.
    pub fn starts(&self) -> u16 {
        self.starts
    }
}

impl TickTimer for ManualTicks {
    fn attach(&mut self) {
        self.attached = true;
    }

    fn enable(&mut self, reload: u32) {
        self.enabled = true;
        self.reload = reload;
        self.starts = self.starts.saturating_add(1);
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn detach(&mut self) {
        self.attached = false;
    }
}

/// Clamps a period unit to the accepted range, falling back to the default.
pub const fn validate_period(period_us: u16) -> u16 {
    if period_us >= MIN_PERIOD_US && period_us <= MAX_PERIOD_US {
        period_us
    } else {
        DEFAULT_PERIOD_US
    }
}

/// Timer reload for a period unit on the default timer clock.
///
/// Out-of-range periods use [`DEFAULT_PERIOD_US`].
pub const fn timer_reload(period_us: u16) -> u32 {
    TIMER_COUNTS_PER_UNIT * validate_period(period_us) as u32
}

/// Computes the reload value for an arbitrary periodic timer.
///
/// # Arguments
/// - `f_cpu`: timer input clock in Hz
/// - `prescaler`: timer prescaler (e.g., 1, 16, 256)
/// - `tick_us`: desired tick interval in microseconds
///
/// # Returns
/// - Reload value (rounds to nearest integer)
pub fn compute_timer_reload(f_cpu: u32, prescaler: u32, tick_us: f32) -> u32 {
    let counts_per_second = f_cpu as f64 / prescaler as f64;
    round(counts_per_second * (tick_us as f64 / 1_000_000.0)) as u32
}
