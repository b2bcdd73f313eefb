use crate::driver::Transmitter;
use crate::storage::AddressStore;
use crate::timer::TickTimer;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Drives `tick()` from a blocking delay until the current transmission completes.
///
/// This is a simple timing loop for use in environments where a timer interrupt
/// is unavailable or undesired. Pair it with [`ManualTicks`](crate::timer::ManualTicks)
/// as the transmitter's timer. Returns immediately if nothing is being sent.
///
/// # Arguments
/// - `tx`: A mutable reference to a `Transmitter` instance.
/// - `delay`: A delay provider implementing `DelayNs`, typically from the HAL.
/// - `tick_us`: The delay between each tick call, in microseconds (e.g. 330).
///
/// # Returns
/// The number of ticks delivered.
///
/// # Example
/// ```rust,ignore
/// use lwrf433::timer::run_tick_loop;
///
/// tx.send_command(Command::new(0x1, 0x00, 0x1, 0x1))?;
/// run_tick_loop(&mut tx, &mut delay, 330);
/// ```
///
/// # Notes
/// - The delay call itself adds to every tick; the waveform is only as accurate
///   as the delay provider and the loop overhead allow.
pub fn run_tick_loop<D, P, T, S>(
    tx: &mut Transmitter<P, T, S>,
    delay: &mut D,
    tick_us: u32,
) -> u32
where
    D: DelayNs,
    P: OutputPin,
    T: TickTimer,
    S: AddressStore,
{
    let mut ticks = 0;
    while !tx.is_ready() {
        tx.tick();
        ticks += 1;
        delay.delay_us(tick_us);
    }
    ticks
}
