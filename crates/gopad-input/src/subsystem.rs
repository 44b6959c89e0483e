//! Shared published state and reader-side accessors

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use core::time::Duration;

use embedded_hal::delay::DelayNs;

use crate::config::Config;
use crate::interface::Monotonic;
use crate::key::{GamepadState, Key};

/// The single shared handle between the sampling task and all readers.
///
/// Construct one per process and share it by reference (the firmware wraps
/// it in an `Arc`). The sampling task is the only writer of the published
/// state; readers load it with one atomic read, so a snapshot always
/// corresponds to some completed tick and torn bitmasks cannot occur.
///
/// The last-read timestamp is a diagnostic only. It is stored in
/// milliseconds so a plain 32-bit atomic suffices on targets without
/// 64-bit atomics; zero is reserved as the "never read" sentinel.
pub struct InputSubsystem<C> {
    published: AtomicU32,
    last_read_ms: AtomicU32,
    running: AtomicBool,
    stop_requested: AtomicBool,
    poll_interval_ms: u32,
    clock: C,
}

impl<C: Monotonic> InputSubsystem<C> {
    pub fn new(config: &Config, clock: C) -> Self {
        Self {
            published: AtomicU32::new(0),
            last_read_ms: AtomicU32::new(0),
            running: AtomicBool::new(false),
            stop_requested: AtomicBool::new(false),
            poll_interval_ms: config.poll_interval_ms,
            clock,
        }
    }

    /// Overwrite the published state. Called once per tick by the driver.
    pub fn publish(&self, state: GamepadState) {
        self.published.store(state.bits(), Ordering::Release);
    }

    /// Snapshot of the most recently completed tick.
    ///
    /// Records "now" as the last gamepad read time as a side effect.
    pub fn read_gamepad(&self) -> GamepadState {
        let now_ms = (self.clock.now_micros() / 1_000) as u32;
        // 0 is the never-read sentinel; a read in the first millisecond
        // after boot still counts as a read.
        self.last_read_ms.store(now_ms.max(1), Ordering::Release);
        GamepadState::from_bits(self.published.load(Ordering::Acquire))
    }

    /// Whether `key` is pressed in the current published state.
    pub fn key_is_pressed(&self, key: Key) -> bool {
        self.read_gamepad().contains(key)
    }

    /// Busy-poll until `key` reaches the requested pressed state.
    ///
    /// Suspends only the calling context, via short delays at the
    /// configured poll interval. There is no timeout; see
    /// [`wait_for_key_deadline`](Self::wait_for_key_deadline) for a
    /// bounded wait.
    pub fn wait_for_key<D: DelayNs>(&self, key: Key, pressed: bool, delay: &mut D) {
        while self.key_is_pressed(key) != pressed {
            delay.delay_ms(self.poll_interval_ms);
        }
    }

    /// Like [`wait_for_key`](Self::wait_for_key) but gives up after
    /// `timeout`. Returns whether the condition was met.
    pub fn wait_for_key_deadline<D: DelayNs>(
        &self,
        key: Key,
        pressed: bool,
        delay: &mut D,
        timeout: Duration,
    ) -> bool {
        let deadline = self.clock.now_micros() + timeout.as_micros() as i64;
        while self.key_is_pressed(key) != pressed {
            if self.clock.now_micros() >= deadline {
                return false;
            }
            delay.delay_ms(self.poll_interval_ms);
        }
        true
    }

    /// Time elapsed since the last `read_gamepad` call, or
    /// `Duration::ZERO` if the state was never read.
    pub fn time_since_last_read(&self) -> Duration {
        let last_ms = self.last_read_ms.load(Ordering::Acquire);
        if last_ms == 0 {
            return Duration::ZERO;
        }
        let now_ms = (self.clock.now_micros() / 1_000) as u32;
        Duration::from_millis(u64::from(now_ms.saturating_sub(last_ms)))
    }

    /// Claim the running flag for a new sampling task.
    ///
    /// Returns `false` (and logs) if sampling is already running; starting
    /// twice is a usage error, not a fatal one.
    pub fn try_start(&self) -> bool {
        if self.running.swap(true, Ordering::AcqRel) {
            log::error!("Input already initialized");
            return false;
        }
        self.stop_requested.store(false, Ordering::Release);
        true
    }

    /// Cooperative stop: the sampling loop observes this at the top of
    /// each iteration and exits after finishing the in-progress tick.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
    }

    /// Checked by the sampling loop each iteration.
    pub fn should_run(&self) -> bool {
        !self.stop_requested.load(Ordering::Acquire)
    }

    /// Called by the sampling task as it exits; allows a later restart.
    pub fn mark_stopped(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use crate::testutil::TestClock;
    use std::sync::atomic::Ordering as StdOrdering;
    use std::sync::Arc;

    fn subsystem(clock: TestClock) -> InputSubsystem<TestClock> {
        InputSubsystem::new(&Builder::new().build().unwrap(), clock)
    }

    /// DelayNs mock that runs a callback on every delay.
    struct CallbackDelay<F: FnMut()> {
        on_delay: F,
    }

    impl<F: FnMut()> DelayNs for CallbackDelay<F> {
        fn delay_ns(&mut self, _ns: u32) {
            (self.on_delay)();
        }
    }

    fn pressed(key: Key) -> GamepadState {
        let mut state = GamepadState::empty();
        state.set(key);
        state
    }

    #[test]
    fn read_is_idempotent_between_ticks() {
        let sub = subsystem(TestClock::new());
        sub.publish(pressed(Key::A));
        assert_eq!(sub.read_gamepad(), sub.read_gamepad());
    }

    #[test]
    fn publish_overwrites_previous_state() {
        let sub = subsystem(TestClock::new());
        sub.publish(pressed(Key::A));
        assert!(sub.key_is_pressed(Key::A));
        sub.publish(GamepadState::empty());
        assert!(!sub.key_is_pressed(Key::A));
    }

    #[test]
    fn time_since_last_read_sentinel_and_elapsed() {
        let clock = TestClock::new();
        let handle = clock.handle();
        let sub = subsystem(clock);

        assert_eq!(sub.time_since_last_read(), Duration::ZERO);

        handle.store(5_000_000, StdOrdering::SeqCst);
        sub.read_gamepad();
        handle.store(5_250_000, StdOrdering::SeqCst);
        assert_eq!(sub.time_since_last_read(), Duration::from_millis(250));
    }

    #[test]
    fn read_in_first_millisecond_still_counts() {
        let clock = TestClock::new();
        let handle = clock.handle();
        let sub = subsystem(clock);

        // Clock reads zero at the first read; it must still register.
        sub.read_gamepad();
        handle.store(100_000, StdOrdering::SeqCst);
        assert!(sub.time_since_last_read() > Duration::ZERO);
    }

    #[test]
    fn wait_for_key_returns_when_condition_met() {
        let sub = Arc::new(subsystem(TestClock::new()));
        let publisher = Arc::clone(&sub);
        let mut polls = 0u32;
        let mut delay = CallbackDelay {
            on_delay: move || {
                polls += 1;
                if polls == 3 {
                    publisher.publish(pressed(Key::Start));
                }
            },
        };
        sub.wait_for_key(Key::Start, true, &mut delay);
        assert!(sub.key_is_pressed(Key::Start));
    }

    #[test]
    fn wait_for_key_deadline_times_out() {
        // Clock advances 600 us per query; a 1 ms deadline expires after
        // a couple of polls with the key never arriving.
        let sub = subsystem(TestClock::advancing(600));
        let mut delay = CallbackDelay { on_delay: || {} };
        let met = sub.wait_for_key_deadline(Key::A, true, &mut delay, Duration::from_millis(1));
        assert!(!met);
    }

    #[test]
    fn wait_for_key_deadline_observes_condition() {
        let sub = subsystem(TestClock::advancing(10));
        sub.publish(pressed(Key::Menu));
        let mut delay = CallbackDelay { on_delay: || {} };
        let met = sub.wait_for_key_deadline(Key::Menu, true, &mut delay, Duration::from_millis(1));
        assert!(met);
    }

    #[test]
    fn second_start_is_rejected_until_stopped() {
        let sub = subsystem(TestClock::new());
        assert!(sub.try_start());
        assert!(!sub.try_start());

        sub.request_stop();
        assert!(!sub.should_run());
        sub.mark_stopped();
        assert!(!sub.is_running());

        // Restart after a clean stop is supported.
        assert!(sub.try_start());
        assert!(sub.should_run());
    }
}
