//! Shared mocks for unit tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use crate::interface::{Axis, InputInterface, Monotonic};
use crate::key::{GamepadState, Key};

/// Scripted hardware for driving the pipeline on the host.
pub struct MockInterface {
    pub axis_x: u16,
    pub axis_y: u16,
    /// Discrete keys whose line currently reads low (held).
    pub held: Vec<Key>,
    pub external: GamepadState,
    /// Battery samples in millivolts, consumed front to back.
    pub battery_samples: VecDeque<u32>,
    /// Returned once the scripted samples run out.
    pub battery_fallback: u32,
    pub fail_calibration: bool,
    pub calibrate_calls: u32,
}

impl MockInterface {
    pub fn new() -> Self {
        Self {
            axis_x: 2048,
            axis_y: 2048,
            held: Vec::new(),
            external: GamepadState::empty(),
            battery_samples: VecDeque::new(),
            battery_fallback: 0,
            fail_calibration: false,
            calibrate_calls: 0,
        }
    }
}

impl InputInterface for MockInterface {
    type Error = &'static str;

    fn read_axis(&mut self, axis: Axis) -> u16 {
        match axis {
            Axis::X => self.axis_x,
            Axis::Y => self.axis_y,
        }
    }

    fn read_level(&mut self, key: Key) -> bool {
        !self.held.contains(&key)
    }

    fn read_external(&mut self) -> GamepadState {
        self.external
    }

    fn calibrate_battery(&mut self) -> Result<(), Self::Error> {
        self.calibrate_calls += 1;
        if self.fail_calibration {
            Err("vref unavailable")
        } else {
            Ok(())
        }
    }

    fn read_battery_millivolts(&mut self) -> u32 {
        self.battery_samples
            .pop_front()
            .unwrap_or(self.battery_fallback)
    }
}

/// Monotonic clock backed by a shared counter. With a nonzero step the
/// clock advances on every query, which lets deadline loops expire
/// without a real timer.
#[derive(Clone)]
pub struct TestClock {
    now_us: Arc<AtomicI64>,
    step_us: i64,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            now_us: Arc::new(AtomicI64::new(0)),
            step_us: 0,
        }
    }

    pub fn advancing(step_us: i64) -> Self {
        Self {
            now_us: Arc::new(AtomicI64::new(0)),
            step_us,
        }
    }

    pub fn handle(&self) -> Arc<AtomicI64> {
        Arc::clone(&self.now_us)
    }
}

impl Monotonic for TestClock {
    fn now_micros(&self) -> i64 {
        self.now_us.fetch_add(self.step_us, Ordering::SeqCst)
    }
}
