//! Hardware interface abstraction
//!
//! [`InputInterface`] is the boundary between the pure input pipeline and
//! the GPIO/ADC hardware underneath it. The firmware implements it with raw
//! ESP-IDF calls; tests implement it with scripted values.

use crate::key::GamepadState;

/// One analog stick axis. Each axis is a single shared ADC channel that
/// carries both opposing directions by deflection magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal axis (Left / Right).
    X,
    /// Vertical axis (Up / Down).
    Y,
}

/// Trait for raw hardware access used by the input pipeline.
///
/// Implementations are expected to be infallible for the per-tick reads:
/// the sampling loop never errors and always publishes its best state.
/// Only battery calibration has an error path, because a missing ADC
/// reference voltage must not silently produce wrong readings.
pub trait InputInterface {
    /// Error type for battery calibration.
    type Error: core::fmt::Debug;

    /// Read the raw 12-bit sample (0..=4095) for one stick axis.
    fn read_axis(&mut self, axis: Axis) -> u16;

    /// Read the raw electrical level of a discrete button line.
    ///
    /// Buttons are active low: `false` means the button is held.
    fn read_level(&mut self, key: crate::key::Key) -> bool;

    /// Read an external (shift-register style) controller, if any.
    ///
    /// Unsupported: the external controller protocol was never specified,
    /// so the default is a no-op returning the empty state. Kept as a seam
    /// so the raw state union in the driver does not change when a
    /// protocol lands.
    fn read_external(&mut self) -> GamepadState {
        GamepadState::empty()
    }

    /// Characterize the battery ADC channel.
    ///
    /// Called lazily by [`BatteryMonitor`](crate::BatteryMonitor) before
    /// the first battery read. An error here marks the monitor as failed;
    /// it is not retried.
    fn calibrate_battery(&mut self) -> Result<(), Self::Error>;

    /// Take one battery sample and convert it to millivolts at the ADC pin
    /// (divider side, not pack side) using the calibration table.
    fn read_battery_millivolts(&mut self) -> u32;
}

/// Monotonic time source, in microseconds since an arbitrary epoch.
///
/// Used for the "time since last gamepad read" diagnostic and wait
/// deadlines, never for debounce correctness.
pub trait Monotonic {
    fn now_micros(&self) -> i64;
}
