//! Input acquisition core for handheld gamepads with an analog stick on
//! shared ADC channels and active-low discrete buttons.
//!
//! The crate is split the same way the hardware is: a [`Sampler`] turns one
//! round of raw electrical reads into a noisy [`GamepadState`] bitmask, the
//! [`DebounceEngine`] filters that into a stable logical state, and the
//! [`InputSubsystem`] publishes it through a single atomic store so readers
//! on other tasks never observe a torn snapshot. Battery reporting
//! ([`BatteryMonitor`]) is independent of the sampling tick and reads a
//! dedicated divider channel on demand.
//!
//! All hardware access goes through the [`InputInterface`] trait, so the
//! whole pipeline runs on the host for testing.

mod battery;
mod config;
mod debounce;
mod driver;
mod error;
mod interface;
mod key;
mod sampler;
mod subsystem;
#[cfg(test)]
mod testutil;

pub use battery::{BatteryMonitor, BatteryState};
pub use config::{Builder, Config};
pub use debounce::DebounceEngine;
pub use driver::SamplingDriver;
pub use error::{BatteryError, BuilderError};
pub use interface::{Axis, InputInterface, Monotonic};
pub use key::{GamepadState, Key};
pub use sampler::Sampler;
pub use subsystem::InputSubsystem;
