//! Raw electrical state sampling

use crate::config::Config;
use crate::interface::{Axis, InputInterface};
use crate::key::{GamepadState, Key};

/// Stick position on one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AxisZone {
    /// At rest around center.
    Idle,
    /// Deflected past center but within the high threshold (Down / Right).
    Low,
    /// Deflected past center + deflection (Up / Left).
    High,
}

/// Reads one raw [`GamepadState`] per invocation.
///
/// Each stick axis is a single ADC channel shared between two opposing
/// directions; the magnitude of the sample selects the direction, so the
/// two bits of an axis can never be set together. Discrete buttons are
/// active-low lines. No filtering happens here; the output is one noisy
/// sample for the [`DebounceEngine`](crate::DebounceEngine).
pub struct Sampler {
    center: u16,
    deflection: u16,
}

impl Sampler {
    pub fn new(config: &Config) -> Self {
        Self {
            center: config.axis_center,
            deflection: config.axis_deflection,
        }
    }

    /// Read all axes and button lines once.
    pub fn sample<I: InputInterface>(&self, interface: &mut I) -> GamepadState {
        let mut raw = GamepadState::empty();

        match self.zone(interface.read_axis(Axis::Y)) {
            AxisZone::High => raw.set(Key::Up),
            AxisZone::Low => raw.set(Key::Down),
            AxisZone::Idle => {}
        }
        match self.zone(interface.read_axis(Axis::X)) {
            AxisZone::High => raw.set(Key::Left),
            AxisZone::Low => raw.set(Key::Right),
            AxisZone::Idle => {}
        }

        for key in Key::DISCRETE {
            if !interface.read_level(key) {
                raw.set(key);
            }
        }

        raw
    }

    fn zone(&self, sample: u16) -> AxisZone {
        if sample > self.center + self.deflection {
            AxisZone::High
        } else if sample > self.center {
            AxisZone::Low
        } else {
            AxisZone::Idle
        }
    }
}
