//! Error types for configuration building and battery reads

/// Errors that can occur when building a [`Config`](crate::Config).
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Tick period must be at least 1 ms.
    InvalidTickPeriod,
    /// Wait poll interval must be at least 1 ms.
    InvalidPollInterval,
    /// Axis center plus deflection must stay below the 12-bit ADC range.
    InvalidAxisThresholds {
        /// Requested rest point in raw counts
        center: u16,
        /// Requested high-direction deflection in raw counts
        deflection: u16,
    },
    /// Battery sample count must be nonzero.
    InvalidSampleCount,
    /// Divider R2 must be nonzero (it is the measured leg).
    InvalidDivider,
    /// Full voltage must exceed empty voltage.
    InvalidVoltageRange {
        /// Requested 0% threshold in millivolts
        empty_mv: u32,
        /// Requested 100% threshold in millivolts
        full_mv: u32,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::InvalidTickPeriod => write!(f, "Tick period must be >= 1 ms"),
            BuilderError::InvalidPollInterval => write!(f, "Poll interval must be >= 1 ms"),
            BuilderError::InvalidAxisThresholds { center, deflection } => write!(
                f,
                "Axis thresholds out of ADC range: center {center} + deflection {deflection}"
            ),
            BuilderError::InvalidSampleCount => write!(f, "Battery sample count must be nonzero"),
            BuilderError::InvalidDivider => write!(f, "Divider R2 must be nonzero"),
            BuilderError::InvalidVoltageRange { empty_mv, full_mv } => write!(
                f,
                "Invalid battery range: empty {empty_mv} mV, full {full_mv} mV"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}

/// Errors returned by [`BatteryMonitor::read`](crate::BatteryMonitor::read).
#[derive(Debug, PartialEq, Eq)]
pub enum BatteryError {
    /// The battery ADC could not be calibrated; readings would be garbage.
    ///
    /// Returned on every read once calibration has failed. The underlying
    /// hardware error is logged at the point of failure.
    Uncalibrated,
}

impl core::fmt::Display for BatteryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BatteryError::Uncalibrated => write!(f, "Battery ADC is not calibrated"),
        }
    }
}

impl core::error::Error for BatteryError {}
