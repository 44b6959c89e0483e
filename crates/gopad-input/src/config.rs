//! Input subsystem configuration and builder

use crate::error::BuilderError;

/// Full-scale value of a 12-bit ADC sample.
pub const ADC_FULL_SCALE: u16 = 4095;

/// Input subsystem configuration.
///
/// Use [`Builder`] to create a validated `Config`.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Sampling tick period in milliseconds.
    pub tick_period_ms: u32,
    /// Poll interval for `wait_for_key` in milliseconds.
    pub poll_interval_ms: u32,
    /// Axis rest point (raw ADC counts).
    pub axis_center: u16,
    /// Deflection beyond center that selects the "high" direction.
    pub axis_deflection: u16,
    /// Consecutive battery samples averaged per read.
    pub battery_samples: u32,
    /// Voltage divider high-side resistance in ohms.
    pub divider_r1: u32,
    /// Voltage divider low-side (measured) resistance in ohms.
    pub divider_r2: u32,
    /// Pack voltage reported as 0% (millivolts).
    pub battery_empty_mv: u32,
    /// Pack voltage reported as 100% (millivolts).
    pub battery_full_mv: u32,
}

/// Builder for [`Config`].
///
/// Defaults match the ODROID-GO: 10 ms tick, 2048/1024 stick thresholds,
/// 4-sample battery averaging through a 10k/10k divider, 3.5 V empty and
/// 4.2 V full.
///
/// # Example
///
/// ```
/// use gopad_input::Builder;
///
/// let config = Builder::new()
///     .tick_period_ms(10)
///     .battery_range_mv(3500, 4200)
///     .build()
///     .expect("valid configuration");
/// ```
pub struct Builder {
    tick_period_ms: u32,
    poll_interval_ms: u32,
    axis_center: u16,
    axis_deflection: u16,
    battery_samples: u32,
    divider_r1: u32,
    divider_r2: u32,
    battery_empty_mv: u32,
    battery_full_mv: u32,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            tick_period_ms: 10,
            poll_interval_ms: 1,
            axis_center: 2048,
            axis_deflection: 1024,
            battery_samples: 4,
            divider_r1: 10_000,
            divider_r2: 10_000,
            battery_empty_mv: 3500,
            battery_full_mv: 4200,
        }
    }
}

impl Builder {
    /// Create a new Builder with ODROID-GO defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sampling tick period in milliseconds.
    pub fn tick_period_ms(mut self, ms: u32) -> Self {
        self.tick_period_ms = ms;
        self
    }

    /// Set the `wait_for_key` poll interval in milliseconds.
    pub fn poll_interval_ms(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Set the stick decode thresholds (raw ADC counts).
    pub fn axis_thresholds(mut self, center: u16, deflection: u16) -> Self {
        self.axis_center = center;
        self.axis_deflection = deflection;
        self
    }

    /// Set how many consecutive battery samples are averaged per read.
    pub fn battery_samples(mut self, count: u32) -> Self {
        self.battery_samples = count;
        self
    }

    /// Set the battery voltage divider resistances in ohms.
    pub fn battery_divider(mut self, r1: u32, r2: u32) -> Self {
        self.divider_r1 = r1;
        self.divider_r2 = r2;
        self
    }

    /// Set the pack voltages mapped to 0% and 100% (millivolts).
    pub fn battery_range_mv(mut self, empty_mv: u32, full_mv: u32) -> Self {
        self.battery_empty_mv = empty_mv;
        self.battery_full_mv = full_mv;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`BuilderError`] if the tick period or poll interval is
    /// zero, the axis thresholds exceed the ADC range, the divider R2 is
    /// zero, the battery sample count is zero, or the full voltage does
    /// not exceed the empty voltage.
    pub fn build(self) -> Result<Config, BuilderError> {
        if self.tick_period_ms == 0 {
            return Err(BuilderError::InvalidTickPeriod);
        }
        if self.poll_interval_ms == 0 {
            return Err(BuilderError::InvalidPollInterval);
        }
        if self.axis_center.checked_add(self.axis_deflection).is_none()
            || self.axis_center + self.axis_deflection >= ADC_FULL_SCALE
        {
            return Err(BuilderError::InvalidAxisThresholds {
                center: self.axis_center,
                deflection: self.axis_deflection,
            });
        }
        if self.battery_samples == 0 {
            return Err(BuilderError::InvalidSampleCount);
        }
        if self.divider_r2 == 0 {
            return Err(BuilderError::InvalidDivider);
        }
        if self.battery_full_mv <= self.battery_empty_mv {
            return Err(BuilderError::InvalidVoltageRange {
                empty_mv: self.battery_empty_mv,
                full_mv: self.battery_full_mv,
            });
        }
        Ok(Config {
            tick_period_ms: self.tick_period_ms,
            poll_interval_ms: self.poll_interval_ms,
            axis_center: self.axis_center,
            axis_deflection: self.axis_deflection,
            battery_samples: self.battery_samples,
            divider_r1: self.divider_r1,
            divider_r2: self.divider_r2,
            battery_empty_mv: self.battery_empty_mv,
            battery_full_mv: self.battery_full_mv,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build() {
        let config = Builder::new().build().unwrap();
        assert_eq!(config.tick_period_ms, 10);
        assert_eq!(config.poll_interval_ms, 1);
        assert_eq!(config.axis_center, 2048);
        assert_eq!(config.axis_deflection, 1024);
        assert_eq!(config.battery_samples, 4);
        assert_eq!(config.divider_r1, 10_000);
        assert_eq!(config.divider_r2, 10_000);
        assert_eq!(config.battery_empty_mv, 3500);
        assert_eq!(config.battery_full_mv, 4200);
    }

    #[test]
    fn rejects_zero_tick_period() {
        let result = Builder::new().tick_period_ms(0).build();
        assert!(matches!(result, Err(BuilderError::InvalidTickPeriod)));
    }

    #[test]
    fn rejects_zero_poll_interval() {
        let result = Builder::new().poll_interval_ms(0).build();
        assert!(matches!(result, Err(BuilderError::InvalidPollInterval)));
    }

    #[test]
    fn rejects_axis_thresholds_beyond_adc_range() {
        let result = Builder::new().axis_thresholds(3000, 1100).build();
        assert!(matches!(
            result,
            Err(BuilderError::InvalidAxisThresholds { .. })
        ));
    }

    #[test]
    fn rejects_zero_battery_samples() {
        let result = Builder::new().battery_samples(0).build();
        assert!(matches!(result, Err(BuilderError::InvalidSampleCount)));
    }

    #[test]
    fn rejects_zero_divider_r2() {
        let result = Builder::new().battery_divider(10_000, 0).build();
        assert!(matches!(result, Err(BuilderError::InvalidDivider)));
    }

    #[test]
    fn rejects_inverted_voltage_range() {
        let result = Builder::new().battery_range_mv(4200, 4200).build();
        assert!(matches!(
            result,
            Err(BuilderError::InvalidVoltageRange { .. })
        ));
    }
}
