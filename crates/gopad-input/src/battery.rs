//! Battery voltage and charge reporting

use crate::config::Config;
use crate::error::BatteryError;
use crate::interface::InputInterface;

/// One battery reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatteryState {
    /// Reconstructed pack voltage in millivolts (not clamped).
    pub millivolts: u32,
    /// Charge estimate in 0..=100, clamped by construction.
    pub percentage: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Calibration {
    Uncalibrated,
    Calibrated,
    Failed,
}

/// On-demand battery reader, independent of the sampling tick.
///
/// Each read averages a burst of samples from the divider channel and
/// blends the average into a two-point IIR smoother:
/// the first read seeds the accumulator, later reads compute
/// `acc = (acc + avg) / 2`. The smoothed divider voltage is scaled back to
/// pack voltage through R1/R2 and mapped linearly onto the configured
/// empty..full range.
///
/// ADC calibration is attempted once, lazily, on the first read. If the
/// hardware cannot be characterized the monitor latches `Failed` and every
/// read returns [`BatteryError::Uncalibrated`] rather than a fabricated
/// voltage.
///
/// The accumulator is plain mutable state; callers that read from several
/// contexts must serialize access (the firmware keeps the monitor behind a
/// mutex).
pub struct BatteryMonitor {
    calibration: Calibration,
    smoothed_mv: Option<f32>,
    samples: u32,
    r1: u32,
    r2: u32,
    empty_mv: u32,
    full_mv: u32,
}

impl BatteryMonitor {
    pub fn new(config: &Config) -> Self {
        Self {
            calibration: Calibration::Uncalibrated,
            smoothed_mv: None,
            samples: config.battery_samples,
            r1: config.divider_r1,
            r2: config.divider_r2,
            empty_mv: config.battery_empty_mv,
            full_mv: config.battery_full_mv,
        }
    }

    /// Sample the battery channel and report pack voltage and charge.
    pub fn read<I: InputInterface>(
        &mut self,
        interface: &mut I,
    ) -> Result<BatteryState, BatteryError> {
        match self.calibration {
            Calibration::Calibrated => {}
            Calibration::Failed => return Err(BatteryError::Uncalibrated),
            Calibration::Uncalibrated => match interface.calibrate_battery() {
                Ok(()) => self.calibration = Calibration::Calibrated,
                Err(err) => {
                    log::error!("Battery ADC calibration failed: {:?}", err);
                    self.calibration = Calibration::Failed;
                    return Err(BatteryError::Uncalibrated);
                }
            },
        }

        let mut sum = 0u32;
        for _ in 0..self.samples {
            sum += interface.read_battery_millivolts();
        }
        let average = sum as f32 / self.samples as f32;

        let smoothed = match self.smoothed_mv {
            None => average,
            Some(previous) => (previous + average) / 2.0,
        };
        self.smoothed_mv = Some(smoothed);

        let pack_mv = smoothed / self.r2 as f32 * (self.r1 + self.r2) as f32;
        let clamped = pack_mv.clamp(self.empty_mv as f32, self.full_mv as f32);
        let percentage =
            (clamped - self.empty_mv as f32) / (self.full_mv - self.empty_mv) as f32 * 100.0;

        Ok(BatteryState {
            millivolts: pack_mv as u32,
            percentage: percentage as u8,
        })
    }
}
