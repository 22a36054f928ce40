//! Raw analog axis readings to percent.
//!
//! Every pedal and wheel reports its own range, often a narrow slice of
//! `[-1, 1]`. A [`CalibrationRange`] describes the affine map from that
//! slice onto `0..=100`. Values are not clamped: a reading outside the
//! calibrated range yields a percent outside `0..=100`.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CalibrationRange {
    pub input_min: f64,
    pub input_max: f64,
}

impl CalibrationRange {
    /// Build a range, rejecting the degenerate `input_min == input_max` case.
    pub fn new(input_min: f64, input_max: f64) -> Result<Self, ConfigError> {
        let range = Self {
            input_min,
            input_max,
        };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_max == self.input_min {
            return Err(ConfigError::InvalidCalibration {
                input_min: self.input_min,
                input_max: self.input_max,
            });
        }
        Ok(())
    }

    /// Raw reading that maps to `percent`.
    pub fn raw_for_percent(&self, percent: f64) -> f64 {
        self.input_min + percent / 100.0 * (self.input_max - self.input_min)
    }
}

/// Region around zero percent that reads as exactly zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deadzone {
    None,
    /// `|percent| < threshold` reads 0. Used for centered axes (steering).
    Symmetric(f64),
    /// `percent < threshold` reads 0. Used for pedals resting near 0 %.
    Below(f64),
}

impl Deadzone {
    pub fn apply(&self, percent: f64) -> f64 {
        let inside = match *self {
            Deadzone::None => false,
            Deadzone::Symmetric(threshold) => percent.abs() < threshold,
            Deadzone::Below(threshold) => percent < threshold,
        };
        if inside { 0.0 } else { percent }
    }
}

/// `(raw - input_min) / (input_max - input_min) * 100`.
pub fn normalize(raw: f64, calibration: &CalibrationRange) -> Result<f64, ConfigError> {
    calibration.validate()?;
    Ok((raw - calibration.input_min) / (calibration.input_max - calibration.input_min) * 100.0)
}

/// Normalized percent with the deadzone applied, rescaled so that 100 %
/// becomes `output_max`.
pub fn normalize_scaled(
    raw: f64,
    calibration: &CalibrationRange,
    deadzone: Deadzone,
    output_max: f64,
) -> Result<f64, ConfigError> {
    let percent = normalize(raw, calibration)?;
    Ok(scale_percent(percent, deadzone, output_max))
}

#[inline]
pub fn scale_percent(percent: f64, deadzone: Deadzone, output_max: f64) -> f64 {
    deadzone.apply(percent) * (output_max / 100.0)
}
