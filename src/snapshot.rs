use serde::{Deserialize, Serialize};

use crate::constants::axes;
use crate::controls::ControlEvents;
use crate::devices::{DeviceHandles, InputBackend};
use crate::error::ConfigError;
use crate::normalize::{CalibrationRange, Deadzone, normalize, scale_percent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisKind {
    Steering,
    Throttle,
    Brake,
    Clutch,
}

impl AxisKind {
    pub fn deadzone(self) -> Deadzone {
        match self {
            AxisKind::Steering => Deadzone::Symmetric(axes::STEERING_DEADZONE),
            AxisKind::Throttle => Deadzone::Below(axes::THROTTLE_DEADZONE),
            AxisKind::Brake => Deadzone::Below(axes::BRAKE_DEADZONE),
            AxisKind::Clutch => Deadzone::Below(axes::CLUTCH_DEADZONE),
        }
    }
}

/// Axis index on its device plus the calibration for that axis.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct AxisChannel {
    pub index: u32,
    #[serde(flatten)]
    pub calibration: CalibrationRange,
}

impl AxisChannel {
    pub fn new(index: u32, input_min: f64, input_max: f64) -> Self {
        Self {
            index,
            calibration: CalibrationRange {
                input_min,
                input_max,
            },
        }
    }

    pub fn percent(&self, raw: f64) -> Result<f64, ConfigError> {
        normalize(raw, &self.calibration)
    }
}

/// The four driver axes. Any axis, or any field of one, left out of the
/// config file keeps that axis' built-in value.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(from = "AxisTableFile")]
pub struct AxisTable {
    pub steering: AxisChannel,
    pub throttle: AxisChannel,
    pub brake: AxisChannel,
    pub clutch: AxisChannel,
}

impl Default for AxisTable {
    fn default() -> Self {
        Self {
            steering: AxisChannel::new(
                axes::STEERING_INDEX,
                axes::STEERING_MIN,
                axes::STEERING_MAX,
            ),
            throttle: AxisChannel::new(
                axes::THROTTLE_INDEX,
                axes::THROTTLE_MIN,
                axes::THROTTLE_MAX,
            ),
            brake: AxisChannel::new(axes::BRAKE_INDEX, axes::BRAKE_MIN, axes::BRAKE_MAX),
            clutch: AxisChannel::new(axes::CLUTCH_INDEX, axes::CLUTCH_MIN, axes::CLUTCH_MAX),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct AxisChannelFile {
    index: Option<u32>,
    input_min: Option<f64>,
    input_max: Option<f64>,
}

impl AxisChannelFile {
    fn over(self, base: AxisChannel) -> AxisChannel {
        AxisChannel::new(
            self.index.unwrap_or(base.index),
            self.input_min.unwrap_or(base.calibration.input_min),
            self.input_max.unwrap_or(base.calibration.input_max),
        )
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct AxisTableFile {
    steering: AxisChannelFile,
    throttle: AxisChannelFile,
    brake: AxisChannelFile,
    clutch: AxisChannelFile,
}

impl From<AxisTableFile> for AxisTable {
    fn from(file: AxisTableFile) -> Self {
        let base = AxisTable::default();
        Self {
            steering: file.steering.over(base.steering),
            throttle: file.throttle.over(base.throttle),
            brake: file.brake.over(base.brake),
            clutch: file.clutch.over(base.clutch),
        }
    }
}

impl AxisTable {
    pub fn get(&self, kind: AxisKind) -> &AxisChannel {
        match kind {
            AxisKind::Steering => &self.steering,
            AxisKind::Throttle => &self.throttle,
            AxisKind::Brake => &self.brake,
            AxisKind::Clutch => &self.clutch,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.steering.calibration.validate()?;
        self.throttle.calibration.validate()?;
        self.brake.calibration.validate()?;
        self.clutch.calibration.validate()
    }
}

/// Normalized driver inputs of one read cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub throttle: f64,
    pub brake: f64,
    pub clutch: f64,
    pub steering: f64,
    pub controls: ControlEvents,
}

impl InputSnapshot {
    pub fn new(throttle: f64, brake: f64, clutch: f64, steering: f64) -> Self {
        Self {
            throttle,
            brake,
            clutch,
            steering,
            controls: ControlEvents::default(),
        }
    }

    /// Read the four axes from already refreshed devices, steering first.
    pub fn read<B: InputBackend>(
        devices: &DeviceHandles<B>,
        table: &AxisTable,
    ) -> Result<Self, ConfigError> {
        let steering = table.steering.percent(devices.steering_axis(table.steering.index))?;
        let throttle = table.throttle.percent(devices.pedal_axis(table.throttle.index))?;
        let brake = table.brake.percent(devices.pedal_axis(table.brake.index))?;
        let clutch = table.clutch.percent(devices.pedal_axis(table.clutch.index))?;

        Ok(Self::new(throttle, brake, clutch, steering))
    }

    pub fn with_controls(mut self, controls: ControlEvents) -> Self {
        self.controls = controls;
        self
    }

    pub fn percent(&self, kind: AxisKind) -> f64 {
        match kind {
            AxisKind::Steering => self.steering,
            AxisKind::Throttle => self.throttle,
            AxisKind::Brake => self.brake,
            AxisKind::Clutch => self.clutch,
        }
    }

    /// Percent with the axis deadzone applied, rescaled so 100 % reads
    /// `output_max`.
    pub fn scaled(&self, kind: AxisKind, output_max: f64) -> f64 {
        scale_percent(self.percent(kind), kind.deadzone(), output_max)
    }
}
