use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::warn;

use crate::{
    constants::*,
    devices::{DeviceRole, RoleBinding},
    error::ConfigError,
    snapshot::AxisTable,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PublisherConfig {
    pub address: String,
    pub topic: String,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_PUBLISHER_ADDRESS.into(),
            topic: DEFAULT_TOPIC.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub emit_platform_signals: bool,
    pub publish_rate_hz: f64,
    pub publisher: PublisherConfig,
    pub devices: Vec<RoleBinding>,
    pub axes: AxisTable,
}

// Default values for the config
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            emit_platform_signals: false,
            publish_rate_hz: DEFAULT_PUBLISH_RATE_HZ,
            publisher: PublisherConfig::default(),
            devices: vec![
                RoleBinding::new(STEERING_DEVICE_NAME, DeviceRole::Steering),
                RoleBinding::new(PEDALS_DEVICE_NAME, DeviceRole::Pedals),
                RoleBinding::new(BUTTONS_DEVICE_NAME, DeviceRole::Buttons),
            ],
            axes: AxisTable::default(),
        }
    }
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("org", "RAAI", "driver-input-reader")
        .map(|d| d.config_dir().join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&default_config_path()?)
    }

    /// Read the config at `path`. A missing file is replaced by the defaults,
    /// which are written back so there is always a file to edit.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!("no config file at {}, creating one with defaults", path.display());
            let cfg = Self::default();
            cfg.save_to(path)?;
            return Ok(cfg);
        }
        let txt = fs::read_to_string(path)?;
        let cfg: Self = toml::from_str(&txt)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let toml = toml::to_string_pretty(self)?;
        fs::write(path, toml)?;
        Ok(())
    }

    /// Time between two publish cycles.
    pub fn publish_period(&self) -> Result<Duration, ConfigError> {
        let rate = self.publish_rate_hz;
        if !(rate.is_finite() && rate > 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "publish_rate_hz must be > 0, got {rate}"
            )));
        }
        Duration::try_from_secs_f64(1.0 / rate).map_err(|e| {
            ConfigError::InvalidValue(format!("publish_rate_hz {rate} is out of range: {e}"))
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.axes.validate()?;
        self.publish_period()?;
        if self.publisher.topic.contains(' ') {
            return Err(ConfigError::InvalidValue(format!(
                "topic must not contain spaces: {:?}",
                self.publisher.topic
            )));
        }
        Ok(())
    }
}
