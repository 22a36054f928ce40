use crate::devices::DeviceRole;
use std::io;

/// Invalid or unreadable configuration. A missing config file is not an
/// error: defaults are written instead.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid calibration: input_min ({input_min}) equals input_max ({input_max})")]
    InvalidCalibration { input_min: f64, input_max: f64 },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("could not determine config dir")]
    NoConfigDir,

    #[error("config io error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid publisher endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("failed to send message: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("required {role} device missing (detected: {detected:?})")]
    DeviceMissing {
        role: DeviceRole,
        detected: Vec<String>,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("input backend error: {0}")]
    Backend(String),
}
