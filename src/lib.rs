//! Reads a sim-racing wheel, pedal cluster and button box, normalizes the
//! driver inputs and publishes them, optionally with derived motion
//! platform signals, once per cycle.

pub mod cli_app;
pub mod config;
pub mod constants;
pub mod control_wheel;
pub mod controls;
pub mod cycle;
pub mod devices;
pub mod error;
pub mod gilrs_backend;
pub mod normalize;
pub mod signals;
pub mod simulate;
pub mod snapshot;
pub mod transport;

pub use control_wheel::{ControlWheel, ToggleConfig, ToggleEvent};
pub use cycle::{CycleConfig, PublishCycle};
pub use error::{ConfigError, ReaderError, TransportError};
pub use normalize::{CalibrationRange, Deadzone, normalize, normalize_scaled};
pub use signals::{PlatformSignals, pivot, tilt, vibration};
pub use snapshot::InputSnapshot;
pub use transport::{DriverPayload, Transport, encode_message};
