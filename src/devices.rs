//! Logical device roles and their binding to physical input devices.
//!
//! An [`InputBackend`] enumerates whatever is plugged in and exposes button
//! and axis state by index. [`DeviceHandles::bind`] runs once at startup,
//! picks the steering wheel, the pedal cluster and the optional button box
//! out of that list, and owns the backend from then on.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ReaderError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DeviceRole {
    Steering,
    Pedals,
    Buttons,
}

impl fmt::Display for DeviceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeviceRole::Steering => "steering",
            DeviceRole::Pedals => "pedals",
            DeviceRole::Buttons => "buttons",
        })
    }
}

/// One row of the name -> role table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RoleBinding {
    pub name: String,
    pub role: DeviceRole,
}

impl RoleBinding {
    pub fn new(name: impl Into<String>, role: DeviceRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

/// Source of raw device state.
pub trait InputBackend {
    type Handle: Copy + fmt::Debug;

    /// Every currently detected device with its reported name.
    fn devices(&self) -> Vec<(Self::Handle, String)>;

    /// Drain pending input events. Called once per read cycle.
    fn refresh(&mut self);

    fn button(&self, device: Self::Handle, index: u32) -> bool;

    fn axis(&self, device: Self::Handle, index: u32) -> f64;
}

/// Bound devices for one process run.
pub struct DeviceHandles<B: InputBackend> {
    backend: B,
    steering: B::Handle,
    pedals: B::Handle,
    buttons: Option<B::Handle>,
}

impl<B: InputBackend> DeviceHandles<B> {
    /// Match detected devices against `table`. An exact name match wins;
    /// otherwise the first device whose name contains the configured name,
    /// ignoring case, is used. Steering and pedals are required.
    pub fn bind(backend: B, table: &[RoleBinding]) -> Result<Self, ReaderError> {
        let detected = backend.devices();

        info!("available devices:");
        for (_, name) in &detected {
            info!("\t{name}");
        }

        let find = |role: DeviceRole| find_device(&detected, table, role);

        let steering = find(DeviceRole::Steering)
            .ok_or_else(|| missing(DeviceRole::Steering, &detected))?;
        let pedals =
            find(DeviceRole::Pedals).ok_or_else(|| missing(DeviceRole::Pedals, &detected))?;
        let buttons = find(DeviceRole::Buttons);

        info!("steering is {}", steering.1);
        info!("pedals are {}", pedals.1);
        match &buttons {
            Some((_, name)) => info!("buttons are {name}"),
            None => warn!("steering wheel buttons unavailable"),
        }

        Ok(Self {
            backend,
            steering: steering.0,
            pedals: pedals.0,
            buttons: buttons.map(|(handle, _)| handle),
        })
    }

    pub fn refresh(&mut self) {
        self.backend.refresh();
    }

    pub fn steering_axis(&self, index: u32) -> f64 {
        self.backend.axis(self.steering, index)
    }

    pub fn pedal_axis(&self, index: u32) -> f64 {
        self.backend.axis(self.pedals, index)
    }

    /// Button box state; always `false` when no button box is bound.
    pub fn button_pressed(&self, index: u32) -> bool {
        match self.buttons {
            Some(handle) => self.backend.button(handle, index),
            None => false,
        }
    }

    pub fn has_buttons(&self) -> bool {
        self.buttons.is_some()
    }

    pub fn handle(&self, role: DeviceRole) -> Option<B::Handle> {
        match role {
            DeviceRole::Steering => Some(self.steering),
            DeviceRole::Pedals => Some(self.pedals),
            DeviceRole::Buttons => self.buttons,
        }
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

fn find_device<H: Copy>(
    detected: &[(H, String)],
    table: &[RoleBinding],
    role: DeviceRole,
) -> Option<(H, String)> {
    let wanted: Vec<&str> = table
        .iter()
        .filter(|b| b.role == role)
        .map(|b| b.name.as_str())
        .collect();

    let exact = detected
        .iter()
        .find(|(_, name)| wanted.iter().any(|w| name.as_str() == *w));

    exact
        .or_else(|| {
            detected.iter().find(|(_, name)| {
                let name = name.to_lowercase();
                wanted
                    .iter()
                    .any(|w| !w.is_empty() && name.contains(&w.to_lowercase()))
            })
        })
        .cloned()
}

fn missing<H>(role: DeviceRole, detected: &[(H, String)]) -> ReaderError {
    ReaderError::DeviceMissing {
        role,
        detected: detected.iter().map(|(_, name)| name.clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulate::SimulatedBackend;

    fn table() -> Vec<RoleBinding> {
        vec![
            RoleBinding::new("SimuCUBE", DeviceRole::Steering),
            RoleBinding::new("BU0836A Interface", DeviceRole::Pedals),
            RoleBinding::new("Ssrg Competition 300-V2", DeviceRole::Buttons),
        ]
    }

    #[test]
    fn test_bind_all_roles() -> Result<(), ReaderError> {
        let backend = SimulatedBackend::with_names(&[
            "Ssrg Competition 300-V2",
            "BU0836A Interface",
            "SimuCUBE",
        ]);
        let mut devices = DeviceHandles::bind(backend, &table())?;
        assert!(devices.has_buttons());

        devices.backend_mut().set_axis(2, 0, 0.25);
        devices.backend_mut().set_axis(1, 1, -0.5);
        devices.backend_mut().set_button(0, 7, true);
        assert_eq!(devices.steering_axis(0), 0.25);
        assert_eq!(devices.pedal_axis(1), -0.5);
        assert!(devices.button_pressed(7));
        assert!(!devices.button_pressed(8));
        Ok(())
    }

    #[test]
    fn test_missing_required_device_lists_detected() {
        let backend = SimulatedBackend::with_names(&["SimuCUBE", "Xbox Controller"]);
        match DeviceHandles::bind(backend, &table()) {
            Err(ReaderError::DeviceMissing { role, detected }) => {
                assert_eq!(role, DeviceRole::Pedals);
                assert_eq!(detected, vec!["SimuCUBE".to_string(), "Xbox Controller".to_string()]);
            }
            other => panic!("expected DeviceMissing, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_missing_button_box_reads_released() -> Result<(), ReaderError> {
        let mut backend = SimulatedBackend::with_names(&["SimuCUBE", "BU0836A Interface"]);
        backend.set_button(0, 7, true);
        let devices = DeviceHandles::bind(backend, &table())?;
        assert!(!devices.has_buttons());
        assert!(!devices.button_pressed(7));
        Ok(())
    }

    #[test]
    fn test_substring_fallback_prefers_exact() -> Result<(), ReaderError> {
        let backend = SimulatedBackend::with_names(&[
            "Granite Devices SimuCUBE 2 Pro",
            "Leo Bodnar BU0836A Interface",
            "SimuCUBE",
        ]);
        let mut devices = DeviceHandles::bind(backend, &table())?;
        devices.backend_mut().set_axis(2, 0, 0.9);
        devices.backend_mut().set_axis(0, 0, -0.9);
        devices.backend_mut().set_axis(1, 0, 0.1);
        assert_eq!(devices.steering_axis(0), 0.9);
        assert_eq!(devices.pedal_axis(0), 0.1);
        Ok(())
    }

    #[test]
    fn test_substring_fallback_ignores_case() -> Result<(), ReaderError> {
        let backend = SimulatedBackend::with_names(&["simucube 2 pro", "LEO BODNAR bu0836a interface"]);
        let mut devices = DeviceHandles::bind(backend, &table())?;
        devices.backend_mut().set_axis(0, 0, 0.4);
        devices.backend_mut().set_axis(1, 0, -0.6);
        assert_eq!(devices.steering_axis(0), 0.4);
        assert_eq!(devices.pedal_axis(0), -0.6);
        Ok(())
    }
}
