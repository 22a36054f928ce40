//! In-memory input devices and a deterministic sweep over them.
//!
//! Used by `--simulate` to feed subscribers faux driver data without any
//! hardware attached, and by the tests as a scripted backend.

use std::collections::HashMap;

use crate::devices::{DeviceHandles, DeviceRole, InputBackend, RoleBinding};
use crate::snapshot::{AxisKind, AxisTable};

#[derive(Debug, Default, Clone)]
struct SimulatedDevice {
    name: String,
    buttons: HashMap<u32, bool>,
    axes: HashMap<u32, f64>,
}

/// Scripted backend; device handles are positions in the name list.
#[derive(Debug, Default, Clone)]
pub struct SimulatedBackend {
    devices: Vec<SimulatedDevice>,
    refreshes: u64,
}

impl SimulatedBackend {
    pub fn with_names(names: &[&str]) -> Self {
        Self {
            devices: names
                .iter()
                .map(|name| SimulatedDevice {
                    name: (*name).to_string(),
                    ..Default::default()
                })
                .collect(),
            refreshes: 0,
        }
    }

    /// One device per role, named after the first table entry for that role.
    pub fn from_table(table: &[RoleBinding]) -> Self {
        let names: Vec<&str> = [DeviceRole::Steering, DeviceRole::Pedals, DeviceRole::Buttons]
            .iter()
            .filter_map(|role| table.iter().find(|b| b.role == *role))
            .map(|b| b.name.as_str())
            .collect();
        Self::with_names(&names)
    }

    pub fn set_axis(&mut self, device: usize, index: u32, value: f64) {
        if let Some(dev) = self.devices.get_mut(device) {
            dev.axes.insert(index, value);
        }
    }

    pub fn set_button(&mut self, device: usize, index: u32, pressed: bool) {
        if let Some(dev) = self.devices.get_mut(device) {
            dev.buttons.insert(index, pressed);
        }
    }

    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }
}

impl InputBackend for SimulatedBackend {
    type Handle = usize;

    fn devices(&self) -> Vec<(usize, String)> {
        self.devices
            .iter()
            .enumerate()
            .map(|(i, dev)| (i, dev.name.clone()))
            .collect()
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }

    fn button(&self, device: usize, index: u32) -> bool {
        self.devices
            .get(device)
            .and_then(|dev| dev.buttons.get(&index).copied())
            .unwrap_or(false)
    }

    fn axis(&self, device: usize, index: u32) -> f64 {
        self.devices
            .get(device)
            .and_then(|dev| dev.axes.get(&index).copied())
            .unwrap_or(0.0)
    }
}

/// Percent sweep over all four axes, advanced once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sweep {
    pub throttle: f64,
    pub brake: f64,
    pub clutch: f64,
    pub steering: f64,
}

impl Sweep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self) {
        self.throttle = (self.throttle + 0.5).min(100.0);

        self.brake += 0.3;
        if self.brake >= 100.0 {
            self.brake -= 100.0;
        }

        self.clutch += 0.1;
        if self.clutch >= 100.0 {
            self.clutch -= 100.0;
        }

        self.steering += 0.8;
        if self.steering >= 100.0 {
            self.steering -= 200.0;
        }
    }

    /// Write the current sweep as raw readings, so that normalizing them with
    /// `axes` gives back the sweep percentages.
    pub fn apply(&self, devices: &mut DeviceHandles<SimulatedBackend>, axes: &AxisTable) {
        let steering = devices.handle(DeviceRole::Steering);
        let pedals = devices.handle(DeviceRole::Pedals);
        let backend = devices.backend_mut();

        let writes = [
            (steering, AxisKind::Steering, self.steering),
            (pedals, AxisKind::Throttle, self.throttle),
            (pedals, AxisKind::Brake, self.brake),
            (pedals, AxisKind::Clutch, self.clutch),
        ];
        for (handle, kind, percent) in writes {
            if let Some(handle) = handle {
                let channel = axes.get(kind);
                backend.set_axis(handle, channel.index, channel.calibration.raw_for_percent(percent));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_wraps_like_test_sender() {
        let mut sweep = Sweep::new();
        for _ in 0..200 {
            sweep.advance();
        }
        assert_eq!(sweep.throttle, 100.0);
        assert!((sweep.steering + 40.0).abs() < 1e-6, "steering wrapped to {}", sweep.steering);
        assert!(sweep.brake < 100.0 && sweep.brake >= 0.0);
        assert!((sweep.clutch - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_table_names_one_device_per_role() {
        let table = vec![
            RoleBinding::new("Pedals", DeviceRole::Pedals),
            RoleBinding::new("Wheel", DeviceRole::Steering),
            RoleBinding::new("Wheel (alt)", DeviceRole::Steering),
        ];
        let backend = SimulatedBackend::from_table(&table);
        let names: Vec<String> = backend.devices().into_iter().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["Wheel".to_string(), "Pedals".to_string()]);
    }

    #[test]
    fn test_unknown_inputs_read_neutral() {
        let backend = SimulatedBackend::with_names(&["Wheel"]);
        assert_eq!(backend.axis(0, 3), 0.0);
        assert!(!backend.button(0, 3));
        assert_eq!(backend.axis(7, 0), 0.0);
    }
}
