// cycle.rs
use std::time::Instant;

use tracing::info;

use crate::{
    controls::ControlPanel,
    devices::{DeviceHandles, InputBackend},
    error::ReaderError,
    signals::PlatformSignals,
    snapshot::{AxisTable, InputSnapshot},
    transport::{DriverPayload, Transport, encode_message},
};

/// Settings the cycle needs out of the app config.
#[derive(Clone, Debug)]
pub struct CycleConfig {
    pub topic: String,
    pub emit_platform_signals: bool,
    pub axes: AxisTable,
}

/// One read -> derive -> publish pass per call to [`PublishCycle::run_once`].
/// Cadence belongs to the caller.
pub struct PublishCycle<B: InputBackend, T: Transport> {
    devices: DeviceHandles<B>,
    controls: ControlPanel,
    transport: T,
    cfg: CycleConfig,
    payload: DriverPayload,
    last_snapshot: Option<InputSnapshot>,
}

impl<B: InputBackend, T: Transport> PublishCycle<B, T> {
    pub fn new(devices: DeviceHandles<B>, transport: T, cfg: CycleConfig) -> Self {
        info!(
            "publishing on topic '{}', platform signals {}",
            cfg.topic,
            if cfg.emit_platform_signals { "enabled" } else { "disabled" }
        );

        PublishCycle {
            devices,
            controls: ControlPanel::new(),
            transport,
            cfg,
            payload: DriverPayload::default(),
            last_snapshot: None,
        }
    }

    /// Refresh devices and build this cycle's snapshot.
    pub fn read_inputs(&mut self, now: Instant) -> Result<InputSnapshot, ReaderError> {
        self.devices.refresh();
        let controls = self.controls.poll(now, &self.devices);
        let snapshot = InputSnapshot::read(&self.devices, &self.cfg.axes)?.with_controls(controls);
        self.last_snapshot = Some(snapshot);
        Ok(snapshot)
    }

    /// Runs one full iteration and returns what was sent. Transport errors
    /// are returned to the caller; nothing is retried.
    pub fn run_once(&mut self, now: Instant) -> Result<DriverPayload, ReaderError> {
        let snapshot = self.read_inputs(now)?;
        self.payload.set_inputs(&snapshot);

        // With platform signals off, tilt/vibration keep their defaults.
        if self.cfg.emit_platform_signals {
            self.payload.set_signals(&PlatformSignals::derive(&snapshot));
        }

        self.publish()?;
        Ok(self.payload)
    }

    fn publish(&mut self) -> Result<(), ReaderError> {
        let message = encode_message(&self.cfg.topic, &self.payload)?;
        info!("data send: {message}");
        self.transport.send_message(&message)?;
        Ok(())
    }

    pub fn last_snapshot(&self) -> Option<&InputSnapshot> {
        self.last_snapshot.as_ref()
    }

    pub fn axes(&self) -> &AxisTable {
        &self.cfg.axes
    }

    pub fn devices_mut(&mut self) -> &mut DeviceHandles<B> {
        &mut self.devices
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{axes, buttons};
    use crate::control_wheel::ToggleEvent;
    use crate::devices::{DeviceRole, RoleBinding};
    use crate::error::TransportError;
    use crate::signals::{pivot, tilt, vibration};
    use crate::simulate::SimulatedBackend;
    use std::io;

    #[derive(Default)]
    struct Recorder {
        sent: Vec<String>,
        payload_sends: usize,
        fail: bool,
    }

    impl Transport for Recorder {
        fn send_message(&mut self, message: &str) -> Result<(), TransportError> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "down").into());
            }
            self.sent.push(message.to_string());
            Ok(())
        }

        fn send(&mut self, topic: &str, payload: &DriverPayload) -> Result<(), TransportError> {
            self.payload_sends += 1;
            self.send_message(&encode_message(topic, payload)?)
        }
    }

    type TestCycle = PublishCycle<SimulatedBackend, Recorder>;

    fn cycle(emit: bool, fail: bool) -> Result<TestCycle, ReaderError> {
        let table = vec![
            RoleBinding::new("SimuCUBE", DeviceRole::Steering),
            RoleBinding::new("BU0836A Interface", DeviceRole::Pedals),
            RoleBinding::new("Ssrg Competition 300-V2", DeviceRole::Buttons),
        ];
        let backend = SimulatedBackend::from_table(&table);
        let devices = DeviceHandles::bind(backend, &table)?;
        let cfg = CycleConfig {
            topic: "driver_input".into(),
            emit_platform_signals: emit,
            axes: AxisTable::default(),
        };
        let recorder = Recorder {
            fail,
            ..Recorder::default()
        };
        Ok(PublishCycle::new(devices, recorder, cfg))
    }

    // Throttle 50 %, brake 0 %, clutch 0 %, steering 10 %.
    fn press_half_throttle(c: &mut PublishCycle<SimulatedBackend, Recorder>) {
        let backend = c.devices_mut().backend_mut();
        backend.set_axis(1, axes::THROTTLE_INDEX, -0.34);
        backend.set_axis(1, axes::BRAKE_INDEX, axes::BRAKE_MIN);
        backend.set_axis(1, axes::CLUTCH_INDEX, axes::CLUTCH_MIN);
        backend.set_axis(0, axes::STEERING_INDEX, -0.1);
    }

    #[test]
    fn test_signals_disabled_sends_inputs_only() -> Result<(), ReaderError> {
        let mut c = cycle(false, false)?;
        press_half_throttle(&mut c);

        let payload = c.run_once(Instant::now())?;
        assert!((payload.throttle - 50.0).abs() < 1e-9);
        assert!((payload.steering - 10.0).abs() < 1e-9);
        assert_eq!(payload.tilt_x, 0.0);
        assert_eq!(payload.tilt_y, 0.0);
        assert_eq!(payload.vibration, 0.0);
        assert_eq!(c.transport().sent.len(), 1);
        assert!(c.transport().sent[0].starts_with("driver_input {\"throttle\":"));
        assert_eq!(c.devices_mut().backend_mut().refreshes(), 1);
        Ok(())
    }

    #[test]
    fn test_signals_enabled_match_formulas() -> Result<(), ReaderError> {
        let mut c = cycle(true, false)?;
        press_half_throttle(&mut c);

        let p = c.run_once(Instant::now())?;
        assert_eq!(p.tilt_x, tilt(p.throttle, p.brake, p.steering));
        assert_eq!(p.tilt_y, pivot(p.throttle, p.brake));
        assert_eq!(p.vibration, vibration(p.throttle, p.brake));
        assert!((p.tilt_x - (-0.8978)).abs() < 1e-3);
        assert_eq!(p.tilt_y, -50.0);
        assert_eq!(p.vibration, 3840.0);
        Ok(())
    }

    #[test]
    fn test_logged_message_is_the_sent_message() -> Result<(), ReaderError> {
        let mut c = cycle(true, false)?;
        press_half_throttle(&mut c);

        let payload = c.run_once(Instant::now())?;
        assert_eq!(c.transport().payload_sends, 0);
        assert_eq!(c.transport().sent, vec![encode_message("driver_input", &payload)?]);
        Ok(())
    }

    #[test]
    fn test_transport_failure_propagates() -> Result<(), ReaderError> {
        let mut c = cycle(true, true)?;
        assert!(matches!(
            c.run_once(Instant::now()),
            Err(ReaderError::Transport(TransportError::Io(_)))
        ));
        // The snapshot was still taken.
        assert!(c.last_snapshot().is_some());
        Ok(())
    }

    #[test]
    fn test_controls_land_in_snapshot_not_payload() -> Result<(), ReaderError> {
        let mut c = cycle(false, false)?;
        c.devices_mut().backend_mut().set_button(2, buttons::CLUTCH_UP, true);

        c.run_once(Instant::now())?;
        let snap = c.last_snapshot().copied().unwrap_or_default();
        assert_eq!(snap.controls.clutch, ToggleEvent::Up);

        let json = c.transport().sent[0].trim_start_matches("driver_input ");
        let keys: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).map_err(TransportError::from)?;
        assert_eq!(keys.len(), 7);
        Ok(())
    }
}
