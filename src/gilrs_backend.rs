// gilrs_backend.rs
use gilrs::{EventType, GamepadId, Gilrs, GilrsBuilder};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::{devices::InputBackend, error::ReaderError};

#[derive(Debug, Default)]
struct CodeState {
    buttons: HashMap<u32, bool>,
    axes: HashMap<u32, f64>,
}

/// Physical devices through gilrs.
///
/// Button and axis indices are the platform-native event codes of the
/// inputs (`Code::into_u32`), since wheels and pedal boxes rarely map onto
/// gilrs' gamepad layout. Default filters are off so axis values arrive
/// unmodified for calibration.
pub struct GilrsBackend {
    gilrs: Gilrs,
    states: HashMap<GamepadId, CodeState>,
}

impl GilrsBackend {
    pub fn new() -> Result<Self, ReaderError> {
        let gilrs = GilrsBuilder::new()
            .with_default_filters(false)
            .build()
            .map_err(|e| ReaderError::Backend(format!("failed to initialize gilrs: {e}")))?;

        let mut backend = Self {
            gilrs,
            states: HashMap::new(),
        };
        backend.refresh();
        Ok(backend)
    }

    fn sync_state(&mut self) {
        for (id, gamepad) in self.gilrs.gamepads() {
            let entry = self.states.entry(id).or_default();
            for (code, data) in gamepad.state().buttons() {
                entry.buttons.insert(code.into_u32(), data.is_pressed());
            }
            for (code, data) in gamepad.state().axes() {
                entry.axes.insert(code.into_u32(), f64::from(data.value()));
            }
        }
    }
}

impl InputBackend for GilrsBackend {
    type Handle = GamepadId;

    fn devices(&self) -> Vec<(GamepadId, String)> {
        self.gilrs
            .gamepads()
            .map(|(id, gamepad)| (id, gamepad.name().to_string()))
            .collect()
    }

    fn refresh(&mut self) {
        // Draining the queue is what updates gilrs' cached gamepad state.
        while let Some(evt) = self.gilrs.next_event() {
            match evt.event {
                EventType::Connected => {
                    info!("Gamepad {:?} connected", evt.id);
                }
                EventType::Disconnected => {
                    warn!("Gamepad {:?} disconnected", evt.id);
                    self.states.remove(&evt.id);
                }
                EventType::ButtonPressed(button, code) => {
                    debug!("{:?}: {:?} ({}) pressed", evt.id, button, code.into_u32());
                }
                _ => {}
            }
        }
        self.sync_state();
    }

    fn button(&self, device: GamepadId, index: u32) -> bool {
        self.states
            .get(&device)
            .and_then(|s| s.buttons.get(&index).copied())
            .unwrap_or(false)
    }

    fn axis(&self, device: GamepadId, index: u32) -> f64 {
        self.states
            .get(&device)
            .and_then(|s| s.axes.get(&index).copied())
            .unwrap_or(0.0)
    }
}
