//! Button box controls: the rocker wheels and single buttons the driver
//! uses to adjust offsets and toggle platform features while driving.

use std::time::Instant;

use tracing::debug;

use crate::constants::{
    BUTTON_TIMEOUT_SECS, OFFSET_WHEEL_STEP, OVERALL_WHEEL_TIMEOUT_SECS, buttons,
};
use crate::control_wheel::{ControlWheel, ToggleConfig, ToggleEvent};
use crate::devices::{DeviceHandles, InputBackend};

/// Result of polling every control once.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlEvents {
    pub throttle: ToggleEvent,
    pub brake: ToggleEvent,
    pub clutch: ToggleEvent,
    pub steering: ToggleEvent,
    pub overall: ToggleEvent,
    pub platform: ToggleEvent,
    pub head_reset: ToggleEvent,
    pub head_change: ToggleEvent,
    pub pedal: ToggleEvent,
    pub offset_set: ToggleEvent,
    pub offset: ToggleEvent,
    pub offset_reset: ToggleEvent,
    pub shift_left: bool,
    pub shift_right: bool,
}

impl ControlEvents {
    pub fn any_fired(&self) -> bool {
        self.named().iter().any(|(_, ev)| *ev != ToggleEvent::Idle)
    }

    pub fn named(&self) -> [(&'static str, ToggleEvent); 12] {
        [
            ("throttle", self.throttle),
            ("brake", self.brake),
            ("clutch", self.clutch),
            ("steering", self.steering),
            ("overall", self.overall),
            ("platform", self.platform),
            ("head_reset", self.head_reset),
            ("head_change", self.head_change),
            ("pedal", self.pedal),
            ("offset_set", self.offset_set),
            ("offset", self.offset),
            ("offset_reset", self.offset_reset),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct ControlPanel {
    throttle: ControlWheel,
    brake: ControlWheel,
    clutch: ControlWheel,
    steering: ControlWheel,
    overall: ControlWheel,
    platform: ControlWheel,
    head_reset: ControlWheel,
    head_change: ControlWheel,
    pedal: ControlWheel,
    offset_set: ControlWheel,
    offset: ControlWheel,
    offset_reset: ControlWheel,
}

impl Default for ControlPanel {
    fn default() -> Self {
        let wheel = |up, down| ControlWheel::new(ToggleConfig::wheel(up, down));
        let button = |index| ControlWheel::new(ToggleConfig::button(index, BUTTON_TIMEOUT_SECS));

        Self {
            throttle: wheel(buttons::THROTTLE_UP, buttons::THROTTLE_DOWN),
            brake: wheel(buttons::BRAKE_UP, buttons::BRAKE_DOWN),
            clutch: wheel(buttons::CLUTCH_UP, buttons::CLUTCH_DOWN),
            steering: wheel(buttons::STEERING_UP, buttons::STEERING_DOWN),
            overall: ControlWheel::new(
                ToggleConfig::wheel(buttons::OVERALL_UP, buttons::OVERALL_DOWN)
                    .with_timeout(OVERALL_WHEEL_TIMEOUT_SECS),
            ),
            platform: button(buttons::PLATFORM),
            head_reset: button(buttons::HEAD_RESET),
            head_change: button(buttons::HEAD_CHANGE),
            pedal: button(buttons::PEDAL),
            offset_set: button(buttons::OFFSET_SET),
            offset: ControlWheel::new(
                ToggleConfig::wheel(buttons::OFFSET_UP, buttons::OFFSET_DOWN)
                    .with_step(OFFSET_WHEEL_STEP),
            ),
            offset_reset: button(buttons::OFFSET_RESET),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll every control against the button box. Without a button box
    /// every control reads Idle.
    pub fn poll<B: InputBackend>(
        &mut self,
        now: Instant,
        devices: &DeviceHandles<B>,
    ) -> ControlEvents {
        let pressed = |index: u32| devices.button_pressed(index);

        let events = ControlEvents {
            throttle: self.throttle.poll(now, pressed),
            brake: self.brake.poll(now, pressed),
            clutch: self.clutch.poll(now, pressed),
            steering: self.steering.poll(now, pressed),
            overall: self.overall.poll(now, pressed),
            platform: self.platform.poll(now, pressed),
            head_reset: self.head_reset.poll(now, pressed),
            head_change: self.head_change.poll(now, pressed),
            pedal: self.pedal.poll(now, pressed),
            offset_set: self.offset_set.poll(now, pressed),
            offset: self.offset.poll(now, pressed),
            offset_reset: self.offset_reset.poll(now, pressed),
            shift_left: pressed(buttons::SHIFT_LEFT),
            shift_right: pressed(buttons::SHIFT_RIGHT),
        };

        if events.any_fired() {
            for ((name, event), wheel) in events.named().into_iter().zip(self.wheels()) {
                if event != ToggleEvent::Idle {
                    debug!(
                        "control {name}: {event:?} ({:+})",
                        event.signed_amount(wheel.change_amount())
                    );
                }
            }
        }

        events
    }

    // Same order as `ControlEvents::named`.
    fn wheels(&self) -> [&ControlWheel; 12] {
        [
            &self.throttle,
            &self.brake,
            &self.clutch,
            &self.steering,
            &self.overall,
            &self.platform,
            &self.head_reset,
            &self.head_change,
            &self.pedal,
            &self.offset_set,
            &self.offset,
            &self.offset_reset,
        ]
    }
}
