// control_wheel.rs
use std::time::{Duration, Instant};

use crate::constants::{DEFAULT_WHEEL_STEP, DEFAULT_WHEEL_TIMEOUT_SECS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleEvent {
    #[default]
    Idle,
    Up,
    Down,
}

impl ToggleEvent {
    /// `step` for Up, `-step` for Down, 0 for Idle.
    pub fn signed_amount(self, step: f64) -> f64 {
        match self {
            ToggleEvent::Up => step,
            ToggleEvent::Down => -step,
            ToggleEvent::Idle => 0.0,
        }
    }
}

/// Button binding of one control wheel. Both buttons absent is valid and
/// yields a wheel that never fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleConfig {
    pub up_button: Option<u32>,
    pub down_button: Option<u32>,
    pub timeout: Duration,
    pub step: f64,
}

impl ToggleConfig {
    pub fn wheel(up: u32, down: u32) -> Self {
        Self {
            up_button: Some(up),
            down_button: Some(down),
            timeout: Duration::from_secs_f64(DEFAULT_WHEEL_TIMEOUT_SECS),
            step: DEFAULT_WHEEL_STEP,
        }
    }

    /// Single momentary button; fires as Up.
    pub fn button(index: u32, timeout_secs: f64) -> Self {
        Self {
            up_button: Some(index),
            down_button: None,
            timeout: Duration::from_secs_f64(timeout_secs),
            step: DEFAULT_WHEEL_STEP,
        }
    }

    pub fn with_timeout(mut self, timeout_secs: f64) -> Self {
        self.timeout = Duration::from_secs_f64(timeout_secs);
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }
}

/// Debounced up/down rocker over two momentary buttons.
///
/// After firing, the wheel reads Idle until more than `timeout` has
/// elapsed. A held button therefore fires once per timeout window instead
/// of once per poll. Up wins when both buttons read pressed.
#[derive(Debug, Clone)]
pub struct ControlWheel {
    cfg: ToggleConfig,
    last_fired: Option<Instant>,
}

impl ControlWheel {
    pub fn new(cfg: ToggleConfig) -> Self {
        Self {
            cfg,
            last_fired: None,
        }
    }

    pub fn change_amount(&self) -> f64 {
        self.cfg.step
    }

    /// Poll the wheel at `now`. `pressed` reports the current state of a
    /// button index on the bound device.
    pub fn poll<F>(&mut self, now: Instant, pressed: F) -> ToggleEvent
    where
        F: Fn(u32) -> bool,
    {
        if let Some(last) = self.last_fired {
            if now.saturating_duration_since(last) <= self.cfg.timeout {
                return ToggleEvent::Idle;
            }
        }

        let event = if self.cfg.up_button.is_some_and(&pressed) {
            ToggleEvent::Up
        } else if self.cfg.down_button.is_some_and(&pressed) {
            ToggleEvent::Down
        } else {
            return ToggleEvent::Idle;
        };

        self.last_fired = Some(now);
        event
    }

    /// Poll and combine direction with the configured step.
    pub fn poll_amount<F>(&mut self, now: Instant, pressed: F) -> f64
    where
        F: Fn(u32) -> bool,
    {
        self.poll(now, pressed).signed_amount(self.cfg.step)
    }
}
