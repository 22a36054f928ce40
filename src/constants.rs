// Publisher
pub const DEFAULT_PUBLISHER_ADDRESS: &str = "udp://127.0.0.1:5555";
pub const DEFAULT_TOPIC: &str = "driver_input";
pub const DEFAULT_PUBLISH_RATE_HZ: f64 = 10.0;

// Device names as reported by the driver
pub const STEERING_DEVICE_NAME: &str = "SimuCUBE";
pub const PEDALS_DEVICE_NAME: &str = "BU0836A Interface";
pub const BUTTONS_DEVICE_NAME: &str = "Ssrg Competition 300-V2";

// Axis indices & calibration (raw device range -> 0..100 %)
pub mod axes {
    pub const STEERING_INDEX: u32 = 0;
    pub const THROTTLE_INDEX: u32 = 0;
    pub const BRAKE_INDEX: u32 = 1;
    pub const CLUTCH_INDEX: u32 = 2;

    // left: 1 -> -100 %, right: -1 -> 100 %
    pub const STEERING_MIN: f64 = 0.0;
    pub const STEERING_MAX: f64 = -1.0;

    pub const THROTTLE_MIN: f64 = -1.0;
    pub const THROTTLE_MAX: f64 = 0.32;

    pub const BRAKE_MIN: f64 = -0.78;
    pub const BRAKE_MAX: f64 = -0.2;

    pub const CLUTCH_MIN: f64 = -1.0;
    pub const CLUTCH_MAX: f64 = 0.832_336_425_781_25;

    // Deadzones, in percent
    pub const STEERING_DEADZONE: f64 = 5.0;
    pub const THROTTLE_DEADZONE: f64 = 1.0;
    pub const BRAKE_DEADZONE: f64 = 5.0;
    pub const CLUTCH_DEADZONE: f64 = 1.0;
}

// Control wheel timing
pub const DEFAULT_WHEEL_TIMEOUT_SECS: f64 = 0.1;
pub const DEFAULT_WHEEL_STEP: f64 = 5.0;
pub const OVERALL_WHEEL_TIMEOUT_SECS: f64 = 0.3;
pub const BUTTON_TIMEOUT_SECS: f64 = 0.5;
pub const OFFSET_WHEEL_STEP: f64 = 1.0;

// Button box indices
pub mod buttons {
    pub const OVERALL_UP: u32 = 0;
    pub const OVERALL_DOWN: u32 = 1;
    pub const BRAKE_DOWN: u32 = 2;
    pub const BRAKE_UP: u32 = 3;
    pub const THROTTLE_DOWN: u32 = 4;
    pub const THROTTLE_UP: u32 = 5;
    pub const PLATFORM: u32 = 6;
    pub const SHIFT_LEFT: u32 = 7;
    pub const OFFSET_DOWN: u32 = 8;
    pub const OFFSET_UP: u32 = 9;
    pub const PEDAL: u32 = 10;
    pub const OFFSET_SET: u32 = 14;
    pub const OFFSET_RESET: u32 = 16;
    pub const CLUTCH_DOWN: u32 = 20;
    pub const CLUTCH_UP: u32 = 21;
    pub const HEAD_RESET: u32 = 22;
    pub const SHIFT_RIGHT: u32 = 23;
    pub const STEERING_UP: u32 = 24;
    pub const STEERING_DOWN: u32 = 25;
    pub const HEAD_CHANGE: u32 = 28;
}

// Platform signal model
pub const GRAVITY: f64 = 9.81;
pub const STEERING_RADIUS_DIVISOR: f64 = 10.0;
pub const TILT_SCALE: f64 = 100.0;
pub const VIBRATION_IDLE: f64 = 680.0;
pub const VIBRATION_RANGE: f64 = 6320.0;
pub const BRAKE_VIBRATION_FACTOR: f64 = 0.75;
