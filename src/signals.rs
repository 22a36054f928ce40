//! Haptic signals for the motion platform.
//!
//! A deliberately crude model: pedal position stands in for vehicle speed
//! and steering percent for the turn radius. The functions are pure and
//! depend on the current snapshot only.

use crate::constants::{
    BRAKE_VIBRATION_FACTOR, GRAVITY, STEERING_RADIUS_DIVISOR, TILT_SCALE, VIBRATION_IDLE,
    VIBRATION_RANGE,
};
use crate::snapshot::InputSnapshot;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlatformSignals {
    pub tilt_x: f64,
    pub tilt_y: f64,
    pub vibration: f64,
}

impl PlatformSignals {
    pub fn derive(snapshot: &InputSnapshot) -> Self {
        Self {
            tilt_x: tilt(snapshot.throttle, snapshot.brake, snapshot.steering),
            tilt_y: pivot(snapshot.throttle, snapshot.brake),
            vibration: vibration(snapshot.throttle, snapshot.brake),
        }
    }
}

/// Round half away from zero to two decimals.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sideways seat tilt from lateral acceleration `v^2 / r`, with the tilt
/// angle `atan(a / g)` in degrees, negated and scaled down by 100.
///
/// Straight-ahead steering (`steering == 0`) is an infinite turn radius and
/// yields no tilt.
pub fn tilt(throttle: f64, brake: f64, steering: f64) -> f64 {
    if steering == 0.0 {
        return 0.0;
    }

    let velocity = if throttle >= brake { throttle } else { -brake };
    let lateral = velocity.powi(2) / (steering / STEERING_RADIUS_DIVISOR);
    let angle = (lateral / GRAVITY).atan().to_degrees();

    round2(-angle) / TILT_SCALE
}

/// Forward/back lean: throttle leans back, brake leans forward.
pub fn pivot(throttle: f64, brake: f64) -> f64 {
    if throttle == 0.0 && brake == 0.0 {
        return 0.0;
    }

    let lean = if throttle > brake { throttle } else { -brake };
    round2(-lean)
}

/// Engine vibration frequency standing in for RPM.
///
/// Inputs that compare neither way (NaN) fall back to idle.
pub fn vibration(throttle: f64, brake: f64) -> f64 {
    let velocity = if throttle >= brake {
        throttle
    } else if brake >= throttle {
        brake * BRAKE_VIBRATION_FACTOR
    } else {
        0.0
    };

    round2(VIBRATION_IDLE + VIBRATION_RANGE * velocity / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pivot() {
        assert_eq!(pivot(0.0, 0.0), 0.0);
        assert!(pivot(0.0, 0.0).is_sign_positive());
        assert_eq!(pivot(50.0, 20.0), -50.0);
        assert_eq!(pivot(20.0, 50.0), 50.0);
        // Equal non-zero inputs take the brake branch.
        assert_eq!(pivot(30.0, 30.0), 30.0);
        assert_eq!(pivot(12.3456, 0.0), -12.35);
    }

    #[test]
    fn test_vibration() {
        assert_eq!(vibration(0.0, 0.0), 680.0);
        assert_eq!(vibration(100.0, 0.0), 7000.0);
        assert_eq!(vibration(0.0, 100.0), 5420.0);
        assert_eq!(vibration(50.0, 50.0), 3840.0);
    }

    #[test]
    fn test_vibration_unordered_inputs_idle() {
        assert_eq!(vibration(f64::NAN, 40.0), VIBRATION_IDLE);
        assert_eq!(vibration(40.0, f64::NAN), VIBRATION_IDLE);
    }

    #[test]
    fn test_tilt_reference_value() {
        let expected = round2(-(2500.0f64 / 9.81).atan().to_degrees()) / 100.0;
        assert_eq!(tilt(50.0, 0.0, 10.0), expected);
        assert!((tilt(50.0, 0.0, 10.0) - (-0.8978)).abs() < 1e-12);
    }

    #[test]
    fn test_tilt_sign_follows_steering() {
        assert!(tilt(50.0, 0.0, 10.0) < 0.0);
        assert!(tilt(50.0, 0.0, -10.0) > 0.0);
        // Braking squares away the sign of the velocity.
        assert_eq!(tilt(0.0, 50.0, 10.0), tilt(50.0, 0.0, 10.0));
    }

    #[test]
    fn test_tilt_straight_ahead_is_zero() {
        assert_eq!(tilt(100.0, 0.0, 0.0), 0.0);
        assert_eq!(tilt(0.0, 100.0, -0.0), 0.0);
        assert_eq!(tilt(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_derive_from_snapshot() {
        let snap = InputSnapshot::new(50.0, 0.0, 12.0, 10.0);
        let signals = PlatformSignals::derive(&snap);
        assert_eq!(signals.tilt_x, tilt(50.0, 0.0, 10.0));
        assert_eq!(signals.tilt_y, -50.0);
        assert_eq!(signals.vibration, 3840.0);
    }
}
