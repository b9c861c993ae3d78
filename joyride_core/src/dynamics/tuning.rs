// joyride_core/src/dynamics/tuning.rs

use serde::{Deserialize, Serialize};

/// The full set of drive-feel tunables consumed by [`super::step`].
///
/// Values arrive from external settings storage once per tick and may
/// change live between ticks; the dynamics reads them fresh every step
/// and keeps no copy. Every field has a default so a partial settings
/// file still resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveTuning {
    /// Forward acceleration at full throttle, m/s^2.
    pub acceleration: f64,
    /// Forward speed ceiling, m/s. Forward speed never exceeds this.
    pub top_speed: f64,
    /// Braking deceleration, m/s^2. Also the handbrake's direct bleed rate.
    pub braking: f64,
    /// Scales how strongly the ramped throttle translates into acceleration.
    pub gas_sensitivity: f64,
    /// Maximum effective steering angle at zero speed, radians.
    pub steering_sensitivity: f64,
    /// Distance between axles, m. At or near zero the bicycle-model yaw
    /// term is treated as an infinite turning radius and contributes nothing.
    pub wheelbase: f64,
    /// Overall grip; seeds both the longitudinal and lateral grip rates.
    pub grip: f64,
    /// Multiplier on longitudinal grip while the handbrake is held.
    pub handbrake_braking: f64,
    /// Multiplier on lateral grip while the handbrake is held; below 1.0
    /// the rear steps out.
    pub handbrake_slide: f64,
    /// How much lateral grip a sharp turn at speed sheds, 0..1.
    pub drift: f64,
    /// Analog ramp rate while the throttle is being pressed, 1/s.
    pub gas_ramp_up: f64,
    /// Analog ramp rate while the throttle is being released, 1/s.
    pub gas_ramp_down: f64,
    /// Analog ramp rate while steering deflection grows, 1/s.
    pub steer_ramp_up: f64,
    /// Analog ramp rate while steering returns toward center, 1/s.
    pub steer_ramp_down: f64,
    /// Yaw-rate multiplier at standstill, blended out by `pivot_blend_speed`.
    pub low_speed_steer_boost: f64,
    /// Fraction of steering sensitivity remaining at top speed.
    pub high_speed_steer_damping: f64,
    /// Speed at which the low-speed boost has fully blended away, m/s.
    pub pivot_blend_speed: f64,
    /// Forward speed lost per unit of |yaw rate| * |speed|, hard cornering tax.
    pub turning_speed_loss: f64,
    /// Exponential decay rate of forward speed while coasting, 1/s.
    pub coast_deceleration: f64,
    /// Multiplier on acceleration while reversing.
    pub reverse_power: f64,
    /// Absolute cap on sideways speed, m/s.
    pub max_lateral_speed: f64,
}

impl Default for DriveTuning {
    fn default() -> Self {
        Self {
            acceleration: 18.0,
            top_speed: 45.0,
            braking: 30.0,
            gas_sensitivity: 1.0,
            steering_sensitivity: 0.55,
            wheelbase: 2.8,
            grip: 4.0,
            handbrake_braking: 0.6,
            handbrake_slide: 0.25,
            drift: 0.55,
            gas_ramp_up: 6.0,
            gas_ramp_down: 9.0,
            steer_ramp_up: 5.0,
            steer_ramp_down: 7.0,
            low_speed_steer_boost: 2.5,
            high_speed_steer_damping: 0.35,
            pivot_blend_speed: 8.0,
            turning_speed_loss: 0.12,
            coast_deceleration: 0.8,
            reverse_power: 0.5,
            max_lateral_speed: 12.0,
        }
    }
}
