// joyride_core/src/dynamics/mod.rs

//! The per-tick vehicle dynamics model.
//!
//! This is a deliberately simplified arcade drive, not a rigid-body
//! simulation: one forward speed, one lateral speed, one yaw rate,
//! recomposed into a world-space velocity every tick. State lives in ENU
//! coordinates with body X forward and world Z up; the engine adapter
//! converts at the boundary.
//!
//! The only mutable state carried between ticks is [`DriveSmoothing`]
//! (ramped analog inputs plus the current yaw rate). Everything else is
//! a pure function of the entity's pose/velocity, the player input, and
//! the tunables.

mod tuning;

pub use tuning::DriveTuning;

use nalgebra::{UnitQuaternion, Vector3};
use num_traits::Float;

// --- Fixed model constants (not tunables) ---

/// Below this forward speed, with no throttle, the analog ramps reset so a
/// stopped car cannot creep on residual smoothing state.
const STOP_RESET_SPEED: f64 = 0.1;
const STOP_RESET_THROTTLE: f64 = 0.01;
/// Forward speed above which negative input means "brake" rather than "reverse".
const BRAKE_DIRECTION_SPEED: f64 = 0.1;
/// Below this speed a held handbrake stabilizes instead of sliding.
const HANDBRAKE_STABILIZE_SPEED: f64 = 1.0;
const HANDBRAKE_YAW_DAMP_RATE: f64 = 20.0;
/// Drift needs real speed and real rotation to engage.
const DRIFT_MIN_SPEED: f64 = 5.0;
const DRIFT_MIN_YAW_RATE: f64 = 0.1;
/// Hard floor on reverse speed, m/s.
const MIN_FORWARD_SPEED: f64 = -10.0;
/// Zero-snap thresholds for speed and effective throttle.
const SPEED_EPSILON: f64 = 0.05;
const THROTTLE_EPSILON: f64 = 0.01;
/// Rate at which the actual yaw rate chases the steering target, 1/s.
const STEER_RESPONSE_RATE: f64 = 15.0;
/// Rotational drag pulling yaw rate back to zero, 1/s.
const YAW_DRAG_RATE: f64 = 5.0;
/// Wheelbase under this counts as an infinite turning radius.
const MIN_WHEELBASE: f64 = 1e-3;

/// The three already-debounced player signals, sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriveInput {
    /// Signed throttle/brake axis in [-1, 1]; positive is gas.
    pub throttle: f64,
    /// Signed steering axis in [-1, 1]; positive steers left (ENU yaw).
    pub steering: f64,
    pub handbrake: bool,
}

/// Smoothing state that persists across ticks while a vehicle is driven.
/// Reset whenever a new entity is targeted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriveSmoothing {
    /// Ramped non-negative gas component.
    pub gas: f64,
    /// Ramped non-negative reverse/brake component.
    pub reverse: f64,
    /// Ramped signed steering deflection.
    pub steer: f64,
    /// Current yaw rate, rad/s, positive counter-clockwise about world up.
    pub yaw_rate: f64,
}

impl DriveSmoothing {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// An entity's authoritative pose and velocity, ENU frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyState {
    pub position: Vector3<f64>,
    pub rotation: UnitQuaternion<f64>,
    /// Linear world-space velocity, m/s.
    pub velocity: Vector3<f64>,
}

impl Default for BodyState {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            velocity: Vector3::zeros(),
        }
    }
}

impl BodyState {
    /// The direction the body is facing, world frame.
    pub fn forward(&self) -> Vector3<f64> {
        self.rotation * Vector3::x()
    }

    /// The body's right-hand axis, world frame.
    pub fn right(&self) -> Vector3<f64> {
        self.rotation * -Vector3::y()
    }

    /// Velocity projected onto the forward axis, signed.
    pub fn forward_speed(&self) -> f64 {
        self.velocity.dot(&self.forward())
    }
}

/// Advance the vehicle one tick.
///
/// Consumes the current body state, mutates the smoothing state, and
/// returns the new authoritative pose and velocity. The caller writes the
/// result back to the world and maintains the render-interpolation
/// history; nothing here touches shared state.
pub fn step(
    body: &BodyState,
    smoothing: &mut DriveSmoothing,
    input: &DriveInput,
    tuning: &DriveTuning,
    dt: f64,
) -> BodyState {
    let forward = body.forward();
    let right = body.right();

    let mut forward_speed = body.velocity.dot(&forward);

    // A full stop with no pedal input clears the analog ramps, otherwise
    // the leftover smoothed gas would creep the car forward.
    if forward_speed.abs() < STOP_RESET_SPEED && input.throttle.abs() < STOP_RESET_THROTTLE {
        smoothing.gas = 0.0;
        smoothing.reverse = 0.0;
    }

    // Split the signed axis and ramp each half toward its raw value, fast
    // while pressed, slower while releasing.
    let raw_gas = input.throttle.max(0.0);
    let raw_reverse = (-input.throttle).max(0.0);
    smoothing.gas = ramp(
        smoothing.gas,
        raw_gas,
        tuning.gas_ramp_up,
        tuning.gas_ramp_down,
        dt,
    );
    smoothing.reverse = ramp(
        smoothing.reverse,
        raw_reverse,
        tuning.gas_ramp_up,
        tuning.gas_ramp_down,
        dt,
    );

    // Steering has its own ramp pair; growing deflection uses the up rate.
    let steer_rate = if input.steering.abs() > smoothing.steer.abs() {
        tuning.steer_ramp_up
    } else {
        tuning.steer_ramp_down
    };
    smoothing.steer = lerp(smoothing.steer, input.steering, steer_rate * dt);

    let mut throttle = effective_throttle(input.throttle, smoothing);

    // The handbrake can never accelerate the car forward.
    if input.handbrake {
        throttle = throttle.min(0.0);
    }

    let mut lateral_speed = body.velocity.dot(&right);

    // Grip starts from the single overall tunable in both directions.
    let mut longitudinal_grip = tuning.grip;
    let mut lateral_grip = tuning.grip;

    if input.handbrake {
        lateral_grip *= tuning.handbrake_slide;
        longitudinal_grip *= tuning.handbrake_braking;
        if forward_speed.abs() < HANDBRAKE_STABILIZE_SPEED {
            // Near standstill the loosened rear would oscillate; clamp it
            // down and damp the spin so handbrake stops stay put.
            lateral_grip *= 2.0;
            smoothing.yaw_rate = lerp(smoothing.yaw_rate, 0.0, HANDBRAKE_YAW_DAMP_RATE * dt);
        }
        forward_speed = move_toward(forward_speed, 0.0, tuning.braking * dt);
    }

    // Sharp turns at speed intentionally shed lateral grip.
    if forward_speed.abs() > DRIFT_MIN_SPEED && smoothing.yaw_rate.abs() > DRIFT_MIN_YAW_RATE {
        lateral_grip *= 1.0 - tuning.drift;
    }

    // Longitudinal update: accelerate with the input, brake against it,
    // or coast toward zero.
    if throttle > 0.0 {
        if forward_speed < -BRAKE_DIRECTION_SPEED {
            // Gas while rolling backward brakes to a stop first.
            forward_speed =
                move_toward(forward_speed, 0.0, tuning.braking * longitudinal_grip * dt);
        } else {
            forward_speed +=
                throttle * tuning.acceleration * tuning.gas_sensitivity * longitudinal_grip * dt;
        }
    } else if throttle < 0.0 {
        if forward_speed > BRAKE_DIRECTION_SPEED {
            forward_speed =
                move_toward(forward_speed, 0.0, tuning.braking * longitudinal_grip * dt);
        } else {
            forward_speed += throttle
                * tuning.acceleration
                * tuning.reverse_power
                * tuning.gas_sensitivity
                * longitudinal_grip
                * dt;
        }
    } else if forward_speed.abs() > SPEED_EPSILON {
        forward_speed = lerp(forward_speed, 0.0, tuning.coast_deceleration * dt);
    }

    forward_speed = forward_speed.clamp(MIN_FORWARD_SPEED, tuning.top_speed);
    if forward_speed.abs() < SPEED_EPSILON && throttle.abs() < THROTTLE_EPSILON {
        forward_speed = 0.0;
    }

    // Lateral speed decays at the lateral grip rate and is hard-capped.
    lateral_speed = lerp(lateral_speed, 0.0, lateral_grip * dt);
    lateral_speed = lateral_speed.clamp(-tuning.max_lateral_speed, tuning.max_lateral_speed);

    // Hard cornering bleeds forward speed.
    let cornering_loss =
        smoothing.yaw_rate.abs() * forward_speed.abs() * tuning.turning_speed_loss * dt;
    forward_speed = move_toward(forward_speed, 0.0, cornering_loss);

    // Steering sensitivity interpolates from full at standstill down to
    // the damped fraction at top speed.
    let speed_ratio = if tuning.top_speed > 0.0 {
        (forward_speed.abs() / tuning.top_speed).min(1.0)
    } else {
        1.0
    };
    let damped_sensitivity =
        tuning.steering_sensitivity * lerp(1.0, tuning.high_speed_steer_damping, speed_ratio);

    // Simplified bicycle model: yaw = v * sin(steering angle) / wheelbase.
    let steering_angle = smoothing.steer * damped_sensitivity;
    let mut target_yaw_rate = if tuning.wheelbase.abs() > MIN_WHEELBASE {
        forward_speed * steering_angle.sin() / tuning.wheelbase
    } else {
        0.0
    };

    // Low-speed boost lets the car pivot out of tight spots; fully blended
    // away at the pivot blend speed and never below 1x.
    let blend = if tuning.pivot_blend_speed > 0.0 {
        (forward_speed.abs() / tuning.pivot_blend_speed).min(1.0)
    } else {
        1.0
    };
    let boost = lerp(tuning.low_speed_steer_boost, 1.0, blend)
        .clamp(1.0, tuning.low_speed_steer_boost.max(1.0));
    target_yaw_rate *= boost;

    // Chase the target yaw rate, then apply rotational drag.
    smoothing.yaw_rate = lerp(smoothing.yaw_rate, target_yaw_rate, STEER_RESPONSE_RATE * dt);
    smoothing.yaw_rate = lerp(smoothing.yaw_rate, 0.0, YAW_DRAG_RATE * dt);

    // Recompose the world velocity from the body axes and integrate.
    let velocity = forward * forward_speed + right * lateral_speed;
    let rotation =
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), smoothing.yaw_rate * dt)
            * body.rotation;
    let position = body.position + velocity * dt;

    BodyState {
        position,
        rotation,
        velocity,
    }
}

/// Resolve the two ramped halves into one signed effective throttle.
/// Positive raw input uses the ramped gas; negative raw input uses the
/// ramped reverse channel (whether that brakes or reverses depends on the
/// current forward speed, decided in the longitudinal update); no input
/// is exactly zero.
fn effective_throttle(raw: f64, smoothing: &DriveSmoothing) -> f64 {
    if raw > 0.0 {
        smoothing.gas
    } else if raw < 0.0 {
        -smoothing.reverse
    } else {
        0.0
    }
}

/// Linear interpolation with the blend factor clamped to [0, 1], so a
/// rate * dt product larger than one cannot overshoot.
fn lerp<T: Float>(from: T, to: T, t: T) -> T {
    from + (to - from) * t.max(T::zero()).min(T::one())
}

/// Step `value` toward `target` by at most `max_delta` without overshoot.
fn move_toward<T: Float>(value: T, target: T, max_delta: T) -> T {
    if (target - value).abs() <= max_delta {
        target
    } else {
        value + (target - value).signum() * max_delta
    }
}

fn ramp(current: f64, raw: f64, up_rate: f64, down_rate: f64, dt: f64) -> f64 {
    let rate = if raw > current { up_rate } else { down_rate };
    lerp(current, raw, rate * dt)
}
