// joyride_sim/src/simulation/core/transforms.rs

//! Coordinate conversions between the core's ENU frame and Bevy's world.
//!
//! The dynamics model works in ENU (X east, Y north, Z up, f64); Bevy
//! renders Y-up with -Z forward (f32). The mapping is a -90 degree
//! rotation around X: ENU X -> Bevy X, ENU North -> Bevy -Z, ENU Up ->
//! Bevy Y.

use crate::simulation::core::components::Velocity;
use bevy::prelude::{Quat as BevyQuat, Transform as BevyTransform, Vec3 as BevyVec3};
use joyride_core::prelude::BodyState;
use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use std::f64::consts::FRAC_PI_2;

thread_local! {
    /// Rotation taking ENU basis vectors to Bevy basis vectors.
    /// E.g. ENU's Z-axis (0,0,1) (Up) becomes (0,1,0) in Bevy coords (Bevy Y).
    pub static Q_ENU_FRAME_TO_BEVY_FRAME: UnitQuaternion<f64> =
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2);
}

/// Converts a 3D coordinate vector from ENU to Bevy world.
pub fn enu_vector_to_bevy_vector(enu_vec: &Vector3<f64>) -> BevyVec3 {
    BevyVec3::new(
        enu_vec.x as f32,  // East -> Bevy X
        enu_vec.z as f32,  // ENU Up -> Bevy Y
        -enu_vec.y as f32, // ENU North -> Bevy -Z
    )
}

/// Converts a 3D coordinate vector from Bevy world to ENU.
pub fn bevy_vector_to_enu_vector(bevy_vec: &BevyVec3) -> Vector3<f64> {
    Vector3::new(
        bevy_vec.x as f64,  // Bevy X -> ENU East
        -bevy_vec.z as f64, // Bevy -Z -> ENU North
        bevy_vec.y as f64,  // Bevy Y -> ENU Up
    )
}

/// Converts an object's orientation from the ENU frame to Bevy's world frame.
pub fn enu_quat_to_bevy_quat(enu_obj_quat: &UnitQuaternion<f64>) -> BevyQuat {
    // q_obj_in_bevy = Q(bevy<-enu) * q_obj_in_enu * Q(bevy<-enu)^-1
    let rotated = Q_ENU_FRAME_TO_BEVY_FRAME
        .with(|q_frame| *q_frame * enu_obj_quat * q_frame.inverse());

    BevyQuat::from_xyzw(
        rotated.coords.x as f32,
        rotated.coords.y as f32,
        rotated.coords.z as f32,
        rotated.coords.w as f32,
    )
}

/// Converts an object's orientation from Bevy's world frame to the ENU frame.
pub fn bevy_quat_to_enu_quat(bevy_obj_quat: &BevyQuat) -> UnitQuaternion<f64> {
    let bevy_q = UnitQuaternion::from_quaternion(Quaternion::new(
        bevy_obj_quat.w as f64, // nalgebra Quaternion::new is w,x,y,z
        bevy_obj_quat.x as f64,
        bevy_obj_quat.y as f64,
        bevy_obj_quat.z as f64,
    ));

    Q_ENU_FRAME_TO_BEVY_FRAME.with(|q_frame| q_frame.inverse() * bevy_q * *q_frame)
}

/// Assembles the dynamics-facing body state from an entity's authoritative
/// transform and velocity.
pub fn body_state_from_world(transform: &BevyTransform, velocity: &Velocity) -> BodyState {
    BodyState {
        position: bevy_vector_to_enu_vector(&transform.translation),
        rotation: bevy_quat_to_enu_quat(&transform.rotation),
        velocity: bevy_vector_to_enu_vector(&velocity.linear),
    }
}

/// Writes a dynamics result back as the entity's authoritative state.
/// The angular velocity is the yaw rate about world up.
pub fn write_body_state(
    body: &BodyState,
    yaw_rate: f64,
    transform: &mut BevyTransform,
    velocity: &mut Velocity,
) {
    transform.translation = enu_vector_to_bevy_vector(&body.position);
    transform.rotation = enu_quat_to_bevy_quat(&body.rotation);
    velocity.linear = enu_vector_to_bevy_vector(&body.velocity);
    velocity.angular = BevyVec3::Y * yaw_rate as f32;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2 as HALF_PI;

    const EPS: f32 = 1e-6;

    #[test]
    fn enu_axes_map_onto_bevy_axes() {
        let east = enu_vector_to_bevy_vector(&Vector3::x());
        let north = enu_vector_to_bevy_vector(&Vector3::y());
        let up = enu_vector_to_bevy_vector(&Vector3::z());
        assert_abs_diff_eq!(east.x, 1.0, epsilon = EPS);
        assert_abs_diff_eq!(north.z, -1.0, epsilon = EPS);
        assert_abs_diff_eq!(up.y, 1.0, epsilon = EPS);
    }

    #[test]
    fn vector_round_trip_is_identity() {
        let original = BevyVec3::new(1.5, -2.25, 3.75);
        let back = enu_vector_to_bevy_vector(&bevy_vector_to_enu_vector(&original));
        assert_abs_diff_eq!(original.x, back.x, epsilon = EPS);
        assert_abs_diff_eq!(original.y, back.y, epsilon = EPS);
        assert_abs_diff_eq!(original.z, back.z, epsilon = EPS);
    }

    #[test]
    fn enu_yaw_becomes_bevy_yaw_about_y() {
        // A quarter turn about ENU up must come out as a quarter turn
        // about Bevy's Y axis.
        let enu_yaw = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), HALF_PI);
        let bevy = enu_quat_to_bevy_quat(&enu_yaw);
        let expected = BevyQuat::from_rotation_y(HALF_PI as f32);
        assert!(bevy.dot(expected).abs() > 1.0 - EPS);
    }

    #[test]
    fn quat_round_trip_preserves_rotation() {
        let original = UnitQuaternion::from_euler_angles(0.1, -0.4, 2.0);
        let back = bevy_quat_to_enu_quat(&enu_quat_to_bevy_quat(&original));
        assert!(original.angle_to(&back) < 1e-5);
    }

    #[test]
    fn body_state_round_trip_through_world() {
        let mut transform = BevyTransform::from_xyz(10.0, 2.0, -5.0);
        transform.rotation = BevyQuat::from_rotation_y(0.7);
        let mut velocity = Velocity {
            linear: BevyVec3::new(3.0, 0.0, -1.0),
            angular: BevyVec3::ZERO,
        };

        let body = body_state_from_world(&transform, &velocity);
        let mut transform_back = BevyTransform::default();
        let mut velocity_back = Velocity::default();
        write_body_state(&body, 0.25, &mut transform_back, &mut velocity_back);

        assert_abs_diff_eq!(transform.translation.x, transform_back.translation.x, epsilon = EPS);
        assert_abs_diff_eq!(transform.translation.y, transform_back.translation.y, epsilon = EPS);
        assert_abs_diff_eq!(transform.translation.z, transform_back.translation.z, epsilon = EPS);
        assert!(transform.rotation.dot(transform_back.rotation).abs() > 1.0 - EPS);
        assert_abs_diff_eq!(velocity.linear.x, velocity_back.linear.x, epsilon = EPS);
        assert_abs_diff_eq!(velocity_back.angular.y, 0.25, epsilon = EPS);
    }
}
