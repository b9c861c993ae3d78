// joyride_sim/src/simulation/plugins/input/mod.rs

//! A minimal keyboard adapter producing the three debounced drive
//! signals. Device binding proper is the host's concern; anything that
//! writes `DriveControls` once per frame can replace this plugin without
//! the control core noticing.

use bevy::prelude::*;

use crate::simulation::plugins::control::DriveControls;

pub struct KeyboardDriveInputPlugin;

impl Plugin for KeyboardDriveInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, keyboard_drive_input_system);
    }
}

/// Poll the keyboard into the signed axes. The dynamics model owns all
/// smoothing, so raw -1/0/1 values are exactly what it wants.
fn keyboard_drive_input_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut controls: ResMut<DriveControls>,
) {
    let mut throttle = 0.0;
    if keyboard_input.pressed(KeyCode::KeyW) || keyboard_input.pressed(KeyCode::ArrowUp) {
        throttle += 1.0;
    }
    if keyboard_input.pressed(KeyCode::KeyS) || keyboard_input.pressed(KeyCode::ArrowDown) {
        throttle -= 1.0;
    }

    let mut steering = 0.0;
    if keyboard_input.pressed(KeyCode::KeyA) || keyboard_input.pressed(KeyCode::ArrowLeft) {
        steering += 1.0; // Left steer is positive yaw
    }
    if keyboard_input.pressed(KeyCode::KeyD) || keyboard_input.pressed(KeyCode::ArrowRight) {
        steering -= 1.0;
    }

    controls.throttle = throttle;
    controls.steering = steering;
    controls.handbrake = keyboard_input.pressed(KeyCode::Space);
}
