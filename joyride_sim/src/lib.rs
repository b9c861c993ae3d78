// joyride_sim/src/lib.rs

use bevy::prelude::*;

// Import the plugins defined within the simulation crate.
use crate::simulation::config::ConfigPlugin;
use crate::simulation::plugins::control::ManualControlPlugin;
use crate::simulation::plugins::input::KeyboardDriveInputPlugin;

// This prelude is for convenience for other files WITHIN the joyride_sim crate.
pub mod prelude;

// This module contains all the simulation-specific logic.
pub mod simulation;

/// The main plugin that brings together all the takeover parts. A host
/// app adds this one plugin and gains the toggle/drive/release loop.
pub struct JoyridePlugin;

impl Plugin for JoyridePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            // Loads the drive tunables and the prefab catalog.
            ConfigPlugin,
            // The session state machine and per-tick dynamics.
            ManualControlPlugin,
            // A replaceable producer for the three drive signals.
            KeyboardDriveInputPlugin,
        ));
    }
}
