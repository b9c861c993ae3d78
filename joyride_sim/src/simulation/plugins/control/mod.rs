// joyride_sim/src/simulation/plugins/control/mod.rs

//! Manual vehicle control: takeover, per-tick driving, release.
//!
//! The plugin wires the session state machine and the drive step onto
//! the fixed-update schedule, ordered so that a release decided by the
//! state machine suppresses the same tick's physics.

pub mod activate;
pub mod classify;
pub mod deactivate;
pub mod drive;
pub mod session;

use bevy::prelude::*;

use crate::simulation::core::app_state::ControlSet;
use crate::simulation::core::components::Updated;
use crate::simulation::core::events::{RespawnControlled, ToggleManualControl};
use drive::drive_controlled_system;
use session::{session_system, ControlSession, SelectedVehicle};

/// The three already-debounced player signals, written once per frame by
/// whatever input adapter the host wires up and sampled once per tick by
/// the drive system.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DriveControls {
    /// Signed throttle/brake axis in [-1, 1]; positive is gas.
    pub throttle: f64,
    /// Signed steering axis in [-1, 1]; positive steers left.
    pub steering: f64,
    pub handbrake: bool,
}

pub struct ManualControlPlugin;

impl Plugin for ManualControlPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlSession>()
            .init_resource::<SelectedVehicle>()
            .init_resource::<DriveControls>()
            .add_event::<ToggleManualControl>()
            .add_event::<RespawnControlled>()
            .configure_sets(
                FixedUpdate,
                (
                    ControlSet::Maintenance,
                    ControlSet::Session,
                    ControlSet::Drive,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                sweep_updated_markers.in_set(ControlSet::Maintenance),
            )
            .add_systems(FixedUpdate, session_system.in_set(ControlSet::Session))
            .add_systems(
                FixedUpdate,
                drive_controlled_system.in_set(ControlSet::Drive),
            );
    }
}

/// Host simulations consume and clear the `Updated` marker themselves; in
/// a standalone run this sweep keeps "mark updated" meaningful from one
/// tick to the next.
fn sweep_updated_markers(mut commands: Commands, query: Query<Entity, With<Updated>>) {
    for entity in &query {
        commands.entity(entity).remove::<Updated>();
    }
}
