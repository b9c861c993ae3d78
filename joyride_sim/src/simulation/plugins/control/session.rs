// joyride_sim/src/simulation/plugins/control/session.rs

//! The control-session state machine.
//!
//! One live session per process. `Idle` and `Driving` are the only
//! reachable phases; `Walking` and `Flying` are reserved and must behave
//! exactly like `Idle` if anything ever reaches them.
//!
//! The session system runs first in every fixed tick, so a release
//! decided here (toggle, entity loss, shutdown) suppresses the drive
//! step of the same tick.

use bevy::app::AppExit;
use bevy::prelude::*;
use joyride_core::prelude::{ControlSnapshot, DriveSmoothing, TakeoverError};

use crate::simulation::core::components::{
    CarMarker, Destroyed, InvolvedInAccident, TransformFrame, UnderManualControl, Updated,
    VehicleMarker, Velocity,
};
use crate::simulation::core::events::{RespawnControlled, ToggleManualControl};
use crate::simulation::plugins::control::activate::activate;
use crate::simulation::plugins::control::classify::classify_entity;
use crate::simulation::plugins::control::deactivate::deactivate;

/// Which mode the session is in. `Walking` and `Flying` are declared for
/// forward compatibility; no transition produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlPhase {
    #[default]
    Idle,
    Driving,
    Walking,
    Flying,
}

/// The entity the host currently has selected; the toggle acts on this.
/// Owned by external selection UI, read-only here.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SelectedVehicle(pub Option<Entity>);

/// The one live control session.
///
/// Owns the smoothing and interpolation memory exclusively; the world's
/// transform/velocity data stays shared, with this system as its sole
/// writer while the phase is `Driving`.
#[derive(Resource, Debug, Default)]
pub struct ControlSession {
    phase: ControlPhase,
    entity: Option<Entity>,
    /// The session's own copy of the takeover snapshot. Release consumes
    /// this, never a re-derived one.
    snapshot: Option<ControlSnapshot>,

    /// Ramped analog inputs and yaw rate, persisted across ticks while
    /// driving.
    pub smoothing: DriveSmoothing,
    /// Previous tick's authoritative state for the interpolation buffer;
    /// `None` until the first tick after targeting a new entity.
    pub previous_frame: Option<TransformFrame>,

    /// Set by the drive system when the entity disappears mid-tick.
    pub entity_lost: bool,
}

impl ControlSession {
    pub fn phase(&self) -> ControlPhase {
        self.phase
    }

    pub fn is_driving(&self) -> bool {
        self.phase == ControlPhase::Driving
    }

    /// Which entity is currently controlled, if any.
    pub fn controlled_entity(&self) -> Option<Entity> {
        if self.is_driving() {
            self.entity
        } else {
            None
        }
    }

    pub fn is_controlling(&self, entity: Entity) -> bool {
        self.controlled_entity() == Some(entity)
    }

    fn begin(&mut self, entity: Entity, snapshot: ControlSnapshot) {
        self.phase = ControlPhase::Driving;
        self.entity = Some(entity);
        self.snapshot = Some(snapshot);
        self.entity_lost = false;
        self.reset_motion();
    }

    /// Back to `Idle`, dropping the snapshot and all per-entity state.
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Clear the smoothing and interpolation memory (new target, respawn).
    pub fn reset_motion(&mut self) {
        self.smoothing.reset();
        self.previous_frame = None;
    }
}

/// The per-tick state machine step. Exclusive: takeover and release
/// rewrite arbitrary parts of the entity's data set.
pub fn session_system(world: &mut World) {
    // Entity loss is checked before anything else so a dead entity never
    // reaches the dynamics.
    let lost = {
        let session = world.resource::<ControlSession>();
        session.is_driving()
            && (session.entity_lost
                || session
                    .entity
                    .is_none_or(|entity| world.get_entity(entity).is_err()))
    };
    if lost {
        abandon(world);
    }

    // Host shutdown: best-effort restore while the world still exists.
    let exiting = world
        .get_resource::<Events<AppExit>>()
        .map(|events| !events.is_empty())
        .unwrap_or(false);
    if exiting && world.resource::<ControlSession>().is_driving() {
        info!("Shutdown requested while driving; releasing control.");
        release(world);
    }

    let toggles = world
        .get_resource_mut::<Events<ToggleManualControl>>()
        .map(|mut events| events.drain().count())
        .unwrap_or(0);
    for _ in 0..toggles {
        if world.resource::<ControlSession>().is_driving() {
            release(world);
        } else {
            // Reserved phases fall through to the Idle path by design.
            try_takeover(world);
        }
    }

    let respawns = world
        .get_resource_mut::<Events<RespawnControlled>>()
        .map(|mut events| events.drain().count())
        .unwrap_or(0);
    if respawns > 0 {
        respawn(world);
    }
}

/// Validate the selected entity as a takeover candidate.
fn validate_takeover(world: &World, selected: Option<Entity>) -> Result<Entity, TakeoverError> {
    let entity = selected.ok_or(TakeoverError::NothingSelected)?;

    // Re-entrancy guard: asking to take over what we already control is
    // rejected without side effects.
    if world.resource::<ControlSession>().is_controlling(entity) {
        return Err(TakeoverError::AlreadyControlled);
    }

    let entity_ref = world
        .get_entity(entity)
        .map_err(|_| TakeoverError::Missing)?;
    if !entity_ref.contains::<VehicleMarker>() || !entity_ref.contains::<CarMarker>() {
        return Err(TakeoverError::NotDrivable);
    }
    if entity_ref.contains::<Destroyed>() {
        return Err(TakeoverError::Destroyed);
    }
    if entity_ref.contains::<InvolvedInAccident>() {
        return Err(TakeoverError::AccidentInvolved);
    }
    if entity_ref.contains::<UnderManualControl>() {
        return Err(TakeoverError::AlreadyControlled);
    }
    Ok(entity)
}

fn try_takeover(world: &mut World) {
    let selected = world.resource::<SelectedVehicle>().0;
    let entity = match validate_takeover(world, selected) {
        Ok(entity) => entity,
        Err(reason) => {
            info!("Takeover request ignored: {}", reason);
            return;
        }
    };

    // Classify first (pure read), then mutate. The snapshot is attached
    // to the entity by activation and kept by the session for release.
    let snapshot = classify_entity(world, entity);
    let mut entity_mut = world.entity_mut(entity);
    activate(&mut entity_mut, &snapshot);

    world
        .resource_mut::<ControlSession>()
        .begin(entity, snapshot);
    info!("Manual control engaged for {:?}.", entity);
}

/// The successful release path: restore from the stored snapshot, then
/// clear the control marker exactly once.
fn release(world: &mut World) {
    let (entity, snapshot) = {
        let mut session = world.resource_mut::<ControlSession>();
        (session.entity, session.snapshot.take())
    };

    let Some(entity) = entity else {
        world.resource_mut::<ControlSession>().reset();
        return;
    };

    match world.get_entity_mut(entity) {
        Ok(mut entity_mut) => {
            if let Some(snapshot) = snapshot {
                deactivate(&mut entity_mut, &snapshot);
            }
            entity_mut.remove::<UnderManualControl>();
            info!("Manual control released for {:?}.", entity);
        }
        Err(_) => {
            // Raced with a despawn between the loss check and here.
            warn!(
                "Controlled entity {:?} vanished before release; nothing to restore.",
                entity
            );
        }
    }

    world.resource_mut::<ControlSession>().reset();
}

/// The unsuccessful release path: the entity no longer exists, so there
/// is nothing to restore and no marker to clear.
fn abandon(world: &mut World) {
    let entity = world.resource::<ControlSession>().entity;
    warn!(
        "Controlled entity {:?} no longer exists; abandoning the session.",
        entity
    );
    world.resource_mut::<ControlSession>().reset();
}

/// Straighten the vehicle out in place: pitch and roll zeroed, yaw kept,
/// every velocity and ramp cleared. Driving-only by contract.
fn respawn(world: &mut World) {
    let Some(entity) = world.resource::<ControlSession>().controlled_entity() else {
        info!("Respawn requested while not driving; ignored.");
        return;
    };
    let Ok(mut entity_mut) = world.get_entity_mut(entity) else {
        // Loss is handled at the top of the next session tick.
        return;
    };

    if let Some(mut transform) = entity_mut.get_mut::<Transform>() {
        let (yaw, _pitch, _roll) = transform.rotation.to_euler(EulerRot::YXZ);
        transform.rotation = Quat::from_rotation_y(yaw);
    }
    if let Some(mut velocity) = entity_mut.get_mut::<Velocity>() {
        velocity.linear = Vec3::ZERO;
        velocity.angular = Vec3::ZERO;
    }
    entity_mut.insert(Updated);

    world.resource_mut::<ControlSession>().reset_motion();
    info!("Respawned controlled entity {:?}.", entity);
}
