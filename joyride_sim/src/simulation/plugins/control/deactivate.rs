// joyride_sim/src/simulation/plugins/control/deactivate.rs

//! Leaving manual control: rebuild a data set the autonomy systems can
//! resume from.
//!
//! Restoration branches on the motion state captured at takeover and
//! consults only the snapshot. Autonomy subsystems may have added or
//! dropped fields on the entity during the control window, so nothing
//! here re-derives current state.
//!
//! The control marker itself is NOT removed here. The session removes it
//! exactly once, so "is this entity under manual control" stays a single
//! authoritative flag independent of which restoration branch ran.

use bevy::ecs::world::EntityWorldMut;
use bevy::prelude::warn;
use joyride_core::prelude::{ControlSnapshot, EntityHandle, VehicleKind, VehicleMotionState};

use crate::simulation::core::components::*;

/// Reverse the activation mutations using the original takeover snapshot.
pub fn deactivate(entity: &mut EntityWorldMut, snapshot: &ControlSnapshot) {
    match snapshot.motion {
        VehicleMotionState::Parked => restore_parked(entity, snapshot),
        VehicleMotionState::Moving => restore_moving(entity, snapshot),
        _ => {
            // Origin state unknown; anything beyond the unconditional
            // cleanup below risks inventing state, so restore nothing.
            warn!(
                "Releasing an entity with an unclassified origin ({:?}); \
                 no kind-specific restoration performed.",
                snapshot.motion
            );
        }
    }

    // All branches: autonomy becomes eligible to act again.
    entity.remove::<OutOfControl>();
}

fn restore_parked(entity: &mut EntityWorldMut, snapshot: &ControlSnapshot) {
    entity.remove::<Moving>();

    // The kind-appropriate resting marker plus the generic one.
    if snapshot.kind == VehicleKind::Train {
        if !entity.contains::<ParkedTrain>() {
            entity.insert(ParkedTrain);
        }
    } else if !entity.contains::<ParkedCar>() {
        entity.insert(ParkedCar);
    }
    if !entity.contains::<Stopped>() {
        entity.insert(Stopped);
    }

    // A parked vehicle neither interpolates nor chases a target.
    entity.remove::<(Interpolated, TransformFrames, Target)>();
}

fn restore_moving(entity: &mut EntityWorldMut, snapshot: &ControlSnapshot) {
    let original = &snapshot.original;

    // Re-add what existed, zeroed. Autonomy replans from defaults; stale
    // values would be worse than empty ones.
    if original.had_navigation && !entity.contains::<CarNavigation>() {
        entity.insert(CarNavigation::default());
    }
    if original.had_current_lane && !entity.contains::<CarCurrentLane>() {
        entity.insert(CarCurrentLane::default());
    }
    if original.had_path_owner {
        // Obsolete set, failure flags cleared: "replan, do not trust the
        // stored path".
        entity.insert(PathOwner {
            obsolete: true,
            failed: false,
            stuck: false,
            pending: false,
        });
    }

    // The lists are rebuilt unconditionally: cleared, re-added if absent,
    // and the path seeded with one placeholder because autonomy faults on
    // an empty path before it gets a chance to replan.
    if !entity.contains::<NavigationLanes>() {
        entity.insert(NavigationLanes::default());
    }
    if let Some(mut lanes) = entity.get_mut::<NavigationLanes>() {
        lanes.0.clear();
    }
    if !entity.contains::<PathElements>() {
        entity.insert(PathElements::default());
    }
    if let Some(mut elements) = entity.get_mut::<PathElements>() {
        elements.0.clear();
        elements.0.push(PathElement::default());
    }

    // The movement target goes back to its captured value, or to nothing.
    entity.insert(Target(original.target.map(EntityHandle::to_entity)));

    if original.had_swaying && !entity.contains::<Swaying>() {
        // Cosmetic; the spring re-settles on its own.
        entity.insert(Swaying::default());
    }
}
