// joyride_sim/src/simulation/core/components.rs

//! Mirrors of the world simulation's per-entity data.
//!
//! The takeover core never owns these definitions conceptually: they model
//! the externally-owned data set the classifier reads and the
//! activator/deactivator mutate. Marker components carry no data; their
//! presence is the signal.

use bevy::prelude::{Component, Entity, Quat, Vec3};
use joyride_core::prelude::ControlSnapshot;

// =========================================================================
// == Category and Kind Markers ==
// =========================================================================

/// Present on every vehicle entity, whatever its kind.
#[derive(Component, Debug, Default)]
pub struct VehicleMarker;

/// Present on pedestrian entities.
#[derive(Component, Debug, Default)]
pub struct HumanMarker;

// The kind markers are mutually exclusive on a well-formed entity.

#[derive(Component, Debug, Default)]
pub struct CarMarker;

#[derive(Component, Debug, Default)]
pub struct TrainMarker;

#[derive(Component, Debug, Default)]
pub struct WatercraftMarker;

#[derive(Component, Debug, Default)]
pub struct AircraftMarker;

/// Keys the entity into the prefab catalog; the resolved name is the
/// human-readable type identifier classification matches against.
#[derive(Component, Debug, Clone)]
pub struct PrefabRef(pub String);

// =========================================================================
// == Motion and Lifecycle State ==
// =========================================================================

/// Authoritative world-space velocities. While an entity is under manual
/// control this system is the sole writer.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Velocity {
    pub linear: Vec3,
    pub angular: Vec3,
}

/// The entity is in motion and autonomy systems should treat it as such.
#[derive(Component, Debug, Default)]
pub struct Moving;

/// Resting-state markers. A parked vehicle carries the kind-appropriate
/// one plus the generic `Stopped`.
#[derive(Component, Debug, Default)]
pub struct ParkedCar;

#[derive(Component, Debug, Default)]
pub struct ParkedTrain;

#[derive(Component, Debug, Default)]
pub struct Stopped;

/// The vehicle is tangled in an accident; takeover requests are rejected.
#[derive(Component, Debug, Default)]
pub struct InvolvedInAccident;

/// The entity has been wrecked or queued for deletion.
#[derive(Component, Debug, Default)]
pub struct Destroyed;

/// Suppresses AI/path systems while manual physics drives the entity.
/// This is the minimum flag the activator must set; it does not disable
/// physics, only autonomous decision-making.
#[derive(Component, Debug, Default)]
pub struct OutOfControl;

/// Tells external rendering/consistency systems to re-evaluate the entity
/// this tick. Swept at the start of the next fixed tick.
#[derive(Component, Debug, Default)]
pub struct Updated;

// =========================================================================
// == Autonomy Data ==
// =========================================================================

/// Car navigation scalars owned by the AI driver.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct CarNavigation {
    pub target_position: Vec3,
    pub max_speed: f32,
}

/// Which lane the AI driver currently occupies.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct CarCurrentLane {
    pub lane: Option<Entity>,
    /// Normalized position along the lane curve.
    pub curve_position: f32,
}

/// Ownership record for a path produced by the pathfinding subsystem.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PathOwner {
    /// The stored path no longer matches reality; replan before trusting it.
    pub obsolete: bool,
    pub failed: bool,
    pub stuck: bool,
    pub pending: bool,
}

/// Upcoming lanes the AI driver intends to take.
#[derive(Component, Debug, Clone, Default)]
pub struct NavigationLanes(pub Vec<Entity>);

/// One element of a computed path.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PathElement {
    pub target: Option<Entity>,
    /// Start/end of the traversed span on the target's curve.
    pub curve: [f32; 2],
}

/// The path the entity is following. Autonomy systems fault on an empty
/// list, so restoration seeds a placeholder element when needed.
#[derive(Component, Debug, Clone, Default)]
pub struct PathElements(pub Vec<PathElement>);

/// Generic movement-target reference. Downstream systems expect the field
/// to exist even when there is nothing to chase.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Target(pub Option<Entity>);

/// Cosmetic body sway driven by autonomy motion. Fights manual motion, so
/// takeover removes it; it regenerates naturally after release.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Swaying {
    pub offset: Vec3,
    pub spring_velocity: Vec3,
}

// =========================================================================
// == Rendering Interpolation ==
// =========================================================================

/// Marks the entity for smoothed visual output.
#[derive(Component, Debug, Default)]
pub struct Interpolated;

/// One captured frame of authoritative state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformFrame {
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
}

impl TransformFrame {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
        }
    }
}

/// Fixed 4-slot history buffer consumed by the render layer: slots 0-1
/// hold the previous tick's state, slots 2-3 the current tick's.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct TransformFrames(pub [TransformFrame; 4]);

impl Default for TransformFrames {
    fn default() -> Self {
        Self([TransformFrame::identity(); 4])
    }
}

impl TransformFrames {
    /// Write one tick of history: previous state duplicated into the first
    /// pair of slots, the new state into the second.
    pub fn record(&mut self, previous: TransformFrame, current: TransformFrame) {
        self.0 = [previous, previous, current, current];
    }
}

// =========================================================================
// == Manual Control ==
// =========================================================================

/// The control marker. Its presence is the primary signal that the entity
/// is manually controlled, and it carries the snapshot the release path
/// restores from.
#[derive(Component, Debug, Clone)]
pub struct UnderManualControl(pub ControlSnapshot);
