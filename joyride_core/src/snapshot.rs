// joyride_core/src/snapshot.rs

//! The `ControlSnapshot` data model: everything recorded about an entity
//! at takeover time, and the only thing the release path is allowed to
//! consult. Autonomy systems may add or drop data on the entity while it
//! is being driven, so re-deriving any of this at release time would
//! restore the wrong world.

use crate::types::EntityHandle;
use nalgebra::Vector3;

// =========================================================================
// == Classification Enums ==
// =========================================================================

/// Coarse kind of a controllable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityCategory {
    #[default]
    None,
    Vehicle,
    Pedestrian,
}

/// Which family of vehicle an entity belongs to. Only `Car` is drivable;
/// the other kinds exist so release can restore the right resting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VehicleKind {
    #[default]
    None,
    Car,
    Train,
    Aircraft,
    Watercraft,
}

/// What the vehicle was doing when the snapshot was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VehicleMotionState {
    #[default]
    None,
    Moving,
    Parked,
    InvolvedInAccident,
}

/// Refinement of `VehicleKind::Car`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CarSubtype {
    #[default]
    None,
    Passenger,
    Motorcycle,
    Truck,
    Bus,
}

/// Rough footprint of a car, used by restoration heuristics downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CarSizeClass {
    #[default]
    None,
    Compact,
    Standard,
    Oversize,
}

/// Refinement of `VehicleKind::Train`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrainSubtype {
    #[default]
    None,
    Engine,
    PassengerCar,
    CargoCar,
}

/// Refinement of `VehicleKind::Watercraft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatercraftSubtype {
    #[default]
    None,
    PassengerShip,
    CargoShip,
}

/// Refinement of `VehicleKind::Aircraft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AircraftSubtype {
    #[default]
    None,
    Airplane,
    Helicopter,
}

// =========================================================================
// == Captured Per-Entity Data ==
// =========================================================================

/// Which optional autonomy fields the entity carried before takeover,
/// plus the captured values that restoration needs verbatim.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OriginalFields {
    pub had_navigation: bool,
    pub had_current_lane: bool,
    pub had_path_owner: bool,
    pub had_navigation_lanes: bool,
    pub had_path_elements: bool,
    pub had_swaying: bool,
    pub had_interpolation: bool,
    pub had_target: bool,

    /// The movement target the entity was chasing, if any.
    pub target: Option<EntityHandle>,
    /// Linear velocity at capture time (ENU, m/s).
    pub velocity: Vector3<f64>,
    /// Angular velocity at capture time (ENU, rad/s).
    pub angular_velocity: Vector3<f64>,
}

/// The immutable record of an entity's pre-control state. Created once
/// per takeover by the classifier, owned by the session until release,
/// then discarded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ControlSnapshot {
    pub category: EntityCategory,
    pub kind: VehicleKind,
    pub motion: VehicleMotionState,

    // Mutually exclusive refinements; only the one matching `kind` is
    // ever populated, the rest stay `None`.
    pub car_subtype: CarSubtype,
    pub car_size: CarSizeClass,
    pub train_subtype: TrainSubtype,
    pub watercraft_subtype: WatercraftSubtype,
    pub aircraft_subtype: AircraftSubtype,

    pub original: OriginalFields,
}

impl ControlSnapshot {
    /// True when classification could not resolve anything about the
    /// entity (unresolvable type identifier, or no recognizable data).
    pub fn is_unclassified(&self) -> bool {
        self.category == EntityCategory::None
    }
}
