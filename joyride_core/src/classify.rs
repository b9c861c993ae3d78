// joyride_core/src/classify.rs

//! Pure classification of an entity into a [`ControlSnapshot`].
//!
//! The engine adapter flattens whatever data the entity currently carries
//! into an [`EntityProfile`]; this module turns that profile into the
//! snapshot the activator and deactivator work from. No entity access
//! happens here, which keeps the decision tree trivially testable.

use crate::snapshot::{
    AircraftSubtype, CarSizeClass, CarSubtype, ControlSnapshot, EntityCategory, TrainSubtype,
    VehicleKind, VehicleMotionState, WatercraftSubtype,
};

/// A flattened, read-only view of one entity's attached data.
///
/// `type_name` is the human-readable template identifier resolved by the
/// external registry. When the registry cannot resolve one, the adapter
/// passes `None` and classification falls back to an all-default snapshot;
/// the adapter owns the warning log for that case.
#[derive(Debug, Clone, Default)]
pub struct EntityProfile {
    pub type_name: Option<String>,

    // Coarse category markers.
    pub is_vehicle: bool,
    pub is_pedestrian: bool,

    // Mutually exclusive vehicle-kind markers.
    pub is_car: bool,
    pub is_train: bool,
    pub is_watercraft: bool,
    pub is_aircraft: bool,

    // Motion-state markers. `has_motion_data` distinguishes "stationary"
    // from "carries no motion data at all".
    pub is_moving: bool,
    pub parked_car: bool,
    pub parked_train: bool,
    pub stopped: bool,
    pub in_accident: bool,
    pub has_motion_data: bool,

    /// Which optional autonomy fields exist right now, with captured values.
    pub original: crate::snapshot::OriginalFields,
}

/// Classify an entity profile into an immutable control snapshot.
///
/// Always returns a value: an unresolvable type identifier yields the
/// all-default snapshot rather than an error, because the only guarantee
/// the caller needs is "classification always returns".
pub fn classify(profile: &EntityProfile) -> ControlSnapshot {
    // Without a resolved identifier nothing below can be trusted to
    // disambiguate, so every field stays at its default.
    let Some(name) = profile.type_name.as_deref() else {
        return ControlSnapshot::default();
    };

    let mut snapshot = ControlSnapshot {
        original: profile.original.clone(),
        ..Default::default()
    };

    snapshot.category = if profile.is_vehicle {
        EntityCategory::Vehicle
    } else if profile.is_pedestrian {
        EntityCategory::Pedestrian
    } else {
        EntityCategory::None
    };

    if snapshot.category == EntityCategory::Vehicle {
        // The kind markers are mutually exclusive on a well-formed entity;
        // the check order below is the tie-break for a malformed one.
        if profile.is_car {
            snapshot.kind = VehicleKind::Car;
            snapshot.car_subtype = car_subtype(name);
            snapshot.car_size = car_size(name, snapshot.car_subtype);
        } else if profile.is_train {
            snapshot.kind = VehicleKind::Train;
            snapshot.train_subtype = train_subtype(name);
        } else if profile.is_watercraft {
            snapshot.kind = VehicleKind::Watercraft;
            snapshot.watercraft_subtype = watercraft_subtype(name);
        } else if profile.is_aircraft {
            snapshot.kind = VehicleKind::Aircraft;
            snapshot.aircraft_subtype = aircraft_subtype(name);
        }
    }

    // Motion state is computed independently and last. Accident beats
    // parked beats moving beats "no motion data at all".
    snapshot.motion = if profile.in_accident {
        VehicleMotionState::InvolvedInAccident
    } else if profile.parked_car || profile.parked_train || profile.stopped {
        VehicleMotionState::Parked
    } else if profile.is_moving || profile.has_motion_data {
        VehicleMotionState::Moving
    } else {
        VehicleMotionState::None
    };

    snapshot
}

// --- Substring disambiguation within a kind ---
//
// The template names are the only place the sub-kind is visible, so these
// helpers match on well-known substrings. Matching is ordered; the first
// hit wins.

fn name_has(name: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| name.contains(n))
}

fn car_subtype(name: &str) -> CarSubtype {
    if name_has(name, &["Motorcycle", "Motorbike", "Scooter"]) {
        CarSubtype::Motorcycle
    } else if name_has(name, &["Bus"]) {
        CarSubtype::Bus
    } else if name_has(name, &["Truck", "Van", "Trailer"]) {
        CarSubtype::Truck
    } else {
        CarSubtype::Passenger
    }
}

fn car_size(name: &str, subtype: CarSubtype) -> CarSizeClass {
    match subtype {
        CarSubtype::Motorcycle => CarSizeClass::Compact,
        CarSubtype::Bus | CarSubtype::Truck => CarSizeClass::Oversize,
        _ if name_has(name, &["Compact", "Small", "Mini"]) => CarSizeClass::Compact,
        _ => CarSizeClass::Standard,
    }
}

fn train_subtype(name: &str) -> TrainSubtype {
    if name_has(name, &["Engine", "Locomotive"]) {
        TrainSubtype::Engine
    } else if name_has(name, &["Cargo", "Freight"]) {
        TrainSubtype::CargoCar
    } else {
        TrainSubtype::PassengerCar
    }
}

fn watercraft_subtype(name: &str) -> WatercraftSubtype {
    if name_has(name, &["Cargo", "Freight"]) {
        WatercraftSubtype::CargoShip
    } else {
        WatercraftSubtype::PassengerShip
    }
}

fn aircraft_subtype(name: &str) -> AircraftSubtype {
    if name_has(name, &["Helicopter", "Rotor"]) {
        AircraftSubtype::Helicopter
    } else {
        AircraftSubtype::Airplane
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car_profile(name: &str) -> EntityProfile {
        EntityProfile {
            type_name: Some(name.to_string()),
            is_vehicle: true,
            is_car: true,
            ..Default::default()
        }
    }

    #[test]
    fn unresolved_type_name_yields_default_snapshot() {
        let profile = EntityProfile {
            type_name: None,
            is_vehicle: true,
            is_car: true,
            is_moving: true,
            ..Default::default()
        };
        let snapshot = classify(&profile);
        assert!(snapshot.is_unclassified());
        assert_eq!(snapshot, ControlSnapshot::default());
    }

    #[test]
    fn parked_sedan_classifies_as_parked_passenger_car() {
        let mut profile = car_profile("Sedan01");
        profile.parked_car = true;
        let snapshot = classify(&profile);
        assert_eq!(snapshot.category, EntityCategory::Vehicle);
        assert_eq!(snapshot.kind, VehicleKind::Car);
        assert_eq!(snapshot.car_subtype, CarSubtype::Passenger);
        assert_eq!(snapshot.car_size, CarSizeClass::Standard);
        assert_eq!(snapshot.motion, VehicleMotionState::Parked);
    }

    #[test]
    fn motorcycle_is_distinguished_by_name_only() {
        let snapshot = classify(&car_profile("Motorcycle01"));
        assert_eq!(snapshot.kind, VehicleKind::Car);
        assert_eq!(snapshot.car_subtype, CarSubtype::Motorcycle);
        assert_eq!(snapshot.car_size, CarSizeClass::Compact);
    }

    #[test]
    fn cargo_locomotive_prefers_engine_over_cargo_car() {
        // "Engine" and "Cargo" both match; the first branch wins.
        let profile = EntityProfile {
            type_name: Some("CargoEngine02".to_string()),
            is_vehicle: true,
            is_train: true,
            ..Default::default()
        };
        let snapshot = classify(&profile);
        assert_eq!(snapshot.kind, VehicleKind::Train);
        assert_eq!(snapshot.train_subtype, TrainSubtype::Engine);
        // Car refinements stay untouched for non-car kinds.
        assert_eq!(snapshot.car_subtype, CarSubtype::None);
    }

    #[test]
    fn accident_outranks_parked_and_moving() {
        let mut profile = car_profile("Sedan01");
        profile.parked_car = true;
        profile.is_moving = true;
        profile.in_accident = true;
        assert_eq!(
            classify(&profile).motion,
            VehicleMotionState::InvolvedInAccident
        );
    }

    #[test]
    fn entity_without_motion_data_has_no_motion_state() {
        let snapshot = classify(&car_profile("Sedan01"));
        assert_eq!(snapshot.motion, VehicleMotionState::None);
    }

    #[test]
    fn pedestrian_gets_category_but_no_kind() {
        let profile = EntityProfile {
            type_name: Some("Citizen03".to_string()),
            is_pedestrian: true,
            has_motion_data: true,
            ..Default::default()
        };
        let snapshot = classify(&profile);
        assert_eq!(snapshot.category, EntityCategory::Pedestrian);
        assert_eq!(snapshot.kind, VehicleKind::None);
        assert_eq!(snapshot.motion, VehicleMotionState::Moving);
    }

    #[test]
    fn had_flags_are_copied_through() {
        let mut profile = car_profile("Sedan01");
        profile.original.had_path_owner = true;
        profile.original.had_target = true;
        let snapshot = classify(&profile);
        assert!(snapshot.original.had_path_owner);
        assert!(snapshot.original.had_target);
        assert!(!snapshot.original.had_swaying);
    }
}
