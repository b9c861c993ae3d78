// joyride_sim/src/simulation/plugins/control/classify.rs

//! The ECS-facing side of classification: flatten whatever data the
//! entity currently carries into an `EntityProfile` and hand it to the
//! pure decision tree in the core crate.

use bevy::prelude::*;
use joyride_core::prelude::{classify, ControlSnapshot, EntityHandle, EntityProfile, OriginalFields};
use nalgebra::Vector3;

use crate::simulation::config::catalog::PrefabCatalog;
use crate::simulation::core::components::*;
use crate::simulation::core::transforms::bevy_vector_to_enu_vector;

/// Take the pre-control snapshot of an entity. Pure read; the entity is
/// not touched.
///
/// An unresolvable type identifier is logged and degrades to the
/// all-default snapshot rather than blocking the takeover.
pub fn classify_entity(world: &World, entity: Entity) -> ControlSnapshot {
    let catalog = world.get_resource::<PrefabCatalog>();
    let entity_ref = world.entity(entity);

    let type_name = entity_ref
        .get::<PrefabRef>()
        .zip(catalog)
        .and_then(|(prefab, catalog)| catalog.resolve_type_name(&prefab.0))
        .map(str::to_owned);
    if type_name.is_none() {
        warn!(
            "No type name resolved for {:?}; taking an unclassified snapshot.",
            entity
        );
    }

    let velocity = entity_ref.get::<Velocity>();
    let target = entity_ref.get::<Target>();

    let profile = EntityProfile {
        type_name,

        is_vehicle: entity_ref.contains::<VehicleMarker>(),
        is_pedestrian: entity_ref.contains::<HumanMarker>(),

        is_car: entity_ref.contains::<CarMarker>(),
        is_train: entity_ref.contains::<TrainMarker>(),
        is_watercraft: entity_ref.contains::<WatercraftMarker>(),
        is_aircraft: entity_ref.contains::<AircraftMarker>(),

        is_moving: entity_ref.contains::<Moving>(),
        parked_car: entity_ref.contains::<ParkedCar>(),
        parked_train: entity_ref.contains::<ParkedTrain>(),
        stopped: entity_ref.contains::<Stopped>(),
        in_accident: entity_ref.contains::<InvolvedInAccident>(),
        has_motion_data: velocity.is_some(),

        original: OriginalFields {
            had_navigation: entity_ref.contains::<CarNavigation>(),
            had_current_lane: entity_ref.contains::<CarCurrentLane>(),
            had_path_owner: entity_ref.contains::<PathOwner>(),
            had_navigation_lanes: entity_ref.contains::<NavigationLanes>(),
            had_path_elements: entity_ref.contains::<PathElements>(),
            had_swaying: entity_ref.contains::<Swaying>(),
            had_interpolation: entity_ref.contains::<Interpolated>(),
            had_target: target.is_some(),
            target: target.and_then(|t| t.0).map(EntityHandle::from_entity),
            velocity: velocity
                .map(|v| bevy_vector_to_enu_vector(&v.linear))
                .unwrap_or_else(Vector3::zeros),
            angular_velocity: velocity
                .map(|v| bevy_vector_to_enu_vector(&v.angular))
                .unwrap_or_else(Vector3::zeros),
        },
    };

    classify(&profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use joyride_core::prelude::{CarSubtype, EntityCategory, VehicleKind, VehicleMotionState};

    use crate::simulation::config::catalog::PrefabDef;

    fn world_with_catalog(entries: &[(&str, &str)]) -> World {
        let mut world = World::new();
        let mut catalog = PrefabCatalog::default();
        for (key, name) in entries {
            catalog.0.insert(
                key.to_string(),
                PrefabDef {
                    name: name.to_string(),
                },
            );
        }
        world.insert_resource(catalog);
        world
    }

    #[test]
    fn snapshot_of_a_moving_car_with_autonomy_data() {
        let mut world = world_with_catalog(&[("vehicles.sedan", "Sedan01")]);
        let lane = world.spawn_empty().id();
        let entity = world
            .spawn((
                VehicleMarker,
                CarMarker,
                PrefabRef("vehicles.sedan".to_string()),
                Moving,
                Velocity {
                    linear: Vec3::new(5.0, 0.0, 0.0),
                    angular: Vec3::ZERO,
                },
                CarNavigation::default(),
                PathOwner::default(),
                Target(Some(lane)),
            ))
            .id();

        let snapshot = classify_entity(&world, entity);
        assert_eq!(snapshot.category, EntityCategory::Vehicle);
        assert_eq!(snapshot.kind, VehicleKind::Car);
        assert_eq!(snapshot.car_subtype, CarSubtype::Passenger);
        assert_eq!(snapshot.motion, VehicleMotionState::Moving);
        assert!(snapshot.original.had_navigation);
        assert!(snapshot.original.had_path_owner);
        assert!(!snapshot.original.had_current_lane);
        assert_eq!(
            snapshot.original.target,
            Some(EntityHandle::from_entity(lane))
        );
        assert!(snapshot.original.velocity.norm() > 4.9);
    }

    #[test]
    fn missing_catalog_entry_degrades_to_default_snapshot() {
        let mut world = world_with_catalog(&[]);
        let entity = world
            .spawn((
                VehicleMarker,
                CarMarker,
                PrefabRef("vehicles.unknown".to_string()),
                Moving,
            ))
            .id();

        let snapshot = classify_entity(&world, entity);
        assert!(snapshot.is_unclassified());
    }

    #[test]
    fn entity_without_prefab_ref_degrades_to_default_snapshot() {
        let mut world = world_with_catalog(&[("vehicles.sedan", "Sedan01")]);
        let entity = world.spawn((VehicleMarker, CarMarker)).id();
        assert!(classify_entity(&world, entity).is_unclassified());
    }
}
