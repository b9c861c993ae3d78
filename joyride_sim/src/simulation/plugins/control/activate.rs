// joyride_sim/src/simulation/plugins/control/activate.rs

//! Entering manual control: suspend autonomous behavior and enable the
//! manual physics path for one entity.
//!
//! Every mutation is individually guarded, so the whole operation is
//! idempotent and partial world state (an entity already missing parked
//! data, say) cannot make it fail. There is deliberately no error
//! return; entity existence is the caller's precondition.

use bevy::ecs::world::EntityWorldMut;
use joyride_core::prelude::ControlSnapshot;

use crate::simulation::core::components::*;

/// Mutate the entity's data set for manual control, using the snapshot
/// taken immediately beforehand by classification.
pub fn activate(entity: &mut EntityWorldMut, snapshot: &ControlSnapshot) {
    // The snapshot doubles as the control marker: its presence is the
    // signal the rest of the system keys off.
    if !entity.contains::<UnderManualControl>() {
        entity.insert(UnderManualControl(snapshot.clone()));
    }

    // Resting-state data would keep the entity pinned in place.
    entity.remove::<(ParkedCar, ParkedTrain, Stopped)>();

    // Eligible for motion, and invisible to AI/path systems.
    if !entity.contains::<Moving>() {
        entity.insert(Moving);
    }
    if !entity.contains::<OutOfControl>() {
        entity.insert(OutOfControl);
    }

    // AI navigation scalars go away entirely; the lane and path lists are
    // cleared in place. Autonomy can regenerate all of these if control
    // ever reverts without an explicit restore.
    entity.remove::<(CarNavigation, CarCurrentLane, PathOwner)>();
    if let Some(mut lanes) = entity.get_mut::<NavigationLanes>() {
        lanes.0.clear();
    }
    if let Some(mut elements) = entity.get_mut::<PathElements>() {
        elements.0.clear();
    }

    // Downstream systems expect the target field to exist; point it at
    // nothing. The value is meaningless while control is manual.
    entity.insert(Target(None));

    // Rendering needs the interpolation marker and the history buffer.
    if !entity.contains::<TransformFrames>() {
        entity.insert(TransformFrames::default());
    }
    if !entity.contains::<Interpolated>() {
        entity.insert(Interpolated);
    }

    // Autonomy-driven body sway would fight the manual motion.
    entity.remove::<Swaying>();

    entity.insert(Updated);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::*;
    use joyride_core::prelude::classify;

    fn parked_car(world: &mut World) -> Entity {
        world
            .spawn((
                VehicleMarker,
                CarMarker,
                ParkedCar,
                Stopped,
                Swaying::default(),
            ))
            .id()
    }

    fn component_fingerprint(world: &World, entity: Entity) -> Vec<bool> {
        let e = world.entity(entity);
        vec![
            e.contains::<UnderManualControl>(),
            e.contains::<ParkedCar>(),
            e.contains::<ParkedTrain>(),
            e.contains::<Stopped>(),
            e.contains::<Moving>(),
            e.contains::<OutOfControl>(),
            e.contains::<CarNavigation>(),
            e.contains::<CarCurrentLane>(),
            e.contains::<PathOwner>(),
            e.contains::<Target>(),
            e.contains::<TransformFrames>(),
            e.contains::<Interpolated>(),
            e.contains::<Swaying>(),
            e.contains::<Updated>(),
        ]
    }

    #[test]
    fn activation_swaps_resting_state_for_manual_markers() {
        let mut world = World::new();
        let entity = parked_car(&mut world);
        let snapshot = classify(&Default::default());

        let mut entity_mut = world.entity_mut(entity);
        activate(&mut entity_mut, &snapshot);

        let e = world.entity(entity);
        assert!(e.contains::<UnderManualControl>());
        assert!(!e.contains::<ParkedCar>());
        assert!(!e.contains::<Stopped>());
        assert!(e.contains::<Moving>());
        assert!(e.contains::<OutOfControl>());
        assert!(!e.contains::<Swaying>());
        assert!(e.contains::<Interpolated>());
        assert!(e.contains::<TransformFrames>());
        assert_eq!(e.get::<Target>(), Some(&Target(None)));
        assert!(e.contains::<Updated>());
    }

    #[test]
    fn activating_twice_is_the_same_as_activating_once() {
        let mut world = World::new();
        let entity = parked_car(&mut world);
        let snapshot = classify(&Default::default());

        let mut entity_mut = world.entity_mut(entity);
        activate(&mut entity_mut, &snapshot);
        let once = component_fingerprint(&world, entity);

        let mut entity_mut = world.entity_mut(entity);
        activate(&mut entity_mut, &snapshot);
        let twice = component_fingerprint(&world, entity);

        assert_eq!(once, twice);
    }

    #[test]
    fn activation_clears_lane_and_path_lists_in_place() {
        let mut world = World::new();
        let lane = world.spawn_empty().id();
        let entity = world
            .spawn((
                VehicleMarker,
                CarMarker,
                Moving,
                NavigationLanes(vec![lane, lane]),
                PathElements(vec![PathElement::default(); 3]),
                Target(Some(lane)),
            ))
            .id();
        let snapshot = classify(&Default::default());

        let mut entity_mut = world.entity_mut(entity);
        activate(&mut entity_mut, &snapshot);

        let e = world.entity(entity);
        assert!(e.get::<NavigationLanes>().unwrap().0.is_empty());
        assert!(e.get::<PathElements>().unwrap().0.is_empty());
        // The target field survives but points at nothing.
        assert_eq!(e.get::<Target>(), Some(&Target(None)));
    }
}
