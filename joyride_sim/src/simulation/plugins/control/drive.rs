// joyride_sim/src/simulation/plugins/control/drive.rs

//! The per-tick bridge between the world and the pure dynamics model:
//! read the controlled entity's authoritative state, step the model with
//! the sampled player input, write the result back, and keep the render
//! interpolation history fed.

use bevy::prelude::*;
use joyride_core::prelude::{step, DriveInput};

use crate::simulation::config::DriveSettings;
use crate::simulation::core::components::{
    TransformFrame, TransformFrames, UnderManualControl, Updated, Velocity,
};
use crate::simulation::core::transforms::{body_state_from_world, write_body_state};
use crate::simulation::plugins::control::session::{ControlPhase, ControlSession};
use crate::simulation::plugins::control::DriveControls;

/// Advance the controlled vehicle one tick. Runs every fixed tick; a
/// no-op in every phase except `Driving`.
pub fn drive_controlled_system(
    time: Res<Time>,
    controls: Res<DriveControls>,
    settings: Res<DriveSettings>,
    mut session: ResMut<ControlSession>,
    mut query: Query<
        (&mut Transform, &mut Velocity, Option<&mut TransformFrames>),
        With<UnderManualControl>,
    >,
    mut commands: Commands,
) {
    if session.phase() != ControlPhase::Driving {
        return;
    }
    let Some(entity) = session.controlled_entity() else {
        return;
    };

    // Configuration gone missing is critical but recoverable: report,
    // skip the tick, and retry once the settings layer resolves again.
    let Some(tuning) = settings.tuning() else {
        error!("Drive tuning unavailable; skipping this drive tick.");
        return;
    };

    let Ok((mut transform, mut velocity, frames)) = query.get_mut(entity) else {
        // Lost the entity (or its transform) mid-session; the state
        // machine turns this into an unsuccessful release next tick.
        warn!(
            "Controlled entity {:?} is gone or unreadable; aborting the drive tick.",
            entity
        );
        session.entity_lost = true;
        return;
    };

    let dt = time.delta().as_secs_f64();
    if dt <= 0.0 {
        return;
    }

    let input = DriveInput {
        throttle: controls.throttle,
        steering: controls.steering,
        handbrake: controls.handbrake,
    };

    let body = body_state_from_world(&transform, &velocity);
    let next = step(&body, &mut session.smoothing, &input, tuning, dt);
    write_body_state(&next, session.smoothing.yaw_rate, &mut transform, &mut velocity);

    // Interpolation history: previous tick in slots 0-1, this tick in
    // slots 2-3. Right after targeting a new entity there is no previous
    // state, so the first tick seeds both pairs with the fresh state.
    let current = TransformFrame {
        position: transform.translation,
        rotation: transform.rotation,
        velocity: velocity.linear,
    };
    let previous = session.previous_frame.unwrap_or(current);
    match frames {
        Some(mut frames) => frames.record(previous, current),
        None => {
            // Soft-missing data: rebuild the buffer rather than fail.
            let mut rebuilt = TransformFrames::default();
            rebuilt.record(previous, current);
            commands.entity(entity).insert(rebuilt);
        }
    }
    session.previous_frame = Some(current);

    commands.entity(entity).insert(Updated);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::catalog::PrefabCatalog;
    use crate::simulation::core::events::ToggleManualControl;
    use crate::simulation::plugins::control::session::{session_system, SelectedVehicle};
    use bevy::ecs::system::RunSystemOnce;
    use joyride_core::prelude::DriveTuning;
    use std::time::Duration;

    const DT: f64 = 1.0 / 60.0;

    fn drive_world() -> World {
        let mut world = World::new();
        world.init_resource::<ControlSession>();
        world.init_resource::<SelectedVehicle>();
        world.init_resource::<Events<ToggleManualControl>>();
        world.init_resource::<Events<crate::simulation::core::events::RespawnControlled>>();
        world.init_resource::<PrefabCatalog>();
        world.init_resource::<DriveControls>();
        let mut settings = DriveSettings::default();
        settings.set(DriveTuning::default());
        world.insert_resource(settings);
        let mut time = Time::default();
        time.advance_by(Duration::from_secs_f64(DT));
        world.insert_resource(time);
        world
    }

    fn take_over_a_car(world: &mut World) -> Entity {
        let car = world
            .spawn((
                crate::simulation::core::components::VehicleMarker,
                crate::simulation::core::components::CarMarker,
                Transform::default(),
                Velocity::default(),
            ))
            .id();
        world.resource_mut::<SelectedVehicle>().0 = Some(car);
        world.send_event(ToggleManualControl);
        session_system(world);
        assert!(world.resource::<ControlSession>().is_controlling(car));
        car
    }

    fn tick(world: &mut World) {
        world
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f64(DT));
        world.run_system_once(drive_controlled_system).unwrap();
    }

    #[test]
    fn throttle_moves_the_car_forward() {
        let mut world = drive_world();
        let car = take_over_a_car(&mut world);
        world.resource_mut::<DriveControls>().throttle = 1.0;

        for _ in 0..120 {
            tick(&mut world);
        }

        let e = world.entity(car);
        let transform = e.get::<Transform>().unwrap();
        let velocity = e.get::<Velocity>().unwrap();
        // ENU east maps onto Bevy +X; an identity-oriented car drives +X.
        assert!(transform.translation.x > 1.0);
        assert!(velocity.linear.length() > 1.0);
        assert!(e.contains::<Updated>());
    }

    #[test]
    fn first_tick_seeds_interpolation_history_with_the_fresh_state() {
        let mut world = drive_world();
        let car = take_over_a_car(&mut world);
        world.resource_mut::<DriveControls>().throttle = 1.0;

        tick(&mut world);

        let frames = world.entity(car).get::<TransformFrames>().unwrap().0;
        // No stale previous state: both pairs hold the first tick.
        assert_eq!(frames[0], frames[2]);
        assert_eq!(frames[1], frames[3]);

        tick(&mut world);
        let frames = world.entity(car).get::<TransformFrames>().unwrap().0;
        assert_eq!(frames[0], frames[1]);
        assert_eq!(frames[2], frames[3]);
        // Now the pairs differ: previous tick vs current tick.
        assert_ne!(frames[0], frames[2]);
    }

    #[test]
    fn missing_tuning_skips_the_tick_but_keeps_driving() {
        let mut world = drive_world();
        let car = take_over_a_car(&mut world);
        world.insert_resource(DriveSettings::default()); // no tuning resolved
        world.resource_mut::<DriveControls>().throttle = 1.0;

        tick(&mut world);

        let e = world.entity(car);
        assert_eq!(e.get::<Transform>().unwrap().translation, Vec3::ZERO);
        // The session stays in Driving and retries next tick.
        assert!(world.resource::<ControlSession>().is_driving());
    }

    #[test]
    fn losing_the_entity_mid_drive_flags_the_session() {
        let mut world = drive_world();
        let car = take_over_a_car(&mut world);
        world.despawn(car);

        tick(&mut world);
        assert!(world.resource::<ControlSession>().entity_lost);

        // The state machine resolves the flag into an abandoned session.
        session_system(&mut world);
        assert_eq!(world.resource::<ControlSession>().controlled_entity(), None);
    }
}
