// joyride_sim/src/simulation/core/events.rs

use bevy::prelude::Event;

/// The external toggle signal: take over the currently selected entity,
/// or release the one being driven.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ToggleManualControl;

/// Straighten the controlled vehicle out: pitch and roll reset, yaw kept,
/// all motion zeroed. Only honored while driving.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RespawnControlled;
