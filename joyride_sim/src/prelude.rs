// joyride_sim/src/prelude.rs

// Re-export the external crates' preludes for convenience within this crate.
pub use bevy::prelude::*;

// Re-export the pure core's prelude.
pub use joyride_core::prelude::*;

// Re-export this crate's most commonly used items.
pub use crate::simulation::config::{catalog::PrefabCatalog, DriveSettings};
pub use crate::simulation::core::app_state::ControlSet;
pub use crate::simulation::core::components::{
    Interpolated, Moving, OutOfControl, ParkedCar, ParkedTrain, Stopped, Target, TransformFrames,
    UnderManualControl, Updated, Velocity,
};
pub use crate::simulation::core::events::{RespawnControlled, ToggleManualControl};
pub use crate::simulation::plugins::control::session::{
    ControlPhase, ControlSession, SelectedVehicle,
};
pub use crate::simulation::plugins::control::{DriveControls, ManualControlPlugin};
