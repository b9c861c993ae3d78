// joyride_core/src/prelude.rs

// --- Classification (the entry point of a takeover) ---
pub use crate::classify::{classify, EntityProfile};
pub use crate::snapshot::{
    AircraftSubtype, CarSizeClass, CarSubtype, ControlSnapshot, EntityCategory, OriginalFields,
    TrainSubtype, VehicleKind, VehicleMotionState, WatercraftSubtype,
};

// --- Dynamics (the per-tick drive model) ---
pub use crate::dynamics::{step, BodyState, DriveInput, DriveSmoothing, DriveTuning};

// --- Errors and identifiers ---
pub use crate::errors::TakeoverError;
pub use crate::types::EntityHandle;
