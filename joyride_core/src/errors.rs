// joyride_core/src/errors.rs

use thiserror::Error;

/// Why a takeover request was rejected. Every variant is informational:
/// the request simply has no effect, and the caller decides how loudly to
/// report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TakeoverError {
    #[error("no entity is selected")]
    NothingSelected,
    #[error("the selected entity no longer exists")]
    Missing,
    #[error("the selected entity is not a drivable vehicle")]
    NotDrivable,
    #[error("the vehicle has been destroyed")]
    Destroyed,
    #[error("the vehicle is involved in an accident")]
    AccidentInvolved,
    #[error("the vehicle is already under manual control")]
    AlreadyControlled,
}
