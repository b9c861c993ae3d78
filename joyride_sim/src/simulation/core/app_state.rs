// joyride_sim/src/simulation/core/app_state.rs

use bevy::ecs::schedule::SystemSet;

/// Execution order of the manual-control systems within one fixed tick.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ControlSet {
    /// Sweep transient markers left over from the previous tick.
    Maintenance,

    /// The session state machine: entity-loss detection, toggle and
    /// respawn requests, shutdown handling. Runs before any physics so a
    /// release decided here suppresses this tick's drive step.
    Session,

    /// The per-tick vehicle dynamics for the controlled entity.
    Drive,
}
