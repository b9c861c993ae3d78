// joyride_sim/src/simulation/config/mod.rs

//! Loading and holding the externally-owned configuration: the drive-feel
//! tunables and the prefab catalog. Settings storage and its UI live
//! outside this crate; everything here is a read-only consumer that
//! tolerates the data being missing or edited live between ticks.

pub mod catalog;

use bevy::prelude::*;
use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use joyride_core::prelude::DriveTuning;

use crate::simulation::core::app_state::ControlSet;
use catalog::{load_catalog_from_disk, PrefabCatalog};

/// Where the settings layer persists the drive tunables.
pub const DRIVE_TUNING_PATH: &str = "assets/config/drive_tuning.toml";

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DriveSettings>()
            .init_resource::<PrefabCatalog>()
            .add_systems(Startup, (load_catalog_from_disk, load_drive_settings))
            // A failed tuning load is non-fatal: keep retrying once per
            // tick until the settings resolve.
            .add_systems(
                FixedUpdate,
                retry_drive_settings.in_set(ControlSet::Maintenance),
            );
    }
}

/// The resolved drive tunables, or `None` while configuration is
/// unavailable. The drive tick skips (and reports) while this is empty.
#[derive(Resource, Default, Debug)]
pub struct DriveSettings {
    tuning: Option<DriveTuning>,
}

impl DriveSettings {
    pub fn tuning(&self) -> Option<&DriveTuning> {
        self.tuning.as_ref()
    }

    /// Replace the tunables live; smoothing state elsewhere is unaffected.
    pub fn set(&mut self, tuning: DriveTuning) {
        self.tuning = Some(tuning);
    }
}

/// Defaults merged under the settings file: a missing file and a default
/// file resolve identically, and a partial file only overrides what it
/// names.
fn resolve_drive_tuning() -> Result<DriveTuning, figment::Error> {
    Figment::from(Serialized::defaults(DriveTuning::default()))
        .merge(Toml::file(DRIVE_TUNING_PATH))
        .extract()
}

fn load_drive_settings(mut settings: ResMut<DriveSettings>) {
    match resolve_drive_tuning() {
        Ok(tuning) => {
            info!("Drive tuning loaded from {}", DRIVE_TUNING_PATH);
            settings.tuning = Some(tuning);
        }
        Err(e) => {
            error!(
                "Failed to load drive tuning from {}: {}. Will retry every tick.",
                DRIVE_TUNING_PATH, e
            );
        }
    }
}

fn retry_drive_settings(mut settings: ResMut<DriveSettings>) {
    if settings.tuning.is_some() {
        return;
    }
    if let Ok(tuning) = resolve_drive_tuning() {
        info!("Drive tuning became available.");
        settings.tuning = Some(tuning);
    }
}
