// joyride_sim/src/simulation/config/catalog.rs

//! The `PrefabCatalog` resource: the external registry that resolves an
//! entity's prefab key to its human-readable type name. Classification
//! falls back soft when a key cannot be resolved, so a hole in the
//! catalog degrades one entity's snapshot, never the system.

use bevy::prelude::*;
use figment::{
    providers::{Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::{collections::HashMap, path::Path};
use walkdir::WalkDir;

/// One catalog entry. The `name` is the identifier substring matching
/// runs against (e.g. "Motorcycle02", "CargoEngine01").
#[derive(Debug, Clone, Deserialize)]
pub struct PrefabDef {
    pub name: String,
}

/// Every parsed prefab definition, keyed by its catalog path (e.g.
/// "vehicles.sedan").
#[derive(Resource, Default, Debug)]
pub struct PrefabCatalog(pub HashMap<String, PrefabDef>);

impl PrefabCatalog {
    /// Resolve a prefab key to its human-readable type name.
    pub fn resolve_type_name(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|def| def.name.as_str())
    }
}

/// A startup system that walks the `assets/catalog` directory, parses
/// every `.toml` file, and populates the `PrefabCatalog` resource.
pub fn load_catalog_from_disk(mut catalog: ResMut<PrefabCatalog>) {
    let catalog_path = Path::new("assets/catalog");
    if !catalog_path.exists() {
        warn!(
            "Catalog directory not found at {:?}, no prefabs will be loaded.",
            catalog_path
        );
        return;
    }

    info!("Loading prefab catalog from: {:?}", catalog_path);

    for entry in WalkDir::new(catalog_path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| {
            !e.file_type().is_dir() && e.path().extension().map_or(false, |ext| ext == "toml")
        })
    {
        let path = entry.path();
        // Create a key like "vehicles.sedan" from the path.
        let key = path
            .strip_prefix(catalog_path)
            .unwrap()
            .with_extension("")
            .to_string_lossy()
            .replace(std::path::MAIN_SEPARATOR, ".");

        match Figment::new().merge(Toml::file(path)).extract::<PrefabDef>() {
            Ok(def) => {
                info!("Loaded catalog item: '{}' -> '{}'", key, def.name);
                catalog.0.insert(key, def);
            }
            Err(e) => {
                error!("Failed to load catalog item from {:?}: {}", path, e);
            }
        }
    }
}
