// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Scene file serialization and deserialization.
//!
//! This module reads and writes scene descriptions in YAML and JSON.

use crate::models::project::SceneConfig;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Export a scene to YAML format.
pub fn export_yaml(data: &SceneConfig, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export a scene to JSON format.
pub fn export_json(data: &SceneConfig, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import a scene from YAML format.
pub fn import_yaml(path: &Path) -> Result<SceneConfig> {
    let yaml = std::fs::read_to_string(path)?;
    let data = serde_yaml::from_str(&yaml)?;
    Ok(data)
}

/// Import a scene from JSON format.
pub fn import_json(path: &Path) -> Result<SceneConfig> {
    let json = std::fs::read_to_string(path)?;
    let data = serde_json::from_str(&json)?;
    Ok(data)
}

/// Import a scene, picking the format from the file extension.
pub fn import_scene(path: &Path) -> Result<SceneConfig> {
    let result = match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        other => bail!("Unsupported scene file extension: {:?}", other),
    };
    result.with_context(|| format!("Failed to load scene {}", path.display()))
}

/// Export a scene, picking the format from the file extension.
pub fn export_scene(data: &SceneConfig, path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => export_yaml(data, path),
        Some("json") => export_json(data, path),
        other => bail!("Unsupported scene file extension: {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_scene_survives_json() {
        let config = SceneConfig::builtin().unwrap();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: SceneConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = import_scene(Path::new("scene.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("Unsupported"));
        assert!(export_scene(&SceneConfig::builtin().unwrap(), Path::new("scene.txt")).is_err());
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = import_scene(Path::new("/nonexistent/scene.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/scene.yaml"));
    }
}
