// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Scene description.
//!
//! A scene file names the background image, the texts around the room and
//! the ordered list of hotspots. It is read once at startup.

use super::hotspot::Hotspot;
use serde::{Deserialize, Serialize};

/// Built-in scene used when no file is given.
pub const DEFAULT_SCENE_YAML: &str = include_str!("../../assets/default_scene.yaml");

/// Texts of the overlay shown before entering the room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntroText {
    pub heading: String,
    pub body: String,
}

/// Texts of the finale modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinaleText {
    pub title: String,
    pub message: String,
}

/// Complete scene data for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub title: String,
    /// Background image, relative to the scene file.
    pub background: String,
    /// Size assumed for the background until it has been decoded.
    #[serde(default = "default_natural_size")]
    pub natural_size: [u32; 2],
    /// Bottom-left badge.
    #[serde(default)]
    pub badge: String,
    /// Bottom-right hint.
    #[serde(default)]
    pub hint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<IntroText>,
    pub finale: FinaleText,
    pub hotspots: Vec<Hotspot>,
}

fn default_natural_size() -> [u32; 2] {
    [3840, 2160]
}

impl SceneConfig {
    /// The built-in scene.
    pub fn builtin() -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(DEFAULT_SCENE_YAML)?)
    }
}
