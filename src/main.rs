// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hotspot Room
//!
//! A single interactive room: click the objects to open what they hide,
//! and once everything has been found a finale appears.
//!
//! Usage: `hotspot-room [scene.yaml|scene.json]`. Without an argument the
//! built-in scene is shown, with media resolved under `assets/`.

use anyhow::Result;
use hotspot_room::app::RoomApp;
use hotspot_room::io::serialization;
use hotspot_room::models::project::SceneConfig;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let (config, scene_dir) = match std::env::args_os().nth(1) {
        Some(arg) => {
            let path = PathBuf::from(arg);
            let config = serialization::import_scene(&path)?;
            (config, path.parent().map(Path::to_path_buf))
        }
        None => (SceneConfig::builtin()?, Some(PathBuf::from("assets"))),
    };

    let title = config.title.clone();
    let app = RoomApp::new(config, scene_dir)?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 450.0])
            .with_title(&title),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
