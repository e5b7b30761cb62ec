// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image file loading.
//!
//! This module decodes the room background and carousel photos into RGBA
//! pixels suitable for display in egui.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A decoded RGBA image.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decode an image file into RGBA pixels.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to open image {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();

    Ok(LoadedImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}

/// Resolve a path from a scene file against the scene's directory.
pub fn resolve(base: Option<&Path>, relative: &str) -> PathBuf {
    let path = Path::new(relative);
    match base {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}
