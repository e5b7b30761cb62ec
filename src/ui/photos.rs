// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Lazily decoded carousel photos.

use crate::io::media::{load_image, resolve};
use std::collections::HashMap;
use std::path::PathBuf;

/// Textures keyed by their scene path. A failed decode is remembered so it
/// isn't retried every frame.
pub struct PhotoCache {
    base: Option<PathBuf>,
    textures: HashMap<String, Option<egui::TextureHandle>>,
}

impl PhotoCache {
    pub fn new(base: Option<PathBuf>) -> Self {
        Self {
            base,
            textures: HashMap::new(),
        }
    }

    pub fn get(&mut self, ctx: &egui::Context, src: &str) -> Option<&egui::TextureHandle> {
        let base = self.base.as_deref();
        self.textures
            .entry(src.to_string())
            .or_insert_with(|| {
                let path = resolve(base, src);
                match load_image(&path) {
                    Ok(img) => {
                        let size = [img.width as usize, img.height as usize];
                        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &img.pixels);
                        Some(ctx.load_texture(src, color_image, egui::TextureOptions::LINEAR))
                    }
                    Err(e) => {
                        log::warn!("Photo unavailable: {:#}", e);
                        None
                    }
                }
            })
            .as_ref()
    }
}
