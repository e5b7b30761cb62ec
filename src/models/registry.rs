// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Ordered, immutable collection of the scene's hotspots.

use super::hotspot::{Hotspot, Point};
use crate::util::geometry::{percent_to_pixel, FitTransform};
use anyhow::{bail, Result};
use std::collections::HashSet;

/// All hotspots of a scene, in authoring order.
#[derive(Debug, Clone, Default)]
pub struct HotspotRegistry {
    hotspots: Vec<Hotspot>,
}

impl HotspotRegistry {
    /// Build the registry, rejecting empty or duplicate ids.
    ///
    /// Geometry outside the image is accepted and clipped when drawn.
    pub fn new(hotspots: Vec<Hotspot>) -> Result<Self> {
        let mut ids = HashSet::new();
        for hotspot in &hotspots {
            if hotspot.id.trim().is_empty() {
                bail!("hotspot \"{}\" has an empty id", hotspot.title);
            }
            if !ids.insert(hotspot.id.as_str()) {
                bail!("duplicate hotspot id \"{}\"", hotspot.id);
            }
            if !hotspot.geometry.is_within_image() {
                log::warn!(
                    "Hotspot {} extends outside the image ({:?}), it will be clipped",
                    hotspot.id,
                    hotspot.geometry
                );
            }
        }
        Ok(Self { hotspots })
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id == id)
    }

    pub fn all(&self) -> &[Hotspot] {
        &self.hotspots
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.hotspots.iter().map(|h| h.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.hotspots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotspots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Hotspot> {
        self.hotspots.get(index)
    }

    /// Index after `index`, wrapping to the first hotspot.
    pub fn next_index(&self, index: usize) -> usize {
        if self.hotspots.is_empty() {
            return 0;
        }
        (index + 1) % self.hotspots.len()
    }

    /// Index before `index`, wrapping to the last hotspot.
    pub fn prev_index(&self, index: usize) -> usize {
        let len = self.hotspots.len();
        if len == 0 {
            return 0;
        }
        (index % len + len - 1) % len
    }

    /// Hotspot under a viewport point.
    ///
    /// Overlaps go to the highest z-order; on a tie the later-declared
    /// hotspot wins, as it is painted on top.
    pub fn hit_test(&self, point: Point, transform: &FitTransform) -> Option<&Hotspot> {
        let hit = self
            .hotspots
            .iter()
            .enumerate()
            .filter(|(_, h)| {
                percent_to_pixel(&h.geometry, transform).is_some_and(|rect| rect.contains(point))
            })
            .max_by_key(|(index, h)| (h.z_order, *index))
            .map(|(_, h)| h);

        if let Some(h) = hit {
            log::debug!("Pointer at ({:.1}, {:.1}) resolved to {}", point.x, point.y, h.id);
        }
        hit
    }
}
