// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hotspot data structures.
//!
//! This module defines the clickable regions placed over the room image,
//! their percentage geometry, and the media each one reveals.

use serde::{Deserialize, Serialize};

/// Z-order given to hotspots that don't declare one.
pub const DEFAULT_Z_ORDER: i32 = 50;

/// A 2D point. Depending on context this is either viewport pixels or
/// percentages of the background image.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rectangle in percentages of the background image (0 to 100).
///
/// `x`/`y` is the top-left corner, `w`/`h` the extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// True when the whole rectangle lies inside the image.
    pub fn is_within_image(&self) -> bool {
        let inside = |v: f64| (0.0..=100.0).contains(&v);
        inside(self.x)
            && inside(self.y)
            && self.w >= 0.0
            && self.h >= 0.0
            && inside(self.x + self.w)
            && inside(self.y + self.h)
    }
}

/// One photo of a carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub src: String,
    #[serde(default)]
    pub caption: String,
}

/// One entry of a record player playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub src: String,
    /// Length reported by the playback backend once loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
}

/// Media revealed by a hotspot, on top of its plain `content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Text { text: String },
    Video { src: String },
    PhotoSet { photos: Vec<Photo> },
    Letter { text: String },
    AudioPlaylist { tracks: Vec<Track> },
}

/// A clickable region over the room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub geometry: Geometry,
    #[serde(default = "default_z_order")]
    pub z_order: i32,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Payload>,
    /// Shows the "blow out the candle" panel in this hotspot's modal.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub blow_out: bool,
}

fn default_z_order() -> i32 {
    DEFAULT_Z_ORDER
}

impl Hotspot {
    /// Create a text-only hotspot with the default z-order.
    pub fn new(id: impl Into<String>, title: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            geometry,
            z_order: DEFAULT_Z_ORDER,
            content: String::new(),
            media: None,
            blow_out: false,
        }
    }

    pub fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = z_order;
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_media(mut self, media: Payload) -> Self {
        self.media = Some(media);
        self
    }
}
