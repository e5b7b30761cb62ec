// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Edit-mode rectangle capture.
//!
//! While edit mode is on, a primary-button drag over the scene is turned into
//! percentage geometry labelled with the currently selected hotspot id. The
//! record is handed to the author; the registry itself is never changed.

use super::hotspot::Point;
use super::registry::HotspotRegistry;
use crate::util::geometry::{pixel_to_percent, round1, FitTransform, PixelRect};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A drag in progress, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragCapture {
    pub start: Point,
    pub end: Point,
}

impl DragCapture {
    /// Rectangle to draw while dragging.
    pub fn rect(&self) -> PixelRect {
        PixelRect::from_corners(self.start, self.end)
    }
}

/// Output of a finished capture, ready to paste into a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureRecord {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl CaptureRecord {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Default)]
pub struct EditCapture {
    enabled: bool,
    selected: usize,
    drag: Option<DragCapture>,
}

impl EditCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip edit mode. Turning it off drops any drag in progress.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        if !self.enabled {
            self.drag = None;
        }
        log::info!("Edit mode {}", if self.enabled { "on" } else { "off" });
        self.enabled
    }

    pub fn drag(&self) -> Option<&DragCapture> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_id<'a>(&self, registry: &'a HotspotRegistry) -> Option<&'a str> {
        registry.get(self.selected).map(|h| h.id.as_str())
    }

    pub fn select_next(&mut self, registry: &HotspotRegistry) {
        self.selected = registry.next_index(self.selected);
    }

    pub fn select_prev(&mut self, registry: &HotspotRegistry) {
        self.selected = registry.prev_index(self.selected);
    }

    /// Start a drag. Only the primary button starts one, and only in edit
    /// mode. Returns true if a capture started.
    pub fn begin(&mut self, point: Point, primary: bool) -> bool {
        if !self.enabled || !primary {
            return false;
        }
        self.drag = Some(DragCapture {
            start: point,
            end: point,
        });
        true
    }

    pub fn update(&mut self, point: Point) {
        if let Some(drag) = self.drag.as_mut() {
            drag.end = point;
        }
    }

    /// Drop the drag without emitting anything.
    pub fn cancel(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Finish the drag at `point` and convert it to image percentages.
    ///
    /// Returns `None` if nothing was being dragged or the image isn't laid
    /// out yet; the drag is discarded either way.
    pub fn finish(
        &mut self,
        point: Point,
        transform: &FitTransform,
        registry: &HotspotRegistry,
    ) -> Option<CaptureRecord> {
        let mut drag = self.drag.take()?;
        drag.end = point;

        let a = pixel_to_percent(drag.start, transform)?;
        let b = pixel_to_percent(drag.end, transform)?;

        Some(CaptureRecord {
            id: self.selected_id(registry).unwrap_or("new").to_string(),
            x: round1(a.x.min(b.x)),
            y: round1(a.y.min(b.y)),
            w: round1((a.x - b.x).abs()),
            h: round1((a.y - b.y).abs()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::hotspot::{Geometry, Hotspot};
    use crate::util::geometry::{fit_cover, Size};

    fn registry() -> HotspotRegistry {
        HotspotRegistry::new(vec![
            Hotspot::new("cake", "Cake", Geometry::default()),
            Hotspot::new("lamp", "Lamp", Geometry::default()),
            Hotspot::new("sofa", "Sofa", Geometry::default()),
        ])
        .unwrap()
    }

    fn half_scale() -> FitTransform {
        // 3840x2160 into 1920x1080: offset (0,0), scale 0.5.
        fit_cover(Size::new(1920.0, 1080.0), Size::new(3840.0, 2160.0))
    }

    #[test]
    fn test_drag_to_percent() {
        let reg = registry();
        let t = half_scale();
        assert_eq!(t.scale, 0.5);

        let mut edit = EditCapture::new();
        edit.toggle();
        assert!(edit.begin(Point::new(100.0, 100.0), true));
        edit.update(Point::new(250.0, 300.0));
        assert_eq!(
            edit.drag().unwrap().rect(),
            PixelRect { left: 100.0, top: 100.0, width: 150.0, height: 200.0 }
        );

        let record = edit.finish(Point::new(300.0, 400.0), &t, &reg).unwrap();
        let expected_x = round1(100.0 / 0.5 / 3840.0 * 100.0);
        assert_eq!(record.id, "cake");
        assert_eq!(record.x, expected_x);
        assert_eq!(record.x, 5.2);
        assert_eq!(record.y, 9.3);
        assert_eq!(record.w, 10.4);
        assert_eq!(record.h, 27.8);
        assert!(!edit.is_dragging());
    }

    #[test]
    fn test_drag_outside_image_clamps() {
        let reg = registry();
        let t = half_scale();
        let mut edit = EditCapture::new();
        edit.toggle();

        edit.begin(Point::new(-50.0, 540.0), true);
        let record = edit.finish(Point::new(2500.0, 2000.0), &t, &reg).unwrap();
        assert_eq!(record.x, 0.0);
        assert_eq!(record.y, 50.0);
        assert_eq!(record.w, 100.0);
        assert_eq!(record.h, 50.0);
    }

    #[test]
    fn test_only_primary_in_edit_mode() {
        let mut edit = EditCapture::new();
        assert!(!edit.begin(Point::new(1.0, 1.0), true));

        edit.toggle();
        assert!(!edit.begin(Point::new(1.0, 1.0), false));
        assert!(!edit.is_dragging());
    }

    #[test]
    fn test_cancel_emits_nothing() {
        let reg = registry();
        let mut edit = EditCapture::new();
        edit.toggle();
        edit.begin(Point::new(10.0, 10.0), true);

        assert!(edit.cancel());
        assert!(edit.finish(Point::new(20.0, 20.0), &half_scale(), &reg).is_none());
    }

    #[test]
    fn test_selection_wraps() {
        let reg = registry();
        let mut edit = EditCapture::new();
        edit.select_prev(&reg);
        assert_eq!(edit.selected_id(&reg), Some("sofa"));
        edit.select_next(&reg);
        assert_eq!(edit.selected_id(&reg), Some("cake"));
        edit.select_next(&reg);
        assert_eq!(edit.selected_id(&reg), Some("lamp"));
    }

    #[test]
    fn test_record_json() {
        let record = CaptureRecord { id: "lamp".into(), x: 71.0, y: 18.5, w: 16.0, h: 22.0 };
        assert_eq!(record.to_json().unwrap(), r#"{"id":"lamp","x":71.0,"y":18.5,"w":16.0,"h":22.0}"#);
    }

    #[test]
    fn test_record_json_escapes_id() {
        let record = CaptureRecord { id: "big \"lamp\"".into(), x: 1.0, y: 2.0, w: 3.0, h: 4.0 };
        let json = record.to_json().unwrap();
        let back: CaptureRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
