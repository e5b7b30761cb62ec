// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module fits the background image over the viewport ("cover") and
//! converts between percentage coordinates of the image and viewport pixels.

use crate::models::hotspot::{Geometry, Point};

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    /// A size with a zero (or unknown) side can't be fitted.
    pub fn is_degenerate(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }
}

/// Axis-aligned rectangle in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    /// Rectangle spanned by two arbitrary corners of a drag.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }
}

/// Placement of the background image inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
    /// Natural size of the image the transform was computed for.
    pub image: Size,
}

impl FitTransform {
    /// The "not ready yet" transform: nothing may be positioned with it.
    pub const NOT_READY: FitTransform = FitTransform {
        offset_x: 0.0,
        offset_y: 0.0,
        scale: 1.0,
        image: Size { w: 0.0, h: 0.0 },
    };

    pub fn is_ready(&self) -> bool {
        !self.image.is_degenerate()
    }

    pub fn rendered_width(&self) -> f64 {
        self.image.w * self.scale
    }

    pub fn rendered_height(&self) -> f64 {
        self.image.h * self.scale
    }

    /// Where the whole image lands in the viewport. Usually overflows it.
    pub fn image_rect(&self) -> PixelRect {
        PixelRect {
            left: self.offset_x,
            top: self.offset_y,
            width: self.rendered_width(),
            height: self.rendered_height(),
        }
    }
}

impl Default for FitTransform {
    fn default() -> Self {
        Self::NOT_READY
    }
}

/// Scale the image until it covers the viewport and center it, cropping the
/// overflow equally on both sides.
pub fn fit_cover(viewport: Size, image: Size) -> FitTransform {
    if viewport.is_degenerate() || image.is_degenerate() {
        return FitTransform::NOT_READY;
    }

    let scale = (viewport.w / image.w).max(viewport.h / image.h);
    let rendered_w = image.w * scale;
    let rendered_h = image.h * scale;

    FitTransform {
        offset_x: (viewport.w - rendered_w) / 2.0,
        offset_y: (viewport.h - rendered_h) / 2.0,
        scale,
        image,
    }
}

/// Convert percentage geometry into a viewport hit box.
pub fn percent_to_pixel(geometry: &Geometry, transform: &FitTransform) -> Option<PixelRect> {
    if !transform.is_ready() {
        return None;
    }
    let rw = transform.rendered_width();
    let rh = transform.rendered_height();

    Some(PixelRect {
        left: transform.offset_x + rw * geometry.x / 100.0,
        top: transform.offset_y + rh * geometry.y / 100.0,
        width: rw * geometry.w / 100.0,
        height: rh * geometry.h / 100.0,
    })
}

/// Convert a viewport point into image percentages, clamped to 0..=100.
pub fn pixel_to_percent(point: Point, transform: &FitTransform) -> Option<Point> {
    if !transform.is_ready() {
        return None;
    }
    let px = (point.x - transform.offset_x) / transform.rendered_width();
    let py = (point.y - transform.offset_y) / transform.rendered_height();

    Some(Point {
        x: px.clamp(0.0, 1.0) * 100.0,
        y: py.clamp(0.0, 1.0) * 100.0,
    })
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-3;

    #[test]
    fn test_cover_scale_and_coverage() {
        let cases = [
            (1920.0, 1080.0, 3840.0, 2160.0),
            (800.0, 1200.0, 3840.0, 2160.0),
            (2560.0, 600.0, 1000.0, 1000.0),
            (333.0, 777.0, 64.0, 48.0),
        ];

        for (vw, vh, iw, ih) in cases {
            let t = fit_cover(Size::new(vw, vh), Size::new(iw, ih));
            let expected = f64::max(vw / iw, vh / ih);
            assert!((t.scale - expected).abs() < 1e-9);
            assert!(t.rendered_width() >= vw - 1e-9);
            assert!(t.rendered_height() >= vh - 1e-9);
            // Overflow is split evenly.
            assert!((t.offset_x * 2.0 + t.rendered_width() - vw).abs() < 1e-9);
            assert!((t.offset_y * 2.0 + t.rendered_height() - vh).abs() < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_is_not_ready() {
        let t = fit_cover(Size::new(0.0, 1080.0), Size::new(3840.0, 2160.0));
        assert_eq!(t, FitTransform::NOT_READY);
        assert_eq!(t.scale, 1.0);
        assert!(!t.is_ready());

        let t = fit_cover(Size::new(1920.0, 1080.0), Size::default());
        assert!(!t.is_ready());
        assert!(percent_to_pixel(&Geometry::new(1.0, 1.0, 1.0, 1.0), &t).is_none());
        assert!(pixel_to_percent(Point::new(5.0, 5.0), &t).is_none());
    }

    #[test]
    fn test_identity_fit() {
        let t = fit_cover(Size::new(1920.0, 1080.0), Size::new(1920.0, 1080.0));
        assert_eq!(t.scale, 1.0);
        assert_eq!((t.offset_x, t.offset_y), (0.0, 0.0));
    }

    #[test]
    fn test_percent_to_pixel() {
        // Portrait viewport over a landscape image: cropped left and right.
        let t = fit_cover(Size::new(1000.0, 1000.0), Size::new(2000.0, 1000.0));
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.offset_x, -500.0);

        let rect = percent_to_pixel(&Geometry::new(50.0, 10.0, 25.0, 20.0), &t).unwrap();
        assert!((rect.left - 500.0).abs() < EPS);
        assert!((rect.top - 100.0).abs() < EPS);
        assert!((rect.width - 500.0).abs() < EPS);
        assert!((rect.height - 200.0).abs() < EPS);
    }

    #[test]
    fn test_roundtrip_inside_image() {
        let t = fit_cover(Size::new(1366.0, 768.0), Size::new(3840.0, 2160.0));
        for &(x, y) in &[(1.5, 2.5), (683.0, 384.0), (1200.25, 700.75)] {
            let p = Point::new(x, y);
            let pct = pixel_to_percent(p, &t).unwrap();
            let back = percent_to_pixel(&Geometry::new(pct.x, pct.y, 0.0, 0.0), &t).unwrap();
            assert!((back.left - x).abs() < EPS);
            assert!((back.top - y).abs() < EPS);
        }
    }

    #[test]
    fn test_pixel_to_percent_clamps() {
        let t = fit_cover(Size::new(1920.0, 1080.0), Size::new(1920.0, 1080.0));
        let low = pixel_to_percent(Point::new(-40.0, -1.0), &t).unwrap();
        assert_eq!((low.x, low.y), (0.0, 0.0));
        let high = pixel_to_percent(Point::new(5000.0, 1081.0), &t).unwrap();
        assert_eq!((high.x, high.y), (100.0, 100.0));
    }

    #[test]
    fn test_drag_rect_and_round1() {
        let r = PixelRect::from_corners(Point::new(300.0, 100.0), Point::new(100.0, 400.0));
        assert_eq!(r, PixelRect { left: 100.0, top: 100.0, width: 200.0, height: 300.0 });
        assert!(r.contains(Point::new(150.0, 150.0)));
        assert!(!r.contains(Point::new(99.0, 150.0)));

        assert_eq!(round1(5.208333), 5.2);
        assert_eq!(round1(27.777), 27.8);
        assert_eq!(round1(0.25), 0.3);
    }
}
