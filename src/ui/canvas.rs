// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Room canvas.
//!
//! This module draws the cover-fitted background and the hotspot hit boxes,
//! and turns pointer input over the room into scene events.

use crate::models::hotspot::Point;
use crate::models::scene::{SceneEffect, SceneEvent, SceneState};
use crate::util::geometry::{PixelRect, Size};

const DEBUG_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(46, 0, 0, 46);
const VISITED_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 40, 12, 46);
const DRAG_STROKE: egui::Color32 = egui::Color32::from_rgb(255, 214, 64);

/// Display the room and apply pointer input to the scene.
pub fn show(
    ui: &mut egui::Ui,
    scene: &mut SceneState,
    background: &Option<egui::TextureHandle>,
    now: f64,
) -> Vec<SceneEffect> {
    let mut effects = Vec::new();
    let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

    // Layout first, so input below is mapped with this frame's transform.
    effects.extend(scene.handle(
        SceneEvent::Resized(Size::new(rect.width() as f64, rect.height() as f64)),
        now,
    ));

    let to_local = |pos: egui::Pos2| Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);

    let (pressed, primary_pressed, released, latest) = ui.input(|i| {
        (
            i.pointer.any_pressed(),
            i.pointer.button_pressed(egui::PointerButton::Primary),
            i.pointer.any_released(),
            i.pointer.latest_pos(),
        )
    });

    if scene.capture().is_enabled() {
        if pressed && response.hovered() {
            if let Some(pos) = latest {
                effects.extend(scene.handle(
                    SceneEvent::PointerDown {
                        pos: to_local(pos),
                        primary: primary_pressed,
                    },
                    now,
                ));
            }
        }
        if scene.capture().is_dragging() {
            if let Some(pos) = latest {
                let event = if released {
                    SceneEvent::PointerUp(to_local(pos))
                } else {
                    SceneEvent::PointerMove(to_local(pos))
                };
                effects.extend(scene.handle(event, now));
            }
        }
    } else if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            effects.extend(scene.handle(SceneEvent::Click(to_local(pos)), now));
        }
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, egui::Color32::BLACK);

    let transform = *scene.transform();
    if !transform.is_ready() {
        return effects;
    }

    let image_rect = to_screen(rect, &transform.image_rect());
    match background {
        Some(texture) => {
            painter.image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        None => {
            painter.rect_filled(image_rect, 0.0, egui::Color32::from_rgb(62, 44, 35));
        }
    }

    let hover = response.hover_pos().map(to_local);
    let mut hover_text = None;

    for (hotspot, pixel_rect) in scene.hotspot_rects() {
        let screen = to_screen(rect, &pixel_rect);
        if scene.debug() {
            let fill = if scene.visits().is_seen(&hotspot.id) {
                VISITED_FILL
            } else {
                DEBUG_FILL
            };
            painter.rect_filled(screen, 0.0, fill);
            painter.rect_stroke(screen, 0.0, egui::Stroke::new(1.0, egui::Color32::from_white_alpha(153)));
        }
    }

    // The tooltip names whatever a click would open.
    if let Some(pos) = hover {
        if let Some(hotspot) = scene.registry().hit_test(pos, &transform) {
            let g = &hotspot.geometry;
            hover_text = Some(if scene.debug() {
                format!("{} ({} {} {} {})", hotspot.id, g.x, g.y, g.w, g.h)
            } else {
                hotspot.title.clone()
            });
            if !scene.capture().is_enabled() && scene.modal().is_none() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            }
        }
    }

    if scene.capture().is_enabled() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
        if let Some(drag) = scene.capture().drag() {
            let screen = to_screen(rect, &drag.rect());
            painter.rect_filled(screen, 0.0, egui::Color32::from_rgba_unmultiplied(255, 214, 64, 40));
            painter.rect_stroke(screen, 0.0, egui::Stroke::new(2.0, DRAG_STROKE));
        }
    }

    if let Some(text) = hover_text {
        if scene.modal().is_none() && !scene.intro_open() {
            response.on_hover_text(text);
        }
    }

    effects
}

/// Map a viewport-local pixel rectangle onto the canvas.
fn to_screen(canvas: egui::Rect, r: &PixelRect) -> egui::Rect {
    egui::Rect::from_min_size(
        canvas.min + egui::vec2(r.left as f32, r.top as f32),
        egui::vec2(r.width as f32, r.height as f32),
    )
}
