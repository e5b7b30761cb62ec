// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Heads-up labels in the corners of the room.
//!
//! Bottom-left carries the badge and progress, bottom-right the hint, and the
//! top-left the hotkeys plus the edit-mode status.

use crate::models::scene::SceneState;

/// Strings shown in the HUD.
pub struct HudText<'a> {
    pub badge: &'a str,
    pub hint: &'a str,
}

/// Display the HUD over the room.
pub fn show(ctx: &egui::Context, scene: &SceneState, text: &HudText<'_>) {
    let (seen, total) = scene.progress();

    corner(ctx, "hud_badge", egui::Align2::LEFT_BOTTOM, [16.0, -16.0], |ui| {
        ui.horizontal(|ui| {
            ui.label(text.badge);
            ui.separator();
            ui.label(format!("{}/{}", seen, total));
        });
    });

    corner(ctx, "hud_hint", egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0], |ui| {
        ui.label(text.hint);
    });

    corner(ctx, "hud_keys", egui::Align2::LEFT_TOP, [16.0, 16.0], |ui| {
        ui.label(egui::RichText::new("G = debug hitboxes · E = edit").small());
        if scene.capture().is_enabled() {
            let selected = scene.capture().selected_id(scene.registry()).unwrap_or("-");
            ui.label(
                egui::RichText::new(format!("EDIT · drag to capture \"{}\" · [ ] select · Esc cancel", selected))
                    .small()
                    .color(egui::Color32::from_rgb(255, 214, 64)),
            );
        }
    });
}

fn corner(
    ctx: &egui::Context,
    id: &str,
    align: egui::Align2,
    offset: [f32; 2],
    add_contents: impl FnOnce(&mut egui::Ui),
) {
    egui::Area::new(egui::Id::new(id))
        .anchor(align, offset)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(egui::Color32::from_black_alpha(140))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_white_alpha(38)))
                .inner_margin(egui::Margin::symmetric(12.0, 6.0))
                .show(ui, |ui| {
                    ui.style_mut().visuals.override_text_color = Some(egui::Color32::WHITE);
                    add_contents(ui);
                });
        });
}
