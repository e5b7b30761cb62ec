// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Overlay shown before entering the room.

use crate::models::project::IntroText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroAction {
    None,
    Enter,
    EnableSound,
}

/// Display the intro card. Enter and Escape also enter the room.
pub fn show(ctx: &egui::Context, intro: &IntroText) -> IntroAction {
    let mut action = IntroAction::None;

    if ctx.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape)) {
        action = IntroAction::Enter;
    }

    let screen = ctx.screen_rect();
    egui::Area::new(egui::Id::new("intro_backdrop"))
        .order(egui::Order::Middle)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            // Swallow clicks so the room underneath stays inert.
            ui.allocate_rect(screen, egui::Sense::click());
            ui.painter().rect_filled(screen, 0.0, egui::Color32::from_black_alpha(76));
        });

    egui::Window::new("intro")
        .order(egui::Order::Foreground)
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(egui::Color32::from_rgb(0x6B, 0x4D, 0x3B))
                .inner_margin(egui::Margin::symmetric(28.0, 24.0)),
        )
        .show(ctx, |ui| {
            ui.set_max_width(760.0);
            ui.style_mut().visuals.override_text_color = Some(egui::Color32::WHITE);
            ui.label(egui::RichText::new(&intro.heading).size(28.0).strong());
            ui.add_space(8.0);
            ui.label(&intro.body);
            ui.add_space(16.0);
            ui.horizontal(|ui| {
                if ui.button("enter ▶").clicked() {
                    action = IntroAction::Enter;
                }
                if ui.button("enable sound").clicked() {
                    action = IntroAction::EnableSound;
                }
                ui.label(egui::RichText::new("(you can press Enter too)").small().weak());
            });
        });

    action
}
