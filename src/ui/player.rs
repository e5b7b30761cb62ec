// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Record player controls.

use crate::models::player::{format_time, RecordPlayer};

/// Result of interacting with the player controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    Toggle,
    Prev,
    Next,
    /// Seek to a fraction of the track.
    Seek(f64),
    Volume(f32),
}

/// Display the deck, transport buttons, progress bar and volume.
pub fn show(ui: &mut egui::Ui, player: &RecordPlayer) -> Option<PlayerAction> {
    let mut action = None;

    // Clicking the vinyl toggles playback.
    let (deck, deck_response) = ui.allocate_exact_size(egui::vec2(120.0, 120.0), egui::Sense::click());
    let painter = ui.painter();
    let center = deck.center();
    painter.circle_filled(center, 56.0, egui::Color32::from_gray(20));
    for r in [48.0, 40.0, 32.0] {
        painter.circle_stroke(center, r, egui::Stroke::new(1.0, egui::Color32::from_gray(45)));
    }
    let label_color = if player.is_playing() {
        egui::Color32::from_rgb(229, 212, 186)
    } else {
        egui::Color32::from_rgb(160, 140, 120)
    };
    painter.circle_filled(center, 16.0, label_color);
    painter.circle_filled(center, 3.0, egui::Color32::BLACK);
    if deck_response.clicked() {
        action = Some(PlayerAction::Toggle);
    }

    ui.horizontal(|ui| {
        if ui.button("‹").on_hover_text("previous").clicked() {
            action = Some(PlayerAction::Prev);
        }
        let label = if player.is_playing() { "❚❚ pause" } else { "▶ play" };
        if ui.button(label).clicked() {
            action = Some(PlayerAction::Toggle);
        }
        if ui.button("›").on_hover_text("next").clicked() {
            action = Some(PlayerAction::Next);
        }
        ui.label(egui::RichText::new(&player.track().title).strong());
        ui.label(egui::RichText::new(player.queue_label()).weak());
    });

    ui.horizontal(|ui| {
        ui.label(format_time(player.current()));
        let (bar, bar_response) = ui.allocate_exact_size(egui::vec2(260.0, 8.0), egui::Sense::click());
        ui.painter().rect_filled(bar, 0.0, egui::Color32::from_white_alpha(30));
        let mut fill = bar;
        fill.set_width(bar.width() * player.fraction() as f32);
        ui.painter().rect_filled(fill, 0.0, egui::Color32::from_rgb(229, 212, 186));
        if bar_response.clicked() {
            if let Some(pos) = bar_response.interact_pointer_pos() {
                let fraction = ((pos.x - bar.min.x) / bar.width()) as f64;
                action = Some(PlayerAction::Seek(fraction));
            }
        }
        ui.label(format_time(player.duration()));
    });

    ui.horizontal(|ui| {
        ui.label("vol");
        let mut volume = player.volume();
        if ui
            .add(egui::Slider::new(&mut volume, 0.0..=1.0).step_by(0.01).show_value(false))
            .changed()
        {
            action = Some(PlayerAction::Volume(volume));
        }
        ui.label(format!("{}%", (volume * 100.0).round() as i32));
    });

    action
}
