// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Modal overlay and the content shown inside it.

use super::photos::PhotoCache;
use super::player::{self, PlayerAction};
use crate::models::blow::{BlowSession, SessionState};
use crate::models::hotspot::{Hotspot, Payload};
use crate::models::player::RecordPlayer;
use crate::models::scene::OpenModal;

const PANEL_FILL: egui::Color32 = egui::Color32::from_rgb(11, 18, 32);

/// Something the user did inside a hotspot modal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModalAction {
    Player(PlayerAction),
    StartBlow,
}

/// Collaborators a hotspot modal may render.
pub struct HotspotView<'a> {
    pub hotspot: &'a Hotspot,
    pub player: Option<&'a RecordPlayer>,
    pub blow: Option<&'a BlowSession>,
}

/// Show a modal with a dimmed backdrop. Returns true when the user
/// dismissed it this frame.
///
/// With `backdrop_closes` unset the backdrop is only painted: it holds no
/// widget, so presses outside the window reach the room underneath.
pub fn show(
    ctx: &egui::Context,
    title: &str,
    backdrop_closes: bool,
    add_contents: impl FnOnce(&mut egui::Ui),
) -> bool {
    let mut dismissed = false;
    let screen = ctx.screen_rect();
    let backdrop_id = egui::Id::new("modal_backdrop");
    let dim = egui::Color32::from_black_alpha(178);

    if backdrop_closes {
        egui::Area::new(backdrop_id)
            .order(egui::Order::Middle)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                let response = ui.allocate_rect(screen, egui::Sense::click());
                ui.painter().rect_filled(screen, 0.0, dim);
                if response.clicked() {
                    dismissed = true;
                }
            });
    } else {
        ctx.layer_painter(egui::LayerId::new(egui::Order::Middle, backdrop_id))
            .rect_filled(screen, 0.0, dim);
    }

    egui::Window::new(title)
        .id(egui::Id::new("modal_window"))
        .order(egui::Order::Foreground)
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .max_width(720.0)
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(PANEL_FILL)
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_white_alpha(38)))
                .inner_margin(egui::Margin::same(16.0)),
        )
        .show(ctx, |ui| {
            ui.set_min_width(480.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(title).strong().color(egui::Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("close").clicked() {
                        dismissed = true;
                    }
                });
            });
            ui.add_space(8.0);
            add_contents(ui);
        });

    dismissed
}

/// Body of a hotspot modal.
pub fn hotspot_body(
    ui: &mut egui::Ui,
    view: HotspotView<'_>,
    modal: &mut OpenModal,
    photos: &mut PhotoCache,
    now: f64,
) -> Vec<ModalAction> {
    let mut actions = Vec::new();
    let hotspot = view.hotspot;

    if !hotspot.content.is_empty() {
        ui.label(&hotspot.content);
    }

    match &hotspot.media {
        None => {}
        Some(Payload::Text { text }) => {
            ui.add_space(6.0);
            ui.label(egui::RichText::new(text).italics());
        }
        Some(Payload::Video { src }) => {
            ui.add_space(6.0);
            egui::Frame::none()
                .fill(egui::Color32::BLACK)
                .inner_margin(egui::Margin::same(24.0))
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(egui::RichText::new("▶ video").size(18.0));
                        ui.label(egui::RichText::new(src).weak());
                    });
                });
        }
        Some(Payload::PhotoSet { photos: set }) => {
            ui.add_space(6.0);
            if let Some(photo) = set.get(modal.carousel.index()) {
                match photos.get(ui.ctx(), &photo.src) {
                    Some(texture) => {
                        let size = texture.size_vec2();
                        let scale = (440.0 / size.x).min(320.0 / size.y).min(1.0);
                        ui.image((texture.id(), size * scale));
                    }
                    None => {
                        ui.label(egui::RichText::new(format!("[{}]", photo.src)).weak());
                    }
                }
                if !photo.caption.is_empty() {
                    ui.label(egui::RichText::new(&photo.caption).italics());
                }
            }
            ui.horizontal(|ui| {
                if ui.button("‹").clicked() {
                    modal.carousel.prev(set.len());
                }
                ui.label(format!("{}/{}", modal.carousel.index() + 1, set.len()));
                if ui.button("›").clicked() {
                    modal.carousel.next(set.len());
                }
            });
        }
        Some(Payload::Letter { text }) => {
            ui.add_space(6.0);
            let visible = modal.typewriter.visible(text, now);
            let response = egui::ScrollArea::vertical()
                .max_height(320.0)
                .show(ui, |ui| {
                    ui.add(egui::Label::new(egui::RichText::new(visible).monospace()).sense(egui::Sense::click()))
                })
                .inner;
            if response.clicked() {
                modal.typewriter.skip();
            }
            if !modal.typewriter.is_done(text, now) {
                ui.ctx().request_repaint();
            }
        }
        Some(Payload::AudioPlaylist { .. }) => {
            ui.add_space(6.0);
            if let Some(p) = view.player {
                if let Some(action) = player::show(ui, p) {
                    actions.push(ModalAction::Player(action));
                }
            }
        }
    }

    if hotspot.blow_out {
        ui.add_space(10.0);
        ui.separator();
        if let Some(session) = view.blow {
            if blow_panel(ui, session) {
                actions.push(ModalAction::StartBlow);
            }
        }
    }

    actions
}

/// Candle panel. Returns true when the user asks to start listening.
fn blow_panel(ui: &mut egui::Ui, session: &BlowSession) -> bool {
    let mut start = false;
    match session.state() {
        SessionState::Idle => {
            ui.label("there's a candle on the cake.");
            start = ui.button("blow it out 🕯").clicked();
        }
        SessionState::Listening => {
            ui.label("hold Space and blow…");
            ui.add(egui::ProgressBar::new(session.progress()).desired_width(260.0));
        }
        SessionState::Blown => {
            ui.label(egui::RichText::new("the candle is out. wish granted 🤍").strong());
        }
        SessionState::Failed(_) => {
            if let Some(message) = session.error_message() {
                ui.colored_label(egui::Color32::from_rgb(255, 140, 120), message);
            }
            start = ui.button("try again").clicked();
        }
    }
    start
}

/// Body of the finale modal.
pub fn finale_body(ui: &mut egui::Ui, message: &str, progress: (usize, usize)) {
    ui.label(egui::RichText::new(message).size(16.0));
    ui.add_space(8.0);
    ui.label(egui::RichText::new(format!("{}/{} discovered", progress.0, progress.1)).weak());
}
