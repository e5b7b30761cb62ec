// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module owns the scene state and its collaborators (background
//! texture, record player backend, breath input, confetti), translates egui
//! input into scene events and carries out the effects the scene returns.

use crate::io::{breath::KeyboardBreath, media, playback::ClockPlayback, serialization};
use crate::models::blow::BlowSession;
use crate::models::hotspot::Payload;
use crate::models::player::{RecordPlayer, DEFAULT_VOLUME};
use crate::models::project::SceneConfig;
use crate::models::registry::HotspotRegistry;
use crate::models::scene::{ModalKind, SceneEffect, SceneEvent, SceneState};
use crate::ui::modal::{HotspotView, ModalAction};
use crate::ui::player::PlayerAction;
use crate::ui::{canvas, confetti::Confetti, hud, intro, modal, photos::PhotoCache};
use crate::util::geometry::Size;
use anyhow::Result;
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

/// Longest frame step fed to the playback clock and the blow detector.
const MAX_FRAME_STEP: f64 = 0.1;

/// Result of background image loading operation.
struct LoadedImageData {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Main application state.
pub struct RoomApp {
    /// Scene description the room was built from
    config: SceneConfig,

    /// Directory relative media paths are resolved against
    scene_dir: Option<PathBuf>,

    /// Hotspots, visits, finale and edit-mode state
    scene: SceneState,

    /// Background texture, once decoded
    background: Option<egui::TextureHandle>,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<LoadedImageData, String>>>,

    /// Carousel textures
    photos: PhotoCache,

    /// Clock standing in for an audio device
    playback: ClockPlayback,

    /// Record player of the open playlist modal
    player: Option<RecordPlayer>,

    /// Set by "enable sound"; playlists then start on open
    sound_enabled: bool,

    /// Breath level written from the keyboard each frame
    breath_level: Rc<Cell<f32>>,

    /// Candle session of the open modal
    blow: Option<BlowSession>,

    /// Finale confetti
    confetti: Confetti,

    /// Time of the previous frame
    last_time: Option<f64>,
}

impl RoomApp {
    /// Build the room from a scene description.
    pub fn new(config: SceneConfig, scene_dir: Option<PathBuf>) -> Result<Self> {
        let registry = HotspotRegistry::new(config.hotspots.clone())?;
        let [w, h] = config.natural_size;
        let scene = SceneState::new(registry, Size::new(w as f64, h as f64), config.intro.is_some());
        log::info!("Scene \"{}\" loaded with {} hotspots", config.title, scene.registry().len());

        let mut app = Self {
            photos: PhotoCache::new(scene_dir.clone()),
            config,
            scene_dir,
            scene,
            background: None,
            image_loader: None,
            playback: ClockPlayback::new(),
            player: None,
            sound_enabled: false,
            breath_level: Rc::new(Cell::new(0.0)),
            blow: None,
            confetti: Confetti::new(),
            last_time: None,
        };
        app.load_background();
        Ok(app)
    }

    /// Decode the background on a worker thread.
    fn load_background(&mut self) {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        let path = media::resolve(self.scene_dir.as_deref(), &self.config.background);

        std::thread::spawn(move || {
            let result = media::load_image(&path)
                .map(|img| {
                    log::info!("Loaded image: {} ({}x{})", path.display(), img.width, img.height);
                    LoadedImageData {
                        width: img.width,
                        height: img.height,
                        pixels: img.pixels,
                    }
                })
                .map_err(|e| format!("{:#}", e));

            let _ = sender.send(result);
        });
    }

    /// Replace the room with the scene stored at `path`.
    fn open_scene(&mut self, path: &Path) {
        let config = match serialization::import_scene(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{:#}", e);
                return;
            }
        };
        match Self::new(config, path.parent().map(Path::to_path_buf)) {
            // The old room is torn down when it is dropped.
            Ok(app) => *self = app,
            Err(e) => log::error!("Invalid scene {}: {:#}", path.display(), e),
        }
    }

    /// Write the scene description back out.
    fn export_scene(&self, path: &Path) {
        match serialization::export_scene(&self.config, path) {
            Ok(()) => log::info!("Exported scene to {}", path.display()),
            Err(e) => log::error!("Failed to export scene: {:#}", e),
        }
    }

    fn dispatch(&mut self, ctx: &egui::Context, event: SceneEvent, now: f64) {
        let effects = self.scene.handle(event, now);
        self.apply_effects(ctx, effects, now);
    }

    fn apply_effects(&mut self, ctx: &egui::Context, effects: Vec<SceneEffect>, now: f64) {
        for effect in effects {
            match effect {
                SceneEffect::ModalOpened(ModalKind::Hotspot(id)) => self.open_media(&id),
                SceneEffect::ModalOpened(ModalKind::Finale) => {}
                SceneEffect::ModalClosed(_) => self.release_media(),
                SceneEffect::CaptureEmitted(record) => match record.to_json() {
                    Ok(json) => {
                        log::info!("Captured geometry: {}", json);
                        ctx.output_mut(|o| o.copied_text = json);
                    }
                    Err(e) => log::error!("Failed to encode capture for {}: {:#}", record.id, e),
                },
                SceneEffect::ConfettiBurst(key) => {
                    self.confetti.trigger(key, now);
                }
            }
        }
    }

    /// Set up the collaborators a freshly opened hotspot needs.
    fn open_media(&mut self, id: &str) {
        self.release_media();
        let Some(hotspot) = self.scene.registry().find_by_id(id) else {
            return;
        };

        if let Some(Payload::AudioPlaylist { tracks }) = &hotspot.media {
            let mut player = RecordPlayer::new(tracks.clone(), 0, DEFAULT_VOLUME, true);
            player.attach(&mut self.playback);
            if self.sound_enabled {
                player.toggle(&mut self.playback);
            }
            self.player = Some(player);
        }
        if hotspot.blow_out {
            let source = KeyboardBreath::new(self.breath_level.clone());
            self.blow = Some(BlowSession::new(Box::new(source)));
        }
    }

    /// Stop the record player and release the breath input.
    fn release_media(&mut self) {
        if let Some(mut player) = self.player.take() {
            player.stop(&mut self.playback);
        }
        if let Some(mut blow) = self.blow.take() {
            blow.stop();
        }
    }

    fn apply_player_action(&mut self, action: PlayerAction) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        let backend = &mut self.playback;
        match action {
            PlayerAction::Toggle => player.toggle(backend),
            PlayerAction::Prev => player.prev(backend),
            PlayerAction::Next => player.next(backend),
            PlayerAction::Seek(fraction) => player.seek_fraction(fraction, backend),
            PlayerAction::Volume(volume) => player.set_volume(volume, backend),
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context, now: f64) {
        if ctx.wants_keyboard_input() || self.scene.intro_open() {
            return;
        }
        let (debug, edit, escape, prev, next, left, right, space) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::G),
                i.key_pressed(egui::Key::E),
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::OpenBracket),
                i.key_pressed(egui::Key::CloseBracket),
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::Space),
            )
        });

        if debug {
            self.dispatch(ctx, SceneEvent::ToggleDebug, now);
        }
        if edit {
            self.dispatch(ctx, SceneEvent::ToggleEdit, now);
        }
        if escape {
            // Escape backs out of the innermost thing in progress.
            if self.scene.capture().is_dragging() {
                self.dispatch(ctx, SceneEvent::CancelCapture, now);
            } else if self.scene.modal().is_some() {
                self.dispatch(ctx, SceneEvent::CloseModal, now);
            }
        }
        if self.scene.capture().is_enabled() {
            if prev {
                self.dispatch(ctx, SceneEvent::SelectPrev, now);
            }
            if next {
                self.dispatch(ctx, SceneEvent::SelectNext, now);
            }
        }
        if self.player.is_some() {
            if left {
                self.apply_player_action(PlayerAction::Prev);
            }
            if right {
                self.apply_player_action(PlayerAction::Next);
            }
            // Space belongs to the candle when there is one.
            if space && self.blow.is_none() {
                self.apply_player_action(PlayerAction::Toggle);
            }
        }
    }

    /// Advance playback, the candle and the scene timers.
    fn tick(&mut self, ctx: &egui::Context, now: f64, dt: f64) {
        if let Some(player) = self.player.as_mut() {
            for signal in self.playback.advance(dt) {
                player.on_signal(signal, now);
            }
            player.tick(now, &mut self.playback);
        }

        if let Some(blow) = self.blow.as_mut() {
            blow.poll(dt as f32, now);
        }

        self.dispatch(ctx, SceneEvent::Tick, now);
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: f64) {
        let busy = self.image_loader.is_some()
            || self.player.as_ref().is_some_and(RecordPlayer::is_playing)
            || self.blow.as_ref().is_some_and(BlowSession::is_listening)
            || self.scene.capture().is_dragging();
        if busy {
            ctx.request_repaint();
            return;
        }

        let due = [self.scene.next_due(), self.player.as_ref().and_then(RecordPlayer::next_due)]
            .into_iter()
            .flatten()
            .reduce(f64::min);
        if let Some(due) = due {
            ctx.request_repaint_after(Duration::from_secs_f64((due - now).max(0.0)));
        }
    }
}

impl Drop for RoomApp {
    fn drop(&mut self) {
        let now = self.last_time.unwrap_or(0.0);
        self.scene.handle(SceneEvent::Teardown, now);
        self.release_media();
    }
}

impl eframe::App for RoomApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        let dt = self
            .last_time
            .map_or(0.0, |last| (now - last).clamp(0.0, MAX_FRAME_STEP));
        self.last_time = Some(now);

        // Check for completed image loading
        if let Some(ref receiver) = self.image_loader {
            if let Ok(result) = receiver.try_recv() {
                self.image_loader = None;

                match result {
                    Ok(loaded_data) => {
                        let size = [loaded_data.width as usize, loaded_data.height as usize];
                        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded_data.pixels);
                        let texture = ctx.load_texture("background", color_image, egui::TextureOptions::LINEAR);
                        self.background = Some(texture);

                        let natural = Size::new(loaded_data.width as f64, loaded_data.height as f64);
                        self.dispatch(ctx, SceneEvent::ImageLoaded(natural), now);
                    }
                    Err(e) => {
                        log::error!("Failed to load background: {}", e);
                    }
                }
            }
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Scene...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Scenes", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.open_scene(&path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Export Scene...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("YAML", &["yaml", "yml"])
                            .add_filter("JSON", &["json"])
                            .set_file_name("scene.yaml")
                            .save_file()
                        {
                            self.export_scene(&path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    let mut debug = self.scene.debug();
                    if ui.checkbox(&mut debug, "Debug hitboxes (G)").clicked() {
                        self.dispatch(ctx, SceneEvent::ToggleDebug, now);
                        ui.close_menu();
                    }
                    let mut edit = self.scene.capture().is_enabled();
                    if ui.checkbox(&mut edit, "Edit mode (E)").clicked() {
                        self.dispatch(ctx, SceneEvent::ToggleEdit, now);
                        ui.close_menu();
                    }
                });
            });
        });

        self.handle_keys(ctx, now);
        let blowing = ctx.input(|i| i.key_down(egui::Key::Space));
        self.breath_level.set(if blowing { 1.0 } else { 0.0 });

        // The room itself
        let effects = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| canvas::show(ui, &mut self.scene, &self.background, now))
            .inner;
        self.apply_effects(ctx, effects, now);

        if !self.scene.intro_open() {
            let text = hud::HudText {
                badge: &self.config.badge,
                hint: &self.config.hint,
            };
            hud::show(ctx, &self.scene, &text);
        }

        // Open modal
        let progress = self.scene.progress();
        // In edit mode a press outside the modal starts a capture instead.
        let backdrop_closes = !self.scene.capture().is_enabled();
        let mut dismissed = false;
        let mut actions = Vec::new();
        if let Some((hotspot, open)) = self.scene.active_view() {
            match hotspot {
                Some(hotspot) => {
                    let view = HotspotView {
                        hotspot,
                        player: self.player.as_ref(),
                        blow: self.blow.as_ref(),
                    };
                    let photos = &mut self.photos;
                    dismissed = modal::show(ctx, &hotspot.title, backdrop_closes, |ui| {
                        actions = modal::hotspot_body(ui, view, open, photos, now);
                    });
                }
                None => {
                    let finale = &self.config.finale;
                    dismissed = modal::show(ctx, &finale.title, backdrop_closes, |ui| {
                        modal::finale_body(ui, &finale.message, progress);
                    });
                }
            }
        }
        for action in actions {
            match action {
                ModalAction::Player(action) => self.apply_player_action(action),
                ModalAction::StartBlow => {
                    if let Some(blow) = self.blow.as_mut() {
                        blow.start();
                    }
                }
            }
        }
        if dismissed {
            self.dispatch(ctx, SceneEvent::CloseModal, now);
        }

        if self.scene.intro_open() {
            if let Some(intro_text) = self.config.intro.clone() {
                match intro::show(ctx, &intro_text) {
                    intro::IntroAction::Enter => self.dispatch(ctx, SceneEvent::EnterRoom, now),
                    intro::IntroAction::EnableSound => {
                        self.sound_enabled = true;
                        log::info!("Sound enabled");
                    }
                    intro::IntroAction::None => {}
                }
            }
        }

        self.tick(ctx, now, dt);
        self.confetti.paint(ctx, now);
        self.schedule_repaint(ctx, now);
    }
}
