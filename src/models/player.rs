// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Record player state for audio playlist hotspots.
//!
//! The player keeps the track index, play flag, volume and position; the
//! actual sound is produced by a [`Playback`] backend. A backend that refuses
//! to play only resets the play flag.

use super::hotspot::Track;
use super::schedule::{Scheduler, TimerToken};
use anyhow::Result;

/// Pause before the next track starts after one ends, in seconds.
pub const AUTO_ADVANCE_DELAY: f64 = 0.25;

/// Volume a player starts at.
pub const DEFAULT_VOLUME: f32 = 0.25;

/// Audio backend driven by the record player.
pub trait Playback {
    /// Load a track, resetting position and duration.
    fn load(&mut self, track: &Track);
    /// Start or resume. May be refused.
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    fn seek(&mut self, secs: f64);
    /// Volume in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);
    fn is_paused(&self) -> bool;
}

/// Notifications coming back from the backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackSignal {
    LoadedDuration(f64),
    TimeUpdate(f64),
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayerCue {
    AutoAdvance,
}

#[derive(Debug)]
pub struct RecordPlayer {
    tracks: Vec<Track>,
    index: usize,
    playing: bool,
    volume: f32,
    current: f64,
    duration: f64,
    auto_next: bool,
    timers: Scheduler<PlayerCue>,
    advance: Option<TimerToken>,
}

impl RecordPlayer {
    /// Create a player. An empty list gets a silent placeholder track and an
    /// out-of-range index is clamped.
    pub fn new(tracks: Vec<Track>, initial_index: usize, initial_volume: f32, auto_next: bool) -> Self {
        let tracks = if tracks.is_empty() {
            vec![Track {
                title: "No track".to_string(),
                src: String::new(),
                duration_secs: None,
            }]
        } else {
            tracks
        };
        let index = initial_index.min(tracks.len() - 1);

        Self {
            tracks,
            index,
            playing: false,
            volume: initial_volume.clamp(0.0, 1.0),
            current: 0.0,
            duration: 0.0,
            auto_next,
            timers: Scheduler::new(),
            advance: None,
        }
    }

    /// Load the initial track into the backend.
    pub fn attach(&mut self, backend: &mut dyn Playback) {
        backend.set_volume(self.volume);
        backend.load(self.track());
    }

    pub fn track(&self) -> &Track {
        &self.tracks[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Played fraction for the progress bar.
    pub fn fraction(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// `index/total` label.
    pub fn queue_label(&self) -> String {
        format!("{}/{}", self.index + 1, self.tracks.len())
    }

    pub fn next_due(&self) -> Option<f64> {
        self.timers.next_due()
    }

    /// Play/pause toggle.
    pub fn toggle(&mut self, backend: &mut dyn Playback) {
        if self.track().src.is_empty() {
            return;
        }
        if backend.is_paused() {
            backend.set_volume(self.volume);
            self.start(backend);
        } else {
            backend.pause();
            self.playing = false;
        }
    }

    pub fn next(&mut self, backend: &mut dyn Playback) {
        self.index = (self.index + 1) % self.tracks.len();
        self.change_track(backend);
    }

    pub fn prev(&mut self, backend: &mut dyn Playback) {
        self.index = (self.index + self.tracks.len() - 1) % self.tracks.len();
        self.change_track(backend);
    }

    pub fn set_volume(&mut self, volume: f32, backend: &mut dyn Playback) {
        self.volume = volume.clamp(0.0, 1.0);
        backend.set_volume(self.volume);
    }

    /// Seek to a fraction of the track, clamped to its length.
    pub fn seek_fraction(&mut self, fraction: f64, backend: &mut dyn Playback) {
        if self.duration <= 0.0 {
            return;
        }
        let target = (fraction * self.duration).clamp(0.0, self.duration);
        backend.seek(target);
        self.current = target;
    }

    /// Feed a backend notification into the player.
    pub fn on_signal(&mut self, signal: PlaybackSignal, now: f64) {
        match signal {
            PlaybackSignal::LoadedDuration(secs) => {
                self.duration = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
            }
            PlaybackSignal::TimeUpdate(secs) => {
                self.current = secs;
            }
            PlaybackSignal::Ended => {
                self.playing = false;
                if self.auto_next && self.tracks.len() > 1 {
                    self.advance = Some(self.timers.schedule(now, AUTO_ADVANCE_DELAY, PlayerCue::AutoAdvance));
                }
            }
        }
    }

    /// Run due auto-advances.
    pub fn tick(&mut self, now: f64, backend: &mut dyn Playback) {
        for cue in self.timers.drain_due(now) {
            match cue {
                PlayerCue::AutoAdvance => {
                    self.advance = None;
                    self.playing = true;
                    self.next(backend);
                }
            }
        }
    }

    /// Stop playback and drop pending advances, e.g. when the modal closes.
    pub fn stop(&mut self, backend: &mut dyn Playback) {
        if let Some(token) = self.advance.take() {
            self.timers.cancel(token);
        }
        backend.pause();
        self.playing = false;
    }

    fn change_track(&mut self, backend: &mut dyn Playback) {
        if let Some(token) = self.advance.take() {
            self.timers.cancel(token);
        }
        self.current = 0.0;
        self.duration = 0.0;
        backend.load(self.track());

        if self.playing && !self.track().src.is_empty() {
            self.start(backend);
        }
    }

    fn start(&mut self, backend: &mut dyn Playback) {
        match backend.play() {
            Ok(()) => self.playing = true,
            Err(e) => {
                log::warn!("Playback of {} refused: {}", self.track().title, e);
                self.playing = false;
            }
        }
    }
}

/// Format seconds as `m:ss`. Anything non-finite or negative is `0:00`.
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "0:00".to_string();
    }
    let total = secs.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
