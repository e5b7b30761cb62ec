// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Clock-driven playback backend.
//!
//! No audio output ships with the application, so the record player is
//! driven by a clock that advances with the frame time and reports the same
//! signals a real backend would.

use crate::models::hotspot::Track;
use crate::models::player::{Playback, PlaybackSignal};
use anyhow::{bail, Result};

#[derive(Debug, Default)]
pub struct ClockPlayback {
    src: String,
    duration: Option<f64>,
    position: f64,
    paused: bool,
    volume: f32,
    pending: Vec<PlaybackSignal>,
}

impl ClockPlayback {
    pub fn new() -> Self {
        Self {
            paused: true,
            ..Self::default()
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Advance by `dt` seconds and collect the resulting signals.
    pub fn advance(&mut self, dt: f64) -> Vec<PlaybackSignal> {
        if !self.paused {
            if let Some(duration) = self.duration {
                self.position = (self.position + dt).min(duration);
                self.pending.push(PlaybackSignal::TimeUpdate(self.position));
                if self.position >= duration {
                    self.paused = true;
                    self.pending.push(PlaybackSignal::Ended);
                }
            }
        }
        std::mem::take(&mut self.pending)
    }
}

impl Playback for ClockPlayback {
    fn load(&mut self, track: &Track) {
        self.src = track.src.clone();
        self.duration = track.duration_secs.filter(|d| d.is_finite() && *d > 0.0);
        self.position = 0.0;
        self.paused = true;
        self.pending.clear();
        if let Some(duration) = self.duration {
            self.pending.push(PlaybackSignal::LoadedDuration(duration));
        }
    }

    fn play(&mut self) -> Result<()> {
        if self.src.is_empty() {
            bail!("no source loaded");
        }
        if self.duration.is_none() {
            bail!("{} has no known duration", self.src);
        }
        // Playing a finished track starts it over.
        if self.duration.is_some_and(|d| self.position >= d) {
            self.position = 0.0;
            self.pending.push(PlaybackSignal::TimeUpdate(0.0));
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn seek(&mut self, secs: f64) {
        let max = self.duration.unwrap_or(0.0);
        self.position = secs.clamp(0.0, max);
        self.pending.push(PlaybackSignal::TimeUpdate(self.position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::RecordPlayer;

    fn track(duration: Option<f64>) -> Track {
        Track {
            title: "t".into(),
            src: "audio/t.mp3".into(),
            duration_secs: duration,
        }
    }

    #[test]
    fn test_plays_to_the_end() {
        let mut pb = ClockPlayback::new();
        pb.load(&track(Some(1.0)));
        assert_eq!(pb.advance(0.1), vec![PlaybackSignal::LoadedDuration(1.0)]);

        pb.play().unwrap();
        assert_eq!(pb.advance(0.5), vec![PlaybackSignal::TimeUpdate(0.5)]);
        assert_eq!(
            pb.advance(0.75),
            vec![PlaybackSignal::TimeUpdate(1.0), PlaybackSignal::Ended]
        );
        assert!(pb.is_paused());
        assert!(pb.advance(1.0).is_empty());
    }

    #[test]
    fn test_refuses_unknown_duration() {
        let mut pb = ClockPlayback::new();
        pb.load(&track(None));
        assert!(pb.play().is_err());
        assert!(pb.is_paused());
    }

    #[test]
    fn test_finished_track_plays_again_from_start() {
        let mut pb = ClockPlayback::new();
        let mut player = RecordPlayer::new(vec![track(Some(1.0))], 0, 0.5, true);
        player.attach(&mut pb);

        player.toggle(&mut pb);
        for signal in pb.advance(1.0) {
            player.on_signal(signal, 1.0);
        }
        assert!(!player.is_playing());
        assert_eq!(player.current(), 1.0);

        player.toggle(&mut pb);
        assert!(player.is_playing());
        for signal in pb.advance(0.25) {
            player.on_signal(signal, 1.25);
        }
        assert!(player.is_playing());
        assert!(!pb.is_paused());
        assert!((player.current() - 0.25).abs() < 1e-9);
    }
}
