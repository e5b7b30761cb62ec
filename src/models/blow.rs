// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! "Blow out the candle" detection.
//!
//! An input device reports an energy level per frame. The detector folds it
//! into a rolling score, reports progress towards a fixed target, and fires a
//! single event when the target is crossed, followed by a cooldown.
//!
//! [`BlowSession`] owns the device while the panel is open and releases it on
//! every exit path: explicit stop, detection, teardown and drop.

use thiserror::Error;

/// Energy below this is treated as background noise.
pub const NOISE_FLOOR: f32 = 0.08;

/// Score that counts as a blow.
pub const TARGET_SCORE: f32 = 1.0;

/// Score gained per second per unit of energy above the noise floor.
pub const RISE_RATE: f32 = 2.5;

/// Score lost per second while quiet.
pub const DECAY_RATE: f32 = 0.8;

/// Seconds after a detection before another can fire.
pub const COOLDOWN_SECS: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MicError {
    #[error("microphone access was denied")]
    PermissionDenied,
    #[error("no usable microphone: {0}")]
    Unsupported(String),
}

/// Input device producing an energy level in `0.0..=1.0`.
pub trait EnergySource {
    fn start(&mut self) -> Result<(), MicError>;
    /// Release the device. Always succeeds and may be called repeatedly.
    fn stop(&mut self);
    fn level(&mut self) -> f32;
}

/// Result of feeding one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlowSample {
    /// Progress towards the target, `0.0..=1.0`.
    pub progress: f32,
    /// True on the one sample where a blow was detected.
    pub detected: bool,
}

#[derive(Debug, Default)]
pub struct BlowDetector {
    score: f32,
    cooldown_until: Option<f64>,
}

impl BlowDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> f32 {
        (self.score / TARGET_SCORE).clamp(0.0, 1.0)
    }

    pub fn is_cooling_down(&self, now: f64) -> bool {
        self.cooldown_until.is_some_and(|until| now < until)
    }

    /// Feed one energy sample taken `dt` seconds after the previous one.
    pub fn sample(&mut self, energy: f32, dt: f32, now: f64) -> BlowSample {
        let excess = (energy.clamp(0.0, 1.0) - NOISE_FLOOR).max(0.0);
        if excess > 0.0 {
            self.score += excess * RISE_RATE * dt;
        } else {
            self.score = (self.score - DECAY_RATE * dt).max(0.0);
        }
        self.score = self.score.min(TARGET_SCORE);

        let mut detected = false;
        if self.score >= TARGET_SCORE && !self.is_cooling_down(now) {
            detected = true;
            self.score = 0.0;
            self.cooldown_until = Some(now + COOLDOWN_SECS);
        }

        BlowSample {
            progress: self.progress(),
            detected,
        }
    }

    pub fn reset(&mut self) {
        self.score = 0.0;
    }
}

/// Lifecycle of the candle panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Listening,
    Blown,
    Failed(MicError),
}

/// Owns the energy source while listening.
pub struct BlowSession {
    source: Box<dyn EnergySource>,
    detector: BlowDetector,
    state: SessionState,
    progress: f32,
}

impl BlowSession {
    pub fn new(source: Box<dyn EnergySource>) -> Self {
        Self {
            source,
            detector: BlowDetector::new(),
            state: SessionState::Idle,
            progress: 0.0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_listening(&self) -> bool {
        self.state == SessionState::Listening
    }

    /// Message to show inline when the device couldn't be opened.
    pub fn error_message(&self) -> Option<String> {
        match &self.state {
            SessionState::Failed(e) => Some(e.to_string()),
            _ => None,
        }
    }

    /// Acquire the device and start listening.
    pub fn start(&mut self) {
        if self.is_listening() {
            return;
        }
        match self.source.start() {
            Ok(()) => {
                self.detector.reset();
                self.progress = 0.0;
                self.state = SessionState::Listening;
                log::info!("Listening for a blow");
            }
            Err(e) => {
                log::warn!("Microphone unavailable: {}", e);
                self.source.stop();
                self.state = SessionState::Failed(e);
            }
        }
    }

    /// Sample the device. Returns true on the frame the candle is blown out,
    /// at which point the device has already been released.
    pub fn poll(&mut self, dt: f32, now: f64) -> bool {
        if !self.is_listening() {
            return false;
        }
        let level = self.source.level();
        let sample = self.detector.sample(level, dt, now);
        self.progress = sample.progress;

        if sample.detected {
            log::info!("Candle blown out");
            self.release();
            self.state = SessionState::Blown;
            self.progress = 1.0;
        }
        sample.detected
    }

    /// Stop listening and release the device. Safe to call in any state.
    pub fn stop(&mut self) {
        self.release();
        if self.state == SessionState::Listening {
            self.state = SessionState::Idle;
        }
    }

    fn release(&mut self) {
        self.source.stop();
    }
}

impl Drop for BlowSession {
    fn drop(&mut self) {
        self.release();
    }
}
