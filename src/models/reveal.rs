// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! One-time finale sequencing.
//!
//! The finale is considered only when a hotspot modal closes. Once every
//! hotspot has been seen, the first such close latches the sequencer and
//! schedules the finale after a short pacing delay. The latch never resets.

use super::schedule::{Scheduler, TimerToken};

/// Pause between closing the last modal and opening the finale, in seconds.
pub const FINALE_DELAY: f64 = 0.35;

/// Pause between the finale opening and the confetti burst, in seconds.
pub const CONFETTI_DELAY: f64 = 0.12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Exploring,
    FinaleShown,
}

/// Timed steps of the finale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealCue {
    OpenFinale,
    Confetti,
}

#[derive(Debug, Default)]
pub struct RevealSequencer {
    state: RevealState,
    finale_triggered: bool,
    pending: Option<TimerToken>,
    burst_key: u64,
}

impl RevealSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn finale_triggered(&self) -> bool {
        self.finale_triggered
    }

    /// Key of the most recent confetti burst, 0 before any.
    pub fn burst_key(&self) -> u64 {
        self.burst_key
    }

    /// Called after a hotspot modal closed. Returns true if this close
    /// started the finale.
    pub fn on_modal_closed(
        &mut self,
        all_seen: bool,
        timers: &mut Scheduler<RevealCue>,
        now: f64,
    ) -> bool {
        if !all_seen || self.finale_triggered {
            return false;
        }
        self.finale_triggered = true;
        self.pending = Some(timers.schedule(now, FINALE_DELAY, RevealCue::OpenFinale));
        log::info!("All hotspots discovered, finale in {:.2}s", FINALE_DELAY);
        true
    }

    /// The delayed finale is due. Returns false if it was already shown.
    pub fn on_finale_due(&mut self, timers: &mut Scheduler<RevealCue>, now: f64) -> bool {
        if self.state == RevealState::FinaleShown {
            return false;
        }
        self.state = RevealState::FinaleShown;
        self.pending = Some(timers.schedule(now, CONFETTI_DELAY, RevealCue::Confetti));
        log::info!("Finale shown");
        true
    }

    /// The confetti cue is due; returns a fresh burst key.
    pub fn on_confetti_due(&mut self) -> u64 {
        self.pending = None;
        self.burst_key += 1;
        self.burst_key
    }

    /// Drop the pending step, if any. The latch stays set.
    pub fn cancel(&mut self, timers: &mut Scheduler<RevealCue>) {
        if let Some(token) = self.pending.take() {
            timers.cancel(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(seq: &mut RevealSequencer, timers: &mut Scheduler<RevealCue>, now: f64) -> Vec<u64> {
        let mut bursts = Vec::new();
        for cue in timers.drain_due(now) {
            match cue {
                RevealCue::OpenFinale => {
                    seq.on_finale_due(timers, now);
                }
                RevealCue::Confetti => bursts.push(seq.on_confetti_due()),
            }
        }
        bursts
    }

    #[test]
    fn test_not_all_seen_stays_exploring() {
        let mut seq = RevealSequencer::new();
        let mut timers = Scheduler::new();
        assert!(!seq.on_modal_closed(false, &mut timers, 0.0));
        assert!(timers.is_empty());
        assert_eq!(seq.state(), RevealState::Exploring);
    }

    #[test]
    fn test_finale_fires_once() {
        let mut seq = RevealSequencer::new();
        let mut timers = Scheduler::new();

        assert!(seq.on_modal_closed(true, &mut timers, 1.0));
        // Still exploring during the pacing delay.
        assert!(run(&mut seq, &mut timers, 1.1).is_empty());
        assert_eq!(seq.state(), RevealState::Exploring);

        // Later closes don't schedule anything new.
        assert!(!seq.on_modal_closed(true, &mut timers, 1.2));

        run(&mut seq, &mut timers, 1.0 + FINALE_DELAY);
        assert_eq!(seq.state(), RevealState::FinaleShown);
        let bursts = run(&mut seq, &mut timers, 2.0);
        assert_eq!(bursts, vec![1]);

        // Closing the finale and anything afterwards is inert.
        assert!(!seq.on_modal_closed(true, &mut timers, 3.0));
        assert!(run(&mut seq, &mut timers, 10.0).is_empty());
        assert_eq!(seq.burst_key(), 1);
        assert!(seq.finale_triggered());
    }

    #[test]
    fn test_finale_due_twice_is_ignored() {
        let mut seq = RevealSequencer::new();
        let mut timers = Scheduler::new();
        seq.on_modal_closed(true, &mut timers, 0.0);
        assert!(seq.on_finale_due(&mut timers, 1.0));
        assert!(!seq.on_finale_due(&mut timers, 1.0));
    }

    #[test]
    fn test_cancel_keeps_latch() {
        let mut seq = RevealSequencer::new();
        let mut timers = Scheduler::new();
        seq.on_modal_closed(true, &mut timers, 0.0);
        seq.cancel(&mut timers);

        assert!(timers.is_empty());
        assert!(seq.finale_triggered());
        assert!(!seq.on_modal_closed(true, &mut timers, 1.0));
        assert_eq!(seq.state(), RevealState::Exploring);
    }
}
