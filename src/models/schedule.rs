// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Delayed transitions.
//!
//! Pacing effects (the finale delay, confetti, playlist auto-advance) are
//! queued here as events due at a point in time and drained by the owner on
//! each frame. Every scheduled event has a token so it can be cancelled.

/// Handle for cancelling a scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Debug)]
struct Pending<E> {
    token: TimerToken,
    due: f64,
    event: E,
}

/// Queue of events due at a time in seconds.
#[derive(Debug)]
pub struct Scheduler<E> {
    next_id: u64,
    pending: Vec<Pending<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` to fire `delay` seconds after `now`.
    pub fn schedule(&mut self, now: f64, delay: f64, event: E) -> TimerToken {
        let token = TimerToken(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            token,
            due: now + delay.max(0.0),
            event,
        });
        log::debug!("Scheduled timer {:?} in {:.3}s", token, delay);
        token
    }

    /// Cancel a pending event. Returns false if it already fired.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.token != token);
        let cancelled = self.pending.len() != before;
        if cancelled {
            log::debug!("Cancelled timer {:?}", token);
        }
        cancelled
    }

    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("Cancelled {} pending timers", self.pending.len());
        }
        self.pending.clear();
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.pending.iter().any(|p| p.token == token)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest due time, for scheduling a repaint.
    pub fn next_due(&self) -> Option<f64> {
        self.pending.iter().map(|p| p.due).reduce(f64::min)
    }

    /// Remove and return every event due at `now`, in firing order.
    pub fn drain_due(&mut self, now: f64) -> Vec<E> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = rest;
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.token.0.cmp(&b.token.0)));
        due.into_iter().map(|p| p.event).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(0.0, 0.5, "late");
        s.schedule(0.0, 0.1, "early");
        s.schedule(0.0, 0.1, "early-second");

        assert!(s.drain_due(0.05).is_empty());
        assert_eq!(s.drain_due(0.2), vec!["early", "early-second"]);
        assert_eq!(s.next_due(), Some(0.5));
        assert_eq!(s.drain_due(1.0), vec!["late"]);
        assert!(s.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut s = Scheduler::new();
        let a = s.schedule(0.0, 0.3, 1);
        let b = s.schedule(0.0, 0.3, 2);

        assert!(s.cancel(a));
        assert!(!s.cancel(a));
        assert!(s.is_pending(b));
        assert_eq!(s.drain_due(1.0), vec![2]);
        assert!(!s.cancel(b));
    }

    #[test]
    fn test_cancel_all() {
        let mut s = Scheduler::new();
        s.schedule(0.0, 0.3, ());
        s.schedule(0.0, 0.6, ());
        s.cancel_all();
        assert!(s.drain_due(10.0).is_empty());
        assert_eq!(s.next_due(), None);
    }
}
