// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Tracking of which hotspots have been visited this session.

use super::registry::HotspotRegistry;
use std::collections::HashSet;

/// Seen flags for the registered hotspots. Only ever grows.
#[derive(Debug, Clone, Default)]
pub struct VisitTracker {
    known: HashSet<String>,
    seen: HashSet<String>,
}

impl VisitTracker {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: ids.into_iter().map(Into::into).collect(),
            seen: HashSet::new(),
        }
    }

    pub fn for_registry(registry: &HotspotRegistry) -> Self {
        Self::new(registry.ids())
    }

    /// Mark a hotspot as seen. Returns true only the first time.
    ///
    /// Unknown ids are ignored.
    pub fn mark_seen(&mut self, id: &str) -> bool {
        if !self.known.contains(id) {
            log::debug!("Ignoring visit of unknown hotspot {}", id);
            return false;
        }
        self.seen.insert(id.to_string())
    }

    pub fn is_seen(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// `(seen, total)` over the given ids.
    pub fn progress<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> (usize, usize) {
        ids.into_iter().fold((0, 0), |(seen, total), id| {
            (seen + usize::from(self.seen.contains(id)), total + 1)
        })
    }

    pub fn is_all_seen<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> bool {
        let (seen, total) = self.progress(ids);
        total > 0 && seen == total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDS: [&str; 2] = ["a", "b"];

    #[test]
    fn test_mark_seen_is_idempotent() {
        let mut once = VisitTracker::new(IDS);
        once.mark_seen("a");

        let mut twice = VisitTracker::new(IDS);
        assert!(twice.mark_seen("a"));
        assert!(!twice.mark_seen("a"));

        assert_eq!(once.progress(IDS), twice.progress(IDS));
        assert_eq!(twice.progress(IDS), (1, 2));
    }

    #[test]
    fn test_unknown_ids_ignored() {
        let mut tracker = VisitTracker::new(IDS);
        assert!(!tracker.mark_seen("ghost"));
        assert!(!tracker.is_seen("ghost"));
        assert_eq!(tracker.progress(IDS), (0, 2));
    }

    #[test]
    fn test_all_seen() {
        let mut tracker = VisitTracker::new(IDS);
        assert!(!tracker.is_all_seen(IDS));

        let mut last = 0;
        for id in ["a", "a", "b"] {
            tracker.mark_seen(id);
            let (seen, _) = tracker.progress(IDS);
            assert!(seen >= last);
            last = seen;
        }
        assert!(tracker.is_all_seen(IDS));
    }

    #[test]
    fn test_empty_registry_is_never_all_seen() {
        let tracker = VisitTracker::new(Vec::<String>::new());
        assert!(!tracker.is_all_seen(std::iter::empty()));
        assert_eq!(tracker.progress(std::iter::empty()), (0, 0));
    }
}
