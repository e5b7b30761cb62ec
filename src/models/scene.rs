// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Scene state and its transitions.
//!
//! Everything the room needs to decide what happens next lives in
//! [`SceneState`]. The UI turns input into [`SceneEvent`]s, hands them to
//! [`SceneState::handle`], and acts on the returned [`SceneEffect`]s
//! (starting the record player, copying to the clipboard, confetti).

use super::capture::{CaptureRecord, EditCapture};
use super::content::{Carousel, Typewriter};
use super::hotspot::{Hotspot, Point};
use super::registry::HotspotRegistry;
use super::reveal::{RevealCue, RevealSequencer, RevealState};
use super::schedule::Scheduler;
use super::visit::VisitTracker;
use crate::util::geometry::{fit_cover, percent_to_pixel, FitTransform, PixelRect, Size};

/// What a modal is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalKind {
    Hotspot(String),
    Finale,
}

/// The modal currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenModal {
    pub kind: ModalKind,
    pub carousel: Carousel,
    pub typewriter: Typewriter,
}

impl OpenModal {
    fn new(kind: ModalKind, now: f64) -> Self {
        Self {
            kind,
            carousel: Carousel::default(),
            typewriter: Typewriter::new(now),
        }
    }
}

/// Input to the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    Resized(Size),
    ImageLoaded(Size),
    EnterRoom,
    ToggleDebug,
    ToggleEdit,
    /// Primary click on the scene outside edit mode.
    Click(Point),
    PointerDown { pos: Point, primary: bool },
    PointerMove(Point),
    PointerUp(Point),
    CancelCapture,
    SelectNext,
    SelectPrev,
    /// The user dismissed the open modal.
    CloseModal,
    /// Run due timers.
    Tick,
    /// The scene is going away; cancel everything pending.
    Teardown,
}

/// Work for the UI layer after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEffect {
    ModalOpened(ModalKind),
    ModalClosed(ModalKind),
    CaptureEmitted(CaptureRecord),
    ConfettiBurst(u64),
}

pub struct SceneState {
    registry: HotspotRegistry,
    viewport: Size,
    image: Size,
    transform: FitTransform,
    intro_open: bool,
    debug: bool,
    capture: EditCapture,
    visits: VisitTracker,
    reveal: RevealSequencer,
    timers: Scheduler<RevealCue>,
    modal: Option<OpenModal>,
}

impl SceneState {
    /// Create the scene. `image` is the expected natural size of the
    /// background until the real one is known.
    pub fn new(registry: HotspotRegistry, image: Size, show_intro: bool) -> Self {
        let visits = VisitTracker::for_registry(&registry);
        Self {
            registry,
            viewport: Size::default(),
            image,
            transform: FitTransform::NOT_READY,
            intro_open: show_intro,
            debug: false,
            capture: EditCapture::new(),
            visits,
            reveal: RevealSequencer::new(),
            timers: Scheduler::new(),
            modal: None,
        }
    }

    pub fn registry(&self) -> &HotspotRegistry {
        &self.registry
    }

    pub fn transform(&self) -> &FitTransform {
        &self.transform
    }

    pub fn intro_open(&self) -> bool {
        self.intro_open
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn capture(&self) -> &EditCapture {
        &self.capture
    }

    pub fn visits(&self) -> &VisitTracker {
        &self.visits
    }

    pub fn reveal_state(&self) -> RevealState {
        self.reveal.state()
    }

    pub fn modal(&self) -> Option<&OpenModal> {
        self.modal.as_ref()
    }

    /// The open modal together with its hotspot (none for the finale).
    pub fn active_view(&mut self) -> Option<(Option<&Hotspot>, &mut OpenModal)> {
        let modal = self.modal.as_mut()?;
        let hotspot = match &modal.kind {
            ModalKind::Hotspot(id) => self.registry.find_by_id(id),
            ModalKind::Finale => None,
        };
        Some((hotspot, modal))
    }

    pub fn progress(&self) -> (usize, usize) {
        self.visits.progress(self.registry.ids())
    }

    pub fn all_seen(&self) -> bool {
        self.visits.is_all_seen(self.registry.ids())
    }

    /// Earliest pending timer, for scheduling a repaint.
    pub fn next_due(&self) -> Option<f64> {
        self.timers.next_due()
    }

    /// Pixel hit boxes of every hotspot, in paint order. Empty until the
    /// layout is known.
    pub fn hotspot_rects(&self) -> Vec<(&Hotspot, PixelRect)> {
        self.registry
            .all()
            .iter()
            .filter_map(|h| percent_to_pixel(&h.geometry, &self.transform).map(|r| (h, r)))
            .collect()
    }

    /// Apply one event at time `now` (seconds).
    pub fn handle(&mut self, event: SceneEvent, now: f64) -> Vec<SceneEffect> {
        let mut effects = Vec::new();

        match event {
            SceneEvent::Resized(size) => {
                if size != self.viewport {
                    self.viewport = size;
                    self.refit();
                }
            }
            SceneEvent::ImageLoaded(size) => {
                log::info!("Background natural size {}x{}", size.w, size.h);
                self.image = size;
                self.refit();
            }
            SceneEvent::EnterRoom => {
                self.intro_open = false;
            }
            SceneEvent::ToggleDebug => {
                self.debug = !self.debug;
            }
            SceneEvent::ToggleEdit => {
                self.capture.toggle();
            }
            SceneEvent::Click(pos) => {
                if self.intro_open || self.capture.is_enabled() || self.modal.is_some() {
                    return effects;
                }
                let id = self
                    .registry
                    .hit_test(pos, &self.transform)
                    .map(|h| h.id.clone());
                if let Some(id) = id {
                    self.open_hotspot(&id, now, &mut effects);
                }
            }
            SceneEvent::PointerDown { pos, primary } => {
                if self.intro_open {
                    return effects;
                }
                if self.capture.begin(pos, primary) {
                    // Editing and viewing content don't mix.
                    if let Some(modal) = self.modal.take() {
                        effects.push(SceneEffect::ModalClosed(modal.kind));
                    }
                }
            }
            SceneEvent::PointerMove(pos) => {
                self.capture.update(pos);
            }
            SceneEvent::PointerUp(pos) => {
                if let Some(record) = self.capture.finish(pos, &self.transform, &self.registry) {
                    effects.push(SceneEffect::CaptureEmitted(record));
                }
            }
            SceneEvent::CancelCapture => {
                if self.capture.cancel() {
                    log::info!("Capture cancelled");
                }
            }
            SceneEvent::SelectNext => {
                self.capture.select_next(&self.registry);
            }
            SceneEvent::SelectPrev => {
                self.capture.select_prev(&self.registry);
            }
            SceneEvent::CloseModal => {
                if let Some(modal) = self.modal.take() {
                    let from_hotspot = matches!(modal.kind, ModalKind::Hotspot(_));
                    effects.push(SceneEffect::ModalClosed(modal.kind));
                    if from_hotspot {
                        let all_seen = self.all_seen();
                        self.reveal.on_modal_closed(all_seen, &mut self.timers, now);
                    }
                }
            }
            SceneEvent::Tick => {
                for cue in self.timers.drain_due(now) {
                    match cue {
                        RevealCue::OpenFinale => {
                            if self.reveal.on_finale_due(&mut self.timers, now) {
                                if let Some(modal) = self.modal.take() {
                                    effects.push(SceneEffect::ModalClosed(modal.kind));
                                }
                                self.modal = Some(OpenModal::new(ModalKind::Finale, now));
                                effects.push(SceneEffect::ModalOpened(ModalKind::Finale));
                            }
                        }
                        RevealCue::Confetti => {
                            effects.push(SceneEffect::ConfettiBurst(self.reveal.on_confetti_due()));
                        }
                    }
                }
            }
            SceneEvent::Teardown => {
                self.reveal.cancel(&mut self.timers);
                self.timers.cancel_all();
                self.capture.cancel();
                if let Some(modal) = self.modal.take() {
                    effects.push(SceneEffect::ModalClosed(modal.kind));
                }
            }
        }

        effects
    }

    fn refit(&mut self) {
        self.transform = fit_cover(self.viewport, self.image);
    }

    fn open_hotspot(&mut self, id: &str, now: f64, effects: &mut Vec<SceneEffect>) {
        // Seen before the modal exists, so the hit box is already styled as
        // visited when the modal renders.
        if self.visits.mark_seen(id) {
            let (seen, total) = self.progress();
            log::info!("Discovered {} ({}/{})", id, seen, total);
        }
        let kind = ModalKind::Hotspot(id.to_string());
        self.modal = Some(OpenModal::new(kind.clone(), now));
        effects.push(SceneEffect::ModalOpened(kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::hotspot::Geometry;
    use crate::models::reveal::{CONFETTI_DELAY, FINALE_DELAY};

    fn scene() -> SceneState {
        let registry = HotspotRegistry::new(vec![
            Hotspot::new("a", "A", Geometry::new(0.0, 0.0, 10.0, 10.0)),
            Hotspot::new("b", "B", Geometry::new(50.0, 50.0, 10.0, 10.0)),
        ])
        .unwrap();
        let mut s = SceneState::new(registry, Size::new(1920.0, 1080.0), false);
        s.handle(SceneEvent::Resized(Size::new(1920.0, 1080.0)), 0.0);
        s
    }

    const IN_A: Point = Point { x: 50.0, y: 50.0 };
    const IN_B: Point = Point { x: 1000.0, y: 600.0 };

    #[test]
    fn test_two_hotspot_walkthrough() {
        let mut s = scene();
        assert_eq!(s.transform().scale, 1.0);
        assert_eq!((s.transform().offset_x, s.transform().offset_y), (0.0, 0.0));

        s.handle(SceneEvent::Click(IN_A), 1.0);
        assert_eq!(s.progress(), (1, 2));
        assert!(!s.all_seen());
        s.handle(SceneEvent::CloseModal, 2.0);

        let effects = s.handle(SceneEvent::Click(IN_B), 3.0);
        assert_eq!(effects, vec![SceneEffect::ModalOpened(ModalKind::Hotspot("b".into()))]);
        // Seeing the last hotspot alone doesn't show the finale.
        s.handle(SceneEvent::Tick, 10.0);
        assert_eq!(s.reveal_state(), RevealState::Exploring);

        s.handle(SceneEvent::CloseModal, 11.0);
        assert!(s.all_seen());
        assert_eq!(s.reveal_state(), RevealState::Exploring);

        let effects = s.handle(SceneEvent::Tick, 11.0 + FINALE_DELAY);
        assert_eq!(effects, vec![SceneEffect::ModalOpened(ModalKind::Finale)]);
        assert_eq!(s.reveal_state(), RevealState::FinaleShown);

        let effects = s.handle(SceneEvent::Tick, 11.0 + FINALE_DELAY + CONFETTI_DELAY + 0.01);
        assert_eq!(effects, vec![SceneEffect::ConfettiBurst(1)]);
    }

    #[test]
    fn test_finale_only_once() {
        let mut s = scene();
        for (i, p) in [IN_A, IN_B].into_iter().enumerate() {
            s.handle(SceneEvent::Click(p), i as f64);
            s.handle(SceneEvent::CloseModal, i as f64 + 0.5);
        }
        s.handle(SceneEvent::Tick, 5.0);
        s.handle(SceneEvent::Tick, 6.0);
        assert!(matches!(s.modal().map(|m| &m.kind), Some(ModalKind::Finale)));

        // Close the finale and revisit a hotspot: nothing replays.
        s.handle(SceneEvent::CloseModal, 7.0);
        s.handle(SceneEvent::Click(IN_A), 8.0);
        s.handle(SceneEvent::CloseModal, 9.0);
        assert!(s.handle(SceneEvent::Tick, 20.0).is_empty());
        assert!(s.modal().is_none());
        assert_eq!(s.next_due(), None);
    }

    #[test]
    fn test_seen_before_modal_opens() {
        let mut s = scene();
        let effects = s.handle(SceneEvent::Click(IN_A), 0.0);
        assert_eq!(effects.len(), 1);
        assert!(s.visits().is_seen("a"));
        let active = s.active_view().and_then(|(h, _)| h).map(|h| h.id.clone());
        assert_eq!(active.as_deref(), Some("a"));
    }

    #[test]
    fn test_clicks_blocked_by_intro_and_modal() {
        let registry = HotspotRegistry::new(vec![Hotspot::new(
            "a",
            "A",
            Geometry::new(0.0, 0.0, 10.0, 10.0),
        )])
        .unwrap();
        let mut s = SceneState::new(registry, Size::new(100.0, 100.0), true);
        s.handle(SceneEvent::Resized(Size::new(100.0, 100.0)), 0.0);

        assert!(s.handle(SceneEvent::Click(Point::new(5.0, 5.0)), 0.0).is_empty());
        s.handle(SceneEvent::EnterRoom, 0.0);
        assert_eq!(s.handle(SceneEvent::Click(Point::new(5.0, 5.0)), 0.0).len(), 1);
        // A modal is open now.
        assert!(s.handle(SceneEvent::Click(Point::new(5.0, 5.0)), 0.0).is_empty());
    }

    #[test]
    fn test_not_ready_until_sized() {
        let registry = HotspotRegistry::new(vec![Hotspot::new(
            "a",
            "A",
            Geometry::new(0.0, 0.0, 100.0, 100.0),
        )])
        .unwrap();
        let mut s = SceneState::new(registry, Size::default(), false);
        s.handle(SceneEvent::Resized(Size::new(800.0, 600.0)), 0.0);
        assert!(s.hotspot_rects().is_empty());
        assert!(s.handle(SceneEvent::Click(Point::new(5.0, 5.0)), 0.0).is_empty());

        s.handle(SceneEvent::ImageLoaded(Size::new(400.0, 300.0)), 0.1);
        assert_eq!(s.transform().scale, 2.0);
        assert_eq!(s.hotspot_rects().len(), 1);
    }

    #[test]
    fn test_edit_drag_closes_modal_and_emits() {
        let mut s = scene();
        s.handle(SceneEvent::Click(IN_A), 0.0);
        s.handle(SceneEvent::ToggleEdit, 0.1);

        let effects = s.handle(SceneEvent::PointerDown { pos: Point::new(192.0, 108.0), primary: true }, 0.2);
        assert_eq!(effects, vec![SceneEffect::ModalClosed(ModalKind::Hotspot("a".into()))]);
        s.handle(SceneEvent::SelectNext, 0.25);
        s.handle(SceneEvent::PointerMove(Point::new(500.0, 500.0)), 0.3);

        let effects = s.handle(SceneEvent::PointerUp(Point::new(384.0, 216.0)), 0.4);
        assert_eq!(
            effects,
            vec![SceneEffect::CaptureEmitted(CaptureRecord {
                id: "b".into(),
                x: 10.0,
                y: 10.0,
                w: 10.0,
                h: 10.0,
            })]
        );
        // Editing doesn't touch the registry.
        assert_eq!(s.registry().len(), 2);
    }

    #[test]
    fn test_secondary_button_and_cancel() {
        let mut s = scene();
        s.handle(SceneEvent::ToggleEdit, 0.0);
        s.handle(SceneEvent::PointerDown { pos: Point::new(1.0, 1.0), primary: false }, 0.0);
        assert!(!s.capture().is_dragging());

        s.handle(SceneEvent::PointerDown { pos: Point::new(1.0, 1.0), primary: true }, 0.0);
        s.handle(SceneEvent::CancelCapture, 0.1);
        assert!(s.handle(SceneEvent::PointerUp(Point::new(90.0, 90.0)), 0.2).is_empty());
    }

    #[test]
    fn test_teardown_cancels_pending_finale() {
        let mut s = scene();
        s.handle(SceneEvent::Click(IN_A), 0.0);
        s.handle(SceneEvent::CloseModal, 0.1);
        s.handle(SceneEvent::Click(IN_B), 0.2);
        s.handle(SceneEvent::CloseModal, 0.3);
        assert!(s.next_due().is_some());

        s.handle(SceneEvent::Teardown, 0.4);
        assert!(s.handle(SceneEvent::Tick, 5.0).is_empty());
        assert_eq!(s.reveal_state(), RevealState::Exploring);
    }
}
