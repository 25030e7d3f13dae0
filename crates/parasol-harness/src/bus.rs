#![forbid(unsafe_code)]

//! Counting event-bus double.

use ahash::AHashMap;
use parasol_core::{EventBus, EventInterest, EventKind, OverlayId};

/// An [`EventBus`] that counts active listeners per `(overlay, kind)`.
///
/// `attach` increments, `detach` decrements (saturating — an unmatched
/// detach is recorded as an imbalance rather than a panic, so the test
/// that caused it can report it). [`CountingBus::is_quiescent`] asserts
/// the hygiene invariant: no overlay holds any listener.
#[derive(Debug, Default)]
pub struct CountingBus {
    active: AHashMap<(OverlayId, EventKind), usize>,
    attaches: usize,
    detaches: usize,
    unmatched_detaches: usize,
}

impl CountingBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Active listener count for one overlay across all kinds.
    pub fn active_for(&self, overlay: OverlayId) -> usize {
        self.active
            .iter()
            .filter(|((id, _), _)| *id == overlay)
            .map(|(_, count)| count)
            .sum()
    }

    /// Active listener count for one overlay and kind.
    pub fn active_kind(&self, overlay: OverlayId, kind: EventKind) -> usize {
        self.active.get(&(overlay, kind)).copied().unwrap_or(0)
    }

    /// Total active listeners across all overlays.
    pub fn active_total(&self) -> usize {
        self.active.values().sum()
    }

    /// Whether no listener is attached anywhere.
    pub fn is_quiescent(&self) -> bool {
        self.active_total() == 0 && self.unmatched_detaches == 0
    }

    /// Lifetime attach call count (per kind).
    pub fn attaches(&self) -> usize {
        self.attaches
    }

    /// Lifetime detach call count (per kind).
    pub fn detaches(&self) -> usize {
        self.detaches
    }

    /// Detaches that had no matching attach.
    pub fn unmatched_detaches(&self) -> usize {
        self.unmatched_detaches
    }
}

impl EventBus for CountingBus {
    fn attach(&mut self, overlay: OverlayId, interest: EventInterest) {
        for kind in interest.kinds() {
            *self.active.entry((overlay, kind)).or_insert(0) += 1;
            self.attaches += 1;
        }
    }

    fn detach(&mut self, overlay: OverlayId, interest: EventInterest) {
        for kind in interest.kinds() {
            let entry = self.active.entry((overlay, kind)).or_insert(0);
            if *entry == 0 {
                self.unmatched_detaches += 1;
            } else {
                *entry -= 1;
            }
            self.detaches += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_detach_balance() {
        let mut bus = CountingBus::new();
        let id = OverlayId::next();
        let interest = EventInterest::SCROLL | EventInterest::RESIZE | EventInterest::KEY_DOWN;

        bus.attach(id, interest);
        assert_eq!(bus.active_for(id), 3);
        assert_eq!(bus.active_kind(id, EventKind::Scroll), 1);
        assert_eq!(bus.active_kind(id, EventKind::PointerDown), 0);

        bus.detach(id, interest);
        assert!(bus.is_quiescent());
        assert_eq!(bus.attaches(), 3);
        assert_eq!(bus.detaches(), 3);
    }

    #[test]
    fn unmatched_detach_is_recorded() {
        let mut bus = CountingBus::new();
        let id = OverlayId::next();
        bus.detach(id, EventInterest::SCROLL);
        assert_eq!(bus.unmatched_detaches(), 1);
        assert!(!bus.is_quiescent());
    }

    #[test]
    fn overlays_are_tracked_independently() {
        let mut bus = CountingBus::new();
        let a = OverlayId::next();
        let b = OverlayId::next();
        bus.attach(a, EventInterest::all());
        bus.attach(b, EventInterest::SCROLL);
        assert_eq!(bus.active_for(a), 4);
        assert_eq!(bus.active_for(b), 1);

        bus.detach(a, EventInterest::all());
        assert_eq!(bus.active_for(a), 0);
        assert_eq!(bus.active_for(b), 1);
    }
}
