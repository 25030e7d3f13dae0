#![forbid(unsafe_code)]

//! Input events and the global listener taxonomy.
//!
//! Overlays care about exactly four kinds of document-level event:
//! pointer-down (outside-click detection), keydown (Escape), scroll
//! (reposition or close), and resize (reposition). [`EventKind`] names
//! them individually; [`EventInterest`] is the set an overlay currently
//! listens for, tracked as bitflags so attach/detach bookkeeping is a
//! couple of bit operations.

use crate::geometry::{Point, Size};
use crate::host::NodeId;

bitflags::bitflags! {
    /// Keyboard modifier state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL  = 1 << 1;
        const ALT   = 1 << 2;
        const META  = 1 << 3;
    }
}

/// Key identity for the keys overlays react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Escape,
    Tab,
    Enter,
    Char(char),
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A plain (unmodified) key press.
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }
}

/// Pointer button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// A pointer-down interaction.
///
/// `target` is the deepest node under the pointer as reported by the
/// host; containment checks against it drive outside-click detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub button: PointerButton,
    pub position: Point,
    pub target: NodeId,
}

impl PointerEvent {
    /// A left-button press on `target` at `position`.
    pub const fn left(target: NodeId, position: Point) -> Self {
        Self {
            button: PointerButton::Left,
            position,
            target,
        }
    }
}

/// A document-level event delivered to an overlay while it is open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Key(KeyEvent),
    PointerDown(PointerEvent),
    Scroll,
    Resize(Size),
}

impl Event {
    /// The listener kind that would deliver this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Key(_) => EventKind::KeyDown,
            Event::PointerDown(_) => EventKind::PointerDown,
            Event::Scroll => EventKind::Scroll,
            Event::Resize(_) => EventKind::Resize,
        }
    }
}

/// One kind of document-level listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    KeyDown,
    Scroll,
    Resize,
}

impl EventKind {
    /// All listener kinds, in a fixed order.
    pub const ALL: [EventKind; 4] = [
        EventKind::PointerDown,
        EventKind::KeyDown,
        EventKind::Scroll,
        EventKind::Resize,
    ];

    /// The interest bit for this kind.
    pub const fn interest(self) -> EventInterest {
        match self {
            EventKind::PointerDown => EventInterest::POINTER_DOWN,
            EventKind::KeyDown => EventInterest::KEY_DOWN,
            EventKind::Scroll => EventInterest::SCROLL,
            EventKind::Resize => EventInterest::RESIZE,
        }
    }
}

bitflags::bitflags! {
    /// The set of document-level listeners an overlay has attached.
    ///
    /// Invariant (enforced by the lifecycle): the set is empty exactly
    /// when the overlay is closed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EventInterest: u8 {
        const POINTER_DOWN = 1 << 0;
        const KEY_DOWN     = 1 << 1;
        const SCROLL       = 1 << 2;
        const RESIZE       = 1 << 3;
    }
}

impl EventInterest {
    /// Iterate the kinds present in this set.
    pub fn kinds(self) -> impl Iterator<Item = EventKind> {
        EventKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(kind.interest()))
    }

    /// Number of listener kinds in this set.
    pub fn count(self) -> usize {
        self.bits().count_ones() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_round_trip() {
        for kind in EventKind::ALL {
            let interest = kind.interest();
            assert_eq!(interest.count(), 1);
            assert_eq!(interest.kinds().next(), Some(kind));
        }
    }

    #[test]
    fn interest_kinds_filters() {
        let interest = EventInterest::SCROLL | EventInterest::RESIZE;
        let kinds: Vec<_> = interest.kinds().collect();
        assert_eq!(kinds, vec![EventKind::Scroll, EventKind::Resize]);
        assert_eq!(interest.count(), 2);
    }

    #[test]
    fn event_reports_its_kind() {
        assert_eq!(Event::Scroll.kind(), EventKind::Scroll);
        assert_eq!(
            Event::Key(KeyEvent::plain(KeyCode::Escape)).kind(),
            EventKind::KeyDown
        );
        assert_eq!(Event::Resize(Size::new(800.0, 600.0)).kind(), EventKind::Resize);
    }

    #[test]
    fn empty_interest_yields_no_kinds() {
        assert_eq!(EventInterest::empty().kinds().count(), 0);
        assert_eq!(EventInterest::empty().count(), 0);
    }
}
