#![forbid(unsafe_code)]

//! Overlay listener lifecycle: a two-state machine with strict
//! attach/detach bookkeeping.
//!
//! # State machine
//!
//! - `CLOSED -> OPEN` (`open`): compute the interest set from the config
//!   and attach it through the bus, recording exactly what was attached.
//! - `OPEN -> CLOSED` (`close`, or a closing outcome of `on_event`):
//!   detach the recorded set *first*, then transition. Nothing can
//!   observe the overlay between detach and transition, so no event fires
//!   "one more time" after close is requested.
//! - `OPEN -> OPEN`: scroll/resize without close-on-scroll — the caller
//!   is told to recompute the anchor position, no transition.
//!
//! # Invariants
//!
//! - The attached interest set is empty exactly when the phase is
//!   `Closed`. A leaked listener is a bug, not a degraded mode; the
//!   `Drop` impl debug-asserts the set is empty.
//! - `open` while open and `close` while closed are no-ops (no double
//!   attach, no duplicate detach).
//!
//! # Failure Modes
//!
//! - Events delivered while closed are ignored (phase gate).
//! - Containment queries against detached nodes answer `false`, which
//!   makes a pointer-down on a just-removed node an outside click — the
//!   conservative direction (the overlay closes rather than lingers).

use parasol_core::{Event, EventBus, EventInterest, Host, KeyCode, NodeId, OverlayId};

/// Lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Closed,
    Open,
}

/// Why an overlay closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Pointer-down outside every guard subtree.
    OutsideClick,
    /// Escape key.
    Escape,
    /// Scroll while configured to close on scroll.
    Scroll,
    /// Pointer-down on a modal backdrop (outside the content subtree).
    Backdrop,
    /// An item inside the panel was selected.
    Selected,
    /// Explicit `close()` call by the owner.
    Programmatic,
}

/// Outcome of routing one event through the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Nothing to do.
    Ignored,
    /// Still open; the anchor position must be recomputed before paint.
    Reposition,
    /// The overlay transitioned to closed; listeners are already detached.
    Closed(CloseReason),
}

/// Close-trigger configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Close on any scroll instead of repositioning.
    pub close_on_scroll: bool,
    /// Close on Escape.
    pub close_on_escape: bool,
    /// Close on pointer-down outside the guard subtrees.
    pub close_on_outside: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            close_on_scroll: false,
            close_on_escape: true,
            close_on_outside: true,
        }
    }
}

impl LifecycleConfig {
    /// Set close-on-scroll behavior.
    pub fn close_on_scroll(mut self, close: bool) -> Self {
        self.close_on_scroll = close;
        self
    }

    /// Set close-on-escape behavior.
    pub fn close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    /// Set close-on-outside-click behavior.
    pub fn close_on_outside(mut self, close: bool) -> Self {
        self.close_on_outside = close;
        self
    }

    /// The listener set an open overlay with this config requires.
    ///
    /// Scroll and resize are always attached: even a close-on-scroll
    /// overlay needs the scroll listener (the close itself is
    /// scroll-triggered), and resize always repositions.
    fn interest(&self) -> EventInterest {
        let mut interest = EventInterest::SCROLL | EventInterest::RESIZE;
        if self.close_on_outside {
            interest |= EventInterest::POINTER_DOWN;
        }
        if self.close_on_escape {
            interest |= EventInterest::KEY_DOWN;
        }
        interest
    }
}

/// The listener lifecycle for one overlay instance.
#[derive(Debug)]
pub struct OverlayLifecycle {
    id: OverlayId,
    phase: Phase,
    config: LifecycleConfig,
    attached: EventInterest,
}

impl OverlayLifecycle {
    /// Create a closed lifecycle for the given overlay.
    pub fn new(id: OverlayId, config: LifecycleConfig) -> Self {
        Self {
            id,
            phase: Phase::Closed,
            config,
            attached: EventInterest::empty(),
        }
    }

    /// The overlay this lifecycle belongs to.
    pub fn id(&self) -> OverlayId {
        self.id
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the overlay is open.
    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    /// The interest set currently attached (empty while closed).
    pub fn attached(&self) -> EventInterest {
        self.attached
    }

    /// `CLOSED -> OPEN`. Returns `false` (and attaches nothing) if
    /// already open.
    pub fn open<B: EventBus>(&mut self, bus: &mut B) -> bool {
        if self.phase == Phase::Open {
            return false;
        }
        let interest = self.config.interest();
        bus.attach(self.id, interest);
        self.attached = interest;
        self.phase = Phase::Open;
        tracing::debug!(overlay = self.id.id(), ?interest, "overlay opened");
        true
    }

    /// `OPEN -> CLOSED`. Detaches the exact set recorded at open time,
    /// before the phase transition. Idempotent.
    pub fn close<B: EventBus>(&mut self, bus: &mut B) -> bool {
        if self.phase == Phase::Closed {
            return false;
        }
        bus.detach(self.id, self.attached);
        self.attached = EventInterest::empty();
        self.phase = Phase::Closed;
        tracing::debug!(overlay = self.id.id(), "overlay closed");
        true
    }

    /// Terminal cleanup for owner unmount. Detaches if still open.
    pub fn unmount<B: EventBus>(&mut self, bus: &mut B) {
        if self.phase == Phase::Open {
            tracing::debug!(overlay = self.id.id(), "overlay unmounted while open");
            self.close(bus);
        }
    }

    /// Route a document-level event.
    ///
    /// `guards` are the subtrees a pointer-down may land in without
    /// closing the overlay — for a dropdown, the trigger and the
    /// portal-mounted panel (both checks are required precisely because
    /// the panel is not a descendant of the trigger).
    pub fn on_event<B: EventBus, H: Host>(
        &mut self,
        event: &Event,
        bus: &mut B,
        host: &H,
        guards: &[NodeId],
    ) -> EventOutcome {
        if self.phase == Phase::Closed {
            return EventOutcome::Ignored;
        }

        match event {
            Event::PointerDown(pointer) if self.config.close_on_outside => {
                let inside = guards.iter().any(|&g| host.contains(g, pointer.target));
                if inside {
                    EventOutcome::Ignored
                } else {
                    self.close(bus);
                    EventOutcome::Closed(CloseReason::OutsideClick)
                }
            }
            Event::PointerDown(_) => EventOutcome::Ignored,
            Event::Key(key) => {
                if key.code == KeyCode::Escape && self.config.close_on_escape {
                    self.close(bus);
                    EventOutcome::Closed(CloseReason::Escape)
                } else {
                    EventOutcome::Ignored
                }
            }
            Event::Scroll => {
                if self.config.close_on_scroll {
                    self.close(bus);
                    EventOutcome::Closed(CloseReason::Scroll)
                } else {
                    EventOutcome::Reposition
                }
            }
            Event::Resize(_) => EventOutcome::Reposition,
        }
    }
}

impl Drop for OverlayLifecycle {
    fn drop(&mut self) {
        debug_assert!(
            self.attached.is_empty(),
            "overlay {} dropped with listeners attached; call unmount() first",
            self.id.id()
        );
    }
}
