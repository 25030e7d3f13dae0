#![forbid(unsafe_code)]

//! The event-bus capability: document-level listener registration as an
//! injected dependency.
//!
//! Overlay code never binds browser-style globals directly. It declares
//! interest through [`EventBus::attach`] and withdraws it through
//! [`EventBus::detach`], which lets a test double record the calls and
//! makes listener hygiene a directly checkable property instead of a
//! slow-degradation bug.
//!
//! # Invariants
//!
//! - Every `attach` is matched by exactly one `detach` with the same
//!   overlay id and interest set before the overlay's next open cycle or
//!   its unmount, whichever comes first.
//! - `detach` for an interest that was never attached must be tolerated
//!   by implementations (the lifecycle never issues one, but a bus must
//!   not panic if a buggy caller does).

use std::sync::atomic::{AtomicU64, Ordering};

use crate::event::EventInterest;

static OVERLAY_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for an overlay instance.
///
/// Ids are process-unique and never reused, so a bus or registry can key
/// bookkeeping on them across open/close cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(u64);

impl OverlayId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(OVERLAY_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Document-level listener registration.
pub trait EventBus {
    /// Attach listeners for every kind in `interest` on behalf of `overlay`.
    fn attach(&mut self, overlay: OverlayId, interest: EventInterest);

    /// Detach listeners for every kind in `interest` on behalf of `overlay`.
    fn detach(&mut self, overlay: OverlayId, interest: EventInterest);
}

/// A bus that ignores registration entirely.
///
/// For hosts that deliver every event to every overlay unconditionally
/// and rely on the lifecycle's own phase gating.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBus;

impl EventBus for NoopBus {
    fn attach(&mut self, _overlay: OverlayId, _interest: EventInterest) {}

    fn detach(&mut self, _overlay: OverlayId, _interest: EventInterest) {}
}
