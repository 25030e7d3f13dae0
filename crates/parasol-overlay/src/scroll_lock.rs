#![forbid(unsafe_code)]

//! Reference-counted body scroll lock for modals.
//!
//! While any modal is open the document's scroll root must not scroll;
//! when the last one closes, the exact prior `overflow` value comes back.
//! The count matters: capturing the overflow per modal instance would
//! record `"hidden"` for the second of two nested modals and restore that
//! on close, losing the true original. The first acquire captures, the
//! last release restores, and everything in between only moves the count.
//!
//! # Invariants
//!
//! - `body_overflow` is `"hidden"` exactly while `depth() > 0`.
//! - The restored value is byte-identical to the captured one, whatever
//!   it was (`"scroll"`, `"auto"`, ...).
//!
//! # Failure Modes
//!
//! - `release` at depth zero is a no-op returning `false`.

use parasol_core::Host;

const LOCKED_OVERFLOW: &str = "hidden";

/// Shared, counted scroll lock. One instance serves every modal on the
/// page; modals borrow it at open/close time.
#[derive(Debug, Default)]
pub struct ScrollLock {
    depth: usize,
    saved: Option<String>,
}

impl ScrollLock {
    /// Create an unlocked lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the scroll root is currently locked.
    pub fn is_locked(&self) -> bool {
        self.depth > 0
    }

    /// Number of outstanding acquisitions.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Acquire the lock. The first acquisition captures the current
    /// overflow value and sets `"hidden"`; deeper ones only count.
    pub fn acquire<H: Host>(&mut self, host: &mut H) {
        if self.depth == 0 {
            self.saved = Some(host.body_overflow());
            host.set_body_overflow(LOCKED_OVERFLOW);
            tracing::debug!("scroll lock engaged");
        }
        self.depth += 1;
    }

    /// Release the lock. The last release restores the captured value.
    /// Returns `false` when the lock was not held.
    pub fn release<H: Host>(&mut self, host: &mut H) -> bool {
        if self.depth == 0 {
            return false;
        }
        self.depth -= 1;
        if self.depth == 0
            && let Some(saved) = self.saved.take()
        {
            host.set_body_overflow(&saved);
            tracing::debug!("scroll lock released");
        }
        true
    }
}
