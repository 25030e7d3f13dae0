#![forbid(unsafe_code)]

//! Focus capture and restore for modal overlays.
//!
//! On open, the element that currently has focus is recorded as a
//! memento and focus moves into the overlay; on close, focus returns to
//! the memento if it still exists. The memento is single-use: it is
//! consumed by `restore` and must be re-captured on the next open cycle.
//! Full focus trapping is the host application's concern; this type only
//! guarantees initial-focus-on-open and restore-on-close.

use parasol_core::{Host, NodeId};

/// Capture-and-restore focus coordinator.
#[derive(Debug, Default)]
pub struct FocusCoordinator {
    memento: Option<NodeId>,
}

impl FocusCoordinator {
    /// Create a coordinator with no captured focus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the currently focused element and move focus to
    /// `overlay_root`.
    pub fn capture<H: Host>(&mut self, host: &mut H, overlay_root: NodeId) {
        self.memento = host.active_element();
        host.set_focus(overlay_root);
    }

    /// Restore focus to the captured element.
    ///
    /// Returns `true` if focus was restored. If the element has since
    /// been removed from the document, the memento is discarded and
    /// nothing happens — never an error (the user simply keeps whatever
    /// focus they have).
    pub fn restore<H: Host>(&mut self, host: &mut H) -> bool {
        let Some(memento) = self.memento.take() else {
            return false;
        };
        if !host.is_attached(memento) {
            return false;
        }
        host.set_focus(memento);
        true
    }

    /// The captured element, if a capture is pending.
    pub fn memento(&self) -> Option<NodeId> {
        self.memento
    }
}
