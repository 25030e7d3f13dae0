#![forbid(unsafe_code)]

//! The host capability: the document operations overlays depend on.
//!
//! [`Host`] is the seam between overlay logic and whatever actually owns
//! the node tree (a real DOM binding, a retained-mode scene graph, or the
//! in-memory arena in `parasol-harness`). Every method is total: queries
//! about missing nodes return `None`/`false` rather than panicking,
//! because overlays routinely race node teardown (a trigger can unmount
//! between an event firing and the handler running).

use crate::geometry::{Point, Rect, Size};

/// Opaque handle to a node in the host's tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Create a handle from a raw host-assigned value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Document operations required by the overlay engine.
pub trait Host {
    /// Viewport-relative bounding box of a node, or `None` if the node is
    /// not attached (the caller treats this as a silent no-op).
    fn bounding_rect(&self, node: NodeId) -> Option<Rect>;

    /// Current scroll offset of the document (`scrollX`/`scrollY`).
    fn scroll_offset(&self) -> Point;

    /// Current viewport size.
    fn viewport(&self) -> Size;

    /// Whether `node` is `ancestor` or a descendant of it.
    ///
    /// Must be reflexive: `contains(n, n)` is `true` for any attached `n`.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    /// Whether the node is currently attached to the document.
    fn is_attached(&self, node: NodeId) -> bool;

    /// The node that currently has focus, if any.
    fn active_element(&self) -> Option<NodeId>;

    /// Move focus to a node. Focusing a detached node is a no-op.
    fn set_focus(&mut self, node: NodeId);

    /// The scroll root's current `overflow` style value.
    fn body_overflow(&self) -> String;

    /// Set the scroll root's `overflow` style value.
    fn set_body_overflow(&mut self, value: &str);

    /// Append a node to the shared document-root insertion point.
    ///
    /// The root is multi-tenant; mounting must not disturb other
    /// children. Mounting an already-rooted node is a no-op.
    fn mount_at_root(&mut self, node: NodeId);

    /// Remove a node (and its subtree) from the document.
    fn unmount(&mut self, node: NodeId);
}
