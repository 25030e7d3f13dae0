#![forbid(unsafe_code)]

//! Portal mounting and the active-overlay registry.
//!
//! A portal redirects a floating element's paint location to the shared
//! document root while ownership (state, lifecycle) stays with the
//! trigger component. The registry makes stacking order an explicit,
//! testable invariant instead of an accident of append order.
//!
//! # Invariants
//!
//! - Z-indices are strictly increasing in mount order and never reused,
//!   so a later-mounted overlay always renders above earlier ones — even
//!   across interleaved unmounts.
//! - A portal mounts and unmounts only its own node; the root is a
//!   shared append target (a dropdown opened inside a modal coexists
//!   with it).
//! - Remounting does not happen on reposition: `mount` while mounted is
//!   a no-op returning the existing z-index, so in-panel state (focus, a
//!   search input's cursor) survives every scroll tick.
//!
//! # Failure Modes
//!
//! - `unmount` while unmounted returns `false` (no duplicate teardown).
//! - `remove` of an unknown id returns `None`.

use parasol_core::{Host, NodeId, OverlayId};

/// Base z-index for the overlay layer, above any page content.
pub const BASE_OVERLAY_Z: u32 = 1000;

/// Z-index increment between overlays (leaves room for internal layers).
pub const Z_INCREMENT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveOverlay {
    id: OverlayId,
    z_index: u32,
}

/// Ordered registry of currently mounted overlays.
///
/// Entries are kept in mount order (bottom to top), which by the z
/// invariant is also ascending z order.
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    entries: Vec<ActiveOverlay>,
    next_z: u32,
}

impl OverlayRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_z: 0,
        }
    }

    /// Register an overlay and assign it the next z-index.
    ///
    /// Registering an already-present id returns its existing z-index.
    pub fn insert(&mut self, id: OverlayId) -> u32 {
        if let Some(existing) = self.z_of(id) {
            return existing;
        }
        let z_index = BASE_OVERLAY_Z + self.next_z;
        self.next_z += Z_INCREMENT;
        self.entries.push(ActiveOverlay { id, z_index });
        z_index
    }

    /// Remove an overlay from any position. Returns its z-index.
    pub fn remove(&mut self, id: OverlayId) -> Option<u32> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx).z_index)
    }

    /// The z-index assigned to an overlay, if registered.
    pub fn z_of(&self, id: OverlayId) -> Option<u32> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.z_index)
    }

    /// The topmost overlay, if any.
    pub fn top(&self) -> Option<OverlayId> {
        self.entries.last().map(|e| e.id)
    }

    /// Whether the overlay is registered.
    pub fn contains(&self, id: OverlayId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Number of registered overlays.
    #[inline]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Whether no overlay is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered overlay ids, bottom to top.
    pub fn ids(&self) -> impl Iterator<Item = OverlayId> + '_ {
        self.entries.iter().map(|e| e.id)
    }
}

/// Mounts one overlay's content node at the shared document root.
#[derive(Debug)]
pub struct Portal {
    id: OverlayId,
    node: Option<NodeId>,
}

impl Portal {
    /// Create an unmounted portal for the given overlay.
    pub fn new(id: OverlayId) -> Self {
        Self { id, node: None }
    }

    /// The overlay this portal belongs to.
    pub fn id(&self) -> OverlayId {
        self.id
    }

    /// The mounted content node, if any.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Whether content is currently mounted.
    pub fn is_mounted(&self) -> bool {
        self.node.is_some()
    }

    /// Mount `content` at the host root and register for a z-index.
    ///
    /// While mounted this is a no-op returning the current z-index;
    /// repositioning must go through styles, never a remount.
    pub fn mount<H: Host>(
        &mut self,
        host: &mut H,
        registry: &mut OverlayRegistry,
        content: NodeId,
    ) -> u32 {
        if self.node.is_some() {
            // Registry entry exists whenever node does.
            return registry.insert(self.id);
        }
        host.mount_at_root(content);
        self.node = Some(content);
        let z_index = registry.insert(self.id);
        tracing::trace!(overlay = self.id.id(), z_index, "portal mounted");
        z_index
    }

    /// Unmount this portal's own node, leaving other tenants of the
    /// shared root untouched. Idempotent.
    pub fn unmount<H: Host>(&mut self, host: &mut H, registry: &mut OverlayRegistry) -> bool {
        let Some(node) = self.node.take() else {
            return false;
        };
        host.unmount(node);
        registry.remove(self.id);
        tracing::trace!(overlay = self.id.id(), "portal unmounted");
        true
    }
}
