#![forbid(unsafe_code)]

//! In-memory host double.

use ahash::AHashMap;
use parasol_core::{Host, NodeId, Point, Rect, Size};

#[derive(Debug, Clone, Default)]
struct NodeData {
    parent: Option<NodeId>,
    rect: Option<Rect>,
}

/// An in-memory node arena implementing [`Host`].
///
/// Nodes are created flat or as children of existing nodes. `contains`
/// walks parent links; `bounding_rect` returns whatever the test assigned
/// via [`MemoryHost::set_rect`]. Removing a node detaches its whole
/// subtree, which is how tests simulate a trigger unmounting mid-flight.
#[derive(Debug, Default)]
pub struct MemoryHost {
    nodes: AHashMap<NodeId, NodeData>,
    root_children: Vec<NodeId>,
    focused: Option<NodeId>,
    body_overflow: String,
    scroll: Point,
    viewport: Size,
    next_node: u64,
}

impl MemoryHost {
    /// Create an empty host with a 1024x768 viewport and visible overflow.
    pub fn new() -> Self {
        Self {
            nodes: AHashMap::new(),
            root_children: Vec::new(),
            focused: None,
            body_overflow: "visible".to_owned(),
            scroll: Point::ZERO,
            viewport: Size::new(1024.0, 768.0),
            next_node: 1,
        }
    }

    /// Create a detached node (no parent, no rect).
    pub fn create_node(&mut self) -> NodeId {
        let id = NodeId::new(self.next_node);
        self.next_node += 1;
        self.nodes.insert(id, NodeData::default());
        id
    }

    /// Create a node parented to `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not exist; a test wiring bug, not a
    /// runtime condition.
    pub fn create_child(&mut self, parent: NodeId) -> NodeId {
        assert!(self.nodes.contains_key(&parent), "unknown parent node");
        let id = self.create_node();
        if let Some(data) = self.nodes.get_mut(&id) {
            data.parent = Some(parent);
        }
        id
    }

    /// Assign a viewport-relative bounding rect to a node.
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.rect = Some(rect);
        }
    }

    /// Remove a node and every transitive descendant.
    pub fn remove_node(&mut self, node: NodeId) {
        let descendants: Vec<NodeId> = self
            .nodes
            .keys()
            .copied()
            .filter(|&n| self.contains(node, n))
            .collect();
        for n in descendants {
            self.nodes.remove(&n);
            self.root_children.retain(|&c| c != n);
            if self.focused == Some(n) {
                self.focused = None;
            }
        }
    }

    /// Set the document scroll offset.
    pub fn set_scroll(&mut self, scroll: Point) {
        self.scroll = scroll;
    }

    /// Adjust the document scroll offset by a delta.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.scroll = Point::new(self.scroll.x + dx, self.scroll.y + dy);
    }

    /// Set the viewport size.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Children currently mounted at the shared root, in mount order.
    pub fn root_children(&self) -> &[NodeId] {
        &self.root_children
    }

    /// The currently focused node (test-side accessor).
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }
}

impl Host for MemoryHost {
    fn bounding_rect(&self, node: NodeId) -> Option<Rect> {
        self.nodes.get(&node)?.rect
    }

    fn scroll_offset(&self) -> Point {
        self.scroll
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.nodes.contains_key(&ancestor) || !self.nodes.contains_key(&node) {
            return false;
        }
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.nodes.get(&n).and_then(|d| d.parent);
        }
        false
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn active_element(&self) -> Option<NodeId> {
        self.focused
    }

    fn set_focus(&mut self, node: NodeId) {
        if self.nodes.contains_key(&node) {
            self.focused = Some(node);
        }
    }

    fn body_overflow(&self) -> String {
        self.body_overflow.clone()
    }

    fn set_body_overflow(&mut self, value: &str) {
        self.body_overflow = value.to_owned();
    }

    fn mount_at_root(&mut self, node: NodeId) {
        if self.nodes.contains_key(&node) && !self.root_children.contains(&node) {
            self.root_children.push(node);
            if let Some(data) = self.nodes.get_mut(&node) {
                data.parent = None;
            }
        }
    }

    fn unmount(&mut self, node: NodeId) {
        self.root_children.retain(|&c| c != node);
        // Detached, not destroyed: the owner keeps its handle and may
        // mount the same node again on the next open cycle. Focus held
        // anywhere inside the detached subtree is dropped, as a browser
        // would drop it to the body.
        if let Some(focused) = self.focused
            && self.contains(node, focused)
        {
            self.focused = None;
        }
    }
}
