#![forbid(unsafe_code)]

//! Viewport-centered modal: portal + lifecycle + focus + scroll lock.
//!
//! Unlike the dropdown, a modal's geometry does not track an anchor —
//! it is resolved against the viewport by a [`ModalPlacement`] rule, so
//! scroll events neither close nor reposition it (the scroll lock keeps
//! the page still anyway). Its close triggers are Escape and a
//! pointer-down on the backdrop outside the content subtree.
//!
//! Open side effects, in order: portal mount, focus capture + move into
//! the content, scroll-lock acquire, listener attach. Close runs the
//! inverse with the listener detach *first*, so no event observes a
//! closing modal.

use parasol_core::{Event, EventBus, Host, NodeId, OverlayId, Rect, Size};

use crate::focus::FocusCoordinator;
use crate::lifecycle::{CloseReason, EventOutcome, LifecycleConfig, OverlayLifecycle};
use crate::portal::{OverlayRegistry, Portal};
use crate::scroll_lock::ScrollLock;

/// Fraction of the viewport a modal may occupy in either dimension.
pub const MAX_VIEWPORT_FRACTION: f64 = 0.9;

/// Where the modal content sits in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ModalPlacement {
    /// Centered both ways.
    #[default]
    Center,
    /// Centered, then shifted by a fixed offset.
    CenterOffset { x: f64, y: f64 },
    /// Horizontally centered, a fixed margin from the top.
    TopCenter { margin: f64 },
}

impl ModalPlacement {
    /// Resolve the content rect for a viewport and desired content size.
    ///
    /// The size is clamped to [`MAX_VIEWPORT_FRACTION`] of the viewport
    /// and the resulting rect is clamped fully inside it, whatever the
    /// placement asked for.
    pub fn resolve(self, viewport: Size, size: Size) -> Rect {
        let width = size.width.min(viewport.width * MAX_VIEWPORT_FRACTION);
        let height = size.height.min(viewport.height * MAX_VIEWPORT_FRACTION);

        let center_x = (viewport.width - width) / 2.0;
        let center_y = (viewport.height - height) / 2.0;
        let (x, y) = match self {
            ModalPlacement::Center => (center_x, center_y),
            ModalPlacement::CenterOffset { x, y } => (center_x + x, center_y + y),
            ModalPlacement::TopCenter { margin } => (center_x, margin),
        };

        let x = x.clamp(0.0, viewport.width - width);
        let y = y.clamp(0.0, viewport.height - height);
        Rect::new(x, y, width, height)
    }
}

/// Modal behavior configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalConfig {
    /// Content placement rule.
    pub placement: ModalPlacement,
    /// Close on Escape.
    pub close_on_escape: bool,
    /// Close on pointer-down on the backdrop (outside the content).
    pub close_on_backdrop: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            placement: ModalPlacement::Center,
            close_on_escape: true,
            close_on_backdrop: true,
        }
    }
}

impl ModalConfig {
    /// Set the placement rule.
    pub fn placement(mut self, placement: ModalPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Set close-on-escape behavior.
    pub fn close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    /// Set close-on-backdrop behavior.
    pub fn close_on_backdrop(mut self, close: bool) -> Self {
        self.close_on_backdrop = close;
        self
    }

    fn lifecycle(&self) -> LifecycleConfig {
        LifecycleConfig::default()
            .close_on_scroll(false)
            .close_on_escape(self.close_on_escape)
            .close_on_outside(self.close_on_backdrop)
    }
}

/// A viewport-centered modal overlay.
pub struct Modal {
    config: ModalConfig,
    lifecycle: OverlayLifecycle,
    portal: Portal,
    focus: FocusCoordinator,
    content: Option<NodeId>,
    z_index: Option<u32>,
    on_close: Option<Box<dyn FnMut(CloseReason)>>,
}

impl Modal {
    /// Create a closed modal.
    pub fn new(config: ModalConfig) -> Self {
        let id = OverlayId::next();
        Self {
            config,
            lifecycle: OverlayLifecycle::new(id, config.lifecycle()),
            portal: Portal::new(id),
            focus: FocusCoordinator::new(),
            content: None,
            z_index: None,
            on_close: None,
        }
    }

    /// Register a callback invoked exactly once per open-to-close
    /// transition.
    pub fn on_close(mut self, callback: impl FnMut(CloseReason) + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    /// The overlay id shared by this modal's lifecycle and portal.
    pub fn id(&self) -> OverlayId {
        self.portal.id()
    }

    /// Whether the modal is open.
    pub fn is_open(&self) -> bool {
        self.lifecycle.is_open()
    }

    /// The content node, while open.
    pub fn content(&self) -> Option<NodeId> {
        self.content
    }

    /// The z-index assigned at mount, while open.
    pub fn z_index(&self) -> Option<u32> {
        self.z_index
    }

    /// Resolve the content rect for a desired content size.
    pub fn content_rect<H: Host>(&self, host: &H, size: Size) -> Rect {
        self.config.placement.resolve(host.viewport(), size)
    }

    /// Open the modal.
    ///
    /// `backdrop` is the full-viewport node mounted at the document
    /// root; `content` must be a descendant of it (the containment check
    /// that tells a backdrop click from a content click depends on it).
    /// Returns whether the modal opened.
    pub fn open<H: Host, B: EventBus>(
        &mut self,
        host: &mut H,
        bus: &mut B,
        registry: &mut OverlayRegistry,
        lock: &mut ScrollLock,
        backdrop: NodeId,
        content: NodeId,
    ) -> bool {
        if self.lifecycle.is_open() {
            return false;
        }
        let z_index = self.portal.mount(host, registry, backdrop);
        self.z_index = Some(z_index);
        self.content = Some(content);
        self.focus.capture(host, content);
        lock.acquire(host);
        self.lifecycle.open(bus);
        true
    }

    /// Close programmatically. Idempotent; the close callback fires at
    /// most once per open cycle.
    pub fn close<H: Host, B: EventBus>(
        &mut self,
        host: &mut H,
        bus: &mut B,
        registry: &mut OverlayRegistry,
        lock: &mut ScrollLock,
    ) -> bool {
        if !self.lifecycle.close(bus) {
            return false;
        }
        self.teardown(host, registry, lock);
        self.fire_on_close(CloseReason::Programmatic);
        true
    }

    /// Route a document-level event. Returns the close reason when the
    /// event closed the modal.
    pub fn handle_event<H: Host, B: EventBus>(
        &mut self,
        event: &Event,
        host: &mut H,
        bus: &mut B,
        registry: &mut OverlayRegistry,
        lock: &mut ScrollLock,
    ) -> Option<CloseReason> {
        let guards = match self.content {
            Some(content) => [content],
            None => return None,
        };

        match self.lifecycle.on_event(event, bus, host, &guards) {
            EventOutcome::Ignored => None,
            // Fixed placement: nothing to recompute on scroll/resize.
            EventOutcome::Reposition => None,
            EventOutcome::Closed(reason) => {
                // A pointer-down outside the content subtree landed on
                // the backdrop; report it as such.
                let reason = match reason {
                    CloseReason::OutsideClick => CloseReason::Backdrop,
                    other => other,
                };
                self.teardown(host, registry, lock);
                self.fire_on_close(reason);
                Some(reason)
            }
        }
    }

    /// Terminal cleanup when the owning component unmounts. Restores
    /// focus and the scroll lock; the close callback does not fire.
    pub fn unmount<H: Host, B: EventBus>(
        &mut self,
        host: &mut H,
        bus: &mut B,
        registry: &mut OverlayRegistry,
        lock: &mut ScrollLock,
    ) {
        let was_open = self.lifecycle.is_open();
        self.lifecycle.unmount(bus);
        if was_open {
            self.teardown(host, registry, lock);
        }
    }

    fn teardown<H: Host>(
        &mut self,
        host: &mut H,
        registry: &mut OverlayRegistry,
        lock: &mut ScrollLock,
    ) {
        self.portal.unmount(host, registry);
        self.focus.restore(host);
        lock.release(host);
        self.content = None;
        self.z_index = None;
    }

    fn fire_on_close(&mut self, reason: CloseReason) {
        if let Some(callback) = &mut self.on_close {
            callback(reason);
        }
    }
}
