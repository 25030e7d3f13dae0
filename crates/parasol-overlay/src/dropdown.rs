#![forbid(unsafe_code)]

//! Anchored dropdown: positioner + lifecycle + portal composed behind a
//! single owner-facing type.
//!
//! The owner supplies the trigger node up front and the panel node at
//! open time; the dropdown computes the initial position *before* the
//! portal mounts so the first paint is already correct, then keeps the
//! position fresh (or tears down, per config) as scroll/resize events
//! arrive.

use parasol_core::{Event, EventBus, Host, NodeId, OverlayId};

use crate::anchor::{Align, AnchorPos, AnchorPositioner, PanelStyle};
use crate::lifecycle::{CloseReason, EventOutcome, LifecycleConfig, OverlayLifecycle};
use crate::portal::{OverlayRegistry, Portal};

/// Dropdown behavior configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownConfig {
    /// Panel alignment relative to the trigger.
    pub align: Align,
    /// Close on scroll instead of repositioning. On by default: anchored
    /// menus that chase the page while it scrolls read as glitchy.
    pub close_on_scroll: bool,
    /// Close on Escape.
    pub close_on_escape: bool,
    /// Close on pointer-down outside the trigger and panel.
    pub close_on_outside: bool,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            align: Align::Left,
            close_on_scroll: true,
            close_on_escape: true,
            close_on_outside: true,
        }
    }
}

impl DropdownConfig {
    /// Set panel alignment.
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

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

    fn lifecycle(&self) -> LifecycleConfig {
        LifecycleConfig::default()
            .close_on_scroll(self.close_on_scroll)
            .close_on_escape(self.close_on_escape)
            .close_on_outside(self.close_on_outside)
    }
}

/// An anchored dropdown overlay.
pub struct Dropdown {
    config: DropdownConfig,
    positioner: AnchorPositioner,
    lifecycle: OverlayLifecycle,
    portal: Portal,
    z_index: Option<u32>,
    on_close: Option<Box<dyn FnMut(CloseReason)>>,
}

impl Dropdown {
    /// Create a closed dropdown anchored to `trigger`.
    pub fn new(trigger: NodeId, config: DropdownConfig) -> Self {
        let id = OverlayId::next();
        Self {
            config,
            positioner: AnchorPositioner::new(trigger, config.align),
            lifecycle: OverlayLifecycle::new(id, config.lifecycle()),
            portal: Portal::new(id),
            z_index: None,
            on_close: None,
        }
    }

    /// Register a callback invoked exactly once per open-to-close
    /// transition, with the reason the dropdown closed.
    pub fn on_close(mut self, callback: impl FnMut(CloseReason) + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    /// The overlay id shared by this dropdown's lifecycle and portal.
    pub fn id(&self) -> OverlayId {
        self.portal.id()
    }

    /// Whether the dropdown is open.
    pub fn is_open(&self) -> bool {
        self.lifecycle.is_open()
    }

    /// The trigger node.
    pub fn trigger(&self) -> NodeId {
        self.positioner.trigger()
    }

    /// The mounted panel node, while open.
    pub fn panel(&self) -> Option<NodeId> {
        self.portal.node()
    }

    /// The current document-relative position, while open.
    pub fn position(&self) -> Option<AnchorPos> {
        self.positioner.position()
    }

    /// The render-layer style for the panel, while open.
    pub fn panel_style(&self) -> Option<PanelStyle> {
        let pos = self.positioner.position()?;
        let z_index = self.z_index?;
        Some(pos.style(self.config.align, z_index))
    }

    /// Open the dropdown, mounting `panel` at the document root.
    ///
    /// The position is computed from the trigger's live rect before the
    /// mount; if the trigger is not attached the open is aborted (no
    /// panel appears at a stale or undefined position). Returns whether
    /// the dropdown opened.
    pub fn open<H: Host, B: EventBus>(
        &mut self,
        host: &mut H,
        bus: &mut B,
        registry: &mut OverlayRegistry,
        panel: NodeId,
    ) -> bool {
        if self.lifecycle.is_open() {
            return false;
        }
        if self.positioner.refresh(host).is_none() {
            tracing::debug!(overlay = self.id().id(), "open aborted: trigger not attached");
            return false;
        }
        let z_index = self.portal.mount(host, registry, panel);
        self.z_index = Some(z_index);
        self.lifecycle.open(bus);
        true
    }

    /// Close programmatically. No-op (returning `false`) when already
    /// closed; the close callback fires at most once per open cycle.
    pub fn close<H: Host, B: EventBus>(
        &mut self,
        host: &mut H,
        bus: &mut B,
        registry: &mut OverlayRegistry,
    ) -> bool {
        self.close_with(host, bus, registry, CloseReason::Programmatic)
    }

    /// Close because an item in the panel was selected.
    pub fn select<H: Host, B: EventBus>(
        &mut self,
        host: &mut H,
        bus: &mut B,
        registry: &mut OverlayRegistry,
    ) -> bool {
        self.close_with(host, bus, registry, CloseReason::Selected)
    }

    /// Toggle on trigger click. Returns the open state after the toggle.
    pub fn toggle<H: Host, B: EventBus>(
        &mut self,
        host: &mut H,
        bus: &mut B,
        registry: &mut OverlayRegistry,
        panel: NodeId,
    ) -> bool {
        if self.lifecycle.is_open() {
            self.close(host, bus, registry);
            false
        } else {
            self.open(host, bus, registry, panel)
        }
    }

    /// Route a document-level event. Returns the close reason when the
    /// event closed the dropdown.
    pub fn handle_event<H: Host, B: EventBus>(
        &mut self,
        event: &Event,
        host: &mut H,
        bus: &mut B,
        registry: &mut OverlayRegistry,
    ) -> Option<CloseReason> {
        let trigger = self.positioner.trigger();
        let mut guards = [trigger, trigger];
        let mut guard_count = 1;
        if let Some(panel) = self.portal.node() {
            guards[1] = panel;
            guard_count = 2;
        }

        match self
            .lifecycle
            .on_event(event, bus, host, &guards[..guard_count])
        {
            EventOutcome::Ignored => None,
            EventOutcome::Reposition => {
                // Synchronous recompute so the panel never paints at a
                // stale position. Missing trigger: silent no-op.
                self.positioner.refresh(host);
                None
            }
            EventOutcome::Closed(reason) => {
                self.teardown(host, registry);
                self.fire_on_close(reason);
                Some(reason)
            }
        }
    }

    /// Terminal cleanup when the owning component unmounts. Detaches
    /// listeners and removes the panel; the close callback does not fire.
    pub fn unmount<H: Host, B: EventBus>(
        &mut self,
        host: &mut H,
        bus: &mut B,
        registry: &mut OverlayRegistry,
    ) {
        self.lifecycle.unmount(bus);
        self.teardown(host, registry);
    }

    fn close_with<H: Host, B: EventBus>(
        &mut self,
        host: &mut H,
        bus: &mut B,
        registry: &mut OverlayRegistry,
        reason: CloseReason,
    ) -> bool {
        if !self.lifecycle.close(bus) {
            return false;
        }
        self.teardown(host, registry);
        self.fire_on_close(reason);
        true
    }

    fn teardown<H: Host>(&mut self, host: &mut H, registry: &mut OverlayRegistry) {
        self.portal.unmount(host, registry);
        self.positioner.reset();
        self.z_index = None;
    }

    fn fire_on_close(&mut self, reason: CloseReason) {
        if let Some(callback) = &mut self.on_close {
            callback(reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parasol_core::{KeyCode, KeyEvent, Point, PointerEvent, Rect};
    use parasol_harness::{CountingBus, MemoryHost};
    use std::cell::RefCell;
    use std::rc::Rc;

    const TRIGGER_RECT: Rect = Rect::new(50.0, 100.0, 120.0, 40.0);

    struct Fixture {
        host: MemoryHost,
        bus: CountingBus,
        registry: OverlayRegistry,
        trigger: NodeId,
        panel: NodeId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut host = MemoryHost::new();
            let trigger = host.create_node();
            host.set_rect(trigger, TRIGGER_RECT);
            let panel = host.create_node();
            Self {
                host,
                bus: CountingBus::new(),
                registry: OverlayRegistry::new(),
                trigger,
                panel,
            }
        }
    }

    #[test]
    fn open_computes_position_before_mount() {
        let mut fx = Fixture::new();
        let mut dropdown = Dropdown::new(fx.trigger, DropdownConfig::default());

        assert!(dropdown.open(&mut fx.host, &mut fx.bus, &mut fx.registry, fx.panel));
        let pos = dropdown.position().expect("position computed at open");
        assert_eq!(pos.top, 144.0);
        assert_eq!(pos.left, 50.0);
        assert_eq!(pos.width, 120.0);
        assert_eq!(fx.host.root_children(), &[fx.panel]);
        dropdown.close(&mut fx.host, &mut fx.bus, &mut fx.registry);
    }

    #[test]
    fn right_align_style_carries_full_translation() {
        let mut fx = Fixture::new();
        let mut dropdown =
            Dropdown::new(fx.trigger, DropdownConfig::default().align(Align::Right));

        dropdown.open(&mut fx.host, &mut fx.bus, &mut fx.registry, fx.panel);
        let style = dropdown.panel_style().expect("open dropdown has a style");
        assert_eq!(style.left, 170.0);
        assert_eq!(style.translate_x_percent, -100.0);
        assert_eq!(style.min_width, crate::anchor::MIN_PANEL_WIDTH);
        dropdown.close(&mut fx.host, &mut fx.bus, &mut fx.registry);
    }

    #[test]
    fn open_with_detached_trigger_aborts() {
        let mut fx = Fixture::new();
        fx.host.remove_node(fx.trigger);
        let mut dropdown = Dropdown::new(fx.trigger, DropdownConfig::default());

        assert!(!dropdown.open(&mut fx.host, &mut fx.bus, &mut fx.registry, fx.panel));
        assert!(!dropdown.is_open());
        assert!(fx.host.root_children().is_empty());
        assert!(fx.bus.is_quiescent());
    }

    #[test]
    fn scroll_closes_by_default() {
        let mut fx = Fixture::new();
        let mut dropdown = Dropdown::new(fx.trigger, DropdownConfig::default());
        dropdown.open(&mut fx.host, &mut fx.bus, &mut fx.registry, fx.panel);

        let reason =
            dropdown.handle_event(&Event::Scroll, &mut fx.host, &mut fx.bus, &mut fx.registry);
        assert_eq!(reason, Some(CloseReason::Scroll));
        assert!(!dropdown.is_open());
        assert!(fx.host.root_children().is_empty());
        assert!(fx.bus.is_quiescent());
    }

    #[test]
    fn scroll_repositions_when_close_on_scroll_off() {
        let mut fx = Fixture::new();
        let mut dropdown =
            Dropdown::new(fx.trigger, DropdownConfig::default().close_on_scroll(false));
        dropdown.open(&mut fx.host, &mut fx.bus, &mut fx.registry, fx.panel);

        fx.host.scroll_by(0.0, 250.0);
        let reason =
            dropdown.handle_event(&Event::Scroll, &mut fx.host, &mut fx.bus, &mut fx.registry);
        assert_eq!(reason, None);
        assert!(dropdown.is_open());
        let pos = dropdown.position().expect("still open");
        assert_eq!(pos.top, 144.0 + 250.0);
        // Same panel node: reposition never remounted.
        assert_eq!(fx.host.root_children(), &[fx.panel]);

        dropdown.close(&mut fx.host, &mut fx.bus, &mut fx.registry);
    }

    #[test]
    fn click_inside_panel_does_not_close() {
        let mut fx = Fixture::new();
        let item = fx.host.create_child(fx.panel);
        let mut dropdown = Dropdown::new(fx.trigger, DropdownConfig::default());
        dropdown.open(&mut fx.host, &mut fx.bus, &mut fx.registry, fx.panel);

        let event = Event::PointerDown(PointerEvent::left(item, Point::ZERO));
        let reason = dropdown.handle_event(&event, &mut fx.host, &mut fx.bus, &mut fx.registry);
        assert_eq!(reason, None);
        assert!(dropdown.is_open());

        dropdown.close(&mut fx.host, &mut fx.bus, &mut fx.registry);
    }

    #[test]
    fn click_on_trigger_does_not_close() {
        let mut fx = Fixture::new();
        let mut dropdown = Dropdown::new(fx.trigger, DropdownConfig::default());
        dropdown.open(&mut fx.host, &mut fx.bus, &mut fx.registry, fx.panel);

        let event = Event::PointerDown(PointerEvent::left(fx.trigger, Point::ZERO));
        assert_eq!(
            dropdown.handle_event(&event, &mut fx.host, &mut fx.bus, &mut fx.registry),
            None
        );
        dropdown.close(&mut fx.host, &mut fx.bus, &mut fx.registry);
    }

    #[test]
    fn click_elsewhere_closes() {
        let mut fx = Fixture::new();
        let elsewhere = fx.host.create_node();
        let mut dropdown = Dropdown::new(fx.trigger, DropdownConfig::default());
        dropdown.open(&mut fx.host, &mut fx.bus, &mut fx.registry, fx.panel);

        let event = Event::PointerDown(PointerEvent::left(elsewhere, Point::ZERO));
        let reason = dropdown.handle_event(&event, &mut fx.host, &mut fx.bus, &mut fx.registry);
        assert_eq!(reason, Some(CloseReason::OutsideClick));
        assert!(fx.bus.is_quiescent());
    }

    #[test]
    fn escape_closes() {
        let mut fx = Fixture::new();
        let mut dropdown = Dropdown::new(fx.trigger, DropdownConfig::default());
        dropdown.open(&mut fx.host, &mut fx.bus, &mut fx.registry, fx.panel);

        let event = Event::Key(KeyEvent::plain(KeyCode::Escape));
        let reason = dropdown.handle_event(&event, &mut fx.host, &mut fx.bus, &mut fx.registry);
        assert_eq!(reason, Some(CloseReason::Escape));
    }

    #[test]
    fn select_closes_with_selected_reason() {
        let mut fx = Fixture::new();
        let reasons = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&reasons);
        let mut dropdown = Dropdown::new(fx.trigger, DropdownConfig::default())
            .on_close(move |reason| sink.borrow_mut().push(reason));

        dropdown.open(&mut fx.host, &mut fx.bus, &mut fx.registry, fx.panel);
        assert!(dropdown.select(&mut fx.host, &mut fx.bus, &mut fx.registry));
        assert_eq!(*reasons.borrow(), vec![CloseReason::Selected]);
    }

    #[test]
    fn close_callback_fires_once_per_cycle() {
        let mut fx = Fixture::new();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let mut dropdown = Dropdown::new(fx.trigger, DropdownConfig::default())
            .on_close(move |_| *sink.borrow_mut() += 1);

        dropdown.open(&mut fx.host, &mut fx.bus, &mut fx.registry, fx.panel);
        assert!(dropdown.close(&mut fx.host, &mut fx.bus, &mut fx.registry));
        assert!(!dropdown.close(&mut fx.host, &mut fx.bus, &mut fx.registry));
        assert!(!dropdown.close(&mut fx.host, &mut fx.bus, &mut fx.registry));
        assert_eq!(*count.borrow(), 1);
        assert!(fx.bus.is_quiescent());
    }

    #[test]
    fn toggle_cycles_open_state() {
        let mut fx = Fixture::new();
        let mut dropdown = Dropdown::new(fx.trigger, DropdownConfig::default());

        assert!(dropdown.toggle(&mut fx.host, &mut fx.bus, &mut fx.registry, fx.panel));
        assert!(dropdown.is_open());
        let panel2 = fx.host.create_node();
        assert!(!dropdown.toggle(&mut fx.host, &mut fx.bus, &mut fx.registry, panel2));
        assert!(!dropdown.is_open());
        assert!(fx.bus.is_quiescent());
    }

    #[test]
    fn unmount_cleans_up_without_callback() {
        let mut fx = Fixture::new();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let mut dropdown = Dropdown::new(fx.trigger, DropdownConfig::default())
            .on_close(move |_| *sink.borrow_mut() += 1);

        dropdown.open(&mut fx.host, &mut fx.bus, &mut fx.registry, fx.panel);
        dropdown.unmount(&mut fx.host, &mut fx.bus, &mut fx.registry);
        assert!(fx.bus.is_quiescent());
        assert!(fx.host.root_children().is_empty());
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn events_after_close_are_not_observed() {
        let mut fx = Fixture::new();
        let mut dropdown = Dropdown::new(fx.trigger, DropdownConfig::default());
        dropdown.open(&mut fx.host, &mut fx.bus, &mut fx.registry, fx.panel);
        dropdown.close(&mut fx.host, &mut fx.bus, &mut fx.registry);

        let before = fx.bus.detaches();
        assert_eq!(
            dropdown.handle_event(&Event::Scroll, &mut fx.host, &mut fx.bus, &mut fx.registry),
            None
        );
        assert_eq!(fx.bus.detaches(), before);
    }
}
