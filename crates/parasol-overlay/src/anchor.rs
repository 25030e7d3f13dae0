#![forbid(unsafe_code)]

//! Anchored position math for dropdown panels.
//!
//! Positions are computed in document coordinates (viewport rect plus
//! scroll offset) so the floating panel never needs a positioned ancestor;
//! it can sit directly under the document root. The panel opens below the
//! trigger with a fixed 4 px gap.
//!
//! # Invariants
//!
//! - `top`/`left` always include the scroll offset at computation time.
//! - Recomputation never produces stale values: if the trigger is gone,
//!   the previous position is kept and the caller is told via `None`.
//! - Alignment never changes after the positioner is created.
//!
//! # Failure Modes
//!
//! - Trigger unmounted mid-computation: `refresh` is a silent no-op.

use parasol_core::{Host, NodeId, Point, Rect};

/// Vertical gap between the trigger's bottom edge and the panel.
pub const ANCHOR_GAP: f64 = 4.0;

/// Intrinsic minimum panel width for right/center alignment.
pub const MIN_PANEL_WIDTH: f64 = 200.0;

/// Maximum panel height before the panel scrolls internally.
pub const MAX_PANEL_HEIGHT: f64 = 400.0;

/// Horizontal alignment of the panel relative to its trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Panel's left edge at the trigger's left edge; panel defaults to
    /// the trigger's width.
    #[default]
    Left,
    /// Panel's right edge at the trigger's right edge.
    Right,
    /// Panel centered on the trigger.
    Center,
}

impl Align {
    /// The horizontal translation the render layer must apply so the
    /// computed `left` lands on the intended panel edge.
    pub const fn translation(self) -> Translation {
        match self {
            Align::Left => Translation::None,
            Align::Right => Translation::FullLeft,
            Align::Center => Translation::HalfLeft,
        }
    }
}

/// Render-layer horizontal translation, as a percentage of panel width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Translation {
    /// No translation; `left` is the panel's left edge.
    None,
    /// `translateX(-50%)`; `left` is the panel's horizontal center.
    HalfLeft,
    /// `translateX(-100%)`; `left` is the panel's right edge.
    FullLeft,
}

impl Translation {
    /// The translation as a percentage of the panel's own width.
    pub const fn percent_x(self) -> f64 {
        match self {
            Translation::None => 0.0,
            Translation::HalfLeft => -50.0,
            Translation::FullLeft => -100.0,
        }
    }
}

/// A computed panel position in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPos {
    /// Document-relative top edge of the panel.
    pub top: f64,
    /// Document-relative alignment reference point (meaning depends on
    /// [`Align`]; see [`Translation`]).
    pub left: f64,
    /// The trigger's width at computation time.
    pub width: f64,
}

/// Compute the panel position for a trigger's live bounding box.
///
/// `trigger` is viewport-relative (as reported by the host); `scroll` is
/// the document scroll offset, folded into the result.
pub fn compute_position(trigger: Rect, scroll: Point, align: Align) -> AnchorPos {
    let left = match align {
        Align::Left => trigger.x + scroll.x,
        Align::Right => trigger.right() + scroll.x,
        Align::Center => trigger.x + scroll.x + trigger.width / 2.0,
    };

    AnchorPos {
        top: trigger.bottom() + scroll.y + ANCHOR_GAP,
        left,
        width: trigger.width,
    }
}

/// Styling contract handed to the render layer.
///
/// The engine computes geometry; the render layer applies it. `min_width`
/// is the trigger width for left alignment and the intrinsic minimum for
/// the other modes (the original panels grow to fit content).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelStyle {
    pub top: f64,
    pub left: f64,
    pub min_width: f64,
    pub max_height: f64,
    pub translate_x_percent: f64,
    pub z_index: u32,
}

impl AnchorPos {
    /// Build the render-layer style for this position.
    pub fn style(&self, align: Align, z_index: u32) -> PanelStyle {
        let min_width = match align {
            Align::Left => self.width,
            Align::Right | Align::Center => MIN_PANEL_WIDTH,
        };
        PanelStyle {
            top: self.top,
            left: self.left,
            min_width,
            max_height: MAX_PANEL_HEIGHT,
            translate_x_percent: align.translation().percent_x(),
            z_index,
        }
    }
}

/// Tracks a trigger node and recomputes the panel position on demand.
#[derive(Debug)]
pub struct AnchorPositioner {
    trigger: NodeId,
    align: Align,
    last: Option<AnchorPos>,
}

impl AnchorPositioner {
    /// Create a positioner for a trigger node.
    pub fn new(trigger: NodeId, align: Align) -> Self {
        Self {
            trigger,
            align,
            last: None,
        }
    }

    /// The configured alignment.
    pub fn align(&self) -> Align {
        self.align
    }

    /// The trigger node this positioner follows.
    pub fn trigger(&self) -> NodeId {
        self.trigger
    }

    /// The most recently computed position, if any.
    pub fn position(&self) -> Option<AnchorPos> {
        self.last
    }

    /// Recompute from the trigger's live bounding box.
    ///
    /// Returns the fresh position, or `None` when the trigger is not
    /// attached — in which case the previous position is kept untouched.
    pub fn refresh<H: Host>(&mut self, host: &H) -> Option<AnchorPos> {
        let rect = host.bounding_rect(self.trigger)?;
        let pos = compute_position(rect, host.scroll_offset(), self.align);
        self.last = Some(pos);
        Some(pos)
    }

    /// Drop the cached position (used when the overlay closes).
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parasol_harness::MemoryHost;

    const TRIGGER: Rect = Rect::new(50.0, 100.0, 120.0, 40.0);

    #[test]
    fn left_align_at_origin_scroll() {
        let pos = compute_position(TRIGGER, Point::ZERO, Align::Left);
        assert_eq!(pos.top, 144.0); // bottom + 4px gap
        assert_eq!(pos.left, 50.0);
        assert_eq!(pos.width, 120.0);
    }

    #[test]
    fn right_align_uses_trigger_right_edge() {
        let pos = compute_position(TRIGGER, Point::ZERO, Align::Right);
        assert_eq!(pos.left, 170.0);
        assert_eq!(pos.top, 144.0);
    }

    #[test]
    fn center_align_uses_trigger_midpoint() {
        let pos = compute_position(TRIGGER, Point::ZERO, Align::Center);
        assert_eq!(pos.left, 110.0);
    }

    #[test]
    fn scroll_offset_is_folded_in() {
        let pos = compute_position(TRIGGER, Point::new(15.0, 300.0), Align::Left);
        assert_eq!(pos.left, 65.0);
        assert_eq!(pos.top, 444.0);
    }

    #[test]
    fn translation_percentages() {
        assert_eq!(Align::Left.translation().percent_x(), 0.0);
        assert_eq!(Align::Right.translation().percent_x(), -100.0);
        assert_eq!(Align::Center.translation().percent_x(), -50.0);
    }

    #[test]
    fn style_min_width_follows_alignment() {
        let pos = compute_position(TRIGGER, Point::ZERO, Align::Left);
        assert_eq!(pos.style(Align::Left, 1000).min_width, 120.0);
        assert_eq!(pos.style(Align::Right, 1000).min_width, MIN_PANEL_WIDTH);
        assert_eq!(pos.style(Align::Center, 1000).min_width, MIN_PANEL_WIDTH);
        assert_eq!(pos.style(Align::Left, 1000).max_height, MAX_PANEL_HEIGHT);
    }

    #[test]
    fn refresh_tracks_live_rect() {
        let mut host = MemoryHost::new();
        let trigger = host.create_node();
        host.set_rect(trigger, TRIGGER);

        let mut positioner = AnchorPositioner::new(trigger, Align::Left);
        let pos = positioner.refresh(&host).expect("trigger attached");
        assert_eq!(pos.top, 144.0);

        // Scrolling moves the document-relative position even though the
        // viewport rect is unchanged.
        host.set_scroll(Point::new(0.0, 50.0));
        let pos = positioner.refresh(&host).expect("trigger attached");
        assert_eq!(pos.top, 194.0);
    }

    #[test]
    fn refresh_with_missing_trigger_keeps_last() {
        let mut host = MemoryHost::new();
        let trigger = host.create_node();
        host.set_rect(trigger, TRIGGER);

        let mut positioner = AnchorPositioner::new(trigger, Align::Left);
        positioner.refresh(&host);
        let before = positioner.position();

        host.remove_node(trigger);
        assert_eq!(positioner.refresh(&host), None);
        assert_eq!(positioner.position(), before);
    }

    #[test]
    fn reset_clears_cached_position() {
        let mut host = MemoryHost::new();
        let trigger = host.create_node();
        host.set_rect(trigger, TRIGGER);

        let mut positioner = AnchorPositioner::new(trigger, Align::Center);
        positioner.refresh(&host);
        assert!(positioner.position().is_some());
        positioner.reset();
        assert_eq!(positioner.position(), None);
    }
}
