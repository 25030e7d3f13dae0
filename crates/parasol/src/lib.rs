#![forbid(unsafe_code)]

//! Parasol public facade.
//!
//! Re-exports the overlay coordination crates under one roof. Most users
//! want the [`prelude`]; the sub-crates stay available as `core`,
//! `overlay`, and (with the `harness` feature) `harness` for anything
//! the prelude leaves out.

pub use parasol_core as core;
#[cfg(feature = "harness")]
pub use parasol_harness as harness;
pub use parasol_overlay as overlay;

/// Everything needed to drive a dropdown or modal.
pub mod prelude {
    pub use parasol_core::{
        Event, EventBus, EventInterest, EventKind, Host, KeyCode, KeyEvent, Modifiers, NodeId,
        NoopBus, OverlayId, Point, PointerButton, PointerEvent, Rect, Size,
    };
    #[cfg(feature = "harness")]
    pub use parasol_harness::{CountingBus, MemoryHost};
    pub use parasol_overlay::{
        Align, AnchorPos, AnchorPositioner, CloseReason, Dropdown, DropdownConfig, EventOutcome,
        FocusCoordinator, LifecycleConfig, Modal, ModalConfig, ModalPlacement, OverlayLifecycle,
        OverlayRegistry, PanelStyle, Phase, Portal, ScrollLock, compute_position,
    };
}
