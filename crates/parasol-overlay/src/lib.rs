#![forbid(unsafe_code)]

//! The Parasol overlay engine.
//!
//! Four independent pieces share one conceptual job — deciding where a
//! floating element appears and when it disappears:
//!
//! - [`anchor`]: document-relative position math for panels anchored to a
//!   trigger element.
//! - [`lifecycle`]: the CLOSED/OPEN state machine that attaches and
//!   detaches document-level listeners with guaranteed cleanup.
//! - [`portal`]: mounting floating content at the shared document root,
//!   plus the registry that makes z-ordering deterministic.
//! - [`focus`]: capture-and-restore focus handling for modals.
//!
//! [`dropdown`] and [`modal`] compose them into the two shipped overlay
//! kinds; [`scroll_lock`] adds the modal-only body scroll lock.

pub mod anchor;
pub mod dropdown;
pub mod focus;
pub mod lifecycle;
pub mod modal;
pub mod portal;
pub mod scroll_lock;

pub use anchor::{Align, AnchorPos, AnchorPositioner, PanelStyle, Translation, compute_position};
pub use dropdown::{Dropdown, DropdownConfig};
pub use focus::FocusCoordinator;
pub use lifecycle::{CloseReason, EventOutcome, LifecycleConfig, OverlayLifecycle, Phase};
pub use modal::{Modal, ModalConfig, ModalPlacement};
pub use portal::{OverlayRegistry, Portal};
pub use scroll_lock::ScrollLock;
