#![forbid(unsafe_code)]

//! Core types for Parasol: geometry, input events, and the capability
//! traits ([`EventBus`], [`Host`]) that decouple overlay logic from any
//! concrete document implementation.

pub mod bus;
pub mod event;
pub mod geometry;
pub mod host;

pub use bus::{EventBus, NoopBus, OverlayId};
pub use event::{Event, EventInterest, EventKind, KeyCode, KeyEvent, Modifiers, PointerButton, PointerEvent};
pub use geometry::{Point, Rect, Size};
pub use host::{Host, NodeId};
