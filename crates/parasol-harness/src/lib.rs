#![forbid(unsafe_code)]

//! Test doubles for the Parasol capability traits.
//!
//! - [`MemoryHost`]: an in-memory node arena implementing
//!   [`Host`](parasol_core::Host). Nodes have parent links, optional
//!   bounding rects, and a shared root; focus, scroll offset, and body
//!   overflow are plain fields the test can read back.
//! - [`CountingBus`]: an [`EventBus`](parasol_core::EventBus) that records
//!   attach/detach per `(overlay, kind)` pair. Listener hygiene becomes an
//!   equality assertion instead of a leak hunt.
//!
//! Neither double touches real globals, so lifecycle properties are
//! checkable in plain unit tests.

pub mod bus;
pub mod host;

pub use bus::CountingBus;
pub use host::MemoryHost;
