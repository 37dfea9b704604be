//! Browser seams.
//!
//! Components never touch global `window`/`document` state; they receive a
//! [`Document`] handle and an [`EventHub`] instead.

mod document;
mod events;
mod memory;

pub use document::{
    Document,
    NodeId,
    ScrollBehavior,
    ScrollBlock,
    ScrollOptions,
};
pub use events::{
    DomEvent,
    EventHub,
    EventKind,
    ListenerGuard,
};
pub use memory::MemoryDocument;
