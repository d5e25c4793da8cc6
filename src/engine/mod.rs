//! Primitive engine binding and its serialization gate
//!
//! The native engine is an opaque capability behind the [`EngineBindings`]
//! trait: open/close documents, load/close pages, query metrics, render,
//! traverse bookmarks, enumerate links, map coordinates. It is NOT
//! thread-safe, and nothing about its internals is assumed here.
//!
//! Two rules hold everything together:
//!
//! 1. Every resource the engine hands out is an opaque handle
//!    ([`DocumentHandle`], [`PageHandle`], ...) owned by exactly one
//!    session.
//! 2. Every call into the engine happens under the one process-wide gate.
//!    There is no per-document locking;
//!    engine-wide thread safety is not guaranteed, so nothing finer-grained
//!    is safe.

mod bindings;
mod gate;
mod handles;

pub use bindings::{EngineBindings, EngineError, MetaTag, RenderTarget};
pub use handles::{BookmarkHandle, DocumentHandle, LinkHandle, PageHandle};

pub(crate) use gate::lock_engine;
