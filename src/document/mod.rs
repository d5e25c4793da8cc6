//! Document sessions over the gated engine
//!
//! This module is the ownership layer: a [`Document`] session owns one
//! engine document handle, its backing resource, and the page handles
//! loaded from it, and it materializes the derived structures (metadata
//! record, bookmark tree, link list, mapped coordinates) the engine only
//! exposes through handle-based primitives.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                      Document                        │
//! │  handle · source · page map                          │
//! │                                                      │
//! │  lifecycle (session)   derived structures            │
//! │  metrics / render      toc · links · coords          │
//! └──────────────────────────────────────────────────────┘
//!                          │ every call under the gate
//!                          ▼
//! ┌──────────────────────────────────────────────────────┐
//! │             EngineBindings (opaque engine)           │
//! └──────────────────────────────────────────────────────┘
//! ```

mod coords;
mod error;
mod links;
mod session;
mod target;
mod toc;
mod types;

pub use error::{OpenError, Result};
pub use session::Document;
pub use target::PixmapTarget;
pub use types::{Bookmark, DocumentMeta, Link, Point, Rect, Size, SizeF};

pub(crate) use session::{DocumentSource, Shared};
