//! Thread-safe session layer over the native pdfium rendering engine
//!
//! The native engine is fast and battle-tested but keeps global mutable
//! state and is not thread-safe. This crate wraps it in a layer that:
//!
//! 1. Owns handle lifetimes: each [`Document`] session owns its document
//!    handle, backing resource, and loaded page handles, released in a
//!    fixed order on close.
//! 2. Serializes every engine call behind one process-wide gate, including
//!    multi-step derived operations.
//! 3. Materializes bookmark trees and link lists from the engine's
//!    handle-based traversal primitives.
//! 4. Maps page-space coordinates to device space for rendered output.
//!
//! # Architecture
//!
//! ```text
//!   callers (any number of threads)
//!        │
//!        ▼
//! ┌───────────────┐   opens   ┌──────────────────────────────┐
//! │    Pdfium     │──────────▶│   Document (session)         │
//! │ bindings, dpi │           │ pages · metrics · render ·   │
//! └───────────────┘           │ meta · toc · links · coords  │
//!                             └──────────────┬───────────────┘
//!                                            │ global gate
//!                                            ▼
//!                             ┌──────────────────────────────┐
//!                             │  EngineBindings (native)     │
//!                             └──────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use pdfium_safe::{Config, Pdfium, PixmapTarget};
//!
//! let pdfium = Pdfium::new(bindings, Config { dpi: 160 });
//! let mut doc = pdfium.open_bytes(bytes, None)?;
//!
//! doc.open_page(0);
//! let mut target = PixmapTarget::new(612, 792);
//! doc.render_page(0, &mut target, 0, 0, 612, 792, false);
//!
//! let outline = doc.table_of_contents();
//! let links = doc.page_links(0);
//! doc.close();
//! ```

pub mod document;
pub mod engine;

mod pdfium;

pub use document::{
    Bookmark, Document, DocumentMeta, Link, OpenError, PixmapTarget, Point, Rect, Result, Size,
    SizeF,
};
pub use engine::{
    BookmarkHandle, DocumentHandle, EngineBindings, EngineError, LinkHandle, MetaTag, PageHandle,
    RenderTarget,
};
pub use pdfium::{Config, Pdfium};
