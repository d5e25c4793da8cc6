//! Document session lifecycle and page access
//!
//! A [`Document`] owns one engine document handle, the resource backing it,
//! and the map from page index to loaded page handle. Every method acquires
//! the engine gate before touching any handle; the page map is only mutated
//! while the gate is held.
//!
//! Operations on an index without a loaded page return placeholder values
//! (zero metrics, render no-op) rather than errors. Callers must treat a
//! zero metric as "unavailable", not as a confirmed zero-size page.

use std::collections::HashMap;
use std::fs::File;
use std::sync::Arc;

use crate::engine::{
    lock_engine, DocumentHandle, EngineBindings, MetaTag, PageHandle, RenderTarget,
};

use super::types::{DocumentMeta, Size};

/// Resource the engine reads the document from.
///
/// The engine parses lazily, so the source must stay alive for as long as
/// the document handle it backs. It is dropped exactly once, on close.
pub(crate) enum DocumentSource {
    /// Owned descriptor to an on-disk document.
    File(File),
    /// In-memory document bytes.
    Bytes(Arc<Vec<u8>>),
}

/// State shared by the entry point and every session it opens.
pub(crate) struct Shared {
    pub(crate) bindings: Arc<dyn EngineBindings>,
    pub(crate) dpi: u32,
}

/// An open document session.
///
/// Sessions are independent of each other; what they share is the engine,
/// and the gate serializes them there. Dropping a session closes it.
pub struct Document {
    pub(crate) shared: Arc<Shared>,
    pub(crate) handle: Option<DocumentHandle>,
    source: Option<DocumentSource>,
    pub(crate) pages: HashMap<usize, PageHandle>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("handle", &self.handle)
            .field("pages", &self.pages.len())
            .finish()
    }
}

impl Document {
    pub(crate) fn new(shared: Arc<Shared>, handle: DocumentHandle, source: DocumentSource) -> Self {
        Self {
            shared,
            handle: Some(handle),
            source: Some(source),
            pages: HashMap::new(),
        }
    }

    /// Number of pages in the document. Returns 0 once the session is
    /// closed.
    pub fn page_count(&self) -> usize {
        let _gate = lock_engine();
        match self.handle {
            Some(doc) => self.shared.bindings.page_count(doc).max(0) as usize,
            None => 0,
        }
    }

    /// Whether a page handle is currently loaded for `index`.
    pub fn has_page(&self, index: usize) -> bool {
        self.pages.contains_key(&index)
    }

    /// Loads the page at `index` and tracks its handle in the page map.
    ///
    /// Re-opening an index closes the previously loaded handle before
    /// replacing it. Returns `None` if the session is closed or the engine
    /// rejects the index.
    pub fn open_page(&mut self, index: usize) -> Option<PageHandle> {
        let _gate = lock_engine();
        let doc = self.handle?;
        match self.shared.bindings.load_page(doc, index) {
            Ok(page) => {
                if let Some(previous) = self.pages.insert(index, page) {
                    self.shared.bindings.close_page(previous);
                }
                Some(page)
            }
            Err(err) => {
                tracing::warn!(index, error = %err, "page load failed");
                None
            }
        }
    }

    /// Loads the contiguous page range `from..=to` in one gated engine
    /// call and tracks each handle at its index.
    ///
    /// The engine is trusted for the handles it returns but not for their
    /// count: map updates stop once `to` is exceeded. Returns every handle
    /// the engine produced.
    pub fn open_page_range(&mut self, from: usize, to: usize) -> Vec<PageHandle> {
        let _gate = lock_engine();
        let Some(doc) = self.handle else {
            return Vec::new();
        };
        let handles = match self.shared.bindings.load_pages(doc, from, to) {
            Ok(handles) => handles,
            Err(err) => {
                tracing::warn!(from, to, error = %err, "page range load failed");
                return Vec::new();
            }
        };
        for (offset, page) in handles.iter().enumerate() {
            let index = from + offset;
            if index > to {
                break;
            }
            if let Some(previous) = self.pages.insert(index, *page) {
                self.shared.bindings.close_page(previous);
            }
        }
        handles
    }

    /// Page width in pixels at the configured dpi; 0 if `index` has no
    /// loaded page.
    pub fn page_width(&self, index: usize) -> i32 {
        let _gate = lock_engine();
        match self.pages.get(&index) {
            Some(&page) => self.shared.bindings.page_width_pixels(page, self.shared.dpi),
            None => 0,
        }
    }

    /// Page height in pixels at the configured dpi; 0 if `index` has no
    /// loaded page.
    pub fn page_height(&self, index: usize) -> i32 {
        let _gate = lock_engine();
        match self.pages.get(&index) {
            Some(&page) => self
                .shared
                .bindings
                .page_height_pixels(page, self.shared.dpi),
            None => 0,
        }
    }

    /// Page width in PDF points; 0 if `index` has no loaded page.
    pub fn page_width_point(&self, index: usize) -> i32 {
        let _gate = lock_engine();
        match self.pages.get(&index) {
            Some(&page) => self.shared.bindings.page_width_points(page),
            None => 0,
        }
    }

    /// Page height in PDF points; 0 if `index` has no loaded page.
    pub fn page_height_point(&self, index: usize) -> i32 {
        let _gate = lock_engine();
        match self.pages.get(&index) {
            Some(&page) => self.shared.bindings.page_height_points(page),
            None => 0,
        }
    }

    /// Page dimensions by index, without loading the page.
    pub fn page_size(&self, index: usize) -> Size {
        let _gate = lock_engine();
        match self.handle {
            Some(doc) => self
                .shared
                .bindings
                .page_size_by_index(doc, index, self.shared.dpi),
            None => Size::default(),
        }
    }

    /// Renders a page region into `target`.
    ///
    /// A missing page handle makes this a no-op, and an engine fault is
    /// logged and swallowed: rendering failures are non-fatal to the
    /// caller.
    #[allow(clippy::too_many_arguments)]
    pub fn render_page(
        &self,
        index: usize,
        target: &mut dyn RenderTarget,
        start_x: i32,
        start_y: i32,
        width: i32,
        height: i32,
        render_annotations: bool,
    ) {
        let _gate = lock_engine();
        let Some(&page) = self.pages.get(&index) else {
            return;
        };
        if let Err(err) = self.shared.bindings.render(
            page,
            target,
            self.shared.dpi,
            start_x,
            start_y,
            width,
            height,
            render_annotations,
        ) {
            tracing::error!(index, error = %err, "engine fault during render");
        }
    }

    /// Reads the document info dictionary, one gated pass over all tags.
    pub fn metadata(&self) -> DocumentMeta {
        let _gate = lock_engine();
        let Some(doc) = self.handle else {
            return DocumentMeta::default();
        };
        let bindings = &self.shared.bindings;
        DocumentMeta {
            title: bindings.meta_text(doc, MetaTag::Title),
            author: bindings.meta_text(doc, MetaTag::Author),
            subject: bindings.meta_text(doc, MetaTag::Subject),
            keywords: bindings.meta_text(doc, MetaTag::Keywords),
            creator: bindings.meta_text(doc, MetaTag::Creator),
            producer: bindings.meta_text(doc, MetaTag::Producer),
            creation_date: bindings.meta_text(doc, MetaTag::CreationDate),
            mod_date: bindings.meta_text(doc, MetaTag::ModDate),
        }
    }

    /// Closes the session: every loaded page, then the document handle,
    /// then the backing resource, in that order.
    ///
    /// Idempotent: a second call finds nothing left to release. Resource
    /// release errors are not propagated (descriptor close failures are not
    /// observable through `Drop`).
    pub fn close(&mut self) {
        let _gate = lock_engine();
        for (_, page) in self.pages.drain() {
            self.shared.bindings.close_page(page);
        }
        if let Some(doc) = self.handle.take() {
            self.shared.bindings.close(doc);
            tracing::debug!(handle = ?doc, "document session closed");
        }
        self.source = None;
    }
}

impl Drop for Document {
    fn drop(&mut self) {
        if self.handle.is_some() || self.source.is_some() {
            self.close();
        }
    }
}
