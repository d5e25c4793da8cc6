//! Primitive engine binding surface
//!
//! The native engine is consumed exclusively through [`EngineBindings`]: a
//! fixed set of operations over opaque handles. The layer above never
//! assumes anything about the engine beyond this trait. The engine is
//! assumed NOT to be thread-safe, so callers must hold the gate for the
//! full duration of every call.
//!
//! Production code binds this trait to the real native library; tests bind
//! it to a scripted in-memory engine.

use std::any::Any;
use std::fs::File;

use thiserror::Error;

use crate::document::{Point, Rect, Size};

use super::handles::{BookmarkHandle, DocumentHandle, LinkHandle, PageHandle};

/// Failure signalled by the native engine.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// The data is not a PDF document.
    #[error("not a valid PDF document")]
    BadFormat,

    /// The document is password protected and no password was supplied.
    #[error("document requires a password")]
    PasswordRequired,

    /// The supplied password does not match.
    #[error("incorrect password")]
    WrongPassword,

    /// The document structure is damaged beyond what the engine tolerates.
    #[error("document structure is corrupt: {0}")]
    Corrupt(String),

    /// Internal engine fault (out of memory, native assertion, ...).
    #[error("engine fault: {0}")]
    Internal(String),
}

/// Metadata tags recognized by the engine's document info dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaTag {
    Title,
    Author,
    Subject,
    Keywords,
    Creator,
    Producer,
    CreationDate,
    ModDate,
}

impl MetaTag {
    /// The tag name as the engine expects it.
    pub fn as_str(self) -> &'static str {
        match self {
            MetaTag::Title => "Title",
            MetaTag::Author => "Author",
            MetaTag::Subject => "Subject",
            MetaTag::Keywords => "Keywords",
            MetaTag::Creator => "Creator",
            MetaTag::Producer => "Producer",
            MetaTag::CreationDate => "CreationDate",
            MetaTag::ModDate => "ModDate",
        }
    }
}

/// An opaque surface the engine can draw a page into.
///
/// Platform surfaces (windows, swapchain images) implement this outside the
/// crate; [`crate::document::PixmapTarget`] is the in-crate raster target.
/// Engine bindings downcast through [`RenderTarget::as_any_mut`] to reach
/// the concrete surface type they support.
pub trait RenderTarget: Send {
    /// Target width in pixels.
    fn width(&self) -> u32;

    /// Target height in pixels.
    fn height(&self) -> u32;

    /// Downcast escape hatch for engine binding implementations.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// The fixed operation surface of the native engine.
///
/// Every method is a single primitive engine call. None of them are safe to
/// invoke concurrently; the session layer serializes all calls behind the
/// process-wide gate.
pub trait EngineBindings: Send + Sync {
    /// Parses a document from an open file. The engine reads lazily from
    /// the descriptor, so the file must outlive the returned handle.
    fn open(&self, file: &File, password: Option<&str>) -> Result<DocumentHandle, EngineError>;

    /// Parses a document from an in-memory byte buffer. The buffer must
    /// outlive the returned handle.
    fn open_bytes(&self, data: &[u8], password: Option<&str>)
        -> Result<DocumentHandle, EngineError>;

    /// Closes a document handle. The handle is invalid afterwards.
    fn close(&self, doc: DocumentHandle);

    /// Number of pages in the document.
    fn page_count(&self, doc: DocumentHandle) -> i32;

    /// Loads one page.
    fn load_page(&self, doc: DocumentHandle, index: usize) -> Result<PageHandle, EngineError>;

    /// Loads a contiguous page range (`from..=to`) in one call.
    fn load_pages(
        &self,
        doc: DocumentHandle,
        from: usize,
        to: usize,
    ) -> Result<Vec<PageHandle>, EngineError>;

    /// Closes a page handle. The handle is invalid afterwards.
    fn close_page(&self, page: PageHandle);

    /// Page width in pixels at the given resolution.
    fn page_width_pixels(&self, page: PageHandle, dpi: u32) -> i32;

    /// Page height in pixels at the given resolution.
    fn page_height_pixels(&self, page: PageHandle, dpi: u32) -> i32;

    /// Page width in PDF points (1/72 inch).
    fn page_width_points(&self, page: PageHandle) -> i32;

    /// Page height in PDF points.
    fn page_height_points(&self, page: PageHandle) -> i32;

    /// Page dimensions by index, without loading the page.
    fn page_size_by_index(&self, doc: DocumentHandle, index: usize, dpi: u32) -> Size;

    /// Renders a clipped page region into the target surface.
    #[allow(clippy::too_many_arguments)]
    fn render(
        &self,
        page: PageHandle,
        target: &mut dyn RenderTarget,
        dpi: u32,
        start_x: i32,
        start_y: i32,
        width: i32,
        height: i32,
        render_annotations: bool,
    ) -> Result<(), EngineError>;

    /// One field of the document info dictionary, absent if unset.
    fn meta_text(&self, doc: DocumentHandle, tag: MetaTag) -> Option<String>;

    /// First child of a bookmark node, or the first top-level bookmark when
    /// `parent` is `None`.
    fn first_child_bookmark(
        &self,
        doc: DocumentHandle,
        parent: Option<BookmarkHandle>,
    ) -> Option<BookmarkHandle>;

    /// Next sibling of a bookmark node.
    fn sibling_bookmark(
        &self,
        doc: DocumentHandle,
        bookmark: BookmarkHandle,
    ) -> Option<BookmarkHandle>;

    /// Title of a bookmark node.
    fn bookmark_title(&self, bookmark: BookmarkHandle) -> Option<String>;

    /// Destination page index of a bookmark node.
    fn bookmark_dest_index(&self, doc: DocumentHandle, bookmark: BookmarkHandle) -> u64;

    /// Link annotations on a page, in document order.
    fn page_links(&self, page: PageHandle) -> Vec<LinkHandle>;

    /// Internal destination page of a link, if it has one.
    fn link_dest_index(&self, doc: DocumentHandle, link: LinkHandle) -> Option<u32>;

    /// External URI of a link, if it has one.
    fn link_uri(&self, doc: DocumentHandle, link: LinkHandle) -> Option<String>;

    /// Bounding rectangle of a link in page space.
    fn link_rect(&self, link: LinkHandle) -> Option<Rect>;

    /// Maps a page-space point to device space for a viewport at
    /// (`start_x`, `start_y`) with dimensions `size_x` x `size_y` and the
    /// given rotation in quarter turns (0..=3).
    #[allow(clippy::too_many_arguments)]
    fn map_point(
        &self,
        page: PageHandle,
        start_x: i32,
        start_y: i32,
        size_x: i32,
        size_y: i32,
        rotate: i32,
        page_x: f64,
        page_y: f64,
    ) -> Point;
}
