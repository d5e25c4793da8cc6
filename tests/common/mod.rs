//! Scripted in-memory engine backing the integration tests.
//!
//! Serves one document description per engine instance, allocates fresh
//! handles per call like the real engine, and records enough bookkeeping
//! (live/closed handles, overlapping calls) for the tests to assert the
//! session layer's ownership and serialization guarantees.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use pdfium_safe::{
    BookmarkHandle, DocumentHandle, EngineBindings, EngineError, LinkHandle, MetaTag, PageHandle,
    PixmapTarget, Point, Rect, RenderTarget, Size,
};

/// One outline node in the engine's first-child/next-sibling form.
/// `first_child`/`sibling` are indexes into `DocumentFixture::outline`.
#[derive(Clone, Default)]
pub struct OutlineNode {
    pub title: Option<String>,
    pub page: u64,
    pub first_child: Option<usize>,
    pub sibling: Option<usize>,
}

#[derive(Clone, Default)]
pub struct LinkFixture {
    pub rect: Option<Rect>,
    pub dest: Option<u32>,
    pub uri: Option<String>,
}

#[derive(Clone)]
pub struct PageFixture {
    pub width_pt: i32,
    pub height_pt: i32,
    pub links: Vec<LinkFixture>,
}

impl Default for PageFixture {
    fn default() -> Self {
        // US letter.
        Self {
            width_pt: 612,
            height_pt: 792,
            links: Vec::new(),
        }
    }
}

/// The single document this engine knows how to serve. Every open call
/// produces a fresh instance of it.
#[derive(Clone, Default)]
pub struct DocumentFixture {
    pub password: Option<String>,
    pub pages: Vec<PageFixture>,
    pub meta: HashMap<MetaTag, String>,
    pub outline: Vec<OutlineNode>,
    /// Index of the first top-level outline node.
    pub outline_root: Option<usize>,
    /// When set, every open call fails with this error.
    pub fail_open: Option<EngineError>,
    /// Handles `load_pages` hands back beyond the requested range.
    pub extra_range_handles: usize,
}

impl DocumentFixture {
    pub fn with_pages(count: usize) -> Self {
        Self {
            pages: vec![PageFixture::default(); count],
            ..Default::default()
        }
    }
}

#[derive(Default)]
struct EngineState {
    next_handle: u64,
    open_docs: HashSet<u64>,
    live_pages: HashMap<u64, usize>,
    closed_docs: Vec<u64>,
    closed_pages: Vec<u64>,
}

pub struct ScriptedEngine {
    fixture: DocumentFixture,
    state: Mutex<EngineState>,
    busy: AtomicBool,
    overlap: AtomicBool,
    render_delay: Duration,
}

impl ScriptedEngine {
    pub fn new(fixture: DocumentFixture) -> Self {
        Self::with_render_delay(fixture, Duration::ZERO)
    }

    pub fn with_render_delay(fixture: DocumentFixture, render_delay: Duration) -> Self {
        Self {
            fixture,
            state: Mutex::new(EngineState::default()),
            busy: AtomicBool::new(false),
            overlap: AtomicBool::new(false),
            render_delay,
        }
    }

    /// True if two engine calls ever ran concurrently; the session layer's
    /// gate must make this impossible.
    pub fn overlapping_calls_seen(&self) -> bool {
        self.overlap.load(Ordering::SeqCst)
    }

    pub fn open_doc_count(&self) -> usize {
        self.state.lock().open_docs.len()
    }

    pub fn closed_doc_count(&self) -> usize {
        self.state.lock().closed_docs.len()
    }

    pub fn live_page_count(&self) -> usize {
        self.state.lock().live_pages.len()
    }

    pub fn closed_page_handles(&self) -> Vec<u64> {
        self.state.lock().closed_pages.clone()
    }

    fn enter(&self) -> CallGuard<'_> {
        if self.busy.swap(true, Ordering::SeqCst) {
            self.overlap.store(true, Ordering::SeqCst);
        }
        CallGuard(self)
    }

    fn open_impl(&self, password: Option<&str>) -> Result<DocumentHandle, EngineError> {
        if let Some(err) = &self.fixture.fail_open {
            return Err(err.clone());
        }
        match (&self.fixture.password, password) {
            (Some(_), None) => Err(EngineError::PasswordRequired),
            (Some(expected), Some(given)) if expected != given => Err(EngineError::WrongPassword),
            _ => {
                let mut state = self.state.lock();
                state.next_handle += 1;
                let raw = state.next_handle;
                state.open_docs.insert(raw);
                Ok(DocumentHandle::from_raw(raw))
            }
        }
    }

    fn alloc_page(&self, index: usize) -> PageHandle {
        let mut state = self.state.lock();
        state.next_handle += 1;
        let raw = state.next_handle;
        state.live_pages.insert(raw, index);
        PageHandle::from_raw(raw)
    }

    fn page_fixture(&self, page: PageHandle) -> Option<&PageFixture> {
        let index = *self.state.lock().live_pages.get(&page.raw())?;
        self.fixture.pages.get(index)
    }

    fn outline_node(&self, handle: BookmarkHandle) -> Option<&OutlineNode> {
        self.fixture.outline.get((handle.raw() - 1) as usize)
    }

    fn bookmark_handle(index: usize) -> BookmarkHandle {
        BookmarkHandle::from_raw(index as u64 + 1)
    }

    fn link_handle(page_index: usize, link_index: usize) -> LinkHandle {
        LinkHandle::from_raw(((page_index as u64) << 16) | link_index as u64)
    }

    fn link_fixture(&self, link: LinkHandle) -> Option<&LinkFixture> {
        let page_index = (link.raw() >> 16) as usize;
        let link_index = (link.raw() & 0xffff) as usize;
        self.fixture.pages.get(page_index)?.links.get(link_index)
    }
}

struct CallGuard<'a>(&'a ScriptedEngine);

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        self.0.busy.store(false, Ordering::SeqCst);
    }
}

impl EngineBindings for ScriptedEngine {
    fn open(&self, _file: &File, password: Option<&str>) -> Result<DocumentHandle, EngineError> {
        let _call = self.enter();
        self.open_impl(password)
    }

    fn open_bytes(
        &self,
        data: &[u8],
        password: Option<&str>,
    ) -> Result<DocumentHandle, EngineError> {
        let _call = self.enter();
        if !data.starts_with(b"%PDF") {
            return Err(EngineError::BadFormat);
        }
        self.open_impl(password)
    }

    fn close(&self, doc: DocumentHandle) {
        let _call = self.enter();
        let mut state = self.state.lock();
        state.open_docs.remove(&doc.raw());
        state.closed_docs.push(doc.raw());
    }

    fn page_count(&self, doc: DocumentHandle) -> i32 {
        let _call = self.enter();
        if self.state.lock().open_docs.contains(&doc.raw()) {
            self.fixture.pages.len() as i32
        } else {
            0
        }
    }

    fn load_page(&self, _doc: DocumentHandle, index: usize) -> Result<PageHandle, EngineError> {
        let _call = self.enter();
        if index >= self.fixture.pages.len() {
            return Err(EngineError::Internal(format!("no page {index}")));
        }
        Ok(self.alloc_page(index))
    }

    fn load_pages(
        &self,
        _doc: DocumentHandle,
        from: usize,
        to: usize,
    ) -> Result<Vec<PageHandle>, EngineError> {
        let _call = self.enter();
        if from > to || to >= self.fixture.pages.len() {
            return Err(EngineError::Internal(format!("bad range {from}..={to}")));
        }
        let mut handles: Vec<PageHandle> = (from..=to).map(|i| self.alloc_page(i)).collect();
        for _ in 0..self.fixture.extra_range_handles {
            handles.push(self.alloc_page(to));
        }
        Ok(handles)
    }

    fn close_page(&self, page: PageHandle) {
        let _call = self.enter();
        let mut state = self.state.lock();
        state.live_pages.remove(&page.raw());
        state.closed_pages.push(page.raw());
    }

    fn page_width_pixels(&self, page: PageHandle, dpi: u32) -> i32 {
        let _call = self.enter();
        self.page_fixture(page)
            .map_or(0, |p| p.width_pt * dpi as i32 / 72)
    }

    fn page_height_pixels(&self, page: PageHandle, dpi: u32) -> i32 {
        let _call = self.enter();
        self.page_fixture(page)
            .map_or(0, |p| p.height_pt * dpi as i32 / 72)
    }

    fn page_width_points(&self, page: PageHandle) -> i32 {
        let _call = self.enter();
        self.page_fixture(page).map_or(0, |p| p.width_pt)
    }

    fn page_height_points(&self, page: PageHandle) -> i32 {
        let _call = self.enter();
        self.page_fixture(page).map_or(0, |p| p.height_pt)
    }

    fn page_size_by_index(&self, _doc: DocumentHandle, index: usize, dpi: u32) -> Size {
        let _call = self.enter();
        self.fixture.pages.get(index).map_or(Size::default(), |p| {
            Size::new(p.width_pt * dpi as i32 / 72, p.height_pt * dpi as i32 / 72)
        })
    }

    fn render(
        &self,
        page: PageHandle,
        target: &mut dyn RenderTarget,
        _dpi: u32,
        _start_x: i32,
        _start_y: i32,
        _width: i32,
        _height: i32,
        _render_annotations: bool,
    ) -> Result<(), EngineError> {
        let _call = self.enter();
        let pixmap = target
            .as_any_mut()
            .downcast_mut::<PixmapTarget>()
            .ok_or_else(|| EngineError::Internal("unsupported render target".into()))?;

        // Paint in two halves around the delay so an interleaved engine
        // call would land mid-frame.
        let shade = page.raw() as u8;
        let pixel = image::Rgba([shade, shade, shade, 255]);
        let (w, h) = (pixmap.width(), pixmap.height());
        let img = pixmap.image_mut();
        for y in 0..h / 2 {
            for x in 0..w {
                img.put_pixel(x, y, pixel);
            }
        }
        thread::sleep(self.render_delay);
        for y in h / 2..h {
            for x in 0..w {
                img.put_pixel(x, y, pixel);
            }
        }
        Ok(())
    }

    fn meta_text(&self, _doc: DocumentHandle, tag: MetaTag) -> Option<String> {
        let _call = self.enter();
        self.fixture.meta.get(&tag).cloned()
    }

    fn first_child_bookmark(
        &self,
        _doc: DocumentHandle,
        parent: Option<BookmarkHandle>,
    ) -> Option<BookmarkHandle> {
        let _call = self.enter();
        match parent {
            None => self.fixture.outline_root.map(Self::bookmark_handle),
            Some(handle) => self
                .outline_node(handle)?
                .first_child
                .map(Self::bookmark_handle),
        }
    }

    fn sibling_bookmark(
        &self,
        _doc: DocumentHandle,
        bookmark: BookmarkHandle,
    ) -> Option<BookmarkHandle> {
        let _call = self.enter();
        self.outline_node(bookmark)?.sibling.map(Self::bookmark_handle)
    }

    fn bookmark_title(&self, bookmark: BookmarkHandle) -> Option<String> {
        let _call = self.enter();
        self.outline_node(bookmark)?.title.clone()
    }

    fn bookmark_dest_index(&self, _doc: DocumentHandle, bookmark: BookmarkHandle) -> u64 {
        let _call = self.enter();
        self.outline_node(bookmark).map_or(0, |node| node.page)
    }

    fn page_links(&self, page: PageHandle) -> Vec<LinkHandle> {
        let _call = self.enter();
        let index = match self.state.lock().live_pages.get(&page.raw()) {
            Some(&index) => index,
            None => return Vec::new(),
        };
        let link_count = self.fixture.pages.get(index).map_or(0, |p| p.links.len());
        (0..link_count).map(|l| Self::link_handle(index, l)).collect()
    }

    fn link_dest_index(&self, _doc: DocumentHandle, link: LinkHandle) -> Option<u32> {
        let _call = self.enter();
        self.link_fixture(link)?.dest
    }

    fn link_uri(&self, _doc: DocumentHandle, link: LinkHandle) -> Option<String> {
        let _call = self.enter();
        self.link_fixture(link)?.uri.clone()
    }

    fn link_rect(&self, link: LinkHandle) -> Option<Rect> {
        let _call = self.enter();
        self.link_fixture(link)?.rect
    }

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
    ) -> Point {
        let _call = self.enter();
        let Some(fixture) = self.page_fixture(page) else {
            return Point::default();
        };
        let (w, h) = (fixture.width_pt as f64, fixture.height_pt as f64);
        let (sx, sy) = (size_x as f64, size_y as f64);
        let (dx, dy) = match rotate.rem_euclid(4) {
            0 => (page_x / w * sx, page_y / h * sy),
            1 => (sx - page_y / h * sx, page_x / w * sy),
            2 => (sx - page_x / w * sx, sy - page_y / h * sy),
            _ => (page_y / h * sx, sy - page_x / w * sy),
        };
        Point::new(start_x + dx.round() as i32, start_y + dy.round() as i32)
    }
}
