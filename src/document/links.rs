//! Link extraction
//!
//! Resolves every link handle on a page to a rectangle plus destination,
//! keeping engine enumeration order.

use crate::engine::lock_engine;

use super::session::Document;
use super::types::Link;

impl Document {
    /// Link annotations on the page at `index`.
    ///
    /// A link is kept only if it has a bounding rectangle and at least one
    /// of an internal destination or a URI; anything else is dropped
    /// silently. A missing page handle yields an empty vec.
    pub fn page_links(&self, index: usize) -> Vec<Link> {
        let _gate = lock_engine();
        let Some(doc) = self.handle else {
            return Vec::new();
        };
        let Some(&page) = self.pages.get(&index) else {
            return Vec::new();
        };
        let bindings = self.shared.bindings.as_ref();

        let mut links = Vec::new();
        for handle in bindings.page_links(page) {
            let dest_page_index = bindings.link_dest_index(doc, handle);
            let uri = bindings.link_uri(doc, handle);
            let rect = bindings.link_rect(handle);

            // Only useful with a hit area and somewhere to go.
            if let Some(bounds) = rect {
                if dest_page_index.is_some() || uri.is_some() {
                    links.push(Link {
                        bounds,
                        dest_page_index,
                        uri,
                    });
                }
            }
        }
        links
    }
}
