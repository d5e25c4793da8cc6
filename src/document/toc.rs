//! Bookmark tree reconstruction
//!
//! The engine exposes the outline as a linked first-child/next-sibling
//! chain of transient handles. This module mirrors that chain into an
//! explicit [`Bookmark`] tree, preserving engine traversal order exactly.

use std::collections::HashSet;

use crate::engine::{lock_engine, BookmarkHandle, DocumentHandle, EngineBindings};

use super::session::Document;
use super::types::Bookmark;

impl Document {
    /// Materializes the document outline as an ordered tree.
    ///
    /// The entire walk runs under a single gate acquisition so no other
    /// thread can touch engine state mid-traversal. A closed session or a
    /// document without an outline yields an empty vec. Bookmark handles
    /// are used only during construction and are not retained.
    pub fn table_of_contents(&self) -> Vec<Bookmark> {
        let _gate = lock_engine();
        let Some(doc) = self.handle else {
            return Vec::new();
        };
        let bindings = self.shared.bindings.as_ref();

        let mut top_level = Vec::new();
        let mut visited = HashSet::new();
        if let Some(first) = bindings.first_child_bookmark(doc, None) {
            build_subtree(bindings, doc, first, &mut top_level, &mut visited);
        }
        top_level
    }
}

/// Recursive mirror of the engine chain: the node's first child descends
/// into its own child list, the next sibling is appended to `siblings`
/// (the parent's list) after the node itself.
fn build_subtree(
    bindings: &dyn EngineBindings,
    doc: DocumentHandle,
    handle: BookmarkHandle,
    siblings: &mut Vec<Bookmark>,
    visited: &mut HashSet<BookmarkHandle>,
) {
    // A handle seen twice means the child/sibling graph loops back on
    // itself; truncate the branch instead of recursing without bound.
    if !visited.insert(handle) {
        tracing::warn!(bookmark = ?handle, "cyclic bookmark chain, branch truncated");
        return;
    }

    let mut node = Bookmark {
        title: bindings.bookmark_title(handle),
        page_index: bindings.bookmark_dest_index(doc, handle),
        children: Vec::new(),
    };

    if let Some(child) = bindings.first_child_bookmark(doc, Some(handle)) {
        build_subtree(bindings, doc, child, &mut node.children, visited);
    }
    siblings.push(node);

    if let Some(sibling) = bindings.sibling_bookmark(doc, handle) {
        build_subtree(bindings, doc, sibling, siblings, visited);
    }
}
