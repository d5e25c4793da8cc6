//! Session data types
//!
//! Plain records materialized from the engine: metadata, bookmarks, links,
//! and the geometry types used by metrics and coordinate mapping.

use serde::{Deserialize, Serialize};

/// Integer pixel dimensions at a given resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Fractional dimensions in page points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeF {
    pub width: f32,
    pub height: f32,
}

impl SizeF {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Truncates to integer pixel dimensions.
    pub fn to_size(self) -> Size {
        Size::new(self.width as i32, self.height as i32)
    }
}

/// A point in device space, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with explicit edges.
///
/// Coordinate mapping can produce rects whose edges are swapped (left >
/// right) under 90 and 270 degree rotations; [`Rect::normalized`] sorts
/// them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Returns a copy with edges sorted so left <= right and top <= bottom.
    pub fn normalized(&self) -> Self {
        Self {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }
}

/// Document info dictionary fields, each independently absent when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub mod_date: Option<String>,
}

/// An outline (bookmark) node.
///
/// `children` preserves document traversal order exactly as the engine
/// reports it; no sorting is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub title: Option<String>,
    pub page_index: u64,
    pub children: Vec<Bookmark>,
}

impl Bookmark {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A link annotation on a page: a hit area plus an internal page
/// destination, an external URI, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Bounding rectangle in page space.
    pub bounds: Rect,
    /// Destination page index for internal links.
    pub dest_page_index: Option<u32>,
    /// Target URI for external links.
    pub uri: Option<String>,
}
