//! Page-space to device-space coordinate mapping
//!
//! Delegates single points to the engine's transform and composes two
//! point mappings into a rectangle mapping. Both operations hold the gate;
//! the rect mapping keeps it across both corners so the transform sees a
//! consistent handle set.

use crate::engine::lock_engine;

use super::session::Document;
use super::types::{Point, Rect};

impl Document {
    /// Maps a page-space point to device space for a viewport at
    /// (`start_x`, `start_y`) with dimensions `size_x` x `size_y` and the
    /// given rotation in quarter turns.
    ///
    /// Returns the origin point if `index` has no loaded page.
    #[allow(clippy::too_many_arguments)]
    pub fn map_page_coords_to_device(
        &self,
        index: usize,
        start_x: i32,
        start_y: i32,
        size_x: i32,
        size_y: i32,
        rotate: i32,
        page_x: f64,
        page_y: f64,
    ) -> Point {
        let _gate = lock_engine();
        let Some(&page) = self.pages.get(&index) else {
            return Point::default();
        };
        self.shared
            .bindings
            .map_point(page, start_x, start_y, size_x, size_y, rotate, page_x, page_y)
    }

    /// Maps a page-space rectangle to device space by mapping its left-top
    /// and right-bottom corners independently.
    ///
    /// Under 90 and 270 degree rotations the mapped corners can swap
    /// sides, so the result may have left > right or top > bottom; use
    /// [`Rect::normalized`] when sorted edges are required.
    #[allow(clippy::too_many_arguments)]
    pub fn map_rect_to_device(
        &self,
        index: usize,
        start_x: i32,
        start_y: i32,
        size_x: i32,
        size_y: i32,
        rotate: i32,
        rect: Rect,
    ) -> Rect {
        let _gate = lock_engine();
        let left_top = self.map_page_coords_to_device(
            index,
            start_x,
            start_y,
            size_x,
            size_y,
            rotate,
            rect.left as f64,
            rect.top as f64,
        );
        let right_bottom = self.map_page_coords_to_device(
            index,
            start_x,
            start_y,
            size_x,
            size_y,
            rotate,
            rect.right as f64,
            rect.bottom as f64,
        );
        Rect::new(
            left_top.x as f32,
            left_top.y as f32,
            right_bottom.x as f32,
            right_bottom.y as f32,
        )
    }
}
