use super::Packer;
use crate::model::Rect;

/// Shelf packer: icons fill rows left to right, wrapping at `max_width`.
///
/// All flags share one resized height, so shelves are uniform; `padding`
/// separates icons within a row and rows from each other. Placement depends
/// only on the sequence of widths, which keeps runs deterministic.
#[derive(Debug, Clone)]
pub struct ShelfPacker {
    max_width: u32,
    padding: u32,
    cursor_x: u32,
    cursor_y: u32,
    shelf_height: u32,
}

impl ShelfPacker {
    pub fn new(max_width: u32, padding: u32) -> Self {
        Self {
            max_width,
            padding,
            cursor_x: 0,
            cursor_y: 0,
            shelf_height: 0,
        }
    }
}

impl Packer for ShelfPacker {
    fn can_pack(&self, w: u32, _h: u32) -> bool {
        w <= self.max_width
    }

    fn pack(&mut self, w: u32, h: u32) -> Option<Rect> {
        if w > self.max_width {
            return None;
        }
        if self.cursor_x > 0 && self.cursor_x + w > self.max_width {
            // wrap to the next shelf
            self.cursor_y += self.shelf_height + self.padding;
            self.cursor_x = 0;
            self.shelf_height = 0;
        }
        let rect = Rect::new(self.cursor_x, self.cursor_y, w, h);
        self.cursor_x += w + self.padding;
        self.shelf_height = self.shelf_height.max(h);
        Some(rect)
    }
}
