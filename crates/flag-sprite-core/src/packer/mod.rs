use crate::error::{FlagSpriteError, Result};
use crate::model::{PackedIcon, Rect, SheetLayout};

pub mod shelf;

pub use shelf::ShelfPacker;

/// A packer places icon rectangles onto the sheet.
///
/// Implementations must ensure no overlaps and must respect the configured
/// inter-icon padding. `pack` returns `None` if the icon cannot be placed.
pub trait Packer {
    fn can_pack(&self, w: u32, h: u32) -> bool;
    fn pack(&mut self, w: u32, h: u32) -> Option<Rect>;
}

/// Packs `(code, width)` pairs of uniform-height icons into a sheet layout.
///
/// Placement is deterministic in input order; the returned canvas is the
/// bounding box of all placed rects. Fails with `Packing` when an icon is
/// wider than the sheet wrap width.
pub fn pack_icons(
    items: &[(String, u32)],
    icon_height: u32,
    padding: u32,
    max_sheet_width: u32,
) -> Result<SheetLayout> {
    if items.is_empty() {
        return Err(FlagSpriteError::Empty);
    }
    let mut packer = ShelfPacker::new(max_sheet_width, padding);
    let mut icons: Vec<PackedIcon> = Vec::with_capacity(items.len());
    let mut width = 0u32;
    let mut height = 0u32;
    for (code, w) in items {
        if !packer.can_pack(*w, icon_height) {
            return Err(FlagSpriteError::Packing(format!(
                "icon {} ({}px) is wider than the sheet wrap width ({}px)",
                code, w, max_sheet_width
            )));
        }
        let rect = packer
            .pack(*w, icon_height)
            .ok_or_else(|| FlagSpriteError::Packing(format!("could not place icon {}", code)))?;
        width = width.max(rect.x + rect.w);
        height = height.max(rect.y + rect.h);
        icons.push(PackedIcon {
            code: code.clone(),
            rect,
        });
    }
    Ok(SheetLayout {
        icons,
        width,
        height,
    })
}
