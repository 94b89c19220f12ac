use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// One source flag image: identifier (country code from the file stem) and
/// natural dimensions, read once at the start of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceImage {
    pub code: String,
    pub width: u32,
    pub height: u32,
}

/// The rectangle assigned to one flag within the sprite canvas.
///
/// Rects for distinct codes never overlap; the packer guarantees this and it
/// is not re-verified downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackedIcon {
    pub code: String,
    pub rect: Rect,
}

/// Packed sheet layout: every icon's rect plus the canvas size.
///
/// The canvas is the bounding box of all rects; inter-icon padding is already
/// reflected in the gaps between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetLayout {
    pub icons: Vec<PackedIcon>,
    pub width: u32,
    pub height: u32,
}

/// Everything the background-position/size percentage math needs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SheetMetrics {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Widest resized icon; narrower flags are re-centered within this column.
    pub max_icon_width: u32,
    /// Uniform resized height shared by every icon.
    pub icon_height: u32,
}

/// One CSS rule's worth of data per flag. Lifetime = one generation pass.
///
/// `width`/`height` are the packed rect's own dimensions (pre-centering),
/// which individual dimension classes use; they may be narrower than the
/// shared column width.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagRule {
    pub code: String,
    pub x_percent: f64,
    pub y_percent: f64,
    pub width: u32,
    pub height: u32,
}

/// Statistics about sheet packing efficiency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SheetStats {
    /// Number of flags packed.
    pub num_icons: usize,
    /// Canvas area (width * height).
    pub canvas_area: u64,
    /// Area covered by icon rects.
    pub used_area: u64,
    /// used_area / canvas_area (0.0 to 1.0). Higher is better.
    pub occupancy: f64,
}

impl SheetLayout {
    /// Computes packing statistics for this layout.
    pub fn stats(&self) -> SheetStats {
        let canvas_area = (self.width as u64) * (self.height as u64);
        let used_area: u64 = self
            .icons
            .iter()
            .map(|i| (i.rect.w as u64) * (i.rect.h as u64))
            .sum();
        let occupancy = if canvas_area > 0 {
            used_area as f64 / canvas_area as f64
        } else {
            0.0
        };
        SheetStats {
            num_icons: self.icons.len(),
            canvas_area,
            used_area,
            occupancy,
        }
    }
}

impl SheetStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Icons: {}, Occupancy: {:.2}%, Canvas Area: {} px², Used Area: {} px²",
            self.num_icons,
            self.occupancy * 100.0,
            self.canvas_area,
            self.used_area,
        )
    }
}
