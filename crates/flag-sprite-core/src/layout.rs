use crate::error::{FlagSpriteError, Result};
use crate::model::{FlagRule, Rect, SheetLayout, SheetMetrics, SourceImage};

/// Reference height (pixels) that defines the aspect scale: the target icon
/// height is derived as `round(target_width / widest_natural_width * 240)`.
/// Matches the h240 source imagery the tool was built around.
pub const REFERENCE_HEIGHT: u32 = 240;

/// Uniform target dimensions for the resize step.
///
/// `width` bounds resized icons from above; individual flags may come out
/// narrower since the resize preserves each source's aspect ratio. `height`
/// is shared by every icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDimensions {
    pub width: u32,
    pub height: u32,
}

/// Derives the shared target dimensions from source image metadata.
///
/// The requested width is clamped to `[1, narrowest natural width]` so no
/// source is ever upscaled past its own resolution. The result is invariant
/// under permutation of `sources`. Codes must be unique: a duplicate would
/// collapse two flags onto one class name and one set of packed pixels.
pub fn compute_target_dimensions(
    sources: &[SourceImage],
    requested_width: u32,
) -> Result<TargetDimensions> {
    if sources.is_empty() {
        return Err(FlagSpriteError::Empty);
    }
    let mut seen: std::collections::HashSet<&str> = std::collections::HashSet::new();
    let mut widest = 0u32;
    let mut narrowest = u32::MAX;
    for src in sources {
        if src.width == 0 || src.height == 0 {
            return Err(FlagSpriteError::InvalidInput(format!(
                "source image {} has zero dimension ({}x{})",
                src.code, src.width, src.height
            )));
        }
        if !seen.insert(src.code.as_str()) {
            return Err(FlagSpriteError::InvalidInput(format!(
                "duplicate country code {}",
                src.code
            )));
        }
        widest = widest.max(src.width);
        narrowest = narrowest.min(src.width);
    }
    let width = requested_width.clamp(1, narrowest);
    let height =
        ((width as f64 / widest as f64 * REFERENCE_HEIGHT as f64).round() as u32).max(1);
    Ok(TargetDimensions { width, height })
}

/// Inter-icon padding: half the spread between the widest and narrowest
/// resized icon, rounded up. Zero when all icons resize to the same width.
pub fn compute_padding(resized_widths: &[u32]) -> u32 {
    let max = resized_widths.iter().copied().max().unwrap_or(0);
    let min = resized_widths.iter().copied().min().unwrap_or(0);
    (max - min).div_ceil(2)
}

/// Background-position percentages for one packed rect.
///
/// With `center` on, narrower flags are re-centered within the shared
/// `max_icon_width` column before the percentage is taken; otherwise rects
/// stay left-aligned as packed. A zero denominator on either axis (canvas
/// exactly one icon wide or one row tall) yields `0.0` for that axis rather
/// than a non-finite value.
pub fn background_position(
    rect: &Rect,
    metrics: &SheetMetrics,
    center: bool,
) -> (f64, f64) {
    let effective_x = rect.x as f64
        - if center {
            (metrics.max_icon_width as f64 - rect.w as f64) / 2.0
        } else {
            0.0
        };
    let denom_x = metrics.canvas_width as f64 - metrics.max_icon_width as f64;
    let x_percent = if denom_x == 0.0 {
        0.0
    } else {
        effective_x / denom_x * 100.0
    };
    let denom_y = metrics.canvas_height as f64 - metrics.icon_height as f64;
    let y_percent = if denom_y == 0.0 {
        0.0
    } else {
        rect.y as f64 / denom_y * 100.0
    };
    (x_percent, y_percent)
}

/// Background-size percentages for the base rule: canvas size expressed
/// relative to one icon column.
pub fn background_size(metrics: &SheetMetrics) -> (f64, f64) {
    (
        metrics.canvas_width as f64 / metrics.max_icon_width as f64 * 100.0,
        metrics.canvas_height as f64 / metrics.icon_height as f64 * 100.0,
    )
}

/// Derives one `FlagRule` per packed icon, in packer output order.
pub fn resolve_rules(layout: &SheetLayout, metrics: &SheetMetrics, center: bool) -> Vec<FlagRule> {
    layout
        .icons
        .iter()
        .map(|icon| {
            let (x_percent, y_percent) = background_position(&icon.rect, metrics, center);
            FlagRule {
                code: icon.code.clone(),
                x_percent,
                y_percent,
                width: icon.rect.w,
                height: icon.rect.h,
            }
        })
        .collect()
}
