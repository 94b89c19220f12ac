use crate::config::SpriteConfig;
use crate::error::{FlagSpriteError, Result};
use crate::layout::{
    compute_padding, compute_target_dimensions, resolve_rules, TargetDimensions,
};
use crate::model::{FlagRule, SheetLayout, SheetMetrics, SourceImage};
use crate::packer::pack_icons;
use crate::stylesheet::{render_demo_html, render_stylesheet, DEMO_SPRITE_NAME};
use image::{imageops::FilterType, DynamicImage, GenericImageView, RgbaImage};
use std::collections::HashMap;
use tracing::instrument;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// In-memory flag to pack (country code + decoded image).
#[derive(Debug)]
pub struct FlagImage {
    pub code: String,
    pub image: DynamicImage,
}

/// Output of a generation run: composited sheet, layout, and assembled text.
///
/// `css` and `demo_css` are structurally identical except for the sprite URL
/// they reference; `demo_html` is present only when demo output is enabled.
#[derive(Debug)]
pub struct SpriteOutput {
    pub sheet: RgbaImage,
    pub layout: SheetLayout,
    pub metrics: SheetMetrics,
    pub target: TargetDimensions,
    pub rules: Vec<FlagRule>,
    pub css: String,
    pub demo_css: String,
    pub demo_html: Option<String>,
}

/// Output of a layout-only run: placements and rules, no pixel data.
#[derive(Debug)]
pub struct LayoutOutput {
    pub layout: SheetLayout,
    pub metrics: SheetMetrics,
    pub target: TargetDimensions,
    pub rules: Vec<FlagRule>,
}

#[instrument(skip_all)]
/// Generates the sprite sheet and stylesheets for `inputs` using `cfg`.
///
/// `sprite_url` is the URL written into the main stylesheet's base rule; the
/// demo stylesheet always references its sibling `sprite.png`.
///
/// Resizing runs per image with no shared state (in parallel with the
/// `parallel` feature); packing and rule derivation start only once every
/// image has been resized. A failure at any step aborts the whole run.
pub fn generate_sprite(
    inputs: Vec<FlagImage>,
    cfg: &SpriteConfig,
    sprite_url: &str,
) -> Result<SpriteOutput> {
    cfg.validate()?;
    if inputs.is_empty() {
        return Err(FlagSpriteError::Empty);
    }

    let sources: Vec<SourceImage> = inputs
        .iter()
        .map(|inp| {
            let (w, h) = inp.image.dimensions();
            SourceImage {
                code: inp.code.clone(),
                width: w,
                height: h,
            }
        })
        .collect();
    let target = compute_target_dimensions(&sources, cfg.width)?;

    let resized = resize_inputs(&inputs, target.height);

    let widths: Vec<u32> = resized.iter().map(|(_, img)| img.width()).collect();
    let padding = compute_padding(&widths);
    let items: Vec<(String, u32)> = resized
        .iter()
        .map(|(code, img)| (code.clone(), img.width()))
        .collect();
    let layout = pack_icons(&items, target.height, padding, cfg.max_sheet_width)?;

    let metrics = SheetMetrics {
        canvas_width: layout.width,
        canvas_height: layout.height,
        max_icon_width: widths.iter().copied().max().unwrap_or(0),
        icon_height: target.height,
    };
    let rules = resolve_rules(&layout, &metrics, cfg.center);
    let css = render_stylesheet(&rules, &metrics, target.width, sprite_url, cfg);
    let demo_css = render_stylesheet(&rules, &metrics, target.width, DEMO_SPRITE_NAME, cfg);
    let demo_html = cfg
        .demo
        .then(|| render_demo_html(&rules, &metrics, cfg));

    let resized_map: HashMap<&str, &RgbaImage> = resized
        .iter()
        .map(|(code, img)| (code.as_str(), img))
        .collect();
    let mut sheet = RgbaImage::new(layout.width, layout.height);
    for icon in &layout.icons {
        if let Some(img) = resized_map.get(icon.code.as_str()) {
            crate::compositing::blit_rgba(img, &mut sheet, icon.rect.x, icon.rect.y);
        }
    }

    Ok(SpriteOutput {
        sheet,
        layout,
        metrics,
        target,
        rules,
        css,
        demo_css,
        demo_html,
    })
}

/// Computes placements and rules from `(code, natural_width, natural_height)`
/// triples without decoding or compositing any pixels. Resized widths are
/// derived arithmetically from the shared target height.
pub fn layout_flags(sizes: Vec<(String, u32, u32)>, cfg: &SpriteConfig) -> Result<LayoutOutput> {
    cfg.validate()?;
    let sources: Vec<SourceImage> = sizes
        .iter()
        .map(|(code, w, h)| SourceImage {
            code: code.clone(),
            width: *w,
            height: *h,
        })
        .collect();
    let target = compute_target_dimensions(&sources, cfg.width)?;

    let items: Vec<(String, u32)> = sources
        .iter()
        .map(|src| (src.code.clone(), scaled_width(src.width, src.height, target.height)))
        .collect();
    let widths: Vec<u32> = items.iter().map(|(_, w)| *w).collect();
    let padding = compute_padding(&widths);
    let layout = pack_icons(&items, target.height, padding, cfg.max_sheet_width)?;

    let metrics = SheetMetrics {
        canvas_width: layout.width,
        canvas_height: layout.height,
        max_icon_width: widths.iter().copied().max().unwrap_or(0),
        icon_height: target.height,
    };
    let rules = resolve_rules(&layout, &metrics, cfg.center);
    Ok(LayoutOutput {
        layout,
        metrics,
        target,
        rules,
    })
}

/// Width of an icon after resizing to `target_height`, aspect preserved.
fn scaled_width(natural_w: u32, natural_h: u32, target_height: u32) -> u32 {
    ((natural_w as f64 * target_height as f64 / natural_h as f64).round() as u32).max(1)
}

fn resize_one(inp: &FlagImage, target_height: u32) -> (String, RgbaImage) {
    let (w, h) = inp.image.dimensions();
    let new_w = scaled_width(w, h, target_height);
    let resized = inp
        .image
        .resize_exact(new_w, target_height, FilterType::Lanczos3);
    (inp.code.clone(), resized.to_rgba8())
}

#[cfg(feature = "parallel")]
fn resize_inputs(inputs: &[FlagImage], target_height: u32) -> Vec<(String, RgbaImage)> {
    inputs
        .par_iter()
        .map(|inp| resize_one(inp, target_height))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn resize_inputs(inputs: &[FlagImage], target_height: u32) -> Vec<(String, RgbaImage)> {
    inputs
        .iter()
        .map(|inp| resize_one(inp, target_height))
        .collect()
}
