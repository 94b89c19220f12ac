//! Core library for assembling flag icons into a CSS sprite sheet.
//!
//! - Layout: uniform target height from source metadata, shelf packing,
//!   background-position percentages per flag
//! - Stylesheet: base rule + one rule per flag, optional dimension classes,
//!   optional demo document
//! - Pipeline: `generate_sprite` takes in-memory images and returns the
//!   composited sheet plus assembled CSS/HTML; `layout_flags` computes
//!   placements from sizes alone.
//!
//! Quick example:
//! ```ignore
//! use image::ImageReader;
//! use flag_sprite_core::{FlagImage, SpriteConfig, generate_sprite};
//! # fn main() -> anyhow::Result<()> {
//! let fr = ImageReader::open("FR.png")?.decode()?;
//! let de = ImageReader::open("DE.png")?.decode()?;
//! let inputs = vec![
//!     FlagImage { code: "FR".into(), image: fr },
//!     FlagImage { code: "DE".into(), image: de },
//! ];
//! let cfg = SpriteConfig { width: 60, ..Default::default() };
//! let out = generate_sprite(inputs, &cfg, "flag-sprite.png")?;
//! println!("flags: {}", out.rules.len());
//! # Ok(()) }
//! ```

pub mod compositing;
pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod packer;
pub mod pipeline;
pub mod stylesheet;

pub use config::*;
pub use error::*;
pub use export::*;
pub use layout::*;
pub use model::*;
pub use packer::*;
pub use pipeline::*;
pub use stylesheet::*;

/// Convenience prelude for common types and functions.
/// Importing `flag_sprite_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{SpriteConfig, SpriteConfigBuilder};
    pub use crate::layout::{
        background_position, background_size, compute_padding, compute_target_dimensions,
        TargetDimensions, REFERENCE_HEIGHT,
    };
    pub use crate::model::{
        FlagRule, PackedIcon, Rect, SheetLayout, SheetMetrics, SheetStats, SourceImage,
    };
    pub use crate::packer::{pack_icons, Packer, ShelfPacker};
    pub use crate::{generate_sprite, layout_flags, FlagImage, LayoutOutput, SpriteOutput};
}
