use serde::{Deserialize, Serialize};

/// Sprite generation configuration.
///
/// Built once at the entry point and validated before the layout resolver
/// runs; nothing downstream re-validates these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteConfig {
    /// Maximum flag width in pixels. All flags share one height but not
    /// necessarily one width; the effective width is clamped to
    /// `[1, narrowest source width]` per run.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Re-center narrower flags within the shared column when computing
    /// background positions.
    #[serde(default = "default_center")]
    pub center: bool,
    /// Prefix for emitted CSS class names.
    #[serde(default = "default_class_prefix")]
    pub class_prefix: String,
    /// Emit an extra `.{prefix}-{code}-{suffix}` rule per flag with that
    /// flag's own packed width/height.
    #[serde(default)]
    pub dimensions_classes: bool,
    /// Suffix for dimension class names.
    #[serde(default = "default_dimensions_suffix")]
    pub dimensions_suffix: String,
    /// Lowercase the alpha-2 code inside class names. File stems are still
    /// read case-sensitively.
    #[serde(default)]
    pub lowercase_alpha2: bool,
    /// Build the demo HTML document and demo stylesheet.
    #[serde(default = "default_demo")]
    pub demo: bool,
    /// Sheet width at which the shelf packer wraps to a new row.
    #[serde(default = "default_max_sheet_width")]
    pub max_sheet_width: u32,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            center: default_center(),
            class_prefix: default_class_prefix(),
            dimensions_classes: false,
            dimensions_suffix: default_dimensions_suffix(),
            lowercase_alpha2: false,
            demo: default_demo(),
            max_sheet_width: default_max_sheet_width(),
        }
    }
}

impl SpriteConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if:
    /// - `width` or `max_sheet_width` is zero
    /// - `class_prefix` or `dimensions_suffix` is empty
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::FlagSpriteError;

        if self.width == 0 {
            return Err(FlagSpriteError::InvalidConfig(
                "width must be at least 1".into(),
            ));
        }
        if self.max_sheet_width == 0 {
            return Err(FlagSpriteError::InvalidConfig(
                "max_sheet_width must be at least 1".into(),
            ));
        }
        if self.class_prefix.is_empty() {
            return Err(FlagSpriteError::InvalidConfig(
                "class_prefix must not be empty".into(),
            ));
        }
        if self.dimensions_suffix.is_empty() {
            return Err(FlagSpriteError::InvalidConfig(
                "dimensions_suffix must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Create a fluent builder for `SpriteConfig`.
    pub fn builder() -> SpriteConfigBuilder {
        SpriteConfigBuilder::new()
    }
}

fn default_width() -> u32 {
    60
}
fn default_center() -> bool {
    true
}
fn default_class_prefix() -> String {
    "flag".into()
}
fn default_dimensions_suffix() -> String {
    "dims".into()
}
fn default_demo() -> bool {
    true
}
fn default_max_sheet_width() -> u32 {
    1024
}

/// Builder for `SpriteConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct SpriteConfigBuilder {
    cfg: SpriteConfig,
}

impl SpriteConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: SpriteConfig::default(),
        }
    }
    pub fn width(mut self, v: u32) -> Self {
        self.cfg.width = v;
        self
    }
    pub fn center(mut self, v: bool) -> Self {
        self.cfg.center = v;
        self
    }
    pub fn class_prefix(mut self, v: impl Into<String>) -> Self {
        self.cfg.class_prefix = v.into();
        self
    }
    pub fn dimensions_classes(mut self, v: bool) -> Self {
        self.cfg.dimensions_classes = v;
        self
    }
    pub fn dimensions_suffix(mut self, v: impl Into<String>) -> Self {
        self.cfg.dimensions_suffix = v.into();
        self
    }
    pub fn lowercase_alpha2(mut self, v: bool) -> Self {
        self.cfg.lowercase_alpha2 = v;
        self
    }
    pub fn demo(mut self, v: bool) -> Self {
        self.cfg.demo = v;
        self
    }
    pub fn max_sheet_width(mut self, v: u32) -> Self {
        self.cfg.max_sheet_width = v;
        self
    }
    pub fn build(self) -> SpriteConfig {
        self.cfg
    }
}
