use crate::config::SpriteConfig;
use crate::layout::background_size;
use crate::model::{FlagRule, SheetMetrics};

/// Sprite file name referenced from the demo stylesheet.
pub const DEMO_SPRITE_NAME: &str = "sprite.png";
/// Stylesheet file name referenced from the demo document.
pub const DEMO_CSS_NAME: &str = "flags.css";

const GENERATOR_BANNER: &str = "/**\n * GENERATED BY flag-sprite\n */";

/// One CSS rule under construction: selector plus ordered declarations.
///
/// Rendering always terminates the block, so assembled stylesheets are
/// well-formed even with zero flags.
#[derive(Debug, Clone)]
pub struct CssRule {
    selector: String,
    declarations: Vec<(String, String)>,
}

impl CssRule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
        }
    }

    pub fn declaration(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.declarations.push((property.into(), value.into()));
        self
    }

    pub fn render(&self) -> String {
        let mut out = format!(".{} {{", self.selector);
        for (property, value) in &self.declarations {
            out.push_str(&format!("\n  {}: {};", property, value));
        }
        out.push_str("\n}");
        out
    }
}

/// Formats a percentage value with up to four decimals, trailing zeros
/// trimmed (`52.5`, `0`, `33.3333`).
pub fn fmt_percent(v: f64) -> String {
    let s = format!("{:.4}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    // normalize negative zero
    if s == "-0" { "0".into() } else { s.to_string() }
}

/// Class name for one flag: `{prefix}-{code}`, code lowercased on request.
pub fn class_name(cfg: &SpriteConfig, code: &str) -> String {
    if cfg.lowercase_alpha2 {
        format!("{}-{}", cfg.class_prefix, code.to_lowercase())
    } else {
        format!("{}-{}", cfg.class_prefix, code)
    }
}

/// Renders the full stylesheet: base rule, shared dimensions rule, then one
/// position rule per flag (plus optional per-flag dimension rules), in the
/// packer's output order.
pub fn render_stylesheet(
    rules: &[FlagRule],
    metrics: &SheetMetrics,
    target_width: u32,
    sprite_url: &str,
    cfg: &SpriteConfig,
) -> String {
    let (size_x, size_y) = background_size(metrics);
    let base = CssRule::new(cfg.class_prefix.as_str())
        .declaration("display", "inline-block")
        .declaration("background", format!("url('{}') no-repeat", sprite_url))
        .declaration(
            "background-size",
            format!("{}% {}%", fmt_percent(size_x), fmt_percent(size_y)),
        )
        .declaration("vertical-align", "middle")
        .declaration("overflow", "hidden");
    let shared_dims = CssRule::new(format!(
        "{}-{}",
        cfg.class_prefix, cfg.dimensions_suffix
    ))
    .declaration("width", format!("{}px", target_width))
    .declaration("height", format!("{}px", metrics.icon_height));

    let mut out = format!(
        "{}\n\n{}\n\n{}",
        GENERATOR_BANNER,
        base.render(),
        shared_dims.render()
    );
    for rule in rules {
        let name = class_name(cfg, &rule.code);
        let flag = CssRule::new(name.as_str()).declaration(
            "background-position",
            format!(
                "{}% {}%",
                fmt_percent(rule.x_percent),
                fmt_percent(rule.y_percent)
            ),
        );
        out.push_str("\n\n");
        out.push_str(&flag.render());
        if cfg.dimensions_classes {
            let dims = CssRule::new(format!("{}-{}", name, cfg.dimensions_suffix))
                .declaration("width", format!("{}px", rule.width))
                .declaration("height", format!("{}px", rule.height));
            out.push_str("\n\n");
            out.push_str(&dims.render());
        }
    }
    out
}

/// Renders the demo document: one `<div>` per flag in packer output order,
/// each wrapping an icon element and a caption naming its class.
pub fn render_demo_html(rules: &[FlagRule], metrics: &SheetMetrics, cfg: &SpriteConfig) -> String {
    let mut html = format!(
        "<!DOCTYPE html><html><head><title>Flags Sprite</title>\
         <link rel=\"stylesheet\" type=\"text/css\" href=\"{}\">\
         <style>body {{ font-family: sans-serif; text-align: center; margin: 5px; }} \
         body > div {{ display: inline-block; margin: 5px; }} \
         .{} {{ width: {}px; height: {}px; }}</style></head>\
         <body><h1>Created by flag-sprite</h1>",
        DEMO_CSS_NAME, cfg.class_prefix, metrics.max_icon_width, metrics.icon_height
    );
    for rule in rules {
        let name = class_name(cfg, &rule.code);
        html.push_str(&format!(
            "<div><div class=\"{} {}\"></div><p>{}</p></div>",
            cfg.class_prefix, name, name
        ));
    }
    html.push_str("</body></html>");
    html
}
