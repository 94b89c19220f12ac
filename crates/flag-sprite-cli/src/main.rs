use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use flag_sprite_core::stylesheet::{DEMO_CSS_NAME, DEMO_SPRITE_NAME};
use flag_sprite_core::{generate_sprite, layout_flags, FlagImage, SpriteConfig};
use globset::{Glob, GlobSetBuilder};
use image::{DynamicImage, ImageReader};
use serde::Deserialize;
use tracing::info;
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "flag-sprite",
    about = "Assemble flag images into a sprite sheet plus CSS",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --no-progress or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the sprite sheet, stylesheets, and demo page
    Generate(GenerateArgs),
    /// Layout-only export (no PNG): compute placements and export JSON
    Layout(GenerateArgs),
}

#[derive(Parser, Debug, Clone)]
struct GenerateArgs {
    // Input/Output
    /// Directory of source flag images (file stems become country codes)
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Where to save the generated sprite
    #[arg(long, default_value = "out", help_heading = "Input/Output")]
    sprite_destination: PathBuf,
    /// Where to save the generated CSS
    #[arg(long, default_value = "out", help_heading = "Input/Output")]
    css_destination: PathBuf,
    /// Name for the generated sprite png file
    #[arg(long, default_value = "flag-sprite", help_heading = "Input/Output")]
    sprite_file_name: String,
    /// Name for the generated css file
    #[arg(long, default_value = "flags", help_heading = "Input/Output")]
    css_file_name: String,
    /// Background url for the sprite (excluding the file name)
    #[arg(long, help_heading = "Input/Output")]
    sprite_url: Option<String>,
    /// YAML config file path (overrides layout-related options)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,

    // Layout
    /// Maximum flag width (all flags share one height, not one width)
    #[arg(long, default_value_t = 60, help_heading = "Layout")]
    width: u32,
    /// Center each flag horizontally within the shared column
    #[arg(long, default_value_t = true, action=ArgAction::Set, help_heading = "Layout")]
    center: bool,
    /// Sheet width at which packing wraps to a new row
    #[arg(long, default_value_t = 1024, help_heading = "Layout")]
    max_sheet_width: u32,

    // CSS
    /// Prefix for css classes
    #[arg(long, default_value = "flag", help_heading = "CSS")]
    class_prefix: String,
    /// Add per-flag dimensions classes
    #[arg(long, default_value_t = false, help_heading = "CSS")]
    dimensions_classes: bool,
    /// Suffix for dimensions classes
    #[arg(long, default_value = "dims", help_heading = "CSS")]
    dimensions_suffix: String,
    /// Lowercase the alpha-2 code in css class names
    #[arg(long, default_value_t = false, help_heading = "CSS")]
    lowercase_alpha2: bool,

    // Demo
    /// Create a demo page
    #[arg(long, default_value_t = true, action=ArgAction::Set, help_heading = "Demo")]
    demo: bool,
    /// Destination for the demo page. Has no effect when --demo false
    #[arg(long, default_value = "flags-demo", help_heading = "Demo")]
    demo_destination: PathBuf,

    // Export
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
    /// Dry run: compute the sprite and stats but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Generate(args) => run_generate(args, cli.progress && !cli.quiet),
        Commands::Layout(args) => run_layout(args),
    }
}

fn run_generate(cli: &GenerateArgs, show_progress: bool) -> anyhow::Result<()> {
    let cfg = build_config(cli)?;

    if cli.print_config {
        println!("{}", render_config(&cfg, &cli.print_config_format)?);
        return Ok(());
    }

    let paths = gather_paths(&cli.input, &cli.include, &cli.exclude)?;
    let inputs = load_images_with_progress(&paths, show_progress)?;
    info!(count = inputs.len(), "loaded source images");

    let sprite_file = format!("{}.png", cli.sprite_file_name);
    let sprite_path = cli.sprite_destination.join(&sprite_file);
    let sprite_url = match &cli.sprite_url {
        Some(url) => format!("{}/{}", url.trim_end_matches('/'), sprite_file),
        None => sprite_path.to_string_lossy().replace('\\', "/"),
    };

    let out = generate_sprite(inputs, &cfg, &sprite_url)?;

    let stats = out.layout.stats();
    info!(
        flags = out.rules.len(),
        sheet_width = out.layout.width,
        sheet_height = out.layout.height,
        icon_height = out.target.height,
        occupancy = format!("{:.2}%", stats.occupancy * 100.0),
        "sprite assembled"
    );

    if cli.dry_run {
        println!("{}", stats.summary());
        return Ok(());
    }

    fs::create_dir_all(&cli.sprite_destination)
        .with_context(|| format!("create {}", cli.sprite_destination.display()))?;
    fs::create_dir_all(&cli.css_destination)
        .with_context(|| format!("create {}", cli.css_destination.display()))?;

    out.sheet
        .save(&sprite_path)
        .with_context(|| format!("write {}", sprite_path.display()))?;
    info!(?sprite_path, "sprite written");

    let css_path = cli
        .css_destination
        .join(format!("{}.css", cli.css_file_name));
    fs::write(&css_path, &out.css).with_context(|| format!("write {}", css_path.display()))?;
    info!(?css_path, "css written");

    if let Some(html) = &out.demo_html {
        fs::create_dir_all(&cli.demo_destination)
            .with_context(|| format!("create {}", cli.demo_destination.display()))?;
        let html_path = cli.demo_destination.join("index.html");
        fs::write(&html_path, html).with_context(|| format!("write {}", html_path.display()))?;
        let demo_css_path = cli.demo_destination.join(DEMO_CSS_NAME);
        fs::write(&demo_css_path, &out.demo_css)
            .with_context(|| format!("write {}", demo_css_path.display()))?;
        let demo_sprite_path = cli.demo_destination.join(DEMO_SPRITE_NAME);
        out.sheet
            .save(&demo_sprite_path)
            .with_context(|| format!("write {}", demo_sprite_path.display()))?;
        info!(?html_path, "demo written");
    }
    Ok(())
}

fn run_layout(cli: &GenerateArgs) -> anyhow::Result<()> {
    let cfg = build_config(cli)?;

    if cli.print_config {
        println!("{}", render_config(&cfg, &cli.print_config_format)?);
        return Ok(());
    }

    let paths = gather_paths(&cli.input, &cli.include, &cli.exclude)?;
    let mut sizes: Vec<(String, u32, u32)> = Vec::with_capacity(paths.len());
    for p in &paths {
        let (w, h) = ImageReader::open(p)?
            .with_guessed_format()?
            .into_dimensions()
            .with_context(|| format!("read dimensions of {}", p.display()))?;
        sizes.push((code_for(p), w, h));
    }
    info!(count = sizes.len(), "read source dimensions");

    let out = layout_flags(sizes, &cfg)?;
    let json_value = flag_sprite_core::to_json(&out.layout, &out.metrics);
    let json = serde_json::to_string_pretty(&json_value)?;
    if cli.dry_run {
        println!("{}", json);
        return Ok(());
    }
    fs::create_dir_all(&cli.sprite_destination)
        .with_context(|| format!("create {}", cli.sprite_destination.display()))?;
    let json_path = cli
        .sprite_destination
        .join(format!("{}.json", cli.sprite_file_name));
    fs::write(&json_path, json).with_context(|| format!("write {}", json_path.display()))?;
    info!(?json_path, flags = out.rules.len(), "layout written");
    Ok(())
}

fn render_config(cfg: &SpriteConfig, format: &str) -> anyhow::Result<String> {
    Ok(match format {
        "yaml" => serde_yaml::to_string(cfg)?,
        _ => serde_json::to_string_pretty(cfg)?,
    })
}

fn build_config(cli: &GenerateArgs) -> anyhow::Result<SpriteConfig> {
    let base = SpriteConfig {
        width: cli.width,
        center: cli.center,
        class_prefix: cli.class_prefix.clone(),
        dimensions_classes: cli.dimensions_classes,
        dimensions_suffix: cli.dimensions_suffix.clone(),
        lowercase_alpha2: cli.lowercase_alpha2,
        demo: cli.demo,
        max_sheet_width: cli.max_sheet_width,
    };
    let cfg = if let Some(path) = &cli.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)?;
        y.into_sprite_config(base)
    } else {
        base
    };
    cfg.validate()?;
    Ok(cfg)
}

fn gather_paths(
    path: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    let mut inc_set = None;
    if !include.is_empty() {
        let mut b = GlobSetBuilder::new();
        for pat in include {
            b.add(Glob::new(pat)?);
        }
        inc_set = Some(b.build()?);
    }
    let mut exc_set = None;
    if !exclude.is_empty() {
        let mut b = GlobSetBuilder::new();
        for pat in exclude {
            b.add(Glob::new(pat)?);
        }
        exc_set = Some(b.build()?);
    }
    let mut list: Vec<PathBuf> = Vec::new();
    if path.is_file() {
        if !should_skip(path, inc_set.as_ref(), exc_set.as_ref()) && is_image(path) {
            list.push(path.to_path_buf());
        }
    } else {
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && !should_skip(p, inc_set.as_ref(), exc_set.as_ref()) && is_image(p) {
                list.push(p.to_path_buf());
            }
        }
    }
    // one run, one order
    list.sort();
    Ok(list)
}

fn should_skip(
    p: &Path,
    include: Option<&globset::GlobSet>,
    exclude: Option<&globset::GlobSet>,
) -> bool {
    let s = p.to_string_lossy().replace('\\', "/");
    if let Some(ex) = exclude {
        if ex.is_match(&s) {
            return true;
        }
    }
    if let Some(inc) = include {
        if !inc.is_match(&s) {
            return true;
        }
    }
    false
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "png" | "jpg" | "jpeg")
    )
}

/// Country code for a source file: the file stem, case preserved as read.
fn code_for(p: &Path) -> String {
    p.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}

fn load_images_with_progress(paths: &[PathBuf], progress: bool) -> anyhow::Result<Vec<FlagImage>> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress {
        let b = ProgressBar::new(paths.len() as u64);
        b.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} loading {pos}/{len} [{elapsed_precise}] {wide_msg}",
            )
            .unwrap(),
        );
        Some(b)
    } else {
        None
    };
    let mut list = Vec::with_capacity(paths.len());
    for p in paths {
        let msg = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if let Some(b) = &bar {
            b.set_message(msg.to_string());
        }
        // one unreadable source aborts the whole run; no partial sprite
        let img = load_image(p).with_context(|| format!("read source image {}", p.display()))?;
        list.push(FlagImage {
            code: code_for(p),
            image: img,
        });
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(list)
}

fn load_image(p: &Path) -> anyhow::Result<DynamicImage> {
    let img = ImageReader::open(p)?.with_guessed_format()?.decode()?;
    Ok(img)
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    width: Option<u32>,
    center: Option<bool>,
    class_prefix: Option<String>,
    dimensions_classes: Option<bool>,
    dimensions_suffix: Option<String>,
    lowercase_alpha2: Option<bool>,
    demo: Option<bool>,
    max_sheet_width: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_source_aborts_loading() {
        let dir = std::env::temp_dir().join("flag-sprite-unreadable-source");
        fs::create_dir_all(&dir).unwrap();
        let good = dir.join("FR.png");
        image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 255, 255]))
            .save(&good)
            .unwrap();
        let bad = dir.join("XX.png");
        fs::write(&bad, b"not a png").unwrap();

        let result = load_images_with_progress(&[good.clone(), bad.clone()], false);
        fs::remove_file(&good).ok();
        fs::remove_file(&bad).ok();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("XX.png"));
    }

    #[test]
    fn config_renders_as_json_and_yaml() {
        let cfg = SpriteConfig::default();
        let json = render_config(&cfg, "json").unwrap();
        assert!(serde_json::from_str::<SpriteConfig>(&json).is_ok());
        let yaml = render_config(&cfg, "yaml").unwrap();
        assert!(serde_yaml::from_str::<SpriteConfig>(&yaml).is_ok());
    }
}

impl YamlConfig {
    fn into_sprite_config(self, mut cfg: SpriteConfig) -> SpriteConfig {
        if let Some(v) = self.width {
            cfg.width = v;
        }
        if let Some(v) = self.center {
            cfg.center = v;
        }
        if let Some(v) = self.class_prefix {
            cfg.class_prefix = v;
        }
        if let Some(v) = self.dimensions_classes {
            cfg.dimensions_classes = v;
        }
        if let Some(v) = self.dimensions_suffix {
            cfg.dimensions_suffix = v;
        }
        if let Some(v) = self.lowercase_alpha2 {
            cfg.lowercase_alpha2 = v;
        }
        if let Some(v) = self.demo {
            cfg.demo = v;
        }
        if let Some(v) = self.max_sheet_width {
            cfg.max_sheet_width = v;
        }
        cfg
    }
}
