use flag_sprite_core::error::FlagSpriteError;
use flag_sprite_core::{generate_sprite, layout_flags, FlagImage, SpriteConfig};
use image::{DynamicImage, Rgba, RgbaImage};

fn flag(code: &str, w: u32, h: u32, color: [u8; 4]) -> FlagImage {
    FlagImage {
        code: code.into(),
        image: DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba(color))),
    }
}

#[test]
fn generates_sheet_css_and_demo() {
    let inputs = vec![
        flag("FR", 300, 240, [0, 0, 255, 255]),
        flag("DE", 240, 240, [255, 0, 0, 255]),
        flag("IT", 300, 240, [0, 255, 0, 255]),
    ];
    let cfg = SpriteConfig::default();
    let out = generate_sprite(inputs, &cfg, "flag-sprite.png").expect("generate");

    // width clamped to the narrowest source (240 >= 60 so stays at 60),
    // height = round(60 / 300 * 240) = 48
    assert_eq!(out.target.width, 60);
    assert_eq!(out.target.height, 48);

    // sheet matches the layout canvas
    assert_eq!(out.sheet.dimensions(), (out.layout.width, out.layout.height));

    // every icon shares the target height
    for icon in &out.layout.icons {
        assert_eq!(icon.rect.h, 48);
    }

    assert_eq!(out.rules.len(), 3);
    assert!(out.css.contains(".flag-FR {"));
    assert!(out.css.contains(".flag-DE {"));
    assert!(out.css.contains(".flag-IT {"));
    assert!(out.css.contains("url('flag-sprite.png')"));
    assert!(out.demo_css.contains("url('sprite.png')"));
    assert!(out.demo_html.is_some());
}

#[test]
fn composited_pixels_come_from_the_source_flags() {
    let inputs = vec![
        flag("FR", 300, 240, [0, 0, 255, 255]),
        flag("DE", 240, 240, [255, 0, 0, 255]),
    ];
    let cfg = SpriteConfig::default();
    let out = generate_sprite(inputs, &cfg, "s.png").expect("generate");

    let fr = &out.layout.icons[0];
    assert_eq!(fr.code, "FR");
    let px = out.sheet.get_pixel(fr.rect.x + fr.rect.w / 2, fr.rect.y + fr.rect.h / 2);
    // uniform source stays uniform through the resize
    assert_eq!(px[3], 255);
    assert!(px[2] > 200 && px[0] < 50);

    let de = &out.layout.icons[1];
    let px = out.sheet.get_pixel(de.rect.x + de.rect.w / 2, de.rect.y + de.rect.h / 2);
    assert!(px[0] > 200 && px[2] < 50);
}

#[test]
fn demo_disabled_produces_no_html() {
    let inputs = vec![flag("FR", 300, 240, [0, 0, 255, 255])];
    let cfg = SpriteConfig::builder().demo(false).build();
    let out = generate_sprite(inputs, &cfg, "s.png").expect("generate");
    assert!(out.demo_html.is_none());
    assert!(!out.css.is_empty());
}

#[test]
fn empty_inputs_fail_fast() {
    let cfg = SpriteConfig::default();
    let err = generate_sprite(vec![], &cfg, "s.png").unwrap_err();
    assert!(matches!(err, FlagSpriteError::Empty));
}

#[test]
fn duplicate_codes_fail_before_compositing() {
    let inputs = vec![
        flag("FR", 300, 240, [0, 0, 255, 255]),
        flag("FR", 280, 240, [255, 0, 0, 255]),
    ];
    let cfg = SpriteConfig::default();
    let err = generate_sprite(inputs, &cfg, "s.png").unwrap_err();
    assert!(matches!(err, FlagSpriteError::InvalidInput(_)));

    let cfg = SpriteConfig::default();
    let err = layout_flags(
        vec![("FR".into(), 300, 240), ("FR".into(), 280, 240)],
        &cfg,
    )
    .unwrap_err();
    assert!(matches!(err, FlagSpriteError::InvalidInput(_)));
}

#[test]
fn invalid_config_is_rejected_before_layout() {
    let inputs = vec![flag("FR", 300, 240, [0, 0, 255, 255])];
    let cfg = SpriteConfig::builder().width(0).build();
    let err = generate_sprite(inputs, &cfg, "s.png").unwrap_err();
    assert!(matches!(err, FlagSpriteError::InvalidConfig(_)));
}

#[test]
fn layout_only_matches_the_worked_example() {
    // FR 300x240 resizes to 60x48, DE 240x240 to 48x48; padding = 6
    let cfg = SpriteConfig::default();
    let out = layout_flags(
        vec![("FR".into(), 300, 240), ("DE".into(), 240, 240)],
        &cfg,
    )
    .expect("layout");
    assert_eq!(out.target.width, 60);
    assert_eq!(out.target.height, 48);
    assert_eq!(out.layout.width, 114);
    assert_eq!(out.layout.height, 48);
    assert_eq!(out.metrics.max_icon_width, 60);

    let fr = &out.rules[0];
    assert_eq!(fr.x_percent, 0.0);
    assert_eq!(fr.y_percent, 0.0);
    let de = &out.rules[1];
    // (66 - (60 - 48) / 2) / (114 - 60) * 100
    assert!((de.x_percent - 60.0 / 54.0 * 100.0).abs() < 1e-9);
    assert_eq!(de.y_percent, 0.0);
}

#[test]
fn single_flag_layout_reports_zero_positions() {
    let cfg = SpriteConfig::default();
    let out = layout_flags(vec![("FR".into(), 300, 240)], &cfg).expect("layout");
    assert_eq!(out.rules.len(), 1);
    assert_eq!(out.rules[0].x_percent, 0.0);
    assert_eq!(out.rules[0].y_percent, 0.0);
}

#[test]
fn stats_report_full_occupancy_for_identical_flags() {
    let cfg = SpriteConfig::default();
    let out = layout_flags(
        vec![("FR".into(), 300, 240), ("IT".into(), 300, 240)],
        &cfg,
    )
    .expect("layout");
    // identical widths mean zero padding and a gap-free row
    let stats = out.layout.stats();
    assert_eq!(stats.num_icons, 2);
    assert_eq!(stats.used_area, stats.canvas_area);
    assert_eq!(stats.occupancy, 1.0);
}
