use flag_sprite_core::error::FlagSpriteError;
use flag_sprite_core::layout::{
    background_position, background_size, compute_padding, compute_target_dimensions,
};
use flag_sprite_core::model::{Rect, SheetMetrics, SourceImage};

fn src(code: &str, w: u32, h: u32) -> SourceImage {
    SourceImage {
        code: code.into(),
        width: w,
        height: h,
    }
}

#[test]
fn target_width_clamped_to_narrowest_source() {
    let sources = vec![src("FR", 120, 240), src("DE", 80, 240), src("NP", 300, 240)];
    let dims = compute_target_dimensions(&sources, 200).expect("dims");
    assert_eq!(dims.width, 80);
    // round(80 / 300 * 240) = 64
    assert_eq!(dims.height, 64);
}

#[test]
fn target_width_never_below_one() {
    let sources = vec![src("FR", 300, 240)];
    let dims = compute_target_dimensions(&sources, 0).expect("dims");
    assert_eq!(dims.width, 1);
    assert!(dims.height >= 1);
}

#[test]
fn target_height_invariant_under_permutation() {
    let a = vec![src("FR", 300, 240), src("DE", 240, 240), src("CH", 250, 240)];
    let b = vec![src("CH", 250, 240), src("FR", 300, 240), src("DE", 240, 240)];
    let da = compute_target_dimensions(&a, 60).expect("dims");
    let db = compute_target_dimensions(&b, 60).expect("dims");
    assert_eq!(da, db);
}

#[test]
fn empty_source_set_is_rejected() {
    let err = compute_target_dimensions(&[], 60).unwrap_err();
    assert!(matches!(err, FlagSpriteError::Empty));
}

#[test]
fn duplicate_codes_are_rejected() {
    // identical file stems in different directories must not collapse
    let sources = vec![src("FR", 300, 240), src("DE", 240, 240), src("FR", 280, 240)];
    let err = compute_target_dimensions(&sources, 60).unwrap_err();
    assert!(matches!(err, FlagSpriteError::InvalidInput(_)));
    assert!(err.to_string().contains("FR"));
}

#[test]
fn zero_dimension_source_is_rejected() {
    let sources = vec![src("FR", 300, 240), src("XX", 0, 240)];
    let err = compute_target_dimensions(&sources, 60).unwrap_err();
    assert!(matches!(err, FlagSpriteError::InvalidInput(_)));
}

#[test]
fn padding_is_half_the_width_spread_rounded_up() {
    assert_eq!(compute_padding(&[100, 91]), 5);
    assert_eq!(compute_padding(&[60, 60, 60]), 0);
    assert_eq!(compute_padding(&[48]), 0);
    assert_eq!(compute_padding(&[60, 48]), 6);
}

#[test]
fn centered_full_width_rect_sits_at_origin() {
    let metrics = SheetMetrics {
        canvas_width: 300,
        canvas_height: 40,
        max_icon_width: 100,
        icon_height: 40,
    };
    let (x, y) = background_position(&Rect::new(0, 0, 100, 40), &metrics, true);
    assert_eq!(x, 0.0);
    assert_eq!(y, 0.0);
}

#[test]
fn narrower_rect_is_recentered_in_the_shared_column() {
    // FR at {0,0,100,40}, DE at {110,0,90,40}, canvas 300x40
    let metrics = SheetMetrics {
        canvas_width: 300,
        canvas_height: 40,
        max_icon_width: 100,
        icon_height: 40,
    };
    let (fr_x, fr_y) = background_position(&Rect::new(0, 0, 100, 40), &metrics, true);
    assert_eq!((fr_x, fr_y), (0.0, 0.0));
    let (de_x, de_y) = background_position(&Rect::new(110, 0, 90, 40), &metrics, true);
    assert_eq!(de_x, 52.5);
    assert_eq!(de_y, 0.0);
}

#[test]
fn uncentered_rect_stays_left_aligned() {
    let metrics = SheetMetrics {
        canvas_width: 300,
        canvas_height: 40,
        max_icon_width: 100,
        icon_height: 40,
    };
    let (x, _) = background_position(&Rect::new(110, 0, 90, 40), &metrics, false);
    assert_eq!(x, 55.0);
}

#[test]
fn single_icon_sheet_does_not_divide_by_zero() {
    // canvas exactly one icon wide and one row tall
    let metrics = SheetMetrics {
        canvas_width: 60,
        canvas_height: 48,
        max_icon_width: 60,
        icon_height: 48,
    };
    let (x, y) = background_position(&Rect::new(0, 0, 60, 48), &metrics, true);
    assert_eq!((x, y), (0.0, 0.0));
    assert!(x.is_finite() && y.is_finite());
}

#[test]
fn background_size_relates_canvas_to_one_icon() {
    let metrics = SheetMetrics {
        canvas_width: 300,
        canvas_height: 40,
        max_icon_width: 100,
        icon_height: 40,
    };
    let (sx, sy) = background_size(&metrics);
    assert_eq!(sx, 300.0);
    assert_eq!(sy, 100.0);
}
