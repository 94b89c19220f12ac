use crate::model::{SheetLayout, SheetMetrics};
use serde_json::{json, Value};

/// Serialize a layout as JSON: frames keyed by country code plus sheet
/// metrics. Suitable for external tooling consuming placements directly.
pub fn to_json(layout: &SheetLayout, metrics: &SheetMetrics) -> Value {
    let mut frames = serde_json::Map::new();
    for icon in &layout.icons {
        frames.insert(
            icon.code.clone(),
            json!({"x": icon.rect.x, "y": icon.rect.y, "w": icon.rect.w, "h": icon.rect.h}),
        );
    }
    json!({
        "frames": frames,
        "meta": {
            "app": "flag-sprite",
            "version": env!("CARGO_PKG_VERSION"),
            "size": {"w": layout.width, "h": layout.height},
            "iconHeight": metrics.icon_height,
            "maxIconWidth": metrics.max_icon_width,
        }
    })
}
