// Pure conversions from DOM event values to engine input. No web-sys types
// here so the host test suite can include this file directly.

/// `WheelEvent.deltaMode` values.
pub const DOM_DELTA_PIXEL: u32 = 0;
pub const DOM_DELTA_LINE: u32 = 1;
pub const DOM_DELTA_PAGE: u32 = 2;

/// Pixels per wheel "line" (Firefox reports line deltas for mouse wheels).
pub const LINE_HEIGHT_PX: f64 = 16.0;

/// Share of a vertical wheel delta turned into horizontal page scroll.
pub const WHEEL_TO_HORIZONTAL: f64 = 0.5;

#[inline]
pub fn wheel_delta_pixels(delta: f64, delta_mode: u32, page_height: f64) -> f64 {
    match delta_mode {
        DOM_DELTA_LINE => delta * LINE_HEIGHT_PX,
        DOM_DELTA_PAGE => delta * page_height.max(1.0),
        _ => delta,
    }
}

/// Pointer position relative to the viewport centre, each axis in [-0.5, 0.5].
///
/// `None` for a zero-sized viewport.
#[inline]
pub fn normalized_pointer(client_x: f64, client_y: f64, width: f64, height: f64) -> Option<(f64, f64)> {
    if !(width > 0.0 && height > 0.0) {
        return None;
    }
    let x = (client_x / width).clamp(0.0, 1.0) - 0.5;
    let y = (client_y / height).clamp(0.0, 1.0) - 0.5;
    Some((x, y))
}

/// Horizontal page scroll expressed in viewport widths (one chapter per width).
#[inline]
pub fn chapter_scroll_position(scroll_x: f64, viewport_width: f64) -> Option<f64> {
    (viewport_width > 0.0 && scroll_x.is_finite()).then(|| scroll_x / viewport_width)
}

/// Horizontal scroll for a vertical wheel delta (pixels) on a chapter strip.
///
/// `None` when the page is not wider than the viewport, so the wheel keeps
/// its default behaviour.
#[inline]
pub fn horizontal_scroll_step(delta_y: f64, scroll_width: f64, viewport_width: f64) -> Option<f64> {
    (scroll_width > viewport_width && delta_y.is_finite()).then(|| delta_y * WHEEL_TO_HORIZONTAL)
}

