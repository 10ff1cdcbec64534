// Pure page-geometry helpers. No web-sys here so host tests can include this
// file directly.

/// Scroll progress as a 0-100 percentage. Pages that cannot scroll report 0.
#[inline]
pub fn scroll_percent(scroll_y: f64, scroll_height: f64, inner_height: f64) -> f32 {
    let total = scroll_height - inner_height;
    if total > 0.0 {
        ((scroll_y / total) * 100.0).clamp(0.0, 100.0) as f32
    } else {
        0.0
    }
}

/// CSS `top` for the scroll handle: `p%` of the track, pulled back by the
/// same fraction of the handle height so it stops flush with the bottom.
pub fn handle_top_css(percent: f32, handle_height_px: f32) -> String {
    let p = percent.clamp(0.0, 100.0);
    let pull = p / 100.0 * handle_height_px;
    format!("calc({:.3}% - {:.3}px)", p, pull)
}

/// Backing size for a canvas in CSS pixels, never zero.
#[inline]
pub fn canvas_px(css: f64) -> u32 {
    if css.is_finite() && css > 1.0 {
        css.floor() as u32
    } else {
        1
    }
}
