use crate::layout;
use sparkfall_core::SurfaceSize;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", id, e))
}

/// Window inner size in CSS pixels.
pub fn viewport_size(window: &web::Window) -> SurfaceSize {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    SurfaceSize::new(layout::canvas_px(w), layout::canvas_px(h))
}

/// Set the canvas backing store; only touches it when the size changed since
/// assigning width/height wipes the canvas.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, size: SurfaceSize) {
    if canvas.width() != size.width {
        canvas.set_width(size.width.max(1));
    }
    if canvas.height() != size.height {
        canvas.set_height(size.height.max(1));
    }
}

/// Current scroll progress of the document, 0-100.
pub fn document_scroll_percent(window: &web::Window, document: &web::Document) -> f32 {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let inner_h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let scroll_h = document
        .document_element()
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    layout::scroll_percent(scroll_y, scroll_h, inner_h)
}
