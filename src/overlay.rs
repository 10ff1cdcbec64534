use crate::constants::*;
use crate::layout;
use sparkfall_core::constants::INDICATOR_HEIGHT_PX;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Kick off the loading screen's CSS opacity transition.
#[inline]
pub fn begin_fade(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_SCREEN_ID) {
        _ = el.class_list().add_1(FADE_OUT_CLASS);
    }
}

/// Swap the loading view for the main view.
pub fn finish_loading(document: &web::Document, intro_canvas: &web::HtmlCanvasElement) {
    if let Some(el) = document.get_element_by_id(LOADING_SCREEN_ID) {
        _ = el.class_list().add_1(HIDDEN_CLASS);
        // fallback for hosts without the class
        _ = el.set_attribute("style", "display:none");
    }
    if let Some(el) = document.get_element_by_id(APP_ROOT_ID) {
        _ = el.class_list().remove_1(HIDDEN_CLASS);
    }
    _ = intro_canvas.style().set_property("display", "none");
}

/// Tell the page the main view is up.
pub fn announce_ready(window: &web::Window) {
    match web::Event::new(READY_EVENT) {
        Ok(ev) => {
            _ = window.dispatch_event(&ev);
        }
        Err(e) => log::error!("could not create {} event: {:?}", READY_EVENT, e),
    }
}

/// Move the scroll handle to follow the page.
pub fn place_scroll_handle(document: &web::Document, percent: f32) {
    let Some(el) = document.get_element_by_id(SCROLL_HANDLE_ID) else {
        return;
    };
    if let Ok(html) = el.dyn_into::<web::HtmlElement>() {
        let top = layout::handle_top_css(percent, INDICATOR_HEIGHT_PX);
        _ = html.style().set_property("top", &top);
    }
}
