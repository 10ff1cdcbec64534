use crate::dom;
use crate::overlay;
use crate::App;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn listen(window: &web::Window, event: &str, handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    if let Err(e) = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::error!("could not listen for {}: {:?}", event, e);
    }
    closure.forget();
}

/// Keep canvas backing sizes in step with the viewport and tell the engine.
pub fn wire_resize(app: &Rc<App>) {
    let weak = Rc::downgrade(app);
    listen(&app.window, "resize", move || {
        let Some(app) = weak.upgrade() else {
            return;
        };
        let viewport = dom::viewport_size(&app.window);
        app.engine.borrow_mut().resize(viewport);
        app.sync_surfaces();
    });
}

/// Scroll drives both the handle position and the spark trail.
pub fn wire_scroll(app: &Rc<App>) {
    let weak = Rc::downgrade(app);
    listen(&app.window, "scroll", move || {
        let Some(app) = weak.upgrade() else {
            return;
        };
        let percent = dom::document_scroll_percent(&app.window, &app.document);
        overlay::place_scroll_handle(&app.document, percent);
        app.engine.borrow_mut().scroll(percent);
    });
}

/// Page is going away: stop every loop before the surfaces do.
pub fn wire_pagehide(app: &Rc<App>) {
    listen(&app.window, "pagehide", crate::shutdown);
}
