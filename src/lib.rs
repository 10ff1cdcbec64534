#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use crate::frame::{LoopControl, RafLoop};
use crate::render::CanvasSurface;
use rand::prelude::*;
use sparkfall_core::constants::DEFAULT_CAPTION;
use sparkfall_core::{Engine, EngineConfig, EngineEvent};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod layout;
mod overlay;
mod render;
mod sampler;

/// Everything the page-level wiring shares. Lives for the page load.
pub(crate) struct App {
    window: web::Window,
    document: web::Document,
    engine: RefCell<Engine>,
    intro_surface: RefCell<CanvasSurface>,
    trail_surface: RefCell<CanvasSurface>,
    intro_loop: RefCell<Option<RafLoop>>,
    trail_loop: RefCell<Option<RafLoop>>,
}

impl App {
    /// Match both canvas backing stores to what the engine is drawing.
    fn sync_surfaces(&self) {
        let (viewport, trail) = {
            let engine = self.engine.borrow();
            (engine.viewport(), engine.trail_surface())
        };
        dom::sync_canvas_backing_size(self.intro_surface.borrow().canvas(), viewport);
        dom::sync_canvas_backing_size(self.trail_surface.borrow().canvas(), trail);
    }

    fn teardown(&self) {
        if let Some(l) = self.intro_loop.borrow_mut().take() {
            l.cancel();
        }
        if let Some(l) = self.trail_loop.borrow_mut().take() {
            l.cancel();
        }
        self.engine.borrow_mut().teardown();
    }
}

thread_local! {
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

fn with_app(f: impl FnOnce(&Rc<App>)) {
    let app = APP.with(|slot| slot.borrow().clone());
    if let Some(app) = app {
        f(&app);
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("sparkfall-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Host toggles the expanded scroll indicator; sparks move with it.
#[wasm_bindgen]
pub fn set_indicator_open(open: bool) {
    with_app(|app| app.engine.borrow_mut().set_indicator_open(open));
}

/// Stop all animation. Idempotent; also wired to `pagehide`.
#[wasm_bindgen]
pub fn shutdown() {
    if let Some(app) = APP.with(|slot| slot.borrow_mut().take()) {
        app.teardown();
        log::info!("sparkfall-web stopped");
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let intro_canvas = dom::canvas_by_id(&document, INTRO_CANVAS_ID)?;
    let trail_canvas = dom::canvas_by_id(&document, TRAIL_CANVAS_ID)?;
    let caption = intro_canvas
        .get_attribute(CAPTION_ATTR)
        .unwrap_or_else(|| DEFAULT_CAPTION.to_string());
    let logo_uri = intro_canvas.get_attribute(LOGO_ATTR);

    let viewport = dom::viewport_size(&window);
    let config = EngineConfig::default().with_caption(caption);
    let engine = Engine::with_rng(config, viewport, StdRng::from_entropy());

    let app = Rc::new(App {
        window,
        document,
        engine: RefCell::new(engine),
        intro_surface: RefCell::new(CanvasSurface::new(intro_canvas)),
        trail_surface: RefCell::new(CanvasSurface::new(trail_canvas)),
        intro_loop: RefCell::new(None),
        trail_loop: RefCell::new(None),
    });
    app.sync_surfaces();
    APP.with(|slot| *slot.borrow_mut() = Some(app.clone()));

    events::wire_resize(&app);
    events::wire_scroll(&app);
    events::wire_pagehide(&app);
    start_intro_loop(&app);

    match logo_uri {
        Some(uri) => load_logo(&app, &uri).await,
        None => app
            .engine
            .borrow_mut()
            .logo_failed("intro canvas has no data-logo"),
    }
    Ok(())
}

async fn load_logo(app: &Rc<App>, uri: &str) {
    let loaded = sampler::load_image(uri).await.and_then(|img| {
        let s = sampler::CanvasSampler::new(&app.document, img.clone())?;
        Ok((img, s))
    });
    match loaded {
        Ok((img, s)) => {
            log::info!(
                "logo {} loaded ({}x{})",
                uri,
                img.natural_width(),
                img.natural_height()
            );
            app.intro_surface.borrow_mut().set_logo(img);
            app.engine.borrow_mut().attach_logo(Box::new(s));
        }
        Err(e) => {
            log::warn!("logo load failed: {:?}", e);
            app.engine.borrow_mut().logo_failed(&e.to_string());
        }
    }
}

fn start_intro_loop(app: &Rc<App>) {
    let weak = Rc::downgrade(app);
    let raf = RafLoop::start(move |dt| {
        let Some(app) = weak.upgrade() else {
            return LoopControl::Stop;
        };
        let event = {
            let mut surface = app.intro_surface.borrow_mut();
            app.engine.borrow_mut().frame(surface.renderer(), dt)
        };
        match event {
            Some(EngineEvent::FadeOutStarted) => {
                overlay::begin_fade(&app.document);
                LoopControl::Continue
            }
            Some(EngineEvent::LoadingComplete) => {
                overlay::finish_loading(&app.document, app.intro_surface.borrow().canvas());
                overlay::place_scroll_handle(
                    &app.document,
                    dom::document_scroll_percent(&app.window, &app.document),
                );
                overlay::announce_ready(&app.window);
                start_trail_loop(&app);
                LoopControl::Stop
            }
            None => LoopControl::Continue,
        }
    });
    *app.intro_loop.borrow_mut() = Some(raf);
}

fn start_trail_loop(app: &Rc<App>) {
    app.sync_surfaces();
    let weak = Rc::downgrade(app);
    let raf = RafLoop::start(move |dt| {
        let Some(app) = weak.upgrade() else {
            return LoopControl::Stop;
        };
        let mut engine = app.engine.borrow_mut();
        if engine.is_torn_down() {
            return LoopControl::Stop;
        }
        let mut surface = app.trail_surface.borrow_mut();
        engine.frame(surface.renderer(), dt);
        LoopControl::Continue
    });
    *app.trail_loop.borrow_mut() = Some(raf);
}
