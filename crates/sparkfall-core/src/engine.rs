use crate::config::EngineConfig;
use crate::driver::{LoopDriver, Tick};
use crate::geometry::SurfaceSize;
use crate::intro::{IntroEvent, IntroSequencer};
use crate::render::Renderer;
use crate::sampler::OpaqueSampler;
use crate::trail::TrailEmitter;
use rand::prelude::*;
use std::time::Duration;

/// High-level page state. Loading always comes first and Ready is final.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostState {
    Loading,
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    /// Start the loading screen's opacity transition.
    FadeOutStarted,
    /// Swap the loading view for the main view. Raised once per engine.
    LoadingComplete,
}

/// Owner of all animation state. The host feeds it viewport, scroll and
/// indicator updates and calls [`Engine::frame`] once per display refresh
/// with whichever surface belongs to the current state.
pub struct Engine {
    config: EngineConfig,
    rng: StdRng,
    viewport: SurfaceSize,
    scroll_percent: f32,
    indicator_open: bool,
    intro: Option<LoopDriver<IntroSequencer>>,
    trail: Option<LoopDriver<TrailEmitter>>,
    torn_down: bool,
}

impl Engine {
    pub fn new(config: EngineConfig, viewport: SurfaceSize, seed: u64) -> Self {
        Self::with_rng(config, viewport, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: EngineConfig, viewport: SurfaceSize, mut rng: StdRng) -> Self {
        let intro_rng = StdRng::seed_from_u64(rng.gen());
        let intro = IntroSequencer::new(&config, viewport, intro_rng);
        log::info!(
            "[engine] loading at {}x{}, caption {:?}",
            viewport.width,
            viewport.height,
            config.caption
        );
        Self {
            config,
            rng,
            viewport,
            scroll_percent: 0.0,
            indicator_open: false,
            intro: Some(LoopDriver::new(intro)),
            trail: None,
            torn_down: false,
        }
    }

    pub fn state(&self) -> HostState {
        if self.trail.is_some() {
            HostState::Ready
        } else {
            HostState::Loading
        }
    }

    pub fn intro(&self) -> Option<&IntroSequencer> {
        self.intro.as_ref().map(|d| d.scene())
    }

    pub fn trail(&self) -> Option<&TrailEmitter> {
        self.trail.as_ref().map(|d| d.scene())
    }

    pub fn viewport(&self) -> SurfaceSize {
        self.viewport
    }

    /// Drawable area of the trail canvas for the current viewport.
    pub fn trail_surface(&self) -> SurfaceSize {
        SurfaceSize::new(self.config.trail.surface_width, self.viewport.height)
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn attach_logo(&mut self, sampler: Box<dyn OpaqueSampler>) {
        if let Some(intro) = self.intro.as_mut() {
            if !intro.is_cancelled() {
                intro.scene_mut().attach_sampler(sampler);
            }
        }
    }

    pub fn logo_failed(&mut self, reason: &str) {
        if let Some(intro) = self.intro.as_mut() {
            if !intro.is_cancelled() {
                intro.scene_mut().asset_failed(reason);
            }
        }
    }

    pub fn resize(&mut self, viewport: SurfaceSize) {
        if self.torn_down {
            return;
        }
        self.viewport = viewport;
        let trail_surface = self.trail_surface();
        if let Some(intro) = self.intro.as_mut() {
            intro.resize(viewport);
        }
        if let Some(trail) = self.trail.as_mut() {
            trail.resize(trail_surface);
        }
    }

    /// Scroll position as a 0-100 percentage. While loading it is only
    /// remembered, so the trail starts from the right place.
    pub fn scroll(&mut self, percent: f32) -> usize {
        if self.torn_down || !percent.is_finite() {
            return 0;
        }
        self.scroll_percent = percent;
        match self.trail.as_mut() {
            Some(trail) if !trail.is_cancelled() => trail.scene_mut().on_scroll(percent),
            _ => 0,
        }
    }

    pub fn set_indicator_open(&mut self, open: bool) {
        self.indicator_open = open;
        if let Some(trail) = self.trail.as_mut() {
            trail.scene_mut().set_indicator_open(open);
        }
    }

    /// Run one frame of whichever loop is active. `renderer` is `None` when
    /// the host could not get a drawing context; the frame is then stepped
    /// but not drawn, so the intro still reaches completion.
    pub fn frame(&mut self, renderer: Option<&mut dyn Renderer>, dt: Duration) -> Option<EngineEvent> {
        if self.torn_down {
            return None;
        }
        let tick = match self.intro.as_mut() {
            Some(intro) => intro.tick(renderer, dt),
            None => {
                if let Some(trail) = self.trail.as_mut() {
                    trail.tick(renderer, dt);
                }
                return None;
            }
        };
        let event = match tick {
            Tick::Drawn(event) | Tick::Skipped(event) => event,
            Tick::Cancelled => None,
        };
        match event {
            Some(IntroEvent::FadeOutStarted) => Some(EngineEvent::FadeOutStarted),
            Some(IntroEvent::Completed) => {
                self.enter_ready();
                Some(EngineEvent::LoadingComplete)
            }
            None => None,
        }
    }

    fn enter_ready(&mut self) {
        if let Some(mut intro) = self.intro.take() {
            intro.cancel();
            intro.scene_mut().cancel();
        }
        let rng = StdRng::seed_from_u64(self.rng.gen());
        let trail = TrailEmitter::new(
            self.config.trail.clone(),
            self.trail_surface(),
            rng,
            self.scroll_percent,
            self.indicator_open,
        );
        self.trail = Some(LoopDriver::new(trail));
        log::info!("[engine] ready; trail active");
    }

    /// Stop both loops for good. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if let Some(intro) = self.intro.as_mut() {
            intro.cancel();
            intro.scene_mut().cancel();
        }
        if let Some(trail) = self.trail.as_mut() {
            trail.cancel();
        }
        log::info!("[engine] torn down");
    }
}
