//! Scroll trail: sparks that follow the scroll indicator down the left edge.

use crate::config::TrailParams;
use crate::constants::TRAIL_BURST;
use crate::driver::Scene;
use crate::geometry::SurfaceSize;
use crate::particle::TrailParticle;
use crate::physics::step_trail;
use crate::render::Renderer;
use glam::Vec2;
use rand::rngs::StdRng;
use smallvec::SmallVec;
use std::convert::Infallible;
use std::time::Duration;

/// Map a 0-100 scroll percentage onto the indicator track. The track is the
/// viewport minus the indicator's own height so it never runs past the end.
/// NaN maps to the top of the track.
#[inline]
pub fn map_cursor(percent: f32, viewport_height: f32, indicator_height: f32) -> f32 {
    let track = (viewport_height - indicator_height).max(0.0);
    let percent = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };
    percent * track / 100.0
}

/// Last indicator position that produced a burst.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollCursor {
    pub y: f32,
}

pub type Burst = SmallVec<[TrailParticle; TRAIL_BURST]>;

pub struct TrailEmitter {
    params: TrailParams,
    surface: SurfaceSize,
    rng: StdRng,
    particles: Vec<TrailParticle>,
    cursor: ScrollCursor,
    percent: f32,
    indicator_open: bool,
}

impl TrailEmitter {
    /// `percent` seeds the cursor so the first real scroll is measured from
    /// where the page already is.
    pub fn new(
        params: TrailParams,
        surface: SurfaceSize,
        rng: StdRng,
        percent: f32,
        indicator_open: bool,
    ) -> Self {
        let y = map_cursor(percent, surface.height as f32, params.indicator_height);
        Self {
            params,
            surface,
            rng,
            particles: Vec::new(),
            cursor: ScrollCursor { y },
            percent,
            indicator_open,
        }
    }

    pub fn particles(&self) -> &[TrailParticle] {
        &self.particles
    }

    pub fn cursor(&self) -> ScrollCursor {
        self.cursor
    }

    pub fn indicator_open(&self) -> bool {
        self.indicator_open
    }

    pub fn set_indicator_open(&mut self, open: bool) {
        self.indicator_open = open;
    }

    pub fn origin_x(&self) -> f32 {
        if self.indicator_open {
            self.params.origin_x_expanded
        } else {
            self.params.origin_x_collapsed
        }
    }

    /// Feed a scroll update. Returns how many sparks were spawned.
    /// Non-finite input is ignored.
    pub fn on_scroll(&mut self, percent: f32) -> usize {
        if !percent.is_finite() {
            return 0;
        }
        self.percent = percent;
        let y = map_cursor(
            percent,
            self.surface.height as f32,
            self.params.indicator_height,
        );
        let delta = y - self.cursor.y;
        if delta.abs() < self.params.min_delta {
            return 0;
        }
        let burst = self.burst(y, delta);
        let n = burst.len();
        self.particles.extend(burst);
        self.cursor.y = y;
        n
    }

    /// Sparks for one triggering update at indicator position `y`. Faster
    /// scrolling kicks them harder, against the direction of travel.
    pub fn burst(&mut self, y: f32, delta: f32) -> Burst {
        let origin = Vec2::new(self.origin_x(), y + self.params.indicator_height * 0.5);
        let kick = -delta.signum()
            * (delta.abs() * self.params.scroll_gain).min(self.params.scroll_kick_max);
        (0..self.params.burst)
            .map(|_| TrailParticle::spawn(origin, kick, &mut self.rng, &self.params))
            .collect()
    }
}

impl Scene for TrailEmitter {
    type Event = Infallible;

    fn surface(&self) -> SurfaceSize {
        self.surface
    }

    /// Live sparks are left alone; the cursor is re-mapped onto the new track
    /// so a resize by itself never fires a burst.
    fn resize(&mut self, surface: SurfaceSize) {
        self.surface = surface;
        self.cursor.y = map_cursor(
            self.percent,
            surface.height as f32,
            self.params.indicator_height,
        );
    }

    fn step(&mut self, _dt: Duration) -> Option<Infallible> {
        step_trail(&mut self.particles, &self.params);
        None
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        for p in &self.particles {
            renderer.circle(p.pos, p.radius, p.color, p.life);
        }
    }
}
