//! Loading-screen intro: particles gather into the logo, the logo fades in,
//! the caption types out, then the screen holds and fades away.
//!
//! Phases only move forward. If the logo never arrives (load error, decode
//! error, or nothing within `asset_timeout`) the particle part is skipped and
//! the caption path still runs to `Done`, so the host is never left on the
//! loading screen. A logo that decodes but cannot be read back skips only the
//! particles and still fades in.

use crate::config::{EngineConfig, GatherParams, IntroTiming, SamplerParams};
use crate::driver::Scene;
use crate::geometry::{Placement, SurfaceSize};
use crate::particle::GatherParticle;
use crate::physics::{all_settled, step_gather};
use crate::render::Renderer;
use crate::sampler::{sample_targets, OpaqueSampler, SampleError};
use glam::Vec2;
use rand::rngs::StdRng;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntroPhase {
    /// Waiting for the logo; particles are spawned as soon as it is sampled.
    Gathering,
    /// Particles in flight, watching for all of them to settle.
    Settling,
    LogoFadeIn,
    Typewriting,
    Holding,
    FadingOut,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroEvent {
    /// Hold elapsed; the host should start its opacity transition.
    FadeOutStarted,
    /// Fade finished; the host swaps to the main view. Raised once.
    Completed,
}

pub struct IntroSequencer {
    caption: String,
    caption_len: usize,
    gather: GatherParams,
    sampling: SamplerParams,
    timing: IntroTiming,
    surface: SurfaceSize,
    rng: StdRng,

    phase: IntroPhase,
    sampler: Option<Box<dyn OpaqueSampler>>,
    placement: Option<Placement>,
    particles: Vec<GatherParticle>,
    all_settled: bool,
    logo_alpha: f32,
    typed_frames: u32,
    phase_elapsed: Duration,
    degraded: bool,
    cancelled: bool,
}

impl IntroSequencer {
    pub fn new(config: &EngineConfig, surface: SurfaceSize, rng: StdRng) -> Self {
        Self {
            caption: config.caption.clone(),
            caption_len: config.caption.chars().count(),
            gather: config.gather.clone(),
            sampling: config.sampler.clone(),
            timing: config.intro.clone(),
            surface,
            rng,
            phase: IntroPhase::Gathering,
            sampler: None,
            placement: None,
            particles: Vec::new(),
            all_settled: false,
            logo_alpha: 0.0,
            typed_frames: 0,
            phase_elapsed: Duration::ZERO,
            degraded: false,
            cancelled: false,
        }
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    pub fn particles(&self) -> &[GatherParticle] {
        &self.particles
    }

    pub fn all_settled(&self) -> bool {
        self.all_settled
    }

    pub fn logo_alpha(&self) -> f32 {
        self.logo_alpha
    }

    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn caption_len(&self) -> usize {
        self.caption_len
    }

    /// Characters of the caption revealed so far.
    pub fn revealed_chars(&self) -> usize {
        let typed = self.typed_frames as f64 * self.timing.chars_per_frame as f64;
        // absorb the f32 rounding of the configured rate (0.7 is stored as 0.69999...)
        let typed = (typed + typed * 1e-7).floor();
        (typed as usize).min(self.caption_len)
    }

    pub fn revealed_caption(&self) -> &str {
        let n = self.revealed_chars();
        let end = self
            .caption
            .char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(self.caption.len());
        &self.caption[..end]
    }

    /// Logo is ready: sample it for the current surface and launch the
    /// particles. Falls back to the caption-only intro when sampling fails
    /// or the image has no opaque pixels.
    pub fn attach_sampler(&mut self, mut sampler: Box<dyn OpaqueSampler>) {
        if self.cancelled || self.phase != IntroPhase::Gathering {
            log::debug!("[intro] logo arrived in {:?}; ignoring", self.phase);
            return;
        }
        match sample_targets(sampler.as_mut(), self.surface, &self.sampling) {
            Ok((_, targets)) if targets.is_empty() => {
                log::warn!("[intro] logo has no opaque pixels; skipping gather");
                self.degrade();
            }
            Ok((placement, targets)) => {
                self.particles = targets
                    .into_iter()
                    .map(|t| GatherParticle::scatter(t, self.surface, &mut self.rng, &self.gather))
                    .collect();
                self.placement = Some(placement);
                self.sampler = Some(sampler);
                self.all_settled = false;
                log::info!("[intro] gathering {} particles", self.particles.len());
                self.advance(IntroPhase::Settling);
            }
            Err(e @ (SampleError::Read(_) | SampleError::BufferMismatch { .. })) => {
                // decoded but unreadable (e.g. tainted canvas): show the logo without particles
                let placement = Placement::for_logo(
                    self.surface,
                    sampler.natural_size(),
                    self.sampling.logo_width,
                    self.sampling.caption_gap,
                );
                match placement {
                    Some(placement) => {
                        log::warn!("[intro] logo readback failed: {e}; showing it static");
                        self.show_static(sampler, placement);
                    }
                    None => {
                        log::warn!("[intro] logo readback failed: {e}; skipping gather");
                        self.degrade();
                    }
                }
            }
            Err(e) => {
                log::warn!("[intro] logo sampling failed: {e}; skipping gather");
                self.degrade();
            }
        }
    }

    /// The logo could not be loaded at all.
    pub fn asset_failed(&mut self, reason: &str) {
        if self.cancelled || self.phase != IntroPhase::Gathering {
            return;
        }
        log::warn!("[intro] logo unavailable ({reason}); skipping gather");
        self.degrade();
    }

    /// Stop permanently; pending holds never fire. Idempotent.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    fn degrade(&mut self) {
        self.degraded = true;
        self.sampler = None;
        self.placement = None;
        self.particles.clear();
        self.all_settled = false;
        self.advance(IntroPhase::Typewriting);
    }

    /// No particles, but the logo itself still fades in above the caption.
    fn show_static(&mut self, sampler: Box<dyn OpaqueSampler>, placement: Placement) {
        self.degraded = true;
        self.sampler = Some(sampler);
        self.placement = Some(placement);
        self.particles.clear();
        self.all_settled = false;
        self.advance(IntroPhase::LogoFadeIn);
    }

    fn advance(&mut self, next: IntroPhase) {
        debug_assert!(next > self.phase, "intro phase went backwards");
        log::debug!("[intro] {:?} -> {:?}", self.phase, next);
        self.phase = next;
        self.phase_elapsed = Duration::ZERO;
    }

    fn caption_anchor(&self) -> Vec2 {
        match &self.placement {
            Some(p) => p.bottom_center() + Vec2::new(0.0, self.sampling.caption_gap * 0.5),
            None => self.surface.center(),
        }
    }

    /// Point existing particles at fresh targets, scattering extras and
    /// dropping the surplus. Once the logo is assembled (`snap`), particles
    /// jump straight onto their new targets.
    fn retarget(&mut self, targets: Vec<Vec2>, snap: bool) {
        let mut old = std::mem::take(&mut self.particles).into_iter();
        let mut next = Vec::with_capacity(targets.len());
        for t in targets {
            let mut p = match old.next() {
                Some(mut p) => {
                    p.retarget(t, self.surface);
                    p
                }
                None => GatherParticle::scatter(t, self.surface, &mut self.rng, &self.gather),
            };
            if snap {
                p.snap();
            }
            next.push(p);
        }
        self.particles = next;
        self.all_settled = all_settled(&self.particles);
    }

    /// Keep whatever we have but make sure nothing points off-canvas.
    fn clamp_to_surface(&mut self) {
        let surface = self.surface;
        for p in &mut self.particles {
            p.target = surface.clamp(p.target);
            p.pos = if p.settled {
                p.target
            } else {
                surface.clamp(p.pos)
            };
        }
        if let Some(sampler) = &self.sampler {
            self.placement = Placement::for_logo(
                surface,
                sampler.natural_size(),
                self.sampling.logo_width,
                self.sampling.caption_gap,
            );
        }
    }
}

impl Scene for IntroSequencer {
    type Event = IntroEvent;

    fn surface(&self) -> SurfaceSize {
        self.surface
    }

    fn resize(&mut self, surface: SurfaceSize) {
        self.surface = surface;
        if self.cancelled || self.phase == IntroPhase::Done {
            return;
        }
        let Some(sampler) = self.sampler.as_mut() else {
            return;
        };
        match sample_targets(sampler.as_mut(), surface, &self.sampling) {
            Ok((placement, targets)) if !targets.is_empty() => {
                log::debug!(
                    "[intro] resized to {}x{}; {} targets",
                    surface.width,
                    surface.height,
                    targets.len()
                );
                self.placement = Some(placement);
                let snap = self.phase > IntroPhase::Settling;
                self.retarget(targets, snap);
            }
            Ok(_) => {
                log::warn!("[intro] resample produced no targets; clamping");
                self.clamp_to_surface();
            }
            Err(e) => {
                log::warn!("[intro] resample failed: {e}; clamping");
                self.clamp_to_surface();
            }
        }
    }

    fn step(&mut self, dt: Duration) -> Option<IntroEvent> {
        if self.cancelled {
            return None;
        }
        match self.phase {
            IntroPhase::Gathering => {
                self.phase_elapsed += dt;
                if self.phase_elapsed >= self.timing.asset_timeout {
                    log::warn!(
                        "[intro] logo not ready after {:?}; skipping gather",
                        self.timing.asset_timeout
                    );
                    self.degrade();
                }
                None
            }
            IntroPhase::Settling => {
                self.all_settled = step_gather(&mut self.particles, self.gather.settle_epsilon);
                if self.all_settled {
                    self.advance(IntroPhase::LogoFadeIn);
                }
                None
            }
            IntroPhase::LogoFadeIn => {
                self.logo_alpha = (self.logo_alpha + self.timing.logo_alpha_per_frame).min(1.0);
                if self.logo_alpha >= 1.0 - 1e-4 {
                    self.logo_alpha = 1.0;
                    self.advance(IntroPhase::Typewriting);
                }
                None
            }
            IntroPhase::Typewriting => {
                self.typed_frames = self.typed_frames.saturating_add(1);
                if self.revealed_chars() >= self.caption_len {
                    self.advance(IntroPhase::Holding);
                }
                None
            }
            IntroPhase::Holding => {
                self.phase_elapsed += dt;
                if self.phase_elapsed >= self.timing.hold {
                    self.advance(IntroPhase::FadingOut);
                    return Some(IntroEvent::FadeOutStarted);
                }
                None
            }
            IntroPhase::FadingOut => {
                self.phase_elapsed += dt;
                if self.phase_elapsed >= self.timing.fade_out {
                    self.advance(IntroPhase::Done);
                    log::info!("[intro] complete");
                    return Some(IntroEvent::Completed);
                }
                None
            }
            IntroPhase::Done => None,
        }
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        for p in &self.particles {
            renderer.circle(p.pos, p.radius, p.color, 1.0);
        }
        if self.phase >= IntroPhase::LogoFadeIn && self.sampler.is_some() {
            if let Some(placement) = &self.placement {
                renderer.logo(placement, self.logo_alpha);
            }
        }
        if self.phase >= IntroPhase::Typewriting {
            let text = self.revealed_caption();
            if !text.is_empty() {
                renderer.caption(text, self.caption_anchor());
            }
        }
    }
}
