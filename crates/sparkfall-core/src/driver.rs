//! Frame driver shared by the intro and trail loops.
//!
//! The platform decides *when* a frame runs (requestAnimationFrame on the
//! web, a fixed-step loop in the headless runner); [`LoopDriver`] decides
//! what a frame does: clear, step, render.

use crate::geometry::SurfaceSize;
use crate::render::Renderer;
use std::time::Duration;

/// Something that can be advanced and drawn once per frame.
pub trait Scene {
    type Event;

    fn surface(&self) -> SurfaceSize;
    fn resize(&mut self, surface: SurfaceSize);
    fn step(&mut self, dt: Duration) -> Option<Self::Event>;
    fn render(&self, renderer: &mut dyn Renderer);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick<E> {
    /// Frame ran; carries the event the scene raised, if any.
    Drawn(Option<E>),
    /// No drawing surface this frame. The scene still advanced so its
    /// clocks keep running; nothing was drawn.
    Skipped(Option<E>),
    /// Driver was cancelled; nothing ran.
    Cancelled,
}

pub struct LoopDriver<S> {
    scene: S,
    cancelled: bool,
    frames: u64,
}

impl<S: Scene> LoopDriver<S> {
    pub fn new(scene: S) -> Self {
        Self {
            scene,
            cancelled: false,
            frames: 0,
        }
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Frames actually drawn so far; skipped frames are not counted.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Stop for good. Safe to call more than once.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            log::debug!("[driver] cancelled after {} frames", self.frames);
        }
        self.cancelled = true;
    }

    pub fn resize(&mut self, surface: SurfaceSize) {
        if !self.cancelled {
            self.scene.resize(surface);
        }
    }

    pub fn tick(&mut self, renderer: Option<&mut dyn Renderer>, dt: Duration) -> Tick<S::Event> {
        if self.cancelled {
            return Tick::Cancelled;
        }
        let Some(renderer) = renderer else {
            return Tick::Skipped(self.scene.step(dt));
        };
        renderer.clear(self.scene.surface());
        let event = self.scene.step(dt);
        self.scene.render(renderer);
        self.frames += 1;
        Tick::Drawn(event)
    }
}
