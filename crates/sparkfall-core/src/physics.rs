//! Per-frame integration. Both effects advance by a fixed amount per call;
//! the caller is expected to run roughly once per display refresh.

use crate::config::TrailParams;
use crate::geometry::SurfaceSize;
use crate::particle::{GatherParticle, TrailParticle};
use glam::Vec2;

impl TrailParticle {
    pub fn step(&mut self, params: &TrailParams) {
        self.pos += self.vel;
        self.life = (self.life - params.decay).max(0.0);
        self.radius = (self.radius * params.shrink).max(0.0);
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

/// Step every spark and drop the ones that died this frame. Survivors keep
/// their relative order. Returns how many were removed.
pub fn step_trail(particles: &mut Vec<TrailParticle>, params: &TrailParams) -> usize {
    let before = particles.len();
    particles.retain_mut(|p| {
        p.step(params);
        !p.is_dead()
    });
    before - particles.len()
}

impl GatherParticle {
    /// Spring towards the target with friction. Returns the settle flag.
    pub fn step(&mut self, epsilon: f32) -> bool {
        if self.settled {
            return true;
        }
        let d = self.target - self.pos;
        if d.length() > epsilon {
            self.vel += d * self.accel;
            self.vel *= self.friction;
            self.pos += self.vel;
        }
        if self.pos.distance(self.target) <= epsilon {
            self.snap();
        }
        self.settled
    }

    /// Pin onto the target and stop.
    pub fn snap(&mut self) {
        self.pos = self.target;
        self.vel = Vec2::ZERO;
        self.settled = true;
    }

    /// Point at a new target after a resize. The particle keeps moving from
    /// wherever it is, pulled back inside the surface if needed.
    pub fn retarget(&mut self, target: Vec2, surface: SurfaceSize) {
        self.target = target;
        self.pos = surface.clamp(self.pos);
        self.settled = false;
    }
}

/// Step the whole set; true only when every particle is settled.
pub fn step_gather(particles: &mut [GatherParticle], epsilon: f32) -> bool {
    let mut all = true;
    for p in particles.iter_mut() {
        all &= p.step(epsilon);
    }
    all
}

#[inline]
pub fn all_settled(particles: &[GatherParticle]) -> bool {
    particles.iter().all(|p| p.settled)
}
