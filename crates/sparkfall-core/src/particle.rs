//! Particle records for the two effects.
//!
//! Construction is the only behavior here; per-frame rules live in
//! `physics.rs`.

use crate::config::{GatherParams, TrailParams};
use crate::constants::{GATHER_PALETTE, TRAIL_PRIMARY, TRAIL_SECONDARY};
use crate::geometry::SurfaceSize;
use glam::Vec2;
use rand::Rng;

/// 8-bit color with a separate float alpha, matching CSS `rgba()`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string without the alpha channel (alpha goes through
    /// `globalAlpha` on the canvas).
    pub fn css_rgb(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Short-lived spark emitted along the scroll indicator.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub radius: f32,
    pub color: Rgba,
}

impl TrailParticle {
    /// Spark near `origin` with a randomized outward velocity. `kick_y` is
    /// added to the vertical component (scroll-speed bias).
    pub fn spawn(origin: Vec2, kick_y: f32, rng: &mut impl Rng, params: &TrailParams) -> Self {
        let jitter = Vec2::new(
            (rng.gen::<f32>() - 0.5) * params.jitter.x,
            (rng.gen::<f32>() - 0.5) * params.jitter.y,
        );
        let vel = Vec2::new(
            params.drift_x_sign * rng.gen::<f32>() * params.speed_x,
            (rng.gen::<f32>() - 0.5) * params.speed_y + kick_y,
        );
        let radius = rng.gen::<f32>() * params.radius_span + params.radius_min;
        let color = if rng.gen::<f32>() < params.primary_chance {
            TRAIL_PRIMARY
        } else {
            TRAIL_SECONDARY
        };
        Self {
            pos: origin + jitter,
            vel,
            life: 1.0,
            radius,
            color,
        }
    }
}

/// Particle that flies from a random point to a fixed target taken from the
/// logo's opaque pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct GatherParticle {
    pub pos: Vec2,
    pub target: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Rgba,
    pub accel: f32,
    pub friction: f32,
    pub settled: bool,
}

impl GatherParticle {
    /// Scatter a particle anywhere on `surface`, aimed loosely at `target`.
    /// Spring and friction coefficients are drawn per particle so the logo
    /// assembles in a staggered way.
    pub fn scatter(
        target: Vec2,
        surface: SurfaceSize,
        rng: &mut impl Rng,
        params: &GatherParams,
    ) -> Self {
        let pos = Vec2::new(
            rng.gen::<f32>() * surface.width as f32,
            rng.gen::<f32>() * surface.height as f32,
        );
        let vel = (target - pos).normalize_or_zero() * rng.gen::<f32>() * params.initial_speed;
        let color = GATHER_PALETTE[rng.gen_range(0..GATHER_PALETTE.len())]
            .with_alpha(lerp(params.alpha_min, 1.0, rng.gen()));
        Self {
            pos,
            target,
            vel,
            radius: lerp(params.radius_min, params.radius_max, rng.gen()),
            color,
            accel: lerp(params.accel_min, params.accel_max, rng.gen()),
            friction: lerp(params.friction_min, params.friction_max, rng.gen()),
            settled: false,
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
