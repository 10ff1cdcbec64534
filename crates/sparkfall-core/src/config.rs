//! Engine tunables.
//!
//! Every knob has a default that reproduces the reference look of the page;
//! hosts override individual fields (caption text, sampling stride) and leave
//! the rest alone.

use crate::constants::*;
use glam::Vec2;
use std::time::Duration;

/// Spawn and decay parameters for scroll-trail sparks.
#[derive(Clone, Debug)]
pub struct TrailParams {
    pub decay: f32,
    pub shrink: f32,
    pub burst: usize,
    pub min_delta: f32,
    /// Full width/height of the spawn jitter box around the origin.
    pub jitter: Vec2,
    pub speed_x: f32,
    pub speed_y: f32,
    /// Sign of the horizontal drift; negative pushes sparks towards the left edge.
    pub drift_x_sign: f32,
    pub scroll_gain: f32,
    pub scroll_kick_max: f32,
    pub radius_min: f32,
    pub radius_span: f32,
    pub primary_chance: f32,
    pub indicator_height: f32,
    pub origin_x_collapsed: f32,
    pub origin_x_expanded: f32,
    pub surface_width: u32,
}

impl Default for TrailParams {
    fn default() -> Self {
        Self {
            decay: TRAIL_DECAY_PER_FRAME,
            shrink: TRAIL_SHRINK_PER_FRAME,
            burst: TRAIL_BURST,
            min_delta: TRAIL_MIN_DELTA_PX,
            jitter: Vec2::from_array(TRAIL_JITTER_PX),
            speed_x: TRAIL_SPEED_X,
            speed_y: TRAIL_SPEED_Y,
            drift_x_sign: -1.0,
            scroll_gain: TRAIL_SCROLL_GAIN,
            scroll_kick_max: TRAIL_SCROLL_KICK_MAX,
            radius_min: TRAIL_RADIUS_MIN,
            radius_span: TRAIL_RADIUS_SPAN,
            primary_chance: TRAIL_PRIMARY_CHANCE,
            indicator_height: INDICATOR_HEIGHT_PX,
            origin_x_collapsed: INDICATOR_ORIGIN_X_COLLAPSED,
            origin_x_expanded: INDICATOR_ORIGIN_X_EXPANDED,
            surface_width: TRAIL_SURFACE_WIDTH,
        }
    }
}

/// Spring/friction bounds for gather particles. Each particle draws its own
/// coefficients from these ranges.
#[derive(Clone, Debug)]
pub struct GatherParams {
    pub accel_min: f32,
    pub accel_max: f32,
    pub friction_min: f32,
    pub friction_max: f32,
    pub settle_epsilon: f32,
    pub initial_speed: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    pub alpha_min: f32,
}

impl Default for GatherParams {
    fn default() -> Self {
        Self {
            accel_min: GATHER_ACCEL_RANGE[0],
            accel_max: GATHER_ACCEL_RANGE[1],
            friction_min: GATHER_FRICTION_RANGE[0],
            friction_max: GATHER_FRICTION_RANGE[1],
            settle_epsilon: GATHER_SETTLE_EPSILON,
            initial_speed: GATHER_INITIAL_SPEED,
            radius_min: GATHER_RADIUS_RANGE[0],
            radius_max: GATHER_RADIUS_RANGE[1],
            alpha_min: GATHER_ALPHA_MIN,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SamplerParams {
    /// Grid step in pixels; smaller means more particles.
    pub stride: u32,
    /// Pixels with alpha strictly above this become targets.
    pub alpha_threshold: u8,
    pub logo_width: f32,
    pub caption_gap: f32,
}

impl Default for SamplerParams {
    fn default() -> Self {
        Self {
            stride: SAMPLE_STRIDE,
            alpha_threshold: SAMPLE_ALPHA_THRESHOLD,
            logo_width: LOGO_TARGET_WIDTH,
            caption_gap: CAPTION_GAP_PX,
        }
    }
}

#[derive(Clone, Debug)]
pub struct IntroTiming {
    pub logo_alpha_per_frame: f32,
    pub chars_per_frame: f32,
    pub hold: Duration,
    pub fade_out: Duration,
    /// How long Gathering waits for the logo before falling back.
    pub asset_timeout: Duration,
}

impl Default for IntroTiming {
    fn default() -> Self {
        Self {
            logo_alpha_per_frame: LOGO_ALPHA_PER_FRAME,
            chars_per_frame: TYPEWRITER_CHARS_PER_FRAME,
            hold: Duration::from_millis(HOLD_MS),
            fade_out: Duration::from_millis(FADE_OUT_MS),
            asset_timeout: Duration::from_millis(ASSET_TIMEOUT_MS),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub caption: String,
    pub trail: TrailParams,
    pub gather: GatherParams,
    pub sampler: SamplerParams,
    pub intro: IntroTiming,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            caption: DEFAULT_CAPTION.to_string(),
            trail: TrailParams::default(),
            gather: GatherParams::default(),
            sampler: SamplerParams::default(),
            intro: IntroTiming::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }
}
