use crate::particle::Rgba;

// Shared tuning for the intro and trail effects. `EngineConfig::default()`
// is assembled from these values.

// Trail sparks
pub const TRAIL_DECAY_PER_FRAME: f32 = 0.02; // life lost per frame (1.0 -> 0.0 in ~50 frames)
pub const TRAIL_SHRINK_PER_FRAME: f32 = 0.96; // multiplicative radius shrink
pub const TRAIL_BURST: usize = 4; // particles per triggering scroll update
pub const TRAIL_MIN_DELTA_PX: f32 = 1.0; // cursor movement needed before a burst fires
pub const TRAIL_JITTER_PX: [f32; 2] = [6.0, 30.0]; // full spawn spread (x, y)
pub const TRAIL_SPEED_X: f32 = 1.2;
pub const TRAIL_SPEED_Y: f32 = 0.8;
pub const TRAIL_SCROLL_GAIN: f32 = 0.05; // vertical kick per pixel of scroll delta
pub const TRAIL_SCROLL_KICK_MAX: f32 = 1.5;
pub const TRAIL_RADIUS_MIN: f32 = 0.5;
pub const TRAIL_RADIUS_SPAN: f32 = 2.5;
pub const TRAIL_PRIMARY_CHANCE: f32 = 0.6;

// Scroll indicator geometry (CSS pixels)
pub const TRAIL_SURFACE_WIDTH: u32 = 40;
pub const INDICATOR_HEIGHT_PX: f32 = 80.0;
pub const INDICATOR_ORIGIN_X_COLLAPSED: f32 = 10.0;
pub const INDICATOR_ORIGIN_X_EXPANDED: f32 = 22.0;

// Gather particles
pub const GATHER_ACCEL_RANGE: [f32; 2] = [0.015, 0.045];
pub const GATHER_FRICTION_RANGE: [f32; 2] = [0.82, 0.92];
pub const GATHER_SETTLE_EPSILON: f32 = 0.5; // px
pub const GATHER_INITIAL_SPEED: f32 = 2.0;
pub const GATHER_RADIUS_RANGE: [f32; 2] = [0.8, 1.6];
pub const GATHER_ALPHA_MIN: f32 = 0.55;

// Logo sampling
pub const SAMPLE_STRIDE: u32 = 4;
pub const SAMPLE_ALPHA_THRESHOLD: u8 = 128;
pub const LOGO_TARGET_WIDTH: f32 = 220.0;
pub const CAPTION_GAP_PX: f32 = 48.0; // vertical room reserved under the logo

// Intro pacing. Alpha and typewriter advance per frame; holds are wall-clock.
pub const LOGO_ALPHA_PER_FRAME: f32 = 0.02;
pub const TYPEWRITER_CHARS_PER_FRAME: f32 = 0.25;
pub const HOLD_MS: u64 = 1500;
pub const FADE_OUT_MS: u64 = 800;
pub const ASSET_TIMEOUT_MS: u64 = 4000;

pub const DEFAULT_CAPTION: &str = "SHΞN™ Exclusive";

// Palettes
pub const TRAIL_PRIMARY: Rgba = Rgba::rgb(0xfb, 0xbf, 0x24); // amber
pub const TRAIL_SECONDARY: Rgba = Rgba::rgb(0xff, 0xf7, 0xed); // warm white

pub const GATHER_PALETTE: [Rgba; 3] = [
    Rgba::rgb(0xf5, 0x9e, 0x0b),
    Rgba::rgb(0xfb, 0xbf, 0x24),
    Rgba::rgb(0xfd, 0xe6, 0x8a),
];
