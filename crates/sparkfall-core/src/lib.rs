//! Platform-independent core of the sparkfall particle effects.
//!
//! Nothing here touches the DOM. Front-ends supply a [`Renderer`], an
//! [`OpaqueSampler`] for the logo, and call [`Engine::frame`] from their own
//! frame scheduler.

pub mod config;
pub mod constants;
pub mod driver;
pub mod engine;
pub mod geometry;
pub mod intro;
pub mod particle;
pub mod physics;
pub mod render;
pub mod sampler;
pub mod trail;

pub use config::*;
pub use driver::{LoopDriver, Scene, Tick};
pub use engine::{Engine, EngineEvent, HostState};
pub use geometry::{Placement, SurfaceSize};
pub use intro::{IntroEvent, IntroPhase, IntroSequencer};
pub use particle::{GatherParticle, Rgba, TrailParticle};
pub use physics::{all_settled, step_gather, step_trail};
pub use render::{DrawCommand, NullRenderer, RecordingRenderer, Renderer};
pub use sampler::{opaque_cells, pixels_from_bytes, OpaqueSampler, RasterImage, SampleError};
pub use trail::{map_cursor, ScrollCursor, TrailEmitter};
