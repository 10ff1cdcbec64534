// Host-side tests for the loading-screen intro sequence.

use rand::prelude::*;
use sparkfall_core::{
    EngineConfig, IntroEvent, IntroPhase, IntroSequencer, LoopDriver, OpaqueSampler, Placement,
    RasterImage, RecordingRenderer, SampleError, Scene, SurfaceSize, Tick,
};
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(100);
const CAPTION: &str = "abcdefghijklmnopqrst";

fn config() -> EngineConfig {
    let mut c = EngineConfig::default().with_caption(CAPTION);
    // 10x10 logo at natural size, sampled every other pixel: 25 targets
    c.sampler.logo_width = 10.0;
    c.sampler.stride = 2;
    c
}

fn sequencer(surface: SurfaceSize) -> IntroSequencer {
    IntroSequencer::new(&config(), surface, StdRng::seed_from_u64(42))
}

fn logo() -> Box<RasterImage> {
    Box::new(RasterImage::solid(10, 10, [245, 158, 11, 255]))
}

/// Sampler whose readback always fails, like a tainted canvas.
struct Tainted;

impl OpaqueSampler for Tainted {
    fn natural_size(&self) -> (u32, u32) {
        (10, 10)
    }

    fn opaque_points(
        &mut self,
        _placement: &Placement,
        _stride: u32,
        _threshold: u8,
    ) -> Result<Vec<glam::Vec2>, SampleError> {
        Err(SampleError::Read("SecurityError".into()))
    }
}

/// Step until the phase changes, returning how many frames it took.
fn run_until_phase_leaves(intro: &mut IntroSequencer, phase: IntroPhase, cap: usize) -> usize {
    let mut frames = 0;
    while intro.phase() == phase {
        intro.step(FRAME);
        frames += 1;
        assert!(frames < cap, "stuck in {phase:?}");
    }
    frames
}

#[test]
fn logo_spawns_one_particle_per_target() {
    let mut intro = sequencer(SurfaceSize::new(200, 200));
    assert_eq!(intro.phase(), IntroPhase::Gathering);
    intro.attach_sampler(logo());
    assert_eq!(intro.phase(), IntroPhase::Settling);
    assert_eq!(intro.particles().len(), 25);
    assert!(!intro.is_degraded());
    let placement = *intro.placement().expect("placement");
    for p in intro.particles() {
        assert!(p.target.x >= placement.origin.x && p.target.x < placement.origin.x + 10.0);
        assert!(p.target.y >= placement.origin.y && p.target.y < placement.origin.y + 10.0);
    }
}

#[test]
fn full_sequence_runs_in_order_and_completes_once() {
    let mut intro = sequencer(SurfaceSize::new(200, 200));
    intro.attach_sampler(logo());

    run_until_phase_leaves(&mut intro, IntroPhase::Settling, 5000);
    assert!(intro.all_settled());
    assert!(intro.particles().iter().all(|p| p.pos == p.target));
    assert_eq!(intro.phase(), IntroPhase::LogoFadeIn);

    let fade_frames = run_until_phase_leaves(&mut intro, IntroPhase::LogoFadeIn, 100);
    assert!((49..=51).contains(&fade_frames), "fade took {fade_frames}");
    assert_eq!(intro.logo_alpha(), 1.0);

    run_until_phase_leaves(&mut intro, IntroPhase::Typewriting, 200);
    assert_eq!(intro.revealed_caption(), CAPTION);

    let mut events = Vec::new();
    for _ in 0..100 {
        if let Some(e) = intro.step(FRAME) {
            events.push(e);
        }
    }
    assert_eq!(
        events,
        vec![IntroEvent::FadeOutStarted, IntroEvent::Completed]
    );
    assert_eq!(intro.phase(), IntroPhase::Done);
}

#[test]
fn typewriter_reveals_a_quarter_character_per_frame() {
    let mut intro = sequencer(SurfaceSize::new(200, 200));
    intro.asset_failed("test");
    assert_eq!(intro.phase(), IntroPhase::Typewriting);
    assert_eq!(intro.revealed_chars(), 0);

    for _ in 0..4 {
        intro.step(FRAME);
    }
    assert_eq!(intro.revealed_caption(), "a");

    for _ in 4..79 {
        intro.step(FRAME);
    }
    assert_eq!(intro.revealed_chars(), 19);
    assert_eq!(intro.phase(), IntroPhase::Typewriting);

    intro.step(FRAME);
    assert_eq!(intro.revealed_chars(), 20);
    assert_eq!(intro.phase(), IntroPhase::Holding);
}

#[test]
fn typewriter_has_no_drift_at_inexact_rates() {
    let mut c = config();
    c.intro.chars_per_frame = 0.1;
    let mut intro = IntroSequencer::new(&c, SurfaceSize::new(200, 200), StdRng::seed_from_u64(3));
    intro.asset_failed("test");
    for frame in 1..=199u32 {
        intro.step(FRAME);
        assert_eq!(intro.revealed_chars(), (frame / 10) as usize, "frame {frame}");
        assert_eq!(intro.phase(), IntroPhase::Typewriting);
    }
    intro.step(FRAME);
    assert_eq!(intro.revealed_chars(), 20);
    assert_eq!(intro.phase(), IntroPhase::Holding);
}

#[test]
fn typewriter_counts_whole_characters_for_slow_rates() {
    let mut c = config();
    c.intro.chars_per_frame = 0.7;
    let mut intro = IntroSequencer::new(&c, SurfaceSize::new(200, 200), StdRng::seed_from_u64(3));
    intro.asset_failed("test");
    for _ in 0..10 {
        intro.step(FRAME);
    }
    assert_eq!(intro.revealed_chars(), 7);
}

#[test]
fn hold_and_fade_use_elapsed_time() {
    let mut intro = sequencer(SurfaceSize::new(200, 200));
    intro.asset_failed("test");
    run_until_phase_leaves(&mut intro, IntroPhase::Typewriting, 200);

    // 1500 ms hold at 100 ms per frame
    for _ in 0..14 {
        assert_eq!(intro.step(FRAME), None);
    }
    assert_eq!(intro.step(FRAME), Some(IntroEvent::FadeOutStarted));
    assert_eq!(intro.phase(), IntroPhase::FadingOut);

    // 800 ms fade
    for _ in 0..7 {
        assert_eq!(intro.step(FRAME), None);
    }
    assert_eq!(intro.step(FRAME), Some(IntroEvent::Completed));
    assert_eq!(intro.step(FRAME), None);
}

#[test]
fn multibyte_caption_reveals_on_char_boundaries() {
    let c = EngineConfig::default();
    let mut intro = IntroSequencer::new(&c, SurfaceSize::new(200, 200), StdRng::seed_from_u64(1));
    intro.asset_failed("test");
    for _ in 0..12 {
        intro.step(FRAME);
    }
    assert_eq!(intro.revealed_caption(), "SHΞ");
    for _ in 0..8 {
        intro.step(FRAME);
    }
    assert_eq!(intro.revealed_caption(), "SHΞN™");
}

#[test]
fn missing_logo_times_out_into_caption_only_intro() {
    let mut intro = sequencer(SurfaceSize::new(200, 200));
    for _ in 0..39 {
        intro.step(FRAME);
    }
    assert_eq!(intro.phase(), IntroPhase::Gathering);
    intro.step(FRAME);
    assert_eq!(intro.phase(), IntroPhase::Typewriting);
    assert!(intro.is_degraded());
    assert!(intro.particles().is_empty());

    // a late logo is ignored
    intro.attach_sampler(logo());
    assert_eq!(intro.phase(), IntroPhase::Typewriting);
    assert!(intro.particles().is_empty());
}

#[test]
fn transparent_logo_degrades() {
    let mut intro = sequencer(SurfaceSize::new(200, 200));
    intro.attach_sampler(Box::new(RasterImage::solid(10, 10, [0, 0, 0, 0])));
    assert!(intro.is_degraded());
    assert_eq!(intro.phase(), IntroPhase::Typewriting);
}

#[test]
fn unreadable_logo_still_fades_in_without_particles() {
    let mut driver = LoopDriver::new(sequencer(SurfaceSize::new(200, 200)));
    driver.scene_mut().attach_sampler(Box::new(Tainted));
    let intro = driver.scene();
    assert!(intro.is_degraded());
    assert!(intro.particles().is_empty());
    assert_eq!(intro.phase(), IntroPhase::LogoFadeIn);
    let placement = *intro.placement().expect("placement from natural size");
    assert_eq!(placement.size, glam::Vec2::new(10.0, 10.0));

    let mut rec = RecordingRenderer::default();
    for _ in 0..10 {
        driver.tick(Some(&mut rec), FRAME);
    }
    let alpha = rec.last_logo_alpha().expect("logo drawn");
    assert!(alpha > 0.0 && alpha < 1.0, "alpha {alpha}");
    assert_eq!(rec.circles_in_last_frame(), 0);

    let mut events = Vec::new();
    for _ in 0..400 {
        if let Tick::Drawn(Some(e)) = driver.tick(Some(&mut rec), FRAME) {
            events.push(e);
        }
    }
    assert_eq!(rec.last_logo_alpha(), Some(1.0));
    assert_eq!(rec.last_caption(), Some(CAPTION));
    assert_eq!(events, vec![IntroEvent::FadeOutStarted, IntroEvent::Completed]);
}

#[test]
fn degraded_intro_draws_caption_without_logo() {
    let mut driver = LoopDriver::new(sequencer(SurfaceSize::new(200, 200)));
    driver.scene_mut().asset_failed("404");
    let mut rec = RecordingRenderer::default();
    for _ in 0..8 {
        driver.tick(Some(&mut rec), FRAME);
    }
    assert_eq!(rec.last_caption(), Some("ab"));
    assert_eq!(rec.last_logo_alpha(), None);
    assert_eq!(rec.circles_in_last_frame(), 0);
}

#[test]
fn settling_frames_draw_every_particle() {
    let mut driver = LoopDriver::new(sequencer(SurfaceSize::new(200, 200)));
    driver.scene_mut().attach_sampler(logo());
    let mut rec = RecordingRenderer::default();
    assert_eq!(driver.tick(Some(&mut rec), FRAME), Tick::Drawn(None));
    assert_eq!(rec.circles_in_last_frame(), 25);
    assert_eq!(rec.last_caption(), None);
}

#[test]
fn cancel_freezes_the_sequence() {
    let mut intro = sequencer(SurfaceSize::new(200, 200));
    intro.asset_failed("test");
    intro.cancel();
    intro.cancel();
    assert!(intro.is_cancelled());
    for _ in 0..500 {
        assert_eq!(intro.step(FRAME), None);
    }
    assert_eq!(intro.revealed_chars(), 0);
    assert_eq!(intro.phase(), IntroPhase::Typewriting);
}

#[test]
fn resize_while_settling_keeps_everything_on_surface() {
    let mut intro = sequencer(SurfaceSize::new(400, 300));
    intro.attach_sampler(logo());
    for _ in 0..3 {
        intro.step(FRAME);
    }
    let small = SurfaceSize::new(60, 40);
    intro.resize(small);
    assert_eq!(intro.surface(), small);
    assert_eq!(intro.phase(), IntroPhase::Settling);
    assert_eq!(intro.particles().len(), 25);
    for p in intro.particles() {
        assert!(small.contains(p.pos), "pos {:?}", p.pos);
        assert!(small.contains(p.target), "target {:?}", p.target);
    }
    run_until_phase_leaves(&mut intro, IntroPhase::Settling, 5000);
}

#[test]
fn resize_after_assembly_snaps_onto_new_targets() {
    let mut intro = sequencer(SurfaceSize::new(400, 300));
    intro.attach_sampler(logo());
    run_until_phase_leaves(&mut intro, IntroPhase::Settling, 5000);
    let before = *intro.placement().expect("placement");

    intro.resize(SurfaceSize::new(800, 600));
    let after = *intro.placement().expect("placement");
    assert_ne!(before.origin, after.origin);
    assert!(intro.all_settled());
    assert!(intro.particles().iter().all(|p| p.settled && p.pos == p.target));
    assert_eq!(intro.phase(), IntroPhase::LogoFadeIn);
}

#[test]
fn resize_adds_and_drops_particles_with_the_target_count() {
    let mut c = config();
    c.sampler.logo_width = 40.0;
    let mut intro = IntroSequencer::new(&c, SurfaceSize::new(400, 300), StdRng::seed_from_u64(9));
    intro.attach_sampler(Box::new(RasterImage::solid(40, 40, [255, 255, 255, 255])));
    assert_eq!(intro.particles().len(), 400);

    // logo shrinks to 20x20: surplus particles go away
    let small = SurfaceSize::new(20, 20);
    intro.resize(small);
    assert_eq!(intro.particles().len(), 100);
    assert!(intro
        .particles()
        .iter()
        .all(|p| small.contains(p.pos) && small.contains(p.target)));
    let survivors: Vec<_> = intro.particles().iter().map(|p| p.pos).collect();

    // back to full size: survivors keep their place, extras are scattered
    let big = SurfaceSize::new(400, 300);
    intro.resize(big);
    assert_eq!(intro.particles().len(), 400);
    for (p, before) in intro.particles().iter().zip(&survivors) {
        assert_eq!(p.pos, *before);
    }
    assert!(intro
        .particles()
        .iter()
        .all(|p| big.contains(p.pos) && big.contains(p.target) && !p.settled));
    run_until_phase_leaves(&mut intro, IntroPhase::Settling, 5000);
}

#[test]
fn resize_to_nothing_clamps_instead_of_failing() {
    let mut intro = sequencer(SurfaceSize::new(400, 300));
    intro.attach_sampler(logo());
    intro.resize(SurfaceSize::new(0, 0));
    assert_eq!(intro.particles().len(), 25);
    assert!(intro.particles().iter().all(|p| p.pos == glam::Vec2::ZERO));
    assert_eq!(intro.phase(), IntroPhase::Settling);
}
