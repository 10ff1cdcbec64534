use anyhow::{bail, Context};
use instant::Instant;
use sparkfall_core::{
    Engine, EngineConfig, EngineEvent, HostState, NullRenderer, RasterImage, RecordingRenderer,
    SurfaceSize,
};
use std::time::Duration;

const FRAME: Duration = Duration::from_micros(16_667);
const MAX_INTRO_FRAMES: u32 = 60 * 30;
const SCROLL_STEPS: u32 = 120;

/// A ring with a bar through it, standing in for the real logo.
fn synthetic_logo() -> RasterImage {
    let (w, h) = (160u32, 96u32);
    let (cx, cy) = (w as f32 / 2.0, h as f32 / 2.0);
    RasterImage::from_fn(w, h, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let r = (dx * dx + dy * dy).sqrt();
        let ring = (30.0..42.0).contains(&r);
        let bar = dy.abs() < 5.0 && dx.abs() < 70.0;
        if ring || bar {
            [245, 158, 11, 255]
        } else {
            [0, 0, 0, 0]
        }
    })
}

fn parse_seed() -> anyhow::Result<u64> {
    match std::env::args().nth(1) {
        Some(s) => s.parse().with_context(|| format!("seed {:?} is not a u64", s)),
        None => Ok(7),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let seed = parse_seed()?;
    let viewport = SurfaceSize::new(1280, 720);
    let mut engine = Engine::new(EngineConfig::default(), viewport, seed);
    let mut recorder = RecordingRenderer::default();
    let started = Instant::now();

    engine.attach_logo(Box::new(synthetic_logo()));

    let mut last_phase = None;
    let mut completed_at = None;
    for frame in 0..MAX_INTRO_FRAMES {
        let event = engine.frame(Some(&mut recorder), FRAME);
        if let Some(intro) = engine.intro() {
            let phase = intro.phase();
            if last_phase != Some(phase) {
                log::info!(
                    "frame {:4}: {:?} ({} particles{})",
                    frame,
                    phase,
                    intro.particles().len(),
                    if intro.is_degraded() { ", degraded" } else { "" }
                );
                last_phase = Some(phase);
            }
        }
        match event {
            Some(EngineEvent::FadeOutStarted) => log::info!("frame {:4}: fade-out started", frame),
            Some(EngineEvent::LoadingComplete) => {
                completed_at = Some(frame);
                break;
            }
            None => {}
        }
        // keep memory flat over long runs
        if recorder.commands.len() > 4096 {
            recorder.clear_history();
        }
    }
    let Some(done) = completed_at else {
        bail!("intro did not complete within {} frames", MAX_INTRO_FRAMES);
    };
    if engine.state() != HostState::Ready {
        bail!("engine reported completion but is still loading");
    }
    log::info!(
        "loading complete after {} frames ({:.1} s simulated)",
        done + 1,
        (done + 1) as f32 * FRAME.as_secs_f32()
    );

    let mut spawned = 0;
    let mut peak = 0;
    for step in 0..=SCROLL_STEPS {
        let percent = step as f32 * 100.0 / SCROLL_STEPS as f32;
        spawned += engine.scroll(percent);
        if step == SCROLL_STEPS / 2 {
            engine.set_indicator_open(true);
        }
        recorder.clear_history();
        engine.frame(Some(&mut recorder), FRAME);
        let live = engine.trail().map_or(0, |t| t.particles().len());
        peak = peak.max(live);
    }
    // nothing left to inspect; let the sparks burn out undrawn
    let mut null = NullRenderer;
    for _ in 0..120 {
        engine.frame(Some(&mut null), FRAME);
    }
    let remaining = engine.trail().map_or(0, |t| t.particles().len());
    log::info!(
        "scroll sweep: {} sparks spawned, peak {} live, {} left after settling",
        spawned,
        peak,
        remaining
    );

    engine.teardown();
    log::info!("done in {:?}", started.elapsed());
    Ok(())
}
