//! Turning a logo raster into gather targets.
//!
//! The sequencer only sees [`OpaqueSampler`]; the browser front-end backs it
//! with an offscreen canvas, tests and the headless runner use
//! [`RasterImage`].

use crate::config::SamplerParams;
use crate::geometry::{Placement, SurfaceSize};
use glam::Vec2;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("logo image is not available")]
    Unavailable,
    #[error("cannot sample into a {0}x{1} area")]
    ZeroSize(u32, u32),
    #[error("pixel buffer holds {got} bytes, expected {expected}")]
    BufferMismatch { expected: usize, got: usize },
    #[error("pixel readback failed: {0}")]
    Read(String),
}

/// Capability: given an image and where it will be drawn, report which grid
/// cells are opaque.
pub trait OpaqueSampler {
    /// Intrinsic image size in pixels.
    fn natural_size(&self) -> (u32, u32);

    /// Opaque cell positions in surface coordinates for the image drawn at
    /// `placement`.
    fn opaque_points(
        &mut self,
        placement: &Placement,
        stride: u32,
        threshold: u8,
    ) -> Result<Vec<Vec2>, SampleError>;
}

/// Reinterpret a tightly packed RGBA byte buffer as pixels.
pub fn pixels_from_bytes(bytes: &[u8]) -> Result<&[[u8; 4]], SampleError> {
    bytemuck::try_cast_slice(bytes).map_err(|_| SampleError::BufferMismatch {
        expected: bytes.len() / 4 * 4,
        got: bytes.len(),
    })
}

/// Scan a `width` x `height` RGBA buffer on a `stride` grid and emit
/// `origin + (x, y)` for each cell whose alpha exceeds `threshold`.
pub fn opaque_cells(
    pixels: &[[u8; 4]],
    width: u32,
    height: u32,
    origin: Vec2,
    stride: u32,
    threshold: u8,
) -> Vec<Vec2> {
    let stride = stride.max(1) as usize;
    let (w, h) = (width as usize, height as usize);
    let mut out = Vec::new();
    for y in (0..h).step_by(stride) {
        for x in (0..w).step_by(stride) {
            match pixels.get(y * w + x) {
                Some(px) if px[3] > threshold => {
                    out.push(origin + Vec2::new(x as f32, y as f32));
                }
                _ => {}
            }
        }
    }
    out
}

/// Place the logo on `surface` and collect its targets.
pub fn sample_targets(
    sampler: &mut dyn OpaqueSampler,
    surface: SurfaceSize,
    params: &SamplerParams,
) -> Result<(Placement, Vec<Vec2>), SampleError> {
    let placement = Placement::for_logo(
        surface,
        sampler.natural_size(),
        params.logo_width,
        params.caption_gap,
    )
    .ok_or(SampleError::ZeroSize(surface.width, surface.height))?;
    let points = sampler.opaque_points(&placement, params.stride, params.alpha_threshold)?;
    Ok((placement, points))
}

/// Decoded RGBA image held in memory.
#[derive(Clone, Debug)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl RasterImage {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, SampleError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(SampleError::BufferMismatch {
                expected,
                got: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Uniformly colored image.
    pub fn solid(width: u32, height: u32, px: [u8; 4]) -> Self {
        let rgba = px.repeat(width as usize * height as usize);
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Build an image from a per-pixel function of `(x, y)`.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                rgba.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Nearest-neighbour rescale into a scratch buffer of the placement size.
    fn rasterize(&self, pw: u32, ph: u32) -> Result<Vec<[u8; 4]>, SampleError> {
        let src = pixels_from_bytes(&self.rgba)?;
        let mut buf = Vec::with_capacity(pw as usize * ph as usize);
        for y in 0..ph {
            let sy = (y as u64 * self.height as u64 / ph as u64) as usize;
            for x in 0..pw {
                let sx = (x as u64 * self.width as u64 / pw as u64) as usize;
                buf.push(src[sy * self.width as usize + sx]);
            }
        }
        Ok(buf)
    }
}

impl OpaqueSampler for RasterImage {
    fn natural_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn opaque_points(
        &mut self,
        placement: &Placement,
        stride: u32,
        threshold: u8,
    ) -> Result<Vec<Vec2>, SampleError> {
        let (pw, ph) = placement.pixel_size();
        if pw == 0 || ph == 0 || self.width == 0 || self.height == 0 {
            return Err(SampleError::ZeroSize(pw, ph));
        }
        // scratch buffer is dropped on return
        let buf = self.rasterize(pw, ph)?;
        Ok(opaque_cells(&buf, pw, ph, placement.origin, stride, threshold))
    }
}
