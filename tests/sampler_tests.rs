// Host-side tests for logo placement and opaque-pixel sampling.

use glam::Vec2;
use sparkfall_core::sampler::sample_targets;
use sparkfall_core::{
    opaque_cells, pixels_from_bytes, OpaqueSampler, Placement, RasterImage, SampleError,
    SamplerParams, SurfaceSize,
};

#[test]
fn opaque_cells_uses_strict_threshold_on_stride_grid() {
    // 4x4 image; only grid cells (0,0) (2,0) (0,2) (2,2) are visited with stride 2
    let mut px = vec![[0u8; 4]; 16];
    px[0] = [255, 255, 255, 129]; // (0,0) just above threshold
    px[2] = [255, 255, 255, 128]; // (2,0) at threshold: excluded
    px[8] = [0, 0, 0, 255]; // (0,2)
    px[1] = [0, 0, 0, 255]; // (1,0) off-grid
    let origin = Vec2::new(10.0, 20.0);
    let pts = opaque_cells(&px, 4, 4, origin, 2, 128);
    assert_eq!(pts, vec![Vec2::new(10.0, 20.0), Vec2::new(10.0, 22.0)]);
}

#[test]
fn opaque_cells_treats_zero_stride_as_one() {
    let px = vec![[0, 0, 0, 255]; 9];
    assert_eq!(opaque_cells(&px, 3, 3, Vec2::ZERO, 0, 128).len(), 9);
}

#[test]
fn pixel_view_rejects_ragged_buffers() {
    assert_eq!(pixels_from_bytes(&[0u8; 8]).map(|p| p.len()).ok(), Some(2));
    assert!(matches!(
        pixels_from_bytes(&[0u8; 7]),
        Err(SampleError::BufferMismatch { got: 7, .. })
    ));
    assert!(RasterImage::new(2, 2, vec![0; 15]).is_err());
    assert!(RasterImage::new(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn placement_centres_logo_above_caption_gap() {
    let p = Placement::for_logo(SurfaceSize::new(400, 300), (100, 50), 220.0, 48.0)
        .expect("placement");
    assert_eq!(p.size, Vec2::new(220.0, 110.0));
    assert_eq!(p.origin, Vec2::new(90.0, 71.0));
    assert_eq!(p.pixel_size(), (220, 110));
    assert_eq!(p.bottom_center(), Vec2::new(200.0, 181.0));
}

#[test]
fn placement_shrinks_to_fit_small_surfaces() {
    let surface = SurfaceSize::new(100, 60);
    let p = Placement::for_logo(surface, (10, 10), 220.0, 48.0).expect("placement");
    assert_eq!(p.size, Vec2::new(60.0, 60.0));
    assert_eq!(p.origin, Vec2::new(20.0, 0.0));
    assert!(p.origin.y + p.size.y <= surface.height as f32);
}

#[test]
fn placement_needs_a_real_surface_and_image() {
    assert!(Placement::for_logo(SurfaceSize::new(0, 300), (10, 10), 220.0, 48.0).is_none());
    assert!(Placement::for_logo(SurfaceSize::new(300, 300), (0, 10), 220.0, 48.0).is_none());
}

#[test]
fn raster_image_scales_into_placement() {
    // left half opaque, right half clear
    let mut img = RasterImage::from_fn(2, 1, |x, _| if x == 0 { [255; 4] } else { [0; 4] });
    let placement = Placement {
        origin: Vec2::new(5.0, 5.0),
        size: Vec2::new(8.0, 4.0),
    };
    let pts = img.opaque_points(&placement, 1, 128).expect("sample");
    assert_eq!(pts.len(), 16);
    for p in &pts {
        assert!(p.x >= 5.0 && p.x < 9.0, "point {p:?} outside opaque half");
        assert!(p.y >= 5.0 && p.y < 9.0);
    }
}

#[test]
fn sample_targets_lands_inside_surface() {
    let surface = SurfaceSize::new(320, 240);
    let mut img = RasterImage::solid(64, 32, [200, 100, 0, 255]);
    let params = SamplerParams::default();
    let (placement, targets) = sample_targets(&mut img, surface, &params).expect("targets");
    assert!(!targets.is_empty());
    for t in &targets {
        assert!(surface.contains(*t), "target {t:?} off surface");
        assert!(t.x >= placement.origin.x && t.y >= placement.origin.y);
    }
}

#[test]
fn sample_targets_reports_empty_surface() {
    let mut img = RasterImage::solid(8, 8, [0, 0, 0, 255]);
    let res = sample_targets(&mut img, SurfaceSize::new(0, 0), &SamplerParams::default());
    assert!(matches!(res, Err(SampleError::ZeroSize(0, 0))));
}
