use crate::render::acquire_2d;
use glam::Vec2;
use sparkfall_core::{opaque_cells, pixels_from_bytes, OpaqueSampler, Placement, SampleError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Fetch and decode an image. Rejects on network or decode errors.
pub async fn load_image(uri: &str) -> anyhow::Result<web::HtmlImageElement> {
    let img = web::HtmlImageElement::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    img.set_src(uri);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| anyhow::anyhow!("decoding {}: {:?}", uri, e))?;
    Ok(img)
}

/// Samples a decoded logo through an offscreen canvas.
pub struct CanvasSampler {
    image: web::HtmlImageElement,
    buffer: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSampler {
    pub fn new(document: &web::Document, image: web::HtmlImageElement) -> anyhow::Result<Self> {
        let buffer = document
            .create_element("canvas")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let ctx = acquire_2d(&buffer)?;
        Ok(Self { image, buffer, ctx })
    }
}

impl OpaqueSampler for CanvasSampler {
    fn natural_size(&self) -> (u32, u32) {
        (self.image.natural_width(), self.image.natural_height())
    }

    fn opaque_points(
        &mut self,
        placement: &Placement,
        stride: u32,
        threshold: u8,
    ) -> Result<Vec<Vec2>, SampleError> {
        if !self.image.complete() {
            return Err(SampleError::Unavailable);
        }
        let (pw, ph) = placement.pixel_size();
        if pw == 0 || ph == 0 {
            return Err(SampleError::ZeroSize(pw, ph));
        }
        self.buffer.set_width(pw);
        self.buffer.set_height(ph);
        self.ctx.clear_rect(0.0, 0.0, pw as f64, ph as f64);
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                &self.image,
                0.0,
                0.0,
                pw as f64,
                ph as f64,
            )
            .map_err(|e| SampleError::Read(format!("{:?}", e)))?;
        let data = self
            .ctx
            .get_image_data(0.0, 0.0, pw as f64, ph as f64)
            .map_err(|e| SampleError::Read(format!("{:?}", e)))?
            .data();
        let points = pixels_from_bytes(&data.0)
            .map(|px| opaque_cells(px, pw, ph, placement.origin, stride, threshold));

        // the buffer keeps nothing between samples
        self.ctx.clear_rect(0.0, 0.0, pw as f64, ph as f64);
        self.buffer.set_width(1);
        self.buffer.set_height(1);
        points
    }
}
