use crate::constants::{CAPTION_COLOR, CAPTION_FONT};
use glam::Vec2;
use sparkfall_core::{Placement, Renderer, Rgba, SurfaceSize};
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Canvas 2D implementation of the engine's renderer.
pub struct Canvas2d {
    ctx: web::CanvasRenderingContext2d,
    logo: Option<web::HtmlImageElement>,
}

impl Renderer for Canvas2d {
    fn clear(&mut self, surface: SurfaceSize) {
        self.ctx.set_global_alpha(1.0);
        self.ctx
            .clear_rect(0.0, 0.0, surface.width as f64, surface.height as f64);
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Rgba, alpha: f32) {
        if radius <= 0.0 {
            return;
        }
        self.ctx
            .set_global_alpha((alpha * color.a).clamp(0.0, 1.0) as f64);
        self.ctx.set_fill_style_str(&color.css_rgb());
        self.ctx.begin_path();
        _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.fill();
        self.ctx.set_global_alpha(1.0);
    }

    fn logo(&mut self, placement: &Placement, alpha: f32) {
        let Some(img) = &self.logo else {
            return;
        };
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
        _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            placement.origin.x as f64,
            placement.origin.y as f64,
            placement.size.x as f64,
            placement.size.y as f64,
        );
        self.ctx.set_global_alpha(1.0);
    }

    fn caption(&mut self, text: &str, anchor: Vec2) {
        self.ctx.set_font(CAPTION_FONT);
        self.ctx.set_text_align("center");
        self.ctx.set_fill_style_str(CAPTION_COLOR);
        _ = self.ctx.fill_text(text, anchor.x as f64, anchor.y as f64);
    }
}

/// A canvas plus its lazily acquired 2D context. If the context cannot be
/// obtained the frame is skipped and acquisition is retried next frame.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    renderer: Option<Canvas2d>,
    logo: Option<web::HtmlImageElement>,
    warned: bool,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> Self {
        Self {
            canvas,
            renderer: None,
            logo: None,
            warned: false,
        }
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    pub fn set_logo(&mut self, img: web::HtmlImageElement) {
        if let Some(r) = self.renderer.as_mut() {
            r.logo = Some(img.clone());
        }
        self.logo = Some(img);
    }

    pub fn renderer(&mut self) -> Option<&mut dyn Renderer> {
        if self.renderer.is_none() {
            match acquire_2d(&self.canvas) {
                Ok(ctx) => {
                    self.renderer = Some(Canvas2d {
                        ctx,
                        logo: self.logo.clone(),
                    });
                    self.warned = false;
                }
                Err(e) => {
                    if !self.warned {
                        log::warn!("2d context unavailable, skipping frame: {:?}", e);
                        self.warned = true;
                    }
                    return None;
                }
            }
        }
        self.renderer.as_mut().map(|r| r as &mut dyn Renderer)
    }
}

pub fn acquire_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}
