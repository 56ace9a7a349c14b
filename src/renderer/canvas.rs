//! Canvas 2D backend (WASM only)

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, ImageSmoothingQuality};

use super::{Color, Font, Sprite, Surface};
use crate::consts::RENDER_SCALE;
use crate::error::PlatformError;
use crate::sim::Rect;

impl Sprite for HtmlImageElement {
    fn is_ready(&self) -> bool {
        self.complete() && self.natural_width() != 0
    }
}

/// Drawing surface over a canvas whose backing store is `RENDER_SCALE`
/// times its logical size
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, PlatformError> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(PlatformError::NoContext)?
            .dyn_into()
            .map_err(|_| PlatformError::NoContext)?;
        Ok(Self { ctx })
    }

    /// Reset the transform to logical units; call once per frame
    pub fn begin_frame(&mut self) {
        check(self.ctx.set_transform(RENDER_SCALE, 0.0, 0.0, RENDER_SCALE, 0.0, 0.0));
        self.ctx.set_image_smoothing_enabled(true);
        self.ctx.set_image_smoothing_quality(ImageSmoothingQuality::High);
    }
}

/// Canvas calls only fail on invalid arguments; log rather than abort the frame
fn check(result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::warn!("Canvas call failed: {:?}", e);
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        check(self.ctx.ellipse(
            center.x as f64,
            center.y as f64,
            radii.x.max(0.0) as f64,
            radii.y.max(0.0) as f64,
            0.0,
            0.0,
            std::f64::consts::TAU,
        ));
        self.ctx.fill();
    }

    fn draw_image(&mut self, image: &HtmlImageElement, rect: Rect) {
        check(self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            rect.x as f64,
            rect.y as f64,
            rect.w as f64,
            rect.h as f64,
        ));
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: Font, color: Color) {
        self.ctx.set_font(font.css());
        self.ctx.set_fill_style_str(&color.to_css());
        check(self.ctx.fill_text(text, pos.x as f64, pos.y as f64));
    }

    fn measure_text(&mut self, text: &str, font: Font) -> f32 {
        self.ctx.set_font(font.css());
        match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width() as f32,
            Err(e) => {
                log::warn!("measureText failed: {:?}", e);
                0.0
            }
        }
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        check(self.ctx.translate(offset.x as f64, offset.y as f64));
    }

    fn rotate(&mut self, angle: f32) {
        check(self.ctx.rotate(angle as f64));
    }

    fn scale(&mut self, factor: f32) {
        check(self.ctx.scale(factor as f64, factor as f64));
    }
}
