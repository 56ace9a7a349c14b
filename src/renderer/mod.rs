//! 2D rendering module
//!
//! The scene is drawn through the `Surface` trait in logical field units, so
//! the same drawing code runs against the browser canvas and test recorders.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::{Sprites, render};

use glam::Vec2;

use crate::sim::Rect;

/// sRGB color with alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Field backdrop
pub const BACKGROUND: Color = Color::rgb(0x8E, 0xD4, 0xA0);
/// Translucent wash behind overlay text
pub const OVERLAY: Color = Color::rgba(142, 212, 160, 0.7);
/// Text, smoke and placeholder sprites
pub const INK: Color = Color::rgb(0x22, 0x5D, 0x31);

/// Text styles used by the HUD and overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Title,
    Body,
}

impl Font {
    pub fn css(&self) -> &'static str {
        match self {
            Font::Title => "36px Neulis",
            Font::Body => "500 18px Quicksand",
        }
    }
}

/// Image handle that may still be loading (or have failed)
pub trait Sprite {
    fn is_ready(&self) -> bool;
}

/// Minimal 2D drawing context
pub trait Surface {
    type Image: Sprite;

    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color);
    fn draw_image(&mut self, image: &Self::Image, rect: Rect);
    fn fill_text(&mut self, text: &str, pos: Vec2, font: Font, color: Color);
    /// Rendered width of `text`
    fn measure_text(&mut self, text: &str, font: Font) -> f32;

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    /// Radians, clockwise in screen space
    fn rotate(&mut self, angle: f32);
    fn scale(&mut self, factor: f32);
}
