//! The drawable-surface seam.
//! `CanvasSurface` drives a browser 2D context. Test builds add `PixelBuffer`,
//! a software rasterizer with the same contract, to check pixel output natively.
//! All coordinates are backing-store pixels; no transform is ever applied.

#[cfg(test)]
use std::collections::hash_map::DefaultHasher;
#[cfg(test)]
use std::hash::{Hash, Hasher};

use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::geometry::PixelRect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub const fn with_alpha(self, a: f64) -> Rgba {
        Rgba { rgb: self, a }
    }

    pub const fn opaque(self) -> Rgba {
        self.with_alpha(1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f64,
}

impl Rgba {
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.rgb.r, self.rgb.g, self.rgb.b, self.a)
    }
}

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("2d context unavailable: {0}")]
    ContextUnavailable(String),
}

pub trait Surface {
    /// Resizes the backing store. Content is discarded.
    fn resize(&mut self, width: u32, height: u32);
    fn size(&self) -> (u32, u32);
    /// Makes every pixel fully transparent.
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: PixelRect, color: Rgba);
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba);
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| SurfaceError::ContextUnavailable(format!("{:?}", e)))?
            .ok_or_else(|| SurfaceError::ContextUnavailable("no context returned".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::ContextUnavailable("not a 2d context".into()))?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, width: u32, height: u32) {
        // Assigning width/height resets the context state and clears the bitmap.
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self) {
        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
        self.ctx
            .clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        self.ctx.arc(cx, cy, radius, 0.0, std::f64::consts::PI * 2.0).ok();
        self.ctx.fill();
    }
}

/// RGBA8 software surface. A pixel is covered when its center lies inside the
/// shape; no anti-aliasing, so output is exact and reproducible.
#[cfg(test)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

#[cfg(test)]
impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    pub fn digest(&self) -> u64 {
        let mut h = DefaultHasher::new();
        self.width.hash(&mut h);
        self.height.hash(&mut h);
        self.data.hash(&mut h);
        h.finish()
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba) {
        let a = color.a.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let dst_a = self.data[i + 3] as f64 / 255.0;
        let out_a = a + dst_a * (1.0 - a);
        let src = [color.rgb.r, color.rgb.g, color.rgb.b];
        for (c, s) in src.into_iter().enumerate() {
            let d = self.data[i + c] as f64;
            let v = (s as f64 * a + d * dst_a * (1.0 - a)) / out_a;
            self.data[i + c] = v.round().clamp(0.0, 255.0) as u8;
        }
        self.data[i + 3] = (out_a * 255.0).round() as u8;
    }

    /// Pixel index range whose centers fall in `[start, start + len)`, clipped.
    fn span(start: f64, len: f64, limit: u32) -> std::ops::Range<u32> {
        let lo = (start - 0.5).ceil().max(0.0);
        let hi = (start + len - 0.5).ceil().min(limit as f64);
        if hi <= lo {
            return 0..0;
        }
        lo as u32..hi as u32
    }
}

#[cfg(test)]
impl Surface for PixelBuffer {
    fn resize(&mut self, width: u32, height: u32) {
        *self = PixelBuffer::new(width, height);
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.data.fill(0);
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgba) {
        if !(rect.width > 0.0 && rect.height > 0.0) {
            return;
        }
        for y in Self::span(rect.y, rect.height, self.height) {
            for x in Self::span(rect.x, rect.width, self.width) {
                self.blend(x, y, color);
            }
        }
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        if !(radius > 0.0) {
            return;
        }
        let r2 = radius * radius;
        for y in Self::span(cy - radius, radius * 2.0, self.height) {
            for x in Self::span(cx - radius, radius * 2.0, self.width) {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::from_hex(0xff0000);

    fn rect(x: f64, y: f64, w: f64, h: f64) -> PixelRect {
        PixelRect {
            x,
            y,
            width: w,
            height: h,
        }
    }

    #[test]
    fn css_string_matches_canvas_syntax() {
        assert_eq!(Rgb::from_hex(0x38bdf8).with_alpha(0.5).to_css(), "rgba(56, 189, 248, 0.5)");
    }

    #[test]
    fn rect_covers_pixel_centers_only() {
        let mut buf = PixelBuffer::new(4, 4);
        buf.fill_rect(rect(0.6, 0.0, 1.0, 1.0), RED.opaque());
        assert_eq!(buf.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(buf.pixel(1, 0), Some([255, 0, 0, 255]));
        assert_eq!(buf.pixel(2, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn fills_are_clipped_to_bounds() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.fill_rect(rect(-5.0, -5.0, 100.0, 100.0), RED.opaque());
        buf.fill_circle(1.0, 1.0, 50.0, Rgb::from_hex(0x00ff00).opaque());
        assert_eq!(buf.pixel(1, 1), Some([0, 255, 0, 255]));
    }

    #[test]
    fn translucent_fill_blends_over_opaque() {
        let mut buf = PixelBuffer::new(1, 1);
        buf.fill_rect(rect(0.0, 0.0, 1.0, 1.0), Rgb::from_hex(0x000000).opaque());
        buf.fill_rect(rect(0.0, 0.0, 1.0, 1.0), Rgb::from_hex(0xffffff).with_alpha(0.2));
        assert_eq!(buf.pixel(0, 0), Some([51, 51, 51, 255]));
    }

    #[test]
    fn resize_discards_content() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.fill_rect(rect(0.0, 0.0, 2.0, 2.0), RED.opaque());
        buf.resize(3, 1);
        assert_eq!(buf.size(), (3, 1));
        assert_eq!(buf, PixelBuffer::new(3, 1));
    }
}
