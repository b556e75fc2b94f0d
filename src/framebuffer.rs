//! Software [`Surface`] writing RGBA8 pixels into memory.

use crate::color::Rgba;
use crate::image::Image;
use crate::surface::{Rect, Surface};
use glam::{DAffine2, DVec2};
use std::ops::Range;

/// channels per pixel, R G B A
const CHANNELS: usize = 4;

#[derive(Clone, Debug)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    transform: DAffine2,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * CHANNELS],
            transform: DAffine2::IDENTITY,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes per row.
    pub fn pitch(&self) -> usize {
        self.width as usize * CHANNELS
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = self.index(x, y);
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    pub fn clear(&mut self, color: Rgba) {
        let rgba = color.to_rgba8();
        for px in self.pixels.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&rgba);
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Source-over blend of `color` onto one pixel.
    fn blend(&mut self, x: u32, y: u32, color: Rgba) {
        let idx = self.index(x, y);
        let a = color.a.clamp(0., 1.);
        if a >= 1. {
            self.pixels[idx..idx + CHANNELS].copy_from_slice(&color.to_rgba8());
            return;
        }
        if a <= 0. {
            return;
        }

        let dst = Rgba::from_rgba8(self.pixel(x, y));
        let mix = |s: f32, d: f32| s.clamp(0., 1.) * a + d * (1. - a);
        let out = Rgba::new(
            mix(color.r, dst.r),
            mix(color.g, dst.g),
            mix(color.b, dst.b),
            a + dst.a * (1. - a),
        );
        self.pixels[idx..idx + CHANNELS].copy_from_slice(&out.to_rgba8());
    }

    fn plot(&mut self, p: DVec2, color: Rgba) {
        let p = p.floor();
        if p.x >= 0. && p.y >= 0. && p.x < self.width as f64 && p.y < self.height as f64 {
            self.blend(p.x as u32, p.y as u32, color);
        }
    }
}

/// Pixels whose centres fall in `[lo, hi)`, clipped to `0..limit`.
fn span(lo: f64, hi: f64, limit: u32) -> Range<u32> {
    let start = (lo - 0.5).ceil().clamp(0., limit as f64) as u32;
    let end = (hi - 0.5).ceil().clamp(0., limit as f64) as u32;
    start..end.max(start)
}

impl Surface for Framebuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) -> anyhow::Result<()> {
        let r = rect.transformed(&self.transform);
        for y in span(r.y, r.y + r.h, self.height) {
            for x in span(r.x, r.x + r.w, self.width) {
                self.blend(x, y, color);
            }
        }
        Ok(())
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba) -> anyhow::Result<()> {
        let a = self.transform.transform_point2(from);
        let b = self.transform.transform_point2(to);
        let d = b - a;
        let steps = d.x.abs().max(d.y.abs()).ceil().max(1.);
        if !steps.is_finite() {
            anyhow::bail!("line from {from} to {to} is not finite");
        }

        for i in 0..=steps as u64 {
            self.plot(a.lerp(b, i as f64 / steps), color);
        }
        Ok(())
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) -> anyhow::Result<()> {
        let c = self.transform.transform_point2(center);
        let r = self
            .transform
            .transform_vector2(DVec2::splat(radius))
            .abs();
        if r.x <= 0. || r.y <= 0. {
            return Ok(());
        }

        for y in span(c.y - r.y, c.y + r.y, self.height) {
            for x in span(c.x - r.x, c.x + r.x, self.width) {
                let q = (DVec2::new(x as f64 + 0.5, y as f64 + 0.5) - c) / r;
                if q.length_squared() <= 1. {
                    self.blend(x, y, color);
                }
            }
        }
        Ok(())
    }

    fn draw_image(&mut self, image: &Image, src: Rect, dst: Rect) -> anyhow::Result<()> {
        let d = dst.transformed(&self.transform);
        if d.w <= 0. || d.h <= 0. {
            return Ok(());
        }

        let max_x = image.width() as f64 - 1.;
        let max_y = image.height() as f64 - 1.;
        for y in span(d.y, d.y + d.h, self.height) {
            let v = (y as f64 + 0.5 - d.y) / d.h;
            let sy = (src.y + v * src.h).floor().clamp(0., max_y) as u32;
            for x in span(d.x, d.x + d.w, self.width) {
                let u = (x as f64 + 0.5 - d.x) / d.w;
                let sx = (src.x + u * src.w).floor().clamp(0., max_x) as u32;
                self.blend(x, y, Rgba::from_rgba8(image.pixel(sx, sy)));
            }
        }
        Ok(())
    }

    fn set_transform(&mut self, transform: DAffine2) {
        self.transform = transform;
    }

    fn reset(&mut self) {
        self.transform = DAffine2::IDENTITY;
    }
}
