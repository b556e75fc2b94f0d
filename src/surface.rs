use crate::color::Rgba;
use crate::image::Image;
use glam::{DAffine2, DVec2};

/// Axis aligned rectangle in the current drawing space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn min(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn max(&self) -> DVec2 {
        DVec2::new(self.x + self.w, self.y + self.h)
    }

    /// Map both corners through `transform`. Only translation and scale are
    /// expected, so the result stays axis aligned.
    pub fn transformed(&self, transform: &DAffine2) -> Self {
        let a = transform.transform_point2(self.min());
        let b = transform.transform_point2(self.max());
        let lo = a.min(b);
        let hi = a.max(b);
        Self::new(lo.x, lo.y, hi.x - lo.x, hi.y - lo.y)
    }

    /// Whole pixel rectangle `(x, y, w, h)` covering the pixels whose centres
    /// lie inside. `None` when no centre does.
    pub fn pixel_bounds(&self) -> Option<(i32, i32, u32, u32)> {
        let x0 = (self.x - 0.5).ceil();
        let y0 = (self.y - 0.5).ceil();
        let x1 = (self.x + self.w - 0.5).ceil();
        let y1 = (self.y + self.h - 0.5).ceil();
        if !(x1 > x0 && y1 > y0) {
            return None;
        }
        Some((x0 as i32, y0 as i32, (x1 - x0) as u32, (y1 - y0) as u32))
    }
}

/// The drawing operations the renderer needs from its host.
pub trait Surface {
    /// Pixel dimensions as `(width, height)`.
    fn size(&self) -> (u32, u32);

    fn fill_rect(&mut self, rect: Rect, color: Rgba) -> anyhow::Result<()>;

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba) -> anyhow::Result<()>;

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) -> anyhow::Result<()>;

    /// Draw the `src` region of `image` (in image pixels) scaled into `dst`.
    fn draw_image(&mut self, image: &Image, src: Rect, dst: Rect) -> anyhow::Result<()>;

    /// Replace the transform applied to subsequent drawing.
    fn set_transform(&mut self, transform: DAffine2);

    /// Back to the identity transform.
    fn reset(&mut self);
}
