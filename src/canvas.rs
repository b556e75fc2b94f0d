use crate::StringToAnyhow;
use glam::{DAffine2, DVec2};
use gridcast::{Image, Rect, Rgba, Surface};
use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::rect::{Point, Rect as SdlRect};
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Static textures uploaded from map images, keyed by image address. Images
/// are owned by the map and live for the whole run.
pub(crate) struct TextureCache<'t> {
    creator: &'t TextureCreator<WindowContext>,
    textures: HashMap<*const Image, Texture<'t>>,
}

impl<'t> TextureCache<'t> {
    pub fn new(creator: &'t TextureCreator<WindowContext>) -> Self {
        Self {
            creator,
            textures: HashMap::new(),
        }
    }

    fn get(&mut self, image: &Image) -> anyhow::Result<&Texture<'t>> {
        let creator = self.creator;
        match self.textures.entry(image as *const Image) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                let (width, height) = (image.width(), image.height());
                let mut texture =
                    creator.create_texture_static(PixelFormatEnum::RGBA32, width, height)?;
                texture.update(None, image.pixels(), width as usize * 4)?;
                texture.set_blend_mode(BlendMode::Blend);
                log::debug!("uploaded {width}x{height} texture");
                Ok(&*entry.insert(texture))
            }
        }
    }
}

/// `Surface` drawing straight onto the window canvas.
pub(crate) struct CanvasSurface<'a, 't> {
    canvas: &'a mut Canvas<Window>,
    textures: &'a mut TextureCache<'t>,
    size: (u32, u32),
    transform: DAffine2,
}

impl<'a, 't> CanvasSurface<'a, 't> {
    pub fn new(
        canvas: &'a mut Canvas<Window>,
        textures: &'a mut TextureCache<'t>,
    ) -> anyhow::Result<Self> {
        let size = canvas.output_size().ah()?;
        canvas.set_blend_mode(BlendMode::Blend);
        Ok(Self {
            canvas,
            textures,
            size,
            transform: DAffine2::IDENTITY,
        })
    }

    fn set_color(&mut self, color: Rgba) {
        let [r, g, b, a] = color.to_rgba8();
        self.canvas.set_draw_color(Color::RGBA(r, g, b, a));
    }
}

fn sdl_rect(rect: Rect) -> Option<SdlRect> {
    rect.pixel_bounds().map(|(x, y, w, h)| SdlRect::new(x, y, w, h))
}

fn sdl_point(p: DVec2) -> Point {
    let p = p.floor();
    Point::new(p.x as i32, p.y as i32)
}

impl Surface for CanvasSurface<'_, '_> {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) -> anyhow::Result<()> {
        if let Some(rect) = sdl_rect(rect.transformed(&self.transform)) {
            self.set_color(color);
            self.canvas.fill_rect(rect).ah()?;
        }
        Ok(())
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba) -> anyhow::Result<()> {
        let a = self.transform.transform_point2(from);
        let b = self.transform.transform_point2(to);
        if !(a.is_finite() && b.is_finite()) {
            anyhow::bail!("line from {from} to {to} is not finite");
        }

        self.set_color(color);
        self.canvas.draw_line(sdl_point(a), sdl_point(b)).ah()
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

        // one span per pixel row
        let top = (c.y - r.y - 0.5).ceil() as i32;
        let bottom = (c.y + r.y - 0.5).ceil() as i32;
        let rows: Vec<SdlRect> = (top..bottom)
            .filter_map(|y| {
                let dy = (y as f64 + 0.5 - c.y) / r.y;
                if dy.abs() > 1. {
                    return None;
                }
                let half = r.x * (1. - dy * dy).sqrt();
                sdl_rect(Rect::new(c.x - half, y as f64, 2. * half, 1.))
            })
            .collect();
        if rows.is_empty() {
            return Ok(());
        }

        self.set_color(color);
        self.canvas.fill_rects(&rows).ah()
    }

    fn draw_image(&mut self, image: &Image, src: Rect, dst: Rect) -> anyhow::Result<()> {
        let Some(dst) = sdl_rect(dst.transformed(&self.transform)) else {
            return Ok(());
        };
        let src = SdlRect::new(
            src.x.floor() as i32,
            src.y.floor() as i32,
            src.w.ceil().max(1.) as u32,
            src.h.ceil().max(1.) as u32,
        );

        let texture = self.textures.get(image)?;
        self.canvas.copy(texture, src, dst).ah()
    }

    fn set_transform(&mut self, transform: DAffine2) {
        self.transform = transform;
    }

    fn reset(&mut self) {
        self.transform = DAffine2::IDENTITY;
    }
}
