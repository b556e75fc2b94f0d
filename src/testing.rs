//! Test doubles shared by the unit tests.

use crate::color::Rgba;
use crate::image::Image;
use crate::scene::{Cell, Scene};
use crate::surface::{Rect, Surface};
use glam::{DAffine2, DVec2};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    FillRect(Rect, Rgba),
    Line(DVec2, DVec2, Rgba),
    Circle(DVec2, f64, Rgba),
    Image { src: Rect, dst: Rect },
    Transform(DAffine2),
    Reset,
}

/// Surface that only remembers what was drawn.
pub struct Recorder {
    pub size: (u32, u32),
    pub calls: Vec<Call>,
}

impl Recorder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            calls: Vec::new(),
        }
    }

    pub fn rects(&self) -> Vec<(Rect, Rgba)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::FillRect(r, color) => Some((*r, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<(DVec2, DVec2)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Line(a, b, _) => Some((*a, *b)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for Recorder {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) -> anyhow::Result<()> {
        self.calls.push(Call::FillRect(rect, color));
        Ok(())
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba) -> anyhow::Result<()> {
        self.calls.push(Call::Line(from, to, color));
        Ok(())
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) -> anyhow::Result<()> {
        self.calls.push(Call::Circle(center, radius, color));
        Ok(())
    }

    fn draw_image(&mut self, _image: &Image, src: Rect, dst: Rect) -> anyhow::Result<()> {
        self.calls.push(Call::Image { src, dst });
        Ok(())
    }

    fn set_transform(&mut self, transform: DAffine2) {
        self.calls.push(Call::Transform(transform));
    }

    fn reset(&mut self) {
        self.calls.push(Call::Reset);
    }
}

/// `width` x `height` grid with a full height wall in `column`.
pub fn wall_column(width: usize, height: usize, column: usize, wall: Cell) -> Scene {
    let rows = (0..height)
        .map(|_| {
            (0..width)
                .map(|x| if x == column { wall.clone() } else { Cell::Empty })
                .collect()
        })
        .collect();
    Scene::new(rows)
}
