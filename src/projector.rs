//! Turns ray hits into vertical screen strips.

use crate::color::Rgba;
use crate::config::Config;
use crate::image::Image;
use crate::player::Player;
use crate::ray::cast_ray;
use crate::scene::{Cell, Scene};
use crate::surface::{Rect, Surface};
use glam::{DVec2, IVec2};

/// What a strip is painted with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fill<'s> {
    /// Already shaded by depth.
    Color(Rgba),
    /// `u` is the horizontal texture coordinate in `[0, 1)`, `shade` the
    /// brightness factor to darken the slice by.
    Texture { image: &'s Image, u: f64, shade: f32 },
}

/// One projected screen column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strip<'s> {
    pub column: usize,
    /// Distance along the view axis.
    pub depth: f64,
    pub top: f64,
    pub height: f64,
    pub point: DVec2,
    pub cell: IVec2,
    pub fill: Fill<'s>,
}

pub struct Projector {
    config: Config,
}

impl Projector {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Brightness for a wall `depth` away: nearer is brighter.
    pub fn shade(depth: f64) -> f32 {
        (1. / depth).clamp(-1., 1.) as f32
    }

    /// Horizontal texture coordinate of `point` on the face of `cell` it lies
    /// on. Points on a vertical face (left or right edge) use their `y`
    /// offset, everything else the `x` offset.
    pub fn texture_u(point: DVec2, cell: IVec2, eps: f64) -> f64 {
        let t = point - cell.as_dvec2();
        let on_vertical_face = t.x.abs() < eps || (t.x - 1.).abs() < eps;
        let u = if on_vertical_face && t.y > 0. {
            t.y
        } else {
            t.x
        };
        u.clamp(0., 1.)
    }

    /// Project screen column `column` of a `screen_height` pixel tall view.
    /// `None` when the column's ray hits nothing.
    pub fn strip<'s>(
        &self,
        scene: &'s Scene,
        player: &Player,
        fov: (DVec2, DVec2),
        column: usize,
        screen_height: f64,
    ) -> Option<Strip<'s>> {
        let t = column as f64 / self.config.strip_count as f64;
        let target = fov.0.lerp(fov.1, t);
        let cast = cast_ray(scene, player.position, target, &self.config);
        let cell = cast.cell?;

        let depth = (cast.point - player.position).dot(player.forward());
        if depth <= 0. {
            return None;
        }
        let height = screen_height / depth;
        let shade = Self::shade(depth);

        let fill = match scene.solid(cell)? {
            Cell::Empty => return None,
            Cell::Color(color) => Fill::Color(color.brightness(shade)),
            Cell::Texture(image) => Fill::Texture {
                image,
                u: Self::texture_u(cast.point, cell, self.config.eps),
                shade,
            },
        };

        Some(Strip {
            column,
            depth,
            top: (screen_height - height) * 0.5,
            height,
            point: cast.point,
            cell,
            fill,
        })
    }

    /// Every column that hit a wall, left to right.
    pub fn strips<'s>(
        &self,
        scene: &'s Scene,
        player: &Player,
        screen_height: f64,
    ) -> Vec<Strip<'s>> {
        let fov = player.fov_range(&self.config);
        (0..self.config.strip_count)
            .filter_map(|column| self.strip(scene, player, fov, column, screen_height))
            .collect()
    }

    /// Draw the walls. Columns that miss are left as they are.
    pub fn render_scene<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        scene: &Scene,
        player: &Player,
    ) -> anyhow::Result<()> {
        let (width, height) = surface.size();
        let width = width as f64;
        let strip_width = width / self.config.strip_count as f64;

        for strip in self.strips(scene, player, height as f64) {
            let x = strip.column as f64 * strip_width;
            match strip.fill {
                Fill::Color(color) => {
                    // one pixel of overlap hides seams between columns
                    let w = (strip_width + 1.).min(width - x);
                    let rect = Rect::new(x, strip.top, w, strip.height);
                    surface.fill_rect(rect, color)?;
                }
                Fill::Texture { image, u, shade } => {
                    let sx = (u * image.width() as f64)
                        .floor()
                        .min(image.width() as f64 - 1.);
                    let src = Rect::new(sx, 0., 1., image.height() as f64);
                    let dst = Rect::new(x, strip.top, strip_width, strip.height);
                    surface.draw_image(image, src, dst)?;
                    surface.fill_rect(dst, Rgba::BLACK.with_alpha(1. - shade))?;
                }
            }
        }

        Ok(())
    }
}
