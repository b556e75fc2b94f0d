//! Top-down debug view of the grid, the player and its view wedge.

use crate::config::Config;
use crate::player::Player;
use crate::ray;
use crate::scene::{Cell, Scene};
use crate::surface::{Rect, Surface};
use glam::{DAffine2, DVec2};

pub struct Minimap {
    config: Config,
}

impl Minimap {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Grid space to surface pixels: one cell is `minimap_scale` of the
    /// surface width, offset from the top left corner.
    pub fn transform(&self, surface_size: (u32, u32)) -> DAffine2 {
        let size = DVec2::new(surface_size.0 as f64, surface_size.1 as f64);
        let cell = size.x * self.config.minimap_scale;
        DAffine2::from_translation(size * self.config.minimap_offset)
            * DAffine2::from_scale(DVec2::splat(cell))
    }

    /// Surface pixel to grid space, for pointer driven probes.
    pub fn to_grid(&self, surface_size: (u32, u32), pixel: DVec2) -> DVec2 {
        self.transform(surface_size).inverse().transform_point2(pixel)
    }

    /// Draw the minimap. With `probe` set, the marcher's samples from the
    /// player toward that grid point are drawn as well.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        scene: &Scene,
        player: &Player,
        probe: Option<DVec2>,
    ) -> anyhow::Result<()> {
        let config = &self.config;
        let grid = scene.size_vec();
        surface.set_transform(self.transform(surface.size()));

        surface.fill_rect(Rect::new(0., 0., grid.x, grid.y), config.minimap_background)?;
        for (at, cell) in scene.cells() {
            let dst = Rect::new(at.x as f64, at.y as f64, 1., 1.);
            match cell {
                Cell::Empty => {}
                Cell::Color(color) => surface.fill_rect(dst, *color)?,
                Cell::Texture(image) => {
                    let src = Rect::new(0., 0., image.width() as f64, image.height() as f64);
                    surface.draw_image(image, src, dst)?;
                }
            }
        }

        let (columns, rows) = scene.size();
        for x in 0..=columns {
            let x = x as f64;
            surface.stroke_line(DVec2::new(x, 0.), DVec2::new(x, grid.y), config.minimap_grid)?;
        }
        for y in 0..=rows {
            let y = y as f64;
            surface.stroke_line(DVec2::new(0., y), DVec2::new(grid.x, y), config.minimap_grid)?;
        }

        let marker = config.minimap_marker;
        surface.fill_circle(player.position, config.minimap_player_size, marker)?;

        let (left, right) = player.fov_range(config);
        surface.stroke_line(left, right, marker)?;
        surface.stroke_line(player.position, left, marker)?;
        surface.stroke_line(player.position, right, marker)?;

        if let Some(target) = probe {
            for sample in ray::probe(scene, player.position, target, config) {
                surface.stroke_line(sample.prev, sample.point, marker)?;
                surface.fill_circle(sample.point, config.minimap_player_size, marker)?;
            }
        }

        surface.reset();
        Ok(())
    }
}
