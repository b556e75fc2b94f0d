use crate::config::Config;
use crate::minimap::Minimap;
use crate::player::Player;
use crate::projector::Projector;
use crate::scene::Scene;
use crate::surface::{Rect, Surface};
use glam::DVec2;

/// What to draw over the first person view.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Overlay {
    #[default]
    None,
    Minimap,
    /// Minimap plus the marcher's samples toward a grid space point.
    Probe(DVec2),
}

/// Draws whole frames.
pub struct Renderer {
    config: Config,
    projector: Projector,
    minimap: Minimap,
}

impl Renderer {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            projector: Projector::new(config),
            minimap: Minimap::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn minimap(&self) -> &Minimap {
        &self.minimap
    }

    /// Background, walls, then the overlay.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        scene: &Scene,
        player: &Player,
        overlay: Overlay,
    ) -> anyhow::Result<()> {
        surface.reset();

        let (width, height) = surface.size();
        surface.fill_rect(
            Rect::new(0., 0., width as f64, height as f64),
            self.config.background,
        )?;

        self.projector.render_scene(surface, scene, player)?;

        match overlay {
            Overlay::None => Ok(()),
            Overlay::Minimap => self.minimap.render(surface, scene, player, None),
            Overlay::Probe(target) => self.minimap.render(surface, scene, player, Some(target)),
        }
    }
}
