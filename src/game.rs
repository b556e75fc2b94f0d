use crate::canvas::{CanvasSurface, TextureCache};
use crate::StringToAnyhow;
use glam::DVec2;
use gridcast::{Action, Image, KeyState, Map, Overlay, Player, Rect, Renderer, Rgba, Surface};
use sdl2::image::LoadSurface;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::Canvas;
use sdl2::video::Window;
use std::path::Path;

#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) enum GameState {
    Playing,
    Minimap,
    Paused,
    Exit,
}

pub(crate) struct Game {
    map: Map,
    player: Player,
    keys: KeyState,
    renderer: Renderer,
    pointer: Option<DVec2>,
    pub game_state: GameState,
    pub canvas: Canvas<Window>,
}

/// decode an image file into RGBA pixels through SDL_image
fn load_texture(path: &Path) -> anyhow::Result<Image> {
    let surface = sdl2::surface::Surface::from_file(path)
        .ah()?
        .convert_format(PixelFormatEnum::RGBA32)
        .ah()?;
    let (width, height) = (surface.width(), surface.height());
    let pitch = surface.pitch() as usize;
    let row_len = width as usize * 4;

    let pixels = surface.with_lock(|bytes| {
        let mut pixels = Vec::with_capacity(row_len * height as usize);
        for row in bytes.chunks(pitch).take(height as usize) {
            pixels.extend_from_slice(&row[..row_len]);
        }
        pixels
    });

    Image::new(width, height, pixels)
}

/// movement bindings
fn action(key: Keycode) -> Option<Action> {
    match key {
        Keycode::W | Keycode::Up => Some(Action::Forward),
        Keycode::S | Keycode::Down => Some(Action::Backward),
        Keycode::A | Keycode::Left => Some(Action::TurnLeft),
        Keycode::D | Keycode::Right => Some(Action::TurnRight),
        _ => None,
    }
}

impl Game {
    /// initialize game
    pub fn new(canvas: Canvas<Window>, map: &str) -> anyhow::Result<Self> {
        let map = Map::load(map, load_texture)?;
        let player = map.player();
        log::info!(
            "spawning at {} facing {:.2} rad",
            player.position,
            player.direction
        );

        Ok(Self {
            renderer: Renderer::new(map.config),
            map,
            player,
            keys: KeyState::default(),
            pointer: None,
            game_state: GameState::Playing,
            canvas,
        })
    }

    pub fn key_down(&mut self, key: Keycode, repeat: bool) {
        if self.game_state == GameState::Paused {
            match key {
                _ if repeat => {}
                Keycode::Backspace => self.game_state = GameState::Exit,
                _ => self.game_state = GameState::Playing,
            }
            return;
        }

        if let Some(action) = action(key) {
            self.keys.press(action, repeat);
            return;
        }

        if repeat {
            return;
        }

        match key {
            // minimap toggle
            Keycode::M => {
                self.game_state = if self.game_state == GameState::Minimap {
                    GameState::Playing
                } else {
                    GameState::Minimap
                };
            }
            // pause game, dropping held keys so nothing sticks on resume
            Keycode::Escape => {
                self.keys = KeyState::default();
                self.game_state = GameState::Paused;
            }
            _ => {}
        }
        log::debug!("game state is now {:?}", self.game_state);
    }

    pub fn key_up(&mut self, key: Keycode) {
        if let Some(action) = action(key) {
            self.keys.release(action);
        }
    }

    pub fn pointer(&mut self, x: i32, y: i32) {
        self.pointer = Some(DVec2::new(x as f64, y as f64));
    }

    pub fn tick(&mut self, dt: f64) {
        if matches!(self.game_state, GameState::Playing | GameState::Minimap) {
            self.player = self.player.advance(dt, &self.keys, self.renderer.config());
        }
    }

    /// render one frame onto the canvas
    pub fn draw(&mut self, textures: &mut TextureCache<'_>) -> anyhow::Result<()> {
        let mut surface = CanvasSurface::new(&mut self.canvas, textures)?;
        let overlay = match self.game_state {
            GameState::Minimap => match self.pointer {
                Some(pixel) => {
                    Overlay::Probe(self.renderer.minimap().to_grid(surface.size(), pixel))
                }
                None => Overlay::Minimap,
            },
            _ => Overlay::None,
        };

        self.renderer.render(&mut surface, &self.map.scene, &self.player, overlay)?;

        if self.game_state == GameState::Paused {
            let (w, h) = surface.size();
            surface.fill_rect(
                Rect::new(0., 0., w as f64, h as f64),
                Rgba::BLACK.with_alpha(0.85),
            )?;
        }

        Ok(())
    }
}
