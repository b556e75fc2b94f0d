use canvas::TextureCache;
use game::{Game, GameState};
use sdl2::event::Event;
use sdl2::image::InitFlag;
use std::time::{Duration, Instant};

mod canvas;
mod game;

// helper trait to convert strings into std::error types
trait StringToAnyhow<T> {
    fn ah(self) -> anyhow::Result<T>;
}

impl<T> StringToAnyhow<T> for Result<T, String> {
    fn ah(self) -> anyhow::Result<T> {
        self.map_err(|err| anyhow::anyhow!("{err}"))
    }
}

// dimensions of screen
const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

const TARGET_FPS: u64 = 60;

const DEFAULT_MAP: &str = "map/demo.map";

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_custom_env("GRIDCAST_LOG");
    // sdl boilerplate
    log::info!("initializing sdl2");
    let sdl_ctx = sdl2::init().ah()?;
    log::info!("initializing video");
    let video = sdl_ctx.video().ah()?;
    log::info!("initializing image loaders");
    let _image_ctx = sdl2::image::init(InitFlag::PNG | InitFlag::JPG).ah()?;

    log::info!("initializing window");
    let mut window = video
        .window("gridcast", WIDTH, HEIGHT)
        .position_centered()
        .build()?;
    window.set_resizable(false);
    window.set_maximum_size(WIDTH, HEIGHT)?;
    window.set_minimum_size(WIDTH, HEIGHT)?;

    log::info!("creating canvas");
    let canvas = window.into_canvas().build()?;
    let texture_creator = canvas.texture_creator();
    let mut textures = TextureCache::new(&texture_creator);
    log::info!("pumping events");
    let mut events = sdl_ctx.event_pump().ah()?;

    let map = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_MAP.into());

    // initialize game
    log::info!("initializing game state");
    let mut game = Game::new(canvas, &map)?;

    let delta = Duration::from_millis(1_000 / TARGET_FPS);
    let mut last_tick = Instant::now();

    'main_loop: loop {
        let prev = Instant::now();

        // handle events
        for ev in events.poll_iter() {
            match ev {
                Event::Quit { .. } => break 'main_loop,
                Event::KeyDown {
                    keycode: Some(k),
                    repeat,
                    ..
                } => game.key_down(k, repeat),
                Event::KeyUp {
                    keycode: Some(k), ..
                } => game.key_up(k),
                Event::MouseMotion { x, y, .. } => game.pointer(x, y),
                _ => {}
            }
        }

        if game.game_state == GameState::Exit {
            break;
        }

        // cap dt so a stalled window does not teleport the player
        let now = Instant::now();
        let dt = (now - last_tick).min(Duration::from_millis(100));
        last_tick = now;
        game.tick(dt.as_secs_f64());

        // draw game
        if let Err(err) = game.draw(&mut textures) {
            log::error!("error while in game state {:?}: {err}", game.game_state);
            return Err(err);
        }
        game.canvas.present();

        let diff = Instant::now() - prev;
        if diff < delta {
            std::thread::sleep(delta - diff);
        }
    }

    Ok(())
}
