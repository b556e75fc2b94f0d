//! Text map files.
//!
//! ```text
//! !!!!META
//! spawn,x=0.5,y=0.5,dir=0
//! view,fov=90,near=0.1,far=10,strips=480
//! motion,speed=2,turn=180
//!
//! !!!!MAIN
//! ##4d7fff
//! Bbricks.png
//!
//!  ## B
//! #   #
//! ```
//!
//! The `MAIN` section starts with a legend (tile id followed by a hex color
//! or a texture path relative to the map), a blank line, then the grid. Space
//! and `.` are empty cells.

use crate::color::Rgba;
use crate::config::Config;
use crate::image::Image;
use crate::player::Player;
use crate::scene::{Cell, Scene};
use anyhow::Context;
use glam::DVec2;
use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Initial player placement, as a fraction of the grid size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spawn {
    pub fraction: DVec2,
    pub direction: f64,
}

impl Default for Spawn {
    fn default() -> Self {
        Self {
            fraction: DVec2::splat(0.5),
            direction: 0.,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Map {
    pub scene: Scene,
    pub config: Config,
    pub spawn: Spawn,
    textures: HashMap<PathBuf, Arc<Image>>,
}

type Params<'a> = HashMap<&'a str, &'a str>;

fn param<T>(params: &Params, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    params
        .get(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .with_context(|| format!("bad value for {key}: {raw}"))
        })
        .transpose()
}

fn check_keys(directive: &str, params: &Params, allowed: &[&str]) -> anyhow::Result<()> {
    match params.keys().find(|key| !allowed.contains(key)) {
        Some(key) => anyhow::bail!("unrecognized key for {directive}: {key}"),
        None => Ok(()),
    }
}

impl Map {
    /// Load a map file. Texture paths are resolved next to the file and
    /// decoded by `textures`.
    pub fn load(
        name: impl AsRef<Path>,
        textures: impl FnMut(&Path) -> anyhow::Result<Image>,
    ) -> anyhow::Result<Self> {
        let name = name.as_ref();
        log::info!("loading map at {}", name.display());
        let file = read_to_string(name).with_context(|| format!("reading {}", name.display()))?;
        let prefix = name.parent().unwrap_or(Path::new(""));
        Self::parse(&file, prefix, textures).with_context(|| format!("in map {}", name.display()))
    }

    pub fn parse(
        src: &str,
        prefix: &Path,
        mut textures: impl FnMut(&Path) -> anyhow::Result<Image>,
    ) -> anyhow::Result<Self> {
        let mut lines = src.lines();
        let mut this = Self::default();

        while let Some(line) = lines.by_ref().next() {
            match line {
                "!!!!META" => this.parse_meta(&mut lines)?,
                "!!!!MAIN" => this.parse_main(&mut lines, prefix, &mut textures)?,
                "" => {}
                other => anyhow::bail!("unrecognized directive: {other}"),
            }
        }

        let (width, height) = this.scene.size();
        if width == 0 || height == 0 {
            log::warn!("map has no cells");
        }
        this.config.validate()?;
        log::info!(
            "loaded {width}x{height} map with {} textures",
            this.textures.len()
        );

        Ok(this)
    }

    /// Player at the map's spawn point.
    pub fn player(&self) -> Player {
        Player::spawn(&self.scene, self.spawn.fraction, self.spawn.direction)
    }

    fn parse_meta<'lines>(
        &mut self,
        lines: impl Iterator<Item = &'lines str>,
    ) -> anyhow::Result<()> {
        for line in lines {
            if line.is_empty() {
                break;
            }

            let mut chunks = line.split(',');
            let directive = chunks.by_ref().next().unwrap_or_default().trim();
            let params = chunks
                .map(|param| param.split_once('=').map(|(k, v)| (k.trim(), v)))
                .collect::<Option<Params>>()
                .context("incorrectly formatted meta")?;
            log::debug!("meta {directive}: {params:?}");

            match directive {
                "spawn" => {
                    check_keys(directive, &params, &["x", "y", "dir"])?;
                    if let Some(x) = param(&params, "x")? {
                        self.spawn.fraction.x = x;
                    }
                    if let Some(y) = param(&params, "y")? {
                        self.spawn.fraction.y = y;
                    }
                    if let Some(dir) = param(&params, "dir")? {
                        self.spawn.direction = dir;
                    }
                }
                "view" => {
                    check_keys(directive, &params, &["fov", "near", "far", "strips"])?;
                    if let Some(fov) = param::<f64>(&params, "fov")? {
                        self.config.fov = fov.to_radians();
                    }
                    if let Some(near) = param(&params, "near")? {
                        self.config.near = near;
                    }
                    if let Some(far) = param(&params, "far")? {
                        self.config.far = far;
                    }
                    if let Some(strips) = param(&params, "strips")? {
                        self.config.strip_count = strips;
                    }
                }
                "motion" => {
                    check_keys(directive, &params, &["speed", "turn"])?;
                    if let Some(speed) = param(&params, "speed")? {
                        self.config.move_speed = speed;
                    }
                    if let Some(turn) = param::<f64>(&params, "turn")? {
                        self.config.turn_rate = turn.to_radians();
                    }
                }
                other => anyhow::bail!("unrecognized meta directive: {other}"),
            }
        }

        Ok(())
    }

    fn parse_main<'lines>(
        &mut self,
        mut lines: impl Iterator<Item = &'lines str>,
        prefix: &Path,
        textures: &mut impl FnMut(&Path) -> anyhow::Result<Image>,
    ) -> anyhow::Result<()> {
        let mut legend = HashMap::new();

        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }

            let mut chars = line.chars();
            let id = chars.by_ref().next().unwrap_or(' ');
            if id == ' ' || id == '.' {
                anyhow::bail!("tile id {id:?} is reserved for empty cells");
            }
            let rest = chars.as_str().trim();

            let cell = if rest.starts_with('#') {
                Cell::Color(Rgba::from_hex(rest).with_context(|| format!("tile {id}"))?)
            } else if rest.is_empty() {
                anyhow::bail!("tile {id} has no color or texture");
            } else {
                Cell::Texture(
                    self.texture(prefix.join(rest), textures)
                        .with_context(|| format!("loading texture for tile {id}"))?,
                )
            };
            legend.insert(id, cell);
        }

        let mut rows = vec![];
        for line in lines {
            if line.is_empty() {
                break;
            }

            let row = line
                .chars()
                .map(|tile| match tile {
                    ' ' | '.' => Ok(Cell::Empty),
                    tile => legend
                        .get(&tile)
                        .cloned()
                        .with_context(|| format!("invalid tile in map: {tile}")),
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            rows.push(row);
        }

        self.scene = Scene::new(rows);
        Ok(())
    }

    fn texture(
        &mut self,
        path: PathBuf,
        textures: &mut impl FnMut(&Path) -> anyhow::Result<Image>,
    ) -> anyhow::Result<Arc<Image>> {
        if let Some(image) = self.textures.get(&path) {
            return Ok(image.clone());
        }

        log::debug!("loading texture {}", path.display());
        let image = Arc::new(textures(&path)?);
        self.textures.insert(path, image.clone());
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use std::f64::consts::PI;

    const DEMO: &str = "!!!!META
spawn,x=0.25,y=0.5,dir=1.5
view,fov=60,far=20,strips=320
motion,speed=3,turn=90

!!!!MAIN
##ff0000
Bstone.png
Cstone.png

#..B
# C
####
";

    fn checker(path: &Path) -> anyhow::Result<Image> {
        assert!(path.ends_with("stone.png"), "{}", path.display());
        Image::from_fn(2, 2, |x, y| {
            let v = if (x + y) % 2 == 0 { 255 } else { 0 };
            [v, v, v, 255]
        })
    }

    #[test]
    fn parses_meta_and_grid() {
        let map = Map::parse(DEMO, Path::new("maps"), checker).unwrap();

        assert_eq!(map.scene.size(), (4, 3));
        assert_eq!(map.spawn.fraction, DVec2::new(0.25, 0.5));
        assert_eq!(map.spawn.direction, 1.5);
        assert!((map.config.fov - 60f64.to_radians()).abs() < 1e-12);
        assert_eq!(map.config.far, 20.);
        assert_eq!(map.config.near, Config::default().near);
        assert_eq!(map.config.strip_count, 320);
        assert_eq!(map.config.move_speed, 3.);
        assert!((map.config.turn_rate - PI / 2.).abs() < 1e-12);

        assert_eq!(
            map.scene.cell_at(0, 0),
            Some(&Cell::Color(Rgba::new(1., 0., 0., 1.)))
        );
        assert!(matches!(map.scene.cell_at(3, 0), Some(Cell::Texture(_))));
        assert_eq!(map.scene.cell_at(1, 0), Some(&Cell::Empty));
        // short second row reads empty past its end
        assert_eq!(map.scene.cell_at(3, 1), Some(&Cell::Empty));
        assert!(map.scene.solid(IVec2::new(2, 2)).is_some());

        let player = map.player();
        assert_eq!(player.position, DVec2::new(1., 1.5));
        assert_eq!(player.direction, 1.5);
    }

    #[test]
    fn shared_texture_paths_load_once() {
        let mut loads = 0;
        let map = Map::parse(DEMO, Path::new(""), |path| {
            loads += 1;
            checker(path)
        })
        .unwrap();
        assert_eq!(loads, 1);

        match (map.scene.cell_at(3, 0), map.scene.cell_at(2, 1)) {
            (Some(Cell::Texture(a)), Some(Cell::Texture(b))) => assert!(Arc::ptr_eq(a, b)),
            other => panic!("expected two textures, got {other:?}"),
        }
    }

    #[test]
    fn texture_failure_is_reported() {
        let err = Map::parse(DEMO, Path::new(""), |_| anyhow::bail!("no such file")).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("tile B"), "{chain}");
        assert!(chain.contains("no such file"), "{chain}");
    }

    #[test]
    fn defaults_without_meta() {
        let map = Map::parse("!!!!MAIN\nX#00ff00\n\n X\n", Path::new(""), checker).unwrap();
        assert_eq!(map.config, Config::default());
        assert_eq!(map.spawn, Spawn::default());
        assert_eq!(map.scene.size(), (2, 1));
    }

    #[test]
    fn rejects_bad_input() {
        let cases = [
            "!!!!BOGUS\n",
            "!!!!META\nfog,dof=4\n",
            "!!!!META\nview,zoom=2\n",
            "!!!!META\nview,fov\n",
            "!!!!META\nview,fov=wide\n",
            "!!!!META\nview,fov=0\n",
            "!!!!META\nview,near=5,far=1\n",
            "!!!!MAIN\nX#00ff00\n\n Y\n",
            "!!!!MAIN\nX\n\n X\n",
            "!!!!MAIN\n #00ff00\n\n X\n",
        ];
        for case in cases {
            assert!(Map::parse(case, Path::new(""), checker).is_err(), "{case:?}");
        }
    }

    #[test]
    fn load_reads_files_relative_to_map() {
        let dir = std::env::temp_dir().join(format!("gridcast-map-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("test.map");
        std::fs::write(&file, DEMO).unwrap();

        let map = Map::load(&file, |path| {
            assert_eq!(path, dir.join("stone.png"));
            checker(path)
        })
        .unwrap();
        assert_eq!(map.scene.size(), (4, 3));

        std::fs::remove_dir_all(&dir).unwrap();
        assert!(Map::load(&file, checker).is_err());
    }
}
