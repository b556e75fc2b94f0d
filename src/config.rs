use crate::color::Rgba;
use std::f64::consts::{FRAC_PI_2, PI};

/// Engine tunables. Passed by value into every component that needs them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Nudge used to step past grid lines.
    pub eps: f64,
    /// Horizontal field of view in radians.
    pub fov: f64,
    pub near: f64,
    pub far: f64,
    /// Number of screen columns cast per frame.
    pub strip_count: usize,
    /// Radians per second.
    pub turn_rate: f64,
    /// Cells per second.
    pub move_speed: f64,
    pub background: Rgba,
    /// Minimap cell size as a fraction of surface width.
    pub minimap_scale: f64,
    /// Minimap corner offset as a fraction of surface size.
    pub minimap_offset: f64,
    /// Radius of the player marker, in cells.
    pub minimap_player_size: f64,
    pub minimap_background: Rgba,
    pub minimap_grid: Rgba,
    pub minimap_marker: Rgba,
}

impl Default for Config {
    fn default() -> Self {
        let gray = |v: f32| Rgba::new(v, v, v, 1.);
        Self {
            eps: 1e-6,
            fov: FRAC_PI_2,
            near: 0.1,
            far: 10.,
            strip_count: 480,
            turn_rate: PI,
            move_speed: 2.,
            background: gray(0x18 as f32 / 255.),
            minimap_scale: 0.07,
            minimap_offset: 0.03,
            minimap_player_size: 0.2,
            minimap_background: gray(0x18 as f32 / 255.),
            minimap_grid: gray(0x30 as f32 / 255.),
            minimap_marker: Rgba::MAGENTA,
        }
    }
}

impl Config {
    /// Reject values that would break a ray marcher precondition.
    pub fn validate(&self) -> anyhow::Result<()> {
        let numbers = [
            ("eps", self.eps),
            ("fov", self.fov),
            ("near", self.near),
            ("far", self.far),
            ("turn_rate", self.turn_rate),
            ("move_speed", self.move_speed),
            ("minimap_scale", self.minimap_scale),
            ("minimap_offset", self.minimap_offset),
            ("minimap_player_size", self.minimap_player_size),
        ];
        if let Some((name, value)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            anyhow::bail!("{name} must be finite, got {value}");
        }

        if !(self.eps > 0. && self.eps < 0.5) {
            anyhow::bail!("eps must lie in (0, 0.5), got {}", self.eps);
        }
        if !(self.fov > 0. && self.fov < PI) {
            anyhow::bail!("fov must lie in (0, pi), got {}", self.fov);
        }
        if self.near <= 0. {
            anyhow::bail!("near clipping plane must be positive, got {}", self.near);
        }
        if self.far <= self.near {
            anyhow::bail!(
                "far clipping plane ({}) must lie beyond near ({})",
                self.far,
                self.near
            );
        }
        if self.strip_count == 0 {
            anyhow::bail!("strip count must be non-zero");
        }

        log::debug!("validated config: {self:?}");
        Ok(())
    }
}
