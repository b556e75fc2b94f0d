use crate::config::Config;
use crate::input::KeyState;
use crate::scene::Scene;
use crate::vector::{unit_forward, Planar};
use glam::DVec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    /// Continuous grid-space position.
    pub position: DVec2,
    /// Heading in radians, `0` looks along `+x`.
    pub direction: f64,
}

impl Player {
    pub fn new(position: DVec2, direction: f64) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// Place the player at a fraction of the scene's size.
    pub fn spawn(scene: &Scene, fraction: DVec2, direction: f64) -> Self {
        Self::new(scene.size_vec() * fraction, direction)
    }

    pub fn forward(&self) -> DVec2 {
        unit_forward(self.direction)
    }

    /// Left and right edge points of the near plane.
    pub fn fov_range(&self, config: &Config) -> (DVec2, DVec2) {
        let half = (config.fov * 0.5).tan() * config.near;
        let center = self.position + self.forward() * config.near;
        let right = (center - self.position).rot90().norm() * half;
        (center - right, center + right)
    }

    /// Integrate one frame of held input. Movement ignores walls.
    pub fn advance(&self, dt: f64, keys: &KeyState, config: &Config) -> Self {
        let angular_velocity = keys.turn() * config.turn_rate;
        let velocity = self.forward() * keys.thrust() * config.move_speed;

        Self {
            position: self.position + velocity * dt,
            direction: self.direction + angular_velocity * dt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Action;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn fov_range_spans_near_plane() {
        let config = Config::default();
        let player = Player::new(DVec2::new(5., 5.), 0.);
        let (left, right) = player.fov_range(&config);

        // 90 degrees: the half-width equals the near distance
        assert!((left - DVec2::new(5.1, 4.9)).length() < 1e-9, "{left}");
        assert!((right - DVec2::new(5.1, 5.1)).length() < 1e-9, "{right}");
        assert!(((left + right) * 0.5 - player.position).dot(player.forward()) > 0.);
    }

    #[test]
    fn spawn_uses_grid_fraction() {
        let scene = Scene::new(vec![vec![Default::default(); 8]; 4]);
        let player = Player::spawn(&scene, DVec2::new(0.5, 0.25), 1.);
        assert_eq!(player.position, DVec2::new(4., 1.));
        assert_eq!(player.direction, 1.);
    }

    #[test]
    fn advance_integrates_by_dt() {
        let config = Config::default();
        let mut keys = KeyState::default();
        keys.press(Action::Forward, false);
        keys.press(Action::TurnRight, false);

        let player = Player::new(DVec2::new(1., 1.), FRAC_PI_2);
        let next = player.advance(0.5, &keys, &config);

        assert!((next.position - DVec2::new(1., 2.)).length() < 1e-9);
        assert!((next.direction - (FRAC_PI_2 + PI * 0.5)).abs() < 1e-12);
    }

    #[test]
    fn advance_without_input_is_identity() {
        let config = Config::default();
        let player = Player::new(DVec2::new(3., 2.), 0.3);
        assert_eq!(player.advance(0.016, &KeyState::default(), &config), player);
    }

    #[test]
    fn backward_moves_against_heading() {
        let config = Config::default();
        let mut keys = KeyState::default();
        keys.press(Action::Backward, false);
        let next = Player::new(DVec2::ZERO, 0.).advance(1., &keys, &config);
        assert!((next.position - DVec2::new(-2., 0.)).length() < 1e-9);
    }
}
