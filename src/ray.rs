//! Grid-boundary ray marching.
//!
//! A ray is defined by two points. Each step moves the current sample to the
//! next place the ray crosses a vertical or horizontal grid line, so every
//! cell the ray passes through is visited exactly once and there is no fixed
//! step size to tune.

use crate::config::Config;
use crate::scene::Scene;
use crate::vector::Planar;
use glam::{DVec2, IVec2};

/// Result of marching one ray through a scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayCast {
    /// Where the ray struck a solid cell, or the point on the far clipping
    /// circle for a miss.
    pub point: DVec2,
    /// The solid cell that was struck.
    pub cell: Option<IVec2>,
}

impl RayCast {
    pub fn is_hit(&self) -> bool {
        self.cell.is_some()
    }
}

/// One sample along a marched ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub prev: DVec2,
    pub point: DVec2,
    /// Cell the ray is entering at `point`.
    pub cell: IVec2,
}

/// Move `x` onto the next integer grid line in the direction of `dx`.
///
/// A value already sitting on a line moves to the following one. `dx == 0`
/// leaves `x` untouched.
#[inline]
pub fn snap(x: f64, dx: f64, eps: f64) -> f64 {
    if dx > 0. {
        (x + eps).ceil()
    } else if dx < 0. {
        (x - eps).floor()
    } else {
        x
    }
}

/// Cell containing `p2` when travelling from `p1`. A point exactly on a grid
/// line belongs to the cell on the far side of that line.
#[inline]
pub fn hitting_cell(p1: DVec2, p2: DVec2, eps: f64) -> IVec2 {
    let d = p2 - p1;
    (p2 + d.sign() * eps).cell()
}

/// Next grid line crossing after `p2` on the line through `p1` and `p2`.
pub fn ray_step(p1: DVec2, p2: DVec2, eps: f64) -> DVec2 {
    let d = p2 - p1;
    debug_assert!(d != DVec2::ZERO, "ray direction is zero at {p1}");

    if d.x != 0. {
        // y = k*x + c
        let k = d.y / d.x;
        let c = p1.y - k * p1.x;

        let x3 = snap(p2.x, d.x, eps);
        let mut p3 = DVec2::new(x3, k * x3 + c);

        if k != 0. {
            let y3 = snap(p2.y, d.y, eps);
            let across = DVec2::new((y3 - c) / k, y3);
            if p2.distance_squared(across) < p2.distance_squared(p3) {
                p3 = across;
            }
        }

        p3
    } else {
        DVec2::new(p2.x, snap(p2.y, d.y, eps))
    }
}

/// Unbounded sequence of grid crossings along a ray.
#[derive(Clone, Debug)]
pub struct RayMarch {
    p1: DVec2,
    p2: DVec2,
    eps: f64,
}

impl RayMarch {
    pub fn new(p1: DVec2, p2: DVec2, eps: f64) -> Self {
        debug_assert!(p1 != p2, "ray from {p1} has no direction");
        debug_assert!(p1.is_finite() && p2.is_finite());
        Self { p1, p2, eps }
    }

    /// Report the current sample and step past it.
    pub fn advance(&mut self) -> Sample {
        let sample = Sample {
            prev: self.p1,
            point: self.p2,
            cell: hitting_cell(self.p1, self.p2, self.eps),
        };
        let p3 = ray_step(self.p1, self.p2, self.eps);
        self.p1 = self.p2;
        self.p2 = p3;
        sample
    }
}

impl Iterator for RayMarch {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        Some(self.advance())
    }
}

/// March from `origin` through `toward` until a solid cell is entered or the
/// far clipping radius is passed.
pub fn cast_ray(scene: &Scene, origin: DVec2, toward: DVec2, config: &Config) -> RayCast {
    let far_sq = config.far * config.far;
    let mut march = RayMarch::new(origin, toward, config.eps);

    loop {
        let sample = march.advance();

        if origin.distance_squared(sample.point) >= far_sq {
            let reach = (sample.point - origin).norm() * config.far;
            return RayCast {
                point: origin + reach,
                cell: None,
            };
        }

        if scene.solid(sample.cell).is_some() {
            return RayCast {
                point: sample.point,
                cell: Some(sample.cell),
            };
        }
    }
}

/// Every sample of a ray until it enters a solid cell or leaves the grid.
/// Used to visualise the marcher on the minimap.
pub fn probe(scene: &Scene, origin: DVec2, toward: DVec2, config: &Config) -> Vec<Sample> {
    if origin == toward {
        return Vec::new();
    }

    let mut samples = Vec::new();
    for sample in RayMarch::new(origin, toward, config.eps) {
        samples.push(sample);
        match scene.cell_at(sample.cell.x, sample.cell.y) {
            Some(cell) if cell.is_empty() => {}
            _ => break,
        }
    }

    log::trace!("probe from {origin} took {} samples", samples.len());
    samples
}
