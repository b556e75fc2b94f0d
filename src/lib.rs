//! First person views of a 2D occupancy grid.
//!
//! One ray is marched per screen column from the player through the near
//! plane, stepping from grid line to grid line until it enters a solid cell.
//! The hit is projected into a vertical strip whose height is inversely
//! proportional to its distance along the view axis.

pub mod color;
pub mod config;
pub mod framebuffer;
pub mod image;
pub mod input;
pub mod map;
pub mod minimap;
pub mod player;
pub mod projector;
pub mod ray;
pub mod render;
pub mod scene;
pub mod surface;
pub mod vector;

#[cfg(test)]
mod testing;

pub use color::Rgba;
pub use config::Config;
pub use framebuffer::Framebuffer;
pub use image::Image;
pub use input::{Action, KeyState};
pub use map::Map;
pub use player::Player;
pub use render::{Overlay, Renderer};
pub use scene::{Cell, Scene};
pub use surface::{Rect, Surface};
