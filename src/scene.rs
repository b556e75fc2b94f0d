use crate::color::Rgba;
use crate::image::Image;
use glam::{DVec2, IVec2};
use std::sync::Arc;

/// Occupant of one grid cell.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Color(Rgba),
    Texture(Arc<Image>),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

static EMPTY: Cell = Cell::Empty;

/// Immutable occupancy grid. Rows may be ragged; missing trailing cells read
/// as [`Cell::Empty`].
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Scene {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl Scene {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    /// `(width, height)` where width is the longest row.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.rows.len())
    }

    pub fn size_vec(&self) -> DVec2 {
        DVec2::new(self.width as f64, self.rows.len() as f64)
    }

    /// Whether the continuous point lies inside the grid.
    pub fn inside(&self, p: DVec2) -> bool {
        let (w, h) = self.size();
        0. <= p.x && p.x < w as f64 && 0. <= p.y && p.y < h as f64
    }

    /// Cell at integer grid indices, `None` outside the grid.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<&Cell> {
        if x < 0 || y < 0 || x as usize >= self.width {
            return None;
        }
        let row = self.rows.get(y as usize)?;
        Some(row.get(x as usize).unwrap_or(&EMPTY))
    }

    /// The occupant of `cell` if it is inside the grid and not empty.
    pub fn solid(&self, cell: IVec2) -> Option<&Cell> {
        self.cell_at(cell.x, cell.y).filter(|c| !c.is_empty())
    }

    /// Every stored cell with its grid position, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, &Cell)> {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, cell)| (IVec2::new(x as i32, y as i32), cell))
        })
    }
}
