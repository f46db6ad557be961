//! Grid map: the static wall/empty occupancy grid.
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Tile size of the built-in level, in world units.
pub const TILE_SIZE: f32 = 64.0;

const LEVEL_ROWS: usize = 13;
const LEVEL_COLS: usize = 20;

#[rustfmt::skip]
const LEVEL: [[u8; LEVEL_COLS]; LEVEL_ROWS] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Wall,
}

impl CellKind {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '1' | '#' => Some(CellKind::Wall),
            '0' | '.' | ' ' => Some(CellKind::Empty),
            _ => None,
        }
    }
}

/// Immutable `rows × cols` grid. Cell `(row, col)` covers world x in
/// `[col·T, (col+1)·T)` and y in `[row·T, (row+1)·T)`.
#[derive(Clone, Debug)]
pub struct GridMap {
    cells: Vec<CellKind>,
    rows: usize,
    cols: usize,
    tile_size: f32,
}

impl GridMap {
    /// Builds a map from rows of cells. Rows must be non-empty and of equal length.
    pub fn new(rows: Vec<Vec<CellKind>>, tile_size: f32) -> Result<Self> {
        if !(tile_size > 0.0) || !tile_size.is_finite() {
            return Err(Error::InvalidMap(format!("tile size must be positive, got {tile_size}")));
        }
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if rows.is_empty() || cols == 0 {
            return Err(Error::InvalidMap("map has no cells".into()));
        }
        if let Some((j, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(Error::InvalidMap(format!(
                "row {j} has {} cells, expected {cols}",
                r.len()
            )));
        }
        let n_rows = rows.len();
        Ok(Self {
            cells: rows.into_iter().flatten().collect(),
            rows: n_rows,
            cols,
            tile_size,
        })
    }

    /// The compiled-in 20×13 level.
    pub fn level() -> Self {
        let cells = LEVEL
            .iter()
            .flat_map(|row| row.iter())
            .map(|&c| if c == 1 { CellKind::Wall } else { CellKind::Empty })
            .collect();
        Self {
            cells,
            rows: LEVEL_ROWS,
            cols: LEVEL_COLS,
            tile_size: TILE_SIZE,
        }
    }

    /// Parses a text grid, one row per line: `1`/`#` wall, `0`/`.`/space empty.
    /// Blank lines are ignored.
    pub fn parse(text: &str, tile_size: f32) -> Result<Self> {
        let mut rows = Vec::new();
        for (j, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .chars()
                .enumerate()
                .map(|(i, ch)| {
                    CellKind::from_char(ch).ok_or_else(|| {
                        Error::InvalidMap(format!("unknown cell {ch:?} at line {}, col {i}", j + 1))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(row);
        }
        Self::new(rows, tile_size)
    }

    pub fn load(path: impl AsRef<Path>, tile_size: f32) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let map = Self::parse(&text, tile_size)?;
        log::info!("Loaded {}x{} map from {}", map.cols, map.rows, path.display());
        Ok(map)
    }

    #[inline] pub fn rows(&self) -> usize { self.rows }
    #[inline] pub fn cols(&self) -> usize { self.cols }
    #[inline] pub fn tile_size(&self) -> f32 { self.tile_size }
    #[inline] pub fn world_width(&self) -> f32 { self.cols as f32 * self.tile_size }
    #[inline] pub fn world_height(&self) -> f32 { self.rows as f32 * self.tile_size }

    /// Cell at `(row, col)`, or `None` when either index is out of range.
    #[inline]
    pub fn cell_at(&self, row: usize, col: usize) -> Option<CellKind> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Signed lookup for collision: anything outside the grid is solid.
    #[inline]
    pub fn is_wall(&self, row: isize, col: isize) -> bool {
        if row < 0 || col < 0 {
            return true;
        }
        self.cell_at(row as usize, col as usize) != Some(CellKind::Empty)
    }

    /// Whether world point `(x, y)` lies in a wall or outside the grid.
    pub fn is_solid_at(&self, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return true;
        }
        let col = (x / self.tile_size).floor() as isize;
        let row = (y / self.tile_size).floor() as isize;
        self.is_wall(row, col)
    }
}
