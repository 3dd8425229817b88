/// Cell placement on the output canvas
///
/// Cell origins are computed exactly in f64 from
/// `col * (cell_width + horizontal_padding)`, then each edge is floored on
/// its own. Edges never accumulate, so the last row and column end exactly
/// at the canvas border and every gap is exactly the configured padding.

use crate::error::Result;
use crate::state::GridConfig;

/// Absorbs float error such as 1199.9999999 for an edge that is really 1200
const EDGE_EPSILON: f64 = 1e-6;

/// Pixel rectangle of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CellRect {
    /// Cells narrower than a pixel round down to nothing
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Validated geometry of a grid configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    rows: u32,
    columns: u32,
    total_width: u32,
    total_height: u32,
    cell_width: f64,
    cell_height: f64,
    horizontal_padding: f64,
    vertical_padding: f64,
}

impl GridLayout {
    /// Fails with `InvalidConfig` when the config cannot be laid out
    pub fn new(config: &GridConfig) -> Result<Self> {
        let (cell_width, cell_height) = config.cell_size()?;

        Ok(Self {
            rows: config.rows,
            columns: config.columns,
            total_width: config.total_width,
            total_height: config.total_height,
            cell_width,
            cell_height,
            horizontal_padding: config.horizontal_padding as f64,
            vertical_padding: config.vertical_padding as f64,
        })
    }

    /// Exact top-left corner of a cell
    pub fn origin(&self, row: u32, col: u32) -> (f64, f64) {
        (
            col as f64 * (self.cell_width + self.horizontal_padding),
            row as f64 * (self.cell_height + self.vertical_padding),
        )
    }

    /// Pixel rectangle of a cell
    pub fn cell_rect(&self, row: u32, col: u32) -> CellRect {
        let (x, y) = self.origin(row, col);

        let x0 = snap(x, self.total_width);
        let x1 = snap(x + self.cell_width, self.total_width);
        let y0 = snap(y, self.total_height);
        let y1 = snap(y + self.cell_height, self.total_height);

        CellRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Every cell as (row-major index, row, col, rect)
    pub fn cells(&self) -> impl Iterator<Item = (usize, u32, u32, CellRect)> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |col| {
                let index = row as usize * self.columns as usize + col as usize;
                (index, row, col, self.cell_rect(row, col))
            })
        })
    }
}

/// Floor an edge coordinate to a pixel, bounded by the canvas
fn snap(edge: f64, limit: u32) -> u32 {
    ((edge + EDGE_EPSILON).floor().max(0.0) as u32).min(limit)
}
