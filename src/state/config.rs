/// Grid layout settings
///
/// This struct holds everything the compositor needs to know about the
/// output canvas: how many cells, how big the canvas is, the gaps between
/// cells and the background. It is passed explicitly into every
/// composition call and can be serialized to JSON.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::color::Background;
use crate::error::{GridError, Result};

/// Ranges offered by the settings form
pub const ROWS_RANGE: RangeInclusive<u32> = 1..=10;
pub const COLUMNS_RANGE: RangeInclusive<u32> = 1..=10;
pub const EXTENT_RANGE: RangeInclusive<u32> = 200..=5000;
pub const PADDING_RANGE: RangeInclusive<u32> = 0..=100;

/// All settings for one output grid
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    // ========== Layout ==========

    /// Number of cell rows (1 to 10 in the form)
    pub rows: u32,

    /// Number of cell columns (1 to 10 in the form)
    pub columns: u32,

    // ========== Canvas ==========

    /// Output width in pixels (200 to 5000 in the form)
    pub total_width: u32,

    /// Output height in pixels (200 to 5000 in the form)
    pub total_height: u32,

    /// Gap between adjacent columns, never at the canvas edges
    pub horizontal_padding: u32,

    /// Gap between adjacent rows, never at the canvas edges
    pub vertical_padding: u32,

    pub background_color: Background,
}

impl Default for GridConfig {
    /// 2×2 grid on a 1200×800 transparent canvas with 10px gaps
    fn default() -> Self {
        Self {
            rows: 2,
            columns: 2,
            total_width: 1200,
            total_height: 800,
            horizontal_padding: 10,
            vertical_padding: 10,
            background_color: Background::Transparent,
        }
    }
}

impl GridConfig {
    /// Convert to a JSON string
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from a JSON string; missing keys take their default values
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Exact (fractional) cell size in pixels
    ///
    /// Fails with `InvalidConfig` when the grid has no cells, the canvas has
    /// no area, or the padding leaves no room for the cells.
    pub fn cell_size(&self) -> Result<(f64, f64)> {
        if self.rows == 0 || self.columns == 0 {
            return Err(GridError::InvalidConfig(format!(
                "grid needs at least one row and one column (got {}x{})",
                self.rows, self.columns
            )));
        }
        if self.total_width == 0 || self.total_height == 0 {
            return Err(GridError::InvalidConfig(format!(
                "canvas must be at least 1x1 pixels (got {}x{})",
                self.total_width, self.total_height
            )));
        }

        let h_gaps = self.horizontal_padding as f64 * (self.columns - 1) as f64;
        let v_gaps = self.vertical_padding as f64 * (self.rows - 1) as f64;

        let cell_width = (self.total_width as f64 - h_gaps) / self.columns as f64;
        let cell_height = (self.total_height as f64 - v_gaps) / self.rows as f64;

        if cell_width <= 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "horizontal padding {}px x {} gaps leaves no room in {}px",
                self.horizontal_padding,
                self.columns - 1,
                self.total_width
            )));
        }
        if cell_height <= 0.0 {
            return Err(GridError::InvalidConfig(format!(
                "vertical padding {}px x {} gaps leaves no room in {}px",
                self.vertical_padding,
                self.rows - 1,
                self.total_height
            )));
        }

        Ok((cell_width, cell_height))
    }

    /// Check that the grid can be laid out
    pub fn validate(&self) -> Result<()> {
        self.cell_size().map(|_| ())
    }

    /// Settings supplied as JSON from outside the form: parsed, forced into
    /// the form ranges, then checked so the grid can be laid out
    pub fn from_settings_json(json: &str) -> Result<Self> {
        let config = Self::from_json(json)?.clamped();
        config.validate()?;
        Ok(config)
    }

    /// Copy of this config with every numeric field forced into the form ranges
    pub fn clamped(&self) -> Self {
        let clamp = |value: u32, range: &RangeInclusive<u32>| value.clamp(*range.start(), *range.end());

        Self {
            rows: clamp(self.rows, &ROWS_RANGE),
            columns: clamp(self.columns, &COLUMNS_RANGE),
            total_width: clamp(self.total_width, &EXTENT_RANGE),
            total_height: clamp(self.total_height, &EXTENT_RANGE),
            horizontal_padding: clamp(self.horizontal_padding, &PADDING_RANGE),
            vertical_padding: clamp(self.vertical_padding, &PADDING_RANGE),
            background_color: self.background_color,
        }
    }

    /// Whether switching to `other` changes the cell count or arrangement
    pub fn shape_differs(&self, other: &GridConfig) -> bool {
        self.rows != other.rows || self.columns != other.columns
    }
}
