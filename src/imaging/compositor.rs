/// Grid compositor
///
/// Turns a grid configuration, the cell assignments and the decoded assets
/// into one RGBA bitmap:
/// - fill the canvas with the background (or leave it transparent)
/// - lay out the cells (see layout.rs for the rounding rule)
/// - cover-fit each assigned image into its cell, clipped to the cell
///
/// Inputs are only read. A cell whose asset is missing, still decoding or
/// failed to decode is drawn as empty and reported in `Composition::skipped`.

use image::{imageops, imageops::FilterType, Rgba, RgbaImage};
use std::fmt;

use super::cover::PixelCover;
use super::layout::{CellRect, GridLayout};
use crate::error::Result;
use crate::state::{AssetId, AssetLibrary, AssetState, GridCells, GridConfig};

/// Rendering knobs that are not part of the grid layout itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Resampling filter used when scaling images into cells
    pub filter: FilterType,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            filter: FilterType::Lanczos3,
        }
    }
}

/// Why an assigned cell was left empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The asset is no longer in the library
    Missing,
    /// The decode task has not finished yet
    Pending,
    DecodeFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Missing => write!(f, "image was removed"),
            SkipReason::Pending => write!(f, "image is still loading"),
            SkipReason::DecodeFailed(reason) => write!(f, "image could not be decoded: {}", reason),
        }
    }
}

/// An assigned cell that was drawn as background only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCell {
    pub index: usize,
    pub row: u32,
    pub column: u32,
    pub asset: AssetId,
    pub reason: SkipReason,
}

/// Result of one composition
#[derive(Debug, Clone)]
pub struct Composition {
    pub image: RgbaImage,
    pub skipped: Vec<SkippedCell>,
}

/// Composite the grid into a `total_width × total_height` bitmap.
///
/// Cells are looked up by row-major index using the config's column count,
/// so `cells` should have the config's shape; indices past its end are empty.
/// Fails only with `InvalidConfig`.
pub fn compose(
    config: &GridConfig,
    cells: &GridCells,
    library: &AssetLibrary,
    options: &ComposeOptions,
) -> Result<Composition> {
    let layout = GridLayout::new(config)?;

    let mut canvas = match config.background_color.fill() {
        Some(color) => RgbaImage::from_pixel(config.total_width, config.total_height, color),
        None => RgbaImage::new(config.total_width, config.total_height),
    };

    if cells.len() != config.cell_count() {
        log::warn!(
            "⚠️  Grid holds {} cells but the layout has {}; missing cells stay empty",
            cells.len(),
            config.cell_count()
        );
    }

    let mut skipped = Vec::new();

    for (index, row, column, rect) in layout.cells() {
        let Some(asset_id) = cells.get(index) else {
            continue;
        };

        let reason = match library.get(asset_id).map(|asset| &asset.state) {
            Some(AssetState::Ready(decoded)) => {
                draw_cover(&mut canvas, &decoded.pixels, rect, options.filter);
                continue;
            }
            Some(AssetState::Pending) => SkipReason::Pending,
            Some(AssetState::Failed(reason)) => SkipReason::DecodeFailed(reason.clone()),
            None => SkipReason::Missing,
        };

        log::warn!("⚠️  Cell ({}, {}) left empty: {}", row, column, reason);
        skipped.push(SkippedCell {
            index,
            row,
            column,
            asset: asset_id,
            reason,
        });
    }

    Ok(Composition {
        image: canvas,
        skipped,
    })
}

/// Cover-fit `image` into `rect` and draw it over the canvas.
///
/// The visible source window is cut out first and only that window is
/// scaled, so the tile is exactly cell-sized.
fn draw_cover(canvas: &mut RgbaImage, image: &RgbaImage, rect: CellRect, filter: FilterType) {
    if rect.is_empty() {
        return;
    }

    let Some(fit) = PixelCover::fit(image.width(), image.height(), rect.width, rect.height) else {
        return;
    };

    let window = imageops::crop_imm(image, fit.src_x, fit.src_y, fit.src_width, fit.src_height);
    let tile = if (fit.src_width, fit.src_height) == (rect.width, rect.height) {
        window.to_image()
    } else {
        imageops::resize(&*window, rect.width, rect.height, filter)
    };

    blend_over(canvas, &tile, rect.x, rect.y);
}

/// Source-over blend of `tile` onto `canvas` with its top-left at (x, y)
fn blend_over(canvas: &mut RgbaImage, tile: &RgbaImage, x: u32, y: u32) {
    for (tx, ty, pixel) in tile.enumerate_pixels() {
        let (cx, cy) = (x + tx, y + ty);
        if cx >= canvas.width() || cy >= canvas.height() {
            continue;
        }

        let alpha = pixel.0[3];
        if alpha == 0 {
            continue;
        }

        let target = canvas.get_pixel_mut(cx, cy);
        if alpha == 255 {
            *target = *pixel;
        } else {
            *target = blend_pixel(*target, *pixel);
        }
    }
}

/// Straight-alpha "source over" for one pixel
fn blend_pixel(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src.0[3] as f32 / 255.0;
    let da = dst.0[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let s = src.0[c] as f32 / 255.0;
        let d = dst.0[c] as f32 / 255.0;
        let v = (s * sa + d * da * (1.0 - sa)) / out_a;
        out[c] = (v * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}
