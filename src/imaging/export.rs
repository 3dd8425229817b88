/// PNG export of a composed grid
/// Composition and encoding run off the UI thread on a snapshot of the state
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use super::compositor::{compose, ComposeOptions, SkippedCell};
use crate::error::{GridError, Result};
use crate::state::{AssetLibrary, GridCells, GridConfig};

/// File name suggested in the save dialog
pub const DEFAULT_EXPORT_FILENAME: &str = "image-grid.png";

/// Outcome of a successful export
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes_written: usize,
    /// Assigned cells that were drawn empty
    pub skipped: Vec<SkippedCell>,
}

/// Encode a bitmap as PNG
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(GridError::Encode)?;
    Ok(bytes)
}

/// Compose the grid and encode it, returning the PNG bytes and skipped cells
pub fn render_png(
    config: &GridConfig,
    cells: &GridCells,
    library: &AssetLibrary,
    options: &ComposeOptions,
) -> Result<(Vec<u8>, Vec<SkippedCell>)> {
    let composition = compose(config, cells, library, options)?;
    let bytes = encode_png(&composition.image)?;
    Ok((bytes, composition.skipped))
}

/// Compose, encode and write the grid to `path`
///
/// Takes owned copies so it can run as a background task while the UI keeps
/// editing; bitmaps inside the library snapshot are shared, not copied.
pub async fn export_to_file(
    config: GridConfig,
    cells: GridCells,
    library: AssetLibrary,
    options: ComposeOptions,
    path: PathBuf,
) -> Result<ExportReport> {
    // Spawn blocking task for CPU-bound work
    let (bytes, skipped) =
        tokio::task::spawn_blocking(move || render_png(&config, &cells, &library, &options)).await??;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, &bytes).await?;

    log::info!(
        "💾 Exported {}x{} grid to {} ({} KB)",
        config.total_width,
        config.total_height,
        path.display(),
        bytes.len() / 1024
    );

    Ok(ExportReport {
        path,
        width: config.total_width,
        height: config.total_height,
        bytes_written: bytes.len(),
        skipped,
    })
}

/// Folder the save dialog opens in: Downloads, then Pictures, then home
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::picture_dir)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Force a `.png` extension onto a chosen save path
pub fn with_png_extension(path: &Path) -> PathBuf {
    let is_png = path
        .extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("png"));

    if is_png {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Background;
    use crate::state::DecodedImage;
    use image::Rgba;
    use std::sync::Arc;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn sample_state() -> (GridConfig, GridCells, AssetLibrary) {
        let mut library = AssetLibrary::new();
        let id = library.add_pending(Path::new("sample.png"));
        let mut pixels = RgbaImage::from_pixel(30, 20, Rgba([200, 40, 40, 255]));
        pixels.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        let pixels = Arc::new(pixels);
        library.mark_ready(
            id,
            DecodedImage {
                thumbnail: pixels.clone(),
                pixels,
            },
        );

        let config = GridConfig {
            total_width: 300,
            total_height: 200,
            background_color: Background::WHITE,
            ..GridConfig::default()
        };
        let mut cells = GridCells::new(config.rows, config.columns);
        cells.assign(2, id);

        (config, cells, library)
    }

    #[test]
    fn test_encode_png_is_lossless() {
        let mut image = RgbaImage::new(3, 2);
        image.put_pixel(1, 1, Rgba([1, 2, 3, 4]));

        let bytes = encode_png(&image).unwrap();
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_render_is_byte_identical() {
        let (config, cells, library) = sample_state();
        let options = ComposeOptions::default();

        let (first, _) = render_png(&config, &cells, &library, &options).unwrap();
        let (second, skipped) = render_png(&config, &cells, &library, &options).unwrap();

        assert_eq!(first, second);
        assert!(skipped.is_empty());
    }

    #[tokio::test]
    async fn test_export_to_file() {
        let (config, cells, library) = sample_state();
        let dir = std::env::temp_dir().join(format!("image-grid-export-{}", std::process::id()));
        let path = dir.join(DEFAULT_EXPORT_FILENAME);

        let report = export_to_file(config, cells, library, ComposeOptions::default(), path.clone())
            .await
            .unwrap();

        assert_eq!(report.path, path);
        assert_eq!((report.width, report.height), (300, 200));

        let written = std::fs::read(&path).unwrap();
        assert_eq!(written.len(), report.bytes_written);
        let decoded = image::load_from_memory(&written).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (300, 200));
    }

    #[tokio::test]
    async fn test_export_invalid_config_writes_nothing() {
        let (mut config, cells, library) = sample_state();
        config.horizontal_padding = 300;
        let path = std::env::temp_dir().join(format!("image-grid-invalid-{}.png", std::process::id()));

        let result = export_to_file(config, cells, library, ComposeOptions::default(), path.clone()).await;

        assert!(matches!(result, Err(GridError::InvalidConfig(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_with_png_extension() {
        assert_eq!(with_png_extension(Path::new("out.PNG")), PathBuf::from("out.PNG"));
        assert_eq!(with_png_extension(Path::new("out.jpg")), PathBuf::from("out.png"));
        assert_eq!(with_png_extension(Path::new("grid")), PathBuf::from("grid.png"));
    }
}
