/// Image file loader
///
/// Decodes selected files into RGBA bitmaps. Decoding is CPU-bound, so each
/// file runs as its own task on tokio's blocking pool; callers await the
/// joined results before any bitmap reaches the compositor.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task;
use walkdir::WalkDir;

use super::thumbnail::make_thumbnail;
use crate::error::{GridError, Result};
use crate::state::DecodedImage;

/// File extensions offered in the open dialog and accepted on import
pub const SUPPORTED_EXTENSIONS: [&str; 11] = [
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff", "ico", "tga", "qoi",
];

/// Check whether a path looks like an image we can decode (by extension)
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Decode one image file
pub async fn decode_image(path: PathBuf) -> Result<DecodedImage> {
    // Spawn blocking because decoding and thumbnailing are CPU-intensive
    task::spawn_blocking(move || decode_image_blocking(&path)).await?
}

/// Decode many files, one task per file, and join them.
///
/// Each job carries a caller-chosen key (the library uses asset ids) and the
/// results come back in the same order as the jobs.
pub async fn load_images<K>(jobs: Vec<(K, PathBuf)>) -> Vec<(K, Result<DecodedImage>)>
where
    K: Send + 'static,
{
    let handles: Vec<_> = jobs
        .into_iter()
        .map(|(key, path)| (key, task::spawn(decode_image(path))))
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (key, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(GridError::from(e)),
        };
        results.push((key, result));
    }

    results
}

/// Blocking implementation of image decoding
fn decode_image_blocking(path: &Path) -> Result<DecodedImage> {
    // Sniff the content so a mislabelled extension still decodes
    let reader = image::ImageReader::open(path)?.with_guessed_format()?;

    let decoded = reader.decode().map_err(|source| GridError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let pixels = decoded.to_rgba8();
    if pixels.width() == 0 || pixels.height() == 0 {
        return Err(GridError::EmptyImage(path.to_path_buf()));
    }

    let thumbnail = make_thumbnail(&pixels);

    log::info!(
        "📷 Decoded {} ({}x{})",
        path.file_name().unwrap_or_default().to_string_lossy(),
        pixels.width(),
        pixels.height()
    );

    Ok(DecodedImage {
        pixels: Arc::new(pixels),
        thumbnail: Arc::new(thumbnail),
    })
}

/// Find all supported image files under a folder, recursively, sorted by path
pub fn scan_folder(folder: &Path) -> Vec<PathBuf> {
    log::info!("🔍 Scanning folder: {}", folder.display());

    let mut found: Vec<PathBuf> = WalkDir::new(folder)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_supported_image(path))
        .collect();

    found.sort();
    found
}

/// Split dropped or picked paths into importable images and the rest
pub fn partition_supported(paths: Vec<PathBuf>) -> (Vec<PathBuf>, Vec<PathBuf>) {
    paths.into_iter().partition(|path| is_supported_image(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("image-grid-loader-{}-{}", std::process::id(), name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_png(path: &Path, width: u32, height: u32, color: [u8; 4]) {
        RgbaImage::from_pixel(width, height, Rgba(color)).save(path).unwrap();
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_image(Path::new("a.png")));
        assert!(is_supported_image(Path::new("/x/B.JPG")));
        assert!(is_supported_image(Path::new("c.webp")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("no_extension")));
    }

    #[tokio::test]
    async fn test_decode_image() {
        let dir = temp_dir("decode");
        let path = dir.join("red.png");
        write_png(&path, 6, 4, [255, 0, 0, 255]);

        let decoded = decode_image(path).await.unwrap();
        assert_eq!((decoded.width(), decoded.height()), (6, 4));
        assert_eq!(*decoded.pixels.get_pixel(5, 3), Rgba([255, 0, 0, 255]));
    }

    #[tokio::test]
    async fn test_decode_missing_file() {
        let result = decode_image(PathBuf::from("/nonexistent/path.png")).await;
        assert!(matches!(result, Err(GridError::Io(_))));
    }

    #[tokio::test]
    async fn test_decode_garbage() {
        let dir = temp_dir("garbage");
        let path = dir.join("fake.png");
        fs::write(&path, b"definitely not a png").unwrap();

        let result = decode_image(path).await;
        assert!(matches!(result, Err(GridError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_load_images_keeps_order_and_reports_failures() {
        let dir = temp_dir("batch");
        let a = dir.join("a.png");
        let b = dir.join("b.png");
        write_png(&a, 2, 2, [0, 0, 0, 255]);
        fs::write(&b, b"junk").unwrap();
        let c = dir.join("c.png");
        write_png(&c, 3, 1, [0, 0, 255, 255]);

        let results = load_images(vec![(1, a), (2, b), (3, c)]).await;

        let keys: Vec<_> = results.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![1, 2, 3]);
        assert!(results[0].1.is_ok());
        assert!(results[1].1.is_err());
        assert_eq!(results[2].1.as_ref().unwrap().width(), 3);
    }

    #[test]
    fn test_scan_folder_recurses_and_filters() {
        let dir = temp_dir("scan");
        fs::create_dir_all(dir.join("nested")).unwrap();
        write_png(&dir.join("b.png"), 1, 1, [0, 0, 0, 255]);
        write_png(&dir.join("nested").join("a.png"), 1, 1, [0, 0, 0, 255]);
        fs::write(dir.join("readme.txt"), b"hi").unwrap();

        let found = scan_folder(&dir);
        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with("b.png"));
        assert!(found[1].ends_with("nested/a.png"));
    }

    #[test]
    fn test_partition_supported() {
        let (images, rest) = partition_supported(vec![
            PathBuf::from("a.png"),
            PathBuf::from("b.doc"),
            PathBuf::from("c.jpeg"),
        ]);
        assert_eq!(images, vec![PathBuf::from("a.png"), PathBuf::from("c.jpeg")]);
        assert_eq!(rest, vec![PathBuf::from("b.doc")]);
    }
}
