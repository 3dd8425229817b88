/// Image processing module
///
/// This module handles:
/// - Decoding selected image files in background tasks
/// - Generating file-list thumbnails
/// - Laying out grid cells and cover-fitting images into them
/// - Compositing the grid and exporting it as PNG

pub mod compositor;
pub mod cover;
pub mod export;
pub mod layout;
pub mod loader;
pub mod thumbnail;

pub use compositor::{compose, ComposeOptions, Composition, SkipReason, SkippedCell};
pub use export::{export_to_file, ExportReport, DEFAULT_EXPORT_FILENAME};
