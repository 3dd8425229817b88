/// State management module
///
/// This module handles all application state, including:
/// - Grid settings (config.rs)
/// - Cell assignments (cells.rs)
/// - Shared data structures (data.rs)
/// - The source list of imported images (library.rs)

pub mod cells;
pub mod config;
pub mod data;
pub mod library;

pub use cells::GridCells;
pub use config::GridConfig;
pub use data::{AssetId, AssetState, DecodedImage, ImageAsset};
pub use library::AssetLibrary;
