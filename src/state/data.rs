/// Shared data structures for the application state
///
/// These structs represent the imported images as they flow between
/// the decode tasks, the library and the UI layer.

use image::RgbaImage;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Identifier handed out by the library for each imported file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(pub u64);

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A fully decoded image, ready to be sampled by the compositor
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// RGBA8 pixels at natural size
    pub pixels: Arc<RgbaImage>,
    /// Small preview for the file list (256px bounding box)
    pub thumbnail: Arc<RgbaImage>,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Where an imported file is in its decode lifecycle
#[derive(Debug, Clone)]
pub enum AssetState {
    /// Decode task still running
    Pending,
    Ready(DecodedImage),
    /// Decode failed; holds the error message
    Failed(String),
}

/// Represents a single image in the source list
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub id: AssetId,
    /// Filename only (e.g., "IMG_0001.jpg")
    pub name: String,
    /// Full path of the selected file
    pub path: PathBuf,
    pub state: AssetState,
}

impl ImageAsset {
    /// Decoded pixels, if the decode finished successfully
    pub fn decoded(&self) -> Option<&DecodedImage> {
        match &self.state {
            AssetState::Ready(decoded) => Some(decoded),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, AssetState::Pending)
    }

    /// Natural pixel size, once decoded
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.decoded().map(|d| (d.width(), d.height()))
    }
}
