use std::path::Path;

use super::data::{AssetId, AssetState, DecodedImage, ImageAsset};

/// The AssetLibrary is the source list of imported images.
/// It hands out ids, tracks decode state and owns the decoded bitmaps.
/// Cloning is cheap: bitmaps are shared, so a clone works as a snapshot
/// for background export.
#[derive(Debug, Clone, Default)]
pub struct AssetLibrary {
    assets: Vec<ImageAsset>,
    next_id: u64,
}

impl AssetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file before its decode task finishes.
    /// Returns the new asset ID
    pub fn add_pending(&mut self, path: &Path) -> AssetId {
        let id = AssetId(self.next_id);
        self.next_id += 1;

        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        self.assets.push(ImageAsset {
            id,
            name,
            path: path.to_path_buf(),
            state: AssetState::Pending,
        });

        id
    }

    /// Record a successful decode. Returns false if the asset was removed meanwhile
    pub fn mark_ready(&mut self, id: AssetId, decoded: DecodedImage) -> bool {
        self.set_state(id, AssetState::Ready(decoded))
    }

    /// Record a failed decode. Returns false if the asset was removed meanwhile
    pub fn mark_failed(&mut self, id: AssetId, reason: impl Into<String>) -> bool {
        self.set_state(id, AssetState::Failed(reason.into()))
    }

    fn set_state(&mut self, id: AssetId, state: AssetState) -> bool {
        match self.assets.iter_mut().find(|a| a.id == id) {
            Some(asset) => {
                asset.state = state;
                true
            }
            None => false,
        }
    }

    /// Drop an asset from the source list, releasing its pixels once no
    /// snapshot still holds them. Callers must also clear it from the grid
    pub fn remove(&mut self, id: AssetId) -> Option<ImageAsset> {
        let index = self.assets.iter().position(|a| a.id == id)?;
        Some(self.assets.remove(index))
    }

    pub fn get(&self, id: AssetId) -> Option<&ImageAsset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// All assets in import order
    pub fn iter(&self) -> impl Iterator<Item = &ImageAsset> {
        self.assets.iter()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.assets.iter().filter(|a| a.is_pending()).count()
    }

    /// Whether a file is already in the list (imports skip duplicates)
    pub fn contains_path(&self, path: &Path) -> bool {
        self.assets.iter().any(|a| a.path == path)
    }
}
