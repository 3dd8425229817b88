use super::data::AssetId;

/// Row-major grid of slots, each optionally holding one asset.
///
/// An asset sits in at most one cell: assigning it elsewhere moves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCells {
    rows: u32,
    columns: u32,
    slots: Vec<Option<AssetId>>,
}

impl GridCells {
    /// Empty grid of `rows * columns` cells
    pub fn new(rows: u32, columns: u32) -> Self {
        Self {
            rows,
            columns,
            slots: vec![None; rows as usize * columns as usize],
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Row-major index of (row, col), if inside the grid
    pub fn index_of(&self, row: u32, col: u32) -> Option<usize> {
        if row < self.rows && col < self.columns {
            Some(row as usize * self.columns as usize + col as usize)
        } else {
            None
        }
    }

    /// Asset held by the cell at `index`
    pub fn get(&self, index: usize) -> Option<AssetId> {
        self.slots.get(index).copied().flatten()
    }

    /// Put `asset` into the cell at `index`, replacing what was there.
    /// Any other cell holding the same asset is emptied.
    /// Returns false if `index` is outside the grid
    pub fn assign(&mut self, index: usize, asset: AssetId) -> bool {
        if index >= self.slots.len() {
            return false;
        }

        for slot in self.slots.iter_mut() {
            if *slot == Some(asset) {
                *slot = None;
            }
        }
        self.slots[index] = Some(asset);
        true
    }

    /// Empty one cell, returning what it held
    pub fn clear(&mut self, index: usize) -> Option<AssetId> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Empty every cell holding `asset`
    pub fn forget(&mut self, asset: AssetId) {
        for slot in self.slots.iter_mut() {
            if *slot == Some(asset) {
                *slot = None;
            }
        }
    }

    /// Empty all cells, keeping the shape
    pub fn reset(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// Re-initialise as an empty `rows * columns` grid
    pub fn resize(&mut self, rows: u32, columns: u32) {
        *self = Self::new(rows, columns);
    }

    /// Index of the cell holding `asset`
    pub fn position_of(&self, asset: AssetId) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(asset))
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let cells = GridCells::new(2, 3);
        assert_eq!(cells.len(), 6);
        assert_eq!(cells.filled_count(), 0);
        assert_eq!(cells.index_of(1, 2), Some(5));
        assert_eq!(cells.index_of(2, 0), None);
        assert_eq!(cells.index_of(0, 3), None);
    }

    #[test]
    fn test_last_drop_wins() {
        let mut cells = GridCells::new(2, 2);
        assert!(cells.assign(0, AssetId(1)));
        assert!(cells.assign(0, AssetId(2)));

        assert_eq!(cells.get(0), Some(AssetId(2)));
        assert_eq!(cells.position_of(AssetId(1)), None);
        assert_eq!(cells.filled_count(), 1);
    }

    #[test]
    fn test_assigning_moves_asset() {
        let mut cells = GridCells::new(2, 2);
        cells.assign(0, AssetId(7));
        cells.assign(3, AssetId(7));

        assert_eq!(cells.get(0), None);
        assert_eq!(cells.get(3), Some(AssetId(7)));
        assert_eq!(cells.filled_count(), 1);
    }

    #[test]
    fn test_out_of_range_assign_is_rejected() {
        let mut cells = GridCells::new(1, 1);
        cells.assign(0, AssetId(1));
        assert!(!cells.assign(1, AssetId(1)));
        assert_eq!(cells.get(0), Some(AssetId(1)));
        assert_eq!(cells.get(1), None);
    }

    #[test]
    fn test_clear_forget_reset() {
        let mut cells = GridCells::new(2, 2);
        cells.assign(0, AssetId(1));
        cells.assign(1, AssetId(2));
        cells.assign(2, AssetId(3));

        assert_eq!(cells.clear(0), Some(AssetId(1)));
        assert_eq!(cells.clear(0), None);
        assert_eq!(cells.clear(99), None);

        cells.forget(AssetId(2));
        assert_eq!(cells.get(1), None);
        assert_eq!(cells.filled_count(), 1);

        cells.reset();
        assert_eq!(cells.filled_count(), 0);
        assert_eq!(cells.len(), 4);
    }

    #[test]
    fn test_resize_empties_grid() {
        let mut cells = GridCells::new(2, 2);
        cells.assign(3, AssetId(1));
        cells.resize(3, 4);

        assert_eq!((cells.rows(), cells.columns()), (3, 4));
        assert_eq!(cells.len(), 12);
        assert_eq!(cells.filled_count(), 0);
    }
}
