//! Drag-selection over the tileset and the tiles it copies

use std::collections::BTreeMap;

use crate::{GridIndex, GridMapper, GridRect, MapError, PixelPoint, TileContent, Tileset};

/// Tiles copied by one selector gesture, keyed by their position relative
/// to each other.
///
/// Pasting translates the whole set so that `min()` lands on the destination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CopiedSelection {
    tiles: BTreeMap<GridIndex, TileContent>,
}

impl CopiedSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection holding one tile at its own origin
    pub fn single(content: TileContent) -> Self {
        let mut selection = Self::new();
        selection.insert(content.origin(), content);
        selection
    }

    /// Extract every cell of `rect` from the tileset
    pub fn from_rect(tileset: &Tileset, rect: GridRect) -> Result<Self, MapError> {
        let mut selection = Self::new();
        for cell in rect.cells() {
            selection.insert(cell, tileset.extract(cell)?);
        }
        Ok(selection)
    }

    pub fn insert(&mut self, position: GridIndex, content: TileContent) {
        self.tiles.insert(position, content);
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GridIndex, &TileContent)> {
        self.tiles.iter()
    }

    /// Bounding minimum corner, computed per axis
    pub fn min(&self) -> Option<GridIndex> {
        self.tiles.keys().copied().reduce(GridIndex::min)
    }

    /// Bounding rectangle of all positions
    pub fn bounds(&self) -> Option<GridRect> {
        let min = self.min()?;
        let max = self.tiles.keys().copied().reduce(GridIndex::max)?;
        Some(GridRect { min, max })
    }
}

/// Press/drag/release state over the tileset image.
///
/// Every transition returns the next selector instead of mutating, so a
/// failed extraction leaves the caller's selector as it was.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TilesetSelector {
    origin: Option<GridIndex>,
    cursor: Option<GridIndex>,
}

impl TilesetSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell where the current press started
    pub fn origin(&self) -> Option<GridIndex> {
        self.origin
    }

    pub fn cursor(&self) -> Option<GridIndex> {
        self.cursor
    }

    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }

    /// Rectangle between the press origin and the cursor
    pub fn selected_rect(&self) -> Option<GridRect> {
        let origin = self.origin?;
        Some(GridRect::from_corners(origin, self.cursor.unwrap_or(origin)))
    }

    /// Start a selection at `point`, copying the single cell under it
    pub fn on_press_start(
        &self,
        point: PixelPoint,
        mapper: &GridMapper,
        tileset: &Tileset,
    ) -> Result<(Self, CopiedSelection), MapError> {
        let origin = mapper.to_grid_index(point);
        let content = tileset.extract(origin)?;
        let next = Self {
            origin: Some(origin),
            cursor: Some(origin),
        };
        Ok((next, CopiedSelection::single(content)))
    }

    /// Extend the selection to the cell under `point`.
    ///
    /// Returns no selection when no press is in progress.
    pub fn on_drag_to(
        &self,
        point: PixelPoint,
        mapper: &GridMapper,
        tileset: &Tileset,
    ) -> Result<(Self, Option<CopiedSelection>), MapError> {
        let Some(origin) = self.origin else {
            return Ok((*self, None));
        };
        let cursor = mapper.to_grid_index(point);
        let selection =
            CopiedSelection::from_rect(tileset, GridRect::from_corners(origin, cursor))?;
        let next = Self {
            origin: Some(origin),
            cursor: Some(cursor),
        };
        Ok((next, Some(selection)))
    }

    /// Finish the gesture; the last emitted selection stays with the caller
    pub fn on_press_end(&self) -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tileset::test_tileset;

    fn mapper() -> GridMapper {
        GridMapper::new(32, 1.0).unwrap()
    }

    #[test]
    fn test_press_start_copies_single_cell() {
        let tileset = test_tileset(4, 4, 32);
        let (selector, selection) = TilesetSelector::new()
            .on_press_start(PixelPoint::new(40.0, 70.0), &mapper(), &tileset)
            .unwrap();

        assert_eq!(selector.origin(), Some(GridIndex::new(1, 2)));
        assert_eq!(selector.cursor(), Some(GridIndex::new(1, 2)));
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.min(), Some(GridIndex::new(1, 2)));
    }

    #[test]
    fn test_drag_selects_inclusive_rectangle() {
        let tileset = test_tileset(4, 4, 32);
        let (selector, _) = TilesetSelector::new()
            .on_press_start(PixelPoint::new(90.0, 40.0), &mapper(), &tileset)
            .unwrap();
        let (selector, selection) = selector
            .on_drag_to(PixelPoint::new(33.0, 5.0), &mapper(), &tileset)
            .unwrap();
        let selection = selection.unwrap();

        assert_eq!(
            selector.selected_rect(),
            Some(GridRect::from_corners(GridIndex::new(1, 0), GridIndex::new(2, 1)))
        );
        assert_eq!(selection.len(), 4);
        assert_eq!(selection.min(), Some(GridIndex::new(1, 0)));
        for (position, content) in selection.iter() {
            assert_eq!(*position, content.origin());
        }
        // The press origin is always part of the selection
        assert!(selection.iter().any(|(p, _)| *p == GridIndex::new(2, 1)));
    }

    #[test]
    fn test_drag_without_press_is_noop() {
        let tileset = test_tileset(2, 2, 32);
        let (selector, selection) = TilesetSelector::new()
            .on_drag_to(PixelPoint::new(10.0, 10.0), &mapper(), &tileset)
            .unwrap();
        assert_eq!(selector, TilesetSelector::new());
        assert!(selection.is_none());
    }

    #[test]
    fn test_drag_outside_tileset_fails() {
        let tileset = test_tileset(2, 2, 32);
        let (selector, _) = TilesetSelector::new()
            .on_press_start(PixelPoint::new(10.0, 10.0), &mapper(), &tileset)
            .unwrap();
        let result = selector.on_drag_to(PixelPoint::new(100.0, 10.0), &mapper(), &tileset);
        assert!(matches!(result, Err(MapError::OutOfBounds { .. })));
        // The previous selector is still usable
        assert_eq!(selector.origin(), Some(GridIndex::new(0, 0)));
    }

    #[test]
    fn test_press_end_discards_drag_state() {
        let tileset = test_tileset(2, 2, 32);
        let (selector, _) = TilesetSelector::new()
            .on_press_start(PixelPoint::new(10.0, 10.0), &mapper(), &tileset)
            .unwrap();
        let selector = selector.on_press_end();
        assert!(!selector.is_dragging());
        assert!(selector.selected_rect().is_none());
    }

    #[test]
    fn test_bounds() {
        let tileset = test_tileset(4, 4, 32);
        let rect = GridRect::from_corners(GridIndex::new(3, 1), GridIndex::new(1, 3));
        let selection = CopiedSelection::from_rect(&tileset, rect).unwrap();
        assert_eq!(selection.len(), 9);
        assert_eq!(selection.bounds(), Some(rect));
        assert_eq!(CopiedSelection::new().min(), None);
    }
}
