//! Map edit model: placed tiles, the collision layer and the edits on them
//!
//! Every edit returns a new value instead of mutating, so snapshots already
//! handed to the undo history can never change underneath it.

use std::collections::{BTreeMap, BTreeSet};

use crate::{CopiedSelection, GridIndex, TileContent};

/// Tiles placed on the map, at most one per cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacedTiles {
    tiles: BTreeMap<GridIndex, TileContent>,
}

impl PlacedTiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cell: GridIndex) -> Option<&TileContent> {
        self.tiles.get(&cell)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Placed tiles ordered by destination cell
    pub fn iter(&self) -> impl Iterator<Item = (&GridIndex, &TileContent)> {
        self.tiles.iter()
    }

    /// Place `selection` as a rigid block whose minimum corner lands on
    /// `destination`, overwriting whatever was there
    ///
    /// Cells of the block that would fall outside the i32 grid are dropped.
    pub fn paste(&self, destination: GridIndex, selection: &CopiedSelection) -> PlacedTiles {
        let mut next = self.clone();
        let Some(min) = selection.min() else {
            return next;
        };
        for (position, content) in selection.iter() {
            let cell = position
                .checked_sub(min)
                .and_then(|offset| destination.checked_add(offset));
            if let Some(cell) = cell {
                next.tiles.insert(cell, content.clone());
            }
        }
        next
    }

    /// Remove the tile at `cell`, if any
    pub fn erase(&self, cell: GridIndex) -> PlacedTiles {
        let mut next = self.clone();
        next.tiles.remove(&cell);
        next
    }
}

impl FromIterator<(GridIndex, TileContent)> for PlacedTiles {
    fn from_iter<I: IntoIterator<Item = (GridIndex, TileContent)>>(iter: I) -> Self {
        Self {
            tiles: iter.into_iter().collect(),
        }
    }
}

/// Cells flagged as impassable, independent of placed tiles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collisions {
    cells: BTreeSet<GridIndex>,
}

impl Collisions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, cell: GridIndex) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridIndex> {
        self.cells.iter()
    }

    /// Add `cell` if absent, remove it if present
    pub fn toggle(&self, cell: GridIndex) -> Collisions {
        let mut next = self.clone();
        if !next.cells.remove(&cell) {
            next.cells.insert(cell);
        }
        next
    }
}

impl FromIterator<GridIndex> for Collisions {
    fn from_iter<I: IntoIterator<Item = GridIndex>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Full edit state at one point in time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditSnapshot {
    pub tiles: PlacedTiles,
    pub collisions: Collisions,
}

impl EditSnapshot {
    pub fn new(tiles: PlacedTiles, collisions: Collisions) -> Self {
        Self { tiles, collisions }
    }

    /// No tiles and no collisions
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty() && self.collisions.is_empty()
    }

    pub fn with_paste(&self, destination: GridIndex, selection: &CopiedSelection) -> Self {
        Self {
            tiles: self.tiles.paste(destination, selection),
            collisions: self.collisions.clone(),
        }
    }

    pub fn with_erased(&self, cell: GridIndex) -> Self {
        Self {
            tiles: self.tiles.erase(cell),
            collisions: self.collisions.clone(),
        }
    }

    pub fn with_collision_toggled(&self, cell: GridIndex) -> Self {
        Self {
            tiles: self.tiles.clone(),
            collisions: self.collisions.toggle(cell),
        }
    }
}

/// Place `selection` at `destination`; see [`PlacedTiles::paste`]
pub fn paste(
    placed: &PlacedTiles,
    destination: GridIndex,
    selection: &CopiedSelection,
) -> PlacedTiles {
    placed.paste(destination, selection)
}

/// Toggle one collision cell; see [`Collisions::toggle`]
pub fn toggle_collision(collisions: &Collisions, cell: GridIndex) -> Collisions {
    collisions.toggle(cell)
}

/// Empty tiles and collisions
pub fn clear() -> (PlacedTiles, Collisions) {
    (PlacedTiles::new(), Collisions::new())
}
