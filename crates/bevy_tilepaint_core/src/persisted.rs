//! Map file format
//!
//! A saved map only stores which tileset cell each map cell was copied
//! from; pixels are cut out of the tileset again when the map is loaded.
//!
//! # Example JSON
//! ```json
//! {
//!   "points": [
//!     [{ "x": 5, "y": 5 }, { "x": 1, "y": 0 }]
//!   ],
//!   "collisions": [{ "x": 3, "y": 3 }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::{Collisions, EditSnapshot, GridIndex, MapError, PlacedTiles, Tileset};

/// Serializable map: destination cell -> tileset origin, plus collision cells
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedMap {
    /// `(destination, source origin)` pairs; destinations are unique
    pub points: Vec<(GridIndex, GridIndex)>,
    /// Collision cells; omitted from the file when empty
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub collisions: BTreeSet<GridIndex>,
}

impl PersistedMap {
    /// Decode a map document, rejecting duplicate destinations
    pub fn from_json(content: &str) -> Result<Self, MapError> {
        let map: PersistedMap = serde_json::from_str(content)?;
        map.validate()?;
        Ok(map)
    }

    pub fn to_json_pretty(&self) -> Result<String, MapError> {
        serde_json::to_string_pretty(self).map_err(|e| MapError::Malformed(e.to_string()))
    }

    /// Check that every destination appears once
    pub fn validate(&self) -> Result<(), MapError> {
        let mut seen = HashSet::with_capacity(self.points.len());
        for (destination, _) in &self.points {
            if !seen.insert(*destination) {
                return Err(MapError::Malformed(format!(
                    "destination ({}, {}) appears more than once",
                    destination.x, destination.y
                )));
            }
        }
        Ok(())
    }
}

/// Reduce an edit snapshot to its tileset-relative form
pub fn to_persisted(snapshot: &EditSnapshot) -> PersistedMap {
    PersistedMap {
        points: snapshot
            .tiles
            .iter()
            .map(|(destination, content)| (*destination, content.origin()))
            .collect(),
        collisions: snapshot.collisions.iter().copied().collect(),
    }
}

/// Rebuild an edit snapshot, cutting each tile out of `tileset`.
///
/// Fails without producing anything if any origin lies outside the tileset.
pub fn from_persisted(map: &PersistedMap, tileset: &Tileset) -> Result<EditSnapshot, MapError> {
    map.validate()?;
    let tiles = map
        .points
        .iter()
        .map(|(destination, origin)| Ok((*destination, tileset.extract(*origin)?)))
        .collect::<Result<PlacedTiles, MapError>>()?;
    let collisions: Collisions = map.collisions.iter().copied().collect();
    Ok(EditSnapshot::new(tiles, collisions))
}
