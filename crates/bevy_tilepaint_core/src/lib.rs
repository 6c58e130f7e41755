//! Core editing model for bevy_tilepaint
//!
//! This crate holds everything the editor needs that is independent of Bevy:
//! - `GridMapper` - Pixel <-> grid conversion for a fixed cell size and display scale
//! - `Tileset` - The read-only source bitmap tiles are copied from
//! - `TilesetSelector` - Drag-select state machine producing a `CopiedSelection`
//! - `EditSnapshot` - Placed tiles plus the collision layer, edited copy-on-write
//! - `EditHistory` - Snapshot undo stack that never drops its baseline
//! - `PersistedMap` - Tileset-relative map file format

mod error;
mod grid;
mod selection;
mod tileset;

pub mod edit;
pub mod history;
pub mod persisted;

pub use edit::{clear, paste, toggle_collision, Collisions, EditSnapshot, PlacedTiles};
pub use error::MapError;
pub use grid::{GridIndex, GridMapper, GridRect, PixelPoint, PixelRect, SourceRect};
pub use history::EditHistory;
pub use persisted::{from_persisted, to_persisted, PersistedMap};
pub use selection::{CopiedSelection, TilesetSelector};
pub use tileset::{TileContent, Tileset};
