//! Error type shared by the core operations

use crate::GridIndex;

/// Failures reported by grid, tileset and map-file operations.
///
/// None of these leave a model half-updated: the operation that failed
/// returns before producing a new snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    /// A tile extraction rectangle does not fit inside the tileset image
    OutOfBounds {
        origin: GridIndex,
        image_width: u32,
        image_height: u32,
    },
    /// A map document could not be decoded
    Malformed(String),
    /// Cell size or display scale cannot form a grid
    InvalidGrid(String),
    /// The tileset image could not be opened or decoded
    Image(String),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::OutOfBounds {
                origin,
                image_width,
                image_height,
            } => write!(
                f,
                "Tile ({}, {}) lies outside the {}x{} tileset",
                origin.x, origin.y, image_width, image_height
            ),
            MapError::Malformed(e) => write!(f, "Malformed map: {}", e),
            MapError::InvalidGrid(e) => write!(f, "Invalid grid: {}", e),
            MapError::Image(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for MapError {}

impl From<serde_json::Error> for MapError {
    fn from(e: serde_json::Error) -> Self {
        MapError::Malformed(e.to_string())
    }
}

impl From<image::ImageError> for MapError {
    fn from(e: image::ImageError) -> Self {
        MapError::Image(e.to_string())
    }
}
