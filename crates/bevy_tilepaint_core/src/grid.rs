//! Grid coordinates and the pixel <-> grid mapping

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use crate::MapError;

/// Integer cell coordinates, used both for tileset cells and map cells
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(default)]
pub struct GridIndex {
    pub x: i32,
    pub y: i32,
}

impl GridIndex {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise minimum of two indices
    pub fn min(self, other: GridIndex) -> GridIndex {
        GridIndex::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum of two indices
    pub fn max(self, other: GridIndex) -> GridIndex {
        GridIndex::new(self.x.max(other.x), self.y.max(other.y))
    }

    pub fn is_negative(self) -> bool {
        self.x < 0 || self.y < 0
    }

    /// Component-wise addition, `None` when either axis leaves the i32 range
    pub fn checked_add(self, rhs: GridIndex) -> Option<GridIndex> {
        Some(GridIndex::new(
            self.x.checked_add(rhs.x)?,
            self.y.checked_add(rhs.y)?,
        ))
    }

    pub fn checked_sub(self, rhs: GridIndex) -> Option<GridIndex> {
        Some(GridIndex::new(
            self.x.checked_sub(rhs.x)?,
            self.y.checked_sub(rhs.y)?,
        ))
    }

    pub fn saturating_add(self, rhs: GridIndex) -> GridIndex {
        GridIndex::new(
            self.x.saturating_add(rhs.x),
            self.y.saturating_add(rhs.y),
        )
    }
}

impl Add for GridIndex {
    type Output = GridIndex;

    fn add(self, rhs: GridIndex) -> GridIndex {
        GridIndex::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for GridIndex {
    type Output = GridIndex;

    fn sub(self, rhs: GridIndex) -> GridIndex {
        GridIndex::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A position in screen/canvas pixels (Y grows downwards)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Placement rectangle of one cell in display pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub origin: PixelPoint,
    pub size: PixelPoint,
}

impl PixelRect {
    pub fn center(&self) -> PixelPoint {
        PixelPoint::new(
            self.origin.x + self.size.x / 2.0,
            self.origin.y + self.size.y / 2.0,
        )
    }
}

/// Unscaled pixel rectangle inside the tileset image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Inclusive rectangle of grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRect {
    pub min: GridIndex,
    pub max: GridIndex,
}

impl GridRect {
    /// Build the rectangle spanned by two opposite corners, in any order
    pub fn from_corners(a: GridIndex, b: GridIndex) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn width(&self) -> u32 {
        (self.max.x - self.min.x) as u32 + 1
    }

    pub fn height(&self) -> u32 {
        (self.max.y - self.min.y) as u32 + 1
    }

    pub fn contains(&self, cell: GridIndex) -> bool {
        cell.x >= self.min.x && cell.x <= self.max.x && cell.y >= self.min.y && cell.y <= self.max.y
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = GridIndex> {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| GridIndex::new(x, y)))
    }
}

/// Converts between pixel positions and grid cells.
///
/// The scaled cell size is rounded to whole pixels so that a cell's pixel
/// origin always maps back to the same cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMapper {
    cell_size: u32,
    display_scale: f32,
    scaled_cell_size: u32,
}

impl GridMapper {
    pub fn new(cell_size: u32, display_scale: f32) -> Result<Self, MapError> {
        if cell_size == 0 {
            return Err(MapError::InvalidGrid("cell size must be positive".to_string()));
        }
        if !display_scale.is_finite() || display_scale <= 0.0 {
            return Err(MapError::InvalidGrid(format!(
                "display scale must be a positive number, got {}",
                display_scale
            )));
        }
        let scaled_cell_size = (cell_size as f32 * display_scale).round().max(1.0) as u32;
        Ok(Self {
            cell_size,
            display_scale,
            scaled_cell_size,
        })
    }

    /// Unscaled grid with the given cell size; a zero size is treated as 1
    pub fn unscaled(cell_size: u32) -> Self {
        let cell_size = cell_size.max(1);
        Self {
            cell_size,
            display_scale: 1.0,
            scaled_cell_size: cell_size,
        }
    }

    /// Size of one cell in the untransformed source image
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn display_scale(&self) -> f32 {
        self.display_scale
    }

    /// Size of one cell on screen
    pub fn scaled_cell_size(&self) -> f32 {
        self.scaled_cell_size as f32
    }

    /// Cell containing a pixel position.
    ///
    /// Floors toward negative infinity, so positions left of or above the
    /// origin resolve to negative indices rather than collapsing onto row 0.
    pub fn to_grid_index(&self, point: PixelPoint) -> GridIndex {
        let size = self.scaled_cell_size();
        GridIndex::new(
            (point.x / size).floor() as i32,
            (point.y / size).floor() as i32,
        )
    }

    /// On-screen rectangle covered by a cell
    pub fn to_pixel_rect(&self, index: GridIndex) -> PixelRect {
        let size = self.scaled_cell_size();
        PixelRect {
            origin: PixelPoint::new(index.x as f32 * size, index.y as f32 * size),
            size: PixelPoint::new(size, size),
        }
    }

    /// Unscaled rectangle of a cell inside the source image, `None` for negative cells
    pub fn source_rect(&self, index: GridIndex) -> Option<SourceRect> {
        if index.is_negative() {
            return None;
        }
        Some(SourceRect {
            x: (index.x as u32).checked_mul(self.cell_size)?,
            y: (index.y as u32).checked_mul(self.cell_size)?,
            width: self.cell_size,
            height: self.cell_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_round_trip() {
        for scale in [1.0, 0.5, 1.5, 2.0, 3.0] {
            let mapper = GridMapper::new(32, scale).unwrap();
            for y in 0..40 {
                for x in 0..40 {
                    let g = GridIndex::new(x, y);
                    assert_eq!(mapper.to_grid_index(mapper.to_pixel_rect(g).origin), g);
                }
            }
        }
    }

    #[test]
    fn test_to_grid_index_floors() {
        let mapper = GridMapper::new(32, 1.0).unwrap();
        assert_eq!(mapper.to_grid_index(PixelPoint::new(10.0, 10.0)), GridIndex::new(0, 0));
        assert_eq!(mapper.to_grid_index(PixelPoint::new(31.9, 32.0)), GridIndex::new(0, 1));
        assert_eq!(mapper.to_grid_index(PixelPoint::new(-1.0, 5.0)), GridIndex::new(-1, 0));
    }

    #[test]
    fn test_display_scale_applies_to_screen_only() {
        let mapper = GridMapper::new(16, 2.0).unwrap();
        assert_eq!(mapper.scaled_cell_size(), 32.0);
        assert_eq!(mapper.to_grid_index(PixelPoint::new(40.0, 70.0)), GridIndex::new(1, 2));

        let rect = mapper.to_pixel_rect(GridIndex::new(2, 3));
        assert_eq!(rect.origin, PixelPoint::new(64.0, 96.0));
        assert_eq!(rect.size, PixelPoint::new(32.0, 32.0));
        assert_eq!(rect.center(), PixelPoint::new(80.0, 112.0));

        let source = mapper.source_rect(GridIndex::new(2, 3)).unwrap();
        assert_eq!(
            source,
            SourceRect {
                x: 32,
                y: 48,
                width: 16,
                height: 16
            }
        );
    }

    #[test]
    fn test_source_rect_rejects_negative() {
        let mapper = GridMapper::new(32, 1.0).unwrap();
        assert!(mapper.source_rect(GridIndex::new(-1, 0)).is_none());
    }

    #[test]
    fn test_invalid_grid() {
        assert!(GridMapper::new(0, 1.0).is_err());
        assert!(GridMapper::new(32, 0.0).is_err());
        assert!(GridMapper::new(32, f32::NAN).is_err());
        assert_eq!(GridMapper::unscaled(0).cell_size(), 1);
        assert_eq!(GridMapper::unscaled(16), GridMapper::new(16, 1.0).unwrap());
    }

    #[test]
    fn test_grid_rect_from_any_corners() {
        let rect = GridRect::from_corners(GridIndex::new(2, 1), GridIndex::new(1, 0));
        assert_eq!(rect.min, GridIndex::new(1, 0));
        assert_eq!(rect.max, GridIndex::new(2, 1));
        assert_eq!((rect.width(), rect.height()), (2, 2));

        let cells: Vec<_> = rect.cells().collect();
        assert_eq!(
            cells,
            vec![
                GridIndex::new(1, 0),
                GridIndex::new(2, 0),
                GridIndex::new(1, 1),
                GridIndex::new(2, 1),
            ]
        );
        assert!(rect.contains(GridIndex::new(2, 0)));
        assert!(!rect.contains(GridIndex::new(3, 0)));
    }

    #[test]
    fn test_grid_index_defaults_missing_fields() {
        let index: GridIndex = serde_json::from_str(r#"{"y":4}"#).unwrap();
        assert_eq!(index, GridIndex::new(0, 4));
    }

    #[test]
    fn test_checked_arithmetic_at_range_edges() {
        let edge = GridIndex::new(i32::MAX, 0);
        let step_x = GridIndex::new(1, 0);
        assert_eq!(edge.checked_add(step_x), None);
        assert_eq!(
            edge.checked_add(GridIndex::new(0, 1)),
            Some(GridIndex::new(i32::MAX, 1))
        );
        assert_eq!(GridIndex::new(i32::MIN, 0).checked_sub(step_x), None);

        let saturated = edge.saturating_add(GridIndex::new(5, 5));
        assert_eq!(saturated, GridIndex::new(i32::MAX, 5));
    }
}
