//! Tileset image and the tile bitmaps copied out of it

use image::{DynamicImage, GenericImageView, RgbaImage};
use std::path::Path;
use std::sync::Arc;

use crate::{GridIndex, GridMapper, MapError, SourceRect};

/// One cell's worth of pixels copied from the tileset.
///
/// The pixel buffer is never written after extraction, so clones share it.
/// `origin` is the cell the pixels came from and is what gets persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TileContent {
    origin: GridIndex,
    pixels: Arc<RgbaImage>,
}

impl TileContent {
    pub fn new(origin: GridIndex, pixels: RgbaImage) -> Self {
        Self {
            origin,
            pixels: Arc::new(pixels),
        }
    }

    /// Tileset cell this tile was copied from
    pub fn origin(&self) -> GridIndex {
        self.origin
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Read-only source bitmap, cut into square cells of `cell_size` pixels
#[derive(Debug, Clone)]
pub struct Tileset {
    image: RgbaImage,
    cells: GridMapper,
}

impl Tileset {
    pub fn new(image: RgbaImage, cell_size: u32) -> Result<Self, MapError> {
        Ok(Self {
            image,
            cells: GridMapper::new(cell_size, 1.0)?,
        })
    }

    pub fn from_dynamic(image: DynamicImage, cell_size: u32) -> Result<Self, MapError> {
        Self::new(image.to_rgba8(), cell_size)
    }

    /// Decode a tileset image from disk
    pub fn open(path: &Path, cell_size: u32) -> Result<Self, MapError> {
        let image = image::open(path)?;
        Self::from_dynamic(image, cell_size)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn cell_size(&self) -> u32 {
        self.cells.cell_size()
    }

    /// Number of whole cells per row
    pub fn columns(&self) -> u32 {
        self.width() / self.cell_size()
    }

    /// Number of whole cells per column
    pub fn rows(&self) -> u32 {
        self.height() / self.cell_size()
    }

    /// Whether a whole cell at `index` fits inside the image
    pub fn contains(&self, index: GridIndex) -> bool {
        self.cells
            .source_rect(index)
            .is_some_and(|rect| self.fits(rect))
    }

    fn fits(&self, rect: SourceRect) -> bool {
        rect.x
            .checked_add(rect.width)
            .is_some_and(|right| right <= self.width())
            && rect
                .y
                .checked_add(rect.height)
                .is_some_and(|bottom| bottom <= self.height())
    }

    /// Copy a pixel rectangle out of the image
    pub fn extract_cell(&self, rect: SourceRect) -> Result<RgbaImage, MapError> {
        if !self.fits(rect) {
            return Err(MapError::OutOfBounds {
                origin: GridIndex::new(
                    (rect.x / self.cell_size()) as i32,
                    (rect.y / self.cell_size()) as i32,
                ),
                image_width: self.width(),
                image_height: self.height(),
            });
        }
        Ok(self
            .image
            .view(rect.x, rect.y, rect.width, rect.height)
            .to_image())
    }

    /// Copy the cell at `origin` as a tile
    pub fn extract(&self, origin: GridIndex) -> Result<TileContent, MapError> {
        let rect = self
            .cells
            .source_rect(origin)
            .ok_or(MapError::OutOfBounds {
                origin,
                image_width: self.width(),
                image_height: self.height(),
            })?;
        let pixels = self.extract_cell(rect).map_err(|_| MapError::OutOfBounds {
            origin,
            image_width: self.width(),
            image_height: self.height(),
        })?;
        Ok(TileContent::new(origin, pixels))
    }
}

/// Tileset whose cell `(x, y)` is filled with the color `(x * 10, y * 10, 200)`
#[cfg(test)]
pub(crate) fn test_tileset(columns: u32, rows: u32, cell_size: u32) -> Tileset {
    let image = RgbaImage::from_fn(columns * cell_size, rows * cell_size, |px, py| {
        let x = (px / cell_size) as u8;
        let y = (py / cell_size) as u8;
        image::Rgba([x * 10, y * 10, 200, 255])
    });
    Tileset::new(image, cell_size).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let tileset = test_tileset(4, 3, 16);
        assert_eq!((tileset.width(), tileset.height()), (64, 48));
        assert_eq!((tileset.columns(), tileset.rows()), (4, 3));
        assert!(tileset.contains(GridIndex::new(3, 2)));
        assert!(!tileset.contains(GridIndex::new(4, 0)));
        assert!(!tileset.contains(GridIndex::new(0, -1)));
    }

    #[test]
    fn test_extract_copies_the_cell() {
        let tileset = test_tileset(4, 3, 16);
        let tile = tileset.extract(GridIndex::new(2, 1)).unwrap();

        assert_eq!(tile.origin(), GridIndex::new(2, 1));
        assert_eq!(tile.pixels().dimensions(), (16, 16));
        assert_eq!(tile.pixels().get_pixel(0, 0).0, [20, 10, 200, 255]);
        assert_eq!(tile.pixels().get_pixel(15, 15).0, [20, 10, 200, 255]);
    }

    #[test]
    fn test_extract_out_of_bounds() {
        let tileset = test_tileset(2, 2, 16);
        let err = tileset.extract(GridIndex::new(2, 0)).unwrap_err();
        assert_eq!(
            err,
            MapError::OutOfBounds {
                origin: GridIndex::new(2, 0),
                image_width: 32,
                image_height: 32,
            }
        );
        assert!(tileset.extract(GridIndex::new(-1, 0)).is_err());
    }

    #[test]
    fn test_partial_cell_is_out_of_bounds() {
        let image = RgbaImage::new(40, 32);
        let tileset = Tileset::new(image, 32).unwrap();
        assert_eq!(tileset.columns(), 1);
        assert!(tileset.extract(GridIndex::new(1, 0)).is_err());
        assert!(tileset
            .extract_cell(SourceRect {
                x: 8,
                y: 0,
                width: 32,
                height: 32
            })
            .is_ok());
    }

    #[test]
    fn test_clones_share_pixels() {
        let tileset = test_tileset(1, 1, 8);
        let tile = tileset.extract(GridIndex::new(0, 0)).unwrap();
        let copy = tile.clone();
        assert!(std::ptr::eq(tile.pixels(), copy.pixels()));
        assert_eq!(tile, copy);
    }

    #[test]
    fn test_open_missing_file() {
        let result = Tileset::open(Path::new("/nonexistent/tileset.png"), 32);
        assert!(matches!(result, Err(MapError::Image(_))));
    }
}
