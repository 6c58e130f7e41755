//! Map file save/load operations

use super::MapDocument;
use bevy_tilepaint_core::{from_persisted, to_persisted, MapError, PersistedMap, Tileset};
use std::path::Path;

#[derive(Debug)]
pub enum DocumentError {
    IoError(String),
    Map(MapError),
    NoPath,
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::IoError(e) => write!(f, "IO error: {}", e),
            DocumentError::Map(e) => write!(f, "{}", e),
            DocumentError::NoPath => write!(f, "No file path set"),
        }
    }
}

impl std::error::Error for DocumentError {}

impl From<MapError> for DocumentError {
    fn from(e: MapError) -> Self {
        DocumentError::Map(e)
    }
}

impl MapDocument {
    /// Load a map file against `tileset`.
    ///
    /// The document is left untouched unless every step succeeds.
    pub fn load(&mut self, path: &Path, tileset: &Tileset) -> Result<(), DocumentError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DocumentError::IoError(e.to_string()))?;

        let persisted = PersistedMap::from_json(&content)?;
        let baseline = from_persisted(&persisted, tileset)?;

        self.replace(baseline, path.to_path_buf());
        Ok(())
    }

    /// Save the committed state to `path`
    pub fn save(&mut self, path: &Path) -> Result<(), DocumentError> {
        let content = to_persisted(self.committed()).to_json_pretty()?;

        std::fs::write(path, content).map_err(|e| DocumentError::IoError(e.to_string()))?;

        self.path = Some(path.to_path_buf());
        self.dirty = false;

        Ok(())
    }

    /// Save to current path if set
    pub fn save_current(&mut self) -> Result<(), DocumentError> {
        if let Some(path) = self.path.clone() {
            self.save(&path)
        } else {
            Err(DocumentError::NoPath)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_tilepaint_core::{CopiedSelection, EditSnapshot, GridIndex, GridRect};
    use image::{Rgba, RgbaImage};
    use std::path::PathBuf;

    fn tileset() -> Tileset {
        // 4x2 cells of 16px, each a distinct color
        let image = RgbaImage::from_fn(64, 32, |x, y| {
            Rgba([(x / 16) as u8 * 40, (y / 16) as u8 * 40, 90, 255])
        });
        Tileset::new(image, 16).unwrap()
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("tilepaint_doc_{}_{}", std::process::id(), name));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn edited(tileset: &Tileset) -> EditSnapshot {
        let rect = GridRect::from_corners(GridIndex::new(1, 0), GridIndex::new(2, 1));
        let selection = CopiedSelection::from_rect(tileset, rect).unwrap();
        EditSnapshot::empty()
            .with_paste(GridIndex::new(4, 4), &selection)
            .with_collision_toggled(GridIndex::new(0, 7))
    }

    #[test]
    fn test_save_then_load() {
        let dir = temp_dir("round_trip");
        let path = dir.join("level.json");
        let tileset = tileset();

        let mut document = MapDocument::new();
        document.commit(edited(&tileset));
        document.save(&path).unwrap();
        assert!(!document.dirty);
        assert_eq!(document.name(), "level");

        let mut reopened = MapDocument::new();
        reopened.load(&path, &tileset).unwrap();
        assert_eq!(reopened.live(), document.live());
        assert_eq!(reopened.path.as_deref(), Some(path.as_path()));
        assert!(!reopened.can_undo());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_save_writes_committed_not_preview() {
        let dir = temp_dir("preview");
        let path = dir.join("level.json");
        let tileset = tileset();

        let mut document = MapDocument::new();
        document.preview(edited(&tileset));
        document.save(&path).unwrap();

        let written = PersistedMap::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(written.points.is_empty());
        assert!(written.collisions.is_empty());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_failed_load_keeps_document() {
        let dir = temp_dir("failed_load");
        let path = dir.join("broken.json");
        std::fs::write(&path, r#"{"points":[[{"x":0,"y":0},{"x":9,"y":0}]]}"#).unwrap();
        let tileset = tileset();

        let mut document = MapDocument::new();
        document.commit(edited(&tileset));
        let before = document.live().clone();

        let result = document.load(&path, &tileset);
        assert!(matches!(result, Err(DocumentError::Map(MapError::OutOfBounds { .. }))));
        assert_eq!(document.live(), &before);
        assert!(document.path.is_none());
        assert!(document.can_undo());

        let missing = document.load(&dir.join("missing.json"), &tileset);
        assert!(matches!(missing, Err(DocumentError::IoError(_))));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_save_current_requires_path() {
        let mut document = MapDocument::new();
        assert!(matches!(document.save_current(), Err(DocumentError::NoPath)));
    }
}
