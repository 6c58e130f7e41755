//! The open map document
//!
//! This module holds the edit history and file association of the map being
//! edited, plus the live snapshot shown on the canvas while a stroke is in
//! progress.

mod file;

pub use file::*;

use bevy::prelude::*;
use bevy_tilepaint_core::{EditHistory, EditSnapshot};
use std::path::PathBuf;

use crate::tileset::EditorTileset;
use crate::{EditorState, StartupFiles};

/// The map being edited
#[derive(Debug, Clone, Default, Resource)]
pub struct MapDocument {
    history: EditHistory,
    /// Displayed state; ahead of `history` only while previewing
    live: EditSnapshot,
    pub path: Option<PathBuf>,
    pub dirty: bool,
}

impl MapDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot to display
    pub fn live(&self) -> &EditSnapshot {
        &self.live
    }

    /// Last committed snapshot
    pub fn committed(&self) -> &EditSnapshot {
        self.history.peek()
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Show `snapshot` without recording it
    pub fn preview(&mut self, snapshot: EditSnapshot) {
        self.live = snapshot;
    }

    /// Drop an uncommitted preview
    pub fn discard_preview(&mut self) {
        self.live = self.history.peek().clone();
    }

    /// Record `snapshot` as a completed edit.
    ///
    /// Returns false, recording nothing, when it equals the committed state.
    pub fn commit(&mut self, snapshot: EditSnapshot) -> bool {
        let changed = &snapshot != self.history.peek();
        if changed {
            self.history.push(snapshot.clone());
            self.dirty = true;
        }
        self.live = snapshot;
        changed
    }

    /// Commit whatever is currently previewed
    pub fn commit_live(&mut self) -> bool {
        self.commit(self.live.clone())
    }

    /// Step back one edit. Returns false at the baseline.
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            self.discard_preview();
            return false;
        }
        self.live = self.history.undo().clone();
        self.dirty = true;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Start a fresh, unsaved map
    pub fn clear(&mut self) {
        let (tiles, collisions) = bevy_tilepaint_core::clear();
        let baseline = EditSnapshot::new(tiles, collisions);
        self.history.reset(baseline.clone());
        self.live = baseline;
        self.path = None;
        self.dirty = false;
    }

    /// Get document name (from path)
    pub fn name(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Replace the document with a loaded baseline
    fn replace(&mut self, baseline: EditSnapshot, path: PathBuf) {
        self.history.reset(baseline.clone());
        self.live = baseline;
        self.path = Some(path);
        self.dirty = false;
    }
}

/// Startup system opening the map passed to the plugin
pub fn open_startup_map(
    startup_files: Res<StartupFiles>,
    tileset: Res<EditorTileset>,
    mut document: ResMut<MapDocument>,
    mut editor_state: ResMut<EditorState>,
) {
    let Some(path) = startup_files.map_path.as_ref() else {
        return;
    };
    let Some(loaded_tileset) = tileset.tileset.as_ref() else {
        warn!("Map {:?} requested without a tileset; skipping", path);
        editor_state.error_message = Some("Load a tileset before opening a map".to_string());
        return;
    };

    match document.load(path, loaded_tileset) {
        Ok(()) => {
            info!(
                "Opened map {:?} ({} tiles, {} collisions)",
                path,
                document.live().tiles.len(),
                document.live().collisions.len()
            );
            editor_state.pending_add_recent_map = Some(path.clone());
        }
        Err(e) => {
            error!("Failed to open map {:?}: {}", path, e);
            editor_state.error_message = Some(format!("Failed to load map: {}", e));
        }
    }
}
