//! User preferences persisted between sessions

mod file;

pub use file::*;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Maximum number of entries kept in the recent maps list
const MAX_RECENT_MAPS: usize = 10;

/// A map file opened or saved recently
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentMap {
    pub path: String,
    pub name: String,
}

/// Editor settings stored in the platform config directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct EditorPreferences {
    /// Cell size in tileset pixels
    pub cell_size: u32,
    /// Canvas magnification
    pub display_scale: f32,
    /// Tileset image opened on startup
    pub tileset_path: Option<String>,
    pub show_grid: bool,
    pub show_collisions: bool,
    /// Reopen the most recent map when none is given on startup
    pub auto_open_last_map: bool,
    /// Most recent first
    pub recent_maps: Vec<RecentMap>,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            cell_size: 32,
            display_scale: 1.0,
            tileset_path: None,
            show_grid: true,
            show_collisions: true,
            auto_open_last_map: false,
            recent_maps: Vec::new(),
        }
    }
}

impl EditorPreferences {
    /// Move `path` to the front of the recent list
    pub fn add_recent_map(&mut self, path: PathBuf) {
        let path_str = path.to_string_lossy().to_string();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path_str.clone());

        self.recent_maps.retain(|m| m.path != path_str);
        self.recent_maps.insert(
            0,
            RecentMap {
                path: path_str,
                name,
            },
        );
        self.recent_maps.truncate(MAX_RECENT_MAPS);
    }

    pub fn remove_recent_map(&mut self, path: &str) {
        self.recent_maps.retain(|m| m.path != path);
    }

    pub fn clear_recent_maps(&mut self) {
        self.recent_maps.clear();
    }

    pub fn last_map(&self) -> Option<&RecentMap> {
        self.recent_maps.first()
    }
}
