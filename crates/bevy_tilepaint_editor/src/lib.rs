//! bevy_tilepaint_editor - Tile map editor built on Bevy and egui
//!
//! This crate wires the editing model from `bevy_tilepaint_core` into an
//! interactive application:
//! - Tileset panel with drag-to-select copying
//! - Paint, erase and collision tools on a grid canvas
//! - Snapshot undo
//! - Map save/load as tileset-relative JSON
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use bevy_tilepaint_editor::EditorPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(EditorPlugin::new().with_tileset_path("assets/map.png"))
//!         .run();
//! }
//! ```

pub mod commands;
pub mod document;
pub mod preferences;
pub mod render;
pub mod tileset;
pub mod tools;
pub mod ui;

pub use bevy_tilepaint_core;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_tilepaint_core::{CopiedSelection, GridMapper, TilesetSelector};
use std::path::PathBuf;

use commands::handle_keyboard_shortcuts;
use document::MapDocument;
use preferences::EditorPreferences;
use render::MapRenderPlugin;
use tileset::EditorTileset;
use tools::EditorToolsPlugin;
use ui::{EditorTool, EditorUiPlugin, PendingAction};

/// Fallback when neither the plugin nor the preferences give a usable grid
const DEFAULT_CELL_SIZE: u32 = 32;

/// Grid mappers for the map canvas and the tileset panel
///
/// Both share the cell size; only the canvas applies the display scale.
#[derive(Resource, Debug, Clone, Copy)]
pub struct EditorGrid {
    pub canvas: GridMapper,
    pub tileset: GridMapper,
}

impl EditorGrid {
    pub fn new(cell_size: u32, display_scale: f32) -> Result<Self, bevy_tilepaint_core::MapError> {
        Ok(Self {
            canvas: GridMapper::new(cell_size, display_scale)?,
            tileset: GridMapper::new(cell_size, 1.0)?,
        })
    }
}

impl Default for EditorGrid {
    fn default() -> Self {
        Self {
            canvas: GridMapper::unscaled(DEFAULT_CELL_SIZE),
            tileset: GridMapper::unscaled(DEFAULT_CELL_SIZE),
        }
    }
}

/// Files to open at startup, resolved from plugin settings and preferences
#[derive(Resource, Debug, Clone, Default)]
pub struct StartupFiles {
    pub tileset_path: Option<PathBuf>,
    pub map_path: Option<PathBuf>,
}

/// Main editor plugin
///
/// # Example
///
/// ```rust,ignore
/// use bevy::prelude::*;
/// use bevy_tilepaint_editor::EditorPlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(
///         EditorPlugin::new()
///             .with_tileset_path("assets/map.png")
///             .with_cell_size(16)
///             .with_display_scale(2.0)
///     )
///     .run();
/// ```
#[derive(Default)]
pub struct EditorPlugin {
    /// Tileset image. If None, the one from preferences is used.
    pub tileset_path: Option<PathBuf>,
    /// Map file to open on startup
    pub map_path: Option<PathBuf>,
    /// Cell size override in source pixels
    pub cell_size: Option<u32>,
    /// Display scale override for the canvas
    pub display_scale: Option<f32>,
}

impl EditorPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tileset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tileset_path = Some(path.into());
        self
    }

    pub fn with_map_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.map_path = Some(path.into());
        self
    }

    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = Some(cell_size);
        self
    }

    pub fn with_display_scale(mut self, scale: f32) -> Self {
        self.display_scale = Some(scale);
        self
    }

    /// Build the grid from plugin overrides, then preferences, then defaults
    fn resolve_grid(&self, preferences: &EditorPreferences) -> EditorGrid {
        let cell_size = self.cell_size.unwrap_or(preferences.cell_size);
        let display_scale = self.display_scale.unwrap_or(preferences.display_scale);
        match EditorGrid::new(cell_size, display_scale) {
            Ok(grid) => grid,
            Err(e) => {
                bevy::log::warn!("{}. Falling back to {}px cells.", e, DEFAULT_CELL_SIZE);
                EditorGrid::default()
            }
        }
    }
}

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        // Load user preferences
        let preferences = EditorPreferences::load();
        bevy::log::info!("Loaded editor preferences");

        let grid = self.resolve_grid(&preferences);
        bevy::log::info!(
            "EditorPlugin: {}px cells at {}x display scale",
            grid.canvas.cell_size(),
            grid.canvas.display_scale()
        );

        let startup_files = StartupFiles {
            tileset_path: self
                .tileset_path
                .clone()
                .or_else(|| preferences.tileset_path.as_ref().map(PathBuf::from)),
            map_path: self.map_path.clone().or_else(|| {
                preferences
                    .last_map()
                    .filter(|_| preferences.auto_open_last_map)
                    .map(|recent| PathBuf::from(&recent.path))
            }),
        };

        let mut editor_state = EditorState::default();
        editor_state.show_grid = preferences.show_grid;
        editor_state.show_collisions = preferences.show_collisions;

        app.add_plugins(EguiPlugin::default())
            .add_plugins(EditorUiPlugin)
            .add_plugins(MapRenderPlugin)
            .add_plugins(EditorToolsPlugin)
            .insert_resource(editor_state)
            .insert_resource(preferences)
            .insert_resource(grid)
            .insert_resource(startup_files)
            .init_resource::<EditorTileset>()
            .init_resource::<MapDocument>()
            .add_systems(
                Startup,
                (
                    setup_editor_camera,
                    tileset::load_startup_tileset,
                    document::open_startup_map,
                )
                    .chain(),
            )
            .add_systems(Update, handle_keyboard_shortcuts)
            .add_systems(Update, handle_recent_maps);
    }
}

/// System to maintain the recent maps list and open entries picked from it
fn handle_recent_maps(
    mut editor_state: ResMut<EditorState>,
    mut preferences: ResMut<EditorPreferences>,
    mut document: ResMut<MapDocument>,
    tileset: Res<EditorTileset>,
) {
    if let Some(path) = editor_state.pending_add_recent_map.take() {
        preferences.add_recent_map(path);
        if let Err(e) = preferences.save() {
            bevy::log::error!("Failed to save preferences: {}", e);
        }
    }

    if let Some(path) = editor_state.pending_open_recent_map.take() {
        let Some(loaded_tileset) = tileset.tileset.as_ref() else {
            editor_state.error_message = Some("Load a tileset before opening a map".to_string());
            return;
        };
        match document.load(&path, loaded_tileset) {
            Ok(()) => {
                bevy::log::info!("Opened recent map {:?}", path);
                preferences.add_recent_map(path);
            }
            Err(e) => {
                editor_state.error_message = Some(format!("Failed to load map: {}", e));
                // Remove from recent if it can no longer be opened
                preferences.remove_recent_map(&path.to_string_lossy());
            }
        }
        if let Err(e) = preferences.save() {
            bevy::log::error!("Failed to save preferences: {}", e);
        }
    }

    if editor_state.pending_clear_recent_maps {
        editor_state.pending_clear_recent_maps = false;
        preferences.clear_recent_maps();
        if let Err(e) = preferences.save() {
            bevy::log::error!("Failed to save preferences: {}", e);
        }
    }
}

/// Spawns the editor camera if one doesn't exist
fn setup_editor_camera(mut commands: Commands, camera_query: Query<&Camera2d>) {
    if camera_query.is_empty() {
        commands.spawn(Camera2d);
    }
}

/// Global editor state
#[derive(Resource)]
pub struct EditorState {
    // Tools
    pub current_tool: EditorTool,
    pub show_grid: bool,
    pub show_collisions: bool,
    pub show_tileset_panel: bool,
    pub camera_offset: Vec2,

    // Tileset selection
    pub selector: TilesetSelector,
    /// Tiles the paint tool places; stays set after the selector press ends
    pub copied: Option<CopiedSelection>,

    // Dialogs
    pub error_message: Option<String>,
    pub pending_action: Option<PendingAction>,

    // Recent maps handling
    pub pending_add_recent_map: Option<PathBuf>,
    pub pending_open_recent_map: Option<PathBuf>,
    pub pending_clear_recent_maps: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            current_tool: EditorTool::Paint,
            show_grid: true,
            show_collisions: true,
            show_tileset_panel: true,
            // Put the canvas origin near the top-left of a 1280x720 window
            camera_offset: Vec2::new(640.0, -360.0),

            selector: TilesetSelector::new(),
            copied: None,

            error_message: None,
            pending_action: None,

            pending_add_recent_map: None,
            pending_open_recent_map: None,
            pending_clear_recent_maps: false,
        }
    }
}
