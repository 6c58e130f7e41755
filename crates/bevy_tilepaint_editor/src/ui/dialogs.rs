//! Dialog windows for the editor

use bevy::prelude::*;
use bevy_egui::egui;

use crate::document::MapDocument;
use crate::preferences::EditorPreferences;
use crate::tileset::EditorTileset;
use crate::{EditorGrid, EditorState};

/// Actions that can be triggered from menus
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    New,
    Open,
    Save,
    SaveAs,
    OpenTileset,
    Undo,
}

/// Process pending file actions
pub fn process_file_actions(
    editor_state: &mut EditorState,
    document: &mut MapDocument,
    tileset: &mut EditorTileset,
    images: &mut Assets<Image>,
    preferences: &mut EditorPreferences,
    grid: &EditorGrid,
) {
    // Handle pending file actions
    let Some(action) = editor_state.pending_action.take() else {
        return;
    };
    match action {
        PendingAction::New => {
            document.clear();
            info!("Started a new map");
        }
        PendingAction::Open => {
            let Some(loaded_tileset) = tileset.tileset.as_ref() else {
                editor_state.error_message =
                    Some("Load a tileset before opening a map".to_string());
                return;
            };
            #[cfg(feature = "native")]
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Tile Map", &["json"])
                    .pick_file()
                {
                    match document.load(&path, loaded_tileset) {
                        Ok(()) => {
                            info!("Opened map {:?}", path);
                            editor_state.pending_add_recent_map = Some(path);
                        }
                        Err(e) => {
                            error!("Failed to load map {:?}: {}", path, e);
                            editor_state.error_message =
                                Some(format!("Failed to load map: {}", e));
                        }
                    }
                }
            }
            #[cfg(not(feature = "native"))]
            {
                let _ = loaded_tileset;
                warn!("Opening maps needs the native feature");
            }
        }
        PendingAction::Save => {
            if document.path.is_some() {
                match document.save_current() {
                    Ok(()) => info!("Saved map {:?}", document.path),
                    Err(e) => {
                        error!("Failed to save map: {}", e);
                        editor_state.error_message = Some(format!("Failed to save: {}", e));
                    }
                }
            } else {
                // No path set, trigger Save As
                editor_state.pending_action = Some(PendingAction::SaveAs);
            }
        }
        PendingAction::SaveAs => {
            #[cfg(feature = "native")]
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Tile Map", &["json"])
                    .set_file_name(format!("{}.json", document.name()))
                    .save_file()
                {
                    match document.save(&path) {
                        Ok(()) => {
                            info!("Saved map {:?}", path);
                            editor_state.pending_add_recent_map = Some(path);
                        }
                        Err(e) => {
                            error!("Failed to save map {:?}: {}", path, e);
                            editor_state.error_message = Some(format!("Failed to save: {}", e));
                        }
                    }
                }
            }
            #[cfg(not(feature = "native"))]
            warn!("Saving maps needs the native feature");
        }
        PendingAction::OpenTileset => {
            #[cfg(feature = "native")]
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Image Files", &["png", "jpg", "jpeg", "bmp", "gif", "tga"])
                    .set_title("Select Tileset Image")
                    .pick_file()
                {
                    open_tileset(&path, editor_state, document, tileset, images, preferences, grid);
                }
            }
            #[cfg(not(feature = "native"))]
            {
                let _ = (tileset, images, preferences, grid);
                warn!("Opening tilesets needs the native feature");
            }
        }
        // Edit actions are handled by process_edit_actions
        PendingAction::Undo => {
            editor_state.pending_action = Some(action);
        }
    }
}

/// Switch to another tileset and start a new map on it.
///
/// Placed tiles refer to cells of the old image, so the document is cleared.
#[cfg_attr(not(feature = "native"), allow(dead_code))]
fn open_tileset(
    path: &std::path::Path,
    editor_state: &mut EditorState,
    document: &mut MapDocument,
    tileset: &mut EditorTileset,
    images: &mut Assets<Image>,
    preferences: &mut EditorPreferences,
    grid: &EditorGrid,
) {
    if let Err(e) = tileset.load(path, grid.tileset.cell_size(), images) {
        error!("Failed to load tileset {:?}: {}", path, e);
        editor_state.error_message = Some(format!("Failed to load tileset: {}", e));
        return;
    }
    info!("Switched tileset to {:?}", path);

    document.clear();
    editor_state.selector = editor_state.selector.on_press_end();
    editor_state.copied = None;

    preferences.tileset_path = Some(path.to_string_lossy().to_string());
    if let Err(e) = preferences.save() {
        error!("Failed to save preferences: {}", e);
    }
}

pub fn render_error_dialog(ctx: &egui::Context, editor_state: &mut EditorState) {
    let Some(error_msg) = editor_state.error_message.clone() else {
        return;
    };

    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(&error_msg);
            ui.separator();
            if ui.button("OK").clicked() {
                editor_state.error_message = None;
            }
        });
}
