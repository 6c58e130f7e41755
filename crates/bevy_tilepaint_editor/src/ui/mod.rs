//! Editor UI built with egui

mod dialogs;
mod menu_bar;
mod tileset;
mod toolbar;

pub use dialogs::*;
pub use menu_bar::*;
pub use tileset::*;
pub use toolbar::*;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::document::MapDocument;
use crate::preferences::EditorPreferences;
use crate::tileset::{register_tileset_texture, EditorTileset};
use crate::{EditorGrid, EditorState};

/// Main UI plugin
pub struct EditorUiPlugin;

impl Plugin for EditorUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                register_tileset_texture,
                process_edit_actions,
                sync_view_preferences,
            ),
        )
        .add_systems(EguiPrimaryContextPass, render_ui);
    }
}

/// Main UI rendering system
#[allow(clippy::too_many_arguments)]
fn render_ui(
    mut contexts: EguiContexts,
    mut editor_state: ResMut<EditorState>,
    mut document: ResMut<MapDocument>,
    mut tileset: ResMut<EditorTileset>,
    mut images: ResMut<Assets<Image>>,
    mut preferences: ResMut<EditorPreferences>,
    grid: Res<EditorGrid>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    render_menu_bar(ctx, &mut editor_state, &document, &preferences);
    render_toolbar(ctx, &mut editor_state);
    render_status_bar(ctx, &editor_state, &document);

    render_tileset_panel(ctx, &mut editor_state, &tileset, &grid.tileset);

    render_error_dialog(ctx, &mut editor_state);

    // Mutable access to the document marks it changed, so only take it
    // when an action is pending
    if editor_state.pending_action.is_some() {
        process_file_actions(
            &mut editor_state,
            &mut document,
            &mut tileset,
            &mut images,
            &mut preferences,
            &grid,
        );
    }
}

/// Bottom bar with map statistics
fn render_status_bar(ctx: &egui::Context, editor_state: &EditorState, document: &MapDocument) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(format!("Tool: {}", editor_state.current_tool.label()));
            ui.separator();
            ui.label(format!("Tiles: {}", document.live().tiles.len()));
            ui.separator();
            ui.label(format!("Collisions: {}", document.live().collisions.len()));
            ui.separator();
            ui.label(format!("Undo steps: {}", document.history().len() - 1));
        });
    });
}

/// Process edit actions (undo)
fn process_edit_actions(mut editor_state: ResMut<EditorState>, mut document: ResMut<MapDocument>) {
    if editor_state.pending_action != Some(PendingAction::Undo) {
        return;
    }
    editor_state.pending_action = None;

    if !document.undo() {
        debug!("Nothing to undo");
    }
}

/// Persist view toggles when they change
fn sync_view_preferences(
    editor_state: Res<EditorState>,
    mut preferences: ResMut<EditorPreferences>,
) {
    if !editor_state.is_changed() {
        return;
    }
    if preferences.show_grid == editor_state.show_grid
        && preferences.show_collisions == editor_state.show_collisions
    {
        return;
    }

    preferences.show_grid = editor_state.show_grid;
    preferences.show_collisions = editor_state.show_collisions;
    if let Err(e) = preferences.save() {
        error!("Failed to save preferences: {}", e);
    }
}
