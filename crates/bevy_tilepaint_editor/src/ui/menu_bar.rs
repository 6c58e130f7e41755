//! Menu bar UI

use bevy_egui::egui;
use std::path::PathBuf;

use crate::document::MapDocument;
use crate::preferences::EditorPreferences;
use crate::EditorState;

use super::{EditorTool, PendingAction};

/// Render the menu bar
pub fn render_menu_bar(
    ctx: &egui::Context,
    editor_state: &mut EditorState,
    document: &MapDocument,
    preferences: &EditorPreferences,
) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            // File menu
            ui.menu_button("File", |ui| {
                if ui.button("New Map").clicked() {
                    editor_state.pending_action = Some(PendingAction::New);
                    ui.close();
                }
                if ui.button("Open Map...").clicked() {
                    editor_state.pending_action = Some(PendingAction::Open);
                    ui.close();
                }

                // Open Recent submenu
                ui.menu_button("Open Recent", |ui| {
                    if preferences.recent_maps.is_empty() {
                        ui.label("(No recent maps)");
                    } else {
                        for recent in &preferences.recent_maps {
                            if ui
                                .button(&recent.name)
                                .on_hover_text(&recent.path)
                                .clicked()
                            {
                                editor_state.pending_open_recent_map =
                                    Some(PathBuf::from(&recent.path));
                                ui.close();
                            }
                        }
                        ui.separator();
                        if ui.button("Clear Recent Maps").clicked() {
                            editor_state.pending_clear_recent_maps = true;
                            ui.close();
                        }
                    }
                });

                ui.separator();
                if ui.button("Save").clicked() {
                    editor_state.pending_action = Some(PendingAction::Save);
                    ui.close();
                }
                if ui.button("Save As...").clicked() {
                    editor_state.pending_action = Some(PendingAction::SaveAs);
                    ui.close();
                }
                ui.separator();
                if ui.button("Open Tileset...").clicked() {
                    editor_state.pending_action = Some(PendingAction::OpenTileset);
                    ui.close();
                }
            });

            // Edit menu
            ui.menu_button("Edit", |ui| {
                if ui
                    .add_enabled(document.can_undo(), egui::Button::new("Undo"))
                    .clicked()
                {
                    editor_state.pending_action = Some(PendingAction::Undo);
                    ui.close();
                }
            });

            // View menu
            ui.menu_button("View", |ui| {
                if ui
                    .checkbox(&mut editor_state.show_tileset_panel, "Tileset")
                    .clicked()
                {
                    ui.close();
                }
                ui.separator();
                if ui
                    .checkbox(&mut editor_state.show_grid, "Show Grid")
                    .clicked()
                {
                    ui.close();
                }
                if ui
                    .checkbox(&mut editor_state.show_collisions, "Show Collisions")
                    .clicked()
                {
                    ui.close();
                }
            });

            // Tool menu
            ui.menu_button("Tool", |ui| {
                for tool in EditorTool::ALL {
                    if ui
                        .radio(editor_state.current_tool == tool, tool.label())
                        .clicked()
                    {
                        editor_state.current_tool = tool;
                        ui.close();
                    }
                }
            });

            // Document status on the right
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let dirty_indicator = if document.dirty { " *" } else { "" };
                ui.label(format!("{}{}", document.name(), dirty_indicator));
            });
        });
    });
}
