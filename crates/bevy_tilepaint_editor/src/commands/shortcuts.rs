//! Keyboard shortcut handling

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::ui::{EditorTool, PendingAction};
use crate::EditorState;

/// Handle keyboard shortcuts
pub fn handle_keyboard_shortcuts(
    mut contexts: EguiContexts,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut editor_state: ResMut<EditorState>,
) {
    // Leave keys to egui while a text field has focus
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_keyboard_input() {
            return;
        }
    }

    apply_shortcuts(&keyboard, &mut editor_state);
}

fn apply_shortcuts(keyboard: &ButtonInput<KeyCode>, editor_state: &mut EditorState) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    if ctrl {
        // Ctrl+Z - Undo
        if keyboard.just_pressed(KeyCode::KeyZ) {
            editor_state.pending_action = Some(PendingAction::Undo);
        }
        // Ctrl+S - Save, Ctrl+Shift+S - Save As
        if keyboard.just_pressed(KeyCode::KeyS) {
            editor_state.pending_action = Some(if shift {
                PendingAction::SaveAs
            } else {
                PendingAction::Save
            });
        }
        // Ctrl+O - Open
        if keyboard.just_pressed(KeyCode::KeyO) {
            editor_state.pending_action = Some(PendingAction::Open);
        }
        // Ctrl+N - New
        if keyboard.just_pressed(KeyCode::KeyN) {
            editor_state.pending_action = Some(PendingAction::New);
        }
        return;
    }

    // Tool selection
    if keyboard.just_pressed(KeyCode::KeyP) {
        editor_state.current_tool = EditorTool::Paint;
    }
    if keyboard.just_pressed(KeyCode::KeyE) {
        editor_state.current_tool = EditorTool::Erase;
    }
    if keyboard.just_pressed(KeyCode::KeyC) {
        editor_state.current_tool = EditorTool::Collision;
    }

    // G key - toggle grid
    if keyboard.just_pressed(KeyCode::KeyG) {
        editor_state.show_grid = !editor_state.show_grid;
    }
    // T key - toggle tileset panel
    if keyboard.just_pressed(KeyCode::KeyT) {
        editor_state.show_tileset_panel = !editor_state.show_tileset_panel;
    }
}
