//! Toolbar UI for tool selection

use crate::EditorState;
use bevy_egui::egui;

/// Available editor tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorTool {
    /// Paste the copied selection
    #[default]
    Paint,
    /// Remove placed tiles
    Erase,
    /// Toggle collision cells
    Collision,
}

impl EditorTool {
    pub const ALL: [EditorTool; 3] = [EditorTool::Paint, EditorTool::Erase, EditorTool::Collision];

    /// Returns true if dragging keeps applying the tool to new cells
    pub fn paints_while_dragging(&self) -> bool {
        matches!(self, EditorTool::Paint | EditorTool::Erase)
    }

    pub fn label(&self) -> &'static str {
        match self {
            EditorTool::Paint => "Paint",
            EditorTool::Erase => "Erase",
            EditorTool::Collision => "Collision",
        }
    }

    pub fn shortcut(&self) -> &'static str {
        match self {
            EditorTool::Paint => "P",
            EditorTool::Erase => "E",
            EditorTool::Collision => "C",
        }
    }
}

/// Render the toolbar
pub fn render_toolbar(ctx: &egui::Context, editor_state: &mut EditorState) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label("Tools:");

            for tool in EditorTool::ALL {
                if ui
                    .selectable_label(editor_state.current_tool == tool, tool.label())
                    .on_hover_text(format!("{} ({})", tool.label(), tool.shortcut()))
                    .clicked()
                {
                    editor_state.current_tool = tool;
                }
            }

            ui.separator();

            ui.checkbox(&mut editor_state.show_grid, "Grid");
            ui.checkbox(&mut editor_state.show_collisions, "Collisions");

            ui.separator();

            match editor_state.copied.as_ref().and_then(|c| c.bounds()) {
                Some(bounds) => ui.label(format!(
                    "Copied: {}x{} from ({}, {})",
                    bounds.width(),
                    bounds.height(),
                    bounds.min.x,
                    bounds.min.y
                )),
                None => ui.label("Copied: (none)"),
            };

            ui.separator();
            if ui.button("Tileset").clicked() {
                editor_state.show_tileset_panel = !editor_state.show_tileset_panel;
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_behavior() {
        assert!(EditorTool::Paint.paints_while_dragging());
        assert!(EditorTool::Erase.paints_while_dragging());
        assert!(!EditorTool::Collision.paints_while_dragging());
        assert_eq!(EditorTool::default(), EditorTool::Paint);
    }
}
