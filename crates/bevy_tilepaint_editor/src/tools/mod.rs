//! Editor tools - painting, erasing, collision marking, panning
//!
//! Handles viewport input on the map canvas. Paint and erase strokes are
//! previewed cell by cell while the button is held and committed to the
//! undo history once, on release.

use bevy::prelude::*;
use bevy_egui::EguiContexts;
use bevy_tilepaint_core::{CopiedSelection, EditSnapshot, GridIndex};

use crate::document::MapDocument;
use crate::render::world_to_canvas;
use crate::ui::EditorTool;
use crate::{EditorGrid, EditorState};

/// Plugin for editor tools and viewport input
pub struct EditorToolsPlugin;

impl Plugin for EditorToolsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewportInputState>()
            .add_systems(Update, (handle_viewport_input, update_camera).chain());
    }
}

/// State for viewport input handling
#[derive(Resource, Default)]
pub struct ViewportInputState {
    /// Whether we're currently panning
    pub is_panning: bool,
    /// Last cursor position for panning
    pub pan_start_pos: Option<Vec2>,
    /// A paint or erase stroke is in progress
    pub stroke_active: bool,
    /// Cell the stroke last touched
    pub last_cell: Option<GridIndex>,
}

/// Result of applying `tool` at `cell`, or `None` when the tool has nothing to do
pub fn apply_tool(
    tool: EditorTool,
    snapshot: &EditSnapshot,
    cell: GridIndex,
    copied: Option<&CopiedSelection>,
) -> Option<EditSnapshot> {
    match tool {
        EditorTool::Paint => {
            let selection = copied.filter(|s| !s.is_empty())?;
            Some(snapshot.with_paste(cell, selection))
        }
        EditorTool::Erase => snapshot
            .tiles
            .get(cell)
            .map(|_| snapshot.with_erased(cell)),
        EditorTool::Collision => Some(snapshot.with_collision_toggled(cell)),
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_viewport_input(
    mut contexts: EguiContexts,
    mut editor_state: ResMut<EditorState>,
    mut document: ResMut<MapDocument>,
    mut input_state: ResMut<ViewportInputState>,
    grid: Res<EditorGrid>,
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    // Finish the stroke even if the cursor left the window
    if input_state.stroke_active && !mouse_buttons.pressed(MouseButton::Left) {
        input_state.stroke_active = false;
        input_state.last_cell = None;
        if document.commit_live() {
            debug!("Committed stroke ({} undo steps)", document.history().len() - 1);
        }
    }

    let Some(window) = windows.iter().next() else {
        return;
    };
    let Some((camera, camera_transform)) = camera_q.iter().next() else {
        return;
    };

    let Some(cursor_position) = window.cursor_position() else {
        input_state.is_panning = false;
        return;
    };

    // Convert cursor position to world coordinates
    let Ok(world_pos) = camera.viewport_to_world_2d(camera_transform, cursor_position) else {
        return;
    };

    // Pointer over a panel or window: leave it to egui unless a stroke is running
    let egui_wants_pointer = ctx.is_pointer_over_area() || ctx.is_using_pointer();
    if egui_wants_pointer && !input_state.stroke_active && !input_state.is_panning {
        return;
    }

    // Handle panning (middle mouse or right mouse)
    if mouse_buttons.pressed(MouseButton::Middle) || mouse_buttons.pressed(MouseButton::Right) {
        if !input_state.is_panning {
            input_state.is_panning = true;
            input_state.pan_start_pos = Some(cursor_position);
        } else if let Some(start_pos) = input_state.pan_start_pos {
            let delta = cursor_position - start_pos;
            editor_state.camera_offset.x -= delta.x;
            editor_state.camera_offset.y += delta.y;
            input_state.pan_start_pos = Some(cursor_position);
        }
        return;
    }
    input_state.is_panning = false;
    input_state.pan_start_pos = None;

    let cell = grid.canvas.to_grid_index(world_to_canvas(world_pos));
    let tool = editor_state.current_tool;

    if mouse_buttons.just_pressed(MouseButton::Left) {
        let Some(next) = apply_tool(tool, document.live(), cell, editor_state.copied.as_ref())
        else {
            if tool == EditorTool::Paint {
                debug!("Nothing copied; select tiles in the tileset panel first");
            }
            // An erase stroke may start on an empty cell
            input_state.stroke_active = tool.paints_while_dragging();
            input_state.last_cell = Some(cell);
            return;
        };

        if tool.paints_while_dragging() {
            document.preview(next);
            input_state.stroke_active = true;
            input_state.last_cell = Some(cell);
        } else {
            document.commit(next);
        }
        return;
    }

    if input_state.stroke_active
        && mouse_buttons.pressed(MouseButton::Left)
        && input_state.last_cell != Some(cell)
    {
        input_state.last_cell = Some(cell);
        if let Some(next) = apply_tool(tool, document.live(), cell, editor_state.copied.as_ref())
        {
            if &next != document.live() {
                document.preview(next);
            }
        }
    }
}

/// Move the camera to the editor's pan offset
fn update_camera(
    editor_state: Res<EditorState>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    if !editor_state.is_changed() {
        return;
    }
    for mut transform in camera_query.iter_mut() {
        transform.translation.x = editor_state.camera_offset.x;
        transform.translation.y = editor_state.camera_offset.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_tilepaint_core::{GridRect, Tileset};
    use image::{Rgba, RgbaImage};

    fn selection() -> CopiedSelection {
        let image = RgbaImage::from_fn(32, 32, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let tileset = Tileset::new(image, 16).unwrap();
        let rect = GridRect::from_corners(GridIndex::new(0, 0), GridIndex::new(1, 0));
        CopiedSelection::from_rect(&tileset, rect).unwrap()
    }

    #[test]
    fn test_paint_pastes_selection() {
        let copied = selection();
        let next = apply_tool(
            EditorTool::Paint,
            &EditSnapshot::empty(),
            GridIndex::new(3, 3),
            Some(&copied),
        )
        .unwrap();

        assert_eq!(next.tiles.len(), 2);
        assert!(next.tiles.get(GridIndex::new(3, 3)).is_some());
        assert!(next.tiles.get(GridIndex::new(4, 3)).is_some());
    }

    #[test]
    fn test_paint_without_selection_does_nothing() {
        let snapshot = EditSnapshot::empty();
        assert!(apply_tool(EditorTool::Paint, &snapshot, GridIndex::new(0, 0), None).is_none());
        let empty = CopiedSelection::new();
        assert!(
            apply_tool(EditorTool::Paint, &snapshot, GridIndex::new(0, 0), Some(&empty)).is_none()
        );
    }

    #[test]
    fn test_erase_only_placed_cells() {
        let copied = selection();
        let painted = EditSnapshot::empty().with_paste(GridIndex::new(0, 0), &copied);

        assert!(apply_tool(EditorTool::Erase, &painted, GridIndex::new(5, 5), None).is_none());

        let erased = apply_tool(EditorTool::Erase, &painted, GridIndex::new(1, 0), None).unwrap();
        assert_eq!(erased.tiles.len(), 1);
        assert!(erased.tiles.get(GridIndex::new(1, 0)).is_none());
    }

    #[test]
    fn test_collision_toggles() {
        let cell = GridIndex::new(2, -1);
        let on = apply_tool(EditorTool::Collision, &EditSnapshot::empty(), cell, None).unwrap();
        assert!(on.collisions.contains(cell));

        let off = apply_tool(EditorTool::Collision, &on, cell, None).unwrap();
        assert!(off.collisions.is_empty());
    }

    #[test]
    fn test_stroke_commits_once() {
        let copied = selection();
        let mut document = MapDocument::new();

        // Press, then drag over two more cells
        for x in 0..3 {
            let next = apply_tool(
                EditorTool::Paint,
                document.live(),
                GridIndex::new(x * 2, 0),
                Some(&copied),
            )
            .unwrap();
            document.preview(next);
        }
        assert!(document.commit_live());

        assert_eq!(document.live().tiles.len(), 6);
        assert_eq!(document.history().len(), 2);
        assert!(document.undo());
        assert!(document.live().is_empty());
    }
}
