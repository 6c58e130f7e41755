//! Tileset panel: shows the tileset image and turns pointer gestures into
//! selector transitions

use bevy::log::debug;
use bevy_egui::egui;
use bevy_tilepaint_core::{GridMapper, GridRect, PixelPoint, Tileset};

use crate::tileset::EditorTileset;
use crate::EditorState;

/// Outline color of the selected tileset region
const SELECTION_COLOR: egui::Color32 = egui::Color32::RED;

/// Render the tileset window
pub fn render_tileset_panel(
    ctx: &egui::Context,
    editor_state: &mut EditorState,
    tileset: &EditorTileset,
    mapper: &GridMapper,
) {
    if !editor_state.show_tileset_panel {
        return;
    }

    let mut open = editor_state.show_tileset_panel;
    egui::Window::new("Tileset")
        .open(&mut open)
        .default_pos(egui::pos2(16.0, 80.0))
        .default_size(egui::vec2(320.0, 400.0))
        .resizable(true)
        .show(ctx, |ui| {
            let (Some(loaded), Some(texture_id)) = (tileset.tileset.as_ref(), tileset.egui_texture)
            else {
                ui.label("No tileset loaded");
                ui.label("Use File > Open Tileset...");
                return;
            };

            ui.label(format!(
                "{}x{} cells of {}px",
                loaded.columns(),
                loaded.rows(),
                loaded.cell_size()
            ));
            ui.separator();

            egui::ScrollArea::both().show(ui, |ui| {
                render_tileset_image(ui, editor_state, loaded, texture_id, mapper);
            });
        });
    editor_state.show_tileset_panel = open;
}

fn render_tileset_image(
    ui: &mut egui::Ui,
    editor_state: &mut EditorState,
    tileset: &Tileset,
    texture_id: egui::TextureId,
    mapper: &GridMapper,
) {
    let size = egui::vec2(tileset.width() as f32, tileset.height() as f32);
    let response = ui.add(
        egui::Image::new(egui::load::SizedTexture::new(texture_id, size))
            .sense(egui::Sense::click_and_drag()),
    );

    let (primary_pressed, primary_released) =
        ui.input(|i| (i.pointer.primary_pressed(), i.pointer.primary_released()));

    if primary_pressed && response.hovered() {
        if let Some(pos) = response.interact_pointer_pos().or(response.hover_pos()) {
            let point = image_point(pos, response.rect);
            match editor_state.selector.on_press_start(point, mapper, tileset) {
                Ok((selector, selection)) => {
                    editor_state.selector = selector;
                    editor_state.copied = Some(selection);
                }
                Err(e) => {
                    editor_state.error_message = Some(format!("Cannot copy tile: {}", e));
                }
            }
        }
    } else if editor_state.selector.is_dragging() && response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            let point = image_point(pos, response.rect);
            // Past the last whole cell the previous selection stays
            match editor_state.selector.on_drag_to(point, mapper, tileset) {
                Ok((selector, Some(selection))) => {
                    editor_state.selector = selector;
                    editor_state.copied = Some(selection);
                }
                Ok((selector, None)) => editor_state.selector = selector,
                Err(e) => debug!("Tileset drag ignored: {}", e),
            }
        }
    }

    if editor_state.selector.is_dragging()
        && (response.drag_stopped() || response.clicked() || primary_released)
    {
        editor_state.selector = editor_state.selector.on_press_end();
    }

    let outline = editor_state
        .selector
        .selected_rect()
        .or_else(|| editor_state.copied.as_ref().and_then(|c| c.bounds()));
    if let Some(rect) = outline {
        ui.painter().rect_stroke(
            outline_rect(rect, mapper, response.rect),
            0.0,
            egui::Stroke::new(2.0, SELECTION_COLOR),
            egui::StrokeKind::Inside,
        );
    }

    if let Some(pos) = response.hover_pos() {
        let cell = mapper.to_grid_index(image_point(pos, response.rect));
        response.on_hover_text(format!("({}, {})", cell.x, cell.y));
    }
}

/// Pointer position relative to the image's top-left corner, clamped inside it
fn image_point(pos: egui::Pos2, image_rect: egui::Rect) -> PixelPoint {
    let local = pos - image_rect.min;
    PixelPoint::new(
        local.x.clamp(0.0, (image_rect.width() - 1.0).max(0.0)),
        local.y.clamp(0.0, (image_rect.height() - 1.0).max(0.0)),
    )
}

/// Screen rectangle covering a range of tileset cells
fn outline_rect(rect: GridRect, mapper: &GridMapper, image_rect: egui::Rect) -> egui::Rect {
    let min = mapper.to_pixel_rect(rect.min).origin;
    let max_cell = mapper.to_pixel_rect(rect.max);
    let max = PixelPoint::new(
        max_cell.origin.x + max_cell.size.x,
        max_cell.origin.y + max_cell.size.y,
    );
    egui::Rect::from_min_max(
        image_rect.min + egui::vec2(min.x, min.y),
        image_rect.min + egui::vec2(max.x, max.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_tilepaint_core::GridIndex;

    #[test]
    fn test_image_point_is_local_and_clamped() {
        let image_rect = egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(64.0, 32.0));

        let inside = image_point(egui::pos2(120.0, 60.0), image_rect);
        assert_eq!(inside, PixelPoint::new(20.0, 10.0));

        let outside = image_point(egui::pos2(400.0, 0.0), image_rect);
        assert_eq!(outside, PixelPoint::new(63.0, 0.0));
    }

    #[test]
    fn test_outline_covers_whole_cells() {
        let mapper = GridMapper::new(16, 1.0).unwrap();
        let image_rect = egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(64.0, 64.0));
        let rect = GridRect::from_corners(GridIndex::new(1, 0), GridIndex::new(2, 1));

        let outline = outline_rect(rect, &mapper, image_rect);
        assert_eq!(outline.min, egui::pos2(26.0, 10.0));
        assert_eq!(outline.max, egui::pos2(58.0, 42.0));
    }
}
