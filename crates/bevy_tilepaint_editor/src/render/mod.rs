//! Map rendering for the editor viewport
//!
//! Placed tiles are sprites sampling the tileset texture at each tile's
//! source rectangle. The canvas uses image coordinates (Y down) while Bevy's
//! world is Y up, so canvas pixel `(x, y)` sits at world `(x, -y)`.

use bevy::prelude::*;
use bevy_tilepaint_core::{EditSnapshot, GridIndex, GridMapper, GridRect, PixelPoint};

use crate::document::MapDocument;
use crate::tileset::EditorTileset;
use crate::{EditorGrid, EditorState};

/// Grid drawn when the map is empty, in cells
const DEFAULT_GRID_EXTENT: GridIndex = GridIndex::new(40, 24);

/// Cells drawn on either side of the camera center, per axis
const GRID_HALF_SPAN: i32 = 128;

/// Plugin for map rendering
pub struct MapRenderPlugin;

impl Plugin for MapRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RenderState>()
            .add_systems(Update, sync_tile_rendering)
            .add_systems(Update, sync_collision_rendering)
            .add_systems(Update, sync_grid_rendering);
    }
}

/// Entities spawned for the current map and the view state they reflect
#[derive(Resource, Default)]
pub struct RenderState {
    pub tile_entities: Vec<Entity>,
    pub collision_entities: Vec<Entity>,
    pub grid_entities: Vec<Entity>,
    /// Last known show_collisions state
    pub last_collisions_visible: bool,
    /// Last known grid visibility state
    pub last_grid_visible: bool,
    /// Cells covered by the last drawn grid
    pub last_grid_rect: Option<GridRect>,
}

/// Marker component for placed tile sprites
#[derive(Component)]
pub struct MapTileSprite;

/// Marker component for collision overlays
#[derive(Component)]
pub struct CollisionOverlay;

/// Marker component for grid lines
#[derive(Component)]
pub struct GridLine;

/// Canvas pixel position of a world position
pub fn world_to_canvas(world: Vec2) -> PixelPoint {
    PixelPoint::new(world.x, -world.y)
}

/// World position of a canvas pixel position
pub fn canvas_to_world(point: PixelPoint) -> Vec2 {
    Vec2::new(point.x, -point.y)
}

/// World position of a cell's center
fn cell_center(mapper: &GridMapper, cell: GridIndex) -> Vec2 {
    canvas_to_world(mapper.to_pixel_rect(cell).center())
}

/// Cells the grid should cover: the default extent plus everything edited,
/// limited to [`GRID_HALF_SPAN`] cells around `focus`
///
/// `None` when none of those cells are near the focus.
pub fn grid_rect(snapshot: &EditSnapshot, focus: GridIndex) -> Option<GridRect> {
    let mut rect = GridRect {
        min: GridIndex::new(0, 0),
        max: DEFAULT_GRID_EXTENT - GridIndex::new(1, 1),
    };
    let edited = snapshot
        .tiles
        .iter()
        .map(|(cell, _)| *cell)
        .chain(snapshot.collisions.iter().copied());
    for cell in edited {
        rect.min = rect.min.min(cell);
        rect.max = rect.max.max(cell);
    }

    let near = GridRect {
        min: GridIndex::new(
            focus.x.saturating_sub(GRID_HALF_SPAN),
            focus.y.saturating_sub(GRID_HALF_SPAN),
        ),
        max: focus.saturating_add(GridIndex::new(GRID_HALF_SPAN, GRID_HALF_SPAN)),
    };
    let clamped = GridRect {
        min: rect.min.max(near.min),
        max: rect.max.min(near.max),
    };
    (clamped.min.x <= clamped.max.x && clamped.min.y <= clamped.max.y).then_some(clamped)
}

/// System to rebuild tile sprites when the document or tileset changes
fn sync_tile_rendering(
    mut commands: Commands,
    mut render_state: ResMut<RenderState>,
    document: Res<MapDocument>,
    tileset: Res<EditorTileset>,
    grid: Res<EditorGrid>,
) {
    if !document.is_changed() && !tileset.is_changed() {
        return;
    }

    for entity in render_state.tile_entities.drain(..) {
        let _ = commands.get_entity(entity).map(|mut e| e.despawn());
    }

    let Some(texture) = tileset.texture.clone() else {
        return;
    };

    let size = grid.canvas.scaled_cell_size();
    for (cell, content) in document.live().tiles.iter() {
        let Some(source) = grid.tileset.source_rect(content.origin()) else {
            continue;
        };
        let center = cell_center(&grid.canvas, *cell);
        let entity = commands
            .spawn((
                Sprite {
                    image: texture.clone(),
                    rect: Some(Rect::new(
                        source.x as f32,
                        source.y as f32,
                        (source.x + source.width) as f32,
                        (source.y + source.height) as f32,
                    )),
                    custom_size: Some(Vec2::splat(size)),
                    ..default()
                },
                Transform::from_xyz(center.x, center.y, 0.0),
                MapTileSprite,
            ))
            .id();
        render_state.tile_entities.push(entity);
    }
}

/// System to draw collision cells as translucent overlays
fn sync_collision_rendering(
    mut commands: Commands,
    mut render_state: ResMut<RenderState>,
    editor_state: Res<EditorState>,
    document: Res<MapDocument>,
    grid: Res<EditorGrid>,
) {
    let show_collisions = editor_state.show_collisions;
    let needs_update = show_collisions != render_state.last_collisions_visible
        || (show_collisions && document.is_changed());

    if !needs_update {
        return;
    }

    for entity in render_state.collision_entities.drain(..) {
        let _ = commands.get_entity(entity).map(|mut e| e.despawn());
    }
    render_state.last_collisions_visible = show_collisions;

    if !show_collisions {
        return;
    }

    let collision_color = Color::srgba(1.0, 0.1, 0.1, 0.35);
    let size = grid.canvas.scaled_cell_size();
    for cell in document.live().collisions.iter() {
        let center = cell_center(&grid.canvas, *cell);
        let entity = commands
            .spawn((
                Sprite {
                    color: collision_color,
                    custom_size: Some(Vec2::splat(size)),
                    ..default()
                },
                Transform::from_xyz(center.x, center.y, 50.0),
                CollisionOverlay,
            ))
            .id();
        render_state.collision_entities.push(entity);
    }
}

/// System to draw grid lines over the edited area
fn sync_grid_rendering(
    mut commands: Commands,
    mut render_state: ResMut<RenderState>,
    editor_state: Res<EditorState>,
    document: Res<MapDocument>,
    grid: Res<EditorGrid>,
) {
    let show_grid = editor_state.show_grid;
    let focus = grid
        .canvas
        .to_grid_index(world_to_canvas(editor_state.camera_offset));
    let rect = grid_rect(document.live(), focus);

    // Check if we need to update grid
    let needs_update = show_grid != render_state.last_grid_visible
        || (show_grid && rect != render_state.last_grid_rect);

    if !needs_update {
        return;
    }

    // Despawn existing grid
    for entity in render_state.grid_entities.drain(..) {
        let _ = commands.get_entity(entity).map(|mut e| e.despawn());
    }

    render_state.last_grid_visible = show_grid;
    render_state.last_grid_rect = rect;

    let Some(rect) = rect.filter(|_| show_grid) else {
        return;
    };

    let grid_color = Color::srgba(0.5, 0.5, 0.5, 0.5);
    let line_thickness = 1.0;
    let top_left = grid.canvas.to_pixel_rect(rect.min).origin;
    let last = grid.canvas.to_pixel_rect(rect.max);
    let bottom_right = PixelPoint::new(last.origin.x + last.size.x, last.origin.y + last.size.y);
    let grid_width = bottom_right.x - top_left.x;
    let grid_height = bottom_right.y - top_left.y;
    let center = canvas_to_world(PixelPoint::new(
        top_left.x + grid_width / 2.0,
        top_left.y + grid_height / 2.0,
    ));

    // Spawn vertical lines, one on the left edge of each column plus the right border
    let column_edges = (rect.min.x..=rect.max.x)
        .map(|x| grid.canvas.to_pixel_rect(GridIndex::new(x, 0)).origin.x)
        .chain(std::iter::once(bottom_right.x));
    for line_x in column_edges {
        let entity = commands
            .spawn((
                Sprite {
                    color: grid_color,
                    custom_size: Some(Vec2::new(line_thickness, grid_height)),
                    ..default()
                },
                Transform::from_xyz(line_x, center.y, 100.0),
                GridLine,
            ))
            .id();
        render_state.grid_entities.push(entity);
    }

    // Spawn horizontal lines
    let row_edges = (rect.min.y..=rect.max.y)
        .map(|y| grid.canvas.to_pixel_rect(GridIndex::new(0, y)).origin.y)
        .chain(std::iter::once(bottom_right.y));
    for canvas_y in row_edges {
        let line_y = -canvas_y;
        let entity = commands
            .spawn((
                Sprite {
                    color: grid_color,
                    custom_size: Some(Vec2::new(grid_width, line_thickness)),
                    ..default()
                },
                Transform::from_xyz(center.x, line_y, 100.0),
                GridLine,
            ))
            .id();
        render_state.grid_entities.push(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_world_flip() {
        let world = Vec2::new(40.0, -70.0);
        let canvas = world_to_canvas(world);
        assert_eq!(canvas, PixelPoint::new(40.0, 70.0));
        assert_eq!(canvas_to_world(canvas), world);
    }

    #[test]
    fn test_cell_center_in_world() {
        let mapper = GridMapper::new(16, 2.0).unwrap();
        assert_eq!(cell_center(&mapper, GridIndex::new(1, 2)), Vec2::new(48.0, -80.0));
    }

    #[test]
    fn test_grid_rect_grows_with_edits() {
        let origin = GridIndex::new(0, 0);
        let empty = EditSnapshot::empty();
        let rect = grid_rect(&empty, origin).unwrap();
        assert_eq!(rect.min, GridIndex::new(0, 0));
        assert_eq!(rect.max, GridIndex::new(39, 23));

        let edited = empty
            .with_collision_toggled(GridIndex::new(-3, 5))
            .with_collision_toggled(GridIndex::new(50, 2));
        let rect = grid_rect(&edited, origin).unwrap();
        assert_eq!(rect.min, GridIndex::new(-3, 0));
        assert_eq!(rect.max, GridIndex::new(50, 23));
    }

    #[test]
    fn test_grid_rect_limited_around_focus() {
        let far = EditSnapshot::empty()
            .with_collision_toggled(GridIndex::new(i32::MAX, 0))
            .with_collision_toggled(GridIndex::new(5_000_000, 10));

        let rect = grid_rect(&far, GridIndex::new(0, 0)).unwrap();
        assert_eq!(rect.min, GridIndex::new(0, 0));
        assert_eq!(rect.max, GridIndex::new(GRID_HALF_SPAN, 23));

        // Panning to the far edge draws the cells there without overflowing
        let rect = grid_rect(&far, GridIndex::new(i32::MAX, 0)).unwrap();
        assert_eq!(rect.max.x, i32::MAX);
        assert_eq!(rect.width(), GRID_HALF_SPAN as u32 + 1);

        // Nothing edited near the focus
        assert!(grid_rect(&EditSnapshot::empty(), GridIndex::new(-1000, -1000)).is_none());
    }
}
