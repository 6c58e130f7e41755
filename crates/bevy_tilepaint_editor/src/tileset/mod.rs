//! The tileset image shared by the tileset panel and the map renderer

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiTextureHandle};
use bevy_tilepaint_core::{MapError, Tileset};
use image::DynamicImage;
use std::path::{Path, PathBuf};

use crate::preferences::EditorPreferences;
use crate::{EditorGrid, EditorState, StartupFiles};

/// The decoded tileset plus its GPU and egui textures
#[derive(Resource, Default)]
pub struct EditorTileset {
    pub tileset: Option<Tileset>,
    pub path: Option<PathBuf>,
    /// Texture sampled by tile sprites
    pub texture: Option<Handle<Image>>,
    /// Same texture registered with egui, once `register_tileset_texture` ran
    pub egui_texture: Option<egui::TextureId>,
}

impl EditorTileset {
    /// Decode `path` and upload it as a texture.
    ///
    /// On failure the current tileset is kept.
    pub fn load(
        &mut self,
        path: &Path,
        cell_size: u32,
        images: &mut Assets<Image>,
    ) -> Result<(), MapError> {
        let tileset = Tileset::open(path, cell_size)?;

        let image = Image::from_dynamic(
            DynamicImage::ImageRgba8(tileset.image().clone()),
            true,
            RenderAssetUsages::default(),
        );

        self.texture = Some(images.add(image));
        self.egui_texture = None;
        self.tileset = Some(tileset);
        self.path = Some(path.to_path_buf());
        Ok(())
    }
}

/// Startup system loading the configured tileset
pub fn load_startup_tileset(
    startup_files: Res<StartupFiles>,
    grid: Res<EditorGrid>,
    mut tileset: ResMut<EditorTileset>,
    mut images: ResMut<Assets<Image>>,
    mut editor_state: ResMut<EditorState>,
    mut preferences: ResMut<EditorPreferences>,
) {
    let Some(path) = startup_files.tileset_path.as_ref() else {
        info!("No tileset configured; pass one on the command line");
        return;
    };

    match tileset.load(path, grid.tileset.cell_size(), &mut images) {
        Ok(()) => {
            if let Some(loaded) = tileset.tileset.as_ref() {
                info!(
                    "Loaded tileset {:?}: {}x{} px, {}x{} cells",
                    path,
                    loaded.width(),
                    loaded.height(),
                    loaded.columns(),
                    loaded.rows()
                );
            }

            // Remember a tileset given on the command line for next time
            let path_str = path.to_string_lossy().to_string();
            if preferences.tileset_path.as_deref() != Some(path_str.as_str()) {
                preferences.tileset_path = Some(path_str);
                if let Err(e) = preferences.save() {
                    error!("Failed to save preferences: {}", e);
                }
            }
        }
        Err(e) => {
            error!("Failed to load tileset {:?}: {}", path, e);
            editor_state.error_message = Some(format!("Failed to load tileset: {}", e));
        }
    }
}

/// System to register the tileset texture with egui once it exists
pub fn register_tileset_texture(mut contexts: EguiContexts, mut tileset: ResMut<EditorTileset>) {
    if tileset.egui_texture.is_some() {
        return;
    }
    let Some(handle) = tileset.texture.clone() else {
        return;
    };
    let texture_id = contexts.add_image(EguiTextureHandle::Strong(handle));
    tileset.egui_texture = Some(texture_id);
}
