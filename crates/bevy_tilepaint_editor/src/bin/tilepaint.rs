//! Standalone tile map editor binary
//!
//! Run with: tilepaint [TILESET_IMAGE] [MAP_JSON] [--cell-size N] [--display-scale S]
//!
//! All arguments are optional. Without a tileset the one used last time is
//! opened; without a map the editor starts on an empty one.

use bevy::image::{ImageFilterMode, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_tilepaint_editor::EditorPlugin;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Tileset image to copy tiles from
    tileset: Option<PathBuf>,

    /// Map file to open
    map: Option<PathBuf>,

    /// Cell size in tileset pixels, overrides the saved preference
    #[clap(long)]
    cell_size: Option<u32>,

    /// Canvas magnification, overrides the saved preference
    #[clap(long)]
    display_scale: Option<f32>,
}

impl Args {
    fn into_plugin(self) -> EditorPlugin {
        let mut editor = EditorPlugin::new();
        if let Some(tileset) = self.tileset {
            editor = editor.with_tileset_path(tileset);
        }
        if let Some(map) = self.map {
            editor = editor.with_map_path(map);
        }
        if let Some(cell_size) = self.cell_size {
            editor = editor.with_cell_size(cell_size);
        }
        if let Some(scale) = self.display_scale {
            editor = editor.with_display_scale(scale);
        }
        editor
    }
}

fn main() {
    let editor = Args::parse().into_plugin();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Tilepaint".to_string(),
                        resolution: WindowResolution::new(1280, 720),
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin {
                    // Nearest sampling keeps pixel art tiles crisp when scaled
                    default_sampler: ImageSamplerDescriptor {
                        mag_filter: ImageFilterMode::Nearest,
                        min_filter: ImageFilterMode::Nearest,
                        mipmap_filter: ImageFilterMode::Nearest,
                        ..default()
                    },
                }),
        )
        .add_plugins(editor)
        .run();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_and_overrides() {
        let args = Args::try_parse_from([
            "tilepaint",
            "tiles.png",
            "level.json",
            "--cell-size",
            "16",
            "--display-scale",
            "2",
        ])
        .unwrap();
        let editor = args.into_plugin();

        assert_eq!(editor.tileset_path, Some(PathBuf::from("tiles.png")));
        assert_eq!(editor.map_path, Some(PathBuf::from("level.json")));
        assert_eq!(editor.cell_size, Some(16));
        assert_eq!(editor.display_scale, Some(2.0));
    }

    #[test]
    fn test_no_arguments() {
        let editor = Args::try_parse_from(["tilepaint"]).unwrap().into_plugin();
        assert!(editor.tileset_path.is_none());
        assert!(editor.map_path.is_none());
        assert!(editor.cell_size.is_none());
    }

    #[test]
    fn test_rejects_unknown_arguments() {
        assert!(Args::try_parse_from(["tilepaint", "a.png", "b.json", "extra"]).is_err());
        assert!(Args::try_parse_from(["tilepaint", "--cell-size", "big"]).is_err());
        // Help is handled by the parser, not taken as a tileset path
        assert!(Args::try_parse_from(["tilepaint", "--help"]).is_err());
    }
}
