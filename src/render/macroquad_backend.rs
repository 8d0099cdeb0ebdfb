use super::backend::DrawBackend;
use crate::catalog::TilesetCatalog;
use crate::command::DrawCommand;
use crate::error::{Error, Result};
use anyhow::Context;
use macroquad::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Draws commands with macroquad, one texture per tileset image.
pub struct MacroquadBackend {
    textures: HashMap<PathBuf, Texture2D>,
    filter: FilterMode,
    tint: Color,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self::new(FilterMode::Nearest)
    }
}

impl MacroquadBackend {
    pub fn new(filter: FilterMode) -> Self {
        MacroquadBackend {
            textures: HashMap::new(),
            filter,
            tint: WHITE,
        }
    }

    pub fn set_tint(&mut self, tint: Color) {
        self.tint = tint;
    }

    pub fn has_texture(&self, image: &Path) -> bool {
        self.textures.contains_key(image)
    }

    pub fn insert_texture(&mut self, image: impl Into<PathBuf>, tex: Texture2D) {
        tex.set_filter(self.filter);
        self.textures.insert(image.into(), tex);
    }

    /// Load the image of every registered tileset not loaded yet.
    pub async fn load_catalog(&mut self, catalog: &TilesetCatalog) -> anyhow::Result<()> {
        for ts in catalog.iter() {
            let image = &ts.image.source;
            if image.as_os_str().is_empty() || self.has_texture(image) {
                continue;
            }
            let path = image
                .to_str()
                .with_context(|| format!("Non UTF-8 image path {}", image.display()))?;
            let tex = load_texture(path).await.map_err(|e| {
                anyhow::anyhow!("Loading texture {} for tileset {}: {}", path, ts.name, e)
            })?;
            log::debug!("loaded texture {} ({}x{})", path, tex.width(), tex.height());
            self.insert_texture(image.clone(), tex);
        }
        Ok(())
    }
}

impl DrawBackend for MacroquadBackend {
    fn draw(&mut self, cmd: &DrawCommand<'_>) -> Result<()> {
        let tex = self
            .textures
            .get(cmd.image)
            .ok_or_else(|| Error::TextureNotLoaded {
                image: cmd.image.to_path_buf(),
            })?;

        let w = cmd.src.width() as f32;
        let h = cmd.src.height() as f32;
        let mut m = cmd.transform.matrix2;
        let mut origin = cmd.transform.translation;
        let mut flip_x = cmd.flip_h;

        // macroquad only knows rotation + size; fold a mirrored transform
        // into a flipped image drawn over [-w, 0] in local space
        if m.determinant() < 0.0 {
            m = m * Mat2::from_diagonal(vec2(-1.0, 1.0));
            origin += m * vec2(-w, 0.0);
            flip_x = !flip_x;
        }

        draw_texture_ex(
            tex,
            origin.x,
            origin.y,
            self.tint,
            DrawTextureParams {
                dest_size: Some(vec2(w * m.x_axis.length(), h * m.y_axis.length())),
                source: Some(cmd.src.to_rect()),
                rotation: m.x_axis.y.atan2(m.x_axis.x),
                flip_x,
                flip_y: cmd.flip_v,
                pivot: Some(origin),
            },
        );
        Ok(())
    }
}
