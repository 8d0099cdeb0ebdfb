use crate::error::{Error, Result};
use crate::gid::Gid;
use macroquad::math::{vec2, Vec2};

/// Row-major grid of raw GIDs, `width * height` cells.
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub visible: bool,
    data: Vec<u32>,
}

impl Layer {
    pub fn new(name: impl Into<String>, width: usize, height: usize, data: Vec<u32>) -> Result<Self> {
        let name = name.into();
        // a grid too large to address can never match its data
        let expected = width.checked_mul(height).unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(Error::InvalidLayerSize {
                layer: name,
                expected,
                actual: data.len(),
            });
        }
        Ok(Layer {
            name,
            width,
            height,
            visible: true,
            data,
        })
    }

    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Cells in storage order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, Gid)> + '_ {
        self.data.iter().map(|&raw| Gid(raw)).enumerate()
    }

    /// Pixel position of cell `index` for the given tile size.
    #[inline]
    pub fn cell_position(&self, index: usize, tile_w: u32, tile_h: u32) -> Vec2 {
        let col = index % self.width;
        let row = index / self.width;
        vec2((col as u32 * tile_w) as f32, (row as u32 * tile_h) as f32)
    }
}
