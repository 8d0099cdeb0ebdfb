use crate::command::{DrawCommand, DrawOptions};
use crate::error::Result;
use crate::geom::TileRect;
use crate::tileset::Tileset;
use macroquad::math::{Affine2, Vec2};
use std::path::PathBuf;

/// Renders tile regions. The core decides what to draw; a backend only blits.
pub trait DrawBackend {
    fn draw(&mut self, cmd: &DrawCommand<'_>) -> Result<()>;
}

impl<F> DrawBackend for F
where
    F: FnMut(&DrawCommand<'_>) -> Result<()>,
{
    fn draw(&mut self, cmd: &DrawCommand<'_>) -> Result<()> {
        self(cmd)
    }
}

/// Emit the region of `local_id` with the options' flips and placement.
pub fn draw_tile(
    backend: &mut dyn DrawBackend,
    tileset: &Tileset,
    local_id: u32,
    opts: &DrawOptions,
) -> Result<()> {
    let src = tileset.tile_rect(local_id)?;
    backend.draw(&DrawCommand {
        image: &tileset.image.source,
        src,
        flip_h: opts.flip_h,
        flip_v: opts.flip_v,
        transform: opts.transform,
    })
}

/// Owned copy of a [`DrawCommand`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCommand {
    pub image: PathBuf,
    pub src: TileRect,
    pub flip_h: bool,
    pub flip_v: bool,
    pub transform: Affine2,
}

impl RecordedCommand {
    /// Where the region's top-left corner lands.
    pub fn position(&self) -> Vec2 {
        self.transform.translation
    }
}

/// Backend that records commands instead of drawing them; headless runs and tests.
#[derive(Debug, Default)]
pub struct CommandLog {
    pub commands: Vec<RecordedCommand>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl DrawBackend for CommandLog {
    fn draw(&mut self, cmd: &DrawCommand<'_>) -> Result<()> {
        self.commands.push(RecordedCommand {
            image: cmd.image.to_path_buf(),
            src: cmd.src,
            flip_h: cmd.flip_h,
            flip_v: cmd.flip_v,
            transform: cmd.transform,
        });
        Ok(())
    }
}
