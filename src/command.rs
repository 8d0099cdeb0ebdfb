use crate::geom::TileRect;
use macroquad::math::{vec2, Affine2, Vec2};
use std::path::Path;

/// One tile region to render: which image, which pixels, which flips, where.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand<'a> {
    pub image: &'a Path,
    pub src: TileRect,
    pub flip_h: bool,
    pub flip_v: bool,
    /// Placement of the region's top-left corner and axes.
    pub transform: Affine2,
}

/// Caller-side placement and default flips for a draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawOptions {
    pub transform: Affine2,
    pub flip_h: bool,
    pub flip_v: bool,
}

/// Horizontal/vertical flip pair carried by animation defaults and parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flip {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        DrawOptions {
            transform: Affine2::IDENTITY,
            flip_h: false,
            flip_v: false,
        }
    }
}

impl DrawOptions {
    pub fn at(x: f32, y: f32) -> Self {
        DrawOptions {
            transform: Affine2::from_translation(vec2(x, y)),
            ..Default::default()
        }
    }

    pub fn with_transform(transform: Affine2) -> Self {
        DrawOptions {
            transform,
            ..Default::default()
        }
    }

    /// Same options moved by `offset` in local space.
    pub fn translated(&self, offset: Vec2) -> Self {
        DrawOptions {
            transform: self.transform * Affine2::from_translation(offset),
            ..*self
        }
    }

    /// `flip`, when present, replaces the caller's flips.
    pub fn with_flip(&self, flip: Option<Flip>) -> Self {
        match flip {
            Some(f) => DrawOptions {
                flip_h: f.horizontal,
                flip_v: f.vertical,
                ..*self
            },
            None => *self,
        }
    }
}
