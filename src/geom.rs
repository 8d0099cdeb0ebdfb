use macroquad::math::Rect;

/// Integer pixel rectangle, `min` inclusive and `max` exclusive.
///
/// A rectangle with `max <= min` on either axis is empty. Empty rectangles are
/// the identity of [`TileRect::union`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl TileRect {
    pub const EMPTY: TileRect = TileRect {
        min_x: 0,
        min_y: 0,
        max_x: 0,
        max_y: 0,
    };

    #[inline]
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        TileRect {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Rectangle at `(x, y)` with the given size.
    #[inline]
    pub const fn from_origin_size(x: i32, y: i32, w: i32, h: i32) -> Self {
        TileRect::new(x, y, x + w, y + h)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    /// Smallest rectangle containing both.
    pub fn union(self, other: TileRect) -> TileRect {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        TileRect {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    #[inline]
    pub fn translate(self, dx: i32, dy: i32) -> TileRect {
        TileRect {
            min_x: self.min_x + dx,
            min_y: self.min_y + dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }

    /// Float rectangle for macroquad's `DrawTextureParams::source`.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            self.min_x as f32,
            self.min_y as f32,
            self.width() as f32,
            self.height() as f32,
        )
    }
}

impl FromIterator<TileRect> for TileRect {
    fn from_iter<I: IntoIterator<Item = TileRect>>(iter: I) -> Self {
        iter.into_iter().fold(TileRect::EMPTY, TileRect::union)
    }
}
