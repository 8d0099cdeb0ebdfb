use crate::error::Result;
use crate::geom::TileRect;
use std::cell::RefCell;
use std::collections::HashMap;

/// Aggregated collider rectangles, computed once per collider name.
///
/// Interior mutability keeps lookups on `&self`; the cache is neither `Sync`
/// nor meant to be shared between viewers.
#[derive(Debug, Default)]
pub struct ColliderCache {
    rects: RefCell<HashMap<String, TileRect>>,
}

impl ColliderCache {
    pub fn get_or_compute(
        &self,
        collider: &str,
        compute: impl FnOnce() -> Result<TileRect>,
    ) -> Result<TileRect> {
        let cached = self.rects.borrow().get(collider).copied();
        if let Some(rect) = cached {
            return Ok(rect);
        }
        let rect = compute()?;
        self.rects.borrow_mut().insert(collider.to_owned(), rect);
        Ok(rect)
    }

    pub fn is_cached(&self, collider: &str) -> bool {
        self.rects.borrow().contains_key(collider)
    }

    pub fn clear(&mut self) {
        self.rects.get_mut().clear();
    }
}
