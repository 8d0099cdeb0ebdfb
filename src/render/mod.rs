//! Turning tiles, layers and sprites into [`DrawCommand`]s.
//!
//! [`DrawCommand`]: crate::DrawCommand

mod backend;
mod layer;
mod macroquad_backend;

pub use backend::{draw_tile, CommandLog, DrawBackend, RecordedCommand};
pub use layer::{LayerStats, MapRenderer};
pub use macroquad_backend::MacroquadBackend;
