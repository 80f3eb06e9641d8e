//! Painter's-algorithm software rasterizer
//!
//! Features:
//! - Perspective projection onto a configurable near plane
//! - Back-to-front polygon ordering (no Z-buffer)
//! - Scanline polygon fill with integer crossing dedup
//! - Flat normal-dot-light shading

mod math;
mod types;
mod render;

pub use math::*;
pub use types::*;
pub use render::*;
