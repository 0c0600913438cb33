//! Rendering helpers for producing PNG and terminal output of bitmaps.

mod paint;

pub use paint::{ImageRenderOptions, render_bitmap_ascii, render_bitmap_image};
