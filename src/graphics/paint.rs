use anyhow::{Result, anyhow};
use image::{DynamicImage, ImageBuffer, Rgb};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::raster::{Bitmap, PixelMode};

const ASCII_RAMP: &[u8] = b" .:-=+*#%@";
const GRID_COLOR: Rgb<u8> = Rgb([0x40, 0x40, 0x40]);

/// Options controlling PNG generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRenderOptions {
    /// Cell edge in pixels; `None` uses the bitmap's own pixel size.
    pub scale: Option<u32>,
    /// Draw 1-px separators between cells.
    pub grid: bool,
}

/// Paint every cell of the bitmap as a filled square.
pub fn render_bitmap_image(bitmap: &Bitmap, options: &ImageRenderOptions) -> Result<DynamicImage> {
    let geometry = bitmap.geometry;
    if geometry.cells() == 0 {
        return Err(anyhow!("bitmap has no cells to render"));
    }
    let cell = options.scale.unwrap_or(geometry.pixel_size).max(1);
    let width_px = u32::try_from(geometry.width)?
        .checked_mul(cell)
        .ok_or_else(|| anyhow!("image width overflows"))?;
    let height_px = u32::try_from(geometry.height)?
        .checked_mul(cell)
        .ok_or_else(|| anyhow!("image height overflows"))?;

    let background = Rgb(bitmap.mode.background());
    let mut img = ImageBuffer::from_pixel(width_px, height_px, background);

    for (y, row) in bitmap.rows().enumerate() {
        for (x, color) in row.iter().enumerate() {
            let rect = Rect::at(x as i32 * cell as i32, y as i32 * cell as i32).of_size(cell, cell);
            draw_filled_rect_mut(&mut img, rect, Rgb(*color));
        }
    }

    if options.grid && cell > 2 {
        for col in 1..geometry.width {
            let x = (col as u32 * cell) as f32;
            draw_line_segment_mut(&mut img, (x, 0.0), (x, height_px as f32), GRID_COLOR);
        }
        for row in 1..geometry.height {
            let y = (row as u32 * cell) as f32;
            draw_line_segment_mut(&mut img, (0.0, y), (width_px as f32, y), GRID_COLOR);
        }
    }

    Ok(DynamicImage::ImageRgb8(img))
}

/// Terminal preview: one character per cell, one line per row.
pub fn render_bitmap_ascii(bitmap: &Bitmap) -> String {
    let mut out = String::new();
    let background = bitmap.mode.background();
    for row in bitmap.rows() {
        for color in row {
            let ch = match bitmap.mode {
                PixelMode::Bw | PixelMode::Rainbow => {
                    if *color == background { '.' } else { '#' }
                }
                PixelMode::Greyscale | PixelMode::Rgb => ramp(luminance(*color)),
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

fn luminance([r, g, b]: [u8; 3]) -> u8 {
    let y = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    y.round().clamp(0.0, 255.0) as u8
}

fn ramp(level: u8) -> char {
    let idx = level as usize * (ASCII_RAMP.len() - 1) / 255;
    ASCII_RAMP[idx] as char
}
