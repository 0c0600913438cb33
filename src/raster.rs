//! Packing a bit string into a square-ish grid of RGB cells.

use std::fmt;

use log::debug;
use serde::Serialize;

use crate::godel::BinaryDigits;

/// Canvas edge used to derive the per-cell display size.
pub const DEFAULT_MAX_CANVAS: u32 = 400;
/// Upper bound on the per-cell display size.
pub const DEFAULT_MAX_PIXEL_SIZE: u32 = 20;

pub type Rgb = [u8; 3];

pub const WHITE: Rgb = [255, 255, 255];
pub const BLACK: Rgb = [0, 0, 0];
/// Colour of unset bits and padding cells in rainbow mode.
pub const RAINBOW_BACKGROUND: Rgb = [17, 17, 17];

/// How bits are consumed per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelMode {
    /// One bit per cell, white for 1 and black for 0.
    Bw,
    /// Eight bits per cell, replicated across all channels.
    Greyscale,
    /// Twenty-four bits per cell, one byte per channel.
    Rgb,
    /// One bit per cell, set bits coloured by their position on the hue wheel.
    Rainbow,
}

impl PixelMode {
    pub fn bits_per_pixel(self) -> usize {
        match self {
            PixelMode::Bw | PixelMode::Rainbow => 1,
            PixelMode::Greyscale => 8,
            PixelMode::Rgb => 24,
        }
    }

    /// Fill colour for cells past the last encoded pixel.
    pub fn background(self) -> Rgb {
        match self {
            PixelMode::Rainbow => RAINBOW_BACKGROUND,
            PixelMode::Bw | PixelMode::Greyscale | PixelMode::Rgb => BLACK,
        }
    }
}

impl fmt::Display for PixelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelMode::Bw => write!(f, "bw"),
            PixelMode::Greyscale => write!(f, "greyscale"),
            PixelMode::Rgb => write!(f, "rgb"),
            PixelMode::Rainbow => write!(f, "rainbow"),
        }
    }
}

/// Assignment of the three bytes of an rgb group to output channels.
/// Named after the channel each byte lands in, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Gbr,
    Brg,
}

impl ChannelOrder {
    fn rotation(self) -> usize {
        match self {
            ChannelOrder::Rgb => 0,
            ChannelOrder::Gbr => 1,
            ChannelOrder::Brg => 2,
        }
    }

    fn from_rotation(steps: usize) -> Self {
        match steps % 3 {
            0 => ChannelOrder::Rgb,
            1 => ChannelOrder::Gbr,
            _ => ChannelOrder::Brg,
        }
    }

    /// Rotate further by `steps` positions (negative rotates backwards).
    pub fn rotated(self, steps: i64) -> Self {
        Self::from_rotation(self.rotation() + steps.rem_euclid(3) as usize)
    }

    /// Place `bytes[i]` into the i-th channel named by this order.
    pub fn apply(self, bytes: [u8; 3]) -> Rgb {
        let mut out = [0u8; 3];
        let rot = self.rotation();
        for (i, b) in bytes.into_iter().enumerate() {
            out[(i + rot) % 3] = b;
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterOptions {
    pub channel_order: ChannelOrder,
    /// Rotates the hue wheel by 10° per step in rainbow mode and the channel order by one
    /// position per step in rgb mode.
    pub shift: i64,
    pub max_canvas: u32,
    pub max_pixel_size: u32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            channel_order: ChannelOrder::Rgb,
            shift: 0,
            max_canvas: DEFAULT_MAX_CANVAS,
            max_pixel_size: DEFAULT_MAX_PIXEL_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridGeometry {
    pub width: usize,
    pub height: usize,
    pub pixel_size: u32,
}

impl GridGeometry {
    /// Square-ish grid holding `pixel_count` cells.
    pub fn for_pixels(pixel_count: usize, max_canvas: u32, max_pixel_size: u32) -> Self {
        if pixel_count == 0 {
            return Self {
                width: 0,
                height: 0,
                pixel_size: max_pixel_size.max(1),
            };
        }
        let mut width = pixel_count.isqrt();
        if width * width < pixel_count {
            width += 1;
        }
        let height = pixel_count.div_ceil(width);
        Self {
            width,
            height,
            pixel_size: pixel_size(width, max_canvas, max_pixel_size),
        }
    }

    pub fn cells(&self) -> usize {
        self.width * self.height
    }
}

fn pixel_size(width: usize, max_canvas: u32, max_pixel_size: u32) -> u32 {
    let fit = u32::try_from(max_canvas as usize / width).unwrap_or(u32::MAX);
    fit.clamp(1, max_pixel_size.max(1))
}

/// A fully covered grid: `pixels.len() == geometry.cells()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub mode: PixelMode,
    pub pixels: Vec<Rgb>,
    /// Cells carrying encoded data; the rest are background.
    pub pixel_count: usize,
    pub geometry: GridGeometry,
}

impl Bitmap {
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.geometry.width {
            return None;
        }
        self.pixels.get(y * self.geometry.width + x).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.pixels.chunks(self.geometry.width.max(1))
    }
}

/// Number of cells needed for `bit_len` bits under `mode`.
pub fn pixel_count(bit_len: usize, mode: PixelMode) -> usize {
    bit_len.div_ceil(mode.bits_per_pixel())
}

pub fn rasterize(digits: &BinaryDigits, mode: PixelMode, options: &RasterOptions) -> Bitmap {
    let bits: Vec<bool> = digits.bits().collect();
    let mut pixels: Vec<Rgb> = match mode {
        PixelMode::Bw => bits
            .iter()
            .map(|&bit| if bit { WHITE } else { BLACK })
            .collect(),
        PixelMode::Rainbow => {
            let total = bits.len();
            bits.iter()
                .enumerate()
                .map(|(pos, &bit)| {
                    if bit {
                        hsv_to_rgb(rainbow_hue(pos, total, options.shift), 1.0, 1.0)
                    } else {
                        RAINBOW_BACKGROUND
                    }
                })
                .collect()
        }
        PixelMode::Greyscale => bits
            .chunks(8)
            .map(|group| {
                let v = pack_byte(group);
                [v, v, v]
            })
            .collect(),
        PixelMode::Rgb => {
            let order = options.channel_order.rotated(options.shift);
            bits.chunks(24)
                .map(|group| {
                    let mut bytes = [0u8; 3];
                    for (slot, byte) in bytes.iter_mut().zip(group.chunks(8)) {
                        *slot = pack_byte(byte);
                    }
                    order.apply(bytes)
                })
                .collect()
        }
    };
    let pixel_count = pixels.len();
    debug_assert_eq!(pixel_count, self::pixel_count(bits.len(), mode));

    let geometry =
        GridGeometry::for_pixels(pixel_count, options.max_canvas, options.max_pixel_size);
    pixels.resize(geometry.cells(), mode.background());
    debug!(
        "rasterized {} bits as {} into {}x{} ({} padding cells)",
        bits.len(),
        mode,
        geometry.width,
        geometry.height,
        geometry.cells() - pixel_count
    );

    Bitmap {
        mode,
        pixels,
        pixel_count,
        geometry,
    }
}

/// MSB-first byte; a short final group is right-padded with zero bits.
fn pack_byte(bits: &[bool]) -> u8 {
    (0..8).fold(0u8, |acc, i| {
        (acc << 1) | u8::from(bits.get(i).copied().unwrap_or(false))
    })
}

fn rainbow_hue(position: usize, total: usize, shift: i64) -> f64 {
    let base = 360.0 * position as f64 / total.max(1) as f64;
    (base + 10.0 * shift.rem_euclid(36) as f64).rem_euclid(360.0)
}

/// HSV to RGB using the 60° sextant formula. `h` in degrees, `s` and `v` in `0..=1`.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let h = h.rem_euclid(360.0) / 60.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [to_channel(r), to_channel(g), to_channel(b)]
}

fn to_channel(x: f64) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn digits(s: &str) -> BinaryDigits {
        BinaryDigits::parse(s).unwrap()
    }

    #[test]
    fn bw_two_bits() {
        let bmp = rasterize(&digits("10"), PixelMode::Bw, &RasterOptions::default());
        assert_eq!(bmp.pixel_count, 2);
        assert_eq!(bmp.geometry.width, 2);
        assert_eq!(bmp.geometry.height, 1);
        assert_eq!(bmp.pixels, vec![WHITE, BLACK]);
    }

    #[test]
    fn bw_pads_trailing_cells() {
        // 5 bits -> width 3, height 2, one padding cell
        let bmp = rasterize(&digits("10010"), PixelMode::Bw, &RasterOptions::default());
        assert_eq!((bmp.geometry.width, bmp.geometry.height), (3, 2));
        assert_eq!(bmp.pixels, vec![WHITE, BLACK, BLACK, WHITE, BLACK, BLACK]);
    }

    #[test]
    fn greyscale_pads_last_group_right() {
        let bmp = rasterize(
            &digits("1111111110"),
            PixelMode::Greyscale,
            &RasterOptions::default(),
        );
        assert_eq!(bmp.pixel_count, 2);
        // "10" -> "10000000"
        assert_eq!(&bmp.pixels[..2], &[[255, 255, 255], [128, 128, 128]]);
        assert_eq!(bmp.pixels.len(), 2);
    }

    #[test]
    fn rgb_groups_and_channel_orders() {
        let bits = digits("000000010000001000000011");
        let opts = RasterOptions::default();
        let bmp = rasterize(&bits, PixelMode::Rgb, &opts);
        assert_eq!(bmp.pixels, vec![[1, 2, 3]]);

        let gbr = RasterOptions {
            channel_order: ChannelOrder::Gbr,
            ..opts
        };
        assert_eq!(rasterize(&bits, PixelMode::Rgb, &gbr).pixels, vec![[3, 1, 2]]);

        let brg = RasterOptions {
            channel_order: ChannelOrder::Brg,
            ..opts
        };
        assert_eq!(rasterize(&bits, PixelMode::Rgb, &brg).pixels, vec![[2, 3, 1]]);

        let shifted = RasterOptions { shift: 1, ..opts };
        assert_eq!(
            rasterize(&bits, PixelMode::Rgb, &shifted).pixels,
            vec![[3, 1, 2]]
        );
    }

    #[test]
    fn extreme_shifts_wrap() {
        // i64::MAX % 3 == 1, i64::MIN.rem_euclid(3) == 1
        assert_eq!(ChannelOrder::Gbr.rotated(i64::MAX), ChannelOrder::Brg);
        assert_eq!(ChannelOrder::Rgb.rotated(i64::MIN), ChannelOrder::Gbr);
        assert_eq!(ChannelOrder::Brg.rotated(-1), ChannelOrder::Gbr);

        let bits = digits("000000010000001000000011");
        let opts = RasterOptions {
            shift: i64::MAX,
            ..RasterOptions::default()
        };
        assert_eq!(rasterize(&bits, PixelMode::Rgb, &opts).pixels, vec![[3, 1, 2]]);
        // i64::MAX % 36 == 7 -> hue 70
        let bmp = rasterize(&digits("1"), PixelMode::Rainbow, &opts);
        assert_eq!(bmp.pixels[0], hsv_to_rgb(70.0, 1.0, 1.0));
    }

    #[test]
    fn rgb_short_group() {
        // 9 bits -> bytes 0b11111111, 0b10000000, 0
        let bmp = rasterize(&digits("111111111"), PixelMode::Rgb, &RasterOptions::default());
        assert_eq!(bmp.pixels, vec![[255, 128, 0]]);
    }

    #[test]
    fn rainbow_colours_set_bits_by_position() {
        let bmp = rasterize(&digits("1101"), PixelMode::Rainbow, &RasterOptions::default());
        assert_eq!(bmp.pixels[0], [255, 0, 0]);
        assert_eq!(bmp.pixels[1], hsv_to_rgb(90.0, 1.0, 1.0));
        assert_eq!(bmp.pixels[2], RAINBOW_BACKGROUND);
        assert_eq!(bmp.pixels[3], hsv_to_rgb(270.0, 1.0, 1.0));
    }

    #[test]
    fn rainbow_shift_rotates_hue() {
        let opts = RasterOptions {
            shift: 12,
            ..RasterOptions::default()
        };
        let bmp = rasterize(&digits("1"), PixelMode::Rainbow, &opts);
        assert_eq!(bmp.pixels[0], [0, 255, 0]);
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [255, 0, 0]);
        assert_eq!(hsv_to_rgb(60.0, 1.0, 1.0), [255, 255, 0]);
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), [0, 255, 0]);
        assert_eq!(hsv_to_rgb(180.0, 1.0, 1.0), [0, 255, 255]);
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), [0, 0, 255]);
        assert_eq!(hsv_to_rgb(300.0, 1.0, 1.0), [255, 0, 255]);
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), [255, 0, 0]);
        assert_eq!(hsv_to_rgb(30.0, 1.0, 1.0), [255, 128, 0]);
    }

    #[test]
    fn geometry_formula() {
        for n in 1..500usize {
            let g = GridGeometry::for_pixels(n, DEFAULT_MAX_CANVAS, DEFAULT_MAX_PIXEL_SIZE);
            assert!(g.cells() >= n);
            assert!((g.width - 1) * (g.width - 1) < n);
            assert!(g.width * g.width >= n);
            assert_eq!(g.height, n.div_ceil(g.width));
        }
    }

    #[test]
    fn pixel_size_clamps() {
        assert_eq!(GridGeometry::for_pixels(4, 400, 20).pixel_size, 20);
        assert_eq!(GridGeometry::for_pixels(10_000, 400, 20).pixel_size, 4);
        assert_eq!(GridGeometry::for_pixels(1_000_000, 400, 20).pixel_size, 1);
    }

    #[test]
    fn padding_cells_are_background() {
        for mode in [
            PixelMode::Bw,
            PixelMode::Greyscale,
            PixelMode::Rgb,
            PixelMode::Rainbow,
        ] {
            let bits = digits(&"1".repeat(101));
            let bmp = rasterize(&bits, mode, &RasterOptions::default());
            assert_eq!(bmp.pixel_count, pixel_count(101, mode));
            assert_eq!(bmp.pixels.len(), bmp.geometry.cells());
            assert!(
                bmp.pixels[bmp.pixel_count..]
                    .iter()
                    .all(|&p| p == mode.background())
            );
        }
    }

    #[test]
    fn empty_bits_give_empty_grid() {
        let bmp = rasterize(&digits(""), PixelMode::Bw, &RasterOptions::default());
        assert_eq!(bmp.geometry.cells(), 0);
        assert!(bmp.pixels.is_empty());
        assert_eq!(bmp.geometry.pixel_size, DEFAULT_MAX_PIXEL_SIZE);
    }

    #[test]
    fn rows_and_lookup() {
        let bmp = rasterize(&digits("10010"), PixelMode::Bw, &RasterOptions::default());
        assert_eq!(bmp.rows().count(), 2);
        assert_eq!(bmp.get(0, 1), Some(WHITE));
        assert_eq!(bmp.get(3, 0), None);
    }
}
