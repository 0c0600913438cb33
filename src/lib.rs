//! Core library for Gödel-numbering alphanumeric text and rasterizing the result.

mod config;
mod encoding;
mod engine;
mod godel;
mod graphics;
mod primes;
mod raster;

pub use config::{Config, DEFAULT_DISPLAY_LIMIT, MAX_LENGTH_CAP, PRIME_COUNT_CAP};
pub use encoding::{
    ALPHABET_LEN, Alnum36, EncodeError, SymbolEncoding, apply_shift, base_value, is_valid_symbol,
};
pub use engine::{EncodeResponse, Engine, RasterResponse, TermView};
pub use godel::{
    BinaryDigits, BitsError, DEFAULT_MAX_LENGTH, Encoding, EncodingTerm, GodelEncoder,
    truncate_for_display,
};
pub use graphics::{ImageRenderOptions, render_bitmap_ascii, render_bitmap_image};
pub use primes::{DEFAULT_PRIME_COUNT, PrimeTable, generate_primes};
pub use raster::{
    Bitmap, ChannelOrder, GridGeometry, PixelMode, RasterOptions, Rgb, hsv_to_rgb, pixel_count,
    rasterize,
};

use num_bigint::BigUint;

/// Encodes `text` with the process-wide prime table and default length limit.
pub fn encode_text(text: &str, shift: i64) -> Result<Encoding, EncodeError> {
    GodelEncoder::new(PrimeTable::global(), DEFAULT_MAX_LENGTH)
        .encode(&Alnum36::with_shift(shift), text)
}

/// Unsigned base-2 expansion of `n`, most significant bit first.
pub fn to_binary(n: &BigUint) -> BinaryDigits {
    BinaryDigits::from_number(n)
}
