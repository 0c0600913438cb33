//! Request-level façade: primitive inputs in, serializable responses out.

use std::borrow::Cow;

use log::debug;
use serde::Serialize;

use crate::config::Config;
use crate::encoding::{Alnum36, EncodeError};
use crate::godel::{BinaryDigits, Encoding, GodelEncoder, truncate_for_display};
use crate::primes::{DEFAULT_PRIME_COUNT, PrimeTable};
use crate::raster::{Bitmap, ChannelOrder, PixelMode, RasterOptions, Rgb, rasterize};

/// One breakdown row with big values rendered in decimal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermView {
    pub position: usize,
    #[serde(rename = "char")]
    pub symbol: char,
    pub prime: String,
    pub exponent: u32,
    pub term: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodeResponse {
    pub godel_number: String,
    pub binary_digits: BinaryDigits,
    pub decimal_digits: usize,
    pub bit_length: usize,
    pub breakdown: Vec<TermView>,
}

impl EncodeResponse {
    fn from_encoding(encoding: &Encoding) -> Self {
        let godel_number = encoding.number.to_str_radix(10);
        let binary_digits = encoding.binary();
        Self {
            decimal_digits: godel_number.len(),
            bit_length: binary_digits.len(),
            godel_number,
            binary_digits,
            breakdown: encoding
                .terms
                .iter()
                .map(|t| TermView {
                    position: t.position,
                    symbol: t.symbol,
                    prime: t.prime.to_str_radix(10),
                    exponent: t.exponent,
                    term: t.term.to_str_radix(10),
                })
                .collect(),
        }
    }

    /// Bit string cut to `limit` digits for display.
    pub fn display_bits(&self, limit: usize) -> String {
        truncate_for_display(self.binary_digits.as_str(), limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RasterResponse {
    pub mode: PixelMode,
    pub pixels: Vec<Rgb>,
    pub pixel_count: usize,
    pub width: usize,
    pub height: usize,
    pub pixel_size: u32,
}

impl From<&Bitmap> for RasterResponse {
    fn from(bitmap: &Bitmap) -> Self {
        Self {
            mode: bitmap.mode,
            pixels: bitmap.pixels.clone(),
            pixel_count: bitmap.pixel_count,
            width: bitmap.geometry.width,
            height: bitmap.geometry.height,
            pixel_size: bitmap.geometry.pixel_size,
        }
    }
}

/// Holds the configuration and the prime table shared by every request.
#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
    primes: Cow<'static, PrimeTable>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Engine {
    /// Reuses the process-wide table unless the config asks for a different size.
    pub fn new(config: Config) -> Self {
        let primes = if config.prime_count == DEFAULT_PRIME_COUNT {
            Cow::Borrowed(PrimeTable::global())
        } else {
            Cow::Owned(PrimeTable::new(config.prime_count))
        };
        Self { config, primes }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn primes(&self) -> &PrimeTable {
        &self.primes
    }

    pub fn encoder(&self) -> GodelEncoder<'_> {
        GodelEncoder::new(&self.primes, self.config.max_length)
    }

    pub fn encode(&self, text: &str, shift: i64) -> Result<Encoding, EncodeError> {
        debug!("encode request: {} chars, shift {}", text.chars().count(), shift);
        self.encoder().encode(&Alnum36::with_shift(shift), text)
    }

    pub fn encode_request(&self, text: &str, shift: i64) -> Result<EncodeResponse, EncodeError> {
        let encoding = self.encode(text, shift)?;
        Ok(EncodeResponse::from_encoding(&encoding))
    }

    pub fn raster_options(&self, channel_order: ChannelOrder, shift: i64) -> RasterOptions {
        RasterOptions {
            channel_order,
            shift,
            max_canvas: self.config.max_canvas,
            max_pixel_size: self.config.max_pixel_size,
        }
    }

    pub fn rasterize(
        &self,
        digits: &BinaryDigits,
        mode: PixelMode,
        channel_order: ChannelOrder,
        shift: i64,
    ) -> Bitmap {
        rasterize(digits, mode, &self.raster_options(channel_order, shift))
    }

    pub fn rasterize_request(
        &self,
        digits: &BinaryDigits,
        mode: PixelMode,
        channel_order: ChannelOrder,
        shift: i64,
    ) -> RasterResponse {
        RasterResponse::from(&self.rasterize(digits, mode, channel_order, shift))
    }
}
