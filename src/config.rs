//! Tunable limits for encoding and rasterization, loadable from a JSON file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::godel::DEFAULT_MAX_LENGTH;
use crate::primes::DEFAULT_PRIME_COUNT;
use crate::raster::{DEFAULT_MAX_CANVAS, DEFAULT_MAX_PIXEL_SIZE};

/// Bits shown before a digit string is cut for display.
pub const DEFAULT_DISPLAY_LIMIT: usize = 512;
/// Upper bound on `max_length`; products grow with every extra position.
pub const MAX_LENGTH_CAP: usize = 1000;
/// Upper bound on `prime_count`; the table is built by trial division at startup.
pub const PRIME_COUNT_CAP: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Longest accepted input, in characters.
    pub max_length: usize,
    /// Primes generated for encoding. Inputs longer than this cannot be encoded.
    pub prime_count: usize,
    pub max_canvas: u32,
    pub max_pixel_size: u32,
    pub display_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            prime_count: DEFAULT_PRIME_COUNT,
            max_canvas: DEFAULT_MAX_CANVAS,
            max_pixel_size: DEFAULT_MAX_PIXEL_SIZE,
            display_limit: DEFAULT_DISPLAY_LIMIT,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            return Err(anyhow!("max_length must be at least 1"));
        }
        if self.max_length > MAX_LENGTH_CAP {
            return Err(anyhow!(
                "max_length {} exceeds the limit of {}",
                self.max_length,
                MAX_LENGTH_CAP
            ));
        }
        if self.prime_count > PRIME_COUNT_CAP {
            return Err(anyhow!(
                "prime_count {} exceeds the limit of {}",
                self.prime_count,
                PRIME_COUNT_CAP
            ));
        }
        if self.prime_count < self.max_length {
            return Err(anyhow!(
                "prime_count {} is smaller than max_length {}",
                self.prime_count,
                self.max_length
            ));
        }
        if self.max_pixel_size == 0 {
            return Err(anyhow!("max_pixel_size must be at least 1"));
        }
        Ok(())
    }
}
