//! Shared clap helper types for CLI commands.

use clap::{Args, ValueEnum};
use godelmap::{ChannelOrder, PixelMode};

/// Pixel packing modes accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ModeArg {
    Bw,
    Greyscale,
    Rgb,
    Rainbow,
}

impl From<ModeArg> for PixelMode {
    fn from(value: ModeArg) -> PixelMode {
        match value {
            ModeArg::Bw => PixelMode::Bw,
            ModeArg::Greyscale => PixelMode::Greyscale,
            ModeArg::Rgb => PixelMode::Rgb,
            ModeArg::Rainbow => PixelMode::Rainbow,
        }
    }
}

/// Channel order for rgb packing.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ChannelArg {
    Rgb,
    Gbr,
    Brg,
}

impl From<ChannelArg> for ChannelOrder {
    fn from(value: ChannelArg) -> ChannelOrder {
        match value {
            ChannelArg::Rgb => ChannelOrder::Rgb,
            ChannelArg::Gbr => ChannelOrder::Gbr,
            ChannelArg::Brg => ChannelOrder::Brg,
        }
    }
}

/// Rasterization flags shared by the render subcommands.
#[derive(Args, Debug, Clone)]
pub struct RasterArgs {
    /// Pixel packing mode.
    #[arg(long, default_value_t = ModeArg::Bw, value_enum)]
    pub mode: ModeArg,
    /// Channel order used by rgb mode.
    #[arg(long, default_value_t = ChannelArg::Rgb, value_enum)]
    pub channels: ChannelArg,
}
