//! Rendering commands (`godelmap render ...`).

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Subcommand};
use godelmap::{
    BinaryDigits, Bitmap, Engine, ImageRenderOptions, render_bitmap_ascii, render_bitmap_image,
};
use log::info;

use crate::cli::common::RasterArgs;
use crate::cli::utils::{ensure_parent_dir, read_text_arg, write_output};

/// Available render subcommands.
#[derive(Subcommand, Debug)]
pub enum RenderCommand {
    /// Encode text and write the bitmap as a PNG.
    Image(RenderImageArgs),
    /// Encode text and print a character preview of the bitmap.
    Ascii(RenderAsciiArgs),
    /// Rasterize a raw bit string and print the pixel data as JSON.
    Bits(RenderBitsArgs),
}

/// Text source and shift shared by the text-driven render commands.
#[derive(Args, Debug)]
pub struct TextInputArgs {
    /// Input text (falls back to stdin if omitted).
    #[arg(long)]
    pub text: Option<String>,
    /// Read input from file (`-` for stdin).
    #[arg(long = "from")]
    pub from: Option<PathBuf>,
    /// Cyclic shift applied to character values and colours.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub shift: i64,
}

/// Args for `godelmap render image`.
#[derive(Args, Debug)]
pub struct RenderImageArgs {
    #[command(flatten)]
    pub input: TextInputArgs,
    #[command(flatten)]
    pub raster: RasterArgs,
    /// Output PNG file.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Cell edge in pixels (defaults to the size fitted to the canvas).
    #[arg(long)]
    pub scale: Option<u32>,
    /// Draw separators between cells.
    #[arg(long)]
    pub grid: bool,
}

/// Args for `godelmap render ascii`.
#[derive(Args, Debug)]
pub struct RenderAsciiArgs {
    #[command(flatten)]
    pub input: TextInputArgs,
    #[command(flatten)]
    pub raster: RasterArgs,
    /// Output file (`-` for stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Args for `godelmap render bits`.
#[derive(Args, Debug)]
pub struct RenderBitsArgs {
    /// Bit string such as `10010`.
    #[arg(long)]
    pub bits: String,
    #[command(flatten)]
    pub raster: RasterArgs,
    /// Rotation applied to channel order and hue.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub shift: i64,
}

/// Execute a render command.
pub fn handle(engine: &Engine, command: RenderCommand) -> Result<()> {
    match command {
        RenderCommand::Image(args) => image(engine, args),
        RenderCommand::Ascii(args) => ascii(engine, args),
        RenderCommand::Bits(args) => bits(engine, args),
    }
}

fn encode_bitmap(engine: &Engine, input: TextInputArgs, raster: &RasterArgs) -> Result<Bitmap> {
    let text = read_text_arg(input.text, input.from)?;
    let encoding = engine.encode(&text, input.shift)?;
    Ok(engine.rasterize(
        &encoding.binary(),
        raster.mode.into(),
        raster.channels.into(),
        input.shift,
    ))
}

fn image(engine: &Engine, args: RenderImageArgs) -> Result<()> {
    let is_png = args
        .output
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false);
    if !is_png {
        return Err(anyhow!(
            "output path {} must end in .png",
            args.output.display()
        ));
    }

    let bitmap = encode_bitmap(engine, args.input, &args.raster)?;
    let options = ImageRenderOptions {
        scale: args.scale,
        grid: args.grid,
    };
    let image = render_bitmap_image(&bitmap, &options)?;
    ensure_parent_dir(&args.output)?;
    image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!("saved {}x{} image", image.width(), image.height());

    println!(
        "Rendered {} cells ({}x{}, {}) to {}",
        bitmap.pixel_count,
        bitmap.geometry.width,
        bitmap.geometry.height,
        bitmap.mode,
        args.output.display()
    );
    Ok(())
}

fn ascii(engine: &Engine, args: RenderAsciiArgs) -> Result<()> {
    let bitmap = encode_bitmap(engine, args.input, &args.raster)?;
    let preview = render_bitmap_ascii(&bitmap);
    match args.output {
        Some(path) => {
            write_output(&path, &preview)?;
            if path.as_os_str() != "-" {
                println!("Wrote {} preview to {}", bitmap.mode, path.display());
            }
        }
        None => print!("{}", preview),
    }
    Ok(())
}

fn bits(engine: &Engine, args: RenderBitsArgs) -> Result<()> {
    let digits = BinaryDigits::parse(&args.bits)?;
    let response = engine.rasterize_request(
        &digits,
        args.raster.mode.into(),
        args.raster.channels.into(),
        args.shift,
    );
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
