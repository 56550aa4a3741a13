mod utils;

use std::{path::PathBuf, time::Instant};

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use image::ImageReader;
use mci::PixelGrid;
use utils::{
    channels_to_color_type, color_format, color_type_to_format, exists_decision, Assume,
    ColorFormat,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Subcommands,

    /// Overwrite output files
    #[arg(short = 'y', long = "overwrite", conflicts_with = "assumeno")]
    assumeyes: bool,

    /// Do not overwrite output files
    #[arg(short = 'n', long = "preserve", conflicts_with = "assumeyes")]
    assumeno: bool,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    /// Compress an image into an MCI container
    Encode(EncodeArgs),

    /// Decompress an MCI container into another image format
    Decode(DecodeArgs),
}

#[derive(Debug, Args)]
struct EncodeArgs {
    /// Input image file of any type supported by `image`
    input: PathBuf,
    /// Output path for the MCI container
    output: PathBuf,

    /// The sample layout to store
    ///
    /// Valid values:
    ///  - Gray8
    ///  - RGB8
    ///
    /// Defaults to the layout that loses no information for the input.
    #[arg(short, long, value_parser = color_format, verbatim_doc_comment)]
    color_format: Option<ColorFormat>,
}

#[derive(Debug, Args)]
struct DecodeArgs {
    /// Input MCI container file
    input: PathBuf,

    /// Output image file
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let assume = if args.assumeyes {
        Some(Assume::Yes)
    } else if args.assumeno {
        Some(Assume::No)
    } else {
        None
    };

    match args.command {
        Subcommands::Encode(a) => encode(a, assume),
        Subcommands::Decode(a) => decode(a, assume),
    }
}

fn encode(args: EncodeArgs, assume: Option<Assume>) -> Result<()> {
    if !args.input.try_exists()? {
        bail!("Input file {:?} does not exist", args.input);
    }

    if args.output.try_exists()? && !exists_decision("Output", "Overwrite", &args.output, assume) {
        return Ok(());
    }

    let image = ImageReader::open(&args.input)?.decode()?;

    let rows = image.height();
    let cols = image.width();

    let color_format = args
        .color_format
        .or_else(|| color_type_to_format(image.color()))
        .unwrap_or(ColorFormat::Rgb8);

    let samples = match color_format {
        ColorFormat::Gray8 => image.into_luma8().into_vec(),
        ColorFormat::Rgb8 => image.into_rgb8().into_vec(),
    };
    let input_size = samples.len();

    let grid = PixelGrid::from_raw(rows, cols, color_format.channels(), samples)?;

    let start = Instant::now();
    grid.save(&args.output)?;
    let elapsed = start.elapsed();

    let output_size = std::fs::metadata(&args.output)?.len();
    eprintln!("Input size:         {input_size} bytes");
    eprintln!("Output size:        {output_size} bytes");
    eprintln!(
        "Compression factor: {:.2}",
        input_size as f64 / output_size as f64
    );
    eprintln!("Compression time:   {elapsed:.2?}");

    Ok(())
}

fn decode(args: DecodeArgs, assume: Option<Assume>) -> Result<()> {
    if !args.input.try_exists()? {
        bail!("Input file {:?} does not exist", args.input);
    }

    if args.output.try_exists()? && !exists_decision("Output", "Overwrite", &args.output, assume) {
        return Ok(());
    }

    let start = Instant::now();
    let grid = mci::open(&args.input)?;
    let elapsed = start.elapsed();

    let Some(color_type) = channels_to_color_type(grid.channels()) else {
        bail!("cannot write a {}-channel image", grid.channels());
    };

    let rows = grid.rows();
    let cols = grid.cols();
    image::save_buffer(&args.output, &grid.into_raw(), cols, rows, color_type)?;

    eprintln!("Decompression time: {elapsed:.2?}");

    Ok(())
}
