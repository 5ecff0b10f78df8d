//! bmpfilter CLI - BMP image filters and WAV volume scaling.
//!
//! Applies one or more filters (grayscale, reflect, blur, edges) to an
//! uncompressed 24-bit BMP, writing one output file per filter, and
//! scales the amplitude of 16-bit PCM WAV files.

use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use bmpfilter_rs::{ExitCode, FilterKind, ValidationError, bmp, paths, wav};

/// BMP filter pipeline and WAV volume utility
#[derive(Parser)]
#[command(name = "bmpfilter")]
#[command(author = "bmpfilter-rs contributors")]
#[command(version)]
#[command(about = "Apply filters to 24-bit BMP images", long_about = None)]
#[command(after_help = "EXAMPLES:
    bmpfilter filter grayscale -i image.bmp
    bmpfilter filter blur edges -i image.bmp --out-dir filtered
    bmpfilter filter all -i image.bmp -d images
    bmpfilter volume 0.5 -i input.wav -o quiet.wav
    bmpfilter info -i image.bmp

FILTERS:
    grayscale   luminosity grayscale
    reflect     horizontal mirror
    blur        3x3 box blur
    edges       Sobel edge detection
    all         apply every filter, one output file per filter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose (debug) output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply one or more filters to a BMP image
    ///
    /// Each filter reads the same decoded image and writes its own
    /// output file named <stem>_<filter>.bmp. The sentinel 'all'
    /// expands to every filter.
    #[command(visible_alias = "f")]
    Filter {
        /// Filter names to apply, or 'all'
        #[arg(required = true)]
        filters: Vec<String>,

        /// Input BMP file name
        #[arg(short, long)]
        input: String,

        /// Explicit output file (only valid with a single filter)
        #[arg(short, long)]
        output: Option<String>,

        /// Directory to search for the input file
        #[arg(short, long)]
        directory: Option<PathBuf>,

        /// Directory for output files, created if absent
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Scale the volume of a 16-bit PCM WAV file
    ///
    /// Samples are multiplied by FACTOR and clamped to the 16-bit
    /// range; the 44-byte header is copied through unchanged.
    #[command(visible_alias = "v")]
    Volume {
        /// Multiplier applied to every sample (e.g. 0.5 halves, 2 doubles)
        factor: f32,

        /// Input WAV file name
        #[arg(short, long)]
        input: String,

        /// Output WAV file (defaults to output.wav next to the input)
        #[arg(short, long)]
        output: Option<String>,

        /// Directory to search for the input file
        #[arg(short, long)]
        directory: Option<PathBuf>,
    },

    /// Display BMP header information
    #[command(visible_alias = "i")]
    Info {
        /// Input BMP file name
        #[arg(short, long)]
        input: String,

        /// Directory to search for the input file
        #[arg(short, long)]
        directory: Option<PathBuf>,
    },

    /// List available filters
    #[command(visible_alias = "l")]
    List,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Filter {
            filters,
            input,
            output,
            directory,
            out_dir,
        } => run_filter(
            &filters,
            &input,
            output.as_deref(),
            directory.as_deref(),
            out_dir.as_deref(),
        ),
        Commands::Volume {
            factor,
            input,
            output,
            directory,
        } => run_volume(factor, &input, output.as_deref(), directory.as_deref()),
        Commands::Info { input, directory } => run_info(&input, directory.as_deref()),
        Commands::List => run_list(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(exit_code(e.as_ref()).into());
    }
}

/// Map a failure to its process exit code: 130 for an interrupted I/O
/// operation, 1 for everything else.
fn exit_code(err: &(dyn std::error::Error + 'static)) -> ExitCode {
    let interrupted = match err.downcast_ref::<bmpfilter_rs::Error>() {
        Some(bmpfilter_rs::Error::Io(io_err)) => io_err.kind() == io::ErrorKind::Interrupted,
        _ => err
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::Interrupted),
    };
    if interrupted {
        ExitCode::Interrupt
    } else {
        ExitCode::Failure
    }
}

fn run_filter(
    filter_args: &[String],
    input: &str,
    output: Option<&str>,
    directory: Option<&Path>,
    out_dir: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let filters = expand_filters(filter_args)?;
    if output.is_some() && filters.len() > 1 {
        return Err("an explicit output file requires exactly one filter".into());
    }

    let in_file = paths::resolve_input(input, directory, paths::BMP_EXT)?;
    let decoded = bmp::read(&in_file)?;

    for filter in filters {
        let filtered = filter.apply(&decoded.pixels)?;
        let out_file = match output {
            Some(name) => paths::explicit_output(name, out_dir, paths::BMP_EXT)?,
            None => paths::output_path(&in_file, filter.name(), out_dir, paths::BMP_EXT)?,
        };
        bmp::write(&out_file, &filtered, decoded.width, &decoded.header)?;
        println!(
            "✓ Applied {} to {}x{} image -> {:?}",
            filter,
            decoded.pixels.width(),
            decoded.pixels.height(),
            out_file
        );
    }
    Ok(())
}

/// Expand and validate the positional filter names: lowercase, no
/// duplicates, 'all' only on its own.
fn expand_filters(args: &[String]) -> Result<Vec<FilterKind>, Box<dyn std::error::Error>> {
    if args.iter().any(|a| a.trim().eq_ignore_ascii_case("all")) {
        if args.len() > 1 {
            return Err("'all' cannot be combined with other filters".into());
        }
        return Ok(FilterKind::ALL.to_vec());
    }

    let mut filters = Vec::with_capacity(args.len());
    for arg in args {
        let kind: FilterKind = arg.trim().to_ascii_lowercase().parse()?;
        if filters.contains(&kind) {
            return Err(ValidationError::DuplicateFilter(kind.name().to_string()).into());
        }
        filters.push(kind);
    }
    Ok(filters)
}

fn run_volume(
    factor: f32,
    input: &str,
    output: Option<&str>,
    directory: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let in_file = paths::resolve_input(input, directory, paths::WAV_EXT)?;
    let out_file = match output {
        Some(name) => paths::explicit_output(name, None, paths::WAV_EXT)?,
        None => in_file.with_file_name("output.wav"),
    };

    let report = wav::change_volume(&in_file, &out_file, factor)?;
    println!(
        "✓ Scaled {} samples by {} ({} clipped) -> {:?}",
        report.samples, factor, report.clipped, out_file
    );
    Ok(())
}

fn run_info(input: &str, directory: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let in_file = paths::resolve_input(input, directory, paths::BMP_EXT)?;
    let data = std::fs::read(&in_file)?;
    let header = bmp::header::BmpHeader::parse(&data)?;

    println!("File: {:?}", in_file);
    println!("Size: {} bytes", data.len());
    println!();
    println!("Format: BMP (24-bit uncompressed)");
    println!(
        "  Dimensions:   {}x{}",
        header.width,
        header.height.unsigned_abs()
    );
    println!(
        "  Row order:    {}",
        if header.height < 0 {
            "top-down"
        } else {
            "bottom-up"
        }
    );
    println!("  Bits/pixel:   {}", header.bits_per_pixel);
    println!("  Pixel offset: {} bytes", header.pixel_offset);
    println!("  Row padding:  {} bytes", header.padding());
    Ok(())
}

fn run_list() -> Result<(), Box<dyn std::error::Error>> {
    println!("Available filters:");
    println!();
    println!("  grayscale   Luminosity grayscale (0.299 R + 0.587 G + 0.114 B)");
    println!("  reflect     Horizontal mirror");
    println!("  blur        3x3 box blur, averaged over in-bounds neighbors");
    println!("  edges       Sobel gradient magnitude per channel, capped at 255");
    println!();
    println!("  all         Apply every filter, writing one file per filter");
    Ok(())
}
