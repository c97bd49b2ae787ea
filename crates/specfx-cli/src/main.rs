//! specfx - frequency-domain restoration of 8-bit grayscale BMP images
//!
//! Removes periodic interference with Butterworth notch-reject filters,
//! smooths with an ideal low-pass, and offers the spatial contraharmonic
//! mean for salt/pepper noise.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use specfx_ops::Notch;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod commands;

#[derive(Parser)]
#[command(name = "specfx")]
#[command(author, version, about = "Frequency-domain restoration of 8-bit grayscale BMP images")]
#[command(long_about = "
Restores 8-bit palette-indexed BMP images in the frequency domain.
Output files keep the input's header and color table byte for byte.

Examples:
  specfx info scan.bmp                          # Show raster info
  specfx spectrum scan.bmp scan_fft.bmp         # Locate interference peaks
  specfx notch scan.bmp clean.bmp --cutoff 2 --order 2 --notch 0,10
  specfx lowpass scan.bmp smooth.bmp --cutoff 30
  specfx run scan.bmp clean.bmp --config notch.yaml
  specfx contraharmonic pepper.bmp clean.bmp --q 1.5
  specfx batch -i 'scans/*.bmp' -o clean/ --config notch.yaml
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display raster information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Ideal low-pass filter
    #[command(visible_alias = "lp")]
    Lowpass(LowpassArgs),

    /// Butterworth notch-reject filter
    Notch(NotchArgs),

    /// Run a filter pipeline from a YAML config
    Run(RunArgs),

    /// Spatial contraharmonic mean filter
    #[command(visible_alias = "ch")]
    Contraharmonic(ContraharmonicArgs),

    /// Write the centered log-magnitude spectrum as an image
    Spectrum(SpectrumArgs),

    /// Batch process multiple images
    Batch(BatchArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct LowpassArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    output: PathBuf,

    /// Cutoff radius D0 in frequency cells
    #[arg(short, long)]
    cutoff: f64,

    /// Reject dimensions that are not powers of two
    #[arg(long)]
    power_of_two: bool,
}

#[derive(Args)]
struct NotchArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    output: PathBuf,

    /// Notch radius D0 in frequency cells
    #[arg(short, long)]
    cutoff: f64,

    /// Butterworth order n
    #[arg(short = 'n', long, default_value = "2")]
    order: u32,

    /// Notch offset from the spectrum center as `u,v` (repeatable)
    #[arg(long = "notch", required = true, allow_hyphen_values = true, value_parser = commands::parse_notch)]
    notches: Vec<Notch>,

    /// Reject dimensions that are not powers of two
    #[arg(long)]
    power_of_two: bool,
}

#[derive(Args)]
struct RunArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    output: PathBuf,

    /// Pipeline config (YAML)
    #[arg(short, long)]
    config: PathBuf,
}

#[derive(Args)]
struct ContraharmonicArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    output: PathBuf,

    /// Filter order Q (> 0 removes pepper, < 0 removes salt)
    #[arg(short, long, allow_negative_numbers = true)]
    q: f64,

    /// Neighborhood radius (1 = 3x3)
    #[arg(short, long, default_value = "1")]
    radius: usize,
}

#[derive(Args)]
struct SpectrumArgs {
    /// Input image
    input: PathBuf,

    /// Output image (grayscale BMP)
    output: PathBuf,
}

#[derive(Args)]
struct BatchArgs {
    /// Input pattern (glob)
    #[arg(short, long)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Pipeline config (YAML)
    #[arg(short, long)]
    config: PathBuf,
}

/// Installs the stderr subscriber and, with `--log`, a file subscriber.
///
/// `RUST_LOG` overrides the level derived from `-v`.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_filter(filter());

    let Some(path) = log_file else {
        tracing_subscriber::registry().with(stderr_layer).try_init()?;
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let name = path
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", path.display()))?;
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(filter());

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;
    Ok(Some(guard))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Lowpass(args) => commands::lowpass::run(args, cli.verbose),
        Commands::Notch(args) => commands::notch::run(args, cli.verbose),
        Commands::Run(args) => commands::run::run(args, cli.verbose),
        Commands::Contraharmonic(args) => commands::contraharmonic::run(args, cli.verbose),
        Commands::Spectrum(args) => commands::spectrum::run(args, cli.verbose),
        Commands::Batch(args) => commands::batch::run(args, cli.verbose),
    }
}
