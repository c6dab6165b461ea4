//! Frame Fingerprint CLI
//!
//! Non-interactive driver for the extraction and matching pipeline,
//! demonstrated on a synthetic frame sequence.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use frame_fingerprint::{
    config::FileConfig, matching::find_matches, pipeline::extract, record::build_matrix,
    source::SyntheticSource, transform::FeatureKind,
};

#[derive(Parser)]
#[command(name = "frame-fingerprint", version, about = "Video frame fingerprinting and matching")]
struct Cli {
    /// Suppress progress output; print results only.
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract feature records from a synthetic frame sequence.
    Extract(ExtractArgs),
    /// Rank frames by distance to a query frame.
    Match(MatchArgs),
}

#[derive(Args)]
struct ExtractArgs {
    #[command(flatten)]
    feature: FeatureArgs,

    #[command(flatten)]
    geometry: GeometryArgs,

    /// Base name for the output file.
    #[arg(long, default_value = "synthetic")]
    name: String,

    /// Load source geometry and feature parameters from a TOML file
    /// instead of the flags above.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct MatchArgs {
    /// Feature record file produced by `extract`.
    records: PathBuf,

    #[command(flatten)]
    feature: FeatureArgs,

    #[command(flatten)]
    geometry: GeometryArgs,

    /// Index of the query frame.
    #[arg(long)]
    query: usize,

    /// Number of closest frames to report.
    #[arg(long, default_value_t = 10)]
    matches: usize,
}

#[derive(Args)]
struct FeatureArgs {
    /// Feature type.
    #[arg(long, value_enum)]
    feature: FeatureType,

    /// Significant components to retain per block or frame.
    #[arg(long, default_value_t = 7)]
    components: usize,

    /// Histogram bin count.
    #[arg(long, default_value_t = 8)]
    bins: usize,
}

#[derive(Args)]
struct GeometryArgs {
    /// Frame width in pixels.
    #[arg(long, default_value_t = 64)]
    width: u32,

    /// Frame height in pixels.
    #[arg(long, default_value_t = 48)]
    height: u32,

    /// Number of frames in the sequence.
    #[arg(long, default_value_t = 30)]
    frames: usize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FeatureType {
    /// Per-block quantized histogram.
    Hist,
    /// Per-block difference histogram.
    Diff,
    /// Per-block 2D DCT.
    Dct,
    /// Per-block 2D Haar DWT.
    Dwt,
    /// Whole-frame multiresolution Haar DWT.
    FrameDwt,
}

impl FeatureArgs {
    fn kind(&self) -> FeatureKind {
        match self.feature {
            FeatureType::Hist => FeatureKind::Histogram { bins: self.bins },
            FeatureType::Diff => FeatureKind::DifferenceHistogram { bins: self.bins },
            FeatureType::Dct => FeatureKind::BlockDct {
                retain: self.components,
            },
            FeatureType::Dwt => FeatureKind::BlockDwt {
                retain: self.components,
            },
            FeatureType::FrameDwt => FeatureKind::FrameDwt {
                retain: self.components,
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Quiet mode drops progress logging but keeps warnings, replacing
    // the old trick of silencing standard output wholesale.
    let default_level = if cli.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Extract(args) => run_extract(args),
        Command::Match(args) => run_match(args),
    }
}

fn run_extract(args: ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (kind, width, height, frames) = match &args.config {
        Some(path) => {
            let config = FileConfig::from_file(path)?;
            (
                config.feature,
                config.source.width,
                config.source.height,
                config.source.frame_count,
            )
        }
        None => (
            args.feature.kind(),
            args.geometry.width,
            args.geometry.height,
            args.geometry.frames,
        ),
    };

    info!("Frame Fingerprint v{}", frame_fingerprint::VERSION);

    let source = SyntheticSource::new(width, height, frames)?;
    let output = kind.output_file_name(&args.name);

    let file = File::create(&output)?;
    let summary = extract(&source, &kind, BufWriter::new(file))?;

    info!(
        "Processed {} frames, {} records",
        summary.frames_processed, summary.records_written
    );
    println!("{output}");

    Ok(())
}

fn run_match(args: MatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let kind = args.feature.kind();
    let layout = kind.matrix_layout(args.geometry.width, args.geometry.height, args.geometry.frames);

    let file = File::open(&args.records)?;
    let matrix = build_matrix(BufReader::new(file), &layout)?;

    if matrix.skipped_records() > 0 {
        info!("Skipped {} malformed records", matrix.skipped_records());
    }

    let matches = find_matches(&matrix, args.query, args.matches)?;

    println!("Matches for frame {}:", args.query);
    for (position, m) in matches.iter().enumerate() {
        println!(
            "{:>3}. frame {:>5}  score {:.3}",
            position + 1,
            m.frame_index,
            m.distance
        );
    }

    Ok(())
}
