use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stud_quant::{ColorDistance, ColorMetric, DitherMode, Rgb, TieResolution};
use studmosaic::error::AppError;
use studmosaic::models::{MosaicConfig, Resolution};
use studmosaic::rendering::{encode_png, read_png};
use studmosaic::services::MosaicPipeline;

#[derive(Parser)]
#[command(name = "studmosaic")]
#[command(about = "Turn images into buildable stud mosaics")]
struct Cli {
    /// YAML config file (palette, metric, dithering, depth settings)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for stochastic tie-breaking (default: OS entropy)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an image into a mosaic PNG and a JSON usage report
    Render {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// JSON report path (default: output path with .json extension)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Mosaic width in studs
        #[arg(long)]
        width: Option<usize>,

        /// Mosaic height in studs
        #[arg(long)]
        height: Option<usize>,

        /// Color metric, e.g. "ciede2000" or "euclidean-rgb"
        #[arg(long)]
        metric: Option<ColorMetric>,

        /// Dithering mode, e.g. "none", "floyd-steinberg" or "dynamic"
        #[arg(long)]
        dither: Option<DitherMode>,

        /// Tie-resolution policy for supply correction, e.g. "mod2"
        #[arg(long)]
        tie_resolution: Option<TieResolution>,

        /// Ignore stud counts
        #[arg(long)]
        infinite: bool,

        /// Quantize against the palette as seen over a dark backing panel
        #[arg(long)]
        bleed_through: bool,

        /// Pixels per stud in the output PNG
        #[arg(long, default_value_t = 1)]
        scale: usize,
    },
    /// Pack depth plates for a greyscale depth map
    Depth {
        /// Input PNG depth map
        input: PathBuf,

        /// Output JSON report
        #[arg(short, long)]
        output: PathBuf,

        /// Also write a PNG preview of the discrete levels
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Depth map width in studs
        #[arg(long)]
        width: Option<usize>,

        /// Depth map height in studs
        #[arg(long)]
        height: Option<usize>,

        /// Comma-separated ascending thresholds, e.g. "64,128,192"
        #[arg(long, value_delimiter = ',')]
        thresholds: Option<Vec<u8>>,

        /// Plates may not cross multiples of this many studs
        #[arg(long)]
        boundary: Option<usize>,
    },
    /// Print every metric's distance between two colors
    Metrics {
        /// First color, e.g. "#ff0000"
        a: Rgb,
        /// Second color
        b: Rgb,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studmosaic=info,stud_quant=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            report,
            width,
            height,
            metric,
            dither,
            tie_resolution,
            infinite,
            bleed_through,
            scale,
        }) => {
            let mut config = load_config(cli.config.as_deref())?;
            apply_resolution(&mut config, width, height)?;
            if let Some(metric) = metric {
                config.metric = metric;
            }
            if let Some(mode) = dither {
                config.dither.mode = mode;
            }
            if let Some(policy) = tie_resolution {
                config.dither.tie_resolution = policy;
            }
            config.dither.assume_infinite_supply |= infinite;
            config.bleed_through |= bleed_through;

            let report_path = report.unwrap_or_else(|| output.with_extension("json"));
            run_render_command(config, &input, &output, &report_path, scale, cli.seed)
        }
        Some(Commands::Depth {
            input,
            output,
            preview,
            width,
            height,
            thresholds,
            boundary,
        }) => {
            let mut config = load_config(cli.config.as_deref())?;
            apply_resolution(&mut config, width, height)?;
            if let Some(thresholds) = thresholds {
                config.depth.thresholds = thresholds;
            }
            if boundary.is_some() {
                config.depth.boundary = boundary;
            }
            run_depth_command(config, &input, &output, preview.as_deref())
        }
        Some(Commands::Metrics { a, b }) => {
            run_metrics_command(a, b);
            Ok(())
        }
        None => {
            run_status_command(cli.config.as_deref());
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<MosaicConfig, AppError> {
    match path {
        Some(path) => MosaicConfig::load(path),
        None => {
            tracing::info!("No config file given, using the built-in palette");
            Ok(MosaicConfig::default())
        }
    }
}

fn apply_resolution(
    config: &mut MosaicConfig,
    width: Option<usize>,
    height: Option<usize>,
) -> Result<(), AppError> {
    match (width, height) {
        (None, None) => Ok(()),
        (Some(width), Some(height)) if width > 0 && height > 0 => {
            config.resolution = Some(Resolution { width, height });
            Ok(())
        }
        _ => Err(AppError::InvalidConfig(
            "--width and --height must be given together and be positive".to_string(),
        )),
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    std::fs::write(path, bytes).map_err(|source| AppError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Render an image into a mosaic PNG plus report
fn run_render_command(
    config: MosaicConfig,
    input: &Path,
    output: &Path,
    report_path: &Path,
    scale: usize,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let image = read_png(input)?;
    let pipeline = MosaicPipeline::new(config);

    let result = match seed {
        Some(seed) => pipeline.render(&image, &mut StdRng::seed_from_u64(seed))?,
        None => pipeline.render(&image, &mut rand::thread_rng())?,
    };

    write_file(output, &encode_png(result.mosaic.pixels(), scale)?)?;
    write_file(report_path, serde_json::to_string_pretty(&result.report)?.as_bytes())?;

    println!(
        "Wrote {}x{} mosaic to {} ({} colors, report: {})",
        result.report.width,
        result.report.height,
        output.display(),
        result.report.usage.len(),
        report_path.display()
    );
    if !result.report.missing.is_empty() {
        println!("Missing studs:");
        for (color, n) in &result.report.missing {
            println!("  {color}  {n}");
        }
    }
    Ok(())
}

/// Pack depth plates and write the report
fn run_depth_command(
    config: MosaicConfig,
    input: &Path,
    output: &Path,
    preview: Option<&Path>,
) -> anyhow::Result<()> {
    let depth_map = read_png(input)?;
    let result = MosaicPipeline::new(config).depth(&depth_map)?;

    write_file(output, serde_json::to_string_pretty(&result.report)?.as_bytes())?;
    if let Some(path) = preview {
        write_file(path, &encode_png(&result.preview(), 1)?)?;
    }

    println!(
        "Packed {} depth layers for {}x{} studs into {}",
        result.report.layers.len(),
        result.report.width,
        result.report.height,
        output.display()
    );
    for (part, n) in &result.report.parts {
        println!("  {part:>7}  {n}");
    }
    Ok(())
}

/// Print the distance between two colors under every metric
fn run_metrics_command(a: Rgb, b: Rgb) {
    println!("{a} -> {b}");
    for metric in ColorMetric::ALL {
        println!("  {:<20} {:>10.4}", metric.name(), metric.distance(a, b));
    }
}

/// Display version, configuration and available commands
fn run_status_command(config: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Studmosaic v{VERSION}");
    println!("Stud mosaics from images\n");

    println!("Config:");
    match config {
        Some(path) if path.exists() => println!("  {}", path.display()),
        Some(path) => println!("  {} (file not found)", path.display()),
        None => println!("  built-in defaults"),
    }

    println!("\nCommands:");
    println!("  studmosaic render   Render an image into a mosaic PNG");
    println!("  studmosaic depth    Pack depth plates for a depth map");
    println!("  studmosaic metrics  Compare two colors under every metric");
    println!("\nRun 'studmosaic --help' for more details.");
}
