//! las-window - SoPhiH / OOIP window aggregation over a folder of LAS files
//!
//! # Usage
//!
//! ```bash
//! # Defaults: 100 ft up, 50 ft down, A = 1, Bo = 1.25, PHIT / SW
//! las-window run --folder logs/
//!
//! # Override window and curve names, write results elsewhere
//! las-window run --folder logs/ --ft-above 60 --ft-below 20 --phi PHIE --sw SWE --output-dir out/
//!
//! # Machine-readable summary
//! las-window run --config field.toml --json
//!
//! # List well identifiers (UWI, else API) to a text file
//! las-window uwis --folder logs/ --output uwis.txt
//! ```
//!
//! # Environment Variables
//!
//! - `LAS_WINDOW_CONFIG`: Path to a TOML run config
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

use las_window::batch::{collect_well_ids, write_well_ids, BatchRunner};
use las_window::config::RunConfig;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "las-window")]
#[command(about = "SoPhiH / OOIP depth-window aggregation for LAS well logs")]
#[command(version)]
struct CliArgs {
    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Derive SoPhiH, OOIP and their window totals for every LAS file in a folder
    Run(RunArgs),

    /// Write the well identifier of every LAS file in a folder to a text file
    Uwis {
        /// Folder containing the LAS files
        #[arg(long)]
        folder: PathBuf,
        /// Output text file (one identifier per line)
        #[arg(long, short)]
        output: PathBuf,
        /// File extension to read
        #[arg(long, default_value = "las")]
        extension: String,
    },
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// TOML run config (default: $LAS_WINDOW_CONFIG, then ./las_window.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Folder containing the LAS files
    #[arg(long)]
    folder: Option<PathBuf>,

    /// Distance above each sample, in feet
    #[arg(long)]
    ft_above: Option<f64>,

    /// Distance below each sample, in feet
    #[arg(long)]
    ft_below: Option<f64>,

    /// Drainage area in acres
    #[arg(long = "area", short = 'A')]
    area: Option<f64>,

    /// Oil formation volume factor
    #[arg(long)]
    bo: Option<f64>,

    /// Porosity curve mnemonic
    #[arg(long)]
    phi: Option<String>,

    /// Water saturation curve mnemonic
    #[arg(long)]
    sw: Option<String>,

    /// Folder for calculated files (default: the input folder)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

impl RunArgs {
    /// Layer CLI flags over the file/default config.
    fn apply(&self, config: &mut RunConfig) {
        if let Some(ref folder) = self.folder {
            config.input.folder = folder.clone();
        }
        if let Some(ref out) = self.output_dir {
            config.input.output_dir = Some(out.clone());
        }
        if let Some(v) = self.ft_above {
            config.window.ft_above = v;
        }
        if let Some(v) = self.ft_below {
            config.window.ft_below = v;
        }
        if let Some(v) = self.area {
            config.volumetrics.area_acres = v;
        }
        if let Some(v) = self.bo {
            config.volumetrics.bo = v;
        }
        if let Some(ref phi) = self.phi {
            config.curves.phi = phi.clone();
        }
        if let Some(ref sw) = self.sw {
            config.curves.sw = sw.clone();
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

fn run_batch(args: &RunArgs) -> Result<()> {
    let mut config = match args.config {
        Some(ref path) => RunConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RunConfig::load().context("Failed to load run config")?,
    };
    args.apply(&mut config);

    let runner = BatchRunner::new(&config).context("Invalid run configuration")?;
    let summary = runner.run().context("Batch aborted")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
    }
    Ok(())
}

fn list_well_ids(folder: &Path, output: &Path, extension: &str) -> Result<()> {
    let ids = collect_well_ids(folder, extension)
        .with_context(|| format!("Failed to scan {}", folder.display()))?;
    write_well_ids(&ids, output)?;
    println!("Text file of UWIs saved to {}", output.display());
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    info!(version = env!("CARGO_PKG_VERSION"), "las-window starting");

    match args.command {
        SubCommand::Run(ref run) => run_batch(run),
        SubCommand::Uwis {
            ref folder,
            ref output,
            ref extension,
        } => list_well_ids(folder, output, extension),
    }
}
