//! Helio CLI
//!
//! Runs the energy-flow animator and the power chart engine without a UI:
//! - `helio chart`: rows, ticks and totals for a feed and date range
//! - `helio tap`: the sample a tap on the chart would select
//! - `helio flow`: active flows, paths and particle frames for a readings snapshot
//! - `helio init-config`: write a default `helio.toml`

mod commands;
mod config;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::commands::{ChartRequest, FlowRequest};
use crate::config::HelioConfig;

#[derive(Parser, Debug)]
#[command(name = "helio")]
#[command(about = "Helio energy dashboard engines, headless")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./helio.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct RangeArgs {
    /// JSON feed of power samples
    #[arg(long)]
    feed: PathBuf,

    #[arg(long)]
    year: i32,

    /// 1-12; omit for a year view
    #[arg(long)]
    month: Option<u32>,

    /// Day of month; requires --month
    #[arg(long, requires = "month")]
    day: Option<u32>,

    /// Include the battery series
    #[arg(long)]
    show_battery: bool,

    /// Width of the viewport the chart scrolls in
    #[arg(long, default_value_t = 390.0)]
    viewport: f64,
}

impl RangeArgs {
    fn request(&self) -> ChartRequest<'_> {
        ChartRequest {
            feed: &self.feed,
            year: self.year,
            month: self.month,
            day: self.day,
            show_battery: self.show_battery,
            viewport: self.viewport,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prepare chart rows, ticks and period totals
    Chart {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Resolve a tap in plot-local pixels to a sample
    Tap {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        #[arg(long, allow_hyphen_values = true)]
        y: f64,

        /// Plot width in pixels (defaults to the laid-out plot width)
        #[arg(long)]
        plot_width: Option<f64>,
    },
    /// Animate the flow diagram for a readings snapshot
    Flow {
        /// JSON readings snapshot
        #[arg(long)]
        readings: PathBuf,

        /// Container width in pixels
        #[arg(long)]
        width: f32,

        /// Treat the data source as unavailable
        #[arg(long)]
        unavailable: bool,

        /// Number of frames to step
        #[arg(long, default_value_t = 1)]
        frames: usize,

        /// Frame delta in milliseconds
        #[arg(long = "dt", default_value_t = 16.0)]
        dt_ms: f32,
    },
    /// Write a default helio.toml
    InitConfig {
        /// Target file or directory (defaults to ./helio.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // init-config must work even when an existing config is broken.
    if let Commands::InitConfig { path, force } = &cli.command {
        init_logging(&HelioConfig::default(), cli.verbose);
        return commands::init_config(path.as_deref(), *force);
    }

    let config = HelioConfig::discover(cli.config.as_deref())?;
    init_logging(&config, cli.verbose);

    match &cli.command {
        Commands::Chart { range } => commands::chart(&config, &range.request()),
        Commands::Tap {
            range,
            x,
            y,
            plot_width,
        } => commands::tap(&config, &range.request(), *x, *y, *plot_width),
        Commands::Flow {
            readings,
            width,
            unavailable,
            frames,
            dt_ms,
        } => commands::flow(
            &config,
            &FlowRequest {
                readings,
                width: *width,
                unavailable: *unavailable,
                frames: *frames,
                dt_ms: *dt_ms,
            },
        ),
        Commands::InitConfig { .. } => Ok(()),
    }
}

/// `RUST_LOG` wins, then `-v`, then the config's `[log] level`. Logs go to stderr.
fn init_logging(config: &HelioConfig, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { config.log.level.as_str() };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
