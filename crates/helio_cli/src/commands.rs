//! Subcommand implementations. Each one prints a single JSON document to stdout.

use anyhow::{Context, Result};
use helio_charts::{
    parse_feed, AxisTick, ChartEngine, ChartRow, DateSelection, Granularity, PeriodTotals,
    PlotArea, SelectedSample, TotalsText,
};
use helio_flow::{FlowAnimator, FlowKind, FlowPath, FlowReadings, NodeReadouts, ParticleFrame};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::config::{HelioConfig, CONFIG_FILE};

/// Date range and dataset shared by `chart` and `tap`.
pub struct ChartRequest<'a> {
    pub feed: &'a Path,
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub show_battery: bool,
    pub viewport: f64,
}

impl ChartRequest<'_> {
    fn engine(&self, config: &HelioConfig) -> Result<ChartEngine> {
        let selection = DateSelection::new(self.year, self.month, self.day)
            .context("Invalid date selection")?;
        let json = fs::read_to_string(self.feed)
            .with_context(|| format!("Failed to read feed {}", self.feed.display()))?;
        let samples = parse_feed(&json)
            .with_context(|| format!("Failed to parse feed {}", self.feed.display()))?;

        let mut chart_config = config.chart.clone();
        chart_config.show_battery |= self.show_battery;
        let mut engine = ChartEngine::new(chart_config, selection);
        engine.set_samples(samples);
        Ok(engine)
    }
}

#[derive(Serialize)]
struct ChartOutput<'a> {
    mode: Granularity,
    selection: String,
    y_max: f64,
    content_width: f64,
    plot: PlotArea,
    ticks: &'a [usize],
    axis: Vec<AxisTick>,
    rows: &'a [ChartRow],
    totals: &'a PeriodTotals,
    totals_text: TotalsText,
}

pub fn chart(config: &HelioConfig, request: &ChartRequest<'_>) -> Result<()> {
    let engine = request.engine(config)?;
    let plot = engine.plot_area(request.viewport);
    print_json(&ChartOutput {
        mode: engine.granularity(),
        selection: engine.date_selection().to_string(),
        y_max: engine.y_max(),
        content_width: engine.content_width(request.viewport),
        plot,
        ticks: engine.ticks(),
        axis: engine.axis_ticks(plot.width),
        rows: engine.rows(),
        totals: engine.totals(),
        totals_text: engine.totals().text(),
    })
}

pub fn tap(
    config: &HelioConfig,
    request: &ChartRequest<'_>,
    x: f64,
    y: f64,
    plot_width: Option<f64>,
) -> Result<()> {
    let mut engine = request.engine(config)?;
    let mut plot = engine.plot_area(request.viewport);
    if let Some(width) = plot_width {
        plot.width = width;
    }
    let selected: Option<SelectedSample> = engine.tap(x, y, plot);
    tracing::info!(x, y, index = ?selected.as_ref().map(|s| s.index), "tap");
    print_json(&selected)
}

/// Options of the `flow` subcommand.
pub struct FlowRequest<'a> {
    pub readings: &'a Path,
    pub width: f32,
    pub unavailable: bool,
    pub frames: usize,
    pub dt_ms: f32,
}

#[derive(Serialize)]
struct PathOutput<'a> {
    flow: FlowKind,
    path: &'a FlowPath,
}

#[derive(Serialize)]
struct FrameOutput {
    elapsed_ms: f64,
    particles: Vec<ParticleFrame>,
}

#[derive(Serialize)]
struct FlowOutput<'a> {
    no_data: bool,
    active: Vec<FlowKind>,
    paths: Vec<PathOutput<'a>>,
    readouts: NodeReadouts,
    frames: Vec<FrameOutput>,
}

pub fn flow(config: &HelioConfig, request: &FlowRequest<'_>) -> Result<()> {
    let json = fs::read_to_string(request.readings)
        .with_context(|| format!("Failed to read readings {}", request.readings.display()))?;
    let readings: FlowReadings = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse readings {}", request.readings.display()))?;

    let mut animator = FlowAnimator::new(config.flow);
    animator.set_width(request.width);
    animator.update(readings, !request.unavailable);

    let mut frames = Vec::with_capacity(request.frames);
    for _ in 0..request.frames {
        animator.tick(request.dt_ms);
        frames.push(FrameOutput {
            elapsed_ms: animator.elapsed_ms(),
            particles: animator.frames(),
        });
    }

    let active: Vec<FlowKind> = animator.active_flows().into_iter().collect();
    tracing::info!(active = active.len(), particles = animator.particle_count(), "flow");
    print_json(&FlowOutput {
        no_data: animator.no_data(),
        active,
        paths: animator
            .paths()
            .into_iter()
            .map(|(flow, path)| PathOutput { flow, path })
            .collect(),
        readouts: animator.readouts(),
        frames,
    })
}

pub fn init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let target = match path {
        Some(p) if p.is_dir() => p.join(CONFIG_FILE),
        Some(p) => p.to_path_buf(),
        None => Path::new(CONFIG_FILE).to_path_buf(),
    };
    if target.exists() && !force {
        anyhow::bail!(
            "{} already exists. Pass --force to overwrite it.",
            target.display()
        );
    }
    let text = HelioConfig::default().to_toml()?;
    fs::write(&target, text).with_context(|| format!("Failed to write {}", target.display()))?;
    tracing::info!(path = %target.display(), "wrote default config");
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).context("Failed to write JSON")?;
    writeln!(out)?;
    Ok(())
}
