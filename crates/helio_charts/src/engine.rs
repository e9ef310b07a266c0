//! The chart engine
//!
//! Owns the current samples and date selection and keeps the derived rows,
//! ticks and totals in step with them. The only state of its own is the
//! inspector selection, which any change of data or granularity clears.

use std::borrow::Cow;

use crate::aggregate::{aggregate_year_by_day, downsample_month};
use crate::config::ChartConfig;
use crate::date_selection::{DateSelection, Granularity};
use crate::hit_test::resolve;
use crate::layout::{content_width, PlotArea};
use crate::rows::{prepare, ChartRow, PreparedChart, RowOptions};
use crate::sample::{PowerSample, SampleTime};
use crate::selection::{SelectedSample, SelectionEvent, SelectionState};
use crate::ticks::{axis_ticks, tick_indices, AxisTick};
use crate::totals::{integrate_energy, PeriodTotals};

pub struct ChartEngine {
    config: ChartConfig,
    selection: DateSelection,
    samples: Vec<PowerSample>,
    chart: PreparedChart,
    ticks: Vec<usize>,
    totals: PeriodTotals,
    state: SelectionState,
}

impl ChartEngine {
    pub fn new(config: ChartConfig, selection: DateSelection) -> Self {
        let mut engine = Self {
            config,
            selection,
            samples: Vec::new(),
            chart: PreparedChart {
                rows: Vec::new(),
                y_max: 0.0,
            },
            ticks: Vec::new(),
            totals: PeriodTotals::default(),
            state: SelectionState::Unselected,
        };
        engine.recompute();
        engine
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn date_selection(&self) -> DateSelection {
        self.selection
    }

    pub fn granularity(&self) -> Granularity {
        self.selection.granularity()
    }

    /// Replace the dataset. Clears the selection.
    pub fn set_samples(&mut self, samples: Vec<PowerSample>) {
        self.samples = samples;
        self.transition(SelectionEvent::DataChanged);
        self.recompute();
    }

    /// Move to another date range. Clears the selection if anything changed.
    pub fn set_date_selection(&mut self, selection: DateSelection) {
        if selection == self.selection {
            return;
        }
        self.selection = selection;
        self.transition(SelectionEvent::DataChanged);
        self.recompute();
    }

    /// Toggle the battery series. Rows keep their indices, so the selection stays.
    pub fn set_show_battery(&mut self, show: bool) {
        if show == self.config.show_battery {
            return;
        }
        self.config.show_battery = show;
        self.recompute();
    }

    pub fn set_show_soc(&mut self, show: bool) {
        self.config.show_soc = show;
    }

    pub fn samples(&self) -> &[PowerSample] {
        &self.samples
    }

    pub fn rows(&self) -> &[ChartRow] {
        &self.chart.rows
    }

    pub fn y_max(&self) -> f64 {
        self.chart.y_max
    }

    /// Tick indices into `rows()`.
    pub fn ticks(&self) -> &[usize] {
        &self.ticks
    }

    pub fn axis_ticks(&self, plot_width: f64) -> Vec<AxisTick> {
        axis_ticks(&self.ticks, &self.chart.rows, plot_width)
    }

    pub fn totals(&self) -> &PeriodTotals {
        &self.totals
    }

    /// Scrollable width of the chart in a viewport of `viewport_width`.
    pub fn content_width(&self, viewport_width: f64) -> f64 {
        content_width(viewport_width, self.chart.rows.len(), self.granularity())
    }

    /// Plot area of the chart laid out in a viewport of `viewport_width`.
    pub fn plot_area(&self, viewport_width: f64) -> PlotArea {
        PlotArea::inside(self.content_width(viewport_width), self.config.plot_height)
    }

    /// Plot-local position of a row value, the inverse of what a tap resolves.
    pub fn plot_point(&self, index: usize, value: f64, plot: PlotArea) -> (f64, f64) {
        plot.point(index, self.chart.rows.len(), value, self.chart.y_max)
    }

    /// Resolve a plot-local tap and select the resulting sample.
    pub fn tap(&mut self, x: f64, y: f64, plot: PlotArea) -> Option<SelectedSample> {
        let hit = resolve(
            x,
            y,
            &self.chart.rows,
            self.chart.y_max,
            plot,
            self.config.show_battery,
            &self.config.hit_test,
        );
        self.transition(SelectionEvent::Tap(hit));
        self.selected()
    }

    /// Tap on the dismiss overlay.
    pub fn dismiss(&mut self) {
        self.transition(SelectionEvent::Dismiss);
    }

    pub fn selection_state(&self) -> SelectionState {
        self.state
    }

    pub fn selected(&self) -> Option<SelectedSample> {
        let row = self.chart.rows.get(self.state.index()?)?;
        Some(SelectedSample::from_row(
            row,
            self.config.show_battery,
            self.config.show_soc,
        ))
    }

    fn transition(&mut self, event: SelectionEvent) {
        self.state = self.state.apply(event);
    }

    fn recompute(&mut self) {
        let granularity = self.selection.granularity();
        let display: Cow<'_, [PowerSample]> = match granularity {
            Granularity::Month if self.config.month_downsample => {
                Cow::Owned(downsample_month(&self.samples))
            }
            Granularity::Year if self.config.year_daily_aggregate => {
                Cow::Owned(aggregate_year_by_day(&self.samples))
            }
            _ => Cow::Borrowed(&self.samples),
        };

        self.chart = prepare(
            &display,
            granularity,
            RowOptions {
                locale: self.config.locale,
                show_battery: self.config.show_battery,
            },
        );
        let times: Vec<SampleTime> = display.iter().map(|s| s.timestamp).collect();
        self.ticks = tick_indices(&times, &self.selection);
        self.totals = integrate_energy(&self.samples);

        tracing::debug!(
            selection = %self.selection,
            %granularity,
            samples = self.samples.len(),
            rows = self.chart.rows.len(),
            ticks = self.ticks.len(),
            y_max = self.chart.y_max,
            "chart recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day_samples() -> Vec<PowerSample> {
        (0..96)
            .map(|i| PowerSample {
                timestamp: SampleTime::parse(&format!(
                    "2024-06-01T{:02}:{:02}:00+02:00",
                    i / 4,
                    (i % 4) * 15
                ))
                .unwrap(),
                pv_power: (i as f64 * 40.0).min(3600.0),
                load_power: -400.0,
                grid_power: -100.0,
                battery_power: 2.0,
                soc: Some(50.0),
            })
            .collect()
    }

    fn day_engine() -> ChartEngine {
        let mut e = ChartEngine::new(
            ChartConfig::default(),
            DateSelection::day(2024, 6, 1).unwrap(),
        );
        e.set_samples(day_samples());
        e
    }

    #[test]
    fn prepares_rows_ticks_and_totals() {
        let e = day_engine();
        assert_eq!(e.rows().len(), 96);
        assert_eq!(e.y_max(), 4000.0);
        assert_eq!(e.ticks().len(), 12);
        assert_eq!(e.rows()[e.ticks()[1]].axis_label, "02:00");
        assert!(e.totals().pv_kwh > 0.0);
    }

    #[test]
    fn battery_toggle_keeps_selection_and_rescales() {
        let mut e = day_engine();
        let plot = e.plot_area(390.0);
        let (x, y) = e.plot_point(10, e.rows()[10].target(false), plot);
        assert_eq!(e.tap(x, y, plot).map(|s| s.index), Some(10));
        assert_eq!(e.selected().and_then(|s| s.battery), None);

        e.set_show_battery(true);
        assert_eq!(e.y_max(), 4000.0);
        assert_eq!(e.selection_state(), SelectionState::Selected(10));
        assert_eq!(e.selected().and_then(|s| s.battery), Some(2000.0));
    }

    #[test]
    fn data_or_range_change_clears_selection() {
        let mut e = day_engine();
        let plot = e.plot_area(390.0);
        e.tap(100.0, 100.0, plot);
        assert!(e.selected().is_some());

        e.set_date_selection(DateSelection::day(2024, 6, 1).unwrap());
        assert!(e.selected().is_some());

        e.set_date_selection(DateSelection::month(2024, 6).unwrap());
        assert_eq!(e.selection_state(), SelectionState::Unselected);

        e.tap(100.0, 100.0, plot);
        e.set_samples(day_samples());
        assert_eq!(e.selection_state(), SelectionState::Unselected);

        e.tap(100.0, 100.0, plot);
        e.dismiss();
        assert!(e.selected().is_none());
    }

    #[test]
    fn degenerate_plot_selects_nothing() {
        let mut e = day_engine();
        assert!(e.tap(10.0, 10.0, PlotArea::new(0.0, 0.0)).is_none());
        assert!(e.axis_ticks(0.0).is_empty());
    }

    #[test]
    fn year_aggregation_is_opt_in() {
        let config = ChartConfig {
            year_daily_aggregate: true,
            ..ChartConfig::default()
        };
        let mut e = ChartEngine::new(config, DateSelection::year(2024));
        e.set_samples(day_samples());
        assert_eq!(e.rows().len(), 1);
        assert_eq!(e.samples().len(), 96);
        // Noon stamps never start a month, so the even-spacing fallback applies.
        assert_eq!(e.ticks(), &[0]);
    }
}
