use helio_charts::scale::LinearScale;
use helio_charts::ticks::{day_tick_step, DAY_STEP_CANDIDATES};
use helio_charts::{
    month_tick_step, normalize_battery_units, prepare, resolve, DateSelection, Granularity,
    HitTestParams, PlotArea, PowerSample, RowOptions, SampleTime,
};
use proptest::prelude::*;

fn samples_from(values: &[(f64, f64, f64, f64)]) -> Vec<PowerSample> {
    let t0 = SampleTime::parse("2024-06-01T00:00:00Z").unwrap();
    values
        .iter()
        .enumerate()
        .map(|(i, &(pv, load, grid, battery))| {
            let ms = t0.ms + i as i64 * 900_000;
            let naive = chrono::DateTime::from_timestamp_millis(ms)
                .unwrap()
                .naive_utc();
            PowerSample {
                timestamp: SampleTime::from_naive_utc(&naive),
                pv_power: pv,
                load_power: load,
                grid_power: grid,
                battery_power: battery,
                soc: None,
            }
        })
        .collect()
}

fn any_reading() -> impl Strategy<Value = f64> {
    prop_oneof![
        -20_000.0..20_000.0_f64,
        -60.0..60.0_f64,
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(0.0),
    ]
}

#[test]
fn month_steps_for_common_lengths() {
    assert_eq!(month_tick_step(31), 4);
    assert_eq!(month_tick_step(28), 3);
    assert_eq!(month_tick_step(30), 3);
}

#[test]
fn battery_normalization_examples() {
    assert_eq!(normalize_battery_units(30.0), 30_000.0);
    assert_eq!(normalize_battery_units(60.0), 60.0);
    assert_eq!(normalize_battery_units(0.0), 0.0);
}

#[test]
fn day_31_clamps_when_moving_to_february() {
    let sel = DateSelection::day(2023, 3, 31).unwrap();
    assert_eq!(sel.with_month(2).unwrap().day_value(), Some(28));
    let sel = DateSelection::day(2024, 3, 31).unwrap();
    assert_eq!(sel.with_month(2).unwrap().day_value(), Some(29));
}

proptest! {
    #[test]
    fn rows_are_non_negative_and_y_max_is_a_multiple_of_500(
        values in prop::collection::vec((any_reading(), any_reading(), any_reading(), any_reading()), 0..64),
        show_battery in any::<bool>(),
    ) {
        let samples = samples_from(&values);
        let chart = prepare(&samples, Granularity::Day, RowOptions { show_battery, ..RowOptions::default() });
        for r in &chart.rows {
            prop_assert!(r.pv >= 0.0 && r.load >= 0.0 && r.feed_in >= 0.0 && r.battery >= 0.0);
            prop_assert!(r.target(show_battery) <= chart.y_max);
        }
        prop_assert!(chart.y_max >= 100.0);
        prop_assert_eq!(chart.y_max % 500.0, 0.0);
    }

    #[test]
    fn day_step_is_always_a_candidate(n in 0usize..5000) {
        prop_assert!(DAY_STEP_CANDIDATES.contains(&day_tick_step(n)));
    }

    #[test]
    fn resolve_stays_in_range(
        values in prop::collection::vec((0.0..5000.0_f64, -5000.0..0.0_f64, -5000.0..5000.0_f64, -60.0..60.0_f64), 1..200),
        x in -500.0..2000.0_f64,
        y in -500.0..800.0_f64,
        width in 1.0..1500.0_f64,
        height in 1.0..400.0_f64,
    ) {
        let samples = samples_from(&values);
        let chart = prepare(&samples, Granularity::Day, RowOptions::default());
        let plot = PlotArea::new(width, height);
        let hit = resolve(x, y, &chart.rows, chart.y_max, plot, false, &HitTestParams::default());
        prop_assert!(matches!(hit, Some(i) if i < chart.rows.len()));
    }

    #[test]
    fn tapping_a_plotted_point_selects_it(
        values in prop::collection::vec((0.0..5000.0_f64, -5000.0..0.0_f64, -5000.0..5000.0_f64, -60.0..60.0_f64), 1..120),
        pick in any::<prop::sample::Index>(),
        show_battery in any::<bool>(),
    ) {
        let samples = samples_from(&values);
        let chart = prepare(&samples, Granularity::Day, RowOptions { show_battery, ..RowOptions::default() });
        let plot = PlotArea::new(values.len() as f64 * 9.0, 200.0);
        let i = pick.index(chart.rows.len());
        let (x, y) = plot.point(i, chart.rows.len(), chart.rows[i].target(show_battery), chart.y_max);
        let hit = resolve(x, y, &chart.rows, chart.y_max, plot, show_battery, &HitTestParams::default());
        prop_assert_eq!(hit, Some(i));
    }

    #[test]
    fn snapping_away_from_the_x_guess_stays_within_the_value_cutoff(
        values in prop::collection::vec((0.0..5000.0_f64, -5000.0..0.0_f64, -5000.0..5000.0_f64, -60.0..60.0_f64), 1..200),
        x in 0.0..1500.0_f64,
        y in 0.0..400.0_f64,
        width in 1.0..1500.0_f64,
        height in 1.0..400.0_f64,
        show_battery in any::<bool>(),
    ) {
        let samples = samples_from(&values);
        let chart = prepare(&samples, Granularity::Day, RowOptions { show_battery, ..RowOptions::default() });
        let plot = PlotArea::new(width, height);
        let params = HitTestParams::default();
        let n = chart.rows.len();
        let (x, y) = (x.min(width), y.min(height));

        let guess = (LinearScale::index(n, width).invert(x).round().max(0.0) as usize).min(n - 1);
        let y_guess = LinearScale::value(chart.y_max, height).invert(y);

        let hit = resolve(x, y, &chart.rows, chart.y_max, plot, show_battery, &params);
        let Some(i) = hit else {
            return Err(TestCaseError::fail("non-empty rows must resolve"));
        };
        if i != guess {
            let distance = (chart.rows[i].target(show_battery) - y_guess).abs() / params.value_unit;
            prop_assert!(distance <= params.max_value_distance);
            prop_assert!(i.abs_diff(guess) <= params.window);
        }
    }
}
