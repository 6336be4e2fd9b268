use roadsim_core::{
    forecast::{axis_bounds, maintenance_costs, normalize_bars, pair_scenarios},
    types::ForecastRecord,
};

fn rec(year: i32, vci: f64, cost: f64) -> ForecastRecord {
    ForecastRecord {
        year,
        avg_condition_index: vci,
        total_maintenance_cost: cost,
    }
}

#[test]
fn scenarios_are_aligned_sorted_and_rebased() {
    let funded = vec![rec(2027, 78.0, 0.0), rec(2025, 80.0, 0.0), rec(2026, 79.0, 0.0)];
    let do_nothing = vec![rec(2026, 70.0, 0.0), rec(2025, 75.0, 0.0), rec(2027, 64.0, 0.0)];

    let points = pair_scenarios(&funded, &do_nothing);
    assert_eq!(points.len(), 3);
    let indices: Vec<u32> = points.iter().map(|p| p.year_index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(points[0].funded_value, 80.0);
    assert_eq!(points[0].do_nothing_value, 75.0);
    assert_eq!(points[2].funded_value, 78.0);
    assert_eq!(points[2].do_nothing_value, 64.0);
}

#[test]
fn full_i32_year_span_rebases_without_overflow() {
    let funded = vec![rec(i32::MAX, 10.0, 0.0), rec(i32::MIN, 90.0, 0.0), rec(0, 50.0, 0.0)];
    let do_nothing = funded.clone();

    let points = pair_scenarios(&funded, &do_nothing);
    let indices: Vec<u32> = points.iter().map(|p| p.year_index).collect();
    assert_eq!(indices, vec![0, 1u32 << 31, u32::MAX]);
    assert_eq!(points[0].funded_value, 90.0);
    assert_eq!(axis_bounds(&points).0, f64::from(u32::MAX));
}

#[test]
fn only_shared_years_are_kept() {
    let funded = vec![rec(2024, 90.0, 0.0), rec(2025, 89.0, 0.0), rec(2026, 88.0, 0.0)];
    let do_nothing = vec![rec(2025, 70.0, 0.0), rec(2026, 60.0, 0.0), rec(2027, 50.0, 0.0)];
    let points = pair_scenarios(&funded, &do_nothing);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].year_index, 0);
    assert_eq!(points[0].funded_value, 89.0);
    assert_eq!(points[1].do_nothing_value, 60.0);
}

#[test]
fn duplicate_years_keep_the_first_record() {
    let _ = env_logger::builder().is_test(true).try_init();
    let funded = vec![rec(2025, 80.0, 0.0), rec(2025, 10.0, 0.0), rec(2026, 79.0, 0.0)];
    let do_nothing = vec![rec(2025, 75.0, 0.0), rec(2026, 70.0, 0.0)];
    let points = pair_scenarios(&funded, &do_nothing);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].funded_value, 80.0);
}

#[test]
fn gaps_in_years_are_preserved_in_the_index() {
    let funded = vec![rec(2025, 80.0, 0.0), rec(2030, 70.0, 0.0)];
    let do_nothing = funded.clone();
    let points = pair_scenarios(&funded, &do_nothing);
    assert_eq!(points[1].year_index, 5);
}

#[test]
fn empty_inputs_pair_to_nothing() {
    assert!(pair_scenarios(&[], &[rec(2025, 1.0, 0.0)]).is_empty());
    assert_eq!(axis_bounds(&[]), (0.0, 0.0));
}

#[test]
fn axis_bounds_cover_both_scenarios() {
    let funded = vec![rec(2025, 60.0, 0.0), rec(2026, 65.0, 0.0), rec(2027, 70.0, 0.0)];
    let do_nothing = vec![rec(2025, 72.0, 0.0), rec(2026, 50.0, 0.0), rec(2027, 40.0, 0.0)];
    let points = pair_scenarios(&funded, &do_nothing);
    assert_eq!(axis_bounds(&points), (2.0, 72.0));
}

#[test]
fn bars_normalise_to_the_maximum() {
    let bars = normalize_bars(&[0.0, 50.0, 100.0, 25.0]);
    assert_eq!(bars, vec![0.0, 0.5, 1.0, 0.25]);
}

#[test]
fn all_zero_bars_stay_zero() {
    let bars = normalize_bars(&[0.0, 0.0, 0.0]);
    assert_eq!(bars, vec![0.0, 0.0, 0.0]);
    assert!(normalize_bars(&[]).is_empty());
    assert!(normalize_bars(&[f64::NAN, 0.0]).iter().all(|b| *b == 0.0));
}

#[test]
fn maintenance_costs_feed_bars() {
    let records = vec![rec(2025, 80.0, 2_000.0), rec(2026, 79.0, 8_000.0)];
    assert_eq!(normalize_bars(&maintenance_costs(&records)), vec![0.25, 1.0]);
}
