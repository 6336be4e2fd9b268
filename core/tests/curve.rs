use roadsim_core::{
    curve::{interpolate, interpolate_scenarios, CanvasPoint, CurveMode, PathCommand},
    types::{Scenario, YearlyProjectionPoint},
};

fn series(values: &[(f64, f64)]) -> Vec<YearlyProjectionPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, (funded, do_nothing))| YearlyProjectionPoint {
            year_index: i as u32,
            funded_value: *funded,
            do_nothing_value: *do_nothing,
        })
        .collect()
}

fn close(a: CanvasPoint, b: CanvasPoint) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[test]
fn linear_path_maps_and_inverts_y() {
    let points = series(&[(100.0, 100.0), (50.0, 40.0), (0.0, 10.0)]);
    let g = interpolate(&points, Scenario::Funded, CurveMode::Linear, 200.0, 100.0, 2.0, 100.0);
    assert_eq!(g.path_commands, "M 0 0 L 100 50 L 200 100");
    assert_eq!(g.canvas_width, 200.0);
    assert_eq!(g.canvas_height, 100.0);
}

#[test]
fn do_nothing_column_is_selectable() {
    let points = series(&[(100.0, 100.0), (50.0, 40.0)]);
    let g = interpolate(&points, Scenario::DoNothing, CurveMode::Linear, 200.0, 100.0, 1.0, 100.0);
    assert_eq!(g.path_commands, "M 0 0 L 200 60");
}

#[test]
fn smooth_path_starts_and_ends_on_the_data() {
    let points = series(&[
        (80.0, 80.0),
        (85.0, 72.0),
        (83.0, 61.0),
        (90.0, 55.0),
        (88.0, 40.0),
    ]);
    let (w, h, max_x, max_y) = (640.0, 320.0, 4.0, 100.0);
    let g = interpolate(&points, Scenario::DoNothing, CurveMode::Smooth, w, h, max_x, max_y);

    let first = g.first_point().unwrap();
    let last = g.last_point().unwrap();
    assert_eq!(first, CanvasPoint::new(0.0, h - 80.0 * (h / max_y)));
    assert_eq!(last, CanvasPoint::new(4.0 * (w / max_x), h - 40.0 * (h / max_y)));
}

#[test]
fn smooth_path_passes_through_every_point() {
    let points = series(&[(10.0, 0.0), (30.0, 0.0), (20.0, 0.0), (60.0, 0.0)]);
    let g = interpolate(&points, Scenario::Funded, CurveMode::Smooth, 300.0, 60.0, 3.0, 60.0);

    assert_eq!(g.commands.len(), 4);
    assert!(matches!(g.commands[0], PathCommand::MoveTo { .. }));
    let expected = [(0.0, 50.0), (100.0, 30.0), (200.0, 40.0), (300.0, 0.0)];
    for (cmd, (x, y)) in g.commands.iter().zip(expected) {
        assert!(close(cmd.end_point(), CanvasPoint::new(x, y)), "{cmd}");
    }
    assert!(g.commands[1..]
        .iter()
        .all(|c| matches!(c, PathCommand::CubicTo { .. })));
}

#[test]
fn catmull_rom_control_points() {
    // Canvas points (0,0), (100,50), (200,100).
    let points = series(&[(100.0, 0.0), (50.0, 0.0), (0.0, 0.0)]);
    let g = interpolate(&points, Scenario::Funded, CurveMode::Smooth, 200.0, 100.0, 2.0, 100.0);

    let PathCommand::CubicTo { cp1, cp2, to } = g.commands[1] else {
        panic!("expected a cubic segment, got {:?}", g.commands[1]);
    };
    // First segment: p0 is clamped to p1.
    assert!(close(cp1, CanvasPoint::new(100.0 / 6.0, 50.0 / 6.0)));
    assert!(close(cp2, CanvasPoint::new(100.0 - 200.0 / 6.0, 50.0 - 100.0 / 6.0)));
    assert!(close(to, CanvasPoint::new(100.0, 50.0)));

    let PathCommand::CubicTo { cp1, cp2, to } = g.commands[2] else {
        panic!("expected a cubic segment, got {:?}", g.commands[2]);
    };
    // Last segment: p3 is clamped to p2.
    assert!(close(cp1, CanvasPoint::new(100.0 + 200.0 / 6.0, 50.0 + 100.0 / 6.0)));
    assert!(close(cp2, CanvasPoint::new(200.0 - 100.0 / 6.0, 100.0 - 50.0 / 6.0)));
    assert!(close(to, CanvasPoint::new(200.0, 100.0)));
}

#[test]
fn two_points_render_the_same_in_both_modes() {
    let points = series(&[(70.0, 70.0), (90.0, 30.0)]);
    for scenario in [Scenario::Funded, Scenario::DoNothing] {
        let linear = interpolate(&points, scenario, CurveMode::Linear, 400.0, 200.0, 1.0, 100.0);
        let smooth = interpolate(&points, scenario, CurveMode::Smooth, 400.0, 200.0, 1.0, 100.0);
        assert_eq!(linear, smooth);
        assert_eq!(linear.commands.len(), 2);
    }
}

#[test]
fn empty_series_yields_empty_path() {
    for mode in [CurveMode::Linear, CurveMode::Smooth] {
        let g = interpolate(&[], Scenario::Funded, mode, 100.0, 100.0, 10.0, 100.0);
        assert!(g.is_empty());
        assert_eq!(g.path_commands, "");
        assert_eq!(g.first_point(), None);
    }
}

#[test]
fn single_point_is_a_move_only() {
    let points = series(&[(50.0, 50.0)]);
    let g = interpolate(&points, Scenario::Funded, CurveMode::Smooth, 100.0, 100.0, 1.0, 100.0);
    assert_eq!(g.path_commands, "M 0 50");
}

#[test]
fn zero_bounds_do_not_produce_nan() {
    let points = series(&[(0.0, 0.0), (0.0, 0.0), (0.0, 0.0)]);
    let g = interpolate(&points, Scenario::Funded, CurveMode::Smooth, 100.0, 80.0, 0.0, 0.0);
    for cmd in &g.commands {
        let p = cmd.end_point();
        assert!(p.x.is_finite() && p.y.is_finite(), "{cmd}");
        assert_eq!(p.y, 80.0);
    }
    assert!(!g.path_commands.contains("NaN"));
    assert!(!g.path_commands.contains("inf"));
}

#[test]
fn scenario_pair_shares_a_frame() {
    let points = series(&[(90.0, 90.0), (88.0, 70.0), (86.0, 50.0)]);
    let curves = interpolate_scenarios(&points, CurveMode::Smooth, 300.0, 150.0, 2.0, 100.0);
    assert_eq!(curves.funded.first_point(), curves.do_nothing.first_point());
    let funded_end = curves.funded.last_point().unwrap();
    let do_nothing_end = curves.do_nothing.last_point().unwrap();
    assert_eq!(funded_end.x, do_nothing_end.x);
    // Better condition renders higher, i.e. a smaller canvas y.
    assert!(funded_end.y < do_nothing_end.y);
}
