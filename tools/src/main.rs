//! scenario-runner: headless driver for the road scenario engine.
//!
//! Usage:
//!   scenario-runner --config engine.json --years 8
//!   scenario-runner --seed 12345 --ipc-mode < commands.jsonl

use anyhow::Result;
use roadsim_core::{
    curve::CurveMode,
    engine::{ChartRequest, ScenarioEngine, TripInputs, TripReport},
    forecast::{maintenance_costs, normalize_bars},
    projector::{degradation_series, visual_condition_index},
    types::{CargoType, DriveConditions, ForecastRecord, RoadSegmentState, Surface, Weather},
    EngineConfig,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Evaluate {
        #[serde(flatten)]
        inputs: TripInputs,
    },
    Curve {
        funded: Vec<ForecastRecord>,
        do_nothing: Vec<ForecastRecord>,
        chart: ChartRequest,
    },
    Quit,
}

#[derive(serde::Serialize)]
struct CurveResponse {
    funded_path: String,
    do_nothing_path: String,
    canvas_width: f64,
    canvas_height: f64,
    funded_cost_bars: Vec<f64>,
    do_nothing_cost_bars: Vec<f64>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed: Option<u64> = parse_opt_arg(&args, "--seed");
    let years = parse_arg(&args, "--years", 10u32);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let config_path: Option<String> = parse_opt_arg(&args, "--config");

    let config = match config_path {
        Some(path) => EngineConfig::load(&path)?,
        None => EngineConfig::default(),
    };
    let mut engine = ScenarioEngine::new(config)?;

    if ipc_mode {
        run_ipc_loop(&mut engine)
    } else {
        run_demo(&mut engine, seed, years)
    }
}

fn run_ipc_loop(engine: &mut ScenarioEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Evaluate { inputs } => {
                let report = engine.evaluate(&inputs);
                writeln!(stdout, "{}", serde_json::to_string(&report)?)?;
            }
            IpcCommand::Curve { funded, do_nothing, chart } => {
                let curves = engine.forecast_curves(&funded, &do_nothing, &chart);
                let response = CurveResponse {
                    funded_path: curves.funded.path_commands,
                    do_nothing_path: curves.do_nothing.path_commands,
                    canvas_width: chart.canvas_width,
                    canvas_height: chart.canvas_height,
                    funded_cost_bars: normalize_bars(&maintenance_costs(&funded)),
                    do_nothing_cost_bars: normalize_bars(&maintenance_costs(&do_nothing)),
                };
                writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
            }
        }
        stdout.flush()?;
    }

    let (evaluations, hits) = engine.stats();
    log::info!("ipc loop finished: {evaluations} evaluations, {hits} memo hits");
    Ok(())
}

fn run_demo(engine: &mut ScenarioEngine, seed: Option<u64>, years: u32) -> Result<()> {
    let segment = RoadSegmentState {
        baseline_roughness: 2.5,
        surface: Surface::Gravel,
        width_meters: 7.0,
        name: "Demo corridor".into(),
    };
    let conditions = DriveConditions {
        cargo_type: CargoType::Electronics,
        cargo_weight_tons: 20.0,
        weather: Weather::Rain,
        speed_limit_kmh: 90.0,
    };

    println!("Road scenario engine: scenario-runner");
    println!("  generated: {}", chrono::Utc::now().to_rfc3339());
    println!("  segment:   {} ({:?})", segment.name, segment.surface);
    println!("  cargo:     {} ({} t)", conditions.cargo_type.name(), conditions.cargo_weight_tons);
    println!("  years:     {years}");
    println!("  seed:      {}", seed.map_or("deterministic".to_string(), |s| s.to_string()));
    println!();

    println!("=== TRIP OUTCOMES ===");
    for elapsed_years in [0, years / 2, years] {
        let inputs = TripInputs {
            segment: segment.clone(),
            elapsed_years,
            conditions: conditions.clone(),
            seed,
        };
        print_report(elapsed_years, &engine.evaluate(&inputs));
    }

    // Do-nothing follows the projector; funded is held at the baseline.
    let config = engine.config().clone();
    let do_nothing: Vec<ForecastRecord> = degradation_series(
        &config.degradation,
        segment.baseline_roughness,
        segment.surface,
        years,
    )
    .into_iter()
    .enumerate()
    .map(|(i, roughness)| ForecastRecord {
        year: 2025 + i as i32,
        avg_condition_index: visual_condition_index(roughness),
        total_maintenance_cost: 0.0,
    })
    .collect();
    let funded: Vec<ForecastRecord> = do_nothing
        .iter()
        .map(|r| ForecastRecord {
            year: r.year,
            avg_condition_index: visual_condition_index(segment.baseline_roughness),
            total_maintenance_cost: 0.0,
        })
        .collect();

    println!();
    println!("=== CONDITION CURVES (600x300) ===");
    for mode in [CurveMode::Linear, CurveMode::Smooth] {
        let chart = ChartRequest { mode, canvas_width: 600.0, canvas_height: 300.0 };
        let curves = engine.forecast_curves(&funded, &do_nothing, &chart);
        println!("  {mode:?} funded:     {}", curves.funded.path_commands);
        println!("  {mode:?} do-nothing: {}", curves.do_nothing.path_commands);
    }
    Ok(())
}

fn print_report(elapsed_years: u32, report: &TripReport) {
    let r = &report.result;
    println!(
        "  year +{elapsed_years:<3} roughness {:.2} (VCI {:.0}) | health {:.1}% | loss ${:.0}",
        report.scored_roughness, report.visual_condition_index, r.cargo_health, r.financial_loss
    );
    if let Some(events) = report.impact_events {
        println!("           impact events: {events}");
    }
    println!("           {}", report.narrative);
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    parse_opt_arg(args, flag).unwrap_or(default)
}

fn parse_opt_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
}
