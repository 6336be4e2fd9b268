//! Curve interpolator: projection series to renderable path geometry.
//!
//! Data space is (year_index, condition value). Canvas space has its
//! origin top-left, so the Y axis is inverted on the way in.
//!
//! Smooth mode is a Catmull-Rom spline expressed as cubic Bezier
//! segments. The phantom points before the first and after the last
//! input point are clamped to those points, so the curve starts and
//! ends exactly on the data.

use crate::types::{Scenario, YearlyProjectionPoint};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveMode {
    Linear,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo { to: CanvasPoint },
    LineTo { to: CanvasPoint },
    CubicTo { cp1: CanvasPoint, cp2: CanvasPoint, to: CanvasPoint },
}

impl PathCommand {
    /// The point the pen rests on after this command.
    pub fn end_point(&self) -> CanvasPoint {
        match self {
            Self::MoveTo { to } | Self::LineTo { to } | Self::CubicTo { to, .. } => *to,
        }
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo { to } => write!(f, "M {} {}", to.x, to.y),
            Self::LineTo { to } => write!(f, "L {} {}", to.x, to.y),
            Self::CubicTo { cp1, cp2, to } => write!(
                f,
                "C {} {}, {} {}, {} {}",
                cp1.x, cp1.y, cp2.x, cp2.y, to.x, to.y
            ),
        }
    }
}

/// Path description plus the frame it was generated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveGeometry {
    pub path_commands: String,
    pub canvas_width:  f64,
    pub canvas_height: f64,
    pub commands:      Vec<PathCommand>,
}

impl CurveGeometry {
    fn from_commands(commands: Vec<PathCommand>, canvas_width: f64, canvas_height: f64) -> Self {
        let path_commands = commands
            .iter()
            .map(PathCommand::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        Self { path_commands, canvas_width, canvas_height, commands }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn first_point(&self) -> Option<CanvasPoint> {
        self.commands.first().map(PathCommand::end_point)
    }

    pub fn last_point(&self) -> Option<CanvasPoint> {
        self.commands.last().map(PathCommand::end_point)
    }
}

/// Maps data coordinates onto a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasFrame {
    pub width:  f64,
    pub height: f64,
    pub max_x:  f64,
    pub max_y:  f64,
}

impl CanvasFrame {
    pub fn map(&self, x: f64, y: f64) -> CanvasPoint {
        let sx = safe_scale(self.width, self.max_x);
        let sy = safe_scale(self.height, self.max_y);
        CanvasPoint::new(x * sx, self.height - y * sy)
    }
}

/// `extent / max`, or 0 when the ratio would not be finite.
fn safe_scale(extent: f64, max: f64) -> f64 {
    if max == 0.0 || !max.is_finite() {
        return 0.0;
    }
    let scale = extent / max;
    if scale.is_finite() {
        scale
    } else {
        0.0
    }
}

/// Build the path for one scenario column of `points`.
pub fn interpolate(
    points: &[YearlyProjectionPoint],
    scenario: Scenario,
    mode: CurveMode,
    canvas_width: f64,
    canvas_height: f64,
    max_x: f64,
    max_y: f64,
) -> CurveGeometry {
    let frame = CanvasFrame { width: canvas_width, height: canvas_height, max_x, max_y };
    let mapped: Vec<CanvasPoint> = points
        .iter()
        .map(|p| frame.map(f64::from(p.year_index), p.value(scenario)))
        .collect();
    interpolate_mapped(&mapped, mode, canvas_width, canvas_height)
}

/// Build a path from points already in canvas space.
pub fn interpolate_mapped(
    mapped: &[CanvasPoint],
    mode: CurveMode,
    canvas_width: f64,
    canvas_height: f64,
) -> CurveGeometry {
    let commands = match mode {
        CurveMode::Smooth if mapped.len() >= 3 => smooth_commands(mapped),
        _ => linear_commands(mapped),
    };
    CurveGeometry::from_commands(commands, canvas_width, canvas_height)
}

fn linear_commands(mapped: &[CanvasPoint]) -> Vec<PathCommand> {
    let Some((first, rest)) = mapped.split_first() else {
        return Vec::new();
    };
    let mut commands = Vec::with_capacity(mapped.len());
    commands.push(PathCommand::MoveTo { to: *first });
    commands.extend(rest.iter().map(|p| PathCommand::LineTo { to: *p }));
    commands
}

fn smooth_commands(mapped: &[CanvasPoint]) -> Vec<PathCommand> {
    let n = mapped.len();
    let mut commands = Vec::with_capacity(n);
    commands.push(PathCommand::MoveTo { to: mapped[0] });

    for i in 0..n - 1 {
        let p0 = mapped[i.saturating_sub(1)];
        let p1 = mapped[i];
        let p2 = mapped[i + 1];
        let p3 = mapped[(i + 2).min(n - 1)];

        let cp1 = CanvasPoint::new(p1.x + (p2.x - p0.x) / 6.0, p1.y + (p2.y - p0.y) / 6.0);
        let cp2 = CanvasPoint::new(p2.x - (p3.x - p1.x) / 6.0, p2.y - (p3.y - p1.y) / 6.0);
        commands.push(PathCommand::CubicTo { cp1, cp2, to: p2 });
    }
    commands
}

/// Paths for both scenarios over a shared frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioCurves {
    pub funded:     CurveGeometry,
    pub do_nothing: CurveGeometry,
}

pub fn interpolate_scenarios(
    points: &[YearlyProjectionPoint],
    mode: CurveMode,
    canvas_width: f64,
    canvas_height: f64,
    max_x: f64,
    max_y: f64,
) -> ScenarioCurves {
    ScenarioCurves {
        funded: interpolate(
            points, Scenario::Funded, mode, canvas_width, canvas_height, max_x, max_y,
        ),
        do_nothing: interpolate(
            points, Scenario::DoNothing, mode, canvas_width, canvas_height, max_x, max_y,
        ),
    }
}
