//! Bar chart rendering for comparison results.
//!
//! One figure row per comparison group: slowdown on the left with a
//! reference line at 1.0, aggregate attacker bandwidth on the right. Each
//! panel shows one bar per configuration for every test case.
//!
//! The backend is picked from the output extension: `.svg` renders SVG,
//! anything else a PNG bitmap.

use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::compare::{Comparison, ComparisonGroup, DisplayMetrics};
use crate::config::ChartConfig;
use crate::dataset::{Benchmark, Configuration};
use crate::error::{AnalysisError, Result};

/// Width of one bar in x-axis units (one unit per test case).
const BAR_WIDTH: f64 = 0.35;
/// Vertical space reserved for the figure title.
const TITLE_HEIGHT: u32 = 60;

const SIDES: [Configuration; 2] = [Configuration::OneBank, Configuration::AllBanks];
/// Panels of one figure row, left to right.
const PANELS: [Panel; 2] = [Panel::Slowdown, Panel::Bandwidth];

#[derive(Debug, Clone, Copy)]
enum Panel {
    Slowdown,
    Bandwidth,
}

impl Panel {
    fn value(self, metrics: &DisplayMetrics) -> f64 {
        match self {
            Self::Slowdown => metrics.slowdown,
            Self::Bandwidth => metrics.aggregate_bandwidth,
        }
    }

    fn y_max(self, config: &ChartConfig) -> f64 {
        match self {
            Self::Slowdown => config.slowdown_max,
            Self::Bandwidth => config.bandwidth_max,
        }
    }

    fn caption(self, group: &ComparisonGroup) -> String {
        match self {
            Self::Slowdown => format!("{} - Slowdown", group.title()),
            Self::Bandwidth => format!("{} - Attacker Bandwidth", group.title()),
        }
    }

    fn y_desc(self) -> &'static str {
        match self {
            Self::Slowdown => "Slowdown (with attackers)",
            Self::Bandwidth => "Aggregate Attackers B/W (MB/s)",
        }
    }

    fn bar_label(self, value: f64) -> String {
        match self {
            Self::Slowdown => format!("{value:.1}x"),
            Self::Bandwidth => format!("{value:.0}"),
        }
    }
}

/// Render `comparison` as a chart at `path`.
///
/// Fails if there is nothing to plot, a colour is not `#RRGGBB`, or the
/// backend cannot draw or write the file.
pub fn render_chart(
    path: &Path,
    benchmark: Benchmark,
    comparison: &Comparison,
    config: &ChartConfig,
) -> Result<()> {
    let groups = comparison.groups();
    if groups.is_empty() {
        return Err(AnalysisError::Render("no results to plot".into()));
    }

    let colors = [
        parse_color(&config.one_bank_color)?,
        parse_color(&config.all_banks_color)?,
    ];
    let size = figure_size(groups.len(), config)?;

    if is_svg(path) {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_figure(&root, benchmark, &groups, config, colors)?;
        root.present().map_err(render_error)
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_figure(&root, benchmark, &groups, config, colors)?;
        root.present().map_err(render_error)
    }
}

/// Pixel size of a figure with one row per comparison group.
fn figure_size(rows: usize, config: &ChartConfig) -> Result<(u32, u32)> {
    let rows =
        u32::try_from(rows).map_err(|_| AnalysisError::Render("too many chart rows".into()))?;
    Ok((
        config.width,
        TITLE_HEIGHT.saturating_add(config.row_height.saturating_mul(rows)),
    ))
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Parse a `#RRGGBB` colour.
fn parse_color(hex: &str) -> Result<RGBColor> {
    let invalid = || AnalysisError::Config(format!("invalid colour '{hex}' (expected #RRGGBB)"));
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

fn render_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> AnalysisError {
    AnalysisError::Render(err.to_string())
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    benchmark: Benchmark,
    groups: &[ComparisonGroup],
    config: &ChartConfig,
    colors: [RGBColor; 2],
) -> Result<()> {
    root.fill(&WHITE).map_err(render_error)?;
    let body = root
        .titled(
            benchmark.title(),
            ("sans-serif", 32).into_font().style(FontStyle::Bold),
        )
        .map_err(render_error)?;

    let cells = body.split_evenly((groups.len(), PANELS.len()));
    for (group, row) in groups.iter().zip(cells.chunks(PANELS.len())) {
        for (area, panel) in row.iter().zip(PANELS) {
            draw_panel(area, group, panel, config, colors)?;
        }
    }
    Ok(())
}

/// One bar of a panel, in chart coordinates.
#[derive(Debug, Clone, PartialEq)]
struct Bar {
    left: f64,
    right: f64,
    top: f64,
    label: Option<BarLabel>,
}

/// Value label above a bar, or just inside the top of a bar clipped at the
/// axis limit.
#[derive(Debug, Clone, PartialEq)]
struct BarLabel {
    text: String,
    at: (f64, f64),
    inside: bool,
}

/// Dashed horizontal line marking no slowdown.
#[derive(Debug, Clone, PartialEq)]
struct ReferenceLine {
    points: [(f64, f64); 2],
    dash: u32,
    gap: u32,
}

/// Everything a panel draws, computed without touching a backend.
#[derive(Debug, Clone, PartialEq)]
struct PanelLayout {
    ticks: Vec<String>,
    x_range: (f64, f64),
    y_max: f64,
    reference_line: Option<ReferenceLine>,
    series: Vec<(Configuration, Vec<Bar>)>,
}

#[allow(clippy::cast_precision_loss)]
fn panel_layout(group: &ComparisonGroup, panel: Panel, config: &ChartConfig) -> PanelLayout {
    let ticks: Vec<String> = group
        .rows
        .iter()
        .map(|row| match group.dimension {
            Some(_) => format!("Algo {}", row.key.label()),
            None => row.key.label(),
        })
        .collect();
    let x_range = (-0.5, ticks.len() as f64 - 0.5);
    let y_max = panel.y_max(config);

    let reference_line = match panel {
        Panel::Slowdown => Some(ReferenceLine {
            points: [(x_range.0, 1.0), (x_range.1, 1.0)],
            dash: 6,
            gap: 4,
        }),
        Panel::Bandwidth => None,
    };

    let offsets = [-BAR_WIDTH / 2.0, BAR_WIDTH / 2.0];
    let series = SIDES
        .into_iter()
        .zip(offsets)
        .map(|(side, offset)| {
            let bars = group
                .rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    let value = panel.value(row.side(side));
                    let center = i as f64 + offset;
                    let top = value.min(y_max);
                    // Zero bars (absent or measured zero) carry no label.
                    let label = (value > 0.0).then(|| BarLabel {
                        text: panel.bar_label(value),
                        at: (center, top),
                        inside: value > y_max,
                    });
                    Bar {
                        left: center - BAR_WIDTH / 2.0,
                        right: center + BAR_WIDTH / 2.0,
                        top,
                        label,
                    }
                })
                .collect();
            (side, bars)
        })
        .collect();

    PanelLayout {
        ticks,
        x_range,
        y_max,
        reference_line,
        series,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    group: &ComparisonGroup,
    panel: Panel,
    config: &ChartConfig,
    colors: [RGBColor; 2],
) -> Result<()> {
    let layout = panel_layout(group, panel, config);
    let (x_min, x_max) = layout.x_range;

    let mut chart = ChartBuilder::on(area)
        .caption(
            panel.caption(group),
            ("sans-serif", 20).into_font().style(FontStyle::Bold),
        )
        .margin(12)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, 0.0..layout.y_max)
        .map_err(render_error)?;

    // Only integer positions carry a test case label.
    let tick = |x: &f64| {
        let index = x.round();
        if (x - index).abs() > 1e-6 || index < 0.0 {
            return String::new();
        }
        layout.ticks.get(index as usize).cloned().unwrap_or_default()
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(layout.ticks.len())
        .x_label_formatter(&tick)
        .x_desc(group.axis_label())
        .y_desc(panel.y_desc())
        .light_line_style(WHITE)
        .bold_line_style(BLACK.mix(0.15))
        .draw()
        .map_err(render_error)?;

    if let Some(line) = &layout.reference_line {
        chart
            .draw_series(DashedLineSeries::new(
                line.points,
                line.dash,
                line.gap,
                RED.mix(0.5).stroke_width(1),
            ))
            .map_err(render_error)?;
    }

    let above =
        TextStyle::from(("sans-serif", 12).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));
    let inside = above.pos(Pos::new(HPos::Center, VPos::Top));

    for ((side, bars), color) in layout.series.iter().zip(colors) {
        chart
            .draw_series(bars.iter().map(|bar| {
                Rectangle::new(
                    [(bar.left, 0.0), (bar.right, bar.top)],
                    color.mix(0.8).filled(),
                )
            }))
            .map_err(render_error)?
            .label(side.label())
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled()));

        chart
            .draw_series(bars.iter().filter_map(|bar| bar.label.as_ref()).map(|label| {
                let style = if label.inside { &inside } else { &above };
                Text::new(label.text.clone(), label.at, style.clone())
            }))
            .map_err(render_error)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_error)?;

    Ok(())
}
