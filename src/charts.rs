// src/charts.rs

use crate::error::{AnalysisError, Result};
use crate::scenario::{Analysis, ScenarioKind};
use plotters::prelude::*;
use std::error::Error;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

type DrawResult = std::result::Result<(), Box<dyn Error>>;

const SCATTER_SIZE: (u32, u32) = (600, 400);
const STRIP_SIZE: (u32, u32) = (600, 300);

const GREY: RGBColor = RGBColor(128, 128, 128);
const TAB_BLUE: RGBColor = RGBColor(31, 119, 180);
const TAB_GREEN: RGBColor = RGBColor(44, 160, 44);
const TAB_RED: RGBColor = RGBColor(214, 39, 40);
const TAB_ORANGE: RGBColor = RGBColor(255, 127, 14);

/// 真值-测量值散点图（带 y = x 参考线）。
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
}

/// 目标平面上的着弹点投影。
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactChart {
    pub title: String,
    pub expected: Vec<f64>,
    pub measured: Vec<f64>,
}

/// 交互窗口中展示的那张图，与具体绘图后端无关。
#[derive(Debug, Clone, PartialEq)]
pub enum FeaturedChart {
    Scatter(ScatterChart),
    Impacts(ImpactChart),
}

/// 直方图中的一个区间 `[lo, hi)`，最后一个区间包含右端点。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// 把数据均匀分成 `bins` 个区间并计数。
///
/// 区间覆盖 `[min, max]`；所有值相等时以该值为中心取宽度为 1 的范围。
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi - lo < f64::EPSILON {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            lo: lo + width * i as f64,
            hi: lo + width * (i + 1) as f64,
            count: 0,
        })
        .collect();
    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

fn scatter_labels(kind: ScenarioKind) -> (&'static str, &'static str, &'static str) {
    match kind {
        ScenarioKind::AimAngle => (
            "True angle vs shot angle",
            "True angle (deg)",
            "Shot angle (deg)",
        ),
        ScenarioKind::ProjectileRange => (
            "Theoretical vs measured range",
            "Theoretical range (m)",
            "Measured range (m)",
        ),
        ScenarioKind::Sighting => (
            "True angle vs measured angle",
            "True angle (deg)",
            "Measured angle (deg)",
        ),
    }
}

/// 每个场景写出的三张图表的文件名，顺序与 [`render_charts`] 返回的路径一致。
pub fn file_names(kind: ScenarioKind) -> [&'static str; 3] {
    match kind {
        ScenarioKind::AimAngle => [
            "scatter_true_vs_shot.png",
            "error_by_shot.png",
            "hist_errors.png",
        ],
        ScenarioKind::ProjectileRange => [
            "scatter_range.png",
            "abs_error_by_shot.png",
            "hist_abs_errors.png",
        ],
        ScenarioKind::Sighting => [
            "angle_true_vs_meas.png",
            "abs_error_by_shot.png",
            "impacts_plane.png",
        ],
    }
}

pub fn scatter_chart(analysis: &Analysis) -> ScatterChart {
    let (title, x_label, y_label) = scatter_labels(analysis.kind);
    ScatterChart {
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        points: analysis
            .set
            .true_values()
            .into_iter()
            .zip(analysis.set.measured_values())
            .collect(),
    }
}

pub fn impact_chart(analysis: &Analysis) -> ImpactChart {
    let (expected, measured) = analysis.set.lateral_offsets().into_iter().unzip();
    ImpactChart {
        title: "Impacts on target (lateral projection)".to_string(),
        expected,
        measured,
    }
}

/// 瞄准系统场景展示着弹点投影，其余场景展示散点图。
pub fn featured_chart(analysis: &Analysis) -> FeaturedChart {
    match analysis.kind {
        ScenarioKind::Sighting => FeaturedChart::Impacts(impact_chart(analysis)),
        _ => FeaturedChart::Scatter(scatter_chart(analysis)),
    }
}

/// 绘制场景的三张图并写入 `out_dir`（不存在时自动创建）。
///
/// # 返回值
/// 按绘制顺序排列的图片路径。
pub fn render_charts(analysis: &Analysis, out_dir: &Path) -> Result<Vec<PathBuf>> {
    create_dir_all(out_dir)?;
    let names = file_names(analysis.kind);
    let paths: Vec<PathBuf> = names.iter().map(|n| out_dir.join(n)).collect();
    let unit = analysis.set.unit().symbol();
    let unit = if unit == "°" { "deg" } else { unit };
    let abs_errs = analysis.set.absolute_errors();

    let color = match analysis.kind {
        ScenarioKind::ProjectileRange => TAB_GREEN,
        _ => TAB_BLUE,
    };
    draw_scatter(&paths[0], &scatter_chart(analysis), color).map_err(chart_error)?;

    let line_color = match analysis.kind {
        ScenarioKind::ProjectileRange => TAB_RED,
        _ => TAB_BLUE,
    };
    draw_error_by_shot(&paths[1], &abs_errs, unit, line_color).map_err(chart_error)?;

    let third = match analysis.kind {
        ScenarioKind::AimAngle => draw_histogram(&paths[2], &abs_errs, 8, unit),
        ScenarioKind::ProjectileRange => draw_histogram(&paths[2], &abs_errs, 6, unit),
        ScenarioKind::Sighting => draw_impacts(&paths[2], &impact_chart(analysis)),
    };
    third.map_err(chart_error)?;

    for p in &paths {
        log::debug!("已写入 {}", p.display());
    }
    Ok(paths)
}

fn chart_error(e: Box<dyn Error>) -> AnalysisError {
    AnalysisError::Chart(e.to_string())
}

// 给坐标范围留出 5% 的边距，避免点落在边框上
fn padded(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    let pad = if span.abs() < 1e-9 { 1.0 } else { span * 0.05 };
    (lo - pad, hi + pad)
}

fn min_max(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

fn draw_scatter(path: &Path, chart: &ScatterChart, color: RGBColor) -> DrawResult {
    let (t_min, t_max) = min_max(chart.points.iter().map(|p| p.0));
    let (m_min, m_max) = min_max(chart.points.iter().map(|p| p.1));
    let (lo, hi) = padded(t_min.min(m_min), t_max.max(m_max));

    let root = BitMapBackend::new(path, SCATTER_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(lo..hi, lo..hi)?;

    ctx.configure_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .draw()?;

    ctx.draw_series(LineSeries::new(
        vec![(t_min, t_min), (t_max, t_max)],
        GREY.stroke_width(1),
    ))?;
    ctx.draw_series(
        chart
            .points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
    )?;

    root.present()?;
    Ok(())
}

fn draw_error_by_shot(
    path: &Path,
    abs_errs: &[f64],
    unit: &str,
    color: RGBColor,
) -> DrawResult {
    let n = abs_errs.len() as f64;
    let (_, e_max) = min_max(abs_errs.iter().copied());
    let y_hi = if e_max > 0.0 { e_max * 1.1 } else { 1.0 };
    let points: Vec<(f64, f64)> = abs_errs
        .iter()
        .enumerate()
        .map(|(i, &e)| ((i + 1) as f64, e))
        .collect();

    let root = BitMapBackend::new(path, STRIP_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut ctx = ChartBuilder::on(&root)
        .caption("Absolute error per shot", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.5..n + 0.5, 0.0..y_hi)?;

    ctx.configure_mesh()
        .x_desc("Shot #")
        .y_desc(format!("Absolute error ({unit})"))
        .draw()?;

    ctx.draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?;
    ctx.draw_series(points.iter().map(|&p| Circle::new(p, 4, color.filled())))?;

    root.present()?;
    Ok(())
}

fn draw_histogram(
    path: &Path,
    abs_errs: &[f64],
    bins: usize,
    unit: &str,
) -> DrawResult {
    let hist = histogram(abs_errs, bins);
    let x_lo = hist.first().map_or(0.0, |b| b.lo);
    let x_hi = hist.last().map_or(1.0, |b| b.hi);
    let y_hi = hist.iter().map(|b| b.count).max().unwrap_or(0) as f64 + 1.0;

    let root = BitMapBackend::new(path, STRIP_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut ctx = ChartBuilder::on(&root)
        .caption("Histogram of absolute errors", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, 0.0..y_hi)?;

    ctx.configure_mesh()
        .x_desc(format!("Absolute error ({unit})"))
        .y_desc("Frequency")
        .draw()?;

    ctx.draw_series(
        hist.iter()
            .map(|b| Rectangle::new([(b.lo, 0.0), (b.hi, b.count as f64)], TAB_ORANGE.filled())),
    )?;
    ctx.draw_series(
        hist.iter()
            .map(|b| Rectangle::new([(b.lo, 0.0), (b.hi, b.count as f64)], BLACK.stroke_width(1))),
    )?;

    root.present()?;
    Ok(())
}

fn draw_impacts(path: &Path, chart: &ImpactChart) -> DrawResult {
    let (lo, hi) = min_max(
        chart
            .expected
            .iter()
            .chain(&chart.measured)
            .copied()
            .chain(std::iter::once(0.0)),
    );
    let (lo, hi) = padded(lo, hi);

    let root = BitMapBackend::new(path, STRIP_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(20)
        .build_cartesian_2d(lo..hi, -1.0..1.0)?;

    ctx.configure_mesh()
        .disable_y_mesh()
        .y_labels(0)
        .x_desc("Lateral displacement (m)")
        .draw()?;

    ctx.draw_series(LineSeries::new(vec![(0.0, -1.0), (0.0, 1.0)], GREY.stroke_width(1)))?
        .label("Target (centre)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREY));
    ctx.draw_series(
        chart
            .expected
            .iter()
            .map(|&x| Cross::new((x, 0.0), 6, TAB_GREEN.stroke_width(2))),
    )?
    .label("Expected")
    .legend(|(x, y)| Cross::new((x + 10, y), 4, TAB_GREEN.stroke_width(2)));
    ctx.draw_series(
        chart
            .measured
            .iter()
            .map(|&x| Circle::new((x, 0.0), 4, TAB_RED.filled())),
    )?
    .label("Measured impacts")
    .legend(|(x, y)| Circle::new((x + 10, y), 4, TAB_RED.filled()));

    ctx.configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
