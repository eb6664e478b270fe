// src/gui.rs

use crate::charts::{FeaturedChart, ImpactChart, ScatterChart};
use crate::error::{AnalysisError, Result};
use eframe::egui::{self, Color32};
use egui_plot::{Legend, Line, LineStyle, MarkerShape, Plot, PlotPoints, Points, VLine};

struct ChartWindow {
    chart: FeaturedChart,
    caption: String,
}

impl eframe::App for ChartWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("stats").show(ctx, |ui| {
            ui.label(self.caption.as_str());
        });
        egui::CentralPanel::default().show(ctx, |ui| match &self.chart {
            FeaturedChart::Scatter(c) => scatter_plot(ui, c),
            FeaturedChart::Impacts(c) => impact_plot(ui, c),
        });
    }
}

fn scatter_plot(ui: &mut egui::Ui, chart: &ScatterChart) {
    let t_min = chart.points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let t_max = chart.points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let shots: Vec<[f64; 2]> = chart.points.iter().map(|&(x, y)| [x, y]).collect();

    ui.heading(chart.title.as_str());
    Plot::new("scatter")
        .legend(Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new("y = x", PlotPoints::new(vec![[t_min, t_min], [t_max, t_max]]))
                    .style(LineStyle::dashed_loose())
                    .color(Color32::GRAY),
            );
            plot_ui.points(
                Points::new("shots", PlotPoints::new(shots))
                    .shape(MarkerShape::Circle)
                    .radius(4.0)
                    .color(Color32::from_rgb(31, 119, 180)),
            );
        });
}

fn impact_plot(ui: &mut egui::Ui, chart: &ImpactChart) {
    let expected: Vec<[f64; 2]> = chart.expected.iter().map(|&x| [x, 0.0]).collect();
    let measured: Vec<[f64; 2]> = chart.measured.iter().map(|&x| [x, 0.0]).collect();

    ui.heading(chart.title.as_str());
    Plot::new("impacts")
        .legend(Legend::default())
        .show_axes([true, false])
        .x_axis_label("Lateral displacement (m)")
        .show(ui, |plot_ui| {
            plot_ui.vline(
                VLine::new("Target (centre)", 0.0)
                    .style(LineStyle::dashed_loose())
                    .color(Color32::GRAY),
            );
            plot_ui.points(
                Points::new("Expected", PlotPoints::new(expected))
                    .shape(MarkerShape::Cross)
                    .radius(6.0)
                    .color(Color32::DARK_GREEN),
            );
            plot_ui.points(
                Points::new("Impacts", PlotPoints::new(measured))
                    .shape(MarkerShape::Circle)
                    .radius(4.0)
                    .color(Color32::RED),
            );
        });
}

/// 打开窗口并阻塞直到用户关闭。无法创建窗口时返回 `WindowUnavailable`。
pub fn show_window(title: &str, chart: FeaturedChart, caption: String) -> Result<()> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        title,
        options,
        Box::new(move |_cc| Ok(Box::new(ChartWindow { chart, caption }))),
    )
    .map_err(|e| AnalysisError::WindowUnavailable(e.to_string()))
}
