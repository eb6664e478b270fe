// src/report.rs

use crate::observation::{Observation, ShotDetail};
use crate::scenario::{Analysis, ScenarioKind};
use std::io::{self, Write};

/// 输出汇总信息和逐行明细表。
///
/// 表格顺序与观测集合一致；相对误差以百分比显示，真值为 0 时显示为 `inf`。
pub fn write_report<W: Write>(out: &mut W, analysis: &Analysis) -> io::Result<()> {
    let unit = analysis.set.unit().symbol();
    let s = &analysis.summary;
    let title = format!("误差汇总 - {}", analysis.kind.title());

    let header = header(analysis.kind);

    writeln!(out)?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(header.len()))?;
    writeln!(out, "射击次数: {}", s.count)?;
    writeln!(out, "平均绝对误差: {:.4} {unit}", s.mean_absolute)?;
    writeln!(out, "最大绝对误差: {:.4} {unit}", s.max_absolute)?;
    writeln!(out, "平均相对误差: {:.4} %", s.mean_relative_pct)?;
    writeln!(out)?;
    writeln!(out, "明细表（共 {} 行）:", analysis.set.len())?;
    writeln!(out, "{header}")?;
    for o in analysis.set.observations() {
        writeln!(out, "{}", row(o))?;
    }
    Ok(())
}

// 列标题与数据行使用相同的列宽，保证 `|` 对齐
fn header(kind: ScenarioKind) -> String {
    match kind {
        ScenarioKind::AimAngle => format!(
            "{:<2} | {:>12} | {:>12} | {:>12} | {:>11}",
            "i", "true(deg)", "shot(deg)", "abs_err(deg)", "rel_err(%)"
        ),
        ScenarioKind::ProjectileRange => format!(
            "{:<2} | {:>13} | {:>13} | {:>13} | {:>13} | {:>11} | {:>11}",
            "i", "ang_true(deg)", "ang_meas(deg)", "range_true(m)", "range_meas(m)", "abs_err(m)", "rel_err(%)"
        ),
        ScenarioKind::Sighting => format!(
            "{:<2} | {:>13} | {:>13} | {:>12} | {:>11} | {:>11} | {:>11}",
            "i", "ang_true(deg)", "ang_meas(deg)", "abs_err(deg)", "rel_err(%)", "lat_true(m)", "lat_meas(m)"
        ),
    }
}

fn row(o: &Observation) -> String {
    let pct = o.relative_error * 100.0;
    match o.detail {
        ShotDetail::Angle => format!(
            "{:2} | {:12.4} | {:12.4} | {:12.4} | {:11.4}",
            o.index, o.true_value, o.measured_value, o.absolute_error, pct
        ),
        ShotDetail::Range {
            true_angle,
            measured_angle,
        } => format!(
            "{:2} | {:13.3} | {:13.3} | {:13.3} | {:13.3} | {:11.3} | {:11.4}",
            o.index,
            true_angle,
            measured_angle,
            o.true_value,
            o.measured_value,
            o.absolute_error,
            pct
        ),
        ShotDetail::Lateral {
            true_offset,
            measured_offset,
        } => format!(
            "{:2} | {:13.3} | {:13.3} | {:12.4} | {:11.4} | {:11.3} | {:11.3}",
            o.index,
            o.true_value,
            o.measured_value,
            o.absolute_error,
            pct,
            true_offset,
            measured_offset
        ),
    }
}
