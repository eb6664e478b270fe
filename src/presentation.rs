// src/presentation.rs

use crate::error::{AnalysisError, Result};
use crate::scenario::{Analysis, ScenarioKind};
use std::io::Write;

/// 图表写盘、表格打印之后的展示步骤。
///
/// 核心计算不关心当前使用的是哪一种实现。
pub trait Presentation {
    fn name(&self) -> &'static str;

    fn show(&self, analysis: &Analysis) -> Result<()>;
}

/// 只写文件，不弹出窗口。
pub struct Headless;

impl Presentation for Headless {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn show(&self, _analysis: &Analysis) -> Result<()> {
        Ok(())
    }
}

/// 在窗口中展示重点图表和误差说明。
pub struct Interactive;

impl Presentation for Interactive {
    fn name(&self) -> &'static str {
        "interactive"
    }

    #[cfg(feature = "gui")]
    fn show(&self, analysis: &Analysis) -> Result<()> {
        crate::gui::show_window(
            analysis.kind.title(),
            crate::charts::featured_chart(analysis),
            window_caption(analysis),
        )
    }

    #[cfg(not(feature = "gui"))]
    fn show(&self, _analysis: &Analysis) -> Result<()> {
        Err(AnalysisError::WindowUnavailable(
            "编译时未启用 `gui` 特性".to_string(),
        ))
    }
}

/// 根据命令行参数选择展示方式。
pub fn select(gui: bool) -> Box<dyn Presentation> {
    if gui {
        Box::new(Interactive)
    } else {
        Box::new(Headless)
    }
}

/// 窗口底部的误差说明。火炮场景额外显示最大绝对误差。
pub fn window_caption(analysis: &Analysis) -> String {
    let unit = analysis.set.unit().symbol();
    let s = &analysis.summary;
    match analysis.kind {
        ScenarioKind::AimAngle => format!(
            "平均绝对误差: {:.4} {unit}\n最大: {:.4} {unit}",
            s.mean_absolute, s.max_absolute
        ),
        ScenarioKind::ProjectileRange => format!("平均绝对误差: {:.3} {unit}", s.mean_absolute),
        ScenarioKind::Sighting => format!("平均绝对误差: {:.4} {unit}", s.mean_absolute),
    }
}

/// 执行展示步骤。窗口不可用只输出一条诊断信息，不算失败。
pub fn present<W: Write>(
    presentation: &dyn Presentation,
    analysis: &Analysis,
    out: &mut W,
) -> Result<()> {
    log::debug!("展示方式: {}", presentation.name());
    match presentation.show(analysis) {
        Err(AnalysisError::WindowUnavailable(reason)) => {
            log::warn!("交互窗口不可用: {reason}");
            writeln!(out, "交互窗口不可用（{reason}），已跳过 GUI 展示。")?;
            Ok(())
        }
        other => other,
    }
}
