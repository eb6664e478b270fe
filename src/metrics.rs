// src/metrics.rs

use crate::error::{AnalysisError, Result};

/// 与输入逐项对齐的绝对误差和相对误差序列。
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorSeries {
    pub absolute: Vec<f64>,
    pub relative: Vec<f64>,
}

/// 计算单个相对误差。
///
/// 真值恰好为 0 时返回 `f64::INFINITY`，不做除法。
pub fn relative_error(true_value: f64, absolute_error: f64) -> f64 {
    if true_value == 0.0 {
        f64::INFINITY
    } else {
        absolute_error / true_value.abs()
    }
}

/// 逐项计算绝对误差 `|t - a|` 与相对误差 `|t - a| / |t|`。
///
/// # 参数
/// * `true_values` - 真值序列。
/// * `approx_values` - 近似值（测量值）序列，长度必须与 `true_values` 相同。
///
/// # 返回值
/// 与输入顺序一致的 `ErrorSeries`；长度不一致时返回 `AnalysisError::LengthMismatch`，
/// 不会截断或补零。
pub fn compute_errors(true_values: &[f64], approx_values: &[f64]) -> Result<ErrorSeries> {
    if true_values.len() != approx_values.len() {
        return Err(AnalysisError::LengthMismatch {
            expected: true_values.len(),
            actual: approx_values.len(),
        });
    }

    let mut absolute = Vec::with_capacity(true_values.len());
    let mut relative = Vec::with_capacity(true_values.len());
    for (&t, &a) in true_values.iter().zip(approx_values) {
        let ea = (t - a).abs();
        absolute.push(ea);
        relative.push(relative_error(t, ea));
    }

    Ok(ErrorSeries { absolute, relative })
}
