// src/summary.rs

use crate::observation::ObservationSet;
use nalgebra::DVector;

/// 观测集合的汇总统计。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean_absolute: f64,
    pub max_absolute: f64,
    /// 平均相对误差，已乘以 100（百分比）。任何一个相对误差为无穷大时，这里也是无穷大。
    pub mean_relative_pct: f64,
}

impl Summary {
    /// 在整个观测集合上计算算术平均值与最大值。观测集合保证非空。
    pub fn of(set: &ObservationSet) -> Self {
        let abs = DVector::from_vec(set.absolute_errors());
        let rel = DVector::from_vec(set.relative_errors());
        Summary {
            count: set.len(),
            mean_absolute: abs.mean(),
            max_absolute: abs.max(),
            mean_relative_pct: rel.mean() * 100.0,
        }
    }
}
