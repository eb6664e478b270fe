// src/observation.rs

use crate::error::{AnalysisError, Result};
use crate::metrics::compute_errors;

/// 真值与测量值所用的单位。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Degrees,
    Meters,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Degrees => "°",
            Unit::Meters => "m",
        }
    }
}

/// 每个场景特有的附加字段。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotDetail {
    /// 只比较角度本身。
    Angle,
    /// 误差作用于射程；保留产生射程的两个角度 (°)。
    Range { true_angle: f64, measured_angle: f64 },
    /// 误差作用于角度；保留目标平面上的横向偏移 (m)。
    Lateral {
        true_offset: f64,
        measured_offset: f64,
    },
}

/// 一次射击的观测记录。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// 从 1 开始的序号。
    pub index: usize,
    pub true_value: f64,
    pub measured_value: f64,
    pub absolute_error: f64,
    /// 真值为 0 时为 `f64::INFINITY`。
    pub relative_error: f64,
    pub detail: ShotDetail,
}

/// 同一噪声模型、同一推导公式下的一组有序观测。构造后只读。
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSet {
    unit: Unit,
    observations: Vec<Observation>,
}

impl ObservationSet {
    /// 由真值、测量值和逐项附加信息构造观测集合。
    ///
    /// # 参数
    /// * `unit` - `true_values` / `measured_values` 的单位。
    /// * `true_values` - 真值序列，不能为空。
    /// * `measured_values` - 测量值序列，长度必须与真值相同。
    /// * `details` - 每个观测的附加字段，长度必须与真值相同。
    ///
    /// # 返回值
    /// 序号从 1 开始、顺序与输入一致的 `ObservationSet`。
    pub fn build(
        unit: Unit,
        true_values: &[f64],
        measured_values: &[f64],
        details: &[ShotDetail],
    ) -> Result<Self> {
        if true_values.is_empty() {
            return Err(AnalysisError::InvalidInput("观测集合不能为空".to_string()));
        }
        if details.len() != true_values.len() {
            return Err(AnalysisError::LengthMismatch {
                expected: true_values.len(),
                actual: details.len(),
            });
        }
        let errors = compute_errors(true_values, measured_values)?;

        let observations = true_values
            .iter()
            .zip(measured_values)
            .zip(errors.absolute.iter().zip(&errors.relative))
            .zip(details)
            .enumerate()
            .map(|(i, (((&t, &m), (&ea, &er)), &detail))| Observation {
                index: i + 1,
                true_value: t,
                measured_value: m,
                absolute_error: ea,
                relative_error: er,
                detail,
            })
            .collect();

        Ok(ObservationSet { unit, observations })
    }

    /// 所有观测都使用同一种附加字段时的简便写法。
    pub fn uniform(
        unit: Unit,
        true_values: &[f64],
        measured_values: &[f64],
        detail: ShotDetail,
    ) -> Result<Self> {
        let details = vec![detail; true_values.len()];
        Self::build(unit, true_values, measured_values, &details)
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn true_values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.true_value).collect()
    }

    pub fn measured_values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.measured_value).collect()
    }

    pub fn absolute_errors(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.absolute_error).collect()
    }

    pub fn relative_errors(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.relative_error).collect()
    }

    /// 横向偏移（期望, 实测），只有瞄准场景的观测才有。
    pub fn lateral_offsets(&self) -> Vec<(f64, f64)> {
        self.observations
            .iter()
            .filter_map(|o| match o.detail {
                ShotDetail::Lateral {
                    true_offset,
                    measured_offset,
                } => Some((true_offset, measured_offset)),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_assigns_sequential_indices() {
        let set = ObservationSet::uniform(
            Unit::Degrees,
            &[45.0, 46.0, 44.5],
            &[46.0, 44.0, 44.5],
            ShotDetail::Angle,
        )
        .unwrap();
        let idx: Vec<_> = set.observations().iter().map(|o| o.index).collect();
        assert_eq!(idx, vec![1, 2, 3]);
        assert_eq!(set.absolute_errors(), vec![1.0, 2.0, 0.0]);
        assert_eq!(set.true_values(), vec![45.0, 46.0, 44.5]);
        assert_eq!(set.measured_values(), vec![46.0, 44.0, 44.5]);
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_build_rejects_empty_and_mismatched() {
        assert!(ObservationSet::uniform(Unit::Meters, &[], &[], ShotDetail::Angle).is_err());
        assert!(matches!(
            ObservationSet::uniform(Unit::Meters, &[1.0, 2.0], &[1.0], ShotDetail::Angle),
            Err(AnalysisError::LengthMismatch { .. })
        ));
        assert!(matches!(
            ObservationSet::build(Unit::Meters, &[1.0, 2.0], &[1.0, 2.0], &[ShotDetail::Angle]),
            Err(AnalysisError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_lateral_offsets_follow_detail() {
        let details = [
            ShotDetail::Lateral {
                true_offset: 1.0,
                measured_offset: 2.0,
            },
            ShotDetail::Lateral {
                true_offset: 3.0,
                measured_offset: 4.0,
            },
        ];
        let set = ObservationSet::build(Unit::Degrees, &[1.0, 2.0], &[1.1, 2.2], &details).unwrap();
        assert_eq!(set.lateral_offsets(), vec![(1.0, 2.0), (3.0, 4.0)]);
        assert_eq!(set.unit().symbol(), "°");
    }
}
