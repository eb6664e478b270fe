// src/scenario.rs

use crate::data_generator::{GaussianNoise, MeasurementSimulator, NoiseModel, NoiseSource};
use crate::error::Result;
use crate::observation::{ObservationSet, ShotDetail, Unit};
use crate::physics::{lateral_displacement, range_of, GRAVITY};
use crate::summary::Summary;

/// 火炮瞄准：真实角度 vs 射击角度。
#[derive(Debug, Clone, PartialEq)]
pub struct AimAngleConfig {
    /// 指向目标的真实角度 (°)。
    pub true_angles: Vec<f64>,
    pub bias: f64,
    pub sigma: f64,
    pub seed: u64,
}

impl Default for AimAngleConfig {
    fn default() -> Self {
        AimAngleConfig {
            true_angles: vec![
                45.0, 46.0, 44.5, 45.2, 45.8, 44.9, 46.4, 45.1, 45.5, 44.7, 46.2, 45.3,
            ],
            bias: 0.3,
            sigma: 1.2,
            seed: 42,
        }
    }
}

/// 弹丸落点：射手瞄准同一个仰角，角度误差经抛物线放大为射程误差。
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileConfig {
    /// 初速度 (m/s)。
    pub initial_speed: f64,
    /// 射手试图使用的仰角 (°)。
    pub nominal_angle: f64,
    pub shots: usize,
    pub bias: f64,
    pub sigma: f64,
    pub gravity: f64,
    pub seed: u64,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        ProjectileConfig {
            initial_speed: 200.0,
            nominal_angle: 30.0,
            shots: 10,
            bias: 0.0,
            sigma: 0.5,
            gravity: GRAVITY,
            seed: 1,
        }
    }
}

/// 狙击瞄准：小偏差角及其在远处目标平面上的横向偏移。
#[derive(Debug, Clone, PartialEq)]
pub struct SightingConfig {
    /// 目标距离 (m)。
    pub distance: f64,
    /// 真实偏差角 (°)，均不为 0。
    pub true_angles: Vec<f64>,
    pub bias: f64,
    pub sigma: f64,
    pub seed: u64,
}

impl Default for SightingConfig {
    fn default() -> Self {
        SightingConfig {
            distance: 250.0,
            true_angles: vec![1.5, 2.0, 1.8, 2.2, 1.7, 2.5, 1.9, 2.1, 2.3, 1.6, 2.4, 1.85],
            bias: -0.2,
            sigma: 0.6,
            seed: 123,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioKind {
    AimAngle,
    ProjectileRange,
    Sighting,
}

impl ScenarioKind {
    /// 用作输出目录名。
    pub fn slug(&self) -> &'static str {
        match self {
            ScenarioKind::AimAngle => "aim_angle",
            ScenarioKind::ProjectileRange => "projectile_range",
            ScenarioKind::Sighting => "sight_impacts",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ScenarioKind::AimAngle => "火炮瞄准误差分析",
            ScenarioKind::ProjectileRange => "弹丸射程误差分析",
            ScenarioKind::Sighting => "瞄准系统误差分析",
        }
    }
}

/// 一个可运行的场景及其全部参数。
#[derive(Debug, Clone, PartialEq)]
pub enum Scenario {
    AimAngle(AimAngleConfig),
    ProjectileRange(ProjectileConfig),
    Sighting(SightingConfig),
}

/// 一次场景运行的结果：观测集合及其汇总。
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub kind: ScenarioKind,
    pub set: ObservationSet,
    pub summary: Summary,
}

impl Scenario {
    pub fn aim_angle() -> Self {
        Scenario::AimAngle(AimAngleConfig::default())
    }

    pub fn projectile_range() -> Self {
        Scenario::ProjectileRange(ProjectileConfig::default())
    }

    pub fn sighting() -> Self {
        Scenario::Sighting(SightingConfig::default())
    }

    pub fn kind(&self) -> ScenarioKind {
        match self {
            Scenario::AimAngle(_) => ScenarioKind::AimAngle,
            Scenario::ProjectileRange(_) => ScenarioKind::ProjectileRange,
            Scenario::Sighting(_) => ScenarioKind::Sighting,
        }
    }

    pub fn seed(&self) -> u64 {
        match self {
            Scenario::AimAngle(c) => c.seed,
            Scenario::ProjectileRange(c) => c.seed,
            Scenario::Sighting(c) => c.seed,
        }
    }

    /// 替换场景的随机种子。
    pub fn with_seed(mut self, seed: u64) -> Self {
        match &mut self {
            Scenario::AimAngle(c) => c.seed = seed,
            Scenario::ProjectileRange(c) => c.seed = seed,
            Scenario::Sighting(c) => c.seed = seed,
        }
        self
    }

    pub fn noise_model(&self) -> Result<NoiseModel> {
        match self {
            Scenario::AimAngle(c) => NoiseModel::new(c.bias, c.sigma, c.seed),
            Scenario::ProjectileRange(c) => NoiseModel::new(c.bias, c.sigma, c.seed),
            Scenario::Sighting(c) => NoiseModel::new(c.bias, c.sigma, c.seed),
        }
    }

    /// 用场景自带的种子生成观测集合。
    pub fn observe(&self) -> Result<ObservationSet> {
        let model = self.noise_model()?;
        self.observe_with(GaussianNoise::seeded(model.seed()))
    }

    /// 用给定的噪声来源生成观测集合（测试中可注入固定序列）。
    ///
    /// # 参数
    /// * `noise` - 噪声来源，每个真值恰好消耗一次抽样。
    ///
    /// # 返回值
    /// 按射击顺序排列的 `ObservationSet`。
    pub fn observe_with<N: NoiseSource>(&self, noise: N) -> Result<ObservationSet> {
        let mut simulator = MeasurementSimulator::with_source(self.noise_model()?, noise);

        match self {
            Scenario::AimAngle(c) => {
                let measured = simulator.measure(&c.true_angles)?;
                ObservationSet::uniform(Unit::Degrees, &c.true_angles, &measured, ShotDetail::Angle)
            }
            Scenario::ProjectileRange(c) => {
                let true_angles = vec![c.nominal_angle; c.shots];
                let measured_angles = simulator.measure(&true_angles)?;

                let true_ranges: Vec<f64> = true_angles
                    .iter()
                    .map(|&a| range_of(c.initial_speed, a, c.gravity))
                    .collect();
                let measured_ranges: Vec<f64> = measured_angles
                    .iter()
                    .map(|&a| range_of(c.initial_speed, a, c.gravity))
                    .collect();
                let details: Vec<ShotDetail> = true_angles
                    .iter()
                    .zip(&measured_angles)
                    .map(|(&true_angle, &measured_angle)| ShotDetail::Range {
                        true_angle,
                        measured_angle,
                    })
                    .collect();

                ObservationSet::build(Unit::Meters, &true_ranges, &measured_ranges, &details)
            }
            Scenario::Sighting(c) => {
                let measured = simulator.measure(&c.true_angles)?;
                let details: Vec<ShotDetail> = c
                    .true_angles
                    .iter()
                    .zip(&measured)
                    .map(|(&t, &m)| ShotDetail::Lateral {
                        true_offset: lateral_displacement(t, c.distance),
                        measured_offset: lateral_displacement(m, c.distance),
                    })
                    .collect();

                ObservationSet::build(Unit::Degrees, &c.true_angles, &measured, &details)
            }
        }
    }

    /// 生成观测集合并计算汇总统计。
    pub fn analyze(&self) -> Result<Analysis> {
        let set = self.observe()?;
        let summary = Summary::of(&set);
        log::info!(
            "{}：{} 次射击，平均绝对误差 {:.4} {}",
            self.kind().title(),
            summary.count,
            summary.mean_absolute,
            set.unit().symbol()
        );
        Ok(Analysis {
            kind: self.kind(),
            set,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_distr::Normal;

    struct ZeroNoise;

    impl NoiseSource for ZeroNoise {
        fn gaussian(&mut self, _dist: &Normal<f64>) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_default_seeds_are_distinct() {
        let seeds = [
            Scenario::aim_angle().seed(),
            Scenario::projectile_range().seed(),
            Scenario::sighting().seed(),
        ];
        assert_eq!(seeds, [42, 1, 123]);
    }

    #[test]
    fn test_default_dataset_sizes() {
        assert_eq!(Scenario::aim_angle().observe().unwrap().len(), 12);
        assert_eq!(Scenario::projectile_range().observe().unwrap().len(), 10);
        assert_eq!(Scenario::sighting().observe().unwrap().len(), 12);
    }

    #[test]
    fn test_aim_angle_without_noise_is_pure_bias() {
        let set = Scenario::aim_angle().observe_with(ZeroNoise).unwrap();
        for o in set.observations() {
            assert!((o.absolute_error - 0.3).abs() < 1e-9);
            assert!((o.relative_error - 0.3 / o.true_value).abs() < 1e-12);
            assert_eq!(o.detail, ShotDetail::Angle);
        }
    }

    #[test]
    fn test_projectile_without_noise_has_zero_error() {
        let set = Scenario::projectile_range().observe_with(ZeroNoise).unwrap();
        assert_eq!(set.unit(), Unit::Meters);
        for o in set.observations() {
            assert!((o.true_value - range_of(200.0, 30.0, GRAVITY)).abs() < 1e-9);
            assert_eq!(o.absolute_error, 0.0);
            match o.detail {
                ShotDetail::Range {
                    true_angle,
                    measured_angle,
                } => {
                    assert_eq!(true_angle, 30.0);
                    assert_eq!(measured_angle, 30.0);
                }
                other => panic!("附加字段类型错误: {other:?}"),
            }
        }
    }

    #[test]
    fn test_projectile_range_uses_measured_angle() {
        let set = Scenario::projectile_range().observe().unwrap();
        for o in set.observations() {
            if let ShotDetail::Range { measured_angle, .. } = o.detail {
                assert!((o.measured_value - range_of(200.0, measured_angle, GRAVITY)).abs() < 1e-9);
            } else {
                panic!("附加字段类型错误");
            }
        }
    }

    #[test]
    fn test_sighting_offsets_follow_angles() {
        let set = Scenario::sighting().observe().unwrap();
        let offsets = set.lateral_offsets();
        assert_eq!(offsets.len(), 12);
        for (o, (lat_t, lat_m)) in set.observations().iter().zip(offsets) {
            assert!((lat_t - lateral_displacement(o.true_value, 250.0)).abs() < 1e-9);
            assert!((lat_m - lateral_displacement(o.measured_value, 250.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_with_seed_changes_measurements() {
        let a = Scenario::aim_angle().observe().unwrap();
        let b = Scenario::aim_angle().with_seed(43).observe().unwrap();
        assert_eq!(a.true_values(), b.true_values());
        assert_ne!(a.measured_values(), b.measured_values());
        assert_eq!(Scenario::sighting().with_seed(5).seed(), 5);
    }

    #[test]
    fn test_analyze_is_reproducible() {
        let a = Scenario::sighting().analyze().unwrap();
        let b = Scenario::sighting().analyze().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.kind, ScenarioKind::Sighting);
    }
}
