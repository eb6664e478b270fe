// src/data_generator.rs

use crate::error::{AnalysisError, Result};
use rand::prelude::*;
use rand_distr::{Distribution, Normal};

/// 测量噪声模型：系统偏差 + 零均值高斯噪声。
///
/// 构造后不可变。相同的真值序列 + 相同的噪声模型（含种子）总是得到相同的测量序列。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseModel {
    bias: f64,
    sigma: f64,
    seed: u64,
}

impl NoiseModel {
    /// # 参数
    /// * `bias` - 每次测量都叠加的固定偏差（校准误差）。
    /// * `sigma` - 高斯噪声的标准差，必须是有限的非负数。
    /// * `seed` - 伪随机数生成器的种子。
    pub fn new(bias: f64, sigma: f64, seed: u64) -> Result<Self> {
        if !bias.is_finite() {
            return Err(AnalysisError::InvalidInput(format!("偏差必须是有限值，实际为 {bias}")));
        }
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "标准差必须是有限的非负数，实际为 {sigma}"
            )));
        }
        Ok(NoiseModel { bias, sigma, seed })
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// 换一个种子，其余参数不变。
    pub fn with_seed(self, seed: u64) -> Self {
        NoiseModel { seed, ..self }
    }
}

/// 高斯噪声来源。
///
/// 每次调用 `gaussian` 恰好消耗一次抽样。生产代码使用 [`GaussianNoise`]，
/// 测试中可以换成返回固定序列的实现。
pub trait NoiseSource {
    /// 从给定的正态分布中抽取一个样本。
    fn gaussian(&mut self, dist: &Normal<f64>) -> f64;
}

/// 基于 `rand` 随机数生成器的高斯噪声来源。
pub struct GaussianNoise<R: Rng = StdRng> {
    rng: R,
}

impl GaussianNoise<StdRng> {
    /// 用固定种子构造，保证可复现。
    pub fn seeded(seed: u64) -> Self {
        GaussianNoise {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> GaussianNoise<R> {
    pub fn from_rng(rng: R) -> Self {
        GaussianNoise { rng }
    }
}

impl<R: Rng> NoiseSource for GaussianNoise<R> {
    fn gaussian(&mut self, dist: &Normal<f64>) -> f64 {
        dist.sample(&mut self.rng)
    }
}

/// 测量模拟器：持有一个噪声模型和它专属的噪声来源。
///
/// 随机数状态只属于这个模拟器，同一进程中的多个模拟器互不干扰。
pub struct MeasurementSimulator<N: NoiseSource = GaussianNoise> {
    model: NoiseModel,
    noise: N,
}

impl MeasurementSimulator<GaussianNoise> {
    /// 使用噪声模型自带的种子构造模拟器。
    pub fn seeded(model: NoiseModel) -> Self {
        MeasurementSimulator {
            model,
            noise: GaussianNoise::seeded(model.seed()),
        }
    }
}

impl<N: NoiseSource> MeasurementSimulator<N> {
    /// 使用外部提供的噪声来源构造模拟器（模型中的种子不再起作用）。
    pub fn with_source(model: NoiseModel, noise: N) -> Self {
        MeasurementSimulator { model, noise }
    }

    pub fn model(&self) -> &NoiseModel {
        &self.model
    }

    /// 为每个真值生成一个带噪声的测量值：`t + bias + n`，`n ~ N(0, sigma²)`。
    ///
    /// 按输入顺序逐个抽样，噪声来源恰好前进 `true_values.len()` 次。
    ///
    /// # 参数
    /// * `true_values` - 真值序列，不能为空。
    ///
    /// # 返回值
    /// 与输入一一对应的测量值向量。
    pub fn measure(&mut self, true_values: &[f64]) -> Result<Vec<f64>> {
        if true_values.is_empty() {
            return Err(AnalysisError::InvalidInput("真值序列为空".to_string()));
        }

        let bias = self.model.bias();
        let sigma = self.model.sigma();
        let dist = Normal::new(0.0, sigma)
            .map_err(|e| AnalysisError::InvalidInput(format!("噪声分布非法: {e}")))?;
        let measured = true_values
            .iter()
            .map(|&t| t + bias + self.noise.gaussian(&dist))
            .collect();
        log::debug!(
            "生成 {} 个测量值 (bias={bias}, sigma={sigma})",
            true_values.len()
        );
        Ok(measured)
    }
}

/// 一次性接口：按给定种子生成测量值序列。
///
/// 等价于 `MeasurementSimulator::seeded(NoiseModel::new(bias, sigma, rng_seed)?).measure(true_values)`。
pub fn simulate(true_values: &[f64], bias: f64, sigma: f64, rng_seed: u64) -> Result<Vec<f64>> {
    let model = NoiseModel::new(bias, sigma, rng_seed)?;
    MeasurementSimulator::seeded(model).measure(true_values)
}
