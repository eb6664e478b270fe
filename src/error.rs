// src/error.rs

use thiserror::Error;

/// 误差分析流程中可能出现的错误。
///
/// 计算类错误（输入非法、长度不一致）对本次运行是致命的；
/// `WindowUnavailable` 只在展示层内部使用，会被降级为诊断信息。
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// 真值序列与近似值序列长度不一致。
    #[error("序列长度不一致：真值 {expected} 个，近似值 {actual} 个")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("输入非法：{0}")]
    InvalidInput(String),

    #[error("图表绘制失败：{0}")]
    Chart(String),

    #[error("I/O 错误：{0}")]
    Io(#[from] std::io::Error),

    /// 交互窗口不可用（未启用 `gui` 特性，或运行环境没有显示设备）。
    #[error("交互窗口不可用：{0}")]
    WindowUnavailable(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
