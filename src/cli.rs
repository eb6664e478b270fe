// src/cli.rs

use crate::charts::render_charts;
use crate::error::Result;
use crate::presentation::{present, select};
use crate::report::write_report;
use crate::scenario::{Analysis, Scenario, ScenarioKind};
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// 三个场景程序共用的命令行参数，均为可选。
#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(version, about = "射击测量误差模拟与分析")]
pub struct RunArgs {
    /// 写完图表和表格后，在窗口中展示重点图表
    #[arg(long)]
    pub gui: bool,

    /// 图表输出目录（默认 output/<场景名>）
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// 覆盖场景内置的随机种子
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn default_out_dir(kind: ScenarioKind) -> PathBuf {
    Path::new("output").join(kind.slug())
}

/// 初始化日志，级别由 `RUST_LOG` 控制，默认 `warn`。
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// 运行一个场景：生成观测 → 绘图 → 打印汇总与明细 → 展示。
///
/// 计算或绘图失败时立即返回错误，此时不会输出表格。
///
/// # 参数
/// * `scenario` - 要运行的场景。
/// * `args` - 命令行参数。
/// * `out` - 汇总表和诊断信息的输出位置。
pub fn run<W: Write>(scenario: Scenario, args: &RunArgs, out: &mut W) -> Result<Analysis> {
    let scenario = match args.seed {
        Some(seed) => scenario.with_seed(seed),
        None => scenario,
    };
    let analysis = scenario.analyze()?;

    let out_dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| default_out_dir(analysis.kind));
    let paths = render_charts(&analysis, &out_dir)?;
    log::info!("{} 张图表已写入 {}", paths.len(), out_dir.display());

    write_report(out, &analysis)?;
    present(select(args.gui).as_ref(), &analysis, out)?;
    Ok(analysis)
}

/// 场景程序的入口：解析参数、运行，出错时打印原因并以状态 1 退出。
pub fn main_for(scenario: Scenario) -> ExitCode {
    init_logging();
    let args = RunArgs::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match run(scenario, &args, &mut out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("错误: {e}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_is_valid() {
        let args = RunArgs::try_parse_from(["aim_angle"]).unwrap();
        assert_eq!(args, RunArgs::default());
    }

    #[test]
    fn test_all_flags() {
        let args =
            RunArgs::try_parse_from(["sight_impacts", "--gui", "--out-dir", "/tmp/x", "--seed", "7"])
                .unwrap();
        assert!(args.gui);
        assert_eq!(args.out_dir, Some(PathBuf::from("/tmp/x")));
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(RunArgs::try_parse_from(["aim_angle", "--verbose"]).is_err());
    }

    #[test]
    fn test_default_out_dir_is_scenario_specific() {
        assert_eq!(
            default_out_dir(ScenarioKind::ProjectileRange),
            PathBuf::from("output/projectile_range")
        );
        assert_ne!(
            default_out_dir(ScenarioKind::AimAngle),
            default_out_dir(ScenarioKind::Sighting)
        );
    }
}
