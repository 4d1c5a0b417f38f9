//! # irm 子命令 CLI 定义
//!
//! 入射能量 - 相互作用能量图。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/irm.rs`

use super::common::{parse_energy, MaterialArgs, OutputFormat, PlotSizeArgs};
use crate::compton::irm::{DEFAULT_MAX_ENERGY_KEV, DEFAULT_SAMPLES};
use clap::Args;
use std::path::PathBuf;

/// irm 子命令参数
#[derive(Args, Debug)]
pub struct IrmArgs {
    #[command(flatten)]
    pub material: MaterialArgs,

    /// Upper end of the incident energy axis
    #[arg(long, value_parser = parse_energy, default_value_t = DEFAULT_MAX_ENERGY_KEV)]
    pub max_energy: f64,

    /// Number of samples on the incident energy axis
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    pub samples: usize,

    /// Output file (PNG/SVG plot or CSV data)
    #[arg(short, long, default_value = "irm.png")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    #[command(flatten)]
    pub size: PlotSizeArgs,
}
