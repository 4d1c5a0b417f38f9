//! # report 子命令 CLI 定义
//!
//! 对一个或多个入射能量执行完整流程：几何效率、角度扫描、
//! 相互作用比例、理论能谱，并输出汇总表和图表。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/report.rs`

use super::common::{parse_energy, MaterialArgs, OutputFormat, PlotSizeArgs};
use clap::Args;
use std::path::PathBuf;

/// report 子命令参数
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Incident photon energies, comma separated (e.g., "59,300,1333" or "662keV,1.17MeV")
    #[arg(value_parser = parse_energy, value_delimiter = ',', required = true)]
    pub energies: Vec<f64>,

    #[command(flatten)]
    pub material: MaterialArgs,

    /// Detector surface in m²
    #[arg(long, default_value_t = 1.0)]
    pub surface: f64,

    /// Distance between source and detector in m
    #[arg(long, default_value_t = 2.0)]
    pub distance: f64,

    /// Number of energy bins for the theoretical spectrum [default: 1000]
    #[arg(long)]
    pub bins: Option<usize>,

    /// Output directory for per-energy plots/data
    #[arg(short, long, default_value = "compton_report")]
    pub output: PathBuf,

    /// Output format for per-energy files
    #[arg(short, long, value_enum, default_value = "png")]
    pub format: OutputFormat,

    /// Skip writing plots/data, print the summary only
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    #[command(flatten)]
    pub size: PlotSizeArgs,
}
