//! # proportions / spectrum 子命令 CLI 定义
//!
//! - `proportions`: 相互作用比例估算
//! - `spectrum`: 理论能谱
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/proportions.rs`, `commands/spectrum.rs`

use super::common::{parse_energy, MaterialArgs, OutputFormat, PlotSizeArgs};
use clap::Args;
use std::path::PathBuf;

/// proportions 子命令参数
#[derive(Args, Debug)]
pub struct ProportionsArgs {
    /// Photon energy (keV by default; eV/keV/MeV suffix accepted)
    #[arg(value_parser = parse_energy)]
    pub energy: f64,

    #[command(flatten)]
    pub material: MaterialArgs,

    /// Output file for the proportions (PNG/SVG bar chart or CSV data)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(flatten)]
    pub size: PlotSizeArgs,
}

/// spectrum 子命令参数
#[derive(Args, Debug)]
pub struct SpectrumArgs {
    /// Incident photon energy (keV by default; eV/keV/MeV suffix accepted)
    #[arg(value_parser = parse_energy)]
    pub energy: f64,

    #[command(flatten)]
    pub material: MaterialArgs,

    /// Number of energy bins between 0 and 1.2 x E0 [default: 1000]
    #[arg(long)]
    pub bins: Option<usize>,

    /// Output file for the spectrum (PNG/SVG plot or CSV data)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(flatten)]
    pub size: PlotSizeArgs,
}
