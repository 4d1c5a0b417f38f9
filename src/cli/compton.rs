//! # scatter / escape 子命令 CLI 定义
//!
//! - `scatter`: 0° ~ 359° 角度扫描，给出背散射能量与 Compton 边
//! - `escape`: 单/双逃逸峰能量
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/scatter.rs`, `commands/escape.rs`

use super::common::{parse_energy, OutputFormat, PlotSizeArgs};
use clap::Args;
use std::path::PathBuf;

/// scatter 子命令参数
#[derive(Args, Debug)]
pub struct ScatterArgs {
    /// Incident photon energy (keV by default; eV/keV/MeV suffix accepted)
    #[arg(value_parser = parse_energy)]
    pub energy: f64,

    /// Angle step in degrees for the printed table
    #[arg(long, default_value_t = 30)]
    pub step: usize,

    /// Also report the scattered energy at this exact angle (degrees, any real value)
    #[arg(short, long, allow_negative_numbers = true)]
    pub angle: Option<f64>,

    /// Output file for the sweep curves (PNG/SVG plot or CSV data)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(flatten)]
    pub size: PlotSizeArgs,
}

/// escape 子命令参数
#[derive(Args, Debug)]
pub struct EscapeArgs {
    /// Incident photon energy (keV by default; eV/keV/MeV suffix accepted)
    #[arg(value_parser = parse_energy)]
    pub energy: f64,
}
