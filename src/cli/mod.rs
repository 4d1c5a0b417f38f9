//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `scatter`: 角度扫描（背散射能量、Compton 边）
//! - `escape`: 逃逸峰
//! - `proportions`: 相互作用比例
//! - `spectrum`: 理论能谱
//! - `irm`: 入射能量 - 相互作用能量图
//! - `report`: 多能量完整报告
//! - `materials`: 探测器材料表
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: common, compton, spectrum, irm, report, materials

pub mod common;
pub mod compton;
pub mod irm;
pub mod materials;
pub mod report;
pub mod spectrum;

use clap::{Parser, Subcommand};

/// comptonkit - Compton 散射计算工具
#[derive(Parser)]
#[command(name = "comptonkit")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Compton scattering calculator for gamma-ray spectroscopy", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Scattered photon/electron energy vs. angle, retrodiffusion and Compton front
    Scatter(compton::ScatterArgs),

    /// Single and double escape peak energies
    Escape(compton::EscapeArgs),

    /// Estimate photoelectric / Compton / pair production proportions
    Proportions(spectrum::ProportionsArgs),

    /// Build a theoretical spectrum with marked characteristic energies
    Spectrum(spectrum::SpectrumArgs),

    /// Map retrodiffusion, Compton front and proportions over incident energy
    Irm(irm::IrmArgs),

    /// Full report for one or more incident energies
    Report(report::ReportArgs),

    /// List the detector material table
    Materials(materials::MaterialsArgs),
}
