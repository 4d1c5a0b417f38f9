//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑：调用 `compton/` 计算，
//! 再决定打印、绘图或导出。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `compton/`, `models/`, `utils/`
//! - 子模块: scatter, escape, proportions, spectrum, irm, report, materials

pub mod escape;
pub mod irm;
pub mod materials;
pub mod proportions;
pub mod report;
pub mod scatter;
pub mod spectrum;

use crate::cli::common::{MaterialArgs, OutputFormat, PlotSizeArgs};
use crate::cli::Commands;
use crate::compton::plot::PlotOptions;
use crate::compton::{self, ProportionSet, SpectrumCurve};
use crate::error::Result;
use crate::models::MaterialTable;
use crate::utils::output;

use std::path::Path;

/// 未指定材料时使用的参考原子序数（HPGe）
pub const DEFAULT_Z: f64 = 32.0;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Scatter(args) => scatter::execute(args),
        Commands::Escape(args) => escape::execute(args),
        Commands::Proportions(args) => proportions::execute(args),
        Commands::Spectrum(args) => spectrum::execute(args),
        Commands::Irm(args) => irm::execute(args),
        Commands::Report(args) => report::execute(args),
        Commands::Materials(args) => materials::execute(args),
    }
}

/// 加载材料表：优先使用自定义 CSV，否则使用内置表
pub(crate) fn load_material_table(path: Option<&Path>) -> Result<MaterialTable> {
    match path {
        Some(p) => {
            let table = MaterialTable::from_csv(p)?;
            output::print_info(&format!(
                "Loaded {} materials from '{}'",
                table.len(),
                p.display()
            ));
            Ok(table)
        }
        None => Ok(MaterialTable::builtin()),
    }
}

/// 解析吸收材料，返回 (Z, 描述)
pub(crate) fn resolve_material(args: &MaterialArgs) -> Result<(f64, String)> {
    if let Some(z) = args.z {
        return Ok((z, format!("Z = {}", z)));
    }

    if let Some(ref name) = args.material {
        let table = load_material_table(args.materials.as_deref())?;
        let material = table.lookup(name)?;
        return Ok((
            material.z,
            format!("{} ({}, Z = {})", material.name, material.category, material.z),
        ));
    }

    Ok((DEFAULT_Z, format!("Z = {} (default, HPGe)", DEFAULT_Z)))
}

/// 合成理论能谱，未指定格点数时使用默认格点
pub(crate) fn build_spectrum(
    e0: f64,
    proportions: &ProportionSet,
    bins: Option<usize>,
) -> Result<SpectrumCurve> {
    match bins {
        Some(n) => compton::synthesize_with_bins(e0, proportions, n),
        None => compton::synthesize(e0, proportions),
    }
}

/// 从文件扩展名推断输出格式
pub(crate) fn guess_format_from_extension(path: &Path) -> OutputFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("svg") => OutputFormat::Svg,
        Some("csv") | Some("dat") | Some("txt") => OutputFormat::Csv,
        _ => OutputFormat::Png,
    }
}

/// 组合图像尺寸与格式
pub(crate) fn plot_options(size: &PlotSizeArgs, format: OutputFormat) -> PlotOptions {
    PlotOptions {
        width: size.width,
        height: size.height,
        use_svg: format == OutputFormat::Svg,
    }
}
