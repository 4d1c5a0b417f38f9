//! # report 子命令实现
//!
//! 对一组入射能量执行完整流程，对应典型的放射源分析：
//! 1. 几何效率（探测器面积、源距离）
//! 2. 角度扫描 → 背散射能量、Compton 边
//! 3. 相互作用比例
//! 4. 理论能谱
//!
//! 各能量并行计算，每个能量输出扫描图、比例图和能谱图（或 CSV），
//! 最后打印汇总表。
//!
//! ## 依赖关系
//! - 使用 `cli/report.rs` 定义的 ReportArgs
//! - 使用 `batch/` 模块并行处理
//! - 使用 `compton/` 模块计算、绘图与导出

use crate::batch::{BatchResult, BatchRunner, ProcessResult};
use crate::cli::common::OutputFormat;
use crate::cli::report::ReportArgs;
use crate::commands::{build_spectrum, plot_options, resolve_material};
use crate::compton::plot::PlotOptions;
use crate::compton::{self, export, plot, EscapePeaks, ProportionSet};
use crate::error::{ComptonError, Result};
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 单个入射能量的计算摘要
#[derive(Debug, Clone)]
struct EnergySummary {
    energy: f64,
    retro: f64,
    compton_front: f64,
    escape: EscapePeaks,
    proportions: ProportionSet,
    written: Vec<PathBuf>,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "E0 (keV)")]
    energy: String,
    #[tabled(rename = "Retro (keV)")]
    retro: String,
    #[tabled(rename = "Compton front (keV)")]
    front: String,
    #[tabled(rename = "Single esc. (keV)")]
    single: String,
    #[tabled(rename = "Double esc. (keV)")]
    double: String,
    #[tabled(rename = "Photo")]
    photo: String,
    #[tabled(rename = "Compton")]
    compton: String,
    #[tabled(rename = "Pair")]
    pair: String,
}

/// 批量任务的共享配置
struct ReportConfig {
    z: f64,
    bins: Option<usize>,
    output_dir: PathBuf,
    format: OutputFormat,
    plot: PlotOptions,
    write_files: bool,
    overwrite: bool,
}

/// 执行 report 命令
pub fn execute(args: ReportArgs) -> Result<()> {
    output::print_header("Compton Spectrum Report");

    let (z, label) = resolve_material(&args.material)?;
    output::print_info(&format!("Material: {}", label));

    let efficiency = compton::geometric_efficiency(args.surface, args.distance)?;
    output::print_info(&format!(
        "Geometric efficiency is {:.2} % (S = {} m², d = {} m)",
        efficiency * 100.0,
        args.surface,
        args.distance
    ));

    if !args.no_plot {
        fs::create_dir_all(&args.output).map_err(|e| ComptonError::FileWriteError {
            path: args.output.display().to_string(),
            source: e,
        })?;
    }

    let config = ReportConfig {
        z,
        bins: args.bins,
        output_dir: args.output.clone(),
        format: args.format,
        plot: plot_options(&args.size, args.format),
        write_files: !args.no_plot,
        overwrite: args.overwrite,
    };

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!(
        "Processing {} incident energies on {} threads",
        args.energies.len(),
        runner.jobs()
    ));

    let result = runner.run(&args.energies, |energy| process_energy(*energy, &config))?;

    print_summary_table(&result.outputs);

    output::print_separator();
    output::print_success(&format!(
        "Report complete: {} energies ({} success, {} skipped, {} failed)",
        result.total(),
        result.success,
        result.skipped,
        result.failed
    ));

    if config.write_files {
        let written: usize = result.outputs.iter().map(|s| s.written.len()).sum();
        output::print_info(&format!(
            "{} files written to '{}'",
            written,
            config.output_dir.display()
        ));
    }

    for reason in &result.skip_reasons {
        output::print_skip(reason);
    }

    if !result.failures.is_empty() {
        output::print_warning("Failed energies:");
        for (energy, err) in &result.failures {
            output::print_error(&format!("  {} keV: {}", energy, err));
        }
    }

    check_outcome(&result)
}

/// 所有能量都失败时返回错误
fn check_outcome(result: &BatchResult<EnergySummary>) -> Result<()> {
    if result.total() > 0 && result.success + result.skipped == 0 {
        let reasons: Vec<String> = result
            .failures
            .iter()
            .map(|(energy, err)| format!("{} keV: {}", energy, err))
            .collect();
        return Err(ComptonError::Other(format!(
            "All {} energies failed ({})",
            result.total(),
            reasons.join("; ")
        )));
    }
    Ok(())
}

/// 处理单个入射能量
fn process_energy(energy: f64, config: &ReportConfig) -> ProcessResult<EnergySummary> {
    match compute_and_write(energy, config) {
        Ok((summary, skipped)) => {
            if config.write_files && summary.written.is_empty() && skipped > 0 {
                ProcessResult::Skipped(
                    summary,
                    format!("{} keV: all outputs exist (use --overwrite)", energy),
                )
            } else {
                ProcessResult::Success(summary)
            }
        }
        Err(e) => ProcessResult::Failed(energy.to_string(), e.to_string()),
    }
}

/// 计算并写出文件，返回 (摘要, 跳过的文件数)
fn compute_and_write(energy: f64, config: &ReportConfig) -> Result<(EnergySummary, usize)> {
    let sweep = compton::sweep(energy)?;
    let proportions = compton::estimate_proportions(energy, config.z)?;
    let curve = build_spectrum(energy, &proportions, config.bins)?;

    let mut summary = EnergySummary {
        energy,
        retro: sweep.retro,
        compton_front: sweep.compton_front,
        escape: compton::escape_peaks(energy),
        proportions,
        written: Vec::new(),
    };

    if !config.write_files {
        return Ok((summary, 0));
    }

    let tag = energy_tag(energy);
    let ext = config.format.extension();
    let mut skipped = 0;

    let sweep_path = config.output_dir.join(format!("{}_sweep.{}", tag, ext));
    if should_write(&sweep_path, config.overwrite) {
        match config.format {
            OutputFormat::Png | OutputFormat::Svg => {
                plot::generate_sweep_plot(&sweep, &sweep_path, config.plot)?
            }
            OutputFormat::Csv => export::sweep_to_csv(&sweep, &sweep_path)?,
        }
        summary.written.push(sweep_path);
    } else {
        skipped += 1;
    }

    let proportions_path = config.output_dir.join(format!("{}_proportions.{}", tag, ext));
    if should_write(&proportions_path, config.overwrite) {
        match config.format {
            OutputFormat::Png | OutputFormat::Svg => plot::generate_proportions_plot(
                &proportions,
                energy,
                config.z,
                &proportions_path,
                config.plot,
            )?,
            OutputFormat::Csv => export::proportions_to_csv(&proportions, &proportions_path)?,
        }
        summary.written.push(proportions_path);
    } else {
        skipped += 1;
    }

    let spectrum_path = config.output_dir.join(format!("{}_spectrum.{}", tag, ext));
    if should_write(&spectrum_path, config.overwrite) {
        match config.format {
            OutputFormat::Png | OutputFormat::Svg => {
                plot::generate_spectrum_plot(&curve, &spectrum_path, config.plot)?
            }
            OutputFormat::Csv => export::spectrum_to_csv(&curve, &spectrum_path)?,
        }
        summary.written.push(spectrum_path);
    } else {
        skipped += 1;
    }

    Ok((summary, skipped))
}

fn should_write(path: &Path, overwrite: bool) -> bool {
    overwrite || !path.exists()
}

/// 文件名中的能量标签，如 1173.2 keV → "1173p2keV"
fn energy_tag(energy: f64) -> String {
    format!("{}keV", energy).replace('.', "p")
}

/// 打印汇总表（非物理的逃逸峰显示为 "-"）
fn print_summary_table(summaries: &[EnergySummary]) {
    let rows: Vec<SummaryRow> = summaries
        .iter()
        .map(|s| SummaryRow {
            energy: format!("{:.2}", s.energy),
            retro: format!("{:.2}", s.retro),
            front: format!("{:.2}", s.compton_front),
            single: if s.escape.single_is_physical() {
                format!("{:.2}", s.escape.single)
            } else {
                "-".to_string()
            },
            double: if s.escape.double_is_physical() {
                format!("{:.2}", s.escape.double)
            } else {
                "-".to_string()
            },
            photo: format!("{:.2}", s.proportions.photoelectric),
            compton: format!("{:.2}", s.proportions.compton),
            pair: format!("{:.2}", s.proportions.pair_production),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header(&format!("Summary of {} incident energies", rows.len()));
        println!("{}", Table::new(&rows));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: PathBuf, write_files: bool) -> ReportConfig {
        ReportConfig {
            z: 32.0,
            bins: None,
            output_dir: dir,
            format: OutputFormat::Csv,
            plot: PlotOptions::default(),
            write_files,
            overwrite: false,
        }
    }

    #[test]
    fn test_energy_tag() {
        assert_eq!(energy_tag(662.0), "662keV");
        assert_eq!(energy_tag(1173.2), "1173p2keV");
    }

    #[test]
    fn test_summary_only() {
        let cfg = config(std::env::temp_dir(), false);
        match process_energy(1333.0, &cfg) {
            ProcessResult::Success(s) => {
                assert!((s.retro - 214.40).abs() < 0.01);
                assert!(s.written.is_empty());
                assert!(s.proportions.pair_production > 0.0);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_energy_fails() {
        let cfg = config(std::env::temp_dir(), false);
        assert!(matches!(
            process_energy(-1.0, &cfg),
            ProcessResult::Failed(_, _)
        ));
    }

    #[test]
    fn test_all_failed_is_error() {
        let cfg = config(std::env::temp_dir(), false);

        let mut result = BatchResult::default();
        result.merge(process_energy(-1.0, &cfg));
        result.merge(process_energy(0.0, &cfg));
        assert!(matches!(
            check_outcome(&result),
            Err(ComptonError::Other(_))
        ));

        result.merge(process_energy(662.0, &cfg));
        assert!(check_outcome(&result).is_ok());
        assert!(check_outcome(&BatchResult::default()).is_ok());
    }

    #[test]
    fn test_csv_outputs_then_skip() {
        let dir = std::env::temp_dir().join(format!("comptonkit_report_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let cfg = config(dir.clone(), true);

        match process_energy(59.0, &cfg) {
            ProcessResult::Success(s) => assert_eq!(s.written.len(), 3),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(dir.join("59keV_sweep.csv").exists());
        assert!(dir.join("59keV_proportions.csv").exists());
        assert!(dir.join("59keV_spectrum.csv").exists());

        // 第二次运行不覆盖
        assert!(matches!(
            process_energy(59.0, &cfg),
            ProcessResult::Skipped(_, _)
        ));

        fs::remove_dir_all(&dir).ok();
    }
}
