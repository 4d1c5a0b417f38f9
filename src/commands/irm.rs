//! # irm 子命令实现
//!
//! 在入射能量轴上批量计算背散射能量、Compton 边与相互作用比例，
//! 输出能量图或 CSV，并打印若干代表能量处的摘要。
//!
//! ## 依赖关系
//! - 使用 `cli/irm.rs` 定义的 IrmArgs
//! - 使用 `compton/irm.rs` 计算
//! - 使用 `batch/` 的线程池配置

use crate::batch::BatchRunner;
use crate::cli::common::OutputFormat;
use crate::cli::irm::IrmArgs;
use crate::commands::{guess_format_from_extension, plot_options, resolve_material};
use crate::compton::{self, export, plot, IrmPoint};
use crate::error::Result;
use crate::utils::output;

use tabled::{Table, Tabled};

/// 摘要表抽样的行数
const SUMMARY_ROWS: usize = 10;

#[derive(Tabled)]
struct IrmRow {
    #[tabled(rename = "E0 (keV)")]
    incident: String,
    #[tabled(rename = "Retro (keV)")]
    retro: String,
    #[tabled(rename = "Compton front (keV)")]
    front: String,
    #[tabled(rename = "Photo")]
    photo: String,
    #[tabled(rename = "Compton")]
    compton: String,
    #[tabled(rename = "Pair")]
    pair: String,
}

/// 执行 irm 命令
pub fn execute(args: IrmArgs) -> Result<()> {
    output::print_header("Incident vs. Interaction Energy Map");

    let (z, label) = resolve_material(&args.material)?;
    output::print_info(&format!("Material: {}", label));
    output::print_info(&format!(
        "Energy axis: {} samples up to {:.1} keV",
        args.samples, args.max_energy
    ));

    let runner = BatchRunner::new(args.jobs);
    let pool = runner.thread_pool()?;
    let points = pool.install(|| compton::interaction_energy_map(z, args.max_energy, args.samples))?;

    output::print_success(&format!("Computed {} samples", points.len()));

    print_summary(&points);

    let format = args
        .format
        .unwrap_or_else(|| guess_format_from_extension(&args.output));

    match format {
        OutputFormat::Png | OutputFormat::Svg => {
            plot::generate_irm_plot(&points, z, &args.output, plot_options(&args.size, format))?
        }
        OutputFormat::Csv => export::irm_to_csv(&points, &args.output)?,
    }

    output::print_success(&format!("Energy map saved to '{}'", args.output.display()));

    Ok(())
}

/// 打印等间距抽样的摘要
fn print_summary(points: &[IrmPoint]) {
    let stride = (points.len() / SUMMARY_ROWS).max(1);

    let rows: Vec<IrmRow> = points
        .iter()
        .skip(stride - 1)
        .step_by(stride)
        .map(|p| IrmRow {
            incident: format!("{:.1}", p.incident),
            retro: format!("{:.2}", p.retro),
            front: format!("{:.2}", p.compton_front),
            photo: format!("{:.2}", p.proportions.photoelectric),
            compton: format!("{:.2}", p.proportions.compton),
            pair: format!("{:.2}", p.proportions.pair_production),
        })
        .collect();

    println!("{}", Table::new(&rows));
}
