//! # spectrum 子命令实现
//!
//! 合成理论能谱，打印被标记的特征线，可选输出能谱图或 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/spectrum.rs` 定义的 SpectrumArgs
//! - 使用 `compton/proportions.rs`, `compton/spectrum.rs`

use crate::cli::common::OutputFormat;
use crate::cli::spectrum::SpectrumArgs;
use crate::commands::{build_spectrum, guess_format_from_extension, plot_options, resolve_material};
use crate::compton::{self, export, plot, SpectrumCurve};
use crate::error::Result;
use crate::utils::output;

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "Feature")]
    feature: String,
    #[tabled(rename = "Energy (keV)")]
    energy: String,
    #[tabled(rename = "Bin")]
    bin: usize,
    #[tabled(rename = "Bin energy (keV)")]
    bin_energy: String,
}

/// 执行 spectrum 命令
pub fn execute(args: SpectrumArgs) -> Result<()> {
    output::print_header("Theoretical Spectrum");

    let (z, label) = resolve_material(&args.material)?;
    output::print_info(&format!("Material: {}", label));
    output::print_info(&format!("Incident photon energy: {:.2} keV", args.energy));

    let proportions = compton::estimate_proportions(args.energy, z)?;
    let curve = build_spectrum(args.energy, &proportions, args.bins)?;

    print_line_table(&curve);

    if let Some(ref path) = args.output {
        let format = args
            .format
            .unwrap_or_else(|| guess_format_from_extension(path));

        match format {
            OutputFormat::Png | OutputFormat::Svg => {
                plot::generate_spectrum_plot(&curve, path, plot_options(&args.size, format))?
            }
            OutputFormat::Csv => export::spectrum_to_csv(&curve, path)?,
        }

        output::print_success(&format!("Spectrum saved to '{}'", path.display()));
    }

    Ok(())
}

/// 打印特征线表
fn print_line_table(curve: &SpectrumCurve) {
    let rows: Vec<LineRow> = curve
        .lines
        .iter()
        .map(|l| LineRow {
            feature: l.kind.to_string(),
            energy: format!("{:.2}", l.energy),
            bin: l.bin,
            bin_energy: format!("{:.2}", curve.energies[l.bin]),
        })
        .collect();

    output::print_header(&format!(
        "{} marked lines ({} distinct bins) on {} bins (0 - {:.1} keV)",
        rows.len(),
        curve.marked_bins().len(),
        curve.energies.len(),
        curve.energies.last().copied().unwrap_or_default()
    ));
    println!("{}", Table::new(&rows));
}
