//! # proportions 子命令实现
//!
//! 估算相互作用比例并以表格展示，可选输出柱状图或 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/spectrum.rs` 定义的 ProportionsArgs
//! - 使用 `compton/proportions.rs`

use crate::cli::common::OutputFormat;
use crate::cli::spectrum::ProportionsArgs;
use crate::commands::{guess_format_from_extension, plot_options, resolve_material};
use crate::compton::{self, export, plot, InteractionKind, ProportionSet};
use crate::error::Result;
use crate::utils::output;

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct ProportionRow {
    #[tabled(rename = "Interaction")]
    interaction: String,
    #[tabled(rename = "Proportion")]
    fraction: String,
    #[tabled(rename = "%")]
    percent: String,
}

/// 执行 proportions 命令
pub fn execute(args: ProportionsArgs) -> Result<()> {
    output::print_header("Interaction Proportions");

    let (z, label) = resolve_material(&args.material)?;
    output::print_info(&format!("Material: {}", label));
    output::print_info(&format!("Photon energy: {:.2} keV", args.energy));

    let proportions = compton::estimate_proportions(args.energy, z)?;

    if !proportions.is_physical() {
        output::print_warning("Some proportions fall outside [0, 1]; Z is outside the usual range");
    }

    print_proportion_table(&proportions);

    if let Some(ref path) = args.output {
        let format = args
            .format
            .unwrap_or_else(|| guess_format_from_extension(path));

        match format {
            OutputFormat::Png | OutputFormat::Svg => plot::generate_proportions_plot(
                &proportions,
                args.energy,
                z,
                path,
                plot_options(&args.size, format),
            )?,
            OutputFormat::Csv => export::proportions_to_csv(&proportions, path)?,
        }

        output::print_success(&format!("Proportions saved to '{}'", path.display()));
    }

    Ok(())
}

/// 打印比例表
pub(crate) fn print_proportion_table(proportions: &ProportionSet) {
    let mut rows: Vec<ProportionRow> = InteractionKind::ALL
        .iter()
        .map(|kind| {
            let value = proportions.get(*kind);
            ProportionRow {
                interaction: kind.to_string(),
                fraction: format!("{:.2}", value),
                percent: format!("{:.1}", value * 100.0),
            }
        })
        .collect::<Vec<_>>();

    let total = proportions.total();
    rows.push(ProportionRow {
        interaction: "total".to_string(),
        fraction: format!("{:.2}", total),
        percent: format!("{:.1}", total * 100.0),
    });

    println!("{}", Table::new(&rows));
}
