//! # scatter 子命令实现
//!
//! 对给定入射能量做 0° ~ 359° 角度扫描，打印背散射能量、Compton 边
//! 和按步长抽样的角度表，可选输出曲线图或 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/compton.rs` 定义的 ScatterArgs
//! - 使用 `compton/kinematics.rs` 计算
//! - 使用 `compton/plot.rs`, `compton/export.rs` 输出

use crate::cli::common::OutputFormat;
use crate::cli::compton::ScatterArgs;
use crate::commands::{guess_format_from_extension, plot_options};
use crate::compton::{self, export, plot, AngleSweep};
use crate::error::{ComptonError, Result};
use crate::utils::output;

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct AngleRow {
    #[tabled(rename = "θ (°)")]
    angle: usize,
    #[tabled(rename = "Photon (keV)")]
    photon: String,
    #[tabled(rename = "Electron (keV)")]
    electron: String,
}

/// 执行 scatter 命令
pub fn execute(args: ScatterArgs) -> Result<()> {
    output::print_header("Compton Diffusion");

    if args.step == 0 {
        return Err(ComptonError::InvalidArgument(
            "angle step must be at least 1 degree".to_string(),
        ));
    }

    let sweep = compton::sweep(args.energy)?;

    output::print_info(&format!("Incident photon energy: {:.2} keV", sweep.incident));
    output::print_success(&format!(
        "Energy of retrodiffusion: {:.2} keV",
        sweep.retro
    ));
    output::print_success(&format!(
        "Energy of Compton front: {:.2} keV",
        sweep.compton_front
    ));

    if let Some(theta) = args.angle {
        let photon = compton::scattered_energy(args.energy, theta)?;
        output::print_info(&format!(
            "At θ = {}°: photon {:.3} keV, electron {:.3} keV",
            theta,
            photon,
            args.energy - photon
        ));
    }

    print_angle_table(&sweep, args.step);

    if let Some(ref path) = args.output {
        let format = args
            .format
            .unwrap_or_else(|| guess_format_from_extension(path));

        match format {
            OutputFormat::Png | OutputFormat::Svg => {
                plot::generate_sweep_plot(&sweep, path, plot_options(&args.size, format))?
            }
            OutputFormat::Csv => export::sweep_to_csv(&sweep, path)?,
        }

        output::print_success(&format!("Sweep saved to '{}'", path.display()));
    }

    Ok(())
}

/// 打印角度表
fn print_angle_table(sweep: &AngleSweep, step: usize) {
    let rows: Vec<AngleRow> = sweep
        .samples()
        .step_by(step)
        .map(|(angle, photon, electron)| AngleRow {
            angle,
            photon: format!("{:.3}", photon),
            electron: format!("{:.3}", electron),
        })
        .collect();

    output::print_header(&format!("Scattered energies every {}°", step));
    println!("{}", Table::new(&rows));
}
