//! # escape 子命令实现
//!
//! 打印单/双逃逸峰能量。负值按原样给出并提示其非物理。
//!
//! ## 依赖关系
//! - 使用 `cli/compton.rs` 定义的 EscapeArgs
//! - 使用 `compton/kinematics.rs`

use crate::cli::compton::EscapeArgs;
use crate::compton::{self, PAIR_PRODUCTION_THRESHOLD_KEV};
use crate::error::Result;
use crate::utils::output;

/// 执行 escape 命令
pub fn execute(args: EscapeArgs) -> Result<()> {
    output::print_header("Escape Peaks");

    let peaks = compton::escape_peaks(args.energy);

    output::print_info(&format!("Incident photon energy: {:.2} keV", args.energy));

    if args.energy < PAIR_PRODUCTION_THRESHOLD_KEV {
        output::print_warning(&format!(
            "{:.2} keV is below the pair production threshold ({} keV)",
            args.energy, PAIR_PRODUCTION_THRESHOLD_KEV
        ));
    }

    report_peak("Single escape", peaks.single, peaks.single_is_physical());
    report_peak("Double escape", peaks.double, peaks.double_is_physical());

    Ok(())
}

fn report_peak(label: &str, energy: f64, physical: bool) {
    if physical {
        output::print_success(&format!("{}: {:.2} keV", label, energy));
    } else {
        output::print_warning(&format!("{}: {:.2} keV (non-physical)", label, energy));
    }
}
