//! # 公共 CLI 参数
//!
//! 多个子命令共用的参数定义与解析函数：
//! - 带单位的能量输入（eV / keV / MeV，统一换算为 keV）
//! - 吸收材料（直接给 Z 或按名称查表）
//! - 输出格式与图像尺寸
//!
//! ## 依赖关系
//! - 被 `cli/` 下各子命令使用
//! - 使用 `regex` 解析能量字符串

use clap::{Args, ValueEnum};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

static ENERGY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9]*\.?[0-9]+(?:[eE][+-]?[0-9]+)?)\s*([A-Za-z]*)\s*$")
        .expect("energy pattern is valid")
});

/// 解析能量输入，返回 keV
///
/// 支持 `662`、`662keV`、`1.33 MeV`、`5000eV`；无单位时按 keV 处理。
pub fn parse_energy(input: &str) -> Result<f64, String> {
    let caps = ENERGY_RE.captures(input).ok_or_else(|| {
        format!(
            "Invalid energy '{}'. Use a number in keV (e.g., 662) or add a unit: eV, keV, MeV",
            input
        )
    })?;

    let value: f64 = caps[1]
        .parse()
        .map_err(|_| format!("Invalid energy value '{}'", &caps[1]))?;

    let factor = match caps[2].to_lowercase().as_str() {
        "" | "kev" | "k" => 1.0,
        "mev" | "m" => 1000.0,
        "ev" => 1e-3,
        unit => {
            return Err(format!(
                "Unknown energy unit '{}'. Supported units: eV, keV, MeV",
                unit
            ))
        }
    };

    Ok(value * factor)
}

/// 吸收材料参数
#[derive(Args, Debug, Clone)]
pub struct MaterialArgs {
    /// Effective atomic number Z of the absorbing material
    #[arg(short, long, conflicts_with = "material", allow_negative_numbers = true)]
    pub z: Option<f64>,

    /// Detector material name from the material table (e.g., HPGe, NaI_Tl, BGO)
    #[arg(short, long)]
    pub material: Option<String>,

    /// CSV file with a custom material table (columns: category,name,z)
    #[arg(long, env = "COMPTONKIT_MATERIALS")]
    pub materials: Option<PathBuf>,
}

/// 输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
    /// CSV data file
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Csv => "csv",
        }
    }
}

/// 图像尺寸参数
#[derive(Args, Debug, Clone, Copy)]
pub struct PlotSizeArgs {
    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_energy_units() {
        assert_eq!(parse_energy("662").unwrap(), 662.0);
        assert_eq!(parse_energy("662keV").unwrap(), 662.0);
        assert!((parse_energy(" 1.333 MeV ").unwrap() - 1333.0).abs() < 1e-9);
        assert!((parse_energy("5000eV").unwrap() - 5.0).abs() < 1e-12);
        assert_eq!(parse_energy("1e3").unwrap(), 1000.0);
    }

    #[test]
    fn test_parse_energy_rejects_garbage() {
        assert!(parse_energy("abc").is_err());
        assert!(parse_energy("-5").is_err());
        assert!(parse_energy("10 GeV").is_err());
        assert!(parse_energy("").is_err());
    }
}
