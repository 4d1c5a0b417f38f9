//! # materials 子命令 CLI 定义
//!
//! 列出探测器材料表。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/materials.rs`

use crate::models::DetectorCategory;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 类别过滤
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Gaseous detectors
    Gaseous,
    /// Scintillators
    Scintillators,
    /// Semiconductors
    Semiconductors,
}

impl From<CategoryFilter> for DetectorCategory {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::Gaseous => DetectorCategory::GaseousDetectors,
            CategoryFilter::Scintillators => DetectorCategory::Scintillators,
            CategoryFilter::Semiconductors => DetectorCategory::Semiconductors,
        }
    }
}

/// materials 子命令参数
#[derive(Args, Debug)]
pub struct MaterialsArgs {
    /// Only list one detector category
    #[arg(short, long, value_enum)]
    pub category: Option<CategoryFilter>,

    /// CSV file with a custom material table (columns: category,name,z)
    #[arg(long, env = "COMPTONKIT_MATERIALS")]
    pub materials: Option<PathBuf>,
}
