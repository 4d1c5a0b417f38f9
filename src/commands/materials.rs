//! # materials 子命令实现
//!
//! 按类别列出探测器材料及其有效原子序数。
//!
//! ## 依赖关系
//! - 使用 `cli/materials.rs` 定义的 MaterialsArgs
//! - 使用 `models/material.rs`

use crate::cli::materials::MaterialsArgs;
use crate::commands::load_material_table;
use crate::error::Result;
use crate::models::DetectorCategory;
use crate::utils::output;

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct MaterialRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Material")]
    name: String,
    #[tabled(rename = "Z (avg)")]
    z: String,
}

/// 执行 materials 命令
pub fn execute(args: MaterialsArgs) -> Result<()> {
    output::print_header("Detector Materials");

    let table = load_material_table(args.materials.as_deref())?;
    let filter: Option<DetectorCategory> = args.category.map(Into::into);

    let rows: Vec<MaterialRow> = table
        .grouped()
        .into_iter()
        .filter(|(category, _)| filter.map_or(true, |f| f == *category))
        .flat_map(|(category, materials)| {
            materials.into_iter().map(move |m| MaterialRow {
                category: category.to_string(),
                name: m.name.clone(),
                z: format!("{}", m.z),
            })
        })
        .collect();

    if rows.is_empty() {
        output::print_warning("No materials in the selected category");
        return Ok(());
    }

    println!("{}", Table::new(&rows));
    output::print_info(&format!("{} materials listed", rows.len()));

    Ok(())
}
