//! # 探测器材料表
//!
//! 按探测器类别（气体、闪烁体、半导体）组织的材料有效原子序数表。
//! 表是不可变值，由调用方显式传递；计算核心只接收查好的 Z。
//!
//! ## 数据来源
//! 内置表为常见探测器材料的平均有效 Z，也可从 CSV 文件加载自定义表：
//! ```text
//! category,name,z
//! scintillators,NaI_Tl,32
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/` 使用（解析 `--material` 参数）
//! - 使用 `csv` + `serde` 读取自定义表

use crate::error::{ComptonError, Result};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// 探测器类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorCategory {
    #[serde(alias = "gaseous", alias = "gas")]
    GaseousDetectors,
    #[serde(alias = "scintillator")]
    Scintillators,
    #[serde(alias = "semiconductor")]
    Semiconductors,
}

impl std::fmt::Display for DetectorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectorCategory::GaseousDetectors => write!(f, "gaseous_detectors"),
            DetectorCategory::Scintillators => write!(f, "scintillators"),
            DetectorCategory::Semiconductors => write!(f, "semiconductors"),
        }
    }
}

/// 单个材料条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub category: DetectorCategory,
    pub name: String,
    /// 平均有效原子序数
    pub z: f64,
}

impl Material {
    pub fn new(category: DetectorCategory, name: impl Into<String>, z: f64) -> Self {
        Material {
            category,
            name: name.into(),
            z,
        }
    }
}

/// 材料表
#[derive(Debug, Clone)]
pub struct MaterialTable {
    materials: Vec<Material>,
}

impl MaterialTable {
    /// 内置材料表
    pub fn builtin() -> Self {
        use DetectorCategory::*;

        MaterialTable {
            materials: vec![
                Material::new(GaseousDetectors, "Argon", 18.0),
                Material::new(GaseousDetectors, "Argon_CO2_mix", 17.4),
                Material::new(Scintillators, "NaI_Tl", 32.0),
                Material::new(Scintillators, "CsI_Tl", 54.0),
                Material::new(Scintillators, "BGO", 27.16),
                Material::new(Scintillators, "LaBr3", 40.5),
                Material::new(Semiconductors, "HPGe", 32.0),
                Material::new(Semiconductors, "CdTe", 50.0),
                Material::new(Semiconductors, "CdZnTe", 45.5),
            ],
        }
    }

    /// 从 CSV 文件加载材料表（列：category, name, z）
    pub fn from_csv(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ComptonError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_path(path)?;

        let mut materials = Vec::new();
        for (line, record) in rdr.deserialize::<Material>().enumerate() {
            let material = record?;
            if !material.z.is_finite() || material.z <= 0.0 {
                return Err(ComptonError::ParseError {
                    format: "material table".to_string(),
                    path: path.display().to_string(),
                    reason: format!(
                        "row {}: atomic number of '{}' must be > 0, got {}",
                        line + 1,
                        material.name,
                        material.z
                    ),
                });
            }
            materials.push(material);
        }

        let table = MaterialTable { materials };
        if table.is_empty() {
            return Err(ComptonError::ParseError {
                format: "material table".to_string(),
                path: path.display().to_string(),
                reason: "no materials defined".to_string(),
            });
        }

        Ok(table)
    }

    /// 按名称查找（忽略大小写和标点，"NaI(Tl)" 与 "NaI_Tl" 等价）
    pub fn lookup(&self, name: &str) -> Result<&Material> {
        let key = normalize_name(name);
        self.materials
            .iter()
            .find(|m| normalize_name(&m.name) == key)
            .ok_or_else(|| ComptonError::UnknownMaterial {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// 按类别分组（类别有序，组内保持原顺序）
    pub fn grouped(&self) -> BTreeMap<DetectorCategory, Vec<&Material>> {
        let mut groups: BTreeMap<DetectorCategory, Vec<&Material>> = BTreeMap::new();
        for m in &self.materials {
            groups.entry(m.category).or_default().push(m);
        }
        groups
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_builtin_lookup() {
        let table = MaterialTable::builtin();
        assert_eq!(table.len(), 9);
        assert_eq!(table.lookup("HPGe").unwrap().z, 32.0);
        assert_eq!(table.lookup("bgo").unwrap().z, 27.16);
        assert_eq!(table.lookup("NaI(Tl)").unwrap().name, "NaI_Tl");
        assert_eq!(
            table.lookup("cdznte").unwrap().category,
            DetectorCategory::Semiconductors
        );
    }

    #[test]
    fn test_unknown_material() {
        let table = MaterialTable::builtin();
        assert!(matches!(
            table.lookup("Unobtainium"),
            Err(ComptonError::UnknownMaterial { .. })
        ));
    }

    #[test]
    fn test_grouped_by_category() {
        let table = MaterialTable::builtin();
        let groups = table.grouped();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[&DetectorCategory::GaseousDetectors].len(), 2);
        assert_eq!(groups[&DetectorCategory::Scintillators].len(), 4);
        assert_eq!(groups[&DetectorCategory::Semiconductors].len(), 3);
    }

    #[test]
    fn test_from_csv() {
        let path = std::env::temp_dir().join(format!(
            "comptonkit_materials_{}.csv",
            std::process::id()
        ));
        fs::write(
            &path,
            "category,name,z\n# custom table\nscintillator, PbWO4, 73.0\nsemiconductors,Si,14\n",
        )
        .unwrap();

        let table = MaterialTable::from_csv(&path).unwrap();
        assert_eq!(table.len(), 2);
        let pwo = table.lookup("pbwo4").unwrap();
        assert_eq!(pwo.category, DetectorCategory::Scintillators);
        assert_eq!(pwo.z, 73.0);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_from_csv_rejects_empty_table() {
        let path = std::env::temp_dir().join(format!(
            "comptonkit_materials_empty_{}.csv",
            std::process::id()
        ));
        fs::write(&path, "category,name,z\n# nothing here\n").unwrap();
        assert!(matches!(
            MaterialTable::from_csv(&path),
            Err(ComptonError::ParseError { .. })
        ));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_from_csv_rejects_bad_z() {
        let path = std::env::temp_dir().join(format!(
            "comptonkit_materials_bad_{}.csv",
            std::process::id()
        ));
        fs::write(&path, "category,name,z\ngas,Vacuum,0\n").unwrap();
        assert!(matches!(
            MaterialTable::from_csv(&path),
            Err(ComptonError::ParseError { .. })
        ));
        fs::remove_file(&path).ok();
    }
}
