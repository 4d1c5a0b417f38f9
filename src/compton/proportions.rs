//! # 相互作用比例估算
//!
//! 根据光子能量和吸收材料的有效原子序数，粗略估算光电效应、Compton 散射
//! 和电子对产生三种相互作用所占的比例。
//!
//! ## 说明
//! 这是一个分段启发式近似，不是截面计算。阈值单位为 keV：
//! - E < 100 keV：光电效应为主
//! - 100 keV ≤ E < 1022 keV：Compton 散射为主
//! - E ≥ 1022 keV：电子对产生开始出现
//!
//! 三个分量最后按总和归一化。
//!
//! ## 依赖关系
//! - 被 `compton/spectrum.rs`, `compton/irm.rs` 使用
//! - 被 `commands/proportions.rs`, `commands/report.rs` 调用

use crate::compton::kinematics::validate_energy;
use crate::compton::PAIR_PRODUCTION_THRESHOLD_KEV;
use crate::error::{ComptonError, Result};

use serde::Serialize;

/// 光电效应主导区的上限（keV）
pub const PHOTOELECTRIC_BAND_LIMIT_KEV: f64 = 100.0;

const DEGENERATE_EPSILON: f64 = 1e-12;

/// 相互作用类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Photoelectric,
    Compton,
    PairProduction,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 3] = [
        InteractionKind::Photoelectric,
        InteractionKind::Compton,
        InteractionKind::PairProduction,
    ];
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InteractionKind::Photoelectric => write!(f, "photoelectric"),
            InteractionKind::Compton => write!(f, "compton"),
            InteractionKind::PairProduction => write!(f, "pair_production"),
        }
    }
}

/// 归一化后的相互作用比例，三者之和为 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProportionSet {
    pub photoelectric: f64,
    pub compton: f64,
    pub pair_production: f64,
}

impl ProportionSet {
    /// 按相互作用类型取值
    pub fn get(&self, kind: InteractionKind) -> f64 {
        match kind {
            InteractionKind::Photoelectric => self.photoelectric,
            InteractionKind::Compton => self.compton,
            InteractionKind::PairProduction => self.pair_production,
        }
    }

    pub fn total(&self) -> f64 {
        self.photoelectric + self.compton + self.pair_production
    }

    /// 所有分量都落在 [0, 1] 内
    pub fn is_physical(&self) -> bool {
        InteractionKind::ALL
            .iter()
            .all(|k| (0.0..=1.0).contains(&self.get(*k)))
    }

    /// 仅含光电效应
    #[cfg(test)]
    pub(crate) fn photoelectric_only() -> Self {
        ProportionSet {
            photoelectric: 1.0,
            compton: 0.0,
            pair_production: 0.0,
        }
    }
}

/// 估算能量 `energy`（keV）、原子序数 `z` 下的相互作用比例
pub fn estimate_proportions(energy: f64, z: f64) -> Result<ProportionSet> {
    validate_energy(energy)?;
    if !z.is_finite() {
        return Err(ComptonError::InvalidAtomicNumber { z });
    }

    let zr = z / 100.0;

    let (photo, compton, pair) = if energy < PHOTOELECTRIC_BAND_LIMIT_KEV {
        (0.8 + 0.2 * zr, 0.2, 0.0)
    } else if energy < PAIR_PRODUCTION_THRESHOLD_KEV {
        (0.2 * zr, 0.8 - 0.2 * zr, 0.0)
    } else {
        (0.1 * zr, 0.5 - 0.1 * zr, 0.4 + 0.6 * zr)
    };

    let total = photo + compton + pair;
    if !total.is_finite() || total.abs() < DEGENERATE_EPSILON {
        return Err(ComptonError::DegenerateProportions { energy, z, total });
    }

    Ok(ProportionSet {
        photoelectric: photo / total,
        compton: compton / total,
        pair_production: pair / total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proportions_sum_to_one() {
        for energy in [1.0, 59.0, 99.9, 100.0, 662.0, 1021.9, 1022.0, 5000.0] {
            for z in 1..=100 {
                let p = estimate_proportions(energy, z as f64).unwrap();
                assert!(
                    (p.total() - 1.0).abs() < 1e-9,
                    "sum = {} at E = {}, Z = {}",
                    p.total(),
                    energy,
                    z
                );
                assert!(p.is_physical(), "{:?} at E = {}, Z = {}", p, energy, z);
            }
        }
    }

    #[test]
    fn test_low_energy_band() {
        let p = estimate_proportions(59.0, 32.0).unwrap();
        let photo = 0.8 + 0.2 * 0.32;
        let total = photo + 0.2;
        assert!((p.photoelectric - photo / total).abs() < 1e-12);
        assert!((p.compton - 0.2 / total).abs() < 1e-12);
        assert_eq!(p.pair_production, 0.0);
    }

    #[test]
    fn test_compton_band_boundaries() {
        // 100 keV 属于 Compton 区
        let p = estimate_proportions(100.0, 50.0).unwrap();
        assert!((p.photoelectric - 0.1 / 0.8).abs() < 1e-12);
        assert!((p.compton - 0.7 / 0.8).abs() < 1e-12);
        assert_eq!(p.pair_production, 0.0);
        assert!(p.compton > p.photoelectric);
    }

    #[test]
    fn test_pair_band() {
        let p = estimate_proportions(1022.0, 32.0).unwrap();
        assert!(p.pair_production > 0.0);

        let below = estimate_proportions(1021.999, 32.0).unwrap();
        assert_eq!(below.pair_production, 0.0);

        let total = 0.1 * 0.32 + (0.5 - 0.1 * 0.32) + (0.4 + 0.6 * 0.32);
        assert!((p.pair_production - (0.4 + 0.6 * 0.32) / total).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_proportions() {
        // Z = -500 使低能区权重总和为 0
        let err = estimate_proportions(50.0, -500.0).unwrap_err();
        assert!(matches!(err, ComptonError::DegenerateProportions { .. }));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            estimate_proportions(0.0, 32.0),
            Err(ComptonError::InvalidEnergy { .. })
        ));
        assert!(matches!(
            estimate_proportions(662.0, f64::INFINITY),
            Err(ComptonError::InvalidAtomicNumber { .. })
        ));
    }

    #[test]
    fn test_get_by_kind() {
        let p = estimate_proportions(2000.0, 54.0).unwrap();
        assert_eq!(p.get(InteractionKind::Photoelectric), p.photoelectric);
        assert_eq!(p.get(InteractionKind::Compton), p.compton);
        assert_eq!(p.get(InteractionKind::PairProduction), p.pair_production);
    }
}
