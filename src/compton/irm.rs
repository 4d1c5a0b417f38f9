//! # IRM：入射能量 - 相互作用能量图
//!
//! 在固定的入射能量轴上批量计算背散射能量、Compton 边以及相互作用比例，
//! 即把角度扫描换成能量扫描。各采样点相互独立，使用 rayon 并行计算。
//!
//! ## 依赖关系
//! - 使用 `compton/kinematics.rs` 的 180° 投影
//! - 使用 `compton/proportions.rs` 估算比例
//! - 被 `commands/irm.rs` 调用

use crate::compton::back_scatter;
use crate::compton::proportions::{estimate_proportions, ProportionSet};
use crate::error::{ComptonError, Result};

use rayon::prelude::*;

/// 默认能量轴上限（keV）
pub const DEFAULT_MAX_ENERGY_KEV: f64 = 2000.0;

/// 默认采样点数
pub const DEFAULT_SAMPLES: usize = 2000;

/// 能量图中的一个采样点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrmPoint {
    /// 入射能量（keV）
    pub incident: f64,
    /// 背散射光子能量（keV）
    pub retro: f64,
    /// Compton 边（keV）
    pub compton_front: f64,
    pub proportions: ProportionSet,
}

/// 能量轴：(0, max_energy] 内 `samples` 个等间距点，不含 0
pub fn energy_axis(max_energy: f64, samples: usize) -> Vec<f64> {
    (0..samples)
        .map(|i| max_energy * (i + 1) as f64 / samples as f64)
        .collect()
}

/// 计算入射能量 - 相互作用能量图
pub fn interaction_energy_map(z: f64, max_energy: f64, samples: usize) -> Result<Vec<IrmPoint>> {
    if !max_energy.is_finite() || max_energy <= 0.0 {
        return Err(ComptonError::InvalidEnergy { energy: max_energy });
    }
    if samples == 0 {
        return Err(ComptonError::InvalidArgument(
            "energy map needs at least one sample".to_string(),
        ));
    }

    energy_axis(max_energy, samples)
        .into_par_iter()
        .map(|incident| {
            let proportions = estimate_proportions(incident, z)?;
            let (retro, compton_front) = back_scatter(incident)?;
            Ok(IrmPoint {
                incident,
                retro,
                compton_front,
                proportions,
            })
        })
        .collect()
}
