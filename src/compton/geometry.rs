//! # 探测几何效率
//!
//! 各向同性点源发射的光子到达距离 d 处、面积 S 的探测器表面的概率：
//! P = S / (4π d²)
//!
//! ## 依赖关系
//! - 被 `commands/report.rs` 调用

use crate::error::{ComptonError, Result};

use std::f64::consts::PI;

/// 计算几何效率（0-1 的概率，不做截断）
///
/// `surface` 单位 m²，`distance` 单位 m。
pub fn geometric_efficiency(surface: f64, distance: f64) -> Result<f64> {
    if !surface.is_finite() || surface < 0.0 {
        return Err(ComptonError::InvalidGeometry(format!(
            "detector surface must be >= 0 m², got {}",
            surface
        )));
    }
    if !distance.is_finite() || distance <= 0.0 {
        return Err(ComptonError::InvalidGeometry(format!(
            "source distance must be > 0 m, got {}",
            distance
        )));
    }

    Ok(surface / (4.0 * PI * distance * distance))
}
