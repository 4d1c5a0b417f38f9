//! # Compton 散射运动学
//!
//! 计算散射光子/反冲电子能量、背散射能量以及逃逸峰。
//!
//! ## 公式
//! E(θ) = E₀ / (1 + (E₀ / mₑc²)(1 − cos θ))
//! 其中 mₑc² = 511 keV
//!
//! - θ = 0°：前向散射，无能量损失
//! - θ = 180°：背散射，光子能量最小，电子获得最大能量（Compton 边）
//!
//! ## 依赖关系
//! - 被 `compton/spectrum.rs`, `compton/irm.rs` 调用
//! - 被 `commands/` 中的 scatter, escape, report 调用

use crate::compton::ELECTRON_REST_ENERGY_KEV;
use crate::error::{ComptonError, Result};

/// 角度扫描的采样点数（0° ~ 359°，步长 1°）
pub const SWEEP_SAMPLES: usize = 360;

/// 背散射角（度）
pub const BACK_SCATTER_ANGLE: usize = 180;

/// 完整角度扫描结果
#[derive(Debug, Clone)]
pub struct AngleSweep {
    /// 入射光子能量（keV）
    pub incident: f64,
    /// 散射光子能量，下标即散射角（度）
    pub photon: Vec<f64>,
    /// 反冲电子能量，下标即散射角（度）
    pub electron: Vec<f64>,
    /// 背散射（180°）光子能量（keV）
    pub retro: f64,
    /// Compton 边：180° 时电子获得的能量（keV）
    pub compton_front: f64,
}

impl AngleSweep {
    /// 按 (角度, 光子能量, 电子能量) 迭代采样点
    pub fn samples(&self) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
        self.photon
            .iter()
            .zip(self.electron.iter())
            .enumerate()
            .map(|(angle, (p, e))| (angle, *p, *e))
    }
}

/// 逃逸峰能量（可能为负，不做截断）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscapePeaks {
    /// 单逃逸峰：E₀ − 511 keV
    pub single: f64,
    /// 双逃逸峰：E₀ − 1022 keV
    pub double: f64,
}

impl EscapePeaks {
    pub fn single_is_physical(&self) -> bool {
        self.single >= 0.0
    }

    pub fn double_is_physical(&self) -> bool {
        self.double >= 0.0
    }
}

/// 校验入射能量
pub(crate) fn validate_energy(e0: f64) -> Result<()> {
    if !e0.is_finite() || e0 <= 0.0 {
        return Err(ComptonError::InvalidEnergy { energy: e0 });
    }
    Ok(())
}

/// 计算散射角 θ（度）处的散射光子能量
pub fn scattered_energy(e0: f64, theta_deg: f64) -> Result<f64> {
    validate_energy(e0)?;
    Ok(compton_formula(e0, theta_deg))
}

fn compton_formula(e0: f64, theta_deg: f64) -> f64 {
    e0 / (1.0 + (e0 / ELECTRON_REST_ENERGY_KEV) * (1.0 - theta_deg.to_radians().cos()))
}

/// 0° ~ 359° 角度扫描，记录 180° 处的背散射能量与 Compton 边
pub fn sweep(e0: f64) -> Result<AngleSweep> {
    validate_energy(e0)?;

    let mut photon = Vec::with_capacity(SWEEP_SAMPLES);
    let mut electron = Vec::with_capacity(SWEEP_SAMPLES);
    let mut retro = 0.0;
    let mut compton_front = 0.0;

    for theta in 0..SWEEP_SAMPLES {
        let en = compton_formula(e0, theta as f64);
        photon.push(en);
        electron.push(e0 - en);

        if theta == BACK_SCATTER_ANGLE {
            retro = en;
            compton_front = e0 - en;
        }
    }

    Ok(AngleSweep {
        incident: e0,
        photon,
        electron,
        retro,
        compton_front,
    })
}

/// 只计算 180° 投影，返回 (背散射能量, Compton 边)
pub fn back_scatter(e0: f64) -> Result<(f64, f64)> {
    let retro = scattered_energy(e0, BACK_SCATTER_ANGLE as f64)?;
    Ok((retro, e0 - retro))
}

/// 计算单/双逃逸峰
pub fn escape_peaks(e0: f64) -> EscapePeaks {
    EscapePeaks {
        single: e0 - ELECTRON_REST_ENERGY_KEV,
        double: e0 - 2.0 * ELECTRON_REST_ENERGY_KEV,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_energy_loss_at_zero_angle() {
        for e0 in [1.0, 59.0, 662.0, 1333.0, 5000.0] {
            let e = scattered_energy(e0, 0.0).unwrap();
            assert!((e - e0).abs() < 1e-9, "E(0) = {} for E0 = {}", e, e0);
        }
    }

    #[test]
    fn test_back_scatter_closed_form() {
        for e0 in [10.0, 59.0, 300.0, 1333.0] {
            let e = scattered_energy(e0, 180.0).unwrap();
            let expected = e0 / (1.0 + 2.0 * e0 / 511.0);
            assert!((e - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_monotonic_around_back_scatter() {
        for e0 in [1.0, 59.0, 662.0, 1333.0, 10_000.0] {
            let sweep = sweep(e0).unwrap();
            for theta in 1..=180 {
                assert!(
                    sweep.photon[theta] <= sweep.photon[theta - 1] + 1e-12,
                    "photon energy increased at {}° for E0 = {}",
                    theta,
                    e0
                );
            }
            for theta in 181..SWEEP_SAMPLES {
                assert!(
                    sweep.photon[theta] >= sweep.photon[theta - 1] - 1e-12,
                    "photon energy decreased at {}° for E0 = {}",
                    theta,
                    e0
                );
            }
        }
    }

    #[test]
    fn test_symmetric_in_angle() {
        for e0 in [59.0, 662.0, 2614.0] {
            for theta in [0.5, 17.25, 90.0, 123.4, 179.9] {
                let a = scattered_energy(e0, theta).unwrap();
                let b = scattered_energy(e0, 360.0 - theta).unwrap();
                assert!((a - b).abs() < 1e-9, "E0 = {}, θ = {}", e0, theta);
            }
        }
    }

    #[test]
    fn test_negative_and_fractional_angles() {
        let e0 = 662.0;
        let neg = scattered_energy(e0, -90.0).unwrap();
        let pos = scattered_energy(e0, 90.0).unwrap();
        assert!((neg - pos).abs() < 1e-9);
        assert!((neg - e0 / (1.0 + e0 / 511.0)).abs() < 1e-9);

        let frac = scattered_energy(e0, 45.5).unwrap();
        assert!(frac < scattered_energy(e0, 45.0).unwrap());
        assert!(frac > scattered_energy(e0, 46.0).unwrap());

        let wrapped = scattered_energy(e0, 400.0).unwrap();
        assert!((wrapped - scattered_energy(e0, 40.0).unwrap()).abs() < 1e-9);
    }

    #[test]
    fn test_sweep_am241() {
        let sweep = sweep(59.0).unwrap();
        assert_eq!(sweep.photon.len(), SWEEP_SAMPLES);
        assert_eq!(sweep.electron.len(), SWEEP_SAMPLES);
        assert!((sweep.retro - 47.93).abs() < 0.01, "retro = {}", sweep.retro);
        assert!(
            (sweep.compton_front - 11.07).abs() < 0.01,
            "front = {}",
            sweep.compton_front
        );
    }

    #[test]
    fn test_sweep_co60() {
        let sweep = sweep(1333.0).unwrap();
        assert!((sweep.retro - 214.40).abs() < 0.01, "retro = {}", sweep.retro);
        assert!(
            (sweep.compton_front - 1118.60).abs() < 0.01,
            "front = {}",
            sweep.compton_front
        );
    }

    #[test]
    fn test_sweep_includes_back_scatter_sample() {
        let sweep = sweep(300.0).unwrap();
        assert_eq!(sweep.photon[BACK_SCATTER_ANGLE], sweep.retro);
        assert_eq!(sweep.electron[BACK_SCATTER_ANGLE], sweep.compton_front);
        let min = sweep.photon.iter().cloned().fold(f64::INFINITY, f64::min);
        assert_eq!(min, sweep.retro);
    }

    #[test]
    fn test_photon_plus_electron_is_incident() {
        let sweep = sweep(511.0).unwrap();
        for (_, p, e) in sweep.samples() {
            assert!((p + e - 511.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_back_scatter_matches_sweep() {
        let (retro, front) = back_scatter(1333.0).unwrap();
        let sweep = sweep(1333.0).unwrap();
        assert!((retro - sweep.retro).abs() < 1e-12);
        assert!((front - sweep.compton_front).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_energy_rejected() {
        assert!(matches!(
            scattered_energy(0.0, 90.0),
            Err(ComptonError::InvalidEnergy { .. })
        ));
        assert!(sweep(-5.0).is_err());
        assert!(sweep(f64::NAN).is_err());
    }

    #[test]
    fn test_escape_peaks() {
        let peaks = escape_peaks(1275.0);
        assert_eq!(peaks, EscapePeaks { single: 764.0, double: 253.0 });
        assert!(peaks.single_is_physical());
        assert!(peaks.double_is_physical());
    }

    #[test]
    fn test_escape_peaks_negative_not_clamped() {
        let peaks = escape_peaks(662.0);
        assert!((peaks.single - 151.0).abs() < 1e-12);
        assert!((peaks.double - (-360.0)).abs() < 1e-12);
        assert!(!peaks.double_is_physical());
    }
}
