//! # 理论能谱合成
//!
//! 在 [0, 1.2 × E₀] 的能量轴上构造一个理想化的"棒状"能谱：
//! 在光电峰、背散射峰、Compton 边以及逃逸峰最近的能量格点上放置单位标记。
//! 强度不做物理标定，只用于指示特征能量的位置。
//!
//! ## 依赖关系
//! - 使用 `compton/kinematics.rs` 计算背散射与逃逸峰
//! - 使用 `compton/proportions.rs` 的 ProportionSet 决定标记哪些峰
//! - 被 `commands/spectrum.rs`, `commands/report.rs` 调用

use crate::compton::kinematics::{back_scatter, escape_peaks, validate_energy};
use crate::compton::ProportionSet;
use crate::error::{ComptonError, Result};

/// 默认能量格点数
pub const DEFAULT_BINS: usize = 1000;

/// 能量轴上限相对 E₀ 的倍数
pub const AXIS_SPAN_FACTOR: f64 = 1.2;

/// 能谱特征线类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// 光电峰（全能峰）
    Photopeak,
    /// 背散射峰
    BackScatter,
    /// Compton 边
    ComptonEdge,
    /// 单逃逸峰
    SingleEscape,
    /// 双逃逸峰
    DoubleEscape,
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineKind::Photopeak => write!(f, "Photoelectric peak"),
            LineKind::BackScatter => write!(f, "Retrodiffusion"),
            LineKind::ComptonEdge => write!(f, "Compton front"),
            LineKind::SingleEscape => write!(f, "Single escape"),
            LineKind::DoubleEscape => write!(f, "Double escape"),
        }
    }
}

/// 能谱中被标记的特征线
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralLine {
    pub kind: LineKind,
    /// 目标能量（keV）
    pub energy: f64,
    /// 最近格点下标
    pub bin: usize,
}

/// 理论能谱
#[derive(Debug, Clone)]
pub struct SpectrumCurve {
    /// 入射能量（keV）
    pub incident: f64,
    /// 能量轴（keV），等间距
    pub energies: Vec<f64>,
    /// 强度，0 或 1
    pub intensities: Vec<f64>,
    /// 被标记的特征线（按标记顺序）
    pub lines: Vec<SpectralLine>,
}

impl SpectrumCurve {
    /// 非零格点下标（升序，去重）
    pub fn marked_bins(&self) -> Vec<usize> {
        self.intensities
            .iter()
            .enumerate()
            .filter(|(_, i)| **i > 0.0)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// (能量, 强度) 采样点
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.energies
            .iter()
            .zip(self.intensities.iter())
            .map(|(e, i)| (*e, *i))
    }

    fn mark(&mut self, kind: LineKind, energy: f64) {
        let bin = nearest_bin(&self.energies, energy);
        self.intensities[bin] = 1.0;
        self.lines.push(SpectralLine { kind, energy, bin });
    }
}

/// 使用默认格点数合成理论能谱
pub fn synthesize(e0: f64, proportions: &ProportionSet) -> Result<SpectrumCurve> {
    synthesize_with_bins(e0, proportions, DEFAULT_BINS)
}

/// 合成理论能谱
pub fn synthesize_with_bins(
    e0: f64,
    proportions: &ProportionSet,
    bins: usize,
) -> Result<SpectrumCurve> {
    validate_energy(e0)?;
    if bins < 2 {
        return Err(ComptonError::InvalidArgument(format!(
            "spectrum needs at least 2 bins, got {}",
            bins
        )));
    }

    let energies = linspace(0.0, AXIS_SPAN_FACTOR * e0, bins);
    let mut curve = SpectrumCurve {
        incident: e0,
        intensities: vec![0.0; energies.len()],
        energies,
        lines: Vec::new(),
    };

    curve.mark(LineKind::Photopeak, e0);

    if proportions.compton > 0.0 {
        let (retro, front) = back_scatter(e0)?;
        curve.mark(LineKind::BackScatter, retro);
        curve.mark(LineKind::ComptonEdge, front);
    }

    if proportions.pair_production > 0.0 {
        // 负的逃逸能量落在能量轴之外，不标记
        let escape = escape_peaks(e0);
        if escape.single_is_physical() {
            curve.mark(LineKind::SingleEscape, escape.single);
        }
        if escape.double_is_physical() {
            curve.mark(LineKind::DoubleEscape, escape.double);
        }
    }

    Ok(curve)
}

/// 与 numpy.linspace 相同：含两端点的等间距采样
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + i as f64 * step })
                .collect()
        }
    }
}

/// 距离目标能量最近的格点下标，并列时取第一个
pub fn nearest_bin(axis: &[f64], target: f64) -> usize {
    let mut best = 0;
    let mut best_diff = f64::INFINITY;
    for (i, e) in axis.iter().enumerate() {
        let diff = (e - target).abs();
        if diff < best_diff {
            best = i;
            best_diff = diff;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compton::estimate_proportions;

    #[test]
    fn test_linspace_endpoints() {
        let axis = linspace(0.0, 1.2 * 662.0, DEFAULT_BINS);
        assert_eq!(axis.len(), DEFAULT_BINS);
        assert_eq!(axis[0], 0.0);
        assert_eq!(axis[DEFAULT_BINS - 1], 1.2 * 662.0);
        let step = axis[1] - axis[0];
        assert!((axis[500] - 500.0 * step).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_bin_tie_takes_first() {
        let axis = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(nearest_bin(&axis, 1.5), 1);
        assert_eq!(nearest_bin(&axis, 2.6), 3);
        assert_eq!(nearest_bin(&axis, -10.0), 0);
        assert_eq!(nearest_bin(&axis, 99.0), 3);
    }

    #[test]
    fn test_photoelectric_only_marks_one_bin() {
        let curve = synthesize(662.0, &ProportionSet::photoelectric_only()).unwrap();
        let marked = curve.marked_bins();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0], nearest_bin(&curve.energies, 662.0));
        assert_eq!(curve.lines.len(), 1);
        assert_eq!(curve.lines[0].kind, LineKind::Photopeak);
    }

    #[test]
    fn test_compton_marks_three_bins() {
        let proportions = estimate_proportions(662.0, 32.0).unwrap();
        assert_eq!(proportions.pair_production, 0.0);

        let curve = synthesize(662.0, &proportions).unwrap();
        let (retro, front) = back_scatter(662.0).unwrap();

        let mut expected = vec![
            nearest_bin(&curve.energies, 662.0),
            nearest_bin(&curve.energies, retro),
            nearest_bin(&curve.energies, front),
        ];
        expected.sort_unstable();

        assert_eq!(curve.marked_bins(), expected);
        assert_eq!(curve.intensities.iter().filter(|i| **i > 0.0).count(), 3);
    }

    #[test]
    fn test_pair_production_marks_escape_peaks() {
        let proportions = estimate_proportions(2614.0, 82.0).unwrap();
        let curve = synthesize(2614.0, &proportions).unwrap();

        let kinds: Vec<LineKind> = curve.lines.iter().map(|l| l.kind).collect();
        assert!(kinds.contains(&LineKind::SingleEscape));
        assert!(kinds.contains(&LineKind::DoubleEscape));
        assert_eq!(curve.marked_bins().len(), 5);

        let single = curve
            .lines
            .iter()
            .find(|l| l.kind == LineKind::SingleEscape)
            .unwrap();
        assert_eq!(single.bin, nearest_bin(&curve.energies, 2614.0 - 511.0));
    }

    #[test]
    fn test_negative_escape_peaks_omitted() {
        let proportions = ProportionSet {
            photoelectric: 0.2,
            compton: 0.0,
            pair_production: 0.8,
        };
        let curve = synthesize(800.0, &proportions).unwrap();
        let kinds: Vec<LineKind> = curve.lines.iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![LineKind::Photopeak, LineKind::SingleEscape]);
    }

    #[test]
    fn test_invalid_bins() {
        let p = ProportionSet::photoelectric_only();
        assert!(synthesize_with_bins(662.0, &p, 1).is_err());
        assert!(synthesize(-1.0, &p).is_err());
    }

    #[test]
    fn test_synthesize_is_pure() {
        let p = estimate_proportions(1333.0, 32.0).unwrap();
        let a = synthesize(1333.0, &p).unwrap();
        let b = synthesize(1333.0, &p).unwrap();
        assert_eq!(a.intensities, b.intensities);
        assert_eq!(a.lines, b.lines);
    }
}
