//! # 数据导出
//!
//! 导出角度扫描、理论能谱、相互作用比例和 IRM 图数据到 CSV。
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `csv` + `serde` 写入 CSV 文件

use crate::compton::{AngleSweep, InteractionKind, IrmPoint, ProportionSet, SpectrumCurve};
use crate::error::{ComptonError, Result};

use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct SweepRow {
    angle_deg: usize,
    photon_kev: f64,
    electron_kev: f64,
}

#[derive(Serialize)]
struct SpectrumRow<'a> {
    energy_kev: f64,
    intensity: f64,
    line: &'a str,
}

#[derive(Serialize)]
struct ProportionRow {
    interaction: String,
    fraction: f64,
}

#[derive(Serialize)]
struct IrmRow {
    incident_kev: f64,
    retro_kev: f64,
    compton_front_kev: f64,
    photoelectric: f64,
    compton: f64,
    pair_production: f64,
}

/// 序列化行并写入 CSV
fn write_rows<S, I>(rows: I, output_path: &Path) -> Result<()>
where
    S: Serialize,
    I: IntoIterator<Item = S>,
{
    let mut wtr = csv::Writer::from_path(output_path)?;

    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush().map_err(|e| ComptonError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出角度扫描
pub fn sweep_to_csv(sweep: &AngleSweep, output_path: &Path) -> Result<()> {
    write_rows(
        sweep.samples().map(|(angle, photon, electron)| SweepRow {
            angle_deg: angle,
            photon_kev: photon,
            electron_kev: electron,
        }),
        output_path,
    )
}

/// 导出理论能谱，标记格点附带特征线名称
pub fn spectrum_to_csv(curve: &SpectrumCurve, output_path: &Path) -> Result<()> {
    let labels: Vec<String> = (0..curve.energies.len())
        .map(|bin| {
            curve
                .lines
                .iter()
                .filter(|l| l.bin == bin)
                .map(|l| l.kind.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        })
        .collect();

    write_rows(
        curve
            .points()
            .zip(labels.iter())
            .map(|((energy, intensity), label)| SpectrumRow {
                energy_kev: energy,
                intensity,
                line: label.as_str(),
            }),
        output_path,
    )
}

/// 导出相互作用比例
pub fn proportions_to_csv(proportions: &ProportionSet, output_path: &Path) -> Result<()> {
    write_rows(
        InteractionKind::ALL.iter().map(|kind| ProportionRow {
            interaction: kind.to_string(),
            fraction: proportions.get(*kind),
        }),
        output_path,
    )
}

/// 导出 IRM 能量图
pub fn irm_to_csv(points: &[IrmPoint], output_path: &Path) -> Result<()> {
    write_rows(
        points.iter().map(|p| IrmRow {
            incident_kev: p.incident,
            retro_kev: p.retro,
            compton_front_kev: p.compton_front,
            photoelectric: p.proportions.photoelectric,
            compton: p.proportions.compton,
            pair_production: p.proportions.pair_production,
        }),
        output_path,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compton::{estimate_proportions, synthesize, sweep};
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("comptonkit_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_sweep_csv() {
        let path = temp_path("sweep.csv");
        let sweep = sweep(662.0).unwrap();
        sweep_to_csv(&sweep, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("angle_deg,photon_kev,electron_kev"));
        assert_eq!(content.lines().count(), 361);
        assert!(content.lines().nth(1).unwrap().starts_with("0,662"));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_spectrum_csv_labels() {
        let path = temp_path("spectrum.csv");
        let p = estimate_proportions(662.0, 32.0).unwrap();
        let curve = synthesize(662.0, &p).unwrap();
        spectrum_to_csv(&curve, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1001);
        assert!(content.contains("Photoelectric peak"));
        assert!(content.contains("Compton front"));
        assert!(content.contains("Retrodiffusion"));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_proportions_csv() {
        let path = temp_path("proportions.csv");
        let p = estimate_proportions(2000.0, 32.0).unwrap();
        proportions_to_csv(&p, &path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let total: f64 = rdr
            .records()
            .map(|r| r.unwrap()[1].parse::<f64>().unwrap())
            .sum();
        assert!((total - 1.0).abs() < 1e-9);
        fs::remove_file(&path).ok();
    }
}
