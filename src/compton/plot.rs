//! # 图表生成
//!
//! 使用 `plotters` 库渲染计算结果。计算函数本身不绘图，
//! 由命令层决定是否调用这里的函数。
//!
//! ## 功能
//! - 角度扫描曲线（光子/电子能量 vs 散射角）
//! - 理论能谱（标注特征线）
//! - 相互作用比例柱状图
//! - IRM 能量图（背散射/Compton 边 + 比例 vs 入射能量）
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `compton/` 的计算结果结构

use crate::compton::{AngleSweep, InteractionKind, IrmPoint, LineKind, ProportionSet, SpectrumCurve};
use crate::error::{ComptonError, Result};

use plotters::prelude::*;
use std::path::Path;

const PHOTON_COLOR: RGBColor = RGBColor(0, 102, 204);
const ELECTRON_COLOR: RGBColor = RGBColor(204, 51, 0);
const PAIR_COLOR: RGBColor = RGBColor(0, 153, 76);

/// 输出尺寸与格式
#[derive(Debug, Clone, Copy)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
    pub use_svg: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            use_svg: false,
        }
    }
}

fn plot_err<E: std::fmt::Debug>(e: E) -> ComptonError {
    ComptonError::PlotError(format!("{:?}", e))
}

fn line_color(kind: LineKind) -> RGBColor {
    match kind {
        LineKind::Photopeak => RGBColor(220, 20, 60),
        LineKind::BackScatter => PHOTON_COLOR,
        LineKind::ComptonEdge => RGBColor(0, 150, 0),
        LineKind::SingleEscape => RGBColor(255, 140, 0),
        LineKind::DoubleEscape => RGBColor(148, 0, 211),
    }
}

fn interaction_color(kind: InteractionKind) -> RGBColor {
    match kind {
        InteractionKind::Photoelectric => PHOTON_COLOR,
        InteractionKind::Compton => ELECTRON_COLOR,
        InteractionKind::PairProduction => PAIR_COLOR,
    }
}

// ─────────────────────────────────────────────────────────────
// 角度扫描
// ─────────────────────────────────────────────────────────────

/// 生成角度扫描图
pub fn generate_sweep_plot(sweep: &AngleSweep, output_path: &Path, opts: PlotOptions) -> Result<()> {
    if opts.use_svg {
        let root = SVGBackend::new(output_path, (opts.width, opts.height)).into_drawing_area();
        draw_sweep_chart(&root, sweep)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, (opts.width, opts.height)).into_drawing_area();
        draw_sweep_chart(&root, sweep)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

fn draw_sweep_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    sweep: &AngleSweep,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let title = format!(
        "Compton Diffusion for incident Energy of {} keV",
        sweep.incident
    );

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..360.0, 0.0..sweep.incident * 1.05)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Angle of deviation (°)")
        .y_desc("Energy (keV)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            sweep.samples().map(|(a, p, _)| (a as f64, p)),
            PHOTON_COLOR.stroke_width(2),
        ))
        .map_err(plot_err)?
        .label("Energy of the Compton photon")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], PHOTON_COLOR.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(
            sweep.samples().map(|(a, _, e)| (a as f64, e)),
            ELECTRON_COLOR.stroke_width(2),
        ))
        .map_err(plot_err)?
        .label("Energy of the Compton electron")
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], ELECTRON_COLOR.stroke_width(2))
        });

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::MiddleRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 16))
        .draw()
        .map_err(plot_err)?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────
// 理论能谱
// ─────────────────────────────────────────────────────────────

/// 生成理论能谱图
pub fn generate_spectrum_plot(
    curve: &SpectrumCurve,
    output_path: &Path,
    opts: PlotOptions,
) -> Result<()> {
    if opts.use_svg {
        let root = SVGBackend::new(output_path, (opts.width, opts.height)).into_drawing_area();
        draw_spectrum_chart(&root, curve)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, (opts.width, opts.height)).into_drawing_area();
        draw_spectrum_chart(&root, curve)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

fn draw_spectrum_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    curve: &SpectrumCurve,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let x_max = curve.energies.last().copied().unwrap_or(curve.incident);

    let mut chart = ChartBuilder::on(root)
        .caption("Theoretical Spectrum", ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, 0.0..1.2)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Energy (keV)")
        .y_desc("Intensity")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(curve.points(), BLACK.stroke_width(1)))
        .map_err(plot_err)?
        .label("Theoretical spectrum")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(1)));

    // 特征线位置
    for line in &curve.lines {
        let color = line_color(line.kind);
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(line.energy, 0.0), (line.energy, 1.1)],
                color.stroke_width(1),
            )))
            .map_err(plot_err)?
            .label(format!("{}: {:.2} keV", line.kind, line.energy))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 14))
        .draw()
        .map_err(plot_err)?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────
// 相互作用比例
// ─────────────────────────────────────────────────────────────

/// 生成相互作用比例柱状图
pub fn generate_proportions_plot(
    proportions: &ProportionSet,
    energy: f64,
    z: f64,
    output_path: &Path,
    opts: PlotOptions,
) -> Result<()> {
    if opts.use_svg {
        let root = SVGBackend::new(output_path, (opts.width, opts.height)).into_drawing_area();
        draw_proportions_chart(&root, proportions, energy, z)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, (opts.width, opts.height)).into_drawing_area();
        draw_proportions_chart(&root, proportions, energy, z)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

fn draw_proportions_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    proportions: &ProportionSet,
    energy: f64,
    z: f64,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let title = format!("Proportions of the effects ({} keV, Z = {})", energy, z);

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..3.0, 0.0..1.1)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_: &f64| String::new())
        .y_desc("Fraction")
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    for (i, kind) in InteractionKind::ALL.iter().enumerate() {
        let value = proportions.get(*kind).max(0.0);
        let x0 = i as f64 + 0.15;
        let x1 = i as f64 + 0.85;

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x0, 0.0), (x1, value)],
                interaction_color(*kind).filled(),
            )))
            .map_err(plot_err)?;

        chart
            .draw_series(std::iter::once(Text::new(
                format!("{} {:.1}%", kind, value * 100.0),
                (x0, value + 0.03),
                ("sans-serif", 16).into_font().color(&BLACK),
            )))
            .map_err(plot_err)?;
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────
// IRM 能量图
// ─────────────────────────────────────────────────────────────

/// 生成 IRM 能量图（上：特征能量，下：相互作用比例）
pub fn generate_irm_plot(
    points: &[IrmPoint],
    z: f64,
    output_path: &Path,
    opts: PlotOptions,
) -> Result<()> {
    if opts.use_svg {
        let root = SVGBackend::new(output_path, (opts.width, opts.height)).into_drawing_area();
        draw_irm_chart(&root, points, z)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, (opts.width, opts.height)).into_drawing_area();
        draw_irm_chart(&root, points, z)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

fn draw_irm_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    points: &[IrmPoint],
    z: f64,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let x_max = points.last().map(|p| p.incident).unwrap_or(2000.0);
    let areas = root.split_evenly((2, 1));

    let mut energy_chart = ChartBuilder::on(&areas[0])
        .caption(
            format!("Interaction energies vs incident energy (Z = {})", z),
            ("sans-serif", 24).into_font(),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..x_max, 0.0..x_max)
        .map_err(plot_err)?;

    energy_chart
        .configure_mesh()
        .x_desc("Incident energy (keV)")
        .y_desc("Energy (keV)")
        .draw()
        .map_err(plot_err)?;

    energy_chart
        .draw_series(LineSeries::new(
            points.iter().map(|p| (p.incident, p.retro)),
            PHOTON_COLOR.stroke_width(2),
        ))
        .map_err(plot_err)?
        .label("Retrodiffusion")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], PHOTON_COLOR.stroke_width(2)));

    energy_chart
        .draw_series(LineSeries::new(
            points.iter().map(|p| (p.incident, p.compton_front)),
            ELECTRON_COLOR.stroke_width(2),
        ))
        .map_err(plot_err)?
        .label("Compton front")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ELECTRON_COLOR.stroke_width(2)));

    energy_chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    let mut fraction_chart = ChartBuilder::on(&areas[1])
        .caption("Interaction proportions", ("sans-serif", 24).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..x_max, 0.0..1.05)
        .map_err(plot_err)?;

    fraction_chart
        .configure_mesh()
        .x_desc("Incident energy (keV)")
        .y_desc("Fraction")
        .draw()
        .map_err(plot_err)?;

    for kind in InteractionKind::ALL {
        let color = interaction_color(kind);
        fraction_chart
            .draw_series(LineSeries::new(
                points.iter().map(move |p| (p.incident, p.proportions.get(kind))),
                color.stroke_width(2),
            ))
            .map_err(plot_err)?
            .label(kind.to_string())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    fraction_chart
        .configure_series_labels()
        .position(SeriesLabelPosition::MiddleRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    Ok(())
}
