//! # Compton 计算模块
//!
//! 提供 Compton 散射相关物理量的闭式计算，以及图表与数据导出。
//!
//! ## 子模块
//! - `kinematics`: 散射能量、角度扫描、逃逸峰
//! - `proportions`: 相互作用比例估算
//! - `spectrum`: 理论能谱合成
//! - `irm`: 入射能量 - 相互作用能量图
//! - `geometry`: 探测几何效率
//! - `plot`: 图表生成
//! - `export`: 数据导出
//!
//! 单位约定：所有能量均为 keV。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 计算部分不依赖 `plot` 和 `export`

pub mod export;
pub mod geometry;
pub mod irm;
pub mod kinematics;
pub mod plot;
pub mod proportions;
pub mod spectrum;

/// 电子静止能量 mₑc²（keV）
pub const ELECTRON_REST_ENERGY_KEV: f64 = 511.0;

/// 电子对产生阈值 2mₑc²（keV）
pub const PAIR_PRODUCTION_THRESHOLD_KEV: f64 = 2.0 * ELECTRON_REST_ENERGY_KEV;

pub use geometry::geometric_efficiency;
pub use irm::{interaction_energy_map, IrmPoint};
pub use kinematics::{back_scatter, escape_peaks, scattered_energy, sweep, AngleSweep, EscapePeaks};
pub use proportions::{estimate_proportions, InteractionKind, ProportionSet};
pub use spectrum::{synthesize, synthesize_with_bins, LineKind, SpectrumCurve};
