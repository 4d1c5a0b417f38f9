//! # 统一错误处理模块
//!
//! 定义 comptonkit 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// comptonkit 统一错误类型
#[derive(Error, Debug)]
pub enum ComptonError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 物理量校验错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid photon energy: {energy} keV (must be a finite value > 0)")]
    InvalidEnergy { energy: f64 },

    #[error("Invalid atomic number: {z} (must be finite)")]
    InvalidAtomicNumber { z: f64 },

    #[error(
        "Degenerate proportions at {energy} keV, Z = {z}: weights sum to {total}, cannot normalize"
    )]
    DegenerateProportions { energy: f64, z: f64, total: f64 },

    #[error("Invalid detector geometry: {0}")]
    InvalidGeometry(String),

    // ─────────────────────────────────────────────────────────────
    // 材料表错误
    // ─────────────────────────────────────────────────────────────
    #[error("Unknown detector material: {name}")]
    UnknownMaterial { name: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 绘图错误
    // ─────────────────────────────────────────────────────────────
    #[error("Plot rendering failed: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ComptonError>;
