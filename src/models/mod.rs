//! # 数据模型模块
//!
//! 定义计算核心之外的静态数据：探测器材料表。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 子模块: material

pub mod material;

pub use material::{DetectorCategory, MaterialTable};
