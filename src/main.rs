//! # comptonkit - Compton 散射计算工具箱
//!
//! 将 γ 能谱分析中常用的 Compton 散射计算整合为单一可执行文件。
//!
//! ## 子命令
//! - `scatter`     - 散射光子/反冲电子能量随角度变化
//! - `escape`      - 单/双逃逸峰能量
//! - `proportions` - 光电/Compton/电子对相互作用比例
//! - `spectrum`    - 理论能谱（标注特征线）
//! - `irm`         - 入射能量 - 相互作用能量图
//! - `report`      - 多个入射能量的完整分析报告
//! - `materials`   - 列出探测器材料表
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── compton/   (物理计算、绘图、导出)
//!   │     ├── models/    (材料表)
//!   │     └── batch/     (并行执行)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod compton;
mod error;
mod models;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
