//! # 批量执行器
//!
//! 并行执行批量计算任务（多个入射能量）。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代，结果保持输入顺序
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/report.rs`, `commands/irm.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{ComptonError, Result};
use crate::utils::progress;

use rayon::prelude::*;

/// 单个任务处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult<R> {
    /// 处理成功
    Success(R),
    /// 计算完成但未写出文件（如文件已存在）
    Skipped(R, String),
    /// 处理失败
    Failed(String, String), // (任务标签, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug)]
pub struct BatchResult<R> {
    /// 成功数量
    pub success: usize,
    /// 跳过数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
    /// 跳过原因
    pub skip_reasons: Vec<String>,
    /// 成功或跳过任务的结果，按输入顺序
    pub outputs: Vec<R>,
}

impl<R> Default for BatchResult<R> {
    fn default() -> Self {
        Self {
            success: 0,
            skipped: 0,
            failed: 0,
            failures: Vec::new(),
            skip_reasons: Vec::new(),
            outputs: Vec::new(),
        }
    }
}

impl<R> BatchResult<R> {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult<R>) {
        match result {
            ProcessResult::Success(out) => {
                self.success += 1;
                self.outputs.push(out);
            }
            ProcessResult::Skipped(out, reason) => {
                self.skipped += 1;
                self.skip_reasons.push(reason);
                self.outputs.push(out);
            }
            ProcessResult::Failed(label, err) => {
                self.failed += 1;
                self.failures.push((label, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器，`jobs == 0` 时使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 构建专用线程池
    pub fn thread_pool(&self) -> Result<rayon::ThreadPool> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| ComptonError::Other(format!("Failed to build thread pool: {}", e)))
    }

    /// 并行处理任务列表
    pub fn run<T, R, F>(&self, items: &[T], processor: F) -> Result<BatchResult<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> ProcessResult<R> + Sync + Send,
    {
        let pb = progress::create_progress_bar(items.len() as u64, "Processing");
        let pool = self.thread_pool()?;

        let results: Vec<ProcessResult<R>> = pool.install(|| {
            items
                .par_iter()
                .map(|item| {
                    let result = processor(item);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        // 汇总结果
        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_preserves_order_and_counts() {
        let runner = BatchRunner::new(2);
        let items: Vec<i32> = (0..20).collect();

        let result = runner
            .run(&items, |x| match x % 5 {
                0 => ProcessResult::Failed(x.to_string(), "divisible by 5".to_string()),
                1 => ProcessResult::Skipped(*x, "exists".to_string()),
                _ => ProcessResult::Success(*x),
            })
            .unwrap();

        assert_eq!(result.total(), 20);
        assert_eq!(result.failed, 4);
        assert_eq!(result.skipped, 4);
        assert_eq!(result.success, 12);
        assert_eq!(result.failures[0].0, "0");

        let mut sorted = result.outputs.clone();
        sorted.sort_unstable();
        assert_eq!(result.outputs, sorted);
    }

    #[test]
    fn test_auto_jobs() {
        assert!(BatchRunner::new(0).jobs() >= 1);
        assert_eq!(BatchRunner::new(3).jobs(), 3);
    }
}
