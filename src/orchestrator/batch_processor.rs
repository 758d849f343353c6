//! 批量试卷解析器 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：启动日志、准备输出目录
//! 2. **批量扫描**：收集输入目录下全部受支持的文件
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：将文件分批次处理，每批完成后再开始下一批
//! 5. **全局统计**：汇总所有文件的处理结果
//!
//! 核心解析是纯函数且不触碰任何共享状态，所以各文件可以放心地
//! 并行解析，批次之间零协调

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::orchestrator::exam_processor;
use crate::utils::logging::{init_log_file, log_files_found, log_startup};

/// 受支持的输入扩展名
///
/// PDF 需要外部文本提取器，批处理入口不带，遇到即告警跳过
const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "docx"];

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config.output_log_file)?;
        log_startup(config.max_concurrent_files);
        Ok(Self { config })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let all_files = self.scan_input_folder().await?;

        if all_files.is_empty() {
            warn!("⚠️ 没有找到待解析的文件，程序结束");
            return Ok(());
        }

        let total = all_files.len();
        log_files_found(total, self.config.max_concurrent_files);

        let stats = self.process_all_files(all_files).await?;

        print_final_stats(&stats, &self.config);

        Ok(())
    }

    /// 扫描输入目录，收集受支持的文件（按文件名排序，保证处理顺序稳定）
    async fn scan_input_folder(&self) -> Result<Vec<PathBuf>> {
        info!("\n📁 正在扫描待解析的文件...");

        let folder = PathBuf::from(&self.config.input_folder);
        if !folder.exists() {
            anyhow::bail!("文件夹不存在: {}", self.config.input_folder);
        }

        let mut files = Vec::new();
        let mut entries = tokio::fs::read_dir(&folder).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let ext = path
                .extension()
                .and_then(|s| s.to_str())
                .map(|s| s.to_lowercase())
                .unwrap_or_default();

            if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
                files.push(path);
            } else if ext == "pdf" {
                warn!(
                    "⚠️ 跳过 PDF 文件（未配置文本提取器）: {}",
                    path.display()
                );
            }
        }

        files.sort();
        Ok(files)
    }

    /// 分批处理所有文件
    async fn process_all_files(&self, all_files: Vec<PathBuf>) -> Result<ProcessingStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_files));
        let total = all_files.len();
        let mut stats = ProcessingStats {
            total,
            ..Default::default()
        };

        for batch_start in (0..total).step_by(self.config.max_concurrent_files) {
            let batch_end = (batch_start + self.config.max_concurrent_files).min(total);
            let batch_files = &all_files[batch_start..batch_end];
            let batch_num = (batch_start / self.config.max_concurrent_files) + 1;
            let total_batches =
                (total + self.config.max_concurrent_files - 1) / self.config.max_concurrent_files;

            log_batch_start(batch_num, total_batches, batch_start + 1, batch_end, total);

            let batch_result = self
                .process_batch(batch_files, batch_start, semaphore.clone())
                .await?;

            stats.success += batch_result.success;
            stats.skipped += batch_result.skipped;
            stats.failed += batch_result.failed;

            log_batch_complete(batch_num, &batch_result);
        }

        Ok(stats)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch_files: &[PathBuf],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<BatchResult> {
        let mut batch_handles = Vec::new();

        for (idx, file_path) in batch_files.iter().enumerate() {
            let exam_index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;

            let file_path = file_path.clone();
            let config = self.config.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                exam_processor::process_exam(&file_path, exam_index, &config).await
            });
            batch_handles.push((exam_index, handle));
        }

        let mut result = BatchResult::default();

        for (exam_index, handle) in batch_handles {
            match handle.await {
                Ok(Ok(true)) => result.success += 1,
                Ok(Ok(false)) => result.skipped += 1,
                Ok(Err(e)) => {
                    error!("[试卷 {}] ❌ 处理过程中发生错误: {}", exam_index, e);
                    result.failed += 1;
                }
                Err(e) => {
                    error!("[试卷 {}] 任务执行失败: {}", exam_index, e);
                    result.failed += 1;
                }
            }
        }

        Ok(result)
    }
}

/// 处理统计
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total: usize,
}

/// 批次处理结果
#[derive(Debug, Default)]
struct BatchResult {
    success: usize,
    skipped: usize,
    failed: usize,
}

// ========== 日志辅助函数 ==========

fn log_batch_start(batch_num: usize, total_batches: usize, start: usize, end: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 批", batch_num, total_batches);
    info!("📄 本批文件: {}-{} / 共 {} 个", start, end, total);
    info!("{}", "=".repeat(60));
}

fn log_batch_complete(batch_num: usize, result: &BatchResult) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ 第 {} 批完成: 成功 {}/{}",
        batch_num,
        result.success,
        result.success + result.skipped + result.failed
    );
    info!("{}", "─".repeat(60));
}

fn print_final_stats(stats: &ProcessingStats, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部解析完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.success, stats.total);
    info!("⏭️ 跳过: {}", stats.skipped);
    info!("❌ 失败: {}", stats.failed);
    info!("{}", "=".repeat(60));
    info!("\n解析结果已输出至: {}", config.output_folder);
}
