//! 单个试卷文件处理器 - 编排层
//!
//! 职责：一个文件从字节到 JSON 的完整路径
//! （读取 → 按扩展名装载 → 解析 → 校验 → 落盘 → 统计）

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::models::{parse_file_with_colors, ParsedExam};
use crate::parser;

/// 单份试卷的处理统计
#[derive(Debug, Default)]
pub struct ExamStats {
    /// 解析出的题目数
    pub questions: usize,
    /// 其中被标记出正确答案的题目数
    pub with_answer: usize,
}

/// 处理单个试卷文件
///
/// # 参数
/// - `file_path`: 待解析文件路径
/// - `exam_index`: 文件索引（用于日志）
/// - `config`: 配置
///
/// # 返回
/// 返回是否成功解析出题目（true=有题目并已落盘，false=跳过）
pub async fn process_exam(file_path: &Path, exam_index: usize, config: &Config) -> Result<bool> {
    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    info!("[试卷 {}] 开始处理: {}", exam_index, file_name);

    // 1. 读取并装载
    let bytes = tokio::fs::read(file_path)
        .await
        .map_err(|e| AppError::file_read_failed(file_path.display().to_string(), e))?;

    let loaded = parse_file_with_colors(&file_name, &bytes, None)
        .with_context(|| format!("文件装载失败: {}", file_name))?;

    if let Some(reds) = &loaded.red_texts {
        info!("[试卷 {}] 🎨 识别到 {} 个红色片段", exam_index, reds.len());
    }

    // 2. 解析题目
    let exam = parser::parse(&loaded.text, loaded.red_texts.as_deref());

    // "0 道题"不是引擎错误，但对调用方是校验失败，跳过该文件
    if exam.questions.is_empty() {
        warn!("[试卷 {}] ⚠️ 未识别出任何题目，跳过此文件", exam_index);
        return Ok(false);
    }

    let stats = collect_stats(&exam);
    log_exam_stats(exam_index, &stats);

    if config.verbose_logging {
        for (i, q) in exam.questions.iter().enumerate() {
            info!("[试卷 {}]   {}. {}", exam_index, i + 1, q);
        }
    }

    // 3. 落盘
    let output_path = write_output(&exam, file_path, config).await?;
    info!("[试卷 {}] ✓ 结果已写入: {}", exam_index, output_path);

    Ok(true)
}

/// 汇总解析统计
fn collect_stats(exam: &ParsedExam) -> ExamStats {
    ExamStats {
        questions: exam.questions.len(),
        with_answer: exam
            .questions
            .iter()
            .filter(|q| q.correct_count() > 0)
            .count(),
    }
}

/// 把解析结果写成 JSON 文件
///
/// 输出文件名取输入文件的主名，落在配置的输出目录下
async fn write_output(exam: &ParsedExam, file_path: &Path, config: &Config) -> Result<String> {
    let stem = file_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "exam".to_string());

    tokio::fs::create_dir_all(&config.output_folder)
        .await
        .with_context(|| format!("无法创建输出目录: {}", config.output_folder))?;

    let output_path = Path::new(&config.output_folder).join(format!("{}.json", stem));
    let json = serde_json::to_string_pretty(exam).context("序列化解析结果失败")?;

    tokio::fs::write(&output_path, json)
        .await
        .map_err(|e| AppError::file_write_failed(output_path.display().to_string(), e))?;

    Ok(output_path.display().to_string())
}

// ========== 日志辅助函数 ==========

fn log_exam_stats(exam_index: usize, stats: &ExamStats) {
    info!(
        "[试卷 {}] ✓ 解析完成: {} 道题目, 其中 {} 道带答案标记",
        exam_index, stats.questions, stats.with_answer
    );
    if stats.with_answer < stats.questions {
        info!(
            "[试卷 {}] 💡 {} 道题目没有答案标记（文档未用红色标注或关联失败）",
            exam_index,
            stats.questions - stats.with_answer
        );
    }
}
