//! # Exam Question Parser
//!
//! 从无结构的试卷文档（纯文本或带颜色标注的 DOCX）中还原
//! 结构化选择题题库的解析引擎。
//!
//! ## 架构设计
//!
//! ### ① 核心引擎层（Parser）
//! - `parser/` - 纯同步、无共享状态的解析流水线
//! - `normalize` - 空白折叠为单行
//! - `segmenter` - 按 "Câu <N>." 标记切题
//! - `options` - 选项边界启发式探测（全库最核心的部分）
//! - `correlator` - 红色片段 → 正确答案关联
//!
//! ### ② 提取层（Docx）
//! - `docx/` - ZIP + XML 事件流遍历，按 run 拼全文、收红色片段
//!
//! ### ③ 装载层（Loaders）
//! - `models/loaders` - 按扩展名路由（txt / docx / pdf），
//!   PDF 文本提取通过 `PdfTextExtractor` trait 注入
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量文件处理器，管理并发
//! - `orchestrator/exam_processor` - 单个文件处理器，落盘 JSON
//!
//! ## 错误策略
//!
//! `parser::parse` 永不失败（识别不出题目 = 空列表，坏块静默
//! 丢弃）；只有 DOCX 容器缺少主内容部件才是致命错误

pub mod config;
pub mod docx;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use docx::{extract_docx_text, extract_docx_with_colors};
pub use error::{AppError, AppResult, DocxError, FileError};
pub use models::{
    parse_file_with_colors, AnswerOption, DocxParseResult, FileParseResult, OptionLabel,
    ParsedExam, ParsedQuestion, PdfTextExtractor,
};
pub use orchestrator::App;
pub use parser::{has_existing_questions, normalize_text, parse};
