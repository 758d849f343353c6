//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度。
//!
//! ### `batch_processor` - 批量试卷解析器
//! - 管理应用生命周期（初始化、运行）
//! - 扫描并收集待解析文件
//! - 控制并发数量（Semaphore）
//! - 输出全局统计信息
//!
//! ### `exam_processor` - 单个试卷文件处理器
//! - 读取单个文件并按扩展名装载
//! - 调用核心解析引擎
//! - 把解析结果写成 JSON
//! - 输出单个文件的统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<PathBuf>)
//!     ↓
//! exam_processor (处理单个文件)
//!     ↓
//! models::loaders (字节 → 文本 + 红色片段)
//!     ↓
//! parser (核心引擎：切分 / 边界探测 / 答案关联)
//! ```

pub mod batch_processor;
pub mod exam_processor;

// 重新导出主要类型
pub use batch_processor::{App, ProcessingStats};
pub use exam_processor::{process_exam, ExamStats};
