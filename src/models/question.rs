//! 题目数据模型
//!
//! 解析引擎的输出结构，字段命名与下游题库入库接口保持一致（camelCase）

use serde::{Deserialize, Serialize};

/// 选项标签（A/B/C/D）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    /// 固定的标签顺序，每道题目恰好 4 个选项槽位
    pub const ALL: [OptionLabel; 4] = [
        OptionLabel::A,
        OptionLabel::B,
        OptionLabel::C,
        OptionLabel::D,
    ];

    /// 对应的字符形式
    pub fn as_char(self) -> char {
        match self {
            OptionLabel::A => 'A',
            OptionLabel::B => 'B',
            OptionLabel::C => 'C',
            OptionLabel::D => 'D',
        }
    }

    /// 从字符解析标签
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(OptionLabel::A),
            'B' => Some(OptionLabel::B),
            'C' => Some(OptionLabel::C),
            'D' => Some(OptionLabel::D),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// 单个选项
///
/// `content` 可以为空字符串（提取失败的槽位保留而不丢弃），
/// `is_correct` 默认为 false，只有答案关联器会将其置为 true
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub label: OptionLabel,
    pub content: String,
    pub is_correct: bool,
}

impl AnswerOption {
    /// 创建一个空内容的占位选项
    pub fn empty(label: OptionLabel) -> Self {
        Self {
            label,
            content: String::new(),
            is_correct: false,
        }
    }
}

/// 解析出的单道题目
///
/// 不变式：`content` 非空且至少 10 个字符；`options` 恰好 4 个，
/// 按 A/B/C/D 顺序各占一个槽位
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedQuestion {
    pub content: String,
    pub options: Vec<AnswerOption>,
}

impl ParsedQuestion {
    /// 被标记为正确答案的选项数量
    ///
    /// 良构输入下应为 0 或 1，但引擎不强制（见答案关联器的设计说明）
    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.is_correct).count()
    }
}

impl std::fmt::Display for ParsedQuestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 截断题干内容以便显示（最多80个字符）
        let content_preview = if self.content.chars().count() > 80 {
            self.content.chars().take(80).collect::<String>() + "..."
        } else {
            self.content.clone()
        };
        write!(f, "{} [选项: {}]", content_preview, self.options.len())
    }
}

/// 一次解析调用的完整输出
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedExam {
    pub questions: Vec<ParsedQuestion>,
    pub raw_text: String,
}

/// DOCX 颜色提取结果
#[derive(Debug, Clone)]
pub struct DocxParseResult {
    /// 全文（按 run 顺序拼接）
    pub text: String,
    /// 红色文本片段（可重复，按文档顺序）
    pub red_texts: Vec<String>,
}

/// 文件加载结果
///
/// `red_texts` 仅在 DOCX 颜色提取成功时存在
#[derive(Debug, Clone)]
pub struct FileParseResult {
    pub text: String,
    pub red_texts: Option<Vec<String>>,
}
