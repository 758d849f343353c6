//! 题目解析引擎 - 核心层
//!
//! 从无结构的试卷文本中还原选择题题库。整条流水线是纯同步计算，
//! 不持有任何共享状态，多份文档可以在独立任务里并行解析。
//!
//! 流水线顺序：
//! 1. `normalize` - 全文折叠为单行
//! 2. `segmenter` - 按 "Câu <N>." 标记切块
//! 3. `options` - 块内探测题干 / 选项边界
//! 4. `correlator` - 红色片段 → is_correct 标记
//!
//! 错误策略：`parse` 永不失败。识别不出题目就返回空列表；
//! 不合格的题目块静默丢弃（不做逐块错误上报，这是刻意保持的
//! 兼容行为，不是疏漏）

pub mod correlator;
pub mod normalize;
pub mod options;
pub mod segmenter;

use tracing::debug;

use crate::models::{AnswerOption, OptionLabel, ParsedExam, ParsedQuestion};

pub use correlator::is_option_in_red_texts;
pub use normalize::normalize_text;
pub use options::{detect_options, find_option_a};
pub use segmenter::{
    find_markers, split_at_markers, split_blocks, strip_marker_prefix, QuestionMarker,
};

/// 解析入口
///
/// # 参数
/// - `text`: 原始文档文本（任意换行 / 空白约定）
/// - `red_texts`: 可选的红色片段列表（来自 DOCX 颜色提取）
///
/// # 返回
/// 永不失败；无法识别任何题目时 `questions` 为空列表
pub fn parse(text: &str, red_texts: Option<&[String]>) -> ParsedExam {
    let normalized = normalize_text(text);
    let markers = find_markers(&normalized);
    let mut questions = Vec::new();

    for (marker, block) in markers.iter().zip(split_at_markers(&normalized, &markers)) {
        match parse_one_question(block, red_texts) {
            Some(question) => questions.push(question),
            None => {
                debug!(
                    "丢弃不合格的题目块 (Câu {}): {}",
                    marker.num,
                    block.chars().take(40).collect::<String>()
                );
            }
        }
    }

    ParsedExam {
        questions,
        raw_text: normalized,
    }
}

/// 文本中是否已包含可识别的题目
pub fn has_existing_questions(text: &str) -> bool {
    !parse(text, None).questions.is_empty()
}

/// 解析单个题目块
///
/// 拒绝条件（返回 None，整块丢弃）：去前缀后内容不足 10 个字符、
/// 题干过短、识别出的边界不足 2 个。被接受但有缺口的选项集
/// 补齐为固定的 4 个槽位，缺失槽位内容为空字符串
fn parse_one_question(block: &str, red_texts: Option<&[String]>) -> Option<ParsedQuestion> {
    let content = strip_marker_prefix(block);
    if content.chars().count() < 10 {
        return None;
    }

    let (stem, found) = detect_options(content)?;

    let options: Vec<AnswerOption> = OptionLabel::ALL
        .iter()
        .map(|&label| match found.iter().find(|(l, _)| *l == label) {
            Some((_, content)) if !content.is_empty() => {
                let is_correct = match red_texts {
                    Some(reds) => is_option_in_red_texts(content, reds, label),
                    None => false,
                };
                AnswerOption {
                    label,
                    content: content.clone(),
                    is_correct,
                }
            }
            _ => AnswerOption::empty(label),
        })
        .collect();

    Some(ParsedQuestion {
        content: stem,
        options,
    })
}
